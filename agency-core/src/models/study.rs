use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::Arc;

use crate::api::AdminApiClient;
use crate::catalog::PageId;
use crate::error::FixtureError;
use crate::fixtures;
use crate::table::{Entity, EntityDescriptor, FilterOptions, RecordSource, StaticSource};

pub const APPLICATION_STATUSES: &[&str] = &["Pending", "Under Review", "Approved", "Rejected"];
pub const PRIORITIES: &[&str] = &["Normal", "High", "Urgent"];

/// A student's application to a university programme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: String,
    pub applicant: String,
    pub university: String,
    pub program: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub intake: Option<String>,
    pub status: String,
    pub priority: String,
}

impl Entity for Application {
    const PAGE: PageId = PageId::Applications;

    fn id(&self) -> &str {
        &self.id
    }

    fn descriptor() -> EntityDescriptor<Self> {
        EntityDescriptor::<Self>::new("applications")
            .text("id", "ID", |r| Some(Cow::from(r.id.as_str())))
            .text("applicant", "Applicant", |r| Some(Cow::from(r.applicant.as_str())))
            .text("university", "University", |r| Some(Cow::from(r.university.as_str())))
            .text("program", "Program", |r| Some(Cow::from(r.program.as_str())))
            .text("country", "Country", |r| r.country.as_deref().map(Cow::from))
            .text("intake", "Intake", |r| r.intake.as_deref().map(Cow::from))
            .badge("status", "Status", |r| Some(Cow::from(r.status.as_str())))
            .badge("priority", "Priority", |r| Some(Cow::from(r.priority.as_str())))
            .search("applicant", |r| Some(r.applicant.as_str()))
            .search("university", |r| Some(r.university.as_str()))
            .search("program", |r| Some(r.program.as_str()))
            .filter("status", "Status", FilterOptions::Fixed(APPLICATION_STATUSES), |r| {
                Some(Cow::from(r.status.as_str()))
            })
            .filter("priority", "Priority", FilterOptions::Fixed(PRIORITIES), |r| {
                Some(Cow::from(r.priority.as_str()))
            })
    }

    fn source(_api: &AdminApiClient) -> Result<Arc<dyn RecordSource<Self>>, FixtureError> {
        StaticSource::shared(Self::PAGE.slug(), fixtures::APPLICATIONS)
    }
}
