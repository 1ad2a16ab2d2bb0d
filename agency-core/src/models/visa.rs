use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::Arc;

use crate::api::AdminApiClient;
use crate::catalog::PageId;
use crate::error::FixtureError;
use crate::fixtures;
use crate::models::date_cell;
use crate::table::{Entity, EntityDescriptor, FilterOptions, RecordSource, StaticSource};

pub const VISA_STAGES: &[&str] = &[
    "Document Collection",
    "Submitted",
    "Interview Scheduled",
    "In Progress",
    "Approved",
    "Rejected",
];
pub const VISA_TYPES: &[&str] = &["Student", "Tourist", "Work", "Dependent"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisaCase {
    pub id: String,
    pub applicant: String,
    pub country: String,
    pub visa_type: String,
    pub stage: String,
    #[serde(default)]
    pub submitted_on: Option<NaiveDate>,
    #[serde(default)]
    pub officer: Option<String>,
}

impl Entity for VisaCase {
    const PAGE: PageId = PageId::VisaCases;

    fn id(&self) -> &str {
        &self.id
    }

    fn descriptor() -> EntityDescriptor<Self> {
        EntityDescriptor::<Self>::new("visa cases")
            .text("id", "Case", |r| Some(Cow::from(r.id.as_str())))
            .text("applicant", "Applicant", |r| Some(Cow::from(r.applicant.as_str())))
            .text("country", "Country", |r| Some(Cow::from(r.country.as_str())))
            .text("visa_type", "Visa type", |r| Some(Cow::from(r.visa_type.as_str())))
            .badge("stage", "Stage", |r| Some(Cow::from(r.stage.as_str())))
            .text("submitted_on", "Submitted", |r| date_cell(r.submitted_on))
            .text("officer", "Officer", |r| r.officer.as_deref().map(Cow::from))
            .search("applicant", |r| Some(r.applicant.as_str()))
            .search("country", |r| Some(r.country.as_str()))
            .filter("stage", "Stage", FilterOptions::Fixed(VISA_STAGES), |r| {
                Some(Cow::from(r.stage.as_str()))
            })
            .filter("visa_type", "Visa type", FilterOptions::Fixed(VISA_TYPES), |r| {
                Some(Cow::from(r.visa_type.as_str()))
            })
    }

    fn source(_api: &AdminApiClient) -> Result<Arc<dyn RecordSource<Self>>, FixtureError> {
        StaticSource::shared(Self::PAGE.slug(), fixtures::VISA_CASES)
    }
}
