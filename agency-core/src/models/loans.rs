use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::Arc;

use crate::api::AdminApiClient;
use crate::catalog::PageId;
use crate::error::FixtureError;
use crate::fixtures;
use crate::table::{CellKind, Entity, EntityDescriptor, FilterOptions, RecordSource, StaticSource};

pub const LOAN_TYPES: &[&str] = &["Education", "Personal", "Travel"];
pub const LOAN_STATUSES: &[&str] = &["Active", "Pending", "Closed"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanPlan {
    pub id: String,
    pub name: String,
    pub lender: String,
    pub loan_type: String,
    /// Annual rate in percent.
    pub interest_rate: f64,
    #[serde(default)]
    pub max_amount: Option<f64>,
    #[serde(default)]
    pub term_months: Option<u32>,
    pub status: String,
}

impl Entity for LoanPlan {
    const PAGE: PageId = PageId::LoanPlans;

    fn id(&self) -> &str {
        &self.id
    }

    fn descriptor() -> EntityDescriptor<Self> {
        EntityDescriptor::<Self>::new("loan plans")
            .text("name", "Plan", |r| Some(Cow::from(r.name.as_str())))
            .text("lender", "Lender", |r| Some(Cow::from(r.lender.as_str())))
            .text("loan_type", "Type", |r| Some(Cow::from(r.loan_type.as_str())))
            .column("interest_rate", "Rate", CellKind::Text, |r| {
                Some(Cow::from(format!("{:.2}%", r.interest_rate)))
            })
            .column("max_amount", "Max amount", CellKind::Currency, |r| {
                r.max_amount.map(|v| Cow::from(v.to_string()))
            })
            .column("term_months", "Term (months)", CellKind::Number, |r| {
                r.term_months.map(|v| Cow::from(v.to_string()))
            })
            .badge("status", "Status", |r| Some(Cow::from(r.status.as_str())))
            .search("name", |r| Some(r.name.as_str()))
            .search("lender", |r| Some(r.lender.as_str()))
            .filter("loan_type", "Loan type", FilterOptions::Fixed(LOAN_TYPES), |r| {
                Some(Cow::from(r.loan_type.as_str()))
            })
            .filter("status", "Status", FilterOptions::Fixed(LOAN_STATUSES), |r| {
                Some(Cow::from(r.status.as_str()))
            })
    }

    fn source(_api: &AdminApiClient) -> Result<Arc<dyn RecordSource<Self>>, FixtureError> {
        StaticSource::shared(Self::PAGE.slug(), fixtures::LOAN_PLANS)
    }
}
