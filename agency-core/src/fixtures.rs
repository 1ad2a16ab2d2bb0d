//! Embedded datasets for the pages that have no backend endpoint yet.
//!
//! The YAML is compiled into the binary; parsing happens when a page's
//! source is built, so a broken fixture surfaces as a `FixtureError` instead
//! of a panic.

use serde::de::DeserializeOwned;
use std::collections::HashSet;

use crate::error::FixtureError;
use crate::models::{Application, Faq, Hotel, LoanPlan, StockItem, Ticket, VisaCase};
use crate::table::Entity;

pub const APPLICATIONS: &str = include_str!("../fixtures/applications.yaml");
pub const VISA_CASES: &str = include_str!("../fixtures/visa_cases.yaml");
pub const LOAN_PLANS: &str = include_str!("../fixtures/loan_plans.yaml");
pub const HOTELS: &str = include_str!("../fixtures/hotels.yaml");
pub const STOCK_ITEMS: &str = include_str!("../fixtures/stock_items.yaml");
pub const TICKETS: &str = include_str!("../fixtures/tickets.yaml");
pub const FAQS: &str = include_str!("../fixtures/faqs.yaml");

/// Parse a YAML list of records and check that ids are unique.
pub fn parse<R: Entity + DeserializeOwned>(name: &'static str, yaml: &str) -> Result<Vec<R>, FixtureError> {
    let records: Vec<R> = serde_yaml::from_str(yaml).map_err(|source| FixtureError::Parse { name, source })?;

    let mut seen = HashSet::new();
    for record in &records {
        if !seen.insert(record.id()) {
            return Err(FixtureError::DuplicateId { name, id: record.id().to_string() });
        }
    }

    log::debug!("[FIXTURE] {}: {} records", name, records.len());
    Ok(records)
}

pub fn applications() -> Result<Vec<Application>, FixtureError> {
    parse("applications", APPLICATIONS)
}

pub fn visa_cases() -> Result<Vec<VisaCase>, FixtureError> {
    parse("visa-cases", VISA_CASES)
}

pub fn loan_plans() -> Result<Vec<LoanPlan>, FixtureError> {
    parse("loan-plans", LOAN_PLANS)
}

pub fn hotels() -> Result<Vec<Hotel>, FixtureError> {
    parse("hotels", HOTELS)
}

pub fn stock_items() -> Result<Vec<StockItem>, FixtureError> {
    parse("stock-items", STOCK_ITEMS)
}

pub fn tickets() -> Result<Vec<Ticket>, FixtureError> {
    parse("tickets", TICKETS)
}

pub fn faqs() -> Result<Vec<Faq>, FixtureError> {
    parse("faqs", FAQS)
}
