//! Record shapes for every dashboard page, one module per section.

mod clients;
mod loans;
mod marketplace;
mod study;
mod support;
mod travel;
mod visa;

pub use clients::{Client, Lead};
pub use loans::LoanPlan;
pub use marketplace::{MarketplaceProduct, StockItem};
pub use study::Application;
pub use support::{Faq, Ticket};
pub use travel::Hotel;
pub use visa::VisaCase;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Cow;

/// Rendered for any absent or blank value.
pub const PLACEHOLDER: &str = "N/A";

/// Colour family of a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    Success,
    Warning,
    Danger,
    Info,
    Neutral,
}

/// Pick a badge tone for an enumerated status-like value. Case-insensitive;
/// anything unrecognised is neutral.
pub fn badge_tone(value: &str) -> Tone {
    let value = value.trim().to_lowercase();
    match value.as_str() {
        "approved" | "active" | "resolved" | "available" => Tone::Success,
        "pending" | "open" => Tone::Warning,
        "rejected" | "closed" | "cancelled" | "urgent" | "out of stock" => Tone::Danger,
        "high" | "in progress" => Tone::Info,
        v if v.contains("review") => Tone::Warning,
        _ => Tone::Neutral,
    }
}

pub(crate) fn date_cell(date: Option<NaiveDate>) -> Option<Cow<'static, str>> {
    date.map(|d| Cow::from(d.format("%d %b %Y").to_string()))
}

/// Backend ids arrive as numbers, fixtures use strings. Both become a string.
pub(crate) fn id_from_any<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Int(n) => n.to_string(),
        RawId::Float(f) => f.to_string(),
    })
}
