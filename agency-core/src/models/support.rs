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

pub const TICKET_STATUSES: &[&str] = &["Open", "In Progress", "Resolved", "Closed"];
pub const TICKET_PRIORITIES: &[&str] = &["Low", "Normal", "High", "Urgent"];
pub const FAQ_CATEGORIES: &[&str] = &["General", "Visa", "Loans", "Payments"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: String,
    pub subject: String,
    pub requester: String,
    pub status: String,
    pub priority: String,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub opened_on: Option<NaiveDate>,
}

impl Entity for Ticket {
    const PAGE: PageId = PageId::Tickets;

    fn id(&self) -> &str {
        &self.id
    }

    fn descriptor() -> EntityDescriptor<Self> {
        EntityDescriptor::<Self>::new("tickets")
            .text("id", "Ticket", |r| Some(Cow::from(r.id.as_str())))
            .text("subject", "Subject", |r| Some(Cow::from(r.subject.as_str())))
            .text("requester", "Requester", |r| Some(Cow::from(r.requester.as_str())))
            .text("assignee", "Assignee", |r| r.assignee.as_deref().map(Cow::from))
            .badge("status", "Status", |r| Some(Cow::from(r.status.as_str())))
            .badge("priority", "Priority", |r| Some(Cow::from(r.priority.as_str())))
            .text("opened_on", "Opened", |r| date_cell(r.opened_on))
            .search("subject", |r| Some(r.subject.as_str()))
            .search("requester", |r| Some(r.requester.as_str()))
            .filter("status", "Status", FilterOptions::Fixed(TICKET_STATUSES), |r| {
                Some(Cow::from(r.status.as_str()))
            })
            .filter("priority", "Priority", FilterOptions::Fixed(TICKET_PRIORITIES), |r| {
                Some(Cow::from(r.priority.as_str()))
            })
    }

    fn source(_api: &AdminApiClient) -> Result<Arc<dyn RecordSource<Self>>, FixtureError> {
        StaticSource::shared(Self::PAGE.slug(), fixtures::TICKETS)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faq {
    pub id: String,
    pub question: String,
    pub answer: String,
    pub category: String,
}

impl Entity for Faq {
    const PAGE: PageId = PageId::Faqs;

    fn id(&self) -> &str {
        &self.id
    }

    fn descriptor() -> EntityDescriptor<Self> {
        EntityDescriptor::<Self>::new("faqs")
            .text("question", "Question", |r| Some(Cow::from(r.question.as_str())))
            .text("answer", "Answer", |r| Some(Cow::from(r.answer.as_str())))
            .badge("category", "Category", |r| Some(Cow::from(r.category.as_str())))
            .search("question", |r| Some(r.question.as_str()))
            .filter("category", "Category", FilterOptions::Fixed(FAQ_CATEGORIES), |r| {
                Some(Cow::from(r.category.as_str()))
            })
    }

    fn source(_api: &AdminApiClient) -> Result<Arc<dyn RecordSource<Self>>, FixtureError> {
        StaticSource::shared(Self::PAGE.slug(), fixtures::FAQS)
    }
}
