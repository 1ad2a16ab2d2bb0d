use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::Arc;

use crate::api::{AdminApiClient, CLIENTS_ENDPOINT, LEADS_ENDPOINT};
use crate::catalog::PageId;
use crate::error::FixtureError;
use crate::lookup::LookupKind;
use crate::models::id_from_any;
use crate::table::{CellKind, Entity, EntityDescriptor, FilterOptions, RecordSource, RemoteSource};

pub const LEAD_STATUSES: &[&str] = &["New", "Contacted", "Qualified", "Converted", "Lost"];

/// A registered client. `client_type` and `service_of_interest` are ids
/// into the definition tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    #[serde(deserialize_with = "id_from_any")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub client_type: Option<i64>,
    #[serde(default)]
    pub service_of_interest: Option<i64>,
    #[serde(default)]
    pub created_at: Option<String>,
}

fn id_cell(id: Option<i64>) -> Option<Cow<'static, str>> {
    id.map(|id| Cow::from(id.to_string()))
}

impl Entity for Client {
    const PAGE: PageId = PageId::Clients;

    fn id(&self) -> &str {
        &self.id
    }

    fn descriptor() -> EntityDescriptor<Self> {
        EntityDescriptor::<Self>::new("clients")
            .text("name", "Name", |r| Some(Cow::from(r.name.as_str())))
            .text("email", "Email", |r| r.email.as_deref().map(Cow::from))
            .text("phone", "Phone", |r| r.phone.as_deref().map(Cow::from))
            .column("client_type", "Client type", CellKind::Lookup(LookupKind::ClientTypes), |r| {
                id_cell(r.client_type)
            })
            .column(
                "service_of_interest",
                "Service of interest",
                CellKind::Lookup(LookupKind::ServiceCategories),
                |r| id_cell(r.service_of_interest),
            )
            .text("created_at", "Created", |r| r.created_at.as_deref().map(Cow::from))
            .search("name", |r| Some(r.name.as_str()))
            .search("email", |r| r.email.as_deref())
            .filter(
                "client_type",
                "Client type",
                FilterOptions::Lookup(LookupKind::ClientTypes),
                |r| id_cell(r.client_type),
            )
            .filter(
                "service_of_interest",
                "Service of interest",
                FilterOptions::Lookup(LookupKind::ServiceCategories),
                |r| id_cell(r.service_of_interest),
            )
    }

    fn source(api: &AdminApiClient) -> Result<Arc<dyn RecordSource<Self>>, FixtureError> {
        RemoteSource::shared(api, CLIENTS_ENDPOINT)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    #[serde(deserialize_with = "id_from_any")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Entity for Lead {
    const PAGE: PageId = PageId::Leads;

    fn id(&self) -> &str {
        &self.id
    }

    fn descriptor() -> EntityDescriptor<Self> {
        EntityDescriptor::<Self>::new("leads")
            .text("name", "Name", |r| Some(Cow::from(r.name.as_str())))
            .text("email", "Email", |r| r.email.as_deref().map(Cow::from))
            .text("source", "Source", |r| r.source.as_deref().map(Cow::from))
            .badge("status", "Status", |r| r.status.as_deref().map(Cow::from))
            .text("created_at", "Created", |r| r.created_at.as_deref().map(Cow::from))
            .search("name", |r| Some(r.name.as_str()))
            .search("email", |r| r.email.as_deref())
            .search("source", |r| r.source.as_deref())
            .filter("status", "Status", FilterOptions::Fixed(LEAD_STATUSES), |r| {
                r.status.as_deref().map(Cow::from)
            })
    }

    fn source(api: &AdminApiClient) -> Result<Arc<dyn RecordSource<Self>>, FixtureError> {
        RemoteSource::shared(api, LEADS_ENDPOINT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::{Definition, Definitions, LookupTable};

    #[test]
    fn lookup_columns_resolve_through_definitions() {
        let client: Client = serde_json::from_str(
            r#"{"id": 7, "name": "Priya Nair", "email": null, "client_type": 2, "service_of_interest": 99}"#,
        )
        .unwrap();
        let defs = Definitions::new().with_table(
            LookupKind::ClientTypes,
            LookupTable::from_definitions(vec![Definition { id: 2, term: "Student".to_string() }]),
        );
        let desc = Client::descriptor();
        let cell = |key: &str| desc.column_by_key(key).unwrap().display(&client, &defs);

        assert_eq!(client.id, "7");
        assert_eq!(cell("client_type"), "Student");
        assert_eq!(cell("service_of_interest"), crate::models::PLACEHOLDER);
        assert_eq!(cell("email"), crate::models::PLACEHOLDER);
    }

    #[test]
    fn lookup_filter_matches_on_id() {
        let client = Client {
            id: "1".to_string(),
            name: "A".to_string(),
            email: None,
            phone: None,
            client_type: Some(3),
            service_of_interest: None,
            created_at: None,
        };
        let desc = Client::descriptor();
        let dim = desc.dimension("client_type").unwrap();
        assert!(dim.matches(&client, "3"));
        assert!(!dim.matches(&client, "4"));
        assert!(!desc.dimension("service_of_interest").unwrap().matches(&client, "3"));
    }
}
