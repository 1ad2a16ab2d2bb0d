use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::Arc;

use crate::api::AdminApiClient;
use crate::catalog::PageId;
use crate::error::FixtureError;
use crate::fixtures;
use crate::table::{CellKind, Entity, EntityDescriptor, FilterOptions, RecordSource, StaticSource};

pub const HOTEL_CITIES: &[&str] = &["London", "Toronto", "Sydney", "Berlin"];
pub const HOTEL_STATUSES: &[&str] = &["Available", "Fully Booked", "Closed"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotel {
    pub id: String,
    pub name: String,
    pub city: String,
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(default)]
    pub nightly_rate: Option<f64>,
    pub status: String,
}

impl Entity for Hotel {
    const PAGE: PageId = PageId::Hotels;

    fn id(&self) -> &str {
        &self.id
    }

    fn descriptor() -> EntityDescriptor<Self> {
        EntityDescriptor::<Self>::new("hotels")
            .text("name", "Hotel", |r| Some(Cow::from(r.name.as_str())))
            .text("city", "City", |r| Some(Cow::from(r.city.as_str())))
            .column("rating", "Rating", CellKind::Number, |r| {
                r.rating.map(|v| Cow::from(format!("{:.1}", v)))
            })
            .column("nightly_rate", "Per night", CellKind::Currency, |r| {
                r.nightly_rate.map(|v| Cow::from(v.to_string()))
            })
            .badge("status", "Status", |r| Some(Cow::from(r.status.as_str())))
            .search("name", |r| Some(r.name.as_str()))
            .search("city", |r| Some(r.city.as_str()))
            .filter("city", "City", FilterOptions::Fixed(HOTEL_CITIES), |r| {
                Some(Cow::from(r.city.as_str()))
            })
            .filter("status", "Status", FilterOptions::Fixed(HOTEL_STATUSES), |r| {
                Some(Cow::from(r.status.as_str()))
            })
    }

    fn source(_api: &AdminApiClient) -> Result<Arc<dyn RecordSource<Self>>, FixtureError> {
        StaticSource::shared(Self::PAGE.slug(), fixtures::HOTELS)
    }
}
