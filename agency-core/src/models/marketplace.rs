use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::Arc;

use crate::api::{AdminApiClient, MARKETPLACE_PRODUCTS_ENDPOINT};
use crate::catalog::PageId;
use crate::error::FixtureError;
use crate::fixtures;
use crate::models::id_from_any;
use crate::table::{
    CellKind, Entity, EntityDescriptor, FilterOptions, RecordSource, RemoteSource, StaticSource,
};

pub const STOCK_CATEGORIES: &[&str] = &["Electronics", "Stationery", "Luggage", "Apparel"];
pub const STOCK_STATUSES: &[&str] = &["Available", "Low Stock", "Out of Stock"];
pub const PRODUCT_CATEGORIES: &[&str] = &["Courses", "Insurance", "Accommodation", "Accessories"];

/// Warehouse stock kept for the agency shop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockItem {
    pub id: String,
    pub name: String,
    pub sku: String,
    pub category: String,
    pub quantity: u32,
    #[serde(default)]
    pub unit_price: Option<f64>,
    pub status: String,
}

impl Entity for StockItem {
    const PAGE: PageId = PageId::StockItems;

    fn id(&self) -> &str {
        &self.id
    }

    fn descriptor() -> EntityDescriptor<Self> {
        EntityDescriptor::<Self>::new("stock items")
            .text("sku", "SKU", |r| Some(Cow::from(r.sku.as_str())))
            .text("name", "Item", |r| Some(Cow::from(r.name.as_str())))
            .text("category", "Category", |r| Some(Cow::from(r.category.as_str())))
            .column("quantity", "Qty", CellKind::Number, |r| Some(Cow::from(r.quantity.to_string())))
            .column("unit_price", "Unit price", CellKind::Currency, |r| {
                r.unit_price.map(|v| Cow::from(v.to_string()))
            })
            .badge("status", "Status", |r| Some(Cow::from(r.status.as_str())))
            .search("name", |r| Some(r.name.as_str()))
            .search("sku", |r| Some(r.sku.as_str()))
            .filter("category", "Category", FilterOptions::Fixed(STOCK_CATEGORIES), |r| {
                Some(Cow::from(r.category.as_str()))
            })
            .filter("status", "Status", FilterOptions::Fixed(STOCK_STATUSES), |r| {
                Some(Cow::from(r.status.as_str()))
            })
    }

    fn source(_api: &AdminApiClient) -> Result<Arc<dyn RecordSource<Self>>, FixtureError> {
        StaticSource::shared(Self::PAGE.slug(), fixtures::STOCK_ITEMS)
    }
}

/// A product listed on the partner marketplace, served by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketplaceProduct {
    #[serde(deserialize_with = "id_from_any")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl Entity for MarketplaceProduct {
    const PAGE: PageId = PageId::MarketplaceProducts;

    fn id(&self) -> &str {
        &self.id
    }

    fn descriptor() -> EntityDescriptor<Self> {
        EntityDescriptor::<Self>::new("marketplace products")
            .text("name", "Product", |r| Some(Cow::from(r.name.as_str())))
            .text("vendor", "Vendor", |r| r.vendor.as_deref().map(Cow::from))
            .text("category", "Category", |r| r.category.as_deref().map(Cow::from))
            .column("price", "Price", CellKind::Currency, |r| r.price.map(|v| Cow::from(v.to_string())))
            .badge("is_active", "Status", |r| {
                r.is_active.map(|active| Cow::from(if active { "Active" } else { "Inactive" }))
            })
            .search("name", |r| Some(r.name.as_str()))
            .search("vendor", |r| r.vendor.as_deref())
            .filter("category", "Category", FilterOptions::Fixed(PRODUCT_CATEGORIES), |r| {
                r.category.as_deref().map(Cow::from)
            })
    }

    fn source(api: &AdminApiClient) -> Result<Arc<dyn RecordSource<Self>>, FixtureError> {
        RemoteSource::shared(api, MARKETPLACE_PRODUCTS_ENDPOINT)
    }
}
