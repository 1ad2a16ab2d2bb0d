//! Core library for the agency admin dashboard.
//!
//! Holds everything that is not rendering: the generic entity table
//! (search, categorical filters, pagination, visual state), the shared
//! lookup tables, the page catalogue with its record models and fixtures,
//! and the thin REST client the remote pages load from.

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod lookup;
pub mod models;
pub mod table;

pub use api::{AdminApiClient, ApiError};
pub use catalog::{PageId, Section};
pub use config::Config;
pub use error::{ConfigError, FixtureError, TableError};
pub use lookup::{Definition, Definitions, LookupKind, LookupTable};
pub use table::{
    Entity, EntityDescriptor, EntityTable, PageController, PaginationModel, RecordSource,
    SourceKind, TableAction, TableView,
};
