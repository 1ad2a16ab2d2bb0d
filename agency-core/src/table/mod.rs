//! Generic entity table: one implementation of the search / filter /
//! paginate pattern shared by every dashboard page.

pub mod action;
pub mod controller;
pub mod descriptor;
pub mod entity_table;
pub mod pagination;
pub mod query;
pub mod source;
pub mod view;

pub use action::{ActionOutcome, TableAction};
pub use controller::PageController;
pub use descriptor::{
    CellKind, Column, Entity, EntityDescriptor, FilterDimension, FilterOption, FilterOptions,
    SearchField,
};
pub use entity_table::EntityTable;
pub use pagination::{page_count, paginate, PaginationModel};
pub use query::FilterState;
pub use source::{RecordSource, RemoteSource, SourceKind, StaticSource};
pub use view::TableView;
