use agency_core::fixtures;
use agency_core::models::{Application, Ticket};
use agency_core::table::{paginate, PaginationModel, StaticSource};
use agency_core::{Entity, EntityTable, PageController, SourceKind, TableAction, TableView};
use std::sync::Arc;

fn applications(page_size: usize) -> EntityTable<Application> {
    EntityTable::with_records(fixtures::applications().unwrap(), page_size).unwrap()
}

fn applicants<'a>(rows: impl IntoIterator<Item = &'a Application>) -> Vec<&'a str> {
    rows.into_iter().map(|r| r.applicant.as_str()).collect()
}

#[test]
fn test_search_is_case_insensitive() {
    let mut table = applications(10);
    table.set_search_term("jane");

    assert_eq!(applicants(table.page_rows()), vec!["Jane Smith"]);
    assert_eq!(table.row_count(), 1);

    table.set_search_term("  IMPERIAL ");
    assert_eq!(applicants(table.page_rows()), vec!["Mike Johnson"]);
}

#[test]
fn test_whitespace_search_means_no_search() {
    let mut table = applications(10);
    table.set_search_term("   ");
    assert_eq!(table.row_count(), 3);
}

#[test]
fn test_page_beyond_data_is_empty() {
    let mut table = applications(10);
    assert_eq!(table.page_rows().len(), 3);

    table.on_pagination_model_change(PaginationModel::new(1, 10).unwrap()).unwrap();
    assert!(table.page_rows().is_empty());
    // Total count is unaffected by the window.
    assert_eq!(table.row_count(), 3);
    assert_eq!(table.page_count(), 1);
}

#[test]
fn test_filters_combine_with_and() {
    let mut table = applications(10);
    table.set_filter("status", "Approved").unwrap();
    table.set_filter("priority", "Urgent").unwrap();
    assert_eq!(applicants(table.page_rows()), vec!["Mike Johnson"]);

    table.set_filter("priority", "High").unwrap();
    assert_eq!(table.row_count(), 0);
    assert_eq!(table.view(), TableView::Empty);

    table.set_filter("status", "").unwrap();
    assert_eq!(applicants(table.page_rows()), vec!["Jane Smith"]);
}

#[test]
fn test_search_and_filter_combine() {
    let mut table = applications(10);
    table.set_search_term("university");
    table.set_filter("priority", "Normal").unwrap();
    assert_eq!(applicants(table.page_rows()), vec!["John Doe"]);
}

#[test]
fn test_clear_filters_restores_source_order() {
    let mut table = applications(10);
    table.set_search_term("o");
    table.set_filter("status", "Pending").unwrap();
    table.clear_filters();

    let source: Vec<&str> = table.source().iter().map(Application::id).collect();
    let visible: Vec<&str> = table.filtered().map(Application::id).collect();
    assert_eq!(visible, source);
    assert_eq!(visible, vec!["APP-001", "APP-002", "APP-003"]);
}

#[test]
fn test_search_result_is_subset_and_idempotent() {
    let mut table = EntityTable::<Ticket>::with_records(fixtures::tickets().unwrap(), 10).unwrap();
    table.set_search_term("refund");

    let first: Vec<String> = table.filtered().map(|t| t.id.clone()).collect();
    assert!(!first.is_empty());
    for ticket in table.filtered() {
        let haystack = format!("{} {}", ticket.subject, ticket.requester).to_lowercase();
        assert!(haystack.contains("refund"));
        assert!(table.source().contains(ticket));
    }

    table.set_search_term("refund ");
    table.set_search_term("refund");
    let second: Vec<String> = table.filtered().map(|t| t.id.clone()).collect();
    assert_eq!(first, second);
}

#[test]
fn test_search_on_filtered_records_is_idempotent() {
    let mut table = EntityTable::<Ticket>::with_records(fixtures::tickets().unwrap(), 10).unwrap();
    table.set_search_term("refund");
    let once: Vec<Ticket> = table.filtered().cloned().collect();

    let mut narrowed = EntityTable::<Ticket>::with_records(once.clone(), 10).unwrap();
    narrowed.set_search_term("refund");
    let twice: Vec<&str> = narrowed.filtered().map(Ticket::id).collect();

    assert_eq!(twice, once.iter().map(Ticket::id).collect::<Vec<_>>());
}

#[test]
fn test_filter_on_filtered_records_is_idempotent() {
    let mut table = EntityTable::<Ticket>::with_records(fixtures::tickets().unwrap(), 10).unwrap();
    table.set_filter("status", "Open").unwrap();
    let once: Vec<Ticket> = table.filtered().cloned().collect();
    assert!(!once.is_empty());

    let mut narrowed = EntityTable::<Ticket>::with_records(once.clone(), 10).unwrap();
    narrowed.set_filter("status", "Open").unwrap();
    let twice: Vec<&str> = narrowed.filtered().map(Ticket::id).collect();

    assert_eq!(twice, once.iter().map(Ticket::id).collect::<Vec<_>>());
}

#[test]
fn test_pages_reassemble_filtered_list() {
    let mut table = EntityTable::<Ticket>::with_records(fixtures::tickets().unwrap(), 2).unwrap();
    let filtered: Vec<String> = table.filtered().map(|t| t.id.clone()).collect();

    let mut reassembled = Vec::new();
    for page in 0..table.page_count() {
        table.on_pagination_model_change(PaginationModel::new(page, 2).unwrap()).unwrap();
        let rows = table.page_rows();
        let remaining = filtered.len() - page * 2;
        assert_eq!(rows.len(), remaining.min(2));
        reassembled.extend(rows.into_iter().map(|t| t.id.clone()));
    }
    assert_eq!(reassembled, filtered);
}

#[test]
fn test_paginate_slices_plain_lists() {
    let items: Vec<u32> = (0..7).collect();
    let page = paginate(&items, &PaginationModel::new(1, 3).unwrap());
    assert_eq!(page, &[3, 4, 5]);
    let tail = paginate(&items, &PaginationModel::new(2, 3).unwrap());
    assert_eq!(tail, &[6]);
}

#[tokio::test]
async fn test_static_page_controller_loads_on_first_update() {
    let source = Arc::new(StaticSource::new(fixtures::applications().unwrap()));
    let mut controller = PageController::<Application>::new(source, 10).unwrap();
    assert_eq!(controller.source_kind(), SourceKind::Static);
    assert_eq!(controller.table().view(), TableView::Empty);

    controller.update().await;
    assert_eq!(controller.table().view(), TableView::Populated);
    assert_eq!(controller.table().row_count(), 3);
}

#[tokio::test]
async fn test_controller_processes_actions_in_order() {
    let api = agency_core::AdminApiClient::with_base_url("http://localhost:9");
    let source = Application::source(&api).unwrap();
    let mut controller = PageController::<Application>::new(source, 10).unwrap();

    controller.dispatch(TableAction::SetFilter {
        dimension: "status".to_string(),
        value: "Approved".to_string(),
    });
    controller.dispatch(TableAction::SetSearch("mike".to_string()));
    controller.dispatch(TableAction::SetFilter {
        dimension: "region".to_string(),
        value: "EU".to_string(),
    });
    controller.run_pending().await;

    assert!(!controller.has_pending_actions());
    assert_eq!(applicants(controller.table().page_rows()), vec!["Mike Johnson"]);
    assert!(controller.last_error().is_some());
}
