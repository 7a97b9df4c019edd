//! End-to-end grid behavior through the `Table` facade: the edit
//! lifecycle, keyboard routing, history traversal and host document
//! exchange working together.

use datagrid_lib::controller::CommitOutcome;
use datagrid_lib::controller::Key;
use datagrid_lib::controller::ReorderTarget;
use datagrid_lib::model::CellValue;
use datagrid_lib::model::ColumnDef;
use datagrid_lib::model::ColumnPatch;
use datagrid_lib::model::Direction;
use datagrid_lib::model::types::DateRange;
use datagrid_lib::model::types::LinkValue;
use datagrid_lib::model::types::ProgressValue;
use datagrid_lib::model::types::RichTextRef;
use datagrid_lib::model::RowData;
use datagrid_lib::model::RowPatch;
use datagrid_lib::store::HISTORY_CAP;
use datagrid_lib::validation::ValidationRule;
use datagrid_lib::TableOptions;

fn sample_table() -> datagrid_lib::Table {
    TableOptions::new()
        .columns(vec![
            ColumnDef::new("title", "Title", "text")
                .with_validation(ValidationRule::new().required()),
            ColumnDef::new("count", "Count", "number"),
            ColumnDef::new("done", "Done", "checkbox"),
        ])
        .rows(vec![
            RowData::new("r1").set("title", "first").set("count", 2.0),
            RowData::new("r2").set("title", "second").set("count", 1.0),
        ])
        .build()
}

// =============================================================================
// Edit lifecycle
// =============================================================================

#[test]
fn test_full_edit_cycle_via_keyboard() {
    let mut table = sample_table();
    table.select("r1", "title");
    assert!(table.handle_key(Key::Enter));
    table.update_draft(CellValue::from("renamed"));
    assert!(table.handle_key(Key::Enter));

    assert_eq!(
        table.store().state().row("r1").unwrap().cell("title"),
        &CellValue::from("renamed")
    );
    assert!(table.store().state().editing_cell.is_none());
}

#[test]
fn test_rejected_edit_keeps_value_and_reports_error() {
    let mut table = sample_table();
    table.begin_edit("r1", "title");
    table.update_draft(CellValue::from(""));
    let outcome = table.commit_edit();

    assert!(matches!(outcome, CommitOutcome::Rejected(_)));
    assert_eq!(
        table.store().state().row("r1").unwrap().cell("title"),
        &CellValue::from("first")
    );
    assert!(table.edit().last_error().is_some());

    // A later valid edit clears the retained error.
    table.begin_edit("r1", "title");
    table.update_draft(CellValue::from("ok"));
    assert_eq!(table.commit_edit(), CommitOutcome::Saved);
    assert!(table.edit().last_error().is_none());
}

#[test]
fn test_direct_manipulation_skips_edit_mode() {
    let mut table = sample_table();
    assert!(!table.begin_edit("r1", "done"));
    assert_eq!(
        table.apply_direct("r1", "done", CellValue::Bool(true)),
        CommitOutcome::Saved
    );
    assert_eq!(
        table.store().state().row("r1").unwrap().cell("done"),
        &CellValue::Bool(true)
    );
}

#[test]
fn test_only_one_cell_edits_at_a_time() {
    let mut table = sample_table();
    table.begin_edit("r1", "title");
    table.update_draft(CellValue::from("from blur"));
    table.begin_edit("r2", "title");

    // The first edit committed when the second began.
    assert_eq!(
        table.store().state().row("r1").unwrap().cell("title"),
        &CellValue::from("from blur")
    );
    let editing = table.store().state().editing_cell.clone().unwrap();
    assert_eq!(editing.row_id, "r2");
}

// =============================================================================
// History
// =============================================================================

#[test]
fn test_undo_redo_round_trip_over_mixed_operations() {
    let mut table = sample_table();
    table.apply_direct("r1", "count", CellValue::from(9.0));
    table.add_row(RowPatch::new().id("r3"));
    table.drag_start(ReorderTarget::Column, 0);
    table.drag_over(ReorderTarget::Column, 2);
    table.drag_end();

    let final_order = table.store().state().column_order.clone();
    assert_eq!(final_order, vec!["count", "done", "title"]);

    assert!(table.undo());
    assert!(table.undo());
    assert!(table.undo());
    assert!(table.store().state().row("r3").is_none());
    assert_eq!(
        table.store().state().row("r1").unwrap().cell("count"),
        &CellValue::from(2.0)
    );

    assert!(table.redo());
    assert!(table.redo());
    assert!(table.redo());
    assert!(!table.redo());
    assert!(table.store().state().row("r3").is_some());
    assert_eq!(table.store().state().column_order, final_order);
}

#[test]
fn test_new_edit_truncates_redo_branch() {
    let mut table = sample_table();
    table.apply_direct("r1", "count", CellValue::from(10.0));
    table.apply_direct("r1", "count", CellValue::from(20.0));
    table.undo();
    table.apply_direct("r1", "count", CellValue::from(30.0));

    assert!(!table.redo());
    assert_eq!(
        table.store().state().row("r1").unwrap().cell("count"),
        &CellValue::from(30.0)
    );
}

#[test]
fn test_history_stays_bounded() {
    let mut table = sample_table();
    for i in 0..(HISTORY_CAP + 20) {
        table.apply_direct("r1", "count", CellValue::from(i as f64));
    }
    assert_eq!(table.store().history_len(), HISTORY_CAP);
}

// =============================================================================
// Navigation and reorder
// =============================================================================

#[test]
fn test_selection_follows_identities_across_reorder() {
    let mut table = sample_table();
    table.select("r2", "count");
    table.drag_start(ReorderTarget::Row, 1);
    table.drag_over(ReorderTarget::Row, 0);
    table.drag_end();

    let selected = table.store().state().selected_cell.clone().unwrap();
    assert_eq!(selected.row_id, "r2");
    assert_eq!(table.store().state().rows[0].id, "r2");

    // Navigation continues from the moved position.
    assert!(table.handle_key(Key::Arrow(Direction::Down)));
    let selected = table.store().state().selected_cell.clone().unwrap();
    assert_eq!(selected.row_id, "r1");
}

#[test]
fn test_sort_uses_column_values_and_cycles_off() {
    let mut table = sample_table();
    table.sort_column("count");
    assert_eq!(table.store().state().rows[0].id, "r2");
    table.sort_column("count");
    assert_eq!(table.store().state().rows[0].id, "r1");
    table.sort_column("count");
    assert!(table.store().state().column("count").unwrap().sort.is_none());
}

// =============================================================================
// Host document exchange
// =============================================================================

#[test]
fn test_document_round_trip() {
    let mut table = sample_table();
    table.apply_direct("r1", "count", CellValue::from(7.0));
    let document = table.take_change().unwrap();

    let json = serde_json::to_string(&document).unwrap();
    let restored: datagrid_lib::TableDocument = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, document);
    assert_eq!(restored.rows[0].cell("count"), &CellValue::from(7.0));
}

#[test]
fn test_document_round_trip_structured_values() {
    let mut table = TableOptions::new()
        .columns(vec![
            ColumnDef::new("due", "Due", "date"),
            ColumnDef::new("completion", "Completion", "progress"),
            ColumnDef::new("site", "Site", "link"),
            ColumnDef::new("labels", "Labels", "multiSelect"),
            ColumnDef::new("notes", "Notes", "richText"),
        ])
        .rows(vec![RowData::new("r1")
            .set("due", DateRange::single(1_700_000_000_000))
            .set("completion", ProgressValue::new(30.0, 100.0))
            .set("site", LinkValue::new("https://example.com/", "Example"))
            .set("labels", vec!["a".to_string(), "b".to_string()])
            .set("notes", RichTextRef::new(7).with_title("Notes"))])
        .build();

    let document = table.take_change().unwrap();
    let json = serde_json::to_string(&document).unwrap();
    let restored: datagrid_lib::TableDocument = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, document);

    let row = &restored.rows[0];
    assert!(matches!(row.cell("due"), CellValue::Date(_)));
    assert!(matches!(row.cell("completion"), CellValue::Progress(_)));
    assert!(matches!(row.cell("site"), CellValue::Link(_)));
    assert_eq!(
        row.cell("labels").as_tags(),
        Some(&["a".to_string(), "b".to_string()][..])
    );
    assert!(matches!(row.cell("notes"), CellValue::RichTextRef(_)));
}

#[test]
fn test_sync_external_data_survives_local_widths() {
    let mut table = sample_table();
    table.resize_start("title");
    table.resize_update(333);
    table.resize_end();

    let mut columns: Vec<ColumnDef> = table.store().state().columns.clone();
    columns[0].title = "Title (synced)".to_string();
    let rows = table.store().state().rows.clone();
    table.sync_external_data(columns, rows);

    assert_eq!(
        table.store().state().column("title").unwrap().title,
        "Title (synced)"
    );
    assert_eq!(table.store().state().column_width("title"), 333);
}

#[test]
fn test_structure_changes_flow_into_exports() {
    let mut table = sample_table();
    table.take_change();

    let id = table.add_column(ColumnPatch::new().title("Notes").type_key("text"));
    let document = table.take_change().unwrap();
    assert!(document.columns.iter().any(|c| c.id == id));
    assert!(document.column_order.contains(&id));
    assert!(document.rows.iter().all(|r| r.cells.contains_key(&id)));
}
