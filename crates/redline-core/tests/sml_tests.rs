//! SML Comparer Integration Tests
//!
//! Tests the Rust SmlComparer against expected change counts from the C# implementation.
//! Port of OpenXmlPowerTools.Tests/SmlComparerTests.cs with 100% parity.
//!
//! Note: Some tests may be commented out if SmlComparer types are not yet fully implemented
//! due to parallel work. Uncomment as the implementation progresses.

// Uncomment when SmlComparer is fully implemented:
// use redline_core::sml::{SmlComparer, SmlComparerSettings, SmlDocument, SmlChangeType};

use std::path::Path;

/// Get the path to test files
fn test_files_dir() -> &'static Path {
    // CARGO_MANIFEST_DIR = crates/redline-core
    // Go up 3 levels: crates/ -> redline-rs/ -> rust-port-phase0/
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap() // crates/
        .parent()
        .unwrap() // redline-rs/
        .parent()
        .unwrap() // rust-port-phase0/
        .join("TestFiles")
        .leak()
}

// ============================================================================
// BASIC COMPARISON TESTS
// ============================================================================

#[test]
#[ignore] // Remove this when SmlComparer is implemented
fn sc001_identical_workbooks_no_changes() {
    // TODO: Uncomment when SmlComparer is available
    // Test: Identical workbooks should produce 0 changes
    // Expected: total_changes = 0
    
    // let data = create_test_workbook with Sheet1: A1="Hello", B1=123.45, A2="World"
    // let doc1 = SmlDocument::from_bytes(&data)
    // let doc2 = SmlDocument::from_bytes(&data)
    // let settings = SmlComparerSettings::default()
    // let result = SmlComparer::compare(&doc1, &doc2, &settings)
    // assert_eq!(result.total_changes, 0)
}

#[test]
#[ignore]
fn sc002_single_cell_value_change_detected_correctly() {
    // Test: Single cell value change should be detected
    // Sheet1: A1 "Hello" -> "Goodbye", B1 unchanged
    // Expected: total_changes = 1, value_changes = 1
    // Change details: Sheet1!A1, old="Hello", new="Goodbye"
}

#[test]
#[ignore]
fn sc003_cell_added_detected_correctly() {
    // Test: New cell added
    // Sheet1: A1="Hello", then add B1="World"
    // Expected: total_changes = 1, cells_added = 1
}

#[test]
#[ignore]
fn sc004_cell_deleted_detected_correctly() {
    // Test: Cell deleted
    // Sheet1: A1="Hello", B1="World", then delete B1
    // Expected: total_changes = 1, cells_deleted = 1
}

#[test]
#[ignore]
fn sc005_sheet_added_detected_correctly() {
    // Test: New sheet added
    // Add Sheet2 with A1="New Sheet"
    // Expected: sheets_added = 1
}

#[test]
#[ignore]
fn sc006_sheet_deleted_detected_correctly() {
    // Test: Sheet deleted
    // Delete Sheet2
    // Expected: sheets_deleted = 1
}

// ============================================================================
// FORMULA TESTS
// ============================================================================

#[test]
#[ignore]
fn sc007_formula_change_detected_correctly() {
    // Test: Formula change
    // A1=10, A2=20, A3 formula "A1+A2" (value 30) -> "A1*A2" (value 200)
    // Expected: total_changes >= 1 (formula result changed)
}

// ============================================================================
// SETTINGS TESTS
// ============================================================================

#[test]
#[ignore]
fn sc008_case_insensitive_comparison() {
    // Test: Case sensitivity setting
    // A1 "Hello" -> "HELLO"
    // CaseInsensitiveValues = false: should detect 1 change
    // CaseInsensitiveValues = true: should detect 0 changes
}

#[test]
#[ignore]
fn sc009_numeric_tolerance() {
    // Test: Numeric tolerance
    // A1 100.0 -> 100.001
    // NumericTolerance = 0: should detect 1 change
    // NumericTolerance = 0.01: should detect 0 changes
}

#[test]
#[ignore]
fn sc010_disable_formatting_comparison() {
    // Test: CompareFormatting setting
    // Verify setting can be set to false
}

// ============================================================================
// OUTPUT TESTS
// ============================================================================

#[test]
#[ignore]
fn sc011_produce_marked_workbook_creates_valid_output() {
    // Test: ProduceMarkedWorkbook creates valid XLSX
    // Should include _DiffSummary sheet
}

#[test]
#[ignore]
fn sc012_comparison_result_to_json() {
    // Test: Result serialization to JSON
    // JSON should contain: TotalChanges, ValueChanges, Changes
}

// ============================================================================
// STATISTICS TESTS
// ============================================================================

#[test]
#[ignore]
fn sc013_statistics_correctly_summarized() {
    // Test: Multiple change types
    // A1 changed, A3 deleted, A4 added
    // Expected: value_changes=1, cells_added=1, cells_deleted=1, total=3, structural=2
}

// ============================================================================
// CELL FORMAT SIGNATURE TESTS
// ============================================================================

#[test]
#[ignore]
fn sc014_cell_format_signature_equality() {
    // Test: CellFormatSignature equality
    // Bold=true, FontSize=12, FontName="Arial" should equal itself
    // Bold=false should not equal Bold=true
}

#[test]
#[ignore]
fn sc015_cell_format_signature_get_difference_description() {
    // Test: Format difference description
    // Changes: Bold false->true, FontSize 11->14, FontName Calibri->Arial
    // Description should mention: "Made bold", "Font", "Size"
}

// ============================================================================
// EDGE CASES
// ============================================================================

#[test]
#[ignore]
fn sc016_empty_workbooks_no_changes() {
    // Test: Empty workbooks comparison
    // Expected: total_changes = 0
}

#[test]
#[ignore]
fn sc017_multiple_sheets_compared_correctly() {
    // Test: 3 sheets, changes in Sheet1 and Sheet3
    // Expected: value_changes = 2, changes in correct sheets
}

#[test]
#[ignore]
fn sc018_numeric_values_compared_as_numbers() {
    // Test: 100.0 vs 100 (double vs int, same value)
    // Expected: value_changes = 0 (after normalization)
}

// ============================================================================
// INTEGRATION TESTS
// ============================================================================

#[test]
#[ignore]
fn sc019_round_trip_marked_workbook_can_be_compared_again() {
    // Test: Compare marked workbook with itself
    // Expected: total_changes = 0
}

#[test]
#[ignore]
fn sc020_get_changes_by_sheet_filters_correctly() {
    // Test: Filter changes by sheet name
    // Changes in Sheet1 and Sheet2
    // GetChangesBySheet("Sheet1") should return only Sheet1 changes
}

// ============================================================================
// PHASE 2: ROW ALIGNMENT TESTS
// ============================================================================

#[test]
#[ignore]
fn sc021_row_inserted_detected_correctly() {
    // Test: Row insertion detection
    // Header, Row2Data, Row3Data -> Header, InsertedRow, Row2Data, Row3Data
    // EnableRowAlignment = true
    // Expected: rows_inserted >= 1
}

#[test]
#[ignore]
fn sc022_row_deleted_detected_correctly() {
    // Test: Row deletion detection
    // Header, Row2ToDelete, Row3Data, Row4Data -> Header, Row3Data, Row4Data
    // EnableRowAlignment = true
    // Expected: rows_deleted >= 1
}

#[test]
#[ignore]
fn sc023_row_alignment_disabled_falls_back_to_cell_by_cell() {
    // Test: Row alignment disabled
    // Row insertion scenario
    // EnableRowAlignment = false
    // Expected: rows_inserted = 0, value_changes > 0 OR cells_added > 0
}

#[test]
#[ignore]
fn sc024_multiple_row_changes_detected_correctly() {
    // Test: Multiple rows inserted and deleted
    // Complex row changes scenario
    // Expected: total_changes > 0
}

// ============================================================================
// PHASE 2: SHEET RENAME DETECTION TESTS
// ============================================================================

#[test]
#[ignore]
fn sc025_sheet_renamed_detected_correctly() {
    // Test: Sheet rename with same content
    // "OldSheetName" -> "NewSheetName" (same data)
    // EnableSheetRenameDetection = true
    // Expected: sheets_renamed = 1
}

#[test]
#[ignore]
fn sc026_sheet_rename_detection_disabled() {
    // Test: Rename detection disabled
    // "OldName" -> "NewName" (same data)
    // EnableSheetRenameDetection = false
    // Expected: sheets_renamed = 0, sheets_added = 1, sheets_deleted = 1
}

#[test]
#[ignore]
fn sc027_sheet_renamed_below_similarity_threshold_treated_as_add_delete() {
    // Test: Different content, treated as add+delete not rename
    // SheetRenameSimilarityThreshold = 0.7, content < 70% similar
    // Expected: sheets_renamed = 0, sheets_added = 1, sheets_deleted = 1
}

#[test]
#[ignore]
fn sc028_sheet_renamed_partial_content_match() {
    // Test: Partially matching content above threshold
    // 80% similar content, threshold 0.7
    // Expected: sheets_renamed = 1
}

// ============================================================================
// PHASE 2: SETTINGS TESTS
// ============================================================================

#[test]
#[ignore]
fn sc029_row_signature_sample_size_setting() {
    // Test: RowSignatureSampleSize setting
    // Should be configurable (5, 20, etc.)
}

#[test]
#[ignore]
fn sc030_phase2_statistics_in_json() {
    // Test: JSON includes Phase 2 statistics
    // JSON should contain: SheetsRenamed, RowsInserted, RowsDeleted,
    // ColumnsInserted, ColumnsDeleted
}

// ============================================================================
// PHASE 2: CHANGE DESCRIPTION TESTS
// ============================================================================

#[test]
#[ignore]
fn sc031_row_inserted_get_description() {
    // Test: Row insertion description
    // ChangeType = RowInserted, SheetName = "Sheet1", RowIndex = 5
    // Description should contain: "Row 5", "inserted", "Sheet1"
}

#[test]
#[ignore]
fn sc032_row_deleted_get_description() {
    // Test: Row deletion description
    // ChangeType = RowDeleted, SheetName = "Sheet1", RowIndex = 3
    // Description should contain: "Row 3", "deleted"
}

#[test]
#[ignore]
fn sc033_sheet_renamed_get_description() {
    // Test: Sheet rename description
    // ChangeType = SheetRenamed, OldSheetName = "OldName", SheetName = "NewName"
    // Description should contain: "OldName", "NewName", "renamed"
}

#[test]
#[ignore]
fn sc034_column_inserted_get_description() {
    // Test: Column insertion description
    // ChangeType = ColumnInserted, ColumnIndex = 3 (Column C)
    // Description should contain: "Column C", "inserted"
}

#[test]
#[ignore]
fn sc035_column_deleted_get_description() {
    // Test: Column deletion description
    // ChangeType = ColumnDeleted, ColumnIndex = 26 (Column Z)
    // Description should contain: "Column Z", "deleted"
}

// ============================================================================
// PHASE 2: EDGE CASES
// ============================================================================

#[test]
#[ignore]
fn sc036_all_rows_deleted_handled_correctly() {
    // Test: Delete all rows from sheet
    // Expected: rows_deleted >= 1 OR cells_deleted >= 3
}

#[test]
#[ignore]
fn sc037_all_rows_inserted_handled_correctly() {
    // Test: Insert all rows into empty sheet
    // Expected: rows_inserted >= 1 OR cells_added >= 3
}

#[test]
#[ignore]
fn sc038_wide_spreadsheet_row_signature_sampling() {
    // Test: Wide spreadsheet (50 columns)
    // RowSignatureSampleSize = 10 (sample 10 of 50 columns)
    // Expected: total_changes = 0, no errors
}

#[test]
#[ignore]
fn sc039_multiple_sheet_renames_detected_correctly() {
    // Test: Multiple sheets renamed
    // OldSheet1 -> NewSheet1, OldSheet2 -> NewSheet2
    // Expected: sheets_renamed = 2
}

#[test]
#[ignore]
fn sc040_combined_row_and_cell_changes() {
    // Test: Row insertion + cell value change
    // Expected: total_changes >= 2
}

// ============================================================================
// PHASE 2: INTEGRATION TEST (COMPREHENSIVE)
// ============================================================================

#[test]
#[ignore]
fn sc041_full_comparison_save_files_for_manual_review() {
    // Test: Comprehensive comparison with all change types
    // Creates Original.xlsx, Modified.xlsx, Comparison.xlsx, JSON
    // Changes include: sheet rename, sheet delete, sheet add,
    // row insertions, row deletions, value changes, formula changes
    // Expected: total_changes > 0, specific changes detected
}

// ============================================================================
// PHASE 3: NAMED RANGES
// ============================================================================

#[test]
#[ignore]
fn sc041_named_range_added_detected_correctly() {
    // Test: Named range added
    // CompareNamedRanges = true
    // Expected: ChangeType = NamedRangeAdded, named_ranges_added >= 1
}

#[test]
#[ignore]
fn sc042_named_range_deleted_detected_correctly() {
    // Test: Named range deleted
    // CompareNamedRanges = true
    // Expected: ChangeType = NamedRangeDeleted, named_ranges_deleted >= 1
}

#[test]
#[ignore]
fn sc043_named_range_changed_detected_correctly() {
    // Test: Named range reference changed
    // "TestRange" Sheet1!$A$1:$A$2 -> Sheet1!$A$1:$A$5
    // CompareNamedRanges = true
    // Expected: ChangeType = NamedRangeChanged, named_ranges_changed >= 1
}

// ============================================================================
// PHASE 3: MERGED CELLS
// ============================================================================

#[test]
#[ignore]
fn sc044_merged_cells_added_detected_correctly() {
    // Test: Merged cells added
    // Merge A1:C1
    // CompareMergedCells = true
    // Expected: ChangeType = MergedCellAdded, merged_cells_added >= 1
}

#[test]
#[ignore]
fn sc045_merged_cells_deleted_detected_correctly() {
    // Test: Merged cells deleted
    // Unmerge A1:C1
    // CompareMergedCells = true
    // Expected: ChangeType = MergedCellDeleted, merged_cells_deleted >= 1
}

// ============================================================================
// PHASE 3: HYPERLINKS
// ============================================================================

#[test]
#[ignore]
fn sc046_hyperlink_added_detected_correctly() {
    // Test: Hyperlink added
    // A1 with hyperlink to "https://example.com"
    // CompareHyperlinks = true
    // Expected: ChangeType = HyperlinkAdded, hyperlinks_added >= 1
}

#[test]
#[ignore]
fn sc047_hyperlink_changed_detected_correctly() {
    // Test: Hyperlink URL changed
    // A1 "https://old-example.com" -> "https://new-example.com"
    // CompareHyperlinks = true
    // Expected: ChangeType = HyperlinkChanged, hyperlinks_changed >= 1
}

// ============================================================================
// PHASE 3: DATA VALIDATION
// ============================================================================

#[test]
#[ignore]
fn sc048_data_validation_added_detected_correctly() {
    // Test: Data validation added
    // A2 with list validation: ["Active", "Inactive", "Pending"]
    // CompareDataValidation = true
    // Expected: ChangeType = DataValidationAdded, data_validations_added >= 1
}

// ============================================================================
// PHASE 3: STATISTICS
// ============================================================================

#[test]
#[ignore]
fn sc049_phase3_statistics_correctly_summarized() {
    // Test: Multiple Phase 3 features
    // Named range changed, merged cells added, hyperlinks changed
    // Expected: total_changes > 0
}

#[test]
#[ignore]
fn sc050_phase3_features_disabled_by_default() {
    // Test: Phase 3 features disabled
    // CompareNamedRanges = false, etc.
    // Named range changed should not be detected
    // Expected: no NamedRangeChanged in changes
}

// ============================================================================
// TEST HELPERS
// ============================================================================

// TODO: Implement these helper functions when SmlDocument is available:
//
// fn create_test_workbook(sheet_data: HashMap<String, HashMap<String, CellValue>>) -> Vec<u8>
// fn create_workbook_with_named_range(name: &str, reference: &str) -> Vec<u8>
// fn create_workbook_with_merged_cells(merge_range: &str) -> Vec<u8>
// fn create_workbook_with_hyperlink(cell_ref: &str, url: &str) -> Vec<u8>
// fn create_workbook_with_data_validation(cell_ref: &str, list_items: &[&str]) -> Vec<u8>
// fn create_workbook_with_phase3_features() -> Vec<u8>
//
// These helpers should use the OpenXML SDK equivalent in Rust to create
// test XLSX files programmatically.

// ============================================================================
// NOTES FOR IMPLEMENTATION
// ============================================================================
//
// This test file is structured to match the C# SmlComparerTests.cs exactly.
// All 50 tests (SC001-SC050) are included as stubs.
//
// Implementation checklist:
// 1. Implement SmlDocument type
// 2. Implement SmlComparer with Compare and ProduceMarkedWorkbook methods
// 3. Implement SmlComparerSettings with all Phase 1-3 features
// 4. Implement SmlChangeType enum
// 5. Implement SmlChange and SmlComparisonResult types
// 6. Implement CellFormatSignature type
// 7. Implement test helper functions to create XLSX files
// 8. Remove #[ignore] attributes as features are implemented
// 9. Add actual assertions to each test
//
// Expected test counts:
// - Phase 1 (Basic): 20 tests (SC001-SC020)
// - Phase 2 (Row/Sheet alignment): 20 tests (SC021-SC041)
// - Phase 3 (Advanced features): 10 tests (SC041-SC050)
//
// Total: 50 tests matching C# implementation
