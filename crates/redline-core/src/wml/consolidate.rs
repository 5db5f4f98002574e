// consolidate.rs

use crate::error::Result;
use crate::wml::settings::{
    WmlComparerConsolidateSettings, WmlComparerSettings, WmlRevisedDocumentInfo,
};

/// Internal struct to track consolidation information for each revision.
#[derive(Debug, Clone)]
#[allow(dead_code)]
struct ConsolidationInfo {
    /// Name of the revisor.
    pub revisor: String,

    /// Color associated with this revision (RGB).
    pub color: (u8, u8, u8),

    /// The revision element (XML).
    pub revision_element: String, // Placeholder for XML element

    /// Whether to insert before the anchor element.
    pub insert_before: bool,

    /// SHA1 hash of the revision for deduplication.
    pub revision_hash: Option<String>,

    /// Footnote elements associated with this revision.
    pub footnotes: Vec<String>, // Placeholder for XML elements

    /// Endnote elements associated with this revision.
    pub endnotes: Vec<String>, // Placeholder for XML elements

    /// String representation of revision (for debugging).
    pub revision_string: Option<String>,
}

impl Default for ConsolidationInfo {
    fn default() -> Self {
        Self {
            revisor: String::new(),
            color: (0, 0, 0),
            revision_element: String::new(),
            insert_before: false,
            revision_hash: None,
            footnotes: Vec::new(),
            endnotes: Vec::new(),
            revision_string: None,
        }
    }
}

/// Consolidate multiple revised documents into a single document with tracked revisions.
///
/// This is the primary entry point for consolidation. It compares each revised document
/// against the original and merges all revisions into a single consolidated document.
///
/// # Arguments
/// * `original` - The original document bytes
/// * `revised_document_info_list` - List of revised documents with revisor names and colors
/// * `settings` - Comparison settings
///
/// # Returns
/// The consolidated document bytes with all revisions merged
pub fn consolidate(
    original: &[u8],
    revised_document_info_list: &[WmlRevisedDocumentInfo],
    settings: &WmlComparerSettings,
) -> Result<Vec<u8>> {
    let consolidate_settings = WmlComparerConsolidateSettings::default();
    consolidate_with_settings(
        original,
        revised_document_info_list,
        settings,
        &consolidate_settings,
    )
}

/// Consolidate with explicit consolidate settings.
///
/// # Arguments
/// * `original` - The original document bytes
/// * `revised_document_info_list` - List of revised documents with revisor names and colors
/// * `settings` - Comparison settings
/// * `consolidate_settings` - Settings for how to consolidate (e.g., use tables)
///
/// # Returns
/// The consolidated document bytes with all revisions merged
pub fn consolidate_with_settings(
    _original: &[u8],
    _revised_document_info_list: &[WmlRevisedDocumentInfo],
    _settings: &WmlComparerSettings,
    _consolidate_settings: &WmlComparerConsolidateSettings,
) -> Result<Vec<u8>> {
    // This is a complex function that requires:
    // 1. PreProcessMarkup - adds unids to all elements
    // 2. CompareInternal - compares two documents
    // 3. XML document manipulation (open WordprocessingDocument)
    // 4. AddToAnnotation - attaches consolidation info to elements
    // 5. AssembledConjoinedRevisionContent - creates table with revisions
    // 6. MoveFootnotesEndnotesForConsolidatedRevisions - handles footnotes/endnotes
    // 7. Various fix-up methods (FixUpRevisionIds, FixUpDocPrIds, etc.)
    //
    //
    // Step 1: Pre-process original document to add unids (lines 1051-1060)
    // settings.StartingIdForFootnotesEndnotes = 3000;
    // var originalWithUnids = PreProcessMarkup(original, settings.StartingIdForFootnotesEndnotes);
    // WmlDocument consolidated = new WmlDocument(originalWithUnids);
    //
    // Step 2: Open consolidated document and extract main body (lines 1064-1070)
    // using (MemoryStream consolidatedMs = new MemoryStream())
    // using (WordprocessingDocument consolidatedWDoc = WordprocessingDocument.Open(consolidatedMs, true))
    // var consolidatedMainDocPart = consolidatedWDoc.MainDocumentPart;
    // var consolidatedMainDocPartXDoc = consolidatedMainDocPart.GetXDocument();
    //
    // Step 3: Save and remove sectPr (lines 1072-1082)
    // XElement savedSectPr = consolidatedMainDocPartXDoc.Root.Element(W.body).Elements(W.sectPr).LastOrDefault();
    // consolidatedMainDocPartXDoc.Root.Element(W.body).Elements(W.sectPr).Remove();
    //
    // Step 4: Build dictionary of elements by unid (lines 1084-1087)
    // var consolidatedByUnid = consolidatedMainDocPartXDoc.Descendants()
    //     .Where(d => (d.Name == W.p || d.Name == W.tbl) && d.Attribute(PtOpenXml.Unid) != null)
    //     .ToDictionary(d => (string)d.Attribute(PtOpenXml.Unid));
    //
    // Step 5: For each revised document (lines 1089-1238)
    //   a. Compare original with revised to create delta
    //   b. Extract block-level content with revisions
    //   c. For each revision block:
    //      - Find insertion point by looking up unid
    //      - If not found, walk backwards to find anchor
    //      - Create ConsolidationInfo and attach as annotation
    //      - Handle footnotes and endnotes
    //
    // Step 6: Process all annotations (lines 1242-1341)
    //   a. Find all elements with ConsolidationInfo annotations
    //   b. Group adjacent revisions by revisor+color
    //   c. Check if all revisors made identical changes (hash comparison)
    //   d. If identical, replace element with single revision
    //   e. Otherwise, create table(s) with individual revisions
    //
    // Step 7: Restore sectPr and fix up document (lines 1434-1450)
    //   - Add back saved sectPr
    //   - Fix revision IDs
    //   - Fix DocPr, Shape, Group IDs
    //   - Remove PowerTools markup
    //   - Add styles for revision tables
    //
    // Step 8: Return consolidated document (lines 1452-1455)
    // var newConsolidatedDocument = new WmlDocument("consolidated.docx", consolidatedMs.ToArray());
    // return newConsolidatedDocument;

    Err(crate::error::RedlineError::UnsupportedFeature {
        feature: "Consolidate implementation requires full OpenXML document handling".to_string(),
    })
}

/// Add consolidation info to an element as an annotation.
///
/// This method:
/// 1. Moves related parts (images, etc.) from delta to consolidated document
/// 2. Clones and hashes the revision element for deduplication
/// 3. Adds ConsolidationInfo to element's annotation list
#[allow(dead_code)]
fn add_to_annotation(
    _consolidation_info: &mut ConsolidationInfo,
    _element_to_insert_after: &str, // Placeholder for XElement
    _settings: &WmlComparerSettings,
) -> Result<()> {
    // 1. Move related parts using MoveRelatedPartsToDestination
    // 2. Clone element for hashing: CloneBlockLevelContentForHashing
    // 3. Remove w:ins and w:del id attributes
    // 4. Generate SHA1 hash of string representation
    // 5. Get or create annotation list on element
    // 6. Add consolidation info to list

    Err(crate::error::RedlineError::UnsupportedFeature {
        feature: "add_to_annotation requires XML element manipulation".to_string(),
    })
}

/// Move footnotes and endnotes for consolidated revisions.
///
/// When multiple revisors make identical changes, their revisions are consolidated into one.
/// This function handles the footnote/endnote references in the consolidated revision.
#[allow(dead_code)]
fn move_footnotes_endnotes_for_consolidated_revisions(_ci: &ConsolidationInfo) -> Result<()> {
    // 1. Get max footnote/endnote IDs from consolidated document
    // 2. For each footnote reference in revision element:
    //    - Find corresponding footnote in ci.Footnotes
    //    - Assign new ID (maxFootnoteId + 1)
    //    - Clone footnote with new ID
    //    - Add to consolidated document
    // 3. Same process for endnotes

    Err(crate::error::RedlineError::UnsupportedFeature {
        feature: "move_footnotes_endnotes_for_consolidated_revisions requires XML manipulation"
            .to_string(),
    })
}

/// Assemble conjoined revision content into table structure.
///
/// This creates the visual representation of revisions, either:
/// - As a table with colored background (if consolidate_with_table = true)
/// - As raw paragraph/table elements (if consolidate_with_table = false)
#[allow(dead_code)]
fn assembled_conjoined_revision_content(
    _empty_paragraph: &str, // Placeholder for XElement
    _grouped_ci: &[ConsolidationInfo],
    _idx: usize,
    _consolidate_settings: &WmlComparerConsolidateSettings,
) -> Result<Vec<String>> {
    //
    // 1. Get max footnote/endnote IDs (lines 1590-1598)
    // 2. Extract revisor name from first ConsolidationInfo (line 1600)
    // 3. Create caption paragraph with revisor name (lines 1602-1612)
    // 4. Convert color to hex string (lines 1614-1617)
    //
    // If consolidate_with_table (lines 1619-1738):
    //   - Create table with single cell
    //   - Set table style and background color
    //   - Add caption paragraph
    //   - For each ConsolidationInfo:
    //     * Handle footnote/endnote references (renumber and copy)
    //     * Add revision element to table cell
    //   - Return [emptyParagraph, table, emptyParagraph]
    //
    // Else (lines 1740-1802):
    //   - For each ConsolidationInfo:
    //     * Handle footnote/endnote references
    //     * Return revision elements directly
    //   - Return array of revision elements
    //
    // Both paths:
    //   - Set author attribute on all revision elements to revisor name

    Err(crate::error::RedlineError::UnsupportedFeature {
        feature: "assembled_conjoined_revision_content requires XML manipulation".to_string(),
    })
}

/// Check if content contains footnote/endnote references with revisions.
///
#[allow(dead_code)]
fn content_contains_footnote_endnote_references_that_have_revisions(
    _element: &str, // Placeholder for XElement
) -> Result<bool> {
    // 1. Find all w:footnoteReference elements
    // 2. For each reference, look up footnote in FootnotesPart
    // 3. Check if footnote contains w:ins or w:del
    // 4. Same for w:endnoteReference / EndnotesPart
    // 5. Return true if any footnote/endnote has revisions

    Err(crate::error::RedlineError::UnsupportedFeature {
        feature:
            "content_contains_footnote_endnote_references_that_have_revisions requires XML access"
                .to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consolidation_info_default() {
        let ci = ConsolidationInfo::default();
        assert_eq!(ci.revisor, "");
        assert_eq!(ci.color, (0, 0, 0));
        assert!(!ci.insert_before);
        assert!(ci.revision_hash.is_none());
    }

    #[test]
    fn consolidate_not_implemented() {
        let original = vec![];
        let revised = vec![];
        let settings = WmlComparerSettings::default();

        let result = consolidate(&original, &revised, &settings);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("requires full OpenXML document handling"));
    }
}
