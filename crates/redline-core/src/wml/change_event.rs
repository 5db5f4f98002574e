//! ChangeEvent - Explicit change event model for WmlComparer
//!
//! This module provides an explicit event model for document comparison results.
//! Instead of just marking atoms with correlation status, we emit discrete events
//! that can be counted, grouped, and processed downstream.
//!
//! ## Event Types
//! - Insert: Content added in source2
//! - Delete: Content removed from source1
//! - FormatChange: Content identical but formatting differs (w:rPrChange)
//!
//! ## Usage
//! After LCS correlation, call `emit_change_events` to convert correlated atoms
//! into a stream of ChangeEvents that can be counted and grouped.

use super::comparison_unit::{ComparisonCorrelationStatus, ComparisonUnitAtom};
use super::settings::WmlComparerSettings;

/// Represents a discrete change event in the document comparison.
///
/// Unlike ComparisonCorrelationStatus which marks individual atoms,
/// ChangeEvent represents a logical change that may span multiple atoms.
#[derive(Debug, Clone)]
pub enum ChangeEvent {
    /// Content inserted in source2 (not present in source1)
    Insert {
        /// Atoms that were inserted
        atoms: Vec<ComparisonUnitAtom>,
        /// Author of the change (from settings)
        author: String,
        /// Date/time of the change
        date: String,
        /// Paragraph index where change occurred
        paragraph_index: Option<usize>,
    },
    
    /// Content deleted from source1 (not present in source2)
    Delete {
        /// Atoms that were deleted
        atoms: Vec<ComparisonUnitAtom>,
        /// Author of the change
        author: String,
        /// Date/time of the change
        date: String,
        /// Paragraph index where change occurred
        paragraph_index: Option<usize>,
    },
    
    /// Content replaced (delete + insert at same logical location)
    Replace {
        /// Atoms from source1 (deleted)
        old_atoms: Vec<ComparisonUnitAtom>,
        /// Atoms from source2 (inserted)
        new_atoms: Vec<ComparisonUnitAtom>,
        /// Author of the change
        author: String,
        /// Date/time of the change
        date: String,
        /// Paragraph index where change occurred
        paragraph_index: Option<usize>,
    },
    
    /// Formatting changed without content change (w:rPrChange)
    FormatChange {
        /// The atom with changed formatting
        atom: ComparisonUnitAtom,
        /// Run properties before the change (serialized rPr)
        before_rpr: Option<String>,
        /// Run properties after the change (serialized rPr)
        after_rpr: Option<String>,
        /// Author of the change
        author: String,
        /// Date/time of the change
        date: String,
    },
}

impl ChangeEvent {
    /// Get the author of this change event
    pub fn author(&self) -> &str {
        match self {
            ChangeEvent::Insert { author, .. } => author,
            ChangeEvent::Delete { author, .. } => author,
            ChangeEvent::Replace { author, .. } => author,
            ChangeEvent::FormatChange { author, .. } => author,
        }
    }
    
    /// Get the date of this change event
    pub fn date(&self) -> &str {
        match self {
            ChangeEvent::Insert { date, .. } => date,
            ChangeEvent::Delete { date, .. } => date,
            ChangeEvent::Replace { date, .. } => date,
            ChangeEvent::FormatChange { date, .. } => date,
        }
    }
    
    /// Get the event type as a string for grouping
    pub fn event_type(&self) -> &'static str {
        match self {
            ChangeEvent::Insert { .. } => "Insert",
            ChangeEvent::Delete { .. } => "Delete",
            ChangeEvent::Replace { .. } => "Replace",
            ChangeEvent::FormatChange { .. } => "FormatChange",
        }
    }
    
    /// Get a grouping key for adjacent event consolidation
    /// Events with the same key should be consolidated into one revision
    pub fn grouping_key(&self) -> String {
        format!("{}|{}|{}", self.event_type(), self.author(), self.date())
    }
}

/// Result of emitting change events from correlated atoms
#[derive(Debug, Clone, Default)]
pub struct ChangeEventResult {
    /// All change events emitted
    pub events: Vec<ChangeEvent>,
    /// Number of insert events
    pub insert_count: usize,
    /// Number of delete events  
    pub delete_count: usize,
    /// Number of format change events
    pub format_change_count: usize,
}

impl ChangeEventResult {
    /// Get total revision count (after grouping adjacent same-type events)
    pub fn revision_count(&self) -> usize {
        // Group adjacent events by key to count revisions
        let grouped = group_adjacent_events(&self.events);
        grouped.len()
    }
    
    /// Get counts broken down by type
    pub fn counts(&self) -> (usize, usize, usize) {
        (self.insert_count, self.delete_count, self.format_change_count)
    }
}

/// Emit change events from a list of correlated atoms.
///
/// This is the main entry point for converting the LCS correlation result
/// into explicit change events.
///
/// ## Algorithm
/// 1. Iterate through atoms
/// 2. For each non-Equal atom, emit appropriate event
/// 3. Group consecutive same-status atoms into single events
///
pub fn emit_change_events(
    atoms: &[ComparisonUnitAtom],
    settings: &WmlComparerSettings,
) -> ChangeEventResult {
    let author = settings.author_for_revisions.clone()
        .unwrap_or_else(|| "redline-rs".to_string());
    let date = settings.date_time_for_revisions.clone();
    
    let mut result = ChangeEventResult::default();
    let mut i = 0;
    
    while i < atoms.len() {
        let atom = &atoms[i];
        
        match atom.correlation_status {
            ComparisonCorrelationStatus::Inserted => {
                // Collect all consecutive inserted atoms
                let start = i;
                while i < atoms.len() && atoms[i].correlation_status == ComparisonCorrelationStatus::Inserted {
                    i += 1;
                }
                let inserted_atoms: Vec<_> = atoms[start..i].to_vec();
                let para_idx = get_paragraph_index(&inserted_atoms[0]);
                
                result.events.push(ChangeEvent::Insert {
                    atoms: inserted_atoms,
                    author: author.clone(),
                    date: date.clone(),
                    paragraph_index: para_idx,
                });
                result.insert_count += 1;
            }
            
            ComparisonCorrelationStatus::Deleted => {
                // Collect all consecutive deleted atoms
                let start = i;
                while i < atoms.len() && atoms[i].correlation_status == ComparisonCorrelationStatus::Deleted {
                    i += 1;
                }
                let deleted_atoms: Vec<_> = atoms[start..i].to_vec();
                let para_idx = get_paragraph_index(&deleted_atoms[0]);
                
                result.events.push(ChangeEvent::Delete {
                    atoms: deleted_atoms,
                    author: author.clone(),
                    date: date.clone(),
                    paragraph_index: para_idx,
                });
                result.delete_count += 1;
            }
            
            ComparisonCorrelationStatus::FormatChanged => {
                // Format changes are emitted individually (each atom is one change)
                let before_rpr = atom.formatting_change_rpr_before.clone();
                let after_rpr = atom.formatting_signature.clone();
                
                result.events.push(ChangeEvent::FormatChange {
                    atom: atom.clone(),
                    before_rpr,
                    after_rpr,
                    author: author.clone(),
                    date: date.clone(),
                });
                result.format_change_count += 1;
                i += 1;
            }
            
            ComparisonCorrelationStatus::Equal |
            ComparisonCorrelationStatus::Nil |
            ComparisonCorrelationStatus::Normal |
            ComparisonCorrelationStatus::Unknown |
            ComparisonCorrelationStatus::Group => {
                // No change event for equal/unchanged content
                i += 1;
            }
        }
    }
    
    result
}

/// Get paragraph index from atom's ancestors
fn get_paragraph_index(atom: &ComparisonUnitAtom) -> Option<usize> {
    // Find the paragraph ancestor and extract its index if available
    atom.ancestor_elements.iter()
        .find(|a| a.local_name == "p")
        .map(|_| 0) // TODO: Track actual paragraph indices
}

/// Group adjacent events by their grouping key.
///
/// Adjacent events with the same (type, author, date) are grouped together
/// and count as ONE revision.
pub fn group_adjacent_events(events: &[ChangeEvent]) -> Vec<Vec<&ChangeEvent>> {
    if events.is_empty() {
        return Vec::new();
    }
    
    let mut groups: Vec<Vec<&ChangeEvent>> = Vec::new();
    let mut current_group: Vec<&ChangeEvent> = vec![&events[0]];
    let mut current_key = events[0].grouping_key();
    
    for event in events.iter().skip(1) {
        let key = event.grouping_key();
        if key == current_key {
            current_group.push(event);
        } else {
            groups.push(current_group);
            current_group = vec![event];
            current_key = key;
        }
    }
    
    groups.push(current_group);
    groups
}

/// Count revisions from change events using GroupAdjacent logic.
///
/// Returns (insertions, deletions, format_changes) where each count
/// represents the number of GROUPS, not individual atoms.
pub fn count_revisions_from_events(events: &[ChangeEvent]) -> (usize, usize, usize) {
    let groups = group_adjacent_events(events);
    
    let mut insertions = 0;
    let mut deletions = 0;
    let mut format_changes = 0;
    
    for group in groups {
        if group.is_empty() {
            continue;
        }
        
        // Use the first event's type to classify the group
        match group[0] {
            ChangeEvent::Insert { .. } => insertions += 1,
            ChangeEvent::Delete { .. } => deletions += 1,
            ChangeEvent::Replace { .. } => {
                // Replace counts as both an insertion and deletion
                insertions += 1;
                deletions += 1;
            }
            ChangeEvent::FormatChange { .. } => format_changes += 1,
        }
    }
    
    (insertions, deletions, format_changes)
}

/// Detect format changes by comparing atoms with their "before" counterparts.
///
/// This function should be called after LCS correlation and before emitting events.
/// It sets the FormatChanged status on atoms where content matches but formatting differs.
///
pub fn detect_format_changes(
    atoms: &mut [ComparisonUnitAtom],
    settings: &WmlComparerSettings,
) {
    if !settings.track_formatting_changes {
        return;
    }
    
    for atom in atoms.iter_mut() {
        // Only check Equal atoms that have a "before" counterpart
        if atom.correlation_status != ComparisonCorrelationStatus::Equal {
            continue;
        }
        
        if let Some(ref before_atom) = atom.comparison_unit_atom_before {
            // Compare formatting signatures
            let before_sig = before_atom.formatting_signature.as_deref();
            let after_sig = atom.formatting_signature.as_deref();
            
            let formatting_differs = match (before_sig, after_sig) {
                (None, None) => false,
                (Some(_), None) | (None, Some(_)) => true,
                (Some(b), Some(a)) => b != a,
            };
            
            if formatting_differs {
                atom.correlation_status = ComparisonCorrelationStatus::FormatChanged;
                atom.formatting_change_rpr_before = before_atom.formatting_signature.clone();
                atom.formatting_change_rpr_before_signature = before_atom.formatting_signature.clone();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wml::comparison_unit::ContentElement;
    
    fn make_atom(status: ComparisonCorrelationStatus, text: char) -> ComparisonUnitAtom {
        let settings = WmlComparerSettings::default();
        ComparisonUnitAtom::new(
            ContentElement::Text(text),
            vec![],
            "main",
            &settings,
        )
    }
    
    fn make_atom_with_status(status: ComparisonCorrelationStatus, text: char) -> ComparisonUnitAtom {
        let mut atom = make_atom(status, text);
        atom.correlation_status = status;
        atom
    }
    
    #[test]
    fn test_emit_change_events_inserted() {
        let atoms = vec![
            make_atom_with_status(ComparisonCorrelationStatus::Inserted, 'H'),
            make_atom_with_status(ComparisonCorrelationStatus::Inserted, 'i'),
        ];
        
        let settings = WmlComparerSettings::default();
        let result = emit_change_events(&atoms, &settings);
        
        assert_eq!(result.insert_count, 1); // Both atoms grouped into one insert
        assert_eq!(result.delete_count, 0);
        assert_eq!(result.events.len(), 1);
        
        match &result.events[0] {
            ChangeEvent::Insert { atoms, .. } => {
                assert_eq!(atoms.len(), 2);
            }
            _ => panic!("Expected Insert event"),
        }
    }
    
    #[test]
    fn test_emit_change_events_deleted() {
        let atoms = vec![
            make_atom_with_status(ComparisonCorrelationStatus::Deleted, 'O'),
            make_atom_with_status(ComparisonCorrelationStatus::Deleted, 'l'),
            make_atom_with_status(ComparisonCorrelationStatus::Deleted, 'd'),
        ];
        
        let settings = WmlComparerSettings::default();
        let result = emit_change_events(&atoms, &settings);
        
        assert_eq!(result.delete_count, 1); // All atoms grouped into one delete
        assert_eq!(result.insert_count, 0);
    }
    
    #[test]
    fn test_emit_change_events_mixed() {
        let atoms = vec![
            make_atom_with_status(ComparisonCorrelationStatus::Equal, 'A'),
            make_atom_with_status(ComparisonCorrelationStatus::Deleted, 'B'),
            make_atom_with_status(ComparisonCorrelationStatus::Deleted, 'C'),
            make_atom_with_status(ComparisonCorrelationStatus::Equal, 'D'),
            make_atom_with_status(ComparisonCorrelationStatus::Inserted, 'E'),
            make_atom_with_status(ComparisonCorrelationStatus::Equal, 'F'),
        ];
        
        let settings = WmlComparerSettings::default();
        let result = emit_change_events(&atoms, &settings);
        
        assert_eq!(result.delete_count, 1); // BC grouped
        assert_eq!(result.insert_count, 1); // E alone
        assert_eq!(result.events.len(), 2);
    }
    
    #[test]
    fn test_emit_change_events_format_changed() {
        let mut atom = make_atom_with_status(ComparisonCorrelationStatus::FormatChanged, 'X');
        atom.formatting_change_rpr_before = Some("<w:rPr><w:b/></w:rPr>".to_string());
        atom.formatting_signature = Some("<w:rPr><w:i/></w:rPr>".to_string());
        
        let atoms = vec![atom];
        let settings = WmlComparerSettings::default();
        let result = emit_change_events(&atoms, &settings);
        
        assert_eq!(result.format_change_count, 1);
        assert_eq!(result.events.len(), 1);
        
        match &result.events[0] {
            ChangeEvent::FormatChange { before_rpr, after_rpr, .. } => {
                assert!(before_rpr.is_some());
                assert!(after_rpr.is_some());
            }
            _ => panic!("Expected FormatChange event"),
        }
    }
    
    #[test]
    fn test_group_adjacent_events() {
        let settings = WmlComparerSettings::default();
        let atoms = vec![
            make_atom_with_status(ComparisonCorrelationStatus::Inserted, 'A'),
            make_atom_with_status(ComparisonCorrelationStatus::Inserted, 'B'),
            make_atom_with_status(ComparisonCorrelationStatus::Deleted, 'C'),
            make_atom_with_status(ComparisonCorrelationStatus::Inserted, 'D'),
        ];
        
        let result = emit_change_events(&atoms, &settings);
        let groups = group_adjacent_events(&result.events);
        
        // AB (insert), C (delete), D (insert) = 3 groups
        assert_eq!(groups.len(), 3);
    }
    
    #[test]
    fn test_count_revisions_from_events() {
        let settings = WmlComparerSettings::default();
        let atoms = vec![
            make_atom_with_status(ComparisonCorrelationStatus::Inserted, 'A'),
            make_atom_with_status(ComparisonCorrelationStatus::Inserted, 'B'),
            make_atom_with_status(ComparisonCorrelationStatus::Deleted, 'C'),
            make_atom_with_status(ComparisonCorrelationStatus::Deleted, 'D'),
        ];
        
        let result = emit_change_events(&atoms, &settings);
        let (ins, del, fmt) = count_revisions_from_events(&result.events);
        
        assert_eq!(ins, 1); // AB grouped
        assert_eq!(del, 1); // CD grouped
        assert_eq!(fmt, 0);
    }
    
    #[test]
    fn test_revision_count_uses_grouping() {
        let settings = WmlComparerSettings::default();
        // Two separate insertion regions with different types in between
        // The revision_count groups by (type, author, date), but the emit_change_events
        // function groups consecutive same-status atoms BEFORE emitting.
        // So A and C become two separate Insert events because they're separated by B (Equal).
        let atoms = vec![
            make_atom_with_status(ComparisonCorrelationStatus::Inserted, 'A'),
            make_atom_with_status(ComparisonCorrelationStatus::Equal, 'B'),
            make_atom_with_status(ComparisonCorrelationStatus::Inserted, 'C'),
        ];
        
        let result = emit_change_events(&atoms, &settings);
        
        // emit_change_events creates 2 Insert events: one for 'A' and one for 'C'
        // (B is Equal, so not emitted)
        assert_eq!(result.insert_count, 2);
        assert_eq!(result.events.len(), 2);
        
        // However, group_adjacent_events groups by key (type|author|date)
        // Since both are Insert with same author/date, they group together
        // For correct separation, RUST-6 will implement proper interval tracking
        assert_eq!(result.revision_count(), 1); // Both inserts grouped
    }
}
