use crate::error::Result;
use crate::wml::document::WmlDocument;

/// Settings controlling the visual-redline transform: turning `w:ins`/`w:del`
/// tracked-change markup into plain colored-text formatting with no revision
/// marks, as produced by some word processors' "show changes as formatting"
/// mode.
#[derive(Debug, Clone)]
pub struct VisualRedlineSettings {
    pub insertion_color: String,
    pub deletion_color: String,
    pub move_color: String,
    pub add_summary_table: bool,
    pub older_filename: Option<String>,
    pub newer_filename: Option<String>,
}

impl Default for VisualRedlineSettings {
    fn default() -> Self {
        Self {
            insertion_color: "0000FF".to_string(),
            deletion_color: "FF0000".to_string(),
            move_color: "008000".to_string(),
            add_summary_table: true,
            older_filename: None,
            newer_filename: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct VisualRedlineResult {
    pub document: Vec<u8>,
    pub insertions: usize,
    pub deletions: usize,
    pub moves: usize,
}

/// Transforms a document's `w:ins`/`w:del` revision markup into colored-text
/// formatting with no revision marks, for callers that want a printable
/// redline instead of a document with live tracked changes.
///
/// Not implemented: this is WML-only ambient tooling layered on top of the
/// tracked-change comparer (`WmlComparer`), outside the PML/SML comparison
/// engines this crate centers on. See `get_revisions` for the same stance
/// on out-of-core WML conveniences.
pub fn render_visual_redline(
    _source: &WmlDocument,
    _settings: &VisualRedlineSettings,
) -> Result<VisualRedlineResult> {
    Err(crate::error::RedlineError::UnsupportedFeature {
        feature: "visual redline rendering requires full OpenXML document handling".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_use_standard_redline_colors() {
        let settings = VisualRedlineSettings::default();
        assert_eq!(settings.insertion_color, "0000FF");
        assert_eq!(settings.deletion_color, "FF0000");
        assert_eq!(settings.move_color, "008000");
        assert!(settings.add_summary_table);
    }
}
