use crate::error::Result;
use crate::wml::settings::{WmlComparerRevision, WmlComparerSettings};

pub fn get_revisions(
    _source: &[u8],
    _settings: &WmlComparerSettings,
) -> Result<Vec<WmlComparerRevision>> {
    Err(crate::error::RedlineError::UnsupportedFeature {
        feature: "GetRevisions implementation requires full OpenXML document handling".to_string()
    })
}
