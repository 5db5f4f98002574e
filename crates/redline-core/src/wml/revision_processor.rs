
use crate::xml::XmlDocument;
use indextree::NodeId;

#[derive(Debug, Clone)]
struct ReverseRevisionsInfo {
    in_insert: bool,
}

impl ReverseRevisionsInfo {
    fn new() -> Self {
        Self { in_insert: false }
    }
}

#[derive(Debug, Clone)]
pub struct BlockContentInfo {
    pub previous_block_content_element: Option<NodeId>,
    pub this_block_content_element: Option<NodeId>,
    pub next_block_content_element: Option<NodeId>,
}

pub fn accept_revisions(_doc: &mut XmlDocument) -> Result<(), String> {
}

pub fn reject_revisions(_doc: &mut XmlDocument) -> Result<(), String> {
}

pub fn reverse_revisions(_doc: &mut XmlDocument) -> Result<(), String> {
}

pub fn normalize_duplicate_textboxes(_doc: &mut XmlDocument) -> Result<(), String> {
}

#[cfg(test)]
mod tests {
    use super::*;
    
    #[test]
    fn test_reverse_revisions_info() {
        let info = ReverseRevisionsInfo::new();
        assert!(!info.in_insert);
    }
    
    #[test]
    fn test_block_content_info() {
        let info = BlockContentInfo {
            previous_block_content_element: None,
            this_block_content_element: None,
            next_block_content_element: None,
        };
        assert!(info.previous_block_content_element.is_none());
    }
}
