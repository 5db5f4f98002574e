mod canonicalize;
mod change_list;
mod comparer;
mod diff;
mod document;
mod markup;
mod result;
mod settings;
mod shape_match;
mod slide_matching;
mod types;

pub use change_list::build_change_list;
pub use comparer::PmlComparer;
pub use document::PmlDocument;
pub use markup::render_marked_presentation;
pub use result::PmlComparisonResult;
pub use settings::PmlComparerSettings;
pub use types::{
    PmlChange, PmlChangeDetails, PmlChangeListItem, PmlChangeListOptions, PmlChangeType,
    PmlTextChange, PmlWordCount, TextChangeType,
};

// Internal signature types used by comparer
pub(crate) use slide_matching::{
    PlaceholderInfo, PmlShapeType, PresentationSignature, RunPropertiesSignature, RunSignature,
    ShapeSignature, SlideSignature, TextBodySignature, TransformSignature,
};

// Internal match engines
pub(crate) use shape_match::PmlShapeMatchEngine;
pub(crate) use slide_matching::PmlSlideMatchEngine;

// Internal diff engine
pub(crate) use diff::PmlDiffEngine;

// Internal canonicalizer
pub(crate) use canonicalize::PmlCanonicalizer;
