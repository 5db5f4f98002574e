pub mod ooxml;
pub mod relationships;
pub mod content_types;
pub mod parts;

pub use ooxml::OoxmlPackage;
pub use relationships::Relationship;
pub use content_types::ContentTypes;
