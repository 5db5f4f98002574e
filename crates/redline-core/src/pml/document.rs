use crate::error::{RedlineError, Result};
use crate::package::OoxmlPackage;

pub struct PmlDocument {
    package: OoxmlPackage,
}

impl PmlDocument {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() {
            return Err(RedlineError::Precondition {
                message: "presentation package bytes must not be empty".to_string(),
            });
        }
        let package = OoxmlPackage::open(bytes)?;
        Ok(Self { package })
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.package.save()
    }

    /// Returns a fresh document built from the exact bytes this one was opened from,
    /// bypassing re-serialization. Used when a comparison finds zero changes, so the
    /// marked output is byte-for-byte identical to the input rather than merely
    /// equivalent after a re-zip.
    pub fn clone_original(&self) -> Result<Self> {
        Self::from_bytes(self.package.original_bytes())
    }

    pub fn package(&self) -> &OoxmlPackage {
        &self.package
    }

    pub fn package_mut(&mut self) -> &mut OoxmlPackage {
        &mut self.package
    }
}
