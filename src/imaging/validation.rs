//! Upload validation by declared filename
//!
//! Only the client-supplied filename is inspected. File content is never
//! sniffed here: a `.png` name over non-PNG bytes passes and fails later
//! at decode time.

/// Case-insensitive allow-list of filename suffixes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcceptedExtensions(&'static [&'static str]);

impl AcceptedExtensions {
    pub const PNG: AcceptedExtensions = AcceptedExtensions(&[".png"]);
    pub const WEBP: AcceptedExtensions = AcceptedExtensions(&[".webp"]);
    pub const JPEG: AcceptedExtensions = AcceptedExtensions(&[".jpg", ".jpeg"]);
    pub const RESIZABLE: AcceptedExtensions = AcceptedExtensions(&[".jpg", ".jpeg", ".png"]);

    pub fn suffixes(&self) -> &'static [&'static str] {
        self.0
    }

    /// Whether `filename` ends with one of the accepted suffixes
    ///
    /// A missing filename is rejected.
    pub fn accepts(&self, filename: Option<&str>) -> bool {
        let Some(name) = filename else {
            return false;
        };
        let lower = name.to_lowercase();
        self.0.iter().any(|suffix| lower.ends_with(suffix))
    }
}
