//! Form mapping targets.

/// Identifier of a mapping that explicitly points at the legacy form.
pub const LEGACY_FORMS_NAME: &str = "LEGACY";

/// What a form mapping resolves to for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormReference {
    /// Custom page name or external URL.
    pub identifier: String,
    /// `identifier` is an external URL to redirect to.
    pub is_external: bool,
}

impl FormReference {
    pub fn new(identifier: impl Into<String>, is_external: bool) -> Self {
        Self {
            identifier: identifier.into(),
            is_external,
        }
    }

    pub fn custom_page(identifier: impl Into<String>) -> Self {
        Self::new(identifier, false)
    }

    pub fn external(url: impl Into<String>) -> Self {
        Self::new(url, true)
    }

    pub fn legacy() -> Self {
        Self::new(LEGACY_FORMS_NAME, false)
    }

    /// True when the mapping targets the legacy form.
    pub fn is_legacy(&self) -> bool {
        !self.is_external && self.identifier == LEGACY_FORMS_NAME
    }
}
