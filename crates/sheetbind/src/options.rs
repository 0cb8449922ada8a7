//! Binding options

/// Options that apply to every call of a binder
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BindOptions {
    /// Whether the first line of the region is a header (default: true)
    pub has_header: bool,
    /// Reject mapping keys that the first element does not have (default: false)
    pub strict_keys: bool,
    /// Skip data lines whose bound cells are all empty (default: false)
    pub skip_blank_lines: bool,
}

impl Default for BindOptions {
    fn default() -> Self {
        Self {
            has_header: true,
            strict_keys: false,
            skip_blank_lines: false,
        }
    }
}

impl BindOptions {
    /// Create default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether the region starts with a header line
    pub fn has_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    /// Set strict mapping keys
    pub fn strict_keys(mut self, strict: bool) -> Self {
        self.strict_keys = strict;
        self
    }

    /// Set whether blank data lines are skipped
    pub fn skip_blank_lines(mut self, skip: bool) -> Self {
        self.skip_blank_lines = skip;
        self
    }
}
