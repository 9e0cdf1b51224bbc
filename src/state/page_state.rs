/// Page state definitions for tracking listing page outcomes
///
/// This module defines every state a planned listing page can end up in.
use std::fmt;

/// Final outcome of one planned listing page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageState {
    /// Page was fetched and yielded at least one record
    Processed,

    /// Page was fetched but contained no record headings
    Empty,

    /// Page could not be fetched after all retries
    Failed,

    /// Page was not consumed because its region was aborted; it may still
    /// have been requested ahead of the abort
    Skipped,
}

impl PageState {
    /// Returns true if the page was fetched successfully, with or without records
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Processed | Self::Empty)
    }

    /// Returns true if this represents an error state
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failed)
    }

    /// Short lowercase label used in reports and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Processed => "processed",
            Self::Empty => "empty",
            Self::Failed => "failed",
            Self::Skipped => "skipped",
        }
    }

    /// Returns all possible page states
    pub fn all_states() -> [Self; 4] {
        [Self::Processed, Self::Empty, Self::Failed, Self::Skipped]
    }
}

impl fmt::Display for PageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
