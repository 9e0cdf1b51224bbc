//! State module for tracking listing page outcomes
//!
//! Every planned listing page ends a crawl in exactly one [`PageState`];
//! region reports are tallies of these states.

mod page_state;

pub use page_state::PageState;
