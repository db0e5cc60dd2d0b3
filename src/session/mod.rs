//! Study session building
//!
//! This module provides:
//! - Learning, browse and session preference filters
//! - Smart (bucketed) and traditional (least-practiced) word selection

pub mod filters;
pub mod selector;

pub use filters::{BrowseFilter, FilterState, LearningFilter, SessionConfig};
pub use selector::{select_session, SelectionContext};
