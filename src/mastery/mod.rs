//! Per-word mastery tracking
//!
//! This module provides:
//! - Mastery status and state models
//! - The encounter/override state machine
//! - Progress statistics types

pub mod models;
pub mod tracker;

pub use models::*;
pub use tracker::{MasteryTracker, REQUIRED_ENCOUNTERS};
