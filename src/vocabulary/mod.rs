//! Vocabulary catalog for Wordwise
//!
//! This module provides:
//! - Word entries (builtin dataset and learner-added words)
//! - Static dataset loading
//! - Merging persisted custom words, notes and timestamps
//! - Change notifications for views that list words

pub mod catalog;
pub mod dataset;
pub mod models;

pub use catalog::{merge_sources, Catalog, CatalogEvent, MergedWord};
pub use dataset::Dataset;
pub use models::*;
