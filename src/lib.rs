//! Vocabulary learning core: catalog, mastery tracking, review queue,
//! session selection and enrichment caching.

pub mod config;
pub mod enrichment;
pub mod mastery;
pub mod practice;
pub mod review;
pub mod session;
pub mod storage;
pub mod store;
pub mod vocabulary;

pub use store::{StoreError, VocabularyStore};
