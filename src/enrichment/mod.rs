//! Definitions and quiz questions from a text generation service
//!
//! This module provides:
//! - The `EnrichmentService` seam and its HTTP implementation
//! - Parsing of generated definitions and quizzes
//! - A shared cache with in-flight tracking, and a cache-first resolver

pub mod cache;
pub mod client;
pub mod models;
pub mod parse;
pub mod service;

pub use cache::ContentCache;
pub use client::{EnrichmentService, GenerativeClient};
pub use models::{EnrichmentError, QuizQuestion, WordDefinition};
pub use service::Enricher;
