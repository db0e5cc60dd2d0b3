pub mod add;
pub mod enrich;
pub mod mark;
pub mod note;
pub mod session;
pub mod stats;
pub mod study;
pub mod words;
