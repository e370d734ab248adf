//! Interface definitions for the search engine backend.
//!
//! This module defines the abstract `SearchEngine` trait that allows
//! for dependency injection and swappable search backend implementations.

mod search_engine;

pub use search_engine::SearchEngine;
