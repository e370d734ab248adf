//! # Search Facade Shared
//!
//! Backend-independent types shared by the search facade: untyped result
//! documents, result pages, the opaque query capability and the pagination
//! contract.

mod document;
mod pagination;
mod query;

pub use document::{Document, ResultPage};
pub use pagination::{page_offset, PAGE_SIZE};
pub use query::{MatchAll, Query};
