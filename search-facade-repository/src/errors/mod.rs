//! Error types for the search facade.

mod connect_error;
mod engine_error;
mod search_error;
mod write_error;

pub use connect_error::ConnectError;
pub use engine_error::EngineError;
pub use search_error::SearchError;
pub use write_error::WriteError;
