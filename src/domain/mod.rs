pub mod errors;
pub mod models;

pub use errors::{BusinessError, ConflictReason, EngineError};
pub use models::*;
