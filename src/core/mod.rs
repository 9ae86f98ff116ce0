//! Core types shared by the survey pipeline.

mod corpus;
mod error;
pub mod progress;
mod repository;

pub use corpus::Corpus;
pub use error::{Error, MissReason, Result};
pub use progress::ProgressTracker;
pub use repository::Repository;
