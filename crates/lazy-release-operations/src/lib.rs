mod context;
mod error;
pub mod operations;
pub mod planner;
pub mod providers;
pub mod traits;

#[cfg(test)]
pub mod mocks;

pub use context::{ActionContext, PullRequestContext};
pub use error::{OperationError, Result};
