pub mod constants;
pub mod error;
mod forge;
mod package;
pub mod types;

pub use error::*;
pub use forge::{Forge, RepositoryInfo};
pub use package::{PackageInfo, unscoped_name};
pub use types::*;
