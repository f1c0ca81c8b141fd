use std::fs::OpenOptions;
use std::io::Write as _;
use std::path::PathBuf;

use tracing::info;

use crate::traits::OutputSink;
use crate::{OperationError, Result};

const DELIMITER: &str = "lazy_release_output_eof";

/// Appends outputs to the file named by `GITHUB_OUTPUT`. Without a file the
/// outputs are only logged.
pub struct GitHubOutputFile {
    path: Option<PathBuf>,
}

impl GitHubOutputFile {
    #[must_use]
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

impl OutputSink for GitHubOutputFile {
    fn set_output(&self, name: &str, value: &str) -> Result<()> {
        info!(%name, %value, "setting output");

        let Some(path) = &self.path else {
            return Ok(());
        };

        let entry = if value.contains('\n') {
            format!("{name}<<{DELIMITER}\n{value}\n{DELIMITER}\n")
        } else {
            format!("{name}={value}\n")
        };

        OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .and_then(|mut file| file.write_all(entry.as_bytes()))
            .map_err(|source| OperationError::OutputWrite {
                path: path.clone(),
                source,
            })
    }
}
