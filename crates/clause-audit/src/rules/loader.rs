use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::domain::RuleSet;

/// Failure to obtain a rule set from its provider.
#[derive(Debug, thiserror::Error)]
pub enum RuleSetError {
    #[error("failed to read rule set {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid rule set: {0}")]
    Parse(#[from] serde_json::Error),
}

impl RuleSet {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RuleSetError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| RuleSetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let rules = Self::from_reader(BufReader::new(file))?;
        debug!(path = %path.display(), clauses = rules.len(), "rule set loaded");

        for finding in rules.lint() {
            warn!(clause = %finding.clause_id, "{}", finding.message);
        }

        Ok(rules)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, RuleSetError> {
        Ok(serde_json::from_reader(reader)?)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(raw: &str) -> Result<Self, RuleSetError> {
        Ok(serde_json::from_str(raw)?)
    }
}
