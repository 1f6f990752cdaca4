use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::report::{write_csv, ComplianceReport, ReportError};

/// Artifact file names written for one report, relative to the store root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredReport {
    pub json_file: String,
    pub csv_file: String,
}

impl StoredReport {
    pub fn for_stem(stem: &str) -> Self {
        Self {
            json_file: format!("{stem}_report.json"),
            csv_file: format!("{stem}_summary.csv"),
        }
    }
}

/// Persistence seam for generated reports.
pub trait ReportStore: Send + Sync {
    fn save(&self, stem: &str, report: &ComplianceReport) -> Result<StoredReport, StoreError>;
    fn fetch(&self, stem: &str) -> Result<Option<ComplianceReport>, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("report storage failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Encode(#[from] ReportError),
    #[error("stored report {path} is unreadable: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Writes `<stem>_report.json` and `<stem>_summary.csv` under a root directory.
#[derive(Debug, Clone)]
pub struct FileReportStore {
    root: PathBuf,
}

impl FileReportStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> StoreError + '_ {
        move |source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    fn write_file(
        path: &Path,
        fill: impl FnOnce(&mut BufWriter<File>) -> Result<(), ReportError>,
    ) -> Result<(), StoreError> {
        let file = File::create(path).map_err(Self::io_error(path))?;
        let mut writer = BufWriter::new(file);
        fill(&mut writer)?;
        writer.flush().map_err(Self::io_error(path))
    }
}

impl ReportStore for FileReportStore {
    fn save(&self, stem: &str, report: &ComplianceReport) -> Result<StoredReport, StoreError> {
        fs::create_dir_all(&self.root).map_err(Self::io_error(&self.root))?;
        let stored = StoredReport::for_stem(stem);

        let json_path = self.root.join(&stored.json_file);
        let json = report.to_json_pretty()?;
        Self::write_file(&json_path, |writer| Ok(writer.write_all(json.as_bytes())?))?;

        let csv_path = self.root.join(&stored.csv_file);
        Self::write_file(&csv_path, |writer| write_csv(report, writer))?;

        debug!(
            json = %json_path.display(),
            csv = %csv_path.display(),
            "report artifacts written"
        );
        Ok(stored)
    }

    fn fetch(&self, stem: &str) -> Result<Option<ComplianceReport>, StoreError> {
        let path = self.root.join(StoredReport::for_stem(stem).json_file);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StoreError::Decode { path, source })
    }
}
