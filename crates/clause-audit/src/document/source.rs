use std::fs;
use std::path::{Path, PathBuf};

const PDF_MAGIC: &[u8] = b"%PDF";
const TEXT_EXTENSIONS: [&str; 3] = ["txt", "text", "md"];

/// Failures while obtaining extracted document text.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} is a binary document; extract its text before evaluation")]
    UnsupportedFormat { path: PathBuf },
    #[error("{path} is not valid UTF-8 text")]
    InvalidEncoding { path: PathBuf },
}

/// Read an already-extracted plain-text document.
pub fn read_text(path: impl AsRef<Path>) -> Result<String, DocumentError> {
    let path = path.as_ref();
    let has_pdf_extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);

    if has_pdf_extension {
        return Err(DocumentError::UnsupportedFormat {
            path: path.to_path_buf(),
        });
    }

    let bytes = fs::read(path).map_err(|source| DocumentError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if bytes.starts_with(PDF_MAGIC) {
        return Err(DocumentError::UnsupportedFormat {
            path: path.to_path_buf(),
        });
    }

    String::from_utf8(bytes).map_err(|_| DocumentError::InvalidEncoding {
        path: path.to_path_buf(),
    })
}

/// Text documents directly inside `dir`, sorted by path.
pub fn collect_inputs(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>, DocumentError> {
    let dir = dir.as_ref();
    let io_error = |source| DocumentError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut inputs = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        let is_text = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                TEXT_EXTENSIONS
                    .iter()
                    .any(|known| ext.eq_ignore_ascii_case(known))
            })
            .unwrap_or(false);
        if path.is_file() && is_text {
            inputs.push(path);
        }
    }

    inputs.sort();
    Ok(inputs)
}
