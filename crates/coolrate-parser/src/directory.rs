use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::LoaderError;
use crate::model::{LoaderOptions, SampleFile};
use crate::reader::parse_sample_file;

/// Lists the regular files in `dir` whose name ends with `extension`, sorted by file name.
pub fn discover_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, LoaderError> {
    if !dir.exists() {
        return Err(LoaderError::MissingDirectory {
            path: dir.to_path_buf(),
        });
    }
    if !dir.is_dir() {
        return Err(LoaderError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }

    let io_err = |source| LoaderError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let matches = entry
            .file_name()
            .as_encoded_bytes()
            .ends_with(extension.as_bytes());
        if matches && entry.file_type().map_err(io_err)?.is_file() {
            files.push(entry.path());
        }
    }

    if files.is_empty() {
        return Err(LoaderError::NoMatchingFiles {
            path: dir.to_path_buf(),
            extension: extension.to_string(),
        });
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

pub fn load_sample_file(path: &Path, options: &LoaderOptions) -> Result<SampleFile, LoaderError> {
    let content = fs::read_to_string(path).map_err(|source| LoaderError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    parse_sample_file(&file_name, &content, options)
}

/// Loads every matching file in `dir`, stopping at the first one that fails.
pub fn load_directory(dir: &Path, options: &LoaderOptions) -> Result<Vec<SampleFile>, LoaderError> {
    let paths = discover_files(dir, &options.extension)?;
    let mut samples = Vec::with_capacity(paths.len());

    for path in paths {
        let sample = load_sample_file(&path, options)?;
        debug!(
            file = sample.file_name.as_str(),
            rows = sample.row_count(),
            "Loaded sample file"
        );
        samples.push(sample);
    }

    Ok(samples)
}
