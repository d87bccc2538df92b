//! Flat-file datasets: the scraper's raw batch and the cumulative processed output.

use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, Read, Seek, SeekFrom, Write};
use std::path::Path;

use reviewlens_core::{IdentityStrategy, ProcessedReview, RawReview, INPUT_COLUMNS};
use serde::Serialize;

use crate::error::DatasetError;
use crate::identity::identity_key;

/// Whether the processed dataset already has a header to append under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetState {
    /// No file, or one holding nothing but whitespace.
    Empty,
    /// A file with content, expected to start with the header row.
    Populated,
}

impl DatasetState {
    /// Inspect `path`. Only the leading whitespace is read, so a real
    /// dataset is classified after its first byte.
    #[must_use]
    pub fn detect(path: &Path) -> Self {
        let Ok(file) = File::open(path) else {
            return DatasetState::Empty;
        };
        let has_content = BufReader::new(file)
            .bytes()
            .map_while(Result::ok)
            .any(|b| !b.is_ascii_whitespace());
        if has_content {
            DatasetState::Populated
        } else {
            DatasetState::Empty
        }
    }
}

impl std::fmt::Display for DatasetState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetState::Empty => write!(f, "empty"),
            DatasetState::Populated => write!(f, "populated"),
        }
    }
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> DatasetError + '_ {
    move |source| DatasetError::Io {
        path: path.display().to_string(),
        source,
    }
}

fn csv_err(path: &Path) -> impl FnOnce(csv::Error) -> DatasetError + '_ {
    move |source| DatasetError::Csv {
        path: path.display().to_string(),
        source,
    }
}

fn open_reader(path: &Path) -> Result<csv::Reader<File>, DatasetError> {
    let file = File::open(path).map_err(io_err(path))?;
    Ok(csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(file))
}

/// Positions of `required` columns in `headers`, in the same order.
fn column_indices(
    path: &Path,
    headers: &csv::StringRecord,
    required: &[&str],
) -> Result<Vec<usize>, DatasetError> {
    let mut indices = Vec::with_capacity(required.len());
    let mut missing = Vec::new();
    for column in required {
        match headers.iter().position(|h| h == *column) {
            Some(idx) => indices.push(idx),
            None => missing.push((*column).to_string()),
        }
    }
    if missing.is_empty() {
        Ok(indices)
    } else {
        Err(DatasetError::MissingColumns {
            path: path.display().to_string(),
            missing,
        })
    }
}

/// Read the scraper's batch.
///
/// # Errors
///
/// Returns [`DatasetError`] if the file cannot be opened, any of
/// [`INPUT_COLUMNS`] is absent, or a record is malformed.
pub fn read_batch(path: &Path) -> Result<Vec<RawReview>, DatasetError> {
    let mut reader = open_reader(path)?;
    let headers = reader.headers().map_err(csv_err(path))?.clone();
    column_indices(path, &headers, &INPUT_COLUMNS)?;

    reader
        .deserialize::<RawReview>()
        .map(|row| row.map_err(csv_err(path)))
        .collect()
}

/// Recompute the identity key of every persisted row.
///
/// Keys are rebuilt from the `Name` and `Review Text` columns with the
/// current strategy, so a dataset written under another strategy still
/// deduplicates correctly.
///
/// # Errors
///
/// Returns [`DatasetError`] if the file cannot be opened, lacks the key
/// columns, or contains a malformed record.
pub fn load_identity_keys(
    path: &Path,
    strategy: IdentityStrategy,
) -> Result<HashSet<String>, DatasetError> {
    let mut reader = open_reader(path)?;
    let headers = reader.headers().map_err(csv_err(path))?.clone();
    let idx = column_indices(path, &headers, &["Name", "Review Text"])?;

    let mut keys = HashSet::new();
    for record in reader.records() {
        let record = record.map_err(csv_err(path))?;
        let name = record.get(idx[0]).unwrap_or_default();
        let text = record.get(idx[1]).unwrap_or_default();
        keys.insert(identity_key(strategy, name, text));
    }
    Ok(keys)
}

fn ends_with_newline(file: &mut File) -> std::io::Result<bool> {
    if file.seek(SeekFrom::End(0))? == 0 {
        return Ok(true);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

/// Append processed rows to the dataset.
///
/// An [`Empty`](DatasetState::Empty) dataset is truncated and gets the
/// header first; a [`Populated`](DatasetState::Populated) one only gets rows.
/// Existing rows are never rewritten.
///
/// # Errors
///
/// Returns [`DatasetError`] if the file cannot be opened or written.
pub fn append_reviews(
    path: &Path,
    reviews: &[ProcessedReview],
    state: DatasetState,
) -> Result<(), DatasetError> {
    let mut file = match state {
        // Drops any stray whitespace so the header lands on the first line.
        DatasetState::Empty => OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path),
        DatasetState::Populated => OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(path),
    }
    .map_err(io_err(path))?;

    // A hand-edited file may lack its final newline.
    if state == DatasetState::Populated && !ends_with_newline(&mut file).map_err(io_err(path))? {
        file.write_all(b"\n").map_err(io_err(path))?;
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(state == DatasetState::Empty)
        .from_writer(file);
    for review in reviews {
        writer.serialize(review).map_err(csv_err(path))?;
    }
    writer.flush().map_err(io_err(path))?;
    Ok(())
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
