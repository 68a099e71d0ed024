//! CSV export of the collected result set.
//!
//! The file is written to a sibling `<name>.tmp` and renamed over the
//! destination once every row is flushed, so a failed run never leaves a
//! half-written export behind.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use sauna_places::{PlaceRecord, RecordShape};
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum ExportError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("record {row} has shape {found:?}, expected {expected:?}")]
    ShapeMismatch {
        row: usize,
        expected: RecordShape,
        found: RecordShape,
    },
}

/// Writes `records` to `path` under the header for `shape`, one row per
/// record in order. Any existing file at `path` is replaced.
///
/// # Errors
///
/// - [`ExportError::ShapeMismatch`] if any record does not match `shape`;
///   nothing is written in that case.
/// - [`ExportError::Io`] if the temporary file cannot be created, flushed,
///   or renamed into place.
/// - [`ExportError::Csv`] if a row cannot be encoded.
pub(crate) fn write_csv(
    records: &[PlaceRecord],
    shape: RecordShape,
    path: &Path,
) -> Result<(), ExportError> {
    if let Some((row, record)) = records
        .iter()
        .enumerate()
        .find(|(_, r)| r.shape() != shape)
    {
        return Err(ExportError::ShapeMismatch {
            row,
            expected: shape,
            found: record.shape(),
        });
    }

    let tmp = tmp_path(path);
    let result = write_rows(records, shape, &tmp).and_then(|()| {
        fs::rename(&tmp, path).map_err(|source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        })
    });

    if result.is_err() {
        fs::remove_file(&tmp).ok();
    }
    result
}

fn write_rows(records: &[PlaceRecord], shape: RecordShape, tmp: &Path) -> Result<(), ExportError> {
    let io_err = |source| ExportError::Io {
        path: tmp.to_path_buf(),
        source,
    };

    let file = File::create(tmp).map_err(io_err)?;
    let mut writer = csv::Writer::from_writer(file);

    writer.write_record(shape.header())?;
    for record in records {
        writer.write_record(record.values())?;
    }
    writer.flush().map_err(io_err)?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map_or_else(|| OsString::from("export"), ToOwned::to_owned);
    name.push(".tmp");
    path.with_file_name(name)
}
