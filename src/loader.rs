//! Reads a single census file into an [`AccidentTable`].
//!
//! Files may be bzip2 (`.bz2`) or gzip (`.gz`) compressed, or plain CSV.

use bzip2::read::MultiBzDecoder;
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

use crate::error::FarsError;
use crate::record::{AccidentRecord, AccidentTable};

/// Columns every census file must carry.
pub const REQUIRED_COLUMNS: [&str; 4] = ["STATE", "MONTH", "LONGITUD", "LATITUDE"];

/// Loads and parses the census file at `path`.
///
/// # Errors
///
/// [`FarsError::FileNotFound`] if the path does not exist, and
/// [`FarsError::ParseFailure`] if the contents cannot be decoded, a required
/// column is missing, or a row does not deserialize.
pub fn read(path: impl AsRef<Path>) -> Result<AccidentTable, FarsError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(FarsError::FileNotFound(path.to_path_buf()));
    }

    let file = File::open(path).map_err(|e| FarsError::parse(path, e))?;
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(decoder_for(path, file));

    // Byte records so non-UTF-8 text in unused columns does not fail the file.
    let headers = rdr.byte_headers().map_err(|e| FarsError::parse(path, e))?.clone();
    if let Some(missing) = REQUIRED_COLUMNS
        .iter()
        .find(|col| !headers.iter().any(|h| h == col.as_bytes()))
    {
        return Err(FarsError::parse(path, format!("missing column `{missing}`")));
    }

    let mut records = Vec::new();
    for result in rdr.byte_records() {
        let row = result.map_err(|e| FarsError::parse(path, e))?;
        let record: AccidentRecord = row
            .deserialize(Some(&headers))
            .map_err(|e| FarsError::parse(path, e))?;
        records.push(record);
    }

    debug!(path = %path.display(), rows = records.len(), "Census file loaded");
    Ok(AccidentTable { records })
}

fn decoder_for(path: &Path, file: File) -> Box<dyn Read> {
    let file = BufReader::new(file);
    match path.extension().and_then(|e| e.to_str()) {
        Some("bz2") => Box::new(MultiBzDecoder::new(file)),
        Some("gz") => Box::new(MultiGzDecoder::new(file)),
        _ => Box::new(file),
    }
}
