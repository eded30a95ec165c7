//! JSONL history I/O

use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::Path;
use tracing::debug;

/// Append records to a JSONL file, one per line
pub fn append_jsonl<'a, T, I>(path: &Path, records: I) -> std::io::Result<usize>
where
    T: Serialize + 'a,
    I: IntoIterator<Item = &'a T>,
{
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;

    let mut written = 0;
    for record in records {
        let json = serde_json::to_string(record)?;
        writeln!(file, "{}", json)?;
        written += 1;
    }
    Ok(written)
}

/// Read every record from a JSONL file.
///
/// A missing file reads as empty. Lines that do not parse as `T` (partial
/// writes, records from an older format) are logged and skipped.
pub fn read_jsonl<T: for<'de> Deserialize<'de>>(path: &Path) -> std::io::Result<Vec<T>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(err),
    };

    let mut records = Vec::new();
    for (number, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str(&line) {
            Ok(record) => records.push(record),
            Err(err) => debug!(
                path = %path.display(),
                line = number + 1,
                error = %err,
                "skipping unreadable history line"
            ),
        }
    }

    Ok(records)
}
