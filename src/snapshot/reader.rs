use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::{SnapshotRow, SNAPSHOT_FIELDS, SNAPSHOT_HEADER};

/// Parse one data line, returning `None` for malformed rows
///
/// A row is malformed when it does not have exactly five fields or its score
/// is not an integer 0-100 followed by `%`.
pub fn parse_row(line: &str) -> Option<SnapshotRow> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() != SNAPSHOT_FIELDS {
        return None;
    }

    let percent = fields[3]
        .trim()
        .strip_suffix('%')?
        .trim()
        .parse::<u8>()
        .ok()
        .filter(|p| *p <= 100)?;

    Some(SnapshotRow {
        name: fields[0].to_string(),
        breed: fields[1].to_string(),
        pet_type: fields[2].to_string(),
        percent,
        image_path: fields[4].to_string(),
    })
}

/// Read every well-formed data row in file order
///
/// A missing or unreadable file yields no rows.
pub fn read_rows(path: &Path) -> Vec<SnapshotRow> {
    let mut rows = Vec::new();
    for_each_line(path, |line| {
        match parse_row(line) {
            Some(row) => rows.push(row),
            None => tracing::warn!("Skipping malformed snapshot row: {:?}", line),
        }
        true
    });
    rows
}

/// Read only the first data row; `None` when it is absent or malformed
pub fn read_first_row(path: &Path) -> Option<SnapshotRow> {
    let mut first = None;
    for_each_line(path, |line| {
        first = parse_row(line);
        if first.is_none() {
            tracing::warn!("First snapshot row is malformed: {:?}", line);
        }
        false
    });
    first
}

/// Feed each non-blank data line (header skipped) to `visit` until it returns false
///
/// The file is opened and closed within this call. Lines that are not valid
/// UTF-8 are skipped like any other malformed row; a read error ends the scan.
fn for_each_line<F>(path: &Path, mut visit: F)
where
    F: FnMut(&str) -> bool,
{
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            tracing::warn!("Cannot open snapshot {}: {}", path.display(), e);
            return;
        }
    };

    let mut chunks = BufReader::new(file).split(b'\n');

    match chunks.next() {
        Some(Ok(header)) => {
            if String::from_utf8_lossy(&header).trim_end() != SNAPSHOT_HEADER {
                tracing::warn!("Unexpected snapshot header in {}", path.display());
            }
        }
        Some(Err(e)) => {
            tracing::warn!("Cannot read snapshot {}: {}", path.display(), e);
            return;
        }
        None => return,
    }

    for chunk in chunks {
        let bytes = match chunk {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!("Snapshot read aborted in {}: {}", path.display(), e);
                return;
            }
        };

        let Ok(line) = String::from_utf8(bytes) else {
            tracing::warn!("Skipping non UTF-8 snapshot row in {}", path.display());
            continue;
        };

        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        if !visit(line) {
            return;
        }
    }
}
