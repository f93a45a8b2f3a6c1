use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::models::ScoredCandidate;
use super::{SnapshotError, SNAPSHOT_HEADER};

/// Overwrite `path` with the header and one row per ranked candidate
///
/// Rows are written in the given order. Missing parent directories are
/// created. Returns the number of data rows written.
pub fn write_snapshot(path: &Path, ranked: &[ScoredCandidate]) -> Result<usize, SnapshotError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| SnapshotError::CreateDir {
            path: parent.display().to_string(),
            source,
        })?;
    }

    let write_err = |source| SnapshotError::Write {
        path: path.display().to_string(),
        source,
    };

    let file = File::create(path).map_err(write_err)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "{}", SNAPSHOT_HEADER).map_err(write_err)?;
    for scored in ranked {
        let c = &scored.candidate;
        writeln!(
            writer,
            "{},{},{},{},{}",
            c.name,
            c.breed,
            c.pet_type,
            format_percentage(scored.score),
            c.image_path,
        )
        .map_err(write_err)?;
    }

    // Surface flush errors instead of losing them in Drop
    writer.flush().map_err(write_err)?;
    writer.get_ref().sync_all().map_err(write_err)?;

    Ok(ranked.len())
}

/// Render a `[0, 1]` score as a whole percentage, rounding half up (`0.755` -> `76%`)
pub fn format_percentage(score: f64) -> String {
    format!("{}%", to_percent(score))
}

/// Whole percentage for a score; the epsilon absorbs binary representation error at .5
pub(crate) fn to_percent(score: f64) -> u8 {
    let score = if score.is_finite() { score.clamp(0.0, 1.0) } else { 0.0 };
    (score * 100.0 + 0.5 + 1e-9).floor() as u8
}
