use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::films::FilmRecord;
use crate::ratings::RatingSummary;

pub const FILM_HEADERS: [&str; 6] = [
    "Winner",
    "Wins",
    "Film Name",
    "Film ID",
    "Film Slug",
    "Film Link",
];
pub const RATING_HEADERS: [&str; 3] = ["Film Title", "Average Rating", "Number of Ratings"];

/// Encode rows as CSV. The header row is always written, even with no rows.
fn render<T: Serialize>(headers: &[&str], rows: &[T]) -> Result<Vec<u8>> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    wtr.write_record(headers)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV buffer: {}", e.error()))
}

pub fn render_films(rows: &[FilmRecord]) -> Result<Vec<u8>> {
    render(&FILM_HEADERS, rows)
}

pub fn render_ratings(rows: &[RatingSummary]) -> Result<Vec<u8>> {
    render(&RATING_HEADERS, rows)
}

pub fn write(path: &Path, csv: &[u8]) -> Result<()> {
    fs::write(path, csv).with_context(|| format!("Failed to write {}", path.display()))
}

/// Write every table to a sibling `.tmp` file, then rename them all into
/// place. A failed write removes what was staged and leaves no table behind.
pub fn write_all(tables: &[(&Path, &[u8])]) -> Result<()> {
    let mut staged: Vec<(PathBuf, &Path)> = Vec::with_capacity(tables.len());
    for &(path, csv) in tables {
        let tmp = staging_path(path);
        if let Err(e) = write(&tmp, csv) {
            for (tmp, _) in &staged {
                let _ = fs::remove_file(tmp);
            }
            return Err(e);
        }
        staged.push((tmp, path));
    }

    for (tmp, path) in staged {
        fs::rename(&tmp, path)
            .with_context(|| format!("Failed to move {} into place", path.display()))?;
    }
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

#[cfg(test)]
fn read<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let mut rdr = csv::Reader::from_path(path)?;
    rdr.deserialize::<T>().map(|r| r.map_err(Into::into)).collect()
}
