use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use super::PersistError;
use super::path::write_atomic;
use crate::types::{Point, PointId, Slot};

const HEADERS: [&str; 4] = ["id", "type", "x", "y"];

/// One table row. `fixed` is not stored: everything on disk was committed.
#[derive(Debug, Serialize, Deserialize)]
struct TableRow {
    id: u32,
    #[serde(rename = "type")]
    slot: Slot,
    x: f64,
    y: f64,
}

/// Points read back from the table, all fixed, plus the first free id.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedTable {
    pub points: Vec<Point>,
    pub next_id: PointId,
}

impl Default for LoadedTable {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            next_id: PointId::FIRST,
        }
    }
}

/// Overwrite the table with every point in store order.
pub fn save_points(path: &Path, points: &[Point]) -> Result<(), PersistError> {
    let csv_err = |source| PersistError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    wtr.write_record(HEADERS).map_err(csv_err)?;
    for p in points {
        wtr.serialize(TableRow {
            id: p.id.0,
            slot: p.slot,
            x: p.x,
            y: p.y,
        })
        .map_err(csv_err)?;
    }
    let bytes = wtr.into_inner().map_err(|err| PersistError::Io {
        path: path.to_path_buf(),
        source: err.into_error(),
    })?;
    write_atomic(path, &bytes).map_err(|source| PersistError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Create a header-only table (and its directory) if none exists yet.
///
/// Returns `true` when a new table was written.
pub fn ensure_table(path: &Path) -> Result<bool, PersistError> {
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| PersistError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    save_points(path, &[])?;
    Ok(true)
}

/// Read the table. A missing or empty file yields no points and next id 1.
pub fn load_points(path: &Path) -> Result<LoadedTable, PersistError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(LoadedTable::default()),
        Err(source) => {
            return Err(PersistError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    let parse_err = |row: u64, reason: String| PersistError::Parse {
        path: path.to_path_buf(),
        row,
        reason,
    };

    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(bytes.as_slice());
    let headers = rdr
        .headers()
        .map_err(|err| parse_err(1, err.to_string()))?
        .clone();
    if !headers.is_empty()
        && let Some(missing) = HEADERS.iter().find(|h| !headers.iter().any(|c| c == **h))
    {
        return Err(parse_err(1, format!("missing column `{missing}`")));
    }

    let mut points = Vec::new();
    let mut seen: HashSet<(PointId, Slot)> = HashSet::new();
    let mut next_id = PointId::FIRST;
    for (idx, result) in rdr.deserialize::<TableRow>().enumerate() {
        let fallback_row = u64::try_from(idx).unwrap_or(u64::MAX).saturating_add(2);
        let row = match result {
            Ok(row) => row,
            Err(err) if err.is_io_error() => {
                return Err(PersistError::Csv {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
            Err(err) => {
                let line = err.position().map_or(fallback_row, csv::Position::line);
                return Err(parse_err(line, err.to_string()));
            }
        };
        if row.id == 0 {
            return Err(parse_err(fallback_row, "id must be positive".to_string()));
        }
        if !row.x.is_finite() || !row.y.is_finite() {
            return Err(parse_err(
                fallback_row,
                format!("coordinate ({}, {}) is not finite", row.x, row.y),
            ));
        }
        let id = PointId(row.id);
        let successor = id.next().ok_or_else(|| {
            parse_err(fallback_row, format!("id {id} leaves no id for the next entry"))
        })?;
        if !seen.insert((id, row.slot)) {
            return Err(parse_err(
                fallback_row,
                format!("duplicate {} point for id {id}", row.slot),
            ));
        }
        next_id = next_id.max(successor);
        points.push(Point::fixed(id, row.slot, row.x, row.y));
    }

    Ok(LoadedTable { points, next_id })
}
