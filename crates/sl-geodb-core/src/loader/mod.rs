// crates/sl-geodb-core/src/loader/mod.rs

//! # Data Loader
//!
//! Handles the physical layer (file access, decompression) and turns a CSV
//! table into sanitized [`FlatRecord`]s.
//!
//! The table needs a header row. Columns are matched case-insensitively;
//! `region` (or `province`) and `town` (or `village`) are required, while
//! `district`, `council`, `chiefdom` and `section` may be missing and then
//! read as empty. Extra columns are ignored.

use crate::error::{GeoError, Result};
use crate::model::{FlatRecord, LocationKind};
use crate::sanitize::Sanitizer;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

mod common_io;

pub use common_io::{is_gzip_path, open_stream};

/// File name of the bundled dataset inside [`default_data_dir`].
pub const DEFAULT_DATASET: &str = "sl_locations.csv";

/// `data/` next to this crate's manifest.
pub fn default_data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

/// Full path of the bundled dataset.
pub fn default_dataset_path() -> PathBuf {
    default_data_dir().join(DEFAULT_DATASET)
}

/// Column position of every kind, `None` when the table lacks it.
#[derive(Debug, Default)]
struct Columns([Option<usize>; 6]);

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let mut cols = Columns::default();
        for (pos, header) in headers.iter().enumerate() {
            let Ok(kind) = header.parse::<LocationKind>() else {
                continue;
            };
            let slot = &mut cols.0[kind as usize];
            if slot.is_none() {
                *slot = Some(pos);
            }
        }
        for required in [LocationKind::Region, LocationKind::Town] {
            if cols.0[required as usize].is_none() {
                return Err(GeoError::Format(format!(
                    "missing required column '{required}'"
                )));
            }
        }
        Ok(cols)
    }

    fn get<'r>(&self, row: &'r csv::StringRecord, kind: LocationKind) -> &'r str {
        self.0[kind as usize]
            .and_then(|pos| row.get(pos))
            .unwrap_or("")
    }
}

/// Parse CSV from `reader`, passing every field through `sanitizer`.
///
/// Rows missing a region or town, or with a field the sanitizer rejects, are
/// skipped.
#[instrument(skip_all)]
pub fn load_records_from_reader<R: Read>(
    reader: R,
    sanitizer: &dyn Sanitizer,
) -> Result<Vec<FlatRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let cols = Columns::from_headers(&headers)?;

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for (line, row) in rdr.records().enumerate() {
        let row = row?;
        let mut fields: [String; 6] = Default::default();
        let mut rejected = false;

        for kind in LocationKind::ALL {
            match sanitizer.sanitize(cols.get(&row, kind)) {
                Ok(v) => fields[kind as usize] = v,
                Err(e) => {
                    debug!(line = line + 2, %kind, error = %e, "field rejected");
                    rejected = true;
                    break;
                }
            }
        }

        let [region, district, council, chiefdom, section, town] = fields;
        let record = FlatRecord {
            region,
            district,
            council,
            chiefdom,
            section,
            town,
        };
        if rejected || !record.has_region_and_town() {
            skipped += 1;
            continue;
        }
        records.push(record);
    }

    if skipped > 0 {
        warn!(skipped, "skipped rows without a usable region and town");
    }
    info!(records = records.len(), "loaded location records");
    Ok(records)
}

/// Load records from a CSV file, gzip-compressed when it ends in `.gz`.
pub fn load_records_from_path(
    path: impl AsRef<Path>,
    sanitizer: &dyn Sanitizer,
) -> Result<Vec<FlatRecord>> {
    let path = path.as_ref();
    debug!(path = %path.display(), "opening dataset");
    let stream = open_stream(path)?;
    load_records_from_reader(stream, sanitizer)
}
