//! Load and save indicator series as CSV
//!
//! One file per indicator, named after its collection (e.g. `ipca.csv`),
//! with the columns `year,month,day,value`.

use csv::{Reader, Writer};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use super::{InMemoryStore, RatePoint, RateSeries, RateSeriesStore};
use crate::error::Result;
use crate::indicator::Indicator;

/// Raw CSV row as stored by the registration tool
#[derive(Debug, Serialize, Deserialize)]
struct CsvRow {
    year: i32,
    month: u32,
    day: u32,
    value: f64,
}

impl CsvRow {
    fn to_point(&self) -> Result<RatePoint> {
        RatePoint::new(self.year, self.month, self.day, self.value)
    }

    fn from_point(point: &RatePoint) -> Self {
        Self {
            year: point.year(),
            month: point.month(),
            day: point.day(),
            value: point.rate_percent,
        }
    }
}

/// Path of an indicator's file inside a data directory
pub fn series_path(dir: &Path, indicator: Indicator) -> PathBuf {
    dir.join(format!("{}.csv", indicator.collection()))
}

/// Load one indicator's series from any reader (e.g. string buffer, network stream)
///
/// Rows may appear in any order; they are sorted by date before the
/// series invariants are checked.
pub fn load_series_from_reader<R: Read>(indicator: Indicator, reader: R) -> Result<RateSeries> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut points = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        points.push(row.to_point()?);
    }

    points.sort_by_key(|p| p.date);
    RateSeries::new(indicator, points)
}

/// Load one indicator's series from a CSV file
pub fn load_series<P: AsRef<Path>>(indicator: Indicator, path: P) -> Result<RateSeries> {
    let path = path.as_ref();
    let series = load_series_from_reader(indicator, File::open(path)?)?;
    debug!("Loaded {} {} records from {}", series.len(), indicator, path.display());
    Ok(series)
}

/// Load every indicator from `<dir>/<collection>.csv`
pub fn load_store(dir: &Path) -> Result<InMemoryStore> {
    let mut store = InMemoryStore::new();
    for indicator in Indicator::ALL {
        store.insert(load_series(indicator, series_path(dir, indicator))?);
    }
    info!("Loaded rate series for {} indicators from {}", Indicator::ALL.len(), dir.display());
    Ok(store)
}

/// Write a series to any writer in the stored CSV layout
pub fn write_series_to_writer<W: Write>(series: &RateSeries, writer: W) -> Result<()> {
    let mut csv_writer = Writer::from_writer(writer);
    for point in series.points() {
        csv_writer.serialize(CsvRow::from_point(point))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write a series to a CSV file, replacing its contents
pub fn save_series<P: AsRef<Path>>(series: &RateSeries, path: P) -> Result<()> {
    write_series_to_writer(series, File::create(path)?)
}

fn staging_path(path: &Path) -> PathBuf {
    let mut staged = path.as_os_str().to_owned();
    staged.push(".tmp");
    PathBuf::from(staged)
}

/// Save every indicator to `<dir>/<collection>.csv`
///
/// All files are first written next to their targets as `<collection>.csv.tmp`
/// and only renamed into place once every one was written, so a failed
/// write leaves the existing files untouched.
pub fn save_store<S: RateSeriesStore>(store: &S, dir: &Path) -> Result<()> {
    let mut staged = Vec::with_capacity(Indicator::ALL.len());

    for indicator in Indicator::ALL {
        let target = series_path(dir, indicator);
        let tmp = staging_path(&target);
        let written = store
            .snapshot(indicator)
            .and_then(|series| save_series(&series, &tmp));
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp);
            for (tmp, _) in &staged {
                let _ = fs::remove_file(tmp);
            }
            return Err(e);
        }
        staged.push((tmp, target));
    }

    for (tmp, target) in &staged {
        fs::rename(tmp, target)?;
    }
    info!("Saved rate series for {} indicators to {}", staged.len(), dir.display());
    Ok(())
}
