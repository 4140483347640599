use std::{
    fs::File,
    io::{BufRead, BufReader},
    ops::RangeInclusive,
    path::Path,
    time::Instant,
};

use crate::{
    error::{LoadError, NameError},
    record::{ParsedLine, Reading},
    sensor::SensorFilter,
    unit::TemperatureUnit,
};

pub const DEFAULT_NAME: &str = "Unnamed";
pub const NAME_LENGTH: RangeInclusive<usize> = 3..=20;

/// Unit every reading is stored in.
pub const CANONICAL_UNIT: TemperatureUnit = TemperatureUnit::Celsius;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl Summary {
    /// `None` when `temperatures` is empty.
    pub fn of(temperatures: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut temperatures = temperatures.into_iter();
        let first = temperatures.next()?;
        let (min, max, sum, count) = temperatures.fold(
            (first, first, first, 1usize),
            |(min, max, sum, count), t| (min.min(t), max.max(t), sum + t, count + 1),
        );
        Some(Self {
            min,
            max,
            mean: sum / count as f64,
        })
    }
}

/// A named set of temperature readings loaded from a single source.
///
/// Readings are only ever replaced wholesale by a successful [`Dataset::load`]. Until then the
/// dataset is empty and every query answers `None`.
#[derive(Debug, Clone)]
pub struct Dataset {
    name: String,
    readings: Option<Vec<Reading>>,
}

impl Default for Dataset {
    fn default() -> Self {
        Self {
            name: String::from(DEFAULT_NAME),
            readings: None,
        }
    }
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renames the dataset. On error the previous name is kept.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), NameError> {
        let name = name.into();
        let len = name.chars().count();
        if !NAME_LENGTH.contains(&len) {
            log::warn!("rejected dataset name {name:?} ({len} characters)");
            return Err(NameError::InvalidName { name, len });
        }
        self.name = name;
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.readings.is_some()
    }

    /// Readings in source order, empty until a load succeeds.
    pub fn readings(&self) -> &[Reading] {
        self.readings.as_deref().unwrap_or_default()
    }

    /// Number of readings of the last successful load, `None` if nothing was ever loaded.
    ///
    /// A source without any `TEMP` record loads fine and reports `Some(0)`.
    pub fn loaded_count(&self) -> Option<usize> {
        self.readings.as_ref().map(Vec::len)
    }

    /// Replaces the readings with the `TEMP` records of the file at `path`.
    ///
    /// Returns the number of loaded samples. Any failure leaves the dataset untouched.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<usize, LoadError> {
        let path = path.as_ref();
        log::info!("Loading {:?}...", path);
        let now = Instant::now();
        let file = File::open(path).map_err(|source| {
            log::warn!("cannot open {:?}: {source}", path);
            LoadError::SourceUnavailable {
                path: path.to_path_buf(),
                source,
            }
        })?;
        let count = self.load_from(BufReader::new(file))?;
        log::info!(
            "... loaded {count} samples in {}ms",
            now.elapsed().as_millis()
        );
        Ok(count)
    }

    /// Same as [`Dataset::load`] for an already opened source.
    pub fn load_from<R: BufRead>(&mut self, reader: R) -> Result<usize, LoadError> {
        let readings = read_readings(reader).map_err(|e| {
            log::warn!("load abandoned: {e}");
            e
        })?;
        let count = readings.len();
        self.readings = Some(readings);
        Ok(count)
    }

    /// Readings of active sensors, `None` if there is nothing to look at.
    fn active_readings<'a>(
        &'a self,
        filter: &'a SensorFilter,
    ) -> Option<impl Iterator<Item = &'a Reading> + 'a> {
        let readings = self.readings.as_ref()?;
        if filter.is_empty() {
            return None;
        }
        Some(
            readings
                .iter()
                .filter(move |reading| filter.contains(reading.sensor_id)),
        )
    }

    /// Minimum, maximum and mean temperature of the active sensors, expressed in `unit`.
    pub fn summary_statistics(
        &self,
        filter: &SensorFilter,
        unit: TemperatureUnit,
    ) -> Option<Summary> {
        let readings = self.active_readings(filter)?;
        Summary::of(readings.map(|reading| CANONICAL_UNIT.convert(reading.temperature, unit)))
    }

    /// Mean temperature of the active sensors during one hour of one day, expressed in `unit`.
    pub fn average_at(
        &self,
        filter: &SensorFilter,
        day: i64,
        time_slot: u8,
        unit: TemperatureUnit,
    ) -> Option<f64> {
        let readings = self
            .active_readings(filter)?
            .filter(|reading| reading.day == day && reading.time_slot == time_slot);
        Summary::of(readings.map(|reading| CANONICAL_UNIT.convert(reading.temperature, unit)))
            .map(|summary| summary.mean)
    }
}

/// Parses a whole source, stopping at the first malformed `TEMP` record.
fn read_readings<R: BufRead>(reader: R) -> Result<Vec<Reading>, LoadError> {
    let mut readings = Vec::new();
    let mut skipped = 0usize;

    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = line.map_err(|source| LoadError::Unreadable {
            line: line_number,
            source,
        })?;
        match Reading::parse(&line) {
            Ok(ParsedLine::Reading(reading)) => readings.push(reading),
            Ok(ParsedLine::Skipped { .. }) => skipped += 1,
            Err(source) => {
                return Err(LoadError::MalformedRecord {
                    line: line_number,
                    source,
                })
            }
        }
    }

    log::debug!("skipped {skipped} records of other types");
    Ok(readings)
}
