//! Temperature readings of the STEM Center sensors.
//!
//! A [`Dataset`] loads the `TEMP` records of a comma separated instrument log and answers
//! aggregate queries over a [`SensorFilter`], in any [`TemperatureUnit`].

mod dataset;
mod error;
mod record;
mod sensor;
mod shell;
mod unit;

pub use dataset::{Dataset, Summary, CANONICAL_UNIT, DEFAULT_NAME, NAME_LENGTH};
pub use error::{LoadError, NameError, RecordError};
pub use record::{time_slot, ParsedLine, Reading, SensorId, TEMPERATURE_TAG};
pub use sensor::{Sensor, SensorFilter, SensorTable};
pub use shell::Shell;
pub use unit::{convert, TemperatureUnit};
