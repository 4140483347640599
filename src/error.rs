use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Why a single `TEMP` record could not be turned into a reading.
#[derive(Debug, Error, Diagnostic, Clone, PartialEq)]
pub enum RecordError {
    #[error("Missing field #{index} ({field})")]
    #[diagnostic(code(stem_temp::record::missing_field))]
    MissingField { index: usize, field: &'static str },
    #[error("Bad {field}: `{raw}` is not an integer")]
    #[diagnostic(code(stem_temp::record::bad_integer))]
    BadInteger { field: &'static str, raw: String },
    #[error("Bad {field}: `{raw}` is not a number")]
    #[diagnostic(code(stem_temp::record::bad_float))]
    BadFloat { field: &'static str, raw: String },
    #[error("Fraction of day {fraction} is outside [0, 1)")]
    #[diagnostic(code(stem_temp::record::time_of_day))]
    TimeOfDayOutOfRange { fraction: f64 },
}

/// A failed [`Dataset::load`](crate::Dataset::load). The dataset keeps whatever it held before.
#[derive(Debug, Error, Diagnostic)]
pub enum LoadError {
    #[error("Unable to open {}", path.display())]
    #[diagnostic(
        code(stem_temp::load::source_unavailable),
        help("check the filename and try again")
    )]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Unable to read line {line}")]
    #[diagnostic(code(stem_temp::load::unreadable))]
    Unreadable {
        line: usize,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed temperature record on line {line}")]
    #[diagnostic(
        code(stem_temp::load::malformed_record),
        help("a TEMP line needs `day,fraction_of_day,sensor_id,TEMP,temperature`")
    )]
    MalformedRecord {
        line: usize,
        #[source]
        #[diagnostic_source]
        source: RecordError,
    },
}

#[derive(Debug, Error, Diagnostic, Clone, PartialEq, Eq)]
pub enum NameError {
    #[error("Name must be between 3 and 20 characters, `{name}` has {len}")]
    #[diagnostic(code(stem_temp::dataset::invalid_name))]
    InvalidName { name: String, len: usize },
}
