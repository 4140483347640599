use logos::Logos;

use crate::error::RecordError;

/// Tag of the only record type kept from a mixed instrument stream.
pub const TEMPERATURE_TAG: &str = "TEMP";

pub type SensorId = i64;

#[derive(Logos, Debug, PartialEq)]
#[logos(skip r"[ \t\r]+")] // Ignore this regex pattern between tokens
enum Token {
    #[regex(r"[-+]?[0-9]+")]
    Integer,
    #[regex(r"[-+]?([0-9]+\.[0-9]*|\.[0-9]+)([eE][-+]?[0-9]+)?")]
    #[regex(r"[-+]?[0-9]+[eE][-+]?[0-9]+")]
    Float,
    #[regex("[a-zA-Z]+")]
    Word,
}

/// Lexes a whole field, which must be exactly one token.
fn field_token(field: &str) -> Option<Token> {
    let mut lexer = Token::lexer(field);
    let token = lexer.next()?.ok()?;
    match lexer.next() {
        None => Some(token),
        Some(_) => None,
    }
}

fn integer_field(field: &'static str, raw: &str) -> Result<i64, RecordError> {
    let bad = || RecordError::BadInteger {
        field,
        raw: raw.to_string(),
    };
    match field_token(raw) {
        Some(Token::Integer) => raw.trim().parse().map_err(|_| bad()),
        _ => Err(bad()),
    }
}

fn float_field(field: &'static str, raw: &str) -> Result<f64, RecordError> {
    let bad = || RecordError::BadFloat {
        field,
        raw: raw.to_string(),
    };
    match field_token(raw) {
        Some(Token::Integer | Token::Float) => raw.trim().parse().map_err(|_| bad()),
        _ => Err(bad()),
    }
}

/// One temperature sample, stored in Celsius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub day: i64,
    /// Hour of the day, `0..=23`.
    pub time_slot: u8,
    pub sensor_id: SensorId,
    pub temperature: f64,
}

/// What a single source line turned out to be.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedLine {
    Reading(Reading),
    /// A well-formed line carrying some other instrument's record.
    Skipped { record_type: String },
}

/// Hour bucket of a fractional-day timestamp.
pub fn time_slot(fraction_of_day: f64) -> Result<u8, RecordError> {
    if !(0.0..1.0).contains(&fraction_of_day) {
        return Err(RecordError::TimeOfDayOutOfRange {
            fraction: fraction_of_day,
        });
    }
    // fraction < 1 keeps the slot in 0..=23
    Ok((fraction_of_day * 24.0).floor() as u8)
}

impl Reading {
    /// Parses `day,fraction_of_day,sensor_id,record_type,temperature[,...]`.
    ///
    /// The record type is checked before anything else, so a line of another type is skipped
    /// even when its other fields would not parse. The tag must match exactly, padding included.
    pub fn parse(line: &str) -> Result<ParsedLine, RecordError> {
        let fields: Vec<&str> = line.trim().split(',').collect();
        let field = |index: usize, name: &'static str| {
            fields
                .get(index)
                .copied()
                .ok_or(RecordError::MissingField { index, field: name })
        };

        let record_type = field(3, "record type")?;
        if record_type != TEMPERATURE_TAG {
            return Ok(ParsedLine::Skipped {
                record_type: record_type.to_string(),
            });
        }

        let day = integer_field("day", field(0, "day")?)?;
        let fraction = float_field("fraction of day", field(1, "fraction of day")?)?;
        let sensor_id = integer_field("sensor id", field(2, "sensor id")?)?;
        let temperature = float_field("temperature", field(4, "temperature")?)?;

        Ok(ParsedLine::Reading(Reading {
            day,
            time_slot: time_slot(fraction)?,
            sensor_id,
            temperature,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(line: &str) -> Reading {
        match Reading::parse(line) {
            Ok(ParsedLine::Reading(r)) => r,
            other => panic!("expected a reading from {line:?}, got {other:?}"),
        }
    }

    #[test]
    fn parse_temp_line() {
        let r = reading("5,0.2916666666666667,1,TEMP,20.5,extra,fields");
        assert_eq!(
            r,
            Reading {
                day: 5,
                time_slot: 7,
                sensor_id: 1,
                temperature: 20.5,
            }
        );
    }

    #[test]
    fn slot_boundaries() {
        assert_eq!(time_slot(7.0 / 24.0), Ok(7));
        assert_eq!(time_slot(0.99), Ok(23));
        assert_eq!(time_slot(0.0), Ok(0));
        assert!(time_slot(1.0).is_err());
        assert!(time_slot(-0.01).is_err());
    }

    #[test]
    fn other_record_types_are_skipped() {
        assert_eq!(
            Reading::parse("4,0.5,2,HUMIDITY,not-a-number"),
            Ok(ParsedLine::Skipped {
                record_type: String::from("HUMIDITY")
            })
        );
        // fields before the tag are not looked at either
        assert!(matches!(
            Reading::parse("day,?,?,LIGHT"),
            Ok(ParsedLine::Skipped { .. })
        ));
    }

    #[test]
    fn blank_lines_are_missing_fields() {
        for line in ["", "  \r"] {
            assert_eq!(
                Reading::parse(line),
                Err(RecordError::MissingField {
                    index: 3,
                    field: "record type"
                })
            );
        }
    }

    #[test]
    fn padded_tag_is_another_record_type() {
        assert_eq!(
            Reading::parse("1,0.1,1, TEMP ,10"),
            Ok(ParsedLine::Skipped {
                record_type: String::from(" TEMP ")
            })
        );
        assert!(matches!(
            Reading::parse("1,0.1,1,temp,10"),
            Ok(ParsedLine::Skipped { .. })
        ));
    }

    #[test]
    fn whitespace_and_exponents() {
        let r = reading(" 3 , .5 , 4,TEMP, 2.1e1 \r");
        assert_eq!(r.day, 3);
        assert_eq!(r.time_slot, 12);
        assert_eq!(r.sensor_id, 4);
        assert_eq!(r.temperature, 21.0);

        assert_eq!(reading("1,0.1,0,TEMP,-7").temperature, -7.0);
    }

    #[test]
    fn malformed_temp_lines() {
        assert_eq!(
            Reading::parse("1,0.1"),
            Err(RecordError::MissingField {
                index: 3,
                field: "record type"
            })
        );
        assert_eq!(
            Reading::parse("1,0.1,2,TEMP"),
            Err(RecordError::MissingField {
                index: 4,
                field: "temperature"
            })
        );
        assert_eq!(
            Reading::parse("1.5,0.1,2,TEMP,20"),
            Err(RecordError::BadInteger {
                field: "day",
                raw: String::from("1.5")
            })
        );
        assert!(matches!(
            Reading::parse("1,0.1,two,TEMP,20"),
            Err(RecordError::BadInteger {
                field: "sensor id",
                ..
            })
        ));
        assert!(matches!(
            Reading::parse("1,0.1,2,TEMP,warm"),
            Err(RecordError::BadFloat {
                field: "temperature",
                ..
            })
        ));
        assert!(matches!(
            Reading::parse("1,0.1,2,TEMP,20 21"),
            Err(RecordError::BadFloat { .. })
        ));
        assert!(matches!(
            Reading::parse("1,1.5,2,TEMP,20"),
            Err(RecordError::TimeOfDayOutOfRange { .. })
        ));
    }
}
