use std::{fmt, str::FromStr};

/// The temperature scales a reading can be displayed in.
///
/// Readings are always stored in [`TemperatureUnit::Celsius`], other units only exist at query time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum TemperatureUnit {
    #[default]
    Celsius = 0,
    Fahrenheit = 1,
    Kelvin = 2,
}

const ZERO_CELSIUS_IN_KELVIN: f64 = 273.15;

impl TemperatureUnit {
    pub const ALL: [TemperatureUnit; 3] = [Self::Celsius, Self::Fahrenheit, Self::Kelvin];

    pub fn name(self) -> &'static str {
        match self {
            Self::Celsius => "Celsius",
            Self::Fahrenheit => "Fahrenheit",
            Self::Kelvin => "Kelvin",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Celsius => "C",
            Self::Fahrenheit => "F",
            Self::Kelvin => "K",
        }
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    /// Converts `value`, expressed in `self`, into `to`.
    ///
    /// Converting into the same unit returns `value` untouched.
    pub fn convert(self, value: f64, to: Self) -> f64 {
        use TemperatureUnit::*;

        if self == to {
            return value;
        }

        match (self, to) {
            (Celsius, Fahrenheit) => value * 9.0 / 5.0 + 32.0,
            (Celsius, Kelvin) => value + ZERO_CELSIUS_IN_KELVIN,
            (Fahrenheit, Celsius) => (value - 32.0) * 5.0 / 9.0,
            (Fahrenheit, Kelvin) => (value - 32.0) * 5.0 / 9.0 + ZERO_CELSIUS_IN_KELVIN,
            (Kelvin, Celsius) => value - ZERO_CELSIUS_IN_KELVIN,
            (Kelvin, Fahrenheit) => (value - ZERO_CELSIUS_IN_KELVIN) * 9.0 / 5.0 + 32.0,
            (Celsius, Celsius) | (Fahrenheit, Fahrenheit) | (Kelvin, Kelvin) => value,
        }
    }
}

/// Free-function form of [`TemperatureUnit::convert`].
pub fn convert(value: f64, from: TemperatureUnit, to: TemperatureUnit) -> f64 {
    from.convert(value, to)
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for TemperatureUnit {
    type Error = String;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(Self::Celsius),
            1 => Ok(Self::Fahrenheit),
            2 => Ok(Self::Kelvin),
            n => Err(format!("Unknown temperature unit index {n}. Expecting 0, 1 or 2")),
        }
    }
}

impl FromStr for TemperatureUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "0" | "c" | "ºc" | "°c" | "celsius" => Ok(Self::Celsius),
            "1" | "f" | "ºf" | "°f" | "fahrenheit" => Ok(Self::Fahrenheit),
            "2" | "k" | "kelvin" => Ok(Self::Kelvin),
            _ => Err(format!(
                "Unknown temperature unit {s}. Expecting celsius, fahrenheit or kelvin"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn same_unit_is_identity() {
        for unit in TemperatureUnit::ALL {
            for v in [-40.0, 0.0, 21.47, 1e-12, f64::MAX] {
                assert_eq!(unit.convert(v, unit), v);
            }
        }
    }

    #[test]
    fn known_points() {
        use TemperatureUnit::*;

        assert_abs_diff_eq!(convert(100.0, Celsius, Fahrenheit), 212.0);
        assert_abs_diff_eq!(convert(-40.0, Fahrenheit, Celsius), -40.0);
        assert_abs_diff_eq!(convert(0.0, Celsius, Kelvin), 273.15);
        assert_abs_diff_eq!(convert(32.0, Fahrenheit, Kelvin), 273.15);
        assert_abs_diff_eq!(convert(0.0, Kelvin, Celsius), -273.15);
        assert_abs_diff_eq!(convert(273.15, Kelvin, Fahrenheit), 32.0, epsilon = 1e-9);
    }

    #[test]
    fn every_pair_round_trips() {
        for from in TemperatureUnit::ALL {
            for to in TemperatureUnit::ALL {
                for v in [-273.15, -40.0, 0.0, 16.55, 21.47, 28.42, 1000.0] {
                    let back = convert(convert(v, from, to), to, from);
                    assert_abs_diff_eq!(back, v, epsilon = 1e-9);
                }
            }
        }
    }

    #[test]
    fn parse_unit() {
        assert_eq!("ºC".parse::<TemperatureUnit>(), Ok(TemperatureUnit::Celsius));
        assert_eq!("Fahrenheit".parse::<TemperatureUnit>(), Ok(TemperatureUnit::Fahrenheit));
        assert_eq!("2".parse::<TemperatureUnit>(), Ok(TemperatureUnit::Kelvin));
        assert!("rankine".parse::<TemperatureUnit>().is_err());
        assert_eq!(TemperatureUnit::try_from(1), Ok(TemperatureUnit::Fahrenheit));
        assert!(TemperatureUnit::try_from(3).is_err());
    }
}
