use std::collections::BTreeSet;

use crate::record::SensorId;

/// The set of sensors taking part in a query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SensorFilter {
    active: BTreeSet<SensorId>,
}

impl SensorFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, sensor_id: SensorId) -> bool {
        self.active.contains(&sensor_id)
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Flips the sensor and returns whether it is active afterwards.
    pub fn toggle(&mut self, sensor_id: SensorId) -> bool {
        if self.active.remove(&sensor_id) {
            false
        } else {
            self.active.insert(sensor_id);
            true
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = SensorId> + '_ {
        self.active.iter().copied()
    }
}

impl FromIterator<SensorId> for SensorFilter {
    fn from_iter<I: IntoIterator<Item = SensorId>>(iter: I) -> Self {
        Self {
            active: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sensor {
    /// Room number, or `OUT` for the outdoor sensor.
    pub room: String,
    pub label: String,
    pub id: SensorId,
}

impl Sensor {
    pub fn is_outside(&self) -> bool {
        self.room.eq_ignore_ascii_case("OUT")
    }
}

/// Known sensors, kept in the order they are listed to the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorTable {
    sensors: Vec<Sensor>,
}

impl SensorTable {
    pub fn new(sensors: impl IntoIterator<Item = (&'static str, &'static str, SensorId)>) -> Self {
        Self {
            sensors: sensors
                .into_iter()
                .map(|(room, label, id)| Sensor {
                    room: room.to_string(),
                    label: label.to_string(),
                    id,
                })
                .collect(),
        }
    }

    /// Looks a sensor up by room number, `out` matches regardless of case.
    pub fn lookup(&self, room: &str) -> Option<&Sensor> {
        let room = room.trim();
        self.sensors.iter().find(|sensor| {
            if sensor.is_outside() {
                sensor.room.eq_ignore_ascii_case(room)
            } else {
                sensor.room == room
            }
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sensor> {
        self.sensors.iter()
    }

    /// A filter with every known sensor active.
    pub fn all_active(&self) -> SensorFilter {
        self.sensors.iter().map(|sensor| sensor.id).collect()
    }
}

impl Default for SensorTable {
    /// The STEM Center rooms.
    fn default() -> Self {
        Self::new([
            ("4201", "Foundations Lab", 1),
            ("4204", "CS Lab", 2),
            ("4205", "Tiled Room", 4),
            ("4213", "STEM Center", 0),
            ("4218", "Workshop Room", 3),
            ("OUT", "Outside", 5),
        ])
    }
}
