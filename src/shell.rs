use std::{
    io::{self, BufRead, Write},
    str::FromStr,
};

use time::Time;

use crate::{
    dataset::Dataset,
    sensor::{SensorFilter, SensorTable},
    unit::TemperatureUnit,
};

const TITLE: &str = "STEM Center Temperature Project";
const NOT_A_NUMBER: &str = "*** Please enter a number only ***";
const NOTHING_TO_SHOW: &str = "Please load data file and make sure at least one sensor is active";

const MENU: &str = "
Main Menu
---------
1 - Process a new data file
2 - Choose unit
3 - Edit room filter
4 - Show summary statistics
5 - Show temperature by date and time
6 - Quit
";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    LoadFile,
    ChooseUnit,
    EditFilter,
    SummaryStatistics,
    TemperatureAt,
    Quit,
}

impl TryFrom<u32> for Choice {
    type Error = u32;

    fn try_from(n: u32) -> Result<Self, Self::Error> {
        match n {
            1 => Ok(Self::LoadFile),
            2 => Ok(Self::ChooseUnit),
            3 => Ok(Self::EditFilter),
            4 => Ok(Self::SummaryStatistics),
            5 => Ok(Self::TemperatureAt),
            6 => Ok(Self::Quit),
            n => Err(n),
        }
    }
}

enum Flow {
    Continue,
    Exit,
}

/// Menu-driven front end over a [`Dataset`].
///
/// Reads answers line by line from `input` and writes everything to `output`. Running out of
/// input ends the session the same way choosing quit does.
pub struct Shell<R, W> {
    input: R,
    output: W,
    dataset: Dataset,
    sensors: SensorTable,
    filter: SensorFilter,
    unit: TemperatureUnit,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    /// A shell over the STEM Center sensors, all of them active.
    pub fn new(input: R, output: W) -> Self {
        let sensors = SensorTable::default();
        let filter = sensors.all_active();
        Self {
            input,
            output,
            dataset: Dataset::new(),
            sensors,
            filter,
            unit: TemperatureUnit::default(),
        }
    }

    pub fn with_dataset(mut self, dataset: Dataset) -> Self {
        self.dataset = dataset;
        self
    }

    pub fn with_unit(mut self, unit: TemperatureUnit) -> Self {
        self.unit = unit;
        self
    }

    pub fn with_sensors(mut self, sensors: SensorTable) -> Self {
        self.filter = sensors.all_active();
        self.sensors = sensors;
        self
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn filter(&self) -> &SensorFilter {
        &self.filter
    }

    pub fn unit(&self) -> TemperatureUnit {
        self.unit
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "{TITLE}")?;

        loop {
            write!(self.output, "{MENU}")?;
            let Some(answer) = self.prompt("What is your choice? ")? else {
                break;
            };
            let flow = match answer.trim().parse::<u32>().map(Choice::try_from) {
                Err(_) => {
                    writeln!(self.output, "{NOT_A_NUMBER}")?;
                    Flow::Continue
                }
                Ok(Err(n)) => {
                    writeln!(self.output, "Invalid choice {n}")?;
                    Flow::Continue
                }
                Ok(Ok(choice)) => {
                    log::debug!("menu choice {choice:?}");
                    match choice {
                        Choice::LoadFile => self.load_file()?,
                        Choice::ChooseUnit => self.choose_unit()?,
                        Choice::EditFilter => self.edit_filter()?,
                        Choice::SummaryStatistics => self.summary_statistics()?,
                        Choice::TemperatureAt => self.temperature_at()?,
                        Choice::Quit => Flow::Exit,
                    }
                }
            };
            if let Flow::Exit = flow {
                break;
            }
            writeln!(self.output)?;
        }

        writeln!(self.output, "Thank you for using the {TITLE}")?;
        self.output.flush()
    }

    /// Writes `question` and reads one answer, `None` once the input is exhausted.
    fn prompt(&mut self, question: &str) -> io::Result<Option<String>> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        let len = answer.trim_end_matches(['\n', '\r']).len();
        answer.truncate(len);
        Ok(Some(answer))
    }

    /// Asks until the answer parses as a `T`.
    fn prompt_number<T: FromStr>(&mut self, question: &str) -> io::Result<Option<T>> {
        loop {
            let Some(answer) = self.prompt(question)? else {
                return Ok(None);
            };
            match answer.trim().parse() {
                Ok(n) => return Ok(Some(n)),
                Err(_) => writeln!(self.output, "{NOT_A_NUMBER}")?,
            }
        }
    }

    fn load_file(&mut self) -> io::Result<Flow> {
        let Some(filename) = self.prompt("Please enter the filename of the new dataset: ")? else {
            return Ok(Flow::Exit);
        };

        let count = match self.dataset.load(filename.trim()) {
            Ok(count) => count,
            Err(e) => {
                writeln!(self.output, "Unable to load the file: {e}")?;
                writeln!(self.output, "Please check the filename and try again.")?;
                return Ok(Flow::Continue);
            }
        };
        writeln!(self.output, "Loaded {count} samples")?;

        loop {
            let Some(name) =
                self.prompt("Please provide a 3 to 20 character name for the dataset: ")?
            else {
                return Ok(Flow::Exit);
            };
            match self.dataset.set_name(name) {
                Ok(()) => {
                    writeln!(self.output, "Dataset name set to: {}", self.dataset.name())?;
                    return Ok(Flow::Continue);
                }
                Err(e) => writeln!(self.output, "Error: {e}")?,
            }
        }
    }

    fn choose_unit(&mut self) -> io::Result<Flow> {
        writeln!(self.output, "Current unit is {}", self.unit)?;
        writeln!(self.output, "Choose new unit:")?;
        for unit in TemperatureUnit::ALL {
            writeln!(self.output, "{} - {}", unit.index(), unit.name())?;
        }

        loop {
            let Some(n) = self.prompt_number::<u32>("Which unit? ")? else {
                return Ok(Flow::Exit);
            };
            match u8::try_from(n).ok().map(TemperatureUnit::try_from) {
                Some(Ok(unit)) => {
                    self.unit = unit;
                    return Ok(Flow::Continue);
                }
                _ => writeln!(self.output, "Please choose a valid unit from the list.")?,
            }
        }
    }

    fn print_filter(&mut self) -> io::Result<()> {
        for sensor in self.sensors.iter() {
            let status = if self.filter.contains(sensor.id) {
                "[ACTIVE]"
            } else {
                ""
            };
            let room = if sensor.is_outside() {
                "Out"
            } else {
                sensor.room.as_str()
            };
            let line = format!("{room}: {} {status}", sensor.label);
            writeln!(self.output, "{}", line.trim_end())?;
        }
        Ok(())
    }

    fn edit_filter(&mut self) -> io::Result<Flow> {
        loop {
            self.print_filter()?;
            let Some(answer) =
                self.prompt("\nType the sensor number to toggle (e.g., 4201) or x to end: ")?
            else {
                return Ok(Flow::Exit);
            };
            let room = answer.trim();
            if room.eq_ignore_ascii_case("x") {
                return Ok(Flow::Continue);
            }
            match self.sensors.lookup(room).map(|sensor| sensor.id) {
                Some(id) => {
                    let active = self.filter.toggle(id);
                    log::debug!("sensor {id} active: {active}");
                }
                None => writeln!(self.output, "Invalid Sensor")?,
            }
        }
    }

    fn summary_statistics(&mut self) -> io::Result<Flow> {
        let symbol = self.unit.symbol();
        match self.dataset.summary_statistics(&self.filter, self.unit) {
            None => writeln!(self.output, "{NOTHING_TO_SHOW}")?,
            Some(summary) => {
                writeln!(self.output, "Summary statistics for {}", self.dataset.name())?;
                writeln!(self.output, "Minimum Temperature: {:.2} {symbol}", summary.min)?;
                writeln!(self.output, "Maximum Temperature: {:.2} {symbol}", summary.max)?;
                writeln!(self.output, "Average Temperature: {:.2} {symbol}", summary.mean)?;
            }
        }
        Ok(Flow::Continue)
    }

    fn temperature_at(&mut self) -> io::Result<Flow> {
        if !self.dataset.is_loaded() || self.filter.is_empty() {
            writeln!(self.output, "{NOTHING_TO_SHOW}")?;
            return Ok(Flow::Continue);
        }

        let Some(day) = self.prompt_number::<i64>("Which day? ")? else {
            return Ok(Flow::Exit);
        };
        let at = loop {
            let Some(hour) = self.prompt_number::<u32>("Which hour (0-23)? ")? else {
                return Ok(Flow::Exit);
            };
            match u8::try_from(hour).map(|hour| Time::from_hms(hour, 0, 0)) {
                Ok(Ok(at)) => break at,
                _ => writeln!(self.output, "Invalid hour {hour}, expecting 0 to 23")?,
            }
        };

        let hour = at.hour();
        match self.dataset.average_at(&self.filter, day, hour, self.unit) {
            Some(average) => writeln!(
                self.output,
                "Average temperature on day {day} at {hour:02}:00: {average:.2} {}",
                self.unit.symbol()
            )?,
            None => writeln!(
                self.output,
                "No readings on day {day} at {hour:02}:00 for the active sensors"
            )?,
        }
        Ok(Flow::Continue)
    }
}
