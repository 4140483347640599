use std::{io, path::PathBuf};

use miette::IntoDiagnostic;
use stem_temp::{Dataset, Shell, TemperatureUnit};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "stem-temp", about = "Explore the STEM Center temperature logs")]
struct Opt {
    /// Data file to load before the menu starts
    #[structopt(short, long, parse(from_os_str))]
    file: Option<PathBuf>,
    /// Name of the preloaded dataset (3 to 20 characters)
    #[structopt(short, long)]
    name: Option<String>,
    /// Initial display unit: celsius, fahrenheit or kelvin
    #[structopt(short, long, default_value = "celsius")]
    unit: TemperatureUnit,
    /// Log debug messages, unless `RUST_LOG` says otherwise
    #[structopt(short, long)]
    verbose: bool,
}

fn main() -> miette::Result<()> {
    let opt = Opt::from_args();

    let level = if opt.verbose { "debug" } else { "error" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let mut dataset = Dataset::new();
    if let Some(path) = &opt.file {
        let count = dataset.load(path)?;
        println!("Loaded {count} samples");
    }
    if let Some(name) = opt.name {
        dataset.set_name(name)?;
    }

    let stdin = io::stdin();
    let mut shell = Shell::new(stdin.lock(), io::stdout())
        .with_dataset(dataset)
        .with_unit(opt.unit);
    shell.run().into_diagnostic()
}
