extern crate clap;
extern crate electionstats;
extern crate log4rs;
#[macro_use]
extern crate log;

use std::io;
use std::path::{Path, PathBuf};

use clap::{App, Arg};
use electionstats::aggregate;
use electionstats::configuration;
use electionstats::error::Error;
use electionstats::menu::{ExitActions, Menu};
use electionstats::query::ElectionQueries;
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

fn init_logging(level: LevelFilter) -> Result<(), Error> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{d(%H:%M:%S)} {h({l:5})} {m}{n}")))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))
        .map_err(|e| Error::Logging(e.to_string()))?;
    log4rs::init_config(config).map_err(|e| Error::Logging(e.to_string()))?;
    Ok(())
}

fn run() -> Result<(), Error> {
    let matches = App::new("electionstats")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Explore party and constituency totals from a general election results CSV")
        .arg(
            Arg::with_name("INPUT")
                .help("results CSV, optionally gzipped")
                .default_value("EditedData.csv")
                .index(1),
        )
        .arg(
            Arg::with_name("config")
                .long("config")
                .short("c")
                .takes_value(true)
                .help("TOML file describing columns and outputs"),
        )
        .arg(
            Arg::with_name("summary")
                .long("summary")
                .takes_value(true)
                .help("where to write the statistics summary"),
        )
        .arg(
            Arg::with_name("chart")
                .long("chart")
                .takes_value(true)
                .help("where to write the pie chart (.svg or .json)"),
        )
        .arg(
            Arg::with_name("no-chart")
                .long("no-chart")
                .conflicts_with("chart")
                .help("don't write a pie chart on exit"),
        )
        .arg(
            Arg::with_name("verbose")
                .long("verbose")
                .short("v")
                .help("log debugging output"),
        )
        .get_matches();

    let level = if matches.is_present("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    init_logging(level)?;

    let mut config = configuration::read_config(matches.value_of("config").map(Path::new))?;
    if let Some(summary) = matches.value_of("summary") {
        config.output.summary = PathBuf::from(summary);
    }
    if let Some(chart) = matches.value_of("chart") {
        config.output.chart = Some(PathBuf::from(chart));
    }
    if matches.is_present("no-chart") {
        config.output.chart = None;
    }

    let input = matches.value_of("INPUT").unwrap_or("EditedData.csv");
    let (data, report) = aggregate::ingest(Path::new(input), &config);
    if let Some(ref e) = report.source_error {
        println!("Error: The file {} could not be read ({}).", input, e);
    }

    let exit = ExitActions {
        summary: config.output.summary.clone(),
        chart: config.output.chart.clone(),
        top_parties: config.output.top_parties,
    };
    let stdin = io::stdin();
    let mut menu = Menu::new(ElectionQueries::new(&data), stdin.lock(), io::stdout(), exit);
    menu.run()?;
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        error!("{}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
