use coxeter_automata::prelude::*;

use tracing::{debug, error, info, trace};
use tracing_subscriber::{filter, prelude::*};

use clap::{Arg, ArgAction, ArgMatches, Command};

fn cli() -> clap::Command {
    Command::new("coxa")
        .about("Automata recognizing reduced words and shortlex normal forms in Coxeter groups")
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbosity")
                .num_args(0..=1)
                .require_equals(true)
                .value_parser(["info", "debug", "trace"])
                .default_missing_value("info"),
        )
        .arg(
            Arg::new("diagram")
                .short('d')
                .long("diagram")
                .required(true)
                .value_delimiter(',')
                .value_parser(clap::value_parser!(u32))
                .help("upper triangle of the Coxeter matrix in row-major order, 0 stands for infinity"),
        )
        .arg(
            Arg::new("mode")
                .short('m')
                .long("mode")
                .value_parser(["reduced", "shortlex"])
                .default_value("shortlex"),
        )
        .arg(
            Arg::new("no-minimize")
                .long("no-minimize")
                .action(ArgAction::SetTrue)
                .help("output the automaton as built from the minimal roots"),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .value_parser(["table", "dot", "words", "growth"])
                .default_value("table"),
        )
        .arg(
            Arg::new("length")
                .short('l')
                .long("length")
                .value_parser(clap::value_parser!(usize))
                .default_value("6")
                .help("maximal word length for the words and growth formats"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("additionally render the automaton with graphviz into the given PNG file"),
        )
}

fn setup_logging(matches: &ArgMatches) {
    let level = match matches
        .try_get_one::<String>("verbosity")
        .ok()
        .flatten()
        .map(|m| m.as_str())
    {
        Some("trace") => filter::LevelFilter::TRACE,
        Some("debug") => filter::LevelFilter::DEBUG,
        Some("info") => filter::LevelFilter::INFO,
        _ => filter::LevelFilter::WARN,
    };

    let stderr_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(stderr_log.with_filter(level))
        .init();

    trace!("setup {level} logging");
}

fn automaton(matches: &ArgMatches) -> Result<Dfa, ConfigError> {
    let diagram: Vec<u32> = matches
        .get_many::<u32>("diagram")
        .map(|values| values.copied().collect())
        .unwrap_or_default();
    let mode: Mode = matches
        .get_one::<String>("mode")
        .map(|m| m.as_str())
        .unwrap_or("shortlex")
        .parse()?;

    let matrix = CoxeterMatrix::from_diagram(&diagram)?;
    debug!("parsed Coxeter matrix of rank {}", matrix.rank());

    let start = std::time::Instant::now();
    let roots = MinimalRoots::of(&matrix)?;
    info!(
        "found {} minimal roots in {}µs",
        roots.len(),
        start.elapsed().as_micros()
    );

    let table = roots.into_table();
    let start = std::time::Instant::now();
    let dfa = build(&table, matrix.rank(), mode)?;
    info!(
        "built {mode} automaton with {} states in {}µs",
        dfa.size(),
        start.elapsed().as_micros()
    );

    if matches.get_flag("no-minimize") {
        return Ok(dfa);
    }
    let start = std::time::Instant::now();
    let minimized = dfa.minimize();
    info!(
        "minimized to {} states in {}µs",
        minimized.size(),
        start.elapsed().as_micros()
    );
    Ok(minimized)
}

pub fn main() {
    let matches = cli().get_matches();

    setup_logging(&matches);

    let dfa = match automaton(&matches) {
        Ok(dfa) => dfa,
        Err(e) => {
            error!("{e}");
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    if let Some(filename) = matches.get_one::<String>("output") {
        if let Err(e) = dfa.render_to_file_name(filename) {
            error!("{e}");
            eprintln!("error: could not render to {filename}: {e}");
            std::process::exit(1);
        }
        info!("rendered automaton to {filename}");
    }

    let length = matches.get_one::<usize>("length").copied().unwrap_or(6);
    match matches.get_one::<String>("format").map(|f| f.as_str()) {
        Some("dot") => println!("{}", dfa.dot_representation()),
        Some("words") => {
            for word in dfa.words_up_to(length) {
                println!("{}", word.show());
            }
        }
        Some("growth") => {
            let growth = dfa.growth(length);
            for (len, count) in growth.iter().enumerate() {
                println!("{len}\t{count}");
            }
            if growth.len() <= length {
                eprintln!(
                    "counts of words of length {} and above exceed 128 bits",
                    growth.len()
                );
            }
        }
        _ => println!("{dfa}"),
    }
}
