use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use cronsched::config::{JobSchedule, SchedulerConfig};
use cronsched::Schedule;
use jiff::civil::DateTime;
use jiff::tz::TimeZone;
use jiff::Zoned;
use tracing::{debug, warn, Level};
use tracing_subscriber::FmtSubscriber;

const MAX_OCCURRENCES: u32 = 1000;

#[derive(Parser)]
#[command(name = "cronsched", about = "Five-field cron schedules", version)]
struct Cli {
    /// Cron expression (e.g., "0 9 * * 1-5")
    expression: Option<String>,

    /// Number of occurrences to show
    #[arg(short, long, default_value = "1")]
    n: u32,

    /// Reference time (e.g., "2024-01-01T09:00:00+00:00[UTC]" or
    /// "2024-01-01T09:00:00" in the system time zone); defaults to now
    #[arg(long)]
    from: Option<String>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Validate expression without computing
    #[arg(long)]
    check: bool,

    /// Show parsed schedule as JSON
    #[arg(long)]
    parse: bool,

    /// Show the next run of every job in a TOML schedule file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log evaluation details to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let now = match cli.from.as_deref() {
        Some(s) => match parse_reference(s) {
            Ok(z) => z,
            Err(e) => {
                eprintln!("error: invalid --from '{s}': {e}");
                process::exit(1);
            }
        },
        None => Zoned::now(),
    };
    debug!(reference = %now, "resolved reference time");

    if let Some(ref path) = cli.config {
        process::exit(run_config(path, &now, cli.json));
    }

    let expression = match cli.expression {
        Some(ref expr) => expr.as_str(),
        None => {
            eprintln!("error: no expression provided");
            process::exit(2);
        }
    };

    let schedule = match Schedule::parse(expression) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{}", e.display_rich());
            process::exit(1);
        }
    };

    if cli.check {
        println!("\u{2713} valid");
        process::exit(0);
    }

    if cli.parse {
        match serde_json::to_string_pretty(&schedule) {
            Ok(json) => {
                println!("{json}");
                process::exit(0);
            }
            Err(e) => {
                eprintln!("error: failed to serialize: {e}");
                process::exit(1);
            }
        }
    }

    // Default: compute next N occurrences
    let mut n = cli.n;
    if n > MAX_OCCURRENCES {
        warn!(requested = n, "capped at {MAX_OCCURRENCES} occurrences");
        n = MAX_OCCURRENCES;
    }

    let results = match schedule.next_n_from(&now, n as usize) {
        Ok(results) => results,
        Err(e) => {
            eprintln!("{}", e.display_rich());
            process::exit(1);
        }
    };

    if cli.json {
        let iso_strings: Vec<String> = results.iter().map(|z| z.to_string()).collect();
        print_json(&iso_strings);
    } else {
        for z in &results {
            println!("{z}");
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("warning: failed to install log subscriber: {e}");
    }
}

/// A zoned datetime, or a civil one placed in the system time zone.
fn parse_reference(s: &str) -> Result<Zoned, jiff::Error> {
    match s.parse::<Zoned>() {
        Ok(z) => Ok(z),
        Err(_) => s.parse::<DateTime>()?.to_zoned(TimeZone::system()),
    }
}

/// Print the next run of every configured job. Returns the exit status.
fn run_config(path: &Path, now: &Zoned, json: bool) -> i32 {
    let config = match SchedulerConfig::load(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return 1;
        }
    };

    let mut status = 0;
    let mut rows: Vec<(String, Option<String>)> = Vec::with_capacity(config.jobs.len());
    for (name, job) in &config.jobs {
        let next = match (&job.schedule, job.enabled) {
            (_, false) => Some("disabled".to_string()),
            (JobSchedule::Manual, true) => Some("manual".to_string()),
            (JobSchedule::Cron(schedule), true) => match schedule.next_occurrence_from(now) {
                Ok(z) => Some(z.to_string()),
                Err(e) => {
                    eprintln!("error: job '{name}': {e}");
                    status = 1;
                    None
                }
            },
        };
        rows.push((name.clone(), next));
    }

    if json {
        let map: serde_json::Map<String, serde_json::Value> = rows
            .into_iter()
            .map(|(name, next)| (name, next.map_or(serde_json::Value::Null, Into::into)))
            .collect();
        print_json(&map);
    } else {
        for (name, next) in rows {
            if let Some(next) = next {
                println!("{name}\t{next}");
            }
        }
    }
    status
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string(value) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("error: failed to serialize: {e}");
            process::exit(1);
        }
    }
}
