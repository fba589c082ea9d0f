//! Load a job schedule file and print when each job runs next.

use cronsched::config::{JobSchedule, SchedulerConfig};

const JOBS: &str = r#"
[jobs.certificate_cleanup]
schedule = "0 12 * * *"

[jobs.expired_pools_cleanup]
schedule = "0 */6 * * *"

[jobs.inactive_consumer_cleaner]
schedule = "manual"
"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = SchedulerConfig::from_toml_str(JOBS)?;
    let now = jiff::Zoned::now();

    for (name, next) in config.next_runs(&now) {
        match next {
            Ok(at) => println!("{name:<28} {at}"),
            Err(e) => println!("{name:<28} disabled: {e}"),
        }
    }

    let manual: Vec<&str> = config
        .jobs
        .iter()
        .filter(|(_, job)| job.schedule == JobSchedule::Manual)
        .map(|(name, _)| name.as_str())
        .collect();
    println!("\nManual only: {}", manual.join(", "));

    Ok(())
}
