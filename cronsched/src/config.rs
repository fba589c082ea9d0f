//! Job schedule configuration.
//!
//! A periodic-task runner keys each job by name and gives it either a cron
//! expression or `manual`, meaning the job only runs when triggered:
//!
//! ```toml
//! [jobs.certificate_cleanup]
//! schedule = "0 12 * * *"
//!
//! [jobs.inactive_consumer_cleaner]
//! schedule = "manual"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use jiff::Zoned;
use serde::Deserialize;
use tracing::debug;

use crate::error::ScheduleError;
use crate::schedule::Schedule;

/// Schedule value for jobs that never run automatically.
pub const MANUAL_SCHEDULE: &str = "manual";

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {source}")]
    Parse {
        #[from]
        source: toml::de::Error,
    },

    #[error("invalid schedule for job '{job}': {source}")]
    InvalidSchedule {
        job: String,
        #[source]
        source: ScheduleError,
    },
}

/// How a configured job is triggered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobSchedule {
    Manual,
    Cron(Schedule),
}

impl JobSchedule {
    /// `manual` (any case) or a cron expression.
    pub fn parse(input: &str) -> Result<Self, ScheduleError> {
        if input.trim().eq_ignore_ascii_case(MANUAL_SCHEDULE) {
            Ok(JobSchedule::Manual)
        } else {
            Schedule::parse(input).map(JobSchedule::Cron)
        }
    }

    pub fn as_schedule(&self) -> Option<&Schedule> {
        match self {
            JobSchedule::Manual => None,
            JobSchedule::Cron(schedule) => Some(schedule),
        }
    }
}

fn default_enabled() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawJob {
    schedule: String,
    #[serde(default = "default_enabled")]
    enabled: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    jobs: BTreeMap<String, RawJob>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobConfig {
    pub schedule: JobSchedule,
    pub enabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchedulerConfig {
    pub jobs: BTreeMap<String, JobConfig>,
}

impl SchedulerConfig {
    /// Parse a TOML document. Every schedule is validated here, so a bad
    /// expression fails the whole load and names its job.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(contents)?;
        let jobs = raw
            .jobs
            .into_iter()
            .map(|(job, entry)| {
                let schedule = JobSchedule::parse(&entry.schedule)
                    .map_err(|source| ConfigError::InvalidSchedule {
                        job: job.clone(),
                        source,
                    })?;
                Ok((
                    job,
                    JobConfig {
                        schedule,
                        enabled: entry.enabled,
                    },
                ))
            })
            .collect::<Result<_, ConfigError>>()?;
        Ok(Self { jobs })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&contents)?;
        debug!(path = %path.display(), jobs = config.jobs.len(), "loaded scheduler config");
        Ok(config)
    }

    /// Enabled jobs with a cron schedule, in name order.
    pub fn scheduled_jobs(&self) -> impl Iterator<Item = (&str, &Schedule)> {
        self.jobs
            .iter()
            .filter(|(_, job)| job.enabled)
            .filter_map(|(name, job)| Some((name.as_str(), job.schedule.as_schedule()?)))
    }

    /// Next run of every scheduled job after `now`. Errors are reported per
    /// job so the caller can disable the offending one.
    pub fn next_runs(&self, now: &Zoned) -> Vec<(&str, Result<Zoned, ScheduleError>)> {
        self.scheduled_jobs()
            .map(|(name, schedule)| (name, schedule.next_occurrence_from(now)))
            .collect()
    }
}
