use super::SplitAppError;
use crate::config::{FailurePolicy, SplitAppConfiguration};
use crate::feed::{FeedLoader, LoadedFeed, ServiceWindow};
use crate::output;
use chrono::NaiveDate;
use clap::{value_parser, Subcommand};
use dirsplit_core::engine::{RunReport, SplitEngine};
use dirsplit_core::registry::SpecRegistry;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum SplitOperation {
    /// split the trips of a GTFS archive and write trip variants
    Run {
        /// GTFS archive, zipped or as a directory
        #[arg(long)]
        input: String,
        /// route registry with reference stop sequences (.toml or .json)
        #[arg(long)]
        registry_file: String,
        #[arg(long)]
        output_directory: String,
        /// app configuration file, layered under DIRSPLIT_* environment variables
        #[arg(long)]
        configuration_file: Option<String>,
        /// overrides the failure policy of the configuration file
        #[arg(long, value_enum)]
        failure_policy: Option<FailurePolicy>,
        /// only load trips whose service runs on or after this date
        #[arg(long, value_parser = value_parser!(NaiveDate))]
        start_date: Option<NaiveDate>,
        /// only load trips whose service runs on or before this date
        #[arg(long, value_parser = value_parser!(NaiveDate))]
        end_date: Option<NaiveDate>,
        /// size of the global thread pool, defaults to one thread per core
        #[arg(long)]
        parallelism: Option<usize>,
        #[arg(long, default_value_t = false)]
        overwrite: bool,
    },
    /// build the route registry and report any configuration error
    Validate {
        #[arg(long)]
        registry_file: String,
    },
}

impl SplitOperation {
    pub fn run(&self) -> Result<(), SplitAppError> {
        match self {
            SplitOperation::Run {
                input,
                registry_file,
                output_directory,
                configuration_file,
                failure_policy,
                start_date,
                end_date,
                parallelism,
                overwrite,
            } => {
                let registry = SpecRegistry::try_from(registry_file)?;
                log::info!(
                    "read {} registered routes from {registry_file}",
                    registry.len()
                );
                let mut conf = SplitAppConfiguration::new(configuration_file.as_deref())?;
                if let Some(policy) = failure_policy {
                    conf.failure_policy = *policy;
                }
                conf.overwrite = conf.overwrite || *overwrite;

                if let Some(n) = parallelism {
                    rayon::ThreadPoolBuilder::new()
                        .num_threads(*n)
                        .build_global()?;
                }

                let window = service_window(start_date, end_date)?;
                let loader = FeedLoader::new(
                    &conf.excluded_headsigns,
                    &conf.stop_id_patterns,
                    conf.route_keys(),
                    window,
                )?;
                let feed = loader.read(input)?;
                run_split(registry, &conf, &feed, Path::new(output_directory))?;
                Ok(())
            }
            SplitOperation::Validate { registry_file } => {
                let registry = SpecRegistry::try_from(registry_file)?;
                log::info!(
                    "{registry_file} is valid with {} registered routes",
                    registry.len()
                );
                println!("{} registered routes", registry.len());
                Ok(())
            }
        }
    }
}

/// runs the engine over a loaded feed and writes outputs according to the failure policy.
/// the run summary is written in every case; trip variants are withheld entirely by a
/// strict run with failures, which also clears variants of an earlier run when overwriting.
pub fn run_split(
    registry: SpecRegistry,
    conf: &SplitAppConfiguration,
    feed: &LoadedFeed,
    output_directory: &Path,
) -> Result<RunReport, SplitAppError> {
    let engine = SplitEngine::new(Arc::new(registry))
        .with_pass_through(conf.unregistered_routes.passes_through());
    let summary = engine.run(&feed.trips_by_route);
    let report = summary.report();
    log::info!("{report}");

    if summary.has_failures() && conf.failure_policy == FailurePolicy::Strict {
        if conf.overwrite {
            output::remove_variants(output_directory)?;
        }
        output::write_run_summary(output_directory, &report, conf.overwrite)?;
        return Err(SplitAppError::RunFailed {
            classification_failures: report.classification_failures.len(),
            merge_failures: report.merge_failures.len(),
        });
    }

    output::write_variants(
        output_directory,
        summary.publishable_variants(),
        conf.overwrite,
    )?;
    output::write_run_summary(output_directory, &report, conf.overwrite)?;
    Ok(report)
}

fn service_window(
    start_date: &Option<NaiveDate>,
    end_date: &Option<NaiveDate>,
) -> Result<Option<ServiceWindow>, SplitAppError> {
    match (start_date, end_date) {
        (Some(start), Some(end)) => Ok(Some(ServiceWindow::new(*start, *end)?)),
        (None, None) => Ok(None),
        _ => Err(SplitAppError::InvalidArguments(String::from(
            "start_date and end_date must be provided together",
        ))),
    }
}
