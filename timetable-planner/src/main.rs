use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use timetable_planner::catalog::{CatalogBuilder, CatalogStore, IngestError, StoreError};
use timetable_planner::penalty::{ConfigError, PenaltyConfig, PenaltyModel};
use timetable_planner::planner::{Planner, SearchLimits, rank};
use timetable_planner::report::render_report;

#[derive(Debug, Parser)]
#[command(name = "timetable-planner", version, about = "Find the most pleasant weekly timetable")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Add course blocks from a text listing to a stored catalog
    Ingest {
        /// Catalog file, created if missing
        catalog: PathBuf,
        /// Listing of course blocks
        courses: PathBuf,
    },

    /// Search a stored catalog and print the best schedules
    Plan {
        /// Catalog file
        catalog: PathBuf,

        /// Number of schedules to print
        #[arg(long, default_value_t = 5)]
        count: usize,

        /// JSON file overriding penalty weights
        #[arg(long)]
        config: Option<PathBuf>,

        /// Spread the search across all cores
        #[arg(long)]
        parallel: bool,

        /// Stop after examining this many selections
        #[arg(long)]
        max_selections: Option<usize>,

        /// Stop after this many seconds
        #[arg(long)]
        timeout_secs: Option<u64>,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

fn ingest(catalog_path: &Path, courses_path: &Path) -> Result<(), CliError> {
    let store = CatalogStore::new(catalog_path);
    let existing = store.load_or_default()?;
    let before = existing.len();

    let text = std::fs::read_to_string(courses_path).map_err(|source| CliError::Read {
        path: courses_path.to_path_buf(),
        source,
    })?;

    let mut builder = CatalogBuilder::from_catalog(existing);
    builder.read_blocks(&text)?;
    let catalog = builder.finish()?;
    store.save(&catalog)?;

    info!(
        path = %store.path().display(),
        courses = catalog.len(),
        added = catalog.len().saturating_sub(before),
        "catalog saved"
    );
    Ok(())
}

fn plan(
    catalog_path: &Path,
    count: usize,
    config_path: Option<&Path>,
    parallel: bool,
    limits: &SearchLimits,
) -> Result<(), CliError> {
    let catalog = CatalogStore::new(catalog_path).load()?;
    let config = match config_path {
        Some(path) => PenaltyConfig::from_json_file(path)?,
        None => PenaltyConfig::default(),
    };

    info!(
        courses = catalog.len(),
        selections = catalog.selection_count(),
        parallel,
        "planning"
    );

    let model = PenaltyModel::new(config);
    let planner = Planner::new(&model, limits);
    let outcome = if parallel {
        planner.search_parallel(&catalog)
    } else {
        planner.search(&catalog)
    };

    let status = outcome.status;
    let ranking = rank(outcome.candidates, count);
    print!("{}", render_report(&ranking, status));
    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Ingest { catalog, courses } => ingest(&catalog, &courses),
        Command::Plan {
            catalog,
            count,
            config,
            parallel,
            max_selections,
            timeout_secs,
        } => {
            let limits = SearchLimits::new(max_selections, timeout_secs.map(Duration::from_secs));
            plan(&catalog, count, config.as_deref(), parallel, &limits)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn plan_defaults() {
        let cli = Cli::try_parse_from(["timetable-planner", "plan", "courses.json"]).unwrap();
        let Command::Plan {
            catalog,
            count,
            config,
            parallel,
            max_selections,
            timeout_secs,
        } = cli.command
        else {
            panic!("expected plan");
        };

        assert_eq!(catalog, PathBuf::from("courses.json"));
        assert_eq!(count, 5);
        assert!(config.is_none());
        assert!(!parallel);
        assert!(max_selections.is_none());
        assert!(timeout_secs.is_none());
    }

    #[test]
    fn plan_all_options() {
        let cli = Cli::try_parse_from([
            "timetable-planner",
            "plan",
            "--count",
            "3",
            "courses.json",
            "--parallel",
            "--config",
            "cfg.json",
            "--max-selections",
            "100",
            "--timeout-secs",
            "2",
        ])
        .unwrap();
        let Command::Plan {
            count,
            config,
            parallel,
            max_selections,
            timeout_secs,
            ..
        } = cli.command
        else {
            panic!("expected plan");
        };

        assert_eq!(count, 3);
        assert_eq!(config, Some(PathBuf::from("cfg.json")));
        assert!(parallel);
        assert_eq!(max_selections, Some(100));
        assert_eq!(timeout_secs, Some(2));
    }

    #[test]
    fn ingest_takes_two_paths() {
        let cli =
            Cli::try_parse_from(["timetable-planner", "ingest", "courses.json", "fall.txt"])
                .unwrap();
        assert!(matches!(
            cli.command,
            Command::Ingest { ref catalog, ref courses }
                if catalog == Path::new("courses.json") && courses == Path::new("fall.txt")
        ));
    }

    #[test]
    fn bad_arguments_rejected() {
        for args in [
            vec!["timetable-planner"],
            vec!["timetable-planner", "frobnicate"],
            vec!["timetable-planner", "plan"],
            vec!["timetable-planner", "plan", "a.json", "--count"],
            vec!["timetable-planner", "plan", "a.json", "--count", "many"],
            vec!["timetable-planner", "plan", "a.json", "b.json"],
            vec!["timetable-planner", "plan", "a.json", "--verbose"],
            vec!["timetable-planner", "ingest", "a.json"],
        ] {
            assert!(Cli::try_parse_from(args.clone()).is_err(), "{args:?} should be rejected");
        }
    }

    #[test]
    fn plan_reports_missing_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let result = plan(
            &dir.path().join("missing.json"),
            5,
            None,
            false,
            &SearchLimits::unbounded(),
        );
        assert!(matches!(result, Err(CliError::Store(StoreError::Io { .. }))));
    }

    #[test]
    fn ingest_then_plan() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = dir.path().join("catalog.json");
        let listing = dir.path().join("fall.txt");
        std::fs::write(&listing, "A\n1\nMonday 11:00AM - 12:00PM\n").unwrap();

        ingest(&catalog, &listing).unwrap();
        assert_eq!(CatalogStore::new(&catalog).load().unwrap().len(), 1);
        plan(&catalog, 1, None, true, &SearchLimits::unbounded()).unwrap();
    }
}
