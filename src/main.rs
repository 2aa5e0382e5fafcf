mod cli;
mod config;
mod datasources;
mod db;
mod error;
mod logic;
mod models;
mod report;

use anyhow::{bail, Context};
use clap::Parser;
use cli::{Cli, Commands, HistoryAction, OutputFormat};
use config::Config;
use db::{Database, InMemoryRepository, Repository};
use error::AirWatchError;
use logic::AssessmentService;
use models::station::{all_stations, search_stations, stations_in};
use models::{
    find_station, history, AmbientConditions, FeatureVector, Location, PredictionRecord, Region,
    UserGroup,
};
use serde_json::Value;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Logs go to stderr so stdout stays parseable
    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let format = cli.format;

    match cli.command {
        Commands::Init => {
            let (_, path) = Config::setup_interactive().context("Interactive setup failed")?;
            tracing::info!(path = %path.display(), "Configuration written");
        }
        Commands::Classify { features, json } => {
            let features = match json {
                Some(raw) => {
                    let value: Value =
                        serde_json::from_str(&raw).context("Invalid JSON feature payload")?;
                    FeatureVector::from_json(&value)
                }
                None => parse_pairs(&features)?,
            };
            let service = AssessmentService::offline(Box::new(InMemoryRepository::new()));
            let result = service.classify(&features);
            emit(format, &result, report::classification)?;
        }
        Commands::Recommend {
            category,
            group,
            temperature,
            humidity,
        } => {
            let group = group
                .as_deref()
                .map(UserGroup::from_str_or_default)
                .unwrap_or_default();
            let ambient = AmbientConditions::new(temperature, humidity);
            let service = AssessmentService::offline(Box::new(InMemoryRepository::new()));
            let recs = service.recommend(&category, group, &ambient);
            emit(format, recs.as_slice(), report::recommendations)?;
        }
        Commands::Stations { region, search } => {
            let mut list: Vec<_> = match region.as_deref() {
                Some(r) => {
                    let region = Region::from_str(r)
                        .with_context(|| format!("Unknown region '{}'", r))?;
                    stations_in(region)
                }
                None => all_stations().collect(),
            };
            if let Some(q) = search.as_deref() {
                let matches = search_stations(q);
                list.retain(|s| matches.iter().any(|m| m.id == s.id));
            }
            emit(format, list.as_slice(), report::stations)?;
        }
        Commands::Assess {
            station,
            lat,
            lon,
            group,
            no_save,
        } => {
            let config = load_config(cli.config)?;
            let location = match (station, lat, lon) {
                (Some(query), _, _) => find_station(&query)
                    .map(Location::from)
                    .ok_or_else(|| AirWatchError::NotFound(format!("station '{}'", query)))?,
                (None, Some(lat), Some(lon)) => Location::custom(lat, lon),
                _ => Location {
                    name: config.location.name.clone(),
                    latitude: config.location.latitude,
                    longitude: config.location.longitude,
                    station_id: None,
                },
            };
            let group = group
                .as_deref()
                .map(UserGroup::from_str_or_default)
                .unwrap_or_else(|| config.user_group());

            let history = open_history(&config, cli.data_dir.as_ref())?;
            let service = AssessmentService::new(&config, history)?;
            let assessment = service
                .assess(location, group, !no_save)
                .await
                .context("Assessment failed")?;
            emit(format, &assessment, report::assessment)?;
        }
        Commands::Cities { feed, group } => {
            let config = load_config(cli.config)?;
            let service = AssessmentService::new(&config, Box::new(InMemoryRepository::new()))?;
            let readings = match feed {
                Some(id) => vec![service.city_feed(&id).await?],
                None => service.major_cities().await?,
            };
            match group.as_deref().map(UserGroup::from_str_or_default) {
                Some(group) => {
                    let overviews: Vec<_> = readings
                        .into_iter()
                        .map(|r| service.advise_city(r, group))
                        .collect();
                    emit(format, overviews.as_slice(), report::city_overviews)?;
                }
                None => emit(format, readings.as_slice(), report::station_readings)?,
            }
        }
        Commands::History { action } => {
            let config = if Config::exists(cli.config.as_ref()) {
                load_config(cli.config)?
            } else {
                Config::default()
            };
            let repo = open_history(&config, cli.data_dir.as_ref())?;
            run_history(repo.as_ref(), action, format)?;
        }
        Commands::Check => {
            let config = load_config(cli.config)?;
            let history = open_history(&config, cli.data_dir.as_ref())?;
            let service = AssessmentService::new(&config, history)?;
            let status = service
                .check_connections(config.location.latitude, config.location.longitude)
                .await;
            if !status.any_connected() {
                tracing::warn!("No live data source is reachable");
            }
            emit(format, &status, |status| {
                format!(
                    "Configuration OK\n{}{}",
                    report::connections(status),
                    report::engine_summary(service.model(), service.engine())
                )
            })?;
        }
    }

    Ok(())
}

fn load_config(config_override: Option<PathBuf>) -> anyhow::Result<Config> {
    Config::load(config_override).context("Failed to load configuration")
}

/// SQLite when history is enabled, otherwise a store that lives for this run only.
fn open_history(
    config: &Config,
    data_dir: Option<&PathBuf>,
) -> anyhow::Result<Box<dyn Repository<PredictionRecord>>> {
    if !config.history.enabled {
        tracing::debug!("History disabled, using in-memory store");
        return Ok(Box::new(InMemoryRepository::new()));
    }
    let path = Config::db_path(data_dir)?;
    let db = Database::open(&path)
        .with_context(|| format!("Failed to open history database at {}", path.display()))?;
    tracing::debug!(path = %db.path().display(), "Using SQLite history");
    Ok(Box::new(db))
}

fn run_history(
    repo: &dyn Repository<PredictionRecord>,
    action: HistoryAction,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match action {
        HistoryAction::List { limit } => {
            let mut records = repo.list()?;
            history::sort_newest_first(&mut records);
            if let Some(limit) = limit {
                records.truncate(limit);
            }
            emit(format, records.as_slice(), report::history)?;
        }
        HistoryAction::Show { id } => {
            let record = repo
                .get(&id)?
                .ok_or_else(|| AirWatchError::NotFound(format!("history record '{}'", id)))?;
            emit(format, std::slice::from_ref(&record), report::history)?;
        }
        HistoryAction::Export { path } => {
            let mut records = repo.list()?;
            if records.is_empty() {
                return Err(AirWatchError::InvalidData("No history to export".into()).into());
            }
            history::sort_newest_first(&mut records);
            std::fs::write(&path, history::to_csv(&records))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Exported {} records to {}", records.len(), path.display());
        }
        HistoryAction::Delete { id } => {
            if !repo.delete(&id)? {
                bail!(AirWatchError::NotFound(format!("history record '{}'", id)));
            }
            println!("Deleted {}", id);
        }
        HistoryAction::Clear => {
            let removed = repo.clear()?;
            println!("Removed {} records", removed);
        }
    }
    Ok(())
}

/// Accepts `KEY=VALUE` arguments; unknown keys are ignored like any other
/// unrecognized feature.
fn parse_pairs(args: &[String]) -> anyhow::Result<FeatureVector> {
    let mut pairs = Vec::with_capacity(args.len());
    for arg in args {
        let Some((key, value)) = arg.split_once('=') else {
            bail!("Expected KEY=VALUE, got '{}'", arg);
        };
        pairs.push((key, value));
    }
    Ok(FeatureVector::from_pairs(pairs))
}

fn emit<T, F>(format: OutputFormat, value: &T, render: F) -> anyhow::Result<()>
where
    T: serde::Serialize + ?Sized,
    F: FnOnce(&T) -> String,
{
    match format {
        OutputFormat::Json => println!("{}", report::to_json(value)?),
        OutputFormat::Text => print!("{}", render(value)),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_pairs_reads_known_keys() {
        let args = vec!["PM2.5=42".to_string(), "no2=30".to_string(), "x=1".to_string()];
        let features = parse_pairs(&args).unwrap();
        assert_eq!(features.pm2_5, 42.0);
        assert_eq!(features.no2, 30.0);
        assert_eq!(features.tsp, 0.0);
    }

    #[test]
    fn parse_pairs_rejects_missing_equals() {
        assert!(parse_pairs(&["PM2_5".to_string()]).is_err());
    }

    #[test]
    fn history_roundtrip_through_cli_helpers() {
        let repo = InMemoryRepository::new();
        repo.put(PredictionRecord::new("Huế", models::Category::Good, 0.85, 50.0, 10.0, 20.0))
            .unwrap();

        let id = repo.list().unwrap()[0].id.clone();
        run_history(&repo, HistoryAction::Show { id }, OutputFormat::Text).unwrap();
        assert!(run_history(
            &repo,
            HistoryAction::Show { id: "missing".into() },
            OutputFormat::Text
        )
        .is_err());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.csv");
        run_history(
            &repo,
            HistoryAction::Export { path: path.clone() },
            OutputFormat::Text,
        )
        .unwrap();
        let csv = std::fs::read_to_string(&path).unwrap();
        assert!(csv.starts_with("Thời gian,"));
        assert!(csv.contains("Huế"));

        run_history(&repo, HistoryAction::Clear, OutputFormat::Text).unwrap();
        assert!(run_history(
            &repo,
            HistoryAction::Export { path },
            OutputFormat::Text
        )
        .is_err());
    }
}
