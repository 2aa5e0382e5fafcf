use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "airwatch",
    version,
    about = "Air quality classification and health recommendations"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override SQLite data directory
    #[arg(short, long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify a feature vector given as KEY=VALUE pairs or a JSON object
    Classify {
        /// Feature values, e.g. PM2_5=42 NO2=30 (missing keys count as 0)
        #[arg(value_name = "KEY=VALUE")]
        features: Vec<String>,

        /// Feature values as a JSON object
        #[arg(long, conflicts_with = "features")]
        json: Option<String>,
    },
    /// Generate recommendations for a category label
    Recommend {
        /// Category label (Good, Moderate, Unhealthy, Hazardous or Vietnamese)
        #[arg(long)]
        category: String,

        /// User group (normal, sensitive, children, elderly, athlete)
        #[arg(long)]
        group: Option<String>,

        /// Ambient temperature in °C
        #[arg(long, allow_hyphen_values = true)]
        temperature: Option<f64>,

        /// Relative humidity in %
        #[arg(long)]
        humidity: Option<f64>,
    },
    /// Fetch live readings, classify them and recommend actions
    Assess {
        /// Monitoring station id or name fragment
        #[arg(long, conflicts_with_all = ["lat", "lon"])]
        station: Option<String>,

        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,

        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,

        /// User group; defaults to the configured one
        #[arg(long)]
        group: Option<String>,

        /// Do not record the result in history
        #[arg(long)]
        no_save: bool,
    },
    /// List monitoring stations
    Stations {
        /// north, central, south or global
        #[arg(long)]
        region: Option<String>,

        /// Name or id fragment
        #[arg(long)]
        search: Option<String>,
    },
    /// Live AQI for major cities from WAQI
    Cities {
        /// Fetch a single WAQI feed instead (city slug or @station-idx)
        #[arg(long)]
        feed: Option<String>,
        /// Add advice for this group based on each city's AQI level
        #[arg(long)]
        group: Option<String>,
    },
    /// Manage saved assessments
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
    /// Validate config and test connections
    Check,
    /// Re-run interactive setup
    Init,
}

#[derive(Subcommand)]
pub enum HistoryAction {
    /// Show saved assessments, newest first
    List {
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show one record
    Show { id: String },
    /// Write history as CSV
    Export { path: PathBuf },
    /// Remove one record
    Delete { id: String },
    /// Remove all records
    Clear,
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
    fn parses_classify_pairs() {
        let cli = Cli::parse_from(["airwatch", "classify", "PM2_5=42", "NO2=30"]);
        match cli.command {
            Commands::Classify { features, json } => {
                assert_eq!(features, vec!["PM2_5=42", "NO2=30"]);
                assert!(json.is_none());
            }
            _ => panic!("expected classify"),
        }
    }

    #[test]
    fn parses_recommend_with_negative_temperature() {
        let cli = Cli::parse_from([
            "airwatch",
            "recommend",
            "--category",
            "Hazardous",
            "--temperature",
            "-5",
            "--format",
            "json",
        ]);
        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Commands::Recommend { temperature, .. } => assert_eq!(temperature, Some(-5.0)),
            _ => panic!("expected recommend"),
        }
    }

    #[test]
    fn parses_cities_with_group() {
        let cli = Cli::parse_from(["airwatch", "cities", "--group", "elderly"]);
        match cli.command {
            Commands::Cities { feed, group } => {
                assert!(feed.is_none());
                assert_eq!(group.as_deref(), Some("elderly"));
            }
            _ => panic!("expected cities"),
        }
    }

    #[test]
    fn station_conflicts_with_coordinates() {
        let res = Cli::try_parse_from([
            "airwatch", "assess", "--station", "hn-01", "--lat", "1", "--lon", "2",
        ]);
        assert!(res.is_err());
    }
}
