//! calgrid - Entry Point

use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use calgrid::engine::Granularity;
use calgrid::model::AppError;
use calgrid::state::AppState;

/// TUI calendar grid viewer for task/event lists
#[derive(Parser, Debug)]
#[command(name = "calgrid")]
#[command(version)]
#[command(about = "Renders a task/event list as a multi-week calendar grid")]
pub struct Args {
    /// Path to the JSON item file
    pub file: PathBuf,

    /// Reference date to open the view on (YYYY-MM-DD, defaults to today)
    #[arg(short, long)]
    pub date: Option<chrono::NaiveDate>,

    /// View granularity
    #[arg(short, long, value_parser = ["week", "month", "quarter", "semester"])]
    pub granularity: Option<String>,

    /// Lane budget per week row (must be positive)
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    pub max_lanes: Option<u16>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration with full precedence chain:
    // Defaults -> Config File -> Env Vars -> CLI Args
    let config = {
        let config_file = calgrid::config::load_config_with_precedence(args.config.clone())?;
        let merged = calgrid::config::merge_config(config_file)?;
        let with_env = calgrid::config::apply_env_overrides(merged);

        // CLI granularity has already been validated by the value parser
        let granularity_override = args
            .granularity
            .as_deref()
            .map(str::parse::<Granularity>)
            .transpose()
            .map_err(calgrid::config::ConfigError::from)?;
        let max_lanes_override = args.max_lanes.map(usize::from);

        calgrid::config::apply_cli_overrides(with_env, granularity_override, max_lanes_override)
    };

    calgrid::logging::init(&config.log_file_path).map_err(AppError::from)?;

    info!(config = ?config, "Configuration loaded and resolved");

    let parsed = calgrid::parser::load_items(&args.file).map_err(AppError::from)?;
    info!(
        items = parsed.items.len(),
        malformed = parsed.malformed.len(),
        "Item file loaded"
    );

    let today = chrono::Local::now().date_naive();
    let reference = args.date.unwrap_or(today);

    let state = AppState::new(
        reference,
        config.granularity,
        parsed.items,
        config.max_lanes,
    )
    .with_today(today);

    calgrid::view::run(state)?;

    Ok(())
}
