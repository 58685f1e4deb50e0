// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;

use pokedex::{init_logging, Config, ConsolePresenter, Controller, FilterQuery, HttpSource, LogTarget};

#[derive(Parser, Debug)]
#[command(name = "pokedex", version, about = "Browse and filter Pokémon from the PokéAPI")]
struct Cli {
    /// Path to a TOML config file (defaults to ./pokedex.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive terminal UI (default)
    Tui,

    /// Print the filtered catalog and exit
    List {
        /// Text matched against name and number
        #[arg(short, long, default_value = "")]
        query: String,

        /// Type label to select (repeatable, e.g. --type fuego --type agua)
        #[arg(short = 't', long = "type")]
        types: Vec<String>,

        /// Negate each active filter
        #[arg(long = "not")]
        invert: bool,
    },

    /// Print the distinct type labels of the catalog and exit
    Types,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;

    match cli.command.unwrap_or(Command::Tui) {
        Command::Tui => {
            init_logging(&config.logging.level, &LogTarget::File(config.logging.file.clone()))?;
            run_ui_mode(&config).await
        }
        Command::List { query, types, invert } => {
            init_logging(&config.logging.level, &LogTarget::Stderr)?;
            let query = FilterQuery::new(query).with_types(types).inverted(invert);
            run_list(&config, query).await
        }
        Command::Types => {
            init_logging(&config.logging.level, &LogTarget::Stderr)?;
            run_types(&config).await
        }
    }
}

async fn load_console(config: &Config, query: FilterQuery) -> Result<Controller<HttpSource, ConsolePresenter>> {
    let source = HttpSource::new(config)?;
    let mut controller = Controller::new(source, ConsolePresenter::new(), config).with_query(query);

    if let Err(err) = controller.load().await {
        if let Some(message) = &controller.presenter().error {
            eprintln!("❌ {}", message);
        }
        return Err(err.into());
    }

    Ok(controller)
}

async fn run_list(config: &Config, query: FilterQuery) -> Result<()> {
    let controller = load_console(config, query).await?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    controller.presenter().write_table(&mut out)?;
    out.flush()?;

    eprintln!(
        "✓ {} of {} Pokémon shown (loaded {})",
        controller.presenter().rows.len(),
        controller.catalog().len(),
        controller.catalog().loaded_label().unwrap_or_default()
    );

    Ok(())
}

async fn run_types(config: &Config) -> Result<()> {
    let controller = load_console(config, FilterQuery::default()).await?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    controller.presenter().write_types(&mut out)?;
    out.flush()?;

    Ok(())
}

#[cfg(feature = "tui")]
async fn run_ui_mode(config: &Config) -> Result<()> {
    let source = HttpSource::new(config)?;
    ui::run_ui(source, config).await
}

#[cfg(not(feature = "tui"))]
async fn run_ui_mode(_config: &Config) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use: pokedex list");
    std::process::exit(1);
}
