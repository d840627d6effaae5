//! # Shade Quote Console
//!
//! Headless front end for the engine: reads interactions from a script or
//! stdin, feeds them through the engine and prints every element whose
//! rendered attributes changed, one JSON object per line.
//!
//! ## Startup Sequence
//! 1. Parse arguments
//! 2. Load configuration (defaults → shade.toml → SHADE_* env)
//! 3. Initialize tracing
//! 4. Load the starting quote, if given
//! 5. Build the engine against an in-memory surface
//! 6. Run the interaction loop

mod script;

use std::cell::RefCell;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;
use shade_core::QuoteData;
use shade_engine::pricing::PriceList;
use shade_engine::render::MemorySurface;
use shade_engine::{AppContext, EngineConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use script::{parse_line, ScriptCommand};

#[derive(Parser, Debug)]
#[command(
    name = "shade-console",
    version,
    about = "Drive the Shade Quote engine from a script and print UI changes"
)]
struct Cli {
    /// Config file (default: platform config dir shade.toml).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Starting quote as JSON.
    #[arg(long, value_name = "PATH")]
    quote: Option<PathBuf>,

    /// Interaction script; reads stdin when omitted.
    #[arg(long, value_name = "PATH")]
    script: Option<PathBuf>,

    /// Write the effective configuration to this path and continue.
    #[arg(long, value_name = "PATH")]
    save_config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = EngineConfig::load(cli.config.clone()).context("loading configuration")?;
    init_tracing(&config.logging.filter);
    info!("Starting Shade Quote console");

    if let Some(path) = &cli.save_config {
        config.save(path).with_context(|| format!("saving config to {}", path.display()))?;
    }

    let starting = cli.quote.as_deref().map(load_quote).transpose()?;

    let surface = Rc::new(RefCell::new(MemorySurface::new()));
    let pricing = Box::new(PriceList::new(config.pricing.clone()));
    let ctx = AppContext::initialize(config, starting, surface.clone(), pricing)
        .context("initializing engine")?;
    print_changes(&surface)?;

    let reader: Box<dyn BufRead> = match &cli.script {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("opening script {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };

    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                warn!(line = number + 1, error = %e, "Skipping script line");
                continue;
            }
        };

        match command {
            ScriptCommand::Interact(mut interaction) => {
                interaction.disabled = surface.borrow().is_disabled(&interaction.target);
                ctx.dispatch(&interaction)?;
                print_changes(&surface)?;
            }
            ScriptCommand::State => {
                println!("{}", serde_json::to_string_pretty(&*ctx.snapshot())?);
            }
            ScriptCommand::Quit => break,
        }
    }

    info!(render_passes = ctx.render_passes(), "Console finished");
    Ok(())
}

/// Initializes tracing. `RUST_LOG` wins over the configured filter.
fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_quote(path: &Path) -> Result<QuoteData> {
    let file = File::open(path).with_context(|| format!("opening quote {}", path.display()))?;
    let quote = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing quote {}", path.display()))?;
    Ok(quote)
}

fn print_changes(surface: &Rc<RefCell<MemorySurface>>) -> Result<()> {
    for (element, state) in surface.borrow_mut().take_changes() {
        println!("{}", serde_json::to_string(&json!({ "element": element, "state": state }))?);
    }
    Ok(())
}
