#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that replays a placement session and prints the
//! resulting ground map.

mod render;
mod session;

use std::{cell::RefCell, path::PathBuf, rc::Rc};

use anyhow::{Context, Result};
use clap::Parser;
use groundwork_core::GroundType;
use groundwork_system_preview::InstanceLedger;
use groundwork_world::{apply, GridEngine, TileEventLog};
use tracing_subscriber::EnvFilter;

use crate::session::Session;

/// Command-line arguments accepted by the `groundwork` binary.
#[derive(Debug, Parser)]
#[command(name = "groundwork", version, about = "Replay a tile placement session")]
struct Cli {
    /// TOML session describing the grid, the seed and the commands to apply.
    #[arg(value_name = "SESSION")]
    session: PathBuf,

    /// Overrides the number of grid columns.
    #[arg(long)]
    width: Option<u32>,

    /// Overrides the number of grid rows.
    #[arg(long)]
    height: Option<u32>,

    /// Log filter directive such as `debug` or `groundwork_world=trace`.
    /// Takes precedence over `RUST_LOG`.
    #[arg(long, value_name = "FILTER")]
    log_level: Option<String>,

    /// Skip printing the ground map.
    #[arg(long)]
    no_map: bool,
}

/// Entry point for the groundwork command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref())?;

    let mut session = Session::load(&cli.session)?;
    session.resize(cli.width, cli.height)?;

    let mut engine = GridEngine::new();
    let events = TileEventLog::shared();
    let ledger = Rc::new(RefCell::new(InstanceLedger::new()));
    let _ = engine.subscribe(Box::new(Rc::clone(&events)));
    let _ = engine.subscribe(Box::new(Rc::clone(&ledger)));

    let mut rejected = 0_usize;
    for (step, command) in session.into_commands().into_iter().enumerate() {
        if !apply(&mut engine, command.clone()) {
            rejected += 1;
            tracing::warn!(step, ?command, "command rejected");
        }
    }

    let (width, height) = engine.dimensions();
    if !cli.no_map {
        print!("{}", render::render_map(engine.grid()));
    }
    println!(
        "grid {width}x{height}: {} occupied cells, {} events, {rejected} rejected commands",
        engine.grid().occupied_count(),
        events.borrow().events().len(),
    );

    let ledger = ledger.borrow();
    print!(
        "{}",
        render::ground_tally(
            GroundType::ALL_GROUND
                .into_iter()
                .map(|ground| (ground, ledger.instances(ground).len())),
        )
    );

    Ok(())
}

fn init_tracing(directive: Option<&str>) -> Result<()> {
    let filter = match directive {
        Some(directive) => EnvFilter::try_new(directive)
            .with_context(|| format!("invalid log filter `{directive}`"))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
