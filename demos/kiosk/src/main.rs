//! kiosk — interactive console for the wayfind engine.
//!
//! Loads a venue map, then reads commands from stdin: `fix <marker>` stands
//! in for a scanned location marker, `say <phrase>` for speech-to-text
//! output.  Notices print immediately; narration prints as it is paced out.
//!
//! ```text
//! cargo run -p kiosk -- --map demos/kiosk/data/map-data.json
//! > fix MainGateway
//! > say take me to the nearest staircase
//! ```

mod commands;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use wf_core::WayfinderConfig;
use wf_data::{load_config_json, load_dataset, read_synonyms_csv, Dataset};
use wf_narrate::Announcement;
use wf_session::{Notice, SessionState, WayfinderBuilder};

use commands::{Command, HELP};

#[derive(Parser, Debug)]
#[command(name = "kiosk", version, about = "Indoor wayfinding console", long_about = None)]
struct Cli {
    /// Map file (JSON) or a directory holding nodes.csv and edges.csv.
    #[arg(long, env = "KIOSK_MAP", default_value = "demos/kiosk/data/map-data.json")]
    map: PathBuf,

    /// Extra synonyms (CSV `canonical,alias`), merged after the map's own.
    #[arg(long)]
    synonyms: Option<PathBuf>,

    /// Engine configuration (JSON).  Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Log errors only
    #[arg(short, long)]
    quiet: bool,
}

fn init_tracing(cli: &Cli) {
    let level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load(cli: &Cli) -> Result<Dataset> {
    let mut dataset = load_dataset(&cli.map)
        .with_context(|| format!("loading map {}", cli.map.display()))?;
    if let Some(path) = &cli.synonyms {
        let file = std::fs::File::open(path)
            .with_context(|| format!("opening synonyms {}", path.display()))?;
        dataset.synonyms.extend(read_synonyms_csv(file)?);
    }
    Ok(dataset)
}

fn print_notice(notice: &Notice) {
    match notice {
        Notice::ResolvedDestination { key, .. } => println!("{notice}  (heard \"{key}\")"),
        Notice::RouteComputed { distance, .. } => println!("{notice}  ({distance:.1} units)"),
        _ => println!("{notice}"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    let config = match &cli.config {
        Some(path) => load_config_json(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => WayfinderConfig::default(),
    };
    let dataset = load(&cli)?;

    let (tx, mut rx) = mpsc::unbounded_channel::<Announcement>();
    let mut wayfinder = WayfinderBuilder::new(dataset, tx).config(config).build()?;
    let mut state = SessionState::new();
    info!(map = %cli.map.display(), "kiosk started");
    println!("Map loaded: {} nodes. Type `help` for commands.", wayfinder.graph().node_count());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match Command::parse(&line) {
                    Ok(Command::Event(event)) => {
                        let outcome = wayfinder.handle(state, event);
                        outcome.notices.iter().for_each(print_notice);
                        state = outcome.state;
                    }
                    Ok(Command::Stop) => state = wayfinder.stop_narration(state),
                    Ok(Command::Reload) => {
                        let reloaded = load(&cli)
                            .and_then(|dataset| Ok(wayfinder.reload(&dataset, &state)?));
                        match reloaded {
                            Ok(next) => {
                                state = next;
                                println!("Map reloaded: {} nodes.", wayfinder.graph().node_count());
                            }
                            Err(e) => eprintln!("reload failed: {e:#}"),
                        }
                    }
                    Ok(Command::Help) => println!("{HELP}"),
                    Ok(Command::Quit) => break,
                    Ok(Command::Empty) => {}
                    Err(msg) => eprintln!("{msg}"),
                }
            }
            Some(announcement) = rx.recv() => println!("🔊 {}", announcement.text()),
        }
    }
    Ok(())
}
