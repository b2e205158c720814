//! recplay — recording playlist viewer
//!
//! Usage:
//!   recplay serve    --config config.toml
//!   recplay list     --config config.toml --booking-id 42 --camera all
//!   recplay download --config config.toml --start "2025-05-01 18:00:00" --end "2025-05-01 19:00:00" --index 2
//!   recplay filter   set --start 2025-05-01T18:00 --end 2025-05-01T19:00
//!   recplay play     --config config.toml --booking-id 42

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use recplay::api::{self, AppState};
use recplay::config::Config;
use recplay::download;
use recplay::fetch::{fetch_playlist, HttpRecordingSource};
use recplay::filters::{self, FilterStore, TimeRangeInput};
use recplay::player::Viewer;
use recplay::query::ViewerQuery;
use recplay::session::{self, Command as SessionCommand, Reply};
use recplay::timefmt::current_date_time;

#[derive(Parser)]
#[command(name = "recplay", about = "Recording playlist viewer", version)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, global = true, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

/// Page query parameters.
#[derive(Args, Clone)]
struct Selection {
    /// Booking whose recordings are listed.
    #[arg(long)]
    booking_id: Option<String>,
    /// Range start (`yyyy-mm-dd hh:mm:ss`); wins over the booking.
    #[arg(long)]
    start: Option<String>,
    /// Range end (`yyyy-mm-dd hh:mm:ss`).
    #[arg(long)]
    end: Option<String>,
    /// Camera id, `all`, or omitted for the default camera.
    #[arg(long)]
    camera: Option<String>,
}

impl Selection {
    fn query(&self) -> ViewerQuery {
        ViewerQuery {
            booking_id: self.booking_id.clone(),
            s: self.start.clone(),
            e: self.end.clone(),
            c: self.camera.clone(),
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API.
    Serve,
    /// Print the playlist.
    List {
        #[command(flatten)]
        selection: Selection,
    },
    /// Download the selected recording(s).
    Download {
        #[command(flatten)]
        selection: Selection,
        /// Playlist index within the selected camera.
        #[arg(long, default_value_t = 0)]
        index: usize,
        /// Output directory.
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },
    /// Manage the stored time-range filter.
    Filter {
        #[command(subcommand)]
        action: FilterAction,
    },
    /// Interactive player session on stdin.
    Play {
        #[command(flatten)]
        selection: Selection,
    },
}

#[derive(Subcommand)]
enum FilterAction {
    /// Print the stored values.
    Show,
    /// Validate and store a range (`yyyy-mm-ddThh:mm`, :00 or :30).
    Set {
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
    },
    /// Forget the stored range.
    Clear,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let cfg = match Config::from_file(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            error!(error = %e, "Failed to load config");
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Serve => run_serve(cfg).await,
        Command::List { selection } => run_list(cfg, selection).await,
        Command::Download { selection, index, output } => {
            run_download(cfg, selection, index, output).await
        }
        Command::Filter { action } => run_filter(cfg, action),
        Command::Play { selection } => run_play(cfg, selection).await,
    };

    if let Err(e) = result {
        error!(error = %e, "Command failed");
        std::process::exit(1);
    }
}

async fn run_serve(cfg: Config) -> anyhow::Result<()> {
    if !cfg.api.enabled {
        bail!("HTTP API is disabled in the configuration");
    }
    info!(
        cameras = cfg.cameras.len(),
        recorder = cfg.recorder.base_url,
        port = cfg.api.port,
        "Starting viewer API"
    );
    let source = HttpRecordingSource::new(&cfg)?;
    let port = cfg.api.port;
    let state = Arc::new(AppState::new(cfg, Arc::new(source)));

    tokio::select! {
        _ = api::start_server(state, port) => {}
        res = tokio::signal::ctrl_c() => {
            res.context("signal error")?;
            info!("Received CTRL+C, shutting down…");
        }
    }
    Ok(())
}

async fn load_viewer(cfg: &Config, source: &HttpRecordingSource, query: &ViewerQuery) -> anyhow::Result<Viewer> {
    let playlist = fetch_playlist(source, cfg, &query.recording_query())
        .await
        .context("Error loading playlist.")?;
    let mut viewer = Viewer::new(playlist, cfg.dual_pair());
    viewer.apply_filter(query.camera_filter(cfg.default_camera()))?;
    Ok(viewer)
}

async fn run_list(cfg: Config, selection: Selection) -> anyhow::Result<()> {
    let source = HttpRecordingSource::new(&cfg)?;
    let viewer = load_viewer(&cfg, &source, &selection.query()).await?;
    println!("=== Playlist ({}) ===", current_date_time(Local::now().naive_local()));
    print!("{}", session::render_list(&viewer));
    Ok(())
}

async fn run_download(cfg: Config, selection: Selection, index: usize, output: PathBuf) -> anyhow::Result<()> {
    let source = HttpRecordingSource::new(&cfg)?;
    let mut viewer = load_viewer(&cfg, &source, &selection.query()).await?;
    if viewer.current().is_some() {
        viewer.load(index)?;
    }
    let plan = download::plan(&viewer)?;
    println!("{}", plan.message);
    for path in download::execute(source.client(), &plan, &output).await? {
        println!("  {}", path.display());
    }
    Ok(())
}

fn run_filter(cfg: Config, action: FilterAction) -> anyhow::Result<()> {
    let store = FilterStore::new(cfg.viewer.filter_store.clone());
    let query = ViewerQuery::default();
    match action {
        FilterAction::Show => {
            let values = filters::initial_values(&query, &store);
            println!("start: {}", values.start);
            println!("end  : {}", values.end);
        }
        FilterAction::Set { start, end } => {
            let next = filters::submit(&TimeRangeInput { start, end }, &store, &query)?;
            println!("Stored. Viewer query: {}", next.to_query_string());
        }
        FilterAction::Clear => {
            filters::clear(&store, &query)?;
            println!("Cleared.");
        }
    }
    Ok(())
}

async fn run_play(cfg: Config, selection: Selection) -> anyhow::Result<()> {
    let source = HttpRecordingSource::new(&cfg)?;
    let mut viewer = load_viewer(&cfg, &source, &selection.query()).await?;
    print!("{}", session::render_list(&viewer));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let cmd = match line.parse::<SessionCommand>() {
            Ok(c) => c,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };
        match session::apply(&mut viewer, cmd) {
            Ok(Reply::Text(text)) => println!("{text}"),
            Ok(Reply::Download(plan)) => {
                println!("{}", plan.message);
                match download::execute(source.client(), &plan, std::path::Path::new(".")).await {
                    Ok(paths) => {
                        for p in paths {
                            println!("  {}", p.display());
                        }
                    }
                    Err(e) => println!("Download failed: {e}"),
                }
            }
            Ok(Reply::Quit) => break,
            Err(e) => {
                warn!(error = %e, "Command rejected");
                println!("{e}");
            }
        }
    }
    Ok(())
}
