use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use std::fs;
use std::io;
use std::path::PathBuf;

use bones::config::Config;
use bones::finalize::{self, plot, Outcome, StatsLog, StatsTotals};
use bones::logging::init_tracing;
use bones::session::{OutputSink, Session, SystemClock};
use bones::shutdown::StopHandle;
use bones::ui::events::CrosstermInput;
use bones::ui::surface::CrosstermSurface;
use bones::ui::terminal_guard::setup_terminal;

/// Distraction-free writing in the terminal. Text fades away when you stop
/// typing; there is no backspace.
#[derive(Parser, Debug)]
#[command(name = "bones", version, about)]
struct Cli {
    /// Configuration file (default: <config dir>/bones/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Seconds of inactivity before the text starts fading
    #[arg(long, value_name = "SECS")]
    blank_timeout: Option<f64>,

    /// Gray level of the status bar, 0-255
    #[arg(long, value_name = "N")]
    stats_brightness: Option<u8>,

    /// Directory sessions are saved under
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Skip the category and title questions after the session
    #[arg(long)]
    no_prompt: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print totals and a chart of words written per day
    Stats {
        /// Number of days to chart
        #[arg(
            long,
            default_value_t = plot::DEFAULT_DAYS,
            value_parser = clap::value_parser!(u16).range(1..=i64::from(plot::MAX_DAYS))
        )]
        days: u16,
    },
}

impl Cli {
    fn load_config(&self) -> Result<Config> {
        let path = self.config.clone().unwrap_or_else(Config::config_path);
        let mut config = Config::load_from(&path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?;

        if let Some(timeout) = self.blank_timeout {
            config.writer.blank_timeout = timeout;
        }
        if let Some(brightness) = self.stats_brightness {
            config.writer.stats_brightness = brightness;
        }
        if let Some(dir) = &self.output_dir {
            config.storage.documents_dir = dir.clone();
        }
        config.validate().context("Invalid command line override")?;
        Ok(config)
    }
}

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.load_config()?;
    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Some(Command::Stats { days }) => show_stats(&config, usize::from(days)),
        None => write_session(&config, !cli.no_prompt),
    }
}

fn write_session(config: &Config, ask: bool) -> Result<()> {
    let documents_dir = config.storage.documents_dir();
    fs::create_dir_all(&documents_dir)
        .with_context(|| format!("Failed to create {}", documents_dir.display()))?;

    if let Some(warning) = finalize::dirty_repo_warning(config) {
        eprintln!("Warning: {}", warning);
    }

    // The file exists before raw mode so a failure is reported on a sane terminal.
    let path = documents_dir.join(finalize::naming::session_file_name(Local::now()));
    let sink = OutputSink::create(&path)?;

    let stop = StopHandle::new();
    stop.register_signals()
        .context("Failed to install signal handlers")?;

    let report = {
        let _guard = setup_terminal().context("Failed to prepare the terminal")?;
        let surface = CrosstermSurface::stdout()?;
        let input = CrosstermInput::new(stop.clone());
        Session::new(surface, input, SystemClock, config, sink)?.run()?
    };

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    match finalize::finalize(&report, config, &mut input, &mut output, ask)? {
        Outcome::Discarded => {}
        Outcome::Saved(record) => {
            tracing::debug!(path = %record.filepath.display(), "session saved");
        }
    }
    Ok(())
}

fn show_stats(config: &Config, days: usize) -> Result<()> {
    let log = StatsLog::new(config.storage.stats_path());
    let records = log
        .load()
        .with_context(|| format!("Failed to read {}", log.path().display()))?;
    if records.is_empty() {
        println!("No sessions recorded yet.");
        return Ok(());
    }

    print!("{}", plot::render_totals(&StatsTotals::from_records(&records)));
    println!();
    let width = crossterm::terminal::size()
        .map(|(cols, _)| usize::from(cols))
        .unwrap_or(80);
    let series = plot::words_per_day(&records, Local::now().date_naive(), days);
    print!("{}", plot::render_chart(&series, width));
    Ok(())
}
