//! Hotboard CLI
//!
//! Interactive dashboard and one-shot commands for the hot-word monitor.

use anyhow::{bail, Context};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use hotboard::api::{BackendClient, HotApi};
use hotboard::board::{partition, rising_entries, ItemInteraction};
use hotboard::chart::{build_option, render, HtmlChartSurface};
use hotboard::config::{generate_default_config, Config, LoggingConfig};
use hotboard::dashboard::DashboardController;
use hotboard::notify::Notification;
use hotboard::trend::{GenerationCounter, TimeWindow, TrendAggregator};
use hotboard::types::Settings;
use hotboard::view::{hot_board_lines, rising_lines, settings_line, DashboardView, TerminalView};

#[derive(Parser)]
#[command(name = "hotboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Terminal dashboard for a hot-word ranking monitor")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (default: searched in the user config dir, then ./hotboard.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Backend URL, overriding the config file
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Output format for one-shot commands
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive dashboard
    Watch {
        /// Initial trend window (e.g. 6, 24h, 7d)
        #[arg(long)]
        hours: Option<TimeWindow>,

        /// Where to write the chart page
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the current hot list
    Hot,

    /// Show the fastest-rising words
    Rising {
        #[arg(short, long)]
        limit: Option<u32>,
    },

    /// Show backend status
    Status,

    /// List recent snapshots
    Snapshots {
        #[arg(short, long, default_value = "20")]
        limit: u32,
    },

    /// Compare the trends of one or more words
    Trend {
        #[arg(required = true)]
        words: Vec<String>,

        /// Look-back window (e.g. 6, 24h, 7d)
        #[arg(long, default_value = "1")]
        hours: TimeWindow,

        /// Where to write the chart page
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Ask the backend to take a snapshot now
    Refresh,

    /// Show or change the monitor settings
    Settings {
        /// Scrape interval in minutes
        #[arg(long)]
        interval: Option<u32>,

        /// Dashboard refresh period in seconds
        #[arg(long)]
        refresh: Option<u32>,

        /// Days of history to keep
        #[arg(long)]
        retention: Option<u32>,
    },

    /// Print or write a default config file
    Config {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Config { output } = &cli.command {
        let config = generate_default_config();
        match output {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(path, &config)
                    .with_context(|| format!("writing config to {:?}", path))?;
                println!("Config written to {:?}", path);
            }
            None => print!("{}", config),
        }
        return Ok(());
    }

    let (mut config, defaults) = match &cli.config {
        Some(path) => (Config::load_with_env(path)?, None),
        None => {
            let loaded = Config::load_default();
            (loaded.config.clone(), Some(loaded))
        }
    };
    if let Some(url) = &cli.base_url {
        config.backend.base_url = url.clone();
    }

    init_logging(&config.logging);
    if let Some(loaded) = &defaults {
        loaded.log();
    }
    tracing::debug!(base_url = %config.backend.base_url, "Hotboard v{}", env!("CARGO_PKG_VERSION"));

    let client: Arc<dyn HotApi> = Arc::new(
        BackendClient::new(config.backend.client_config()).context("invalid backend URL")?,
    );
    let json = cli.format == OutputFormat::Json;

    match cli.command {
        Commands::Watch { hours, output } => watch(client, &config, hours, output).await?,

        Commands::Hot => {
            let list = client.hot_list().await.context("loading hot list")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&list)?);
            } else {
                for line in hot_board_lines(&partition(&list.data)) {
                    println!("{}", line);
                }
                println!();
                println!("{} items", list.count());
            }
        }

        Commands::Rising { limit } => {
            let items = client.rising(limit).await.context("loading rising list")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&items)?);
            } else {
                for line in rising_lines(&rising_entries(&items)) {
                    println!("{}", line);
                }
            }
        }

        Commands::Status => {
            let status = client.status().await.context("loading status")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else {
                println!("Hotboard v{}", env!("CARGO_PKG_VERSION"));
                println!("Backend: {}", config.backend.base_url);
                println!();
                println!("Total snapshots: {}", status.total_snapshots);
                if let Some(state) = &status.status {
                    println!("State: {}", state);
                }
                if let Some(last) = &status.last_update {
                    println!("Last update: {}", last);
                }
                if let Some(settings) = &status.settings {
                    println!("{}", settings_line(&settings.normalized()));
                }
            }
        }

        Commands::Snapshots { limit } => {
            let snapshots = client.snapshots(limit).await.context("loading snapshots")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&snapshots)?);
            } else if snapshots.is_empty() {
                println!("No snapshots yet.");
            } else {
                println!("{:<8} {:<22} {}", "ID", "Captured", "Items");
                println!("{}", "-".repeat(40));
                for s in &snapshots {
                    println!(
                        "{:<8} {:<22} {}",
                        s.id,
                        s.captured_at,
                        s.total_count.map(|c| c.to_string()).unwrap_or_else(|| "-".into())
                    );
                }
            }
        }

        Commands::Trend {
            words,
            hours,
            output,
        } => {
            let aggregator = TrendAggregator::new(client, config.dashboard.offset());
            let ticket = GenerationCounter::new().next();
            let now = Utc::now().timestamp_millis();
            let Some(set) = aggregator.aggregate(&words, hours, now, &ticket).await else {
                bail!("trend pass was cancelled");
            };

            if json {
                println!("{}", build_option(&set).to_json()?);
            } else {
                let path = output.unwrap_or_else(|| PathBuf::from(&config.dashboard.chart_output));
                let mut surface = HtmlChartSurface::new(&path);
                render(&mut surface, &set).context("writing chart")?;
                for series in &set.series {
                    println!("{:<30} {} points", series.word, series.points.len());
                }
                println!();
                println!("Chart written to {:?}", path);
            }
        }

        Commands::Refresh => {
            client.trigger_refresh().await.context("triggering refresh")?;
            println!("Refresh triggered");
        }

        Commands::Settings {
            interval,
            refresh,
            retention,
        } => {
            let current = client.settings().await.context("loading settings")?.normalized();
            if interval.is_none() && refresh.is_none() && retention.is_none() {
                if json {
                    println!("{}", serde_json::to_string_pretty(&current)?);
                } else {
                    println!("{}", settings_line(&current));
                }
                return Ok(());
            }

            let wanted = Settings::new(
                interval.unwrap_or(current.scrape_interval_minutes),
                refresh.unwrap_or(current.auto_refresh_seconds),
                retention.unwrap_or(current.max_history_days),
            )?
            .clamped();
            let stored = client
                .save_settings(&wanted)
                .await
                .context("saving settings")?
                .unwrap_or(wanted);
            println!("Settings saved");
            println!("{}", settings_line(&stored.normalized()));
        }

        Commands::Config { .. } => {}
    }

    Ok(())
}

fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("hotboard={}", config.level)));
    let registry = tracing_subscriber::registry().with(filter);

    if config.is_json() {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).init();
    }
}

// ============================================
// Interactive dashboard
// ============================================

/// A line typed at the dashboard prompt
#[derive(Debug, Clone, PartialEq)]
enum WatchCommand {
    Add(String),
    Remove(String),
    View(String),
    Clear,
    Hours(TimeWindow),
    Refresh,
    Settings(Settings),
    Chart,
    Help,
    Quit,
}

impl WatchCommand {
    /// Parse one input line; blank lines yield `None`
    fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        let word = |cmd: &str| {
            if rest.is_empty() {
                Err(format!("Usage: {} <word>", cmd))
            } else {
                Ok(rest.to_string())
            }
        };

        let command = match head.to_ascii_lowercase().as_str() {
            "" => return Ok(None),
            "add" | "a" => WatchCommand::Add(word("add")?),
            "rm" | "remove" => WatchCommand::Remove(word("rm")?),
            "view" | "v" => WatchCommand::View(word("view")?),
            "clear" => WatchCommand::Clear,
            "hours" | "h" => WatchCommand::Hours(rest.parse().map_err(|e| format!("{}", e))?),
            "refresh" | "r" => WatchCommand::Refresh,
            "settings" => {
                let values: Vec<u32> = rest
                    .split_whitespace()
                    .map(str::parse)
                    .collect::<Result<_, _>>()
                    .map_err(|_| "Usage: settings <interval> <refresh> <retention>".to_string())?;
                let &[interval, refresh, retention] = values.as_slice() else {
                    return Err("Usage: settings <interval> <refresh> <retention>".to_string());
                };
                let settings =
                    Settings::new(interval, refresh, retention).map_err(|e| e.to_string())?;
                WatchCommand::Settings(settings)
            }
            "chart" => WatchCommand::Chart,
            "help" | "?" => WatchCommand::Help,
            "quit" | "q" | "exit" => WatchCommand::Quit,
            other => return Err(format!("Unknown command: {} (try 'help')", other)),
        };
        Ok(Some(command))
    }
}

const WATCH_HELP: &str = "\
Commands:
  add <word>          Add a word to the comparison
  rm <word>           Remove a word
  view <word>         Show only this word
  clear               Remove every word
  hours <N|Nh|Nd>     Select the trend window (1, 6, 24, 168)
  refresh             Scrape now and reload
  settings <i> <r> <d> Save scrape interval (min), refresh (s), retention (days)
  chart               Show where the chart page is written
  help                Show this help
  quit                Exit";

async fn watch(
    client: Arc<dyn HotApi>,
    config: &Config,
    hours: Option<TimeWindow>,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let chart_path = output.unwrap_or_else(|| PathBuf::from(&config.dashboard.chart_output));
    let view = TerminalView::new(std::io::stdout(), HtmlChartSurface::new(chart_path));

    let mut options = config.dashboard.controller_options();
    if let Some(window) = hours {
        options.initial_window = window;
    }

    let (trend_tx, mut trend_rx) = mpsc::unbounded_channel();
    let mut controller = DashboardController::new(client, view, options).spawn_trend_passes(trend_tx);

    tracing::info!(
        period_secs = controller.timer().period().as_secs(),
        window = %controller.session().window,
        "Dashboard started"
    );
    println!("{}", WATCH_HELP);
    controller.view_mut().set_placeholder_visible(true);
    controller.load_all().await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("reading stdin")? else {
                    break;
                };
                match WatchCommand::parse(&line) {
                    Ok(Some(WatchCommand::Quit)) => break,
                    Ok(Some(command)) => run_command(&mut controller, command).await,
                    Ok(None) => {}
                    Err(message) => controller.view_mut().notify(Notification::warning(message)),
                }
            }
            _ = controller.next_tick() => {
                tracing::debug!("Periodic refresh");
                controller.load_all().await;
                controller.view_mut().render_toasts();
            }
            Some(outcome) = trend_rx.recv() => {
                controller.finish_trend_pass(outcome);
            }
        }
    }

    tracing::info!("Dashboard stopped");
    Ok(())
}

async fn run_command<W: std::io::Write>(
    controller: &mut DashboardController<TerminalView<W>>,
    command: WatchCommand,
) {
    match command {
        WatchCommand::Add(text) => {
            controller
                .handle_interaction(ItemInteraction::ManualEntry(text))
                .await
        }
        WatchCommand::Remove(word) => controller.remove_word(&word).await,
        WatchCommand::View(word) => {
            controller
                .handle_interaction(ItemInteraction::Click(word))
                .await
        }
        WatchCommand::Clear => controller.clear(),
        WatchCommand::Hours(window) => controller.select_window(window).await,
        WatchCommand::Refresh => controller.manual_refresh().await,
        WatchCommand::Settings(settings) => controller.save_settings(settings).await,
        WatchCommand::Chart => {
            let path = controller.view().chart().path().display().to_string();
            controller
                .view_mut()
                .notify(Notification::info(format!("Chart page: {}", path)));
        }
        WatchCommand::Help => println!("{}", WATCH_HELP),
        WatchCommand::Quit => {}
    }
}
