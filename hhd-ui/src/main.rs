use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use hhd_ui::{
    api::FileSettingsSource,
    config::UiConfig,
    controller::{PollOptions, ReplaySource, TerminalSink, run_poll_loop},
    ctx::AppContext,
    loader::{LoadOutcome, SettingsContainer, load_settings},
    page::{PageState, SX_MODE_KEY},
};
use log::{debug, info};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file, defaults to `.hhd-ui.toml` in the working directory
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Daemon API address, overrides the config file
    #[arg(short, long, global = true)]
    endpoint: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the settings schema and render its forms
    Settings {
        /// Write HTML to this file instead of stdout
        #[arg(long)]
        html: Option<PathBuf>,
        /// Open the forms in an interactive terminal UI
        #[arg(long, conflicts_with_all = ["html", "json"])]
        tui: bool,
        /// Print the form sections as JSON
        #[arg(long, conflicts_with = "html")]
        json: bool,
        /// Read the schema from a file instead of the daemon
        #[arg(long)]
        from_file: Option<PathBuf>,
    },
    /// Replay recorded controller input through the status panel
    Controllers {
        /// JSON-lines recording of gamepad frames
        #[arg(long, required = true)]
        replay: PathBuf,
        /// Stop after this many polls
        #[arg(long)]
        ticks: Option<u64>,
    },
    /// Show or set SX mode
    SxMode {
        #[arg(value_enum)]
        state: Option<Toggle>,
    },
    /// Show the effective configuration
    Config {
        /// Print the JSON schema of the config file instead
        #[arg(long)]
        schema: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Toggle {
    On,
    Off,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let workspace = std::env::current_dir()?;
    let ctx = AppContext::load(workspace, cli.config, cli.endpoint).await?;

    match cli.command {
        Commands::Settings {
            html,
            tui,
            json,
            from_file,
        } => settings(&ctx, html, tui, json, from_file).await,
        Commands::Controllers { replay, ticks } => controllers(&ctx, replay, ticks).await,
        Commands::SxMode { state } => sx_mode(&ctx, state),
        Commands::Config { schema } => {
            if schema {
                println!("{}", UiConfig::json_schema()?);
            } else {
                println!("# {}", ctx.config_path.display());
                print!("{}", toml::to_string_pretty(&ctx.config)?);
            }
            Ok(())
        }
    }
}

async fn settings(
    ctx: &AppContext,
    html: Option<PathBuf>,
    tui: bool,
    json: bool,
    from_file: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mut container = SettingsContainer::default();
    let outcome = match from_file {
        Some(path) => {
            let path = ctx.resolve(&path);
            load_settings(&FileSettingsSource::new(path), &mut container).await
        }
        None => load_settings(&ctx.settings_source(), &mut container).await,
    };

    match outcome {
        LoadOutcome::Failed(reason) => bail!("{}", reason),
        LoadOutcome::Loaded { appended, skipped } => {
            info!("Loaded {appended} settings sections");
            for s in skipped {
                debug!("Skipped: {s}");
            }
        }
    }

    if tui {
        let sections = container.into_sections();
        let saved = tokio::task::spawn_blocking(move || {
            hhd_ui::hhd_form::run_form("Handheld Daemon Settings", sections)
        })
        .await??;
        if let Some(values) = saved {
            println!("{}", serde_json::to_string_pretty(&values)?);
        }
        return Ok(());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(container.sections())?);
        return Ok(());
    }

    let rendered = container.to_html();
    match html {
        Some(path) => {
            let path = ctx.resolve(&path);
            tokio::fs::write(&path, rendered)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("{}", format!("Settings written to {}", path.display()).green());
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

async fn controllers(ctx: &AppContext, replay: PathBuf, ticks: Option<u64>) -> anyhow::Result<()> {
    let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
    let mut source = ReplaySource::load(&ctx.resolve(&replay))
        .await?
        .with_events(tx);
    info!("Replaying {} frames", source.frame_count());

    let mut sink = TerminalSink::new(std::io::stdout());
    let options = PollOptions {
        interval: ctx.config.poll_interval(),
        max_ticks: ticks,
    };

    tokio::select! {
        stats = run_poll_loop(&mut source, &mut sink, rx, options) => {
            println!(
                "{}",
                format!("Replay finished: {} polls, {} renders", stats.ticks, stats.renders).purple()
            );
        }
        _ = tokio::signal::ctrl_c() => {
            println!("{}", "Interrupted".yellow());
        }
    }
    Ok(())
}

fn sx_mode(ctx: &AppContext, state: Option<Toggle>) -> anyhow::Result<()> {
    let mut store = ctx.pref_store()?;
    let mut page = PageState::restore(&store);

    if let Some(state) = state {
        page.set_sx_mode(matches!(state, Toggle::On), &mut store)?;
        debug!("{SX_MODE_KEY} saved to {}", store.path().display());
    }

    let label = if page.sx_mode {
        "on".green().bold()
    } else {
        "off".normal()
    };
    println!("SX mode: {label} (logo: {})", page.logo);
    Ok(())
}
