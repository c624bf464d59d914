//! Command-line front end.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::app::{
    AssumeYes, DeleteOutcome, Dialogs, LoadOutcome, ResidentsListView, TerminalDialogs,
};
use crate::config::{AppConfig, ConfigOverrides};
use crate::domain::ResidentId;
use crate::services::{HttpResidentsApi, ResidentsApi};
use crate::ui::{render, RenderOptions};

#[derive(Debug, Parser)]
#[command(name = "residents-admin", version, about = "Manage resident accounts")]
pub struct Cli {
    /// Backend origin serving /api/residents
    #[arg(long, global = true, env = "RESIDENTS_API_URL", value_name = "URL")]
    pub api_url: Option<String>,

    /// Per-request timeout
    #[arg(long, global = true, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Config file (defaults to config.toml in the platform config dir)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Verbose logging to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show all residents
    List,
    /// Delete one resident after confirmation
    Delete {
        /// Resident identifier
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Show residents and accept delete commands interactively
    Browse,
    /// Open the resident list window
    #[cfg(feature = "gui")]
    Gui,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            config_path: self.config.clone(),
            api_url: self.api_url.clone(),
            timeout_secs: self.timeout,
            no_color: self.no_color,
        }
    }
}

/// Resolve config, build the backend client and run the chosen command.
pub fn execute(cli: Cli) -> Result<ExitCode> {
    let config = AppConfig::load(&cli.overrides()).context("failed to load configuration")?;
    let api: Arc<dyn ResidentsApi> = Arc::new(
        HttpResidentsApi::from_config(&config.api).context("failed to create API client")?,
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    let options = RenderOptions {
        color: config.ui.color && std::io::IsTerminal::is_terminal(&std::io::stdout()),
        dashboard_route: config.ui.dashboard_route.clone(),
    };
    let mut stdout = std::io::stdout().lock();

    let succeeded = match cli.command {
        Command::List => runtime.block_on(run_list(api, &options, &mut stdout)),
        Command::Delete { id, yes } => {
            let id = ResidentId::new(id);
            if yes {
                runtime.block_on(run_delete(api, id, &AssumeYes, &options, &mut stdout))
            } else {
                let dialogs = TerminalDialogs::stdio();
                runtime.block_on(run_delete(api, id, &dialogs, &options, &mut stdout))
            }
        }
        Command::Browse => {
            let dialogs = TerminalDialogs::stdio();
            runtime.block_on(run_browse(api, &dialogs, &options, &mut stdout))
        }
        #[cfg(feature = "gui")]
        Command::Gui => {
            drop(stdout);
            crate::app::App::run(&config, api, runtime.handle().clone())?;
            Ok(true)
        }
    }?;

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Load and print the list once. `false` when the load failed.
pub async fn run_list(
    api: Arc<dyn ResidentsApi>,
    options: &RenderOptions,
    out: &mut impl Write,
) -> Result<bool> {
    let mut view = ResidentsListView::new(api);
    let outcome = view.load().await;
    write!(out, "{}", render(view.state(), options))?;

    Ok(outcome != LoadOutcome::Failed)
}

/// Load the list, delete one resident, print the result.
///
/// `false` when the load or the delete failed, or the id is unknown.
pub async fn run_delete(
    api: Arc<dyn ResidentsApi>,
    id: ResidentId,
    dialogs: &dyn Dialogs,
    options: &RenderOptions,
    out: &mut impl Write,
) -> Result<bool> {
    let mut view = ResidentsListView::new(api);
    if view.load().await == LoadOutcome::Failed {
        write!(out, "{}", render(view.state(), options))?;
        return Ok(false);
    }

    let outcome = view.delete(id, dialogs).await;
    match outcome {
        DeleteOutcome::NotFound => writeln!(out, "No resident with id {id}.")?,
        DeleteOutcome::Declined => writeln!(out, "Cancelled.")?,
        _ => write!(out, "{}", render(view.state(), options))?,
    }

    Ok(!matches!(
        outcome,
        DeleteOutcome::Failed | DeleteOutcome::NotFound
    ))
}

/// One line typed at the browse prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Delete(ResidentId),
    Back,
    Quit,
    Help,
    Show,
    Unknown(String),
}

impl BrowseCommand {
    pub fn parse(line: &str) -> Self {
        let mut words = line.split_whitespace();
        match (words.next(), words.next(), words.next()) {
            (Some("delete" | "d"), Some(id), None) => match id.trim_start_matches('#').parse() {
                Ok(raw) => BrowseCommand::Delete(ResidentId::new(raw)),
                Err(_) => BrowseCommand::Unknown(line.to_string()),
            },
            (Some("back" | "b"), None, None) => BrowseCommand::Back,
            (Some("quit" | "q" | "exit"), None, None) => BrowseCommand::Quit,
            (Some("help" | "h" | "?"), None, None) => BrowseCommand::Help,
            (Some("show" | "s") | None, None, None) => BrowseCommand::Show,
            _ => BrowseCommand::Unknown(line.to_string()),
        }
    }
}

const BROWSE_HELP: &str = "Commands: delete <id>, show, back, quit";

/// Interactive session: render, then apply commands until back/quit/EOF.
pub async fn run_browse<R, W>(
    api: Arc<dyn ResidentsApi>,
    dialogs: &TerminalDialogs<R, W>,
    options: &RenderOptions,
    out: &mut impl Write,
) -> Result<bool>
where
    R: BufRead + Send,
    W: Write + Send,
{
    let mut view = ResidentsListView::new(api);
    view.load().await;
    write!(out, "{}", render(view.state(), options))?;
    writeln!(out, "{BROWSE_HELP}")?;
    out.flush()?;

    while let Some(line) = dialogs.read_line("> ") {
        match BrowseCommand::parse(&line) {
            BrowseCommand::Delete(id) => {
                match view.delete(id, dialogs).await {
                    DeleteOutcome::NotFound => writeln!(out, "No resident with id {id}.")?,
                    DeleteOutcome::InFlight => writeln!(out, "Delete already running.")?,
                    DeleteOutcome::Declined => {}
                    _ => write!(out, "{}", render(view.state(), options))?,
                }
            }
            BrowseCommand::Show => write!(out, "{}", render(view.state(), options))?,
            BrowseCommand::Help => writeln!(out, "{BROWSE_HELP}")?,
            BrowseCommand::Back => {
                writeln!(out, "Navigating to {}", options.dashboard_route)?;
                break;
            }
            BrowseCommand::Quit => break,
            BrowseCommand::Unknown(input) => {
                writeln!(out, "Unknown command: {input}. {BROWSE_HELP}")?
            }
        }
        out.flush()?;
    }

    view.teardown();
    Ok(true)
}
