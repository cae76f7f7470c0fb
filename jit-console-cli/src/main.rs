//! Terminal host for the JIT access console
//!
//! Runs the console shell against the backend: resolves the environment,
//! initializes the model and offers the environment switch. Every
//! navigation requested by the shell starts a new page load with a fresh
//! service context, like a browser reload would.
//!
//! Usage: `jit-console [#!/environments/<name>/...]`

mod adapters;
mod config;

use std::future::Future;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use adapters::{CliNavigator, DebugModelClient, HttpModelClient, JsonSettingsStore, TerminalUi};
use anyhow::{Context, Result};
use config::AppConfig;
use jit_console_core::services::{BootstrapService, ServiceContext, Surfaces};
use jit_console_core::traits::strip_fragment;
use jit_console_core::types::BootstrapOutcome;
use jit_console_core::{ModelClient, SettingsStore};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr, stdout belongs to the console
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let config = AppConfig::load()?;
    tracing::info!("Starting JIT console for {}", config.base_url);

    let model: Arc<dyn ModelClient> = if config.debug_model {
        tracing::warn!("Using the debug model, no backend requests are made");
        Arc::new(DebugModelClient::new())
    } else {
        Arc::new(
            HttpModelClient::new(
                &config.base_url,
                Duration::from_secs(config.request_timeout_secs),
            )
            .context("Failed to create model client")?,
        )
    };

    let settings_path = config.settings_path();
    tracing::debug!("Settings file: {}", settings_path.display());
    let settings: Arc<dyn SettingsStore> = Arc::new(JsonSettingsStore::new(settings_path));

    let ui = Arc::new(TerminalUi::new());
    let mut commands = spawn_input_pump(Arc::clone(&ui));

    let mut href = initial_location(&config.base_url, std::env::args().nth(1).as_deref());

    'page: loop {
        tracing::debug!("Page load: {href}");
        let navigator = Arc::new(CliNavigator::new(href.clone()));
        let surfaces = Surfaces {
            modal: ui.clone(),
            list: ui.clone(),
            banner: ui.clone(),
            header: ui.clone(),
        };
        let ctx = Arc::new(ServiceContext::new(
            Arc::clone(&model),
            Arc::clone(&settings),
            navigator.clone(),
            surfaces,
        ));
        let service = BootstrapService::new(Arc::clone(&ctx));

        let Some(outcome) = until_eof(service.start(), &mut commands, &ui).await else {
            return Ok(());
        };
        match outcome {
            Ok(BootstrapOutcome::Ready(session)) => {
                tracing::info!("Ready: {} ({:?})", session.environment, session.resource);
                ui.print_help();
            }
            Ok(BootstrapOutcome::Reloading { environment }) => {
                tracing::info!("Reloading with environment {environment}");
            }
            Ok(BootstrapOutcome::Unresolved) => {
                ui.line("No environment selected. Type 'env' to choose one.");
            }
            // Already shown in the banner
            Err(_) => {}
        }

        loop {
            if let Some(next) = navigator.take_navigation() {
                href = next;
                continue 'page;
            }

            let Some(command) = commands.recv().await else {
                return Ok(());
            };
            match command.as_str() {
                "quit" | "exit" => return Ok(()),
                "help" => ui.print_help(),
                "reload" => ctx.banner().reload(),
                "env" => {
                    if until_eof(service.change_environment(), &mut commands, &ui)
                        .await
                        .is_none()
                    {
                        return Ok(());
                    }
                }
                other => ui.line(&format!("Unknown command '{other}', type 'help'")),
            }
        }
    }
}

/// Location of the first page load: the base URL with the fragment given on
/// the command line.
fn initial_location(base_url: &str, fragment: Option<&str>) -> String {
    let base = strip_fragment(base_url);
    match fragment.map(str::trim).filter(|f| !f.is_empty()) {
        Some(fragment) if fragment.starts_with('#') => format!("{base}{fragment}"),
        Some(fragment) => format!("{base}#{fragment}"),
        None => base.to_string(),
    }
}

/// Read stdin line by line; lines the UI does not consume become commands.
///
/// At end of input an open modal is dismissed and the command channel closes.
fn spawn_input_pump(ui: Arc<TerminalUi>) -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if let Some(command) = ui.dispatch(&line) {
                        if tx.send(command).is_err() {
                            break;
                        }
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!("Failed to read input: {e}");
                    break;
                }
            }
        }
        if ui.is_modal_open() {
            ui.dispatch("q");
        }
    });

    rx
}

/// Drive `task` to completion while answering commands that arrive meanwhile.
///
/// Returns `None` when the user quits or input ends first.
async fn until_eof<F: Future>(
    task: F,
    commands: &mut mpsc::UnboundedReceiver<String>,
    ui: &TerminalUi,
) -> Option<F::Output> {
    tokio::pin!(task);
    loop {
        tokio::select! {
            output = &mut task => return Some(output),
            command = commands.recv() => match command.as_deref() {
                None | Some("quit" | "exit") => return None,
                Some(_) => ui.line("Busy, please wait."),
            },
        }
    }
}
