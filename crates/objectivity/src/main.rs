mod cli;
mod config;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tokio::net::TcpListener;
use tracing::{info, warn};

use llm_rewriter::{GeminiClient, LlmError, LlmRewriter};
use objectivity_api::{
    create_router, serve, AnalysisMode, AnalysisRequest, Analyzer, AppState,
};

use crate::cli::{Cli, Command};
use crate::config::{Config, LlmConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Parse CLI args.
    let cli = Cli::parse();

    // 2. Load config, then merge CLI overrides.
    let loaded = config::load(&cli.config)?;
    let mut cfg = loaded.config;

    if let Some(ref listen) = cli.listen {
        cfg.server.listen_addr = listen.clone();
    }
    if let Some(ref level) = cli.log_level {
        cfg.logging.level = level.clone();
    }

    // 3. Init tracing-subscriber with JSON format.  Logs go to stderr so the
    //    one-shot subcommands keep stdout for their JSON output.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level));

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
        .init();

    if loaded.missing {
        warn!(
            path = %cli.config.display(),
            "configuration file not found; using defaults"
        );
    }

    // 4. Compile the rule tables once.
    let analyzer = Analyzer::new().context("failed to build analyzer")?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => run_server(cfg, analyzer).await,
        Command::Analyze { text, domain, ai } => {
            let request = AnalysisRequest {
                prompt: Some(text),
                domain,
                mode: if ai { AnalysisMode::Ai } else { AnalysisMode::Rules },
            };
            let llm = if ai {
                Some(build_llm(&cfg.llm).context("AI mode requested but unavailable")?)
            } else {
                None
            };
            let response = analyzer.handle(&request, llm.as_ref()).await?;
            print_json(&response)
        }
        Command::Detect { text } => {
            let response = analyzer.detect(&AnalysisRequest::new(text))?;
            print_json(&response)
        }
    }
}

async fn run_server(cfg: Config, analyzer: Analyzer) -> Result<()> {
    info!(
        listen = %cfg.server.listen_addr,
        llm_enabled = cfg.llm.enabled,
        "objectivity starting"
    );

    let llm = if cfg.llm.enabled {
        match build_llm(&cfg.llm) {
            Ok(llm) => {
                info!(model = llm.generator().model(), "AI mode enabled");
                Some(llm)
            }
            Err(err) => {
                warn!(%err, "AI mode disabled");
                None
            }
        }
    } else {
        info!("AI mode disabled by configuration");
        None
    };

    let listen_addr: SocketAddr = cfg
        .server
        .listen_addr
        .parse()
        .context("invalid listen address")?;
    let listener = TcpListener::bind(listen_addr)
        .await
        .with_context(|| format!("failed to bind {listen_addr}"))?;

    let router = create_router(Arc::new(AppState::new(analyzer, llm)));
    serve(listener, router, shutdown_signal()).await?;

    info!("objectivity shutting down");
    Ok(())
}

fn build_llm(cfg: &LlmConfig) -> Result<LlmRewriter<GeminiClient>, LlmError> {
    let client = GeminiClient::new(cfg.gemini_config()?)?;
    Ok(LlmRewriter::new(client))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("failed to render response")?;
    println!("{rendered}");
    Ok(())
}

/// Resolves on ctrl-c or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(%err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!(%err, "failed to register SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("received SIGINT (ctrl-c)");
        }
        _ = terminate => {
            info!("received SIGTERM");
        }
    }
}
