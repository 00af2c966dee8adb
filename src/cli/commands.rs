use crate::config::ServerConfig;
use crate::dispatcher::not_found_body;
use crate::router::{RouteError, Router};
use crate::server::{AppService, ContentType, HttpServer};
use crate::static_files::StaticFiles;
use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use http::{Method, StatusCode};
use serde_json::json;
use std::path::PathBuf;
use tracing::info;

/// Command-line interface for tinyroute
#[derive(Parser)]
#[command(name = "tinyroute")]
#[command(about = "Segment-trie HTTP router demo server", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Run the demo application
    Serve {
        /// Config file (YAML, TOML or JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Address and port to bind, overriding the config
        #[arg(long)]
        addr: Option<String>,

        /// Directory served under /files/{file}
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
    /// Print the demo routing table
    Routes,
    /// Resolve a request against the demo routing table
    Resolve {
        /// HTTP method, e.g. GET
        method: String,
        /// Request path, e.g. /hello/world
        path: String,
    },
}

/// Build the demo application's routes.
///
/// `/files/{file}` answers 404 for every file when no static directory is
/// configured.
///
/// # Errors
///
/// Returns a [`RouteError`] if two demo routes collide.
pub fn demo_router(static_files: Option<StaticFiles>) -> Result<Router, RouteError> {
    let mut router: Router = Router::new();
    router
        .get("/", |_req, res| Ok(res.send_text("tinyroute is running")?))?
        .get("/health", |_req, res| {
            Ok(res.send_json(&json!({ "status": "ok" }))?)
        })?
        .get("/hello/{name}", |req, res| {
            let name = req.param("name").unwrap_or("stranger");
            Ok(res.send_text(format!("Hello, {name}!"))?)
        })?
        .post("/echo", |req, res| {
            let body: serde_json::Value = req.json().context("echo expects a JSON body")?;
            Ok(res.send_json(&body)?)
        })?
        .get("/files/{file}", move |req, res| {
            let file = req.param("file").unwrap_or_default();
            match &static_files {
                Some(files) => files.serve(file, req.path(), res)?,
                None => res.send(
                    StatusCode::NOT_FOUND,
                    ContentType::PlainText,
                    not_found_body(req.path()),
                )?,
            }
            Ok(())
        })?;
    Ok(router)
}

/// One `METHOD pattern` line per registered route.
#[must_use]
pub fn format_routes<H>(router: &Router<H>) -> String {
    router
        .routes()
        .into_iter()
        .map(|(method, pattern)| format!("{method:<7}{pattern}\n"))
        .collect()
}

/// Describe how `method path` resolves against `router`.
///
/// # Errors
///
/// Returns an error if `method` is not a valid HTTP method token.
pub fn describe_resolution<H>(
    router: &Router<H>,
    method: &str,
    path: &str,
) -> anyhow::Result<String> {
    let method = Method::from_bytes(method.to_uppercase().as_bytes())
        .map_err(|_| anyhow!("invalid HTTP method '{method}'"))?;
    let Some(m) = router.resolve(&method, path) else {
        return Ok(format!("{method} {path} -> no match"));
    };
    let bindings: String = m
        .path_params
        .iter()
        .map(|(name, value)| format!("\n  {name} = {value}"))
        .collect();
    Ok(format!("{method} {path} -> {}{bindings}", m.pattern))
}

fn serve(
    config: Option<PathBuf>,
    addr: Option<String>,
    static_dir: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mut server_config = match config {
        Some(path) => ServerConfig::load(&path)?,
        None => ServerConfig::default(),
    };
    server_config.apply_env()?;
    if static_dir.is_some() {
        server_config.static_dir = static_dir;
    }
    let addr = addr.unwrap_or_else(|| server_config.addr());
    server_config.apply_runtime();

    let static_files = server_config.static_dir.clone().map(StaticFiles::new);
    if let Some(files) = &static_files {
        info!(static_dir = %files.base_dir().display(), "Serving static files");
    }
    let service = AppService::new(demo_router(static_files)?);
    let handle = HttpServer(service)
        .start(addr.as_str())
        .with_context(|| format!("failed to bind {addr}"))?;
    handle
        .join()
        .map_err(|e| anyhow!("server coroutine panicked: {e:?}"))
}

/// Execute the parsed CLI command
///
/// # Errors
///
/// Returns an error if:
/// - The config file cannot be loaded or an env override is invalid
/// - The server fails to bind or its accept loop panics
/// - `resolve` is given an invalid method
pub fn run_cli(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Serve {
            config,
            addr,
            static_dir,
        } => serve(config, addr, static_dir),
        Commands::Routes => {
            print!("{}", format_routes(&demo_router(None)?));
            Ok(())
        }
        Commands::Resolve { method, path } => {
            println!("{}", describe_resolution(&demo_router(None)?, &method, &path)?);
            Ok(())
        }
    }
}
