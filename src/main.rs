//! route-dispatcher CLI
//!
//! Loads a TOML route table and exercises it from the command line.
//!
//! # Architecture Overview
//!
//! ```text
//!   routes.toml ──▶ config::loader ──▶ routing::builder ──▶ RouteRegistry
//!                                                              │
//!   METHOD URI ──▶ http::Request::parse ──▶ dispatch::Dispatcher ◀┘
//!                                               │
//!                                               ▼
//!                                   Action ──▶ http::Response ──▶ stdout
//! ```

use std::error::Error;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use route_dispatcher::config::{load_config, LogFormat, RouterConfig};
use route_dispatcher::observability::{logging, metrics};
use route_dispatcher::routing::build_registry;
use route_dispatcher::{Dispatcher, HookRegistry, Method, Request, Response, RouteRegistry};

#[derive(Parser)]
#[command(name = "route-dispatcher")]
#[command(about = "Inspect and exercise a route table", long_about = None)]
struct Cli {
    /// Route table file
    #[arg(short, long, default_value = "routes.toml")]
    config: PathBuf,

    /// Override the configured log level
    #[arg(long)]
    log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the route table in match order
    Routes,
    /// Validate the route table file
    Check,
    /// Dispatch a single request through the route table
    Dispatch {
        /// Request method (GET, POST, PUT, DELETE, CLI)
        method: String,
        /// Request URI, including an optional query string
        uri: String,
        /// Print Prometheus metrics after the dispatch
        #[arg(long)]
        metrics: bool,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let mut config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if cli.json_logs {
        config.logging.format = LogFormat::Json;
    }
    logging::init_logging(&config.logging)?;

    match cli.command {
        Commands::Check => {
            println!(
                "{}: ok ({} routes{})",
                cli.config.display(),
                config.routes.len(),
                if config.not_found.is_some() { ", 404 route" } else { "" }
            );
        }
        Commands::Routes => {
            let registry = build_registry(&config)?;
            print_routes(&registry);
        }
        Commands::Dispatch {
            method,
            uri,
            metrics: with_metrics,
        } => {
            let handle = if with_metrics {
                Some(metrics::install_prometheus()?)
            } else {
                None
            };

            let method: Method = method.parse()?;
            let response = dispatch_one(config, method, &uri)?;

            println!("Status: {}", response.status());
            for (name, value) in response.headers() {
                println!("{}: {}", name, value);
            }
            println!();
            println!("{}", response.body());

            if let Some(handle) = handle {
                println!();
                print!("{}", handle.render());
            }
        }
    }

    Ok(())
}

fn dispatch_one(config: RouterConfig, method: Method, uri: &str) -> Result<Response, Box<dyn Error>> {
    let registry = build_registry(&config)?;
    let mut dispatcher = Dispatcher::new(Arc::new(registry), Arc::new(HookRegistry::new()));
    if let Some(segments) = config.segments {
        dispatcher = dispatcher.with_segments(segments);
    }

    let mut request = Request::parse(method, uri);
    let mut response = Response::new();
    let outcome = dispatcher.dispatch(&mut request, &mut response, &[])?;
    tracing::info!(
        resolution = outcome.resolution.as_str(),
        invoked = outcome.invoked,
        "Dispatch complete"
    );
    Ok(response)
}

fn print_routes(registry: &RouteRegistry) {
    println!("{:<4} {:<24} {:<32} FLAGS", "#", "METHODS", "PATTERN");
    for (idx, route) in registry.iter().enumerate() {
        let mut flags = Vec::new();
        if route.is_default() {
            flags.push("default");
        }
        if route.is_404() {
            flags.push("404");
        }
        println!(
            "{:<4} {:<24} {:<32} {}",
            idx,
            route.method().to_string(),
            route.uri(),
            flags.join(",")
        );
    }
}
