//! # CLI Module
//!
//! Command-line entry points for the `tinyroute` binary.
//!
//! ## Commands
//!
//! ### `serve`
//!
//! Run the demo application:
//!
//! ```bash
//! tinyroute serve --config tinyroute.yaml --static-dir ./public
//! ```
//!
//! Options:
//! - `--config <FILE>` - YAML, TOML or JSON config file
//! - `--addr <HOST:PORT>` - bind address, overriding config and environment
//! - `--static-dir <DIR>` - directory served under `/files/{file}`
//!
//! ### `routes`
//!
//! Print the demo routing table, one `METHOD pattern` per line.
//!
//! ### `resolve`
//!
//! Show which pattern a request would hit and what it binds:
//!
//! ```bash
//! $ tinyroute resolve GET /hello/world
//! GET /hello/world -> /hello/{name}
//!   name = world
//! ```
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use tinyroute::cli::{run_cli, Cli};
//! use clap::Parser;
//!
//! run_cli(Cli::parse())?;
//! ```

mod commands;


pub use commands::{demo_router, describe_resolution, format_routes, run_cli, Cli, Commands};
