// SPDX-FileCopyrightText: 2026 Sigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sigil - discover, list, and run registered methods.
//!
//! This is the binary entry point. Configuration and plugin discovery happen
//! once at startup; any failure there ends the process with status 1.

mod methods;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, Subcommand};
use sigil_registry::Registry;
use tracing::{error, info};

use crate::methods::{methods, Method};

/// Sigil - discover, list, and run registered methods.
#[derive(Parser, Debug)]
#[command(name = "sigil", version, about, long_about = None)]
struct Cli {
    /// Load configuration from this file instead of the XDG hierarchy.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// List registered methods in discovery order.
    List,
    /// Describe a registered method.
    Show {
        /// Logical method name.
        name: String,
    },
    /// Run a registered method.
    Run {
        /// Logical method name.
        name: String,
        /// Number of times to invoke the method.
        #[arg(short = 'n', long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
        iterations: u64,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => sigil_config::load_and_validate_path(path),
        None => sigil_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            sigil_config::render_errors(&errors);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.logging.level);

    let registry = match methods(&config.registry.build_options()) {
        Ok(registry) => registry,
        Err(err) => {
            error!(error = %err, "method discovery failed");
            eprintln!("sigil: {err}");
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Some(Commands::List) => {
            print!("{}", render_list(registry));
            ExitCode::SUCCESS
        }
        Some(Commands::Show { name }) => match registry.entry(&name) {
            Some(entry) => {
                println!("name:        {}", entry.name());
                println!("type:        {}", entry.type_name());
                println!("description: {}", entry.instance().description());
                ExitCode::SUCCESS
            }
            None => report_miss(registry, &name),
        },
        Some(Commands::Run { name, iterations }) => match registry.lookup(&name) {
            Some(method) => {
                let (elapsed, last) = run(method.as_ref(), iterations);
                info!(name = %name, iterations, elapsed_ms = elapsed.as_millis() as u64, "method finished");
                println!("{name}: {iterations} iteration(s) in {elapsed:?} (result {last})");
                ExitCode::SUCCESS
            }
            None => report_miss(registry, &name),
        },
        None => {
            println!("sigil: use --help for available commands");
            ExitCode::SUCCESS
        }
    }
}

/// One `name<TAB>type` line per method, in discovery order.
fn render_list(registry: &Registry<dyn Method>) -> String {
    registry
        .entries()
        .map(|entry| format!("{}\t{}\n", entry.name(), entry.type_name()))
        .collect()
}

fn report_miss(registry: &Registry<dyn Method>, name: &str) -> ExitCode {
    match registry.require(name) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("sigil: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Invoke `method` `iterations` times, returning the elapsed time and the last result.
fn run(method: &dyn Method, iterations: u64) -> (std::time::Duration, u64) {
    let begin = Instant::now();
    let mut last = 0;
    for _ in 0..iterations {
        last = method.invoke();
    }
    (begin.elapsed(), last)
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let level = log_level.trim().to_ascii_lowercase();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("sigil={level},sigil_registry={level},warn"))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use sigil_config::SigilConfig;
    use sigil_registry::BuildOptions;

    #[test]
    fn binary_loads_config_defaults() {
        let config = sigil_config::load_and_validate_str("").expect("default config should be valid");
        assert_eq!(config, SigilConfig::default());
    }

    #[test]
    fn cli_parses_run_with_iterations() {
        let cli = Cli::try_parse_from(["sigil", "run", "noop", "-n", "5"]).unwrap();
        match cli.command {
            Some(Commands::Run { name, iterations }) => {
                assert_eq!(name, "noop");
                assert_eq!(iterations, 5);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn cli_rejects_zero_iterations() {
        assert!(Cli::try_parse_from(["sigil", "run", "noop", "-n", "0"]).is_err());
    }

    #[test]
    fn cli_accepts_global_config_flag() {
        let cli = Cli::try_parse_from(["sigil", "list", "--config", "/tmp/sigil.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/sigil.toml")));
        assert!(matches!(cli.command, Some(Commands::List)));
    }

    #[test]
    fn list_renders_one_line_per_method() {
        let registry = methods(&BuildOptions::default()).unwrap();
        let listing = render_list(registry);
        assert_eq!(listing.lines().count(), registry.len());
        assert!(listing.contains("noop\tsigil::methods::Noop"));
    }

    #[test]
    fn run_invokes_requested_times() {
        let registry = methods(&BuildOptions::default()).unwrap();
        let method = registry.lookup("alloc").unwrap();
        let (_, last) = run(method.as_ref(), 3);
        assert_eq!(last, 1024 * 1024);
    }
}
