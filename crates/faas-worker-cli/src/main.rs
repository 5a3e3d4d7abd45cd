//! faas worker command line tool.
//!
//! Provides the `faas-worker` binary for inspecting and exercising the
//! handlers compiled into the worker without starting the HTTP server:
//! `handlers` lists them, `resolve` checks an identifier, and `invoke` runs
//! one handler on a payload.
//!
//! Uses the same registry and guarded invocation as the server's `POST /`.

use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use faas_worker_core::{invoke_guarded, HandlerRegistry, DEFAULT_HANDLER};

/// faas worker handler tools.
#[derive(Parser)]
#[command(name = "faas-worker", about = "faas worker handler tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// List every registered handler.
    Handlers,

    /// Check that a handler identifier resolves.
    Resolve {
        /// Dotted identifier, e.g. `decoders.decode_type_a`.
        identifier: String,
    },

    /// Run a handler on a payload and print the result as JSON.
    Invoke {
        /// Handler identifier.
        #[arg(long, env = "HANDLER_FUNCTION", default_value = DEFAULT_HANDLER)]
        handler: String,

        /// Raw payload passed to the handler.
        payload: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let registry = match faas_worker_functions::registry() {
        Ok(registry) => registry,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let exit_code = match cli.command {
        Commands::Handlers => run_handlers(&registry),
        Commands::Resolve { identifier } => run_resolve(&registry, &identifier),
        Commands::Invoke { handler, payload } => run_invoke(&registry, &handler, payload),
    };
    process::exit(exit_code);
}

fn run_handlers(registry: &HandlerRegistry) -> i32 {
    for (identifier, kind) in registry.identifiers() {
        let marker = if identifier == DEFAULT_HANDLER {
            " (default)"
        } else {
            ""
        };
        println!("{:<40} {}{}", identifier, kind, marker);
    }
    0
}

fn run_resolve(registry: &HandlerRegistry, identifier: &str) -> i32 {
    match registry.resolve(identifier) {
        Ok(handler) => {
            println!("{} ({})", identifier, handler.kind());
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

/// Execute the invoke subcommand.
///
/// Returns exit code: 0 = success, 1 = resolution or handler error,
/// 3 = runtime setup error.
fn run_invoke(registry: &HandlerRegistry, identifier: &str, payload: String) -> i32 {
    let handler = match registry.resolve(identifier) {
        Ok(handler) => handler,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: failed to start runtime: {}", e);
            return 3;
        }
    };

    match runtime.block_on(invoke_guarded(handler.as_ref(), payload)) {
        Ok(result) => {
            let body = serde_json::json!({ "result": result });
            let json = serde_json::to_string_pretty(&body).unwrap_or_else(|e| {
                format!("{{\"error\": \"failed to serialize result: {}\"}}", e)
            });
            println!("{}", json);
            0
        }
        Err(e) => {
            eprintln!("Error executing handler function: {}", e);
            1
        }
    }
}
