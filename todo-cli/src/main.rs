//! todo-server binary
//!
//! Loads `.env`, sets up tracing and runs the todo HTTP API.

use anyhow::Result;
use clap::Parser;

mod commands;
mod tracing_setup;

use commands::serve::{run_serve, ServeArgs};
use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "todo-server",
    author,
    version,
    about = "CRUD HTTP service for todo items backed by PostgreSQL"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long)]
    debug: bool,

    /// Export traces over OTLP (requires the `telemetry` feature)
    #[arg(long)]
    otel: bool,

    #[command(flatten)]
    serve: ServeArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Missing .env is fine; the environment and defaults still apply
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    tracing_setup::init(&TracingConfig {
        debug: cli.debug,
        otel: cli.otel,
    })?;

    let result = run_serve(cli.serve).await;
    tracing_setup::shutdown();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn explicit_flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "todo-server",
            "--bind",
            "127.0.0.1:9000",
            "--database-url",
            "postgres://u:p@db/todos",
            "--frontend-url",
            "https://todos.example.com",
            "--max-connections",
            "12",
            "--acquire-timeout-secs",
            "2",
            "--debug",
        ])
        .unwrap();

        assert!(cli.debug);
        assert_eq!(cli.serve.bind.port(), 9000);
        assert_eq!(cli.serve.database_url, "postgres://u:p@db/todos");
        assert_eq!(cli.serve.frontend_url, "https://todos.example.com");
        assert_eq!(cli.serve.max_connections, 12);
        assert_eq!(
            cli.serve.pool_settings().acquire_timeout,
            std::time::Duration::from_secs(2)
        );
    }

    #[test]
    fn rejects_bad_bind_address() {
        assert!(Cli::try_parse_from(["todo-server", "--bind", "not-an-addr"]).is_err());
    }
}
