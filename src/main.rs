use std::process::ExitCode;

use anyhow::{Context, Result};
use openapi_resources::{
    build_commands, execute, render, schema, ApiConfig, CliConfig, CommandRegistry, Invocation,
    ReqwestTransport, StartupOptions,
};
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_BASE_URI: &str = "https://app.launchdarkly.com";

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let config = CliConfig::new(
        "openapi-resources",
        "Make requests against any resource of an OpenAPI-described service",
        DEFAULT_BASE_URI,
    );

    let startup = match StartupOptions::parse(&config, std::env::args_os()) {
        Ok(startup) => startup,
        Err(err) => err.exit(),
    };
    init_tracing(startup.verbose);

    let schema_path = startup.schema(&config)?;
    let resources = schema::load_file(schema_path)
        .with_context(|| format!("failed to load {}", schema_path.display()))?;
    let registry = CommandRegistry::build(&resources).context("failed to build commands")?;
    tracing::info!(commands = registry.len(), "command tree ready");

    let matches = build_commands(&config, &registry).get_matches();
    let (resource, resource_matches) = matches
        .subcommand()
        .context("no resource given")?;
    let (command, leaf) = resource_matches
        .subcommand()
        .context("no operation given")?;
    let node = registry
        .find(resource, command)
        .with_context(|| format!("unknown command: {resource} {command}"))?;

    let api = ApiConfig::from_matches(&config, leaf)?;
    let transport = ReqwestTransport::new(config.timeout)?;
    let invocation = Invocation::from_matches(node, leaf);

    let response = execute(&transport, node, &invocation, &api)?;
    let output = render(&response)?;
    println!("{output}");
    Ok(())
}

/// Logs go to stderr; `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(verbose >= 2)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}
