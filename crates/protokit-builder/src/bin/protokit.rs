//! Protokit host harness
//!
//! Reads a protocol request (`{"child": ..., "pastSessions": [...]}`) from
//! the file named on the command line, or stdin, and prints the generated
//! protocol as JSON.

use std::io::Read;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use protokit_builder::{GeneratorSettings, ProtocolGenerator, ProtocolRequest};
use protokit_common::VERSION;

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the protocol
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    info!("Starting protokit v{}", VERSION);

    let settings = GeneratorSettings::load()?;
    info!("Loaded configuration: {:?}", settings);

    let generator = ProtocolGenerator::from_settings(&settings)?;
    info!("Serving protocol builder '{}'", generator.builder_name());

    let input = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read request file {}", path))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read request from stdin")?;
            buf
        }
    };

    println!("{}", run(&generator, &input)?);
    Ok(())
}

/// Parse one request and render the generated protocol
fn run(generator: &ProtocolGenerator, input: &str) -> Result<String> {
    let request: ProtocolRequest =
        serde_json::from_str(input).context("request is not a valid protocol request")?;
    let document = generator.generate_request(&request)?;

    Ok(document.to_json_pretty()?)
}
