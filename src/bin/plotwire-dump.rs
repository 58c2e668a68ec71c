//! plotwire-dump - flatten one message file into a series table
//!
//! Reads a single encoded message from disk, runs it through the parser and
//! prints every resulting series. Handy for checking what a topic's messages
//! will look like in a plot before wiring them into a host application.
//!
//! Usage:
//!   plotwire-dump [options] <format> <file>
//!
//! Options:
//!   --topic NAME       series path prefix (default: file stem)
//!   --key KEY          disambiguation key (field name or /json/pointer)
//!   --use-timestamp    honor a root-level numeric "timestamp" member
//!   --no-key-series    do not emit the resolved key member as its own series
//!   --config FILE      load parser settings from a TOML file instead

use anyhow::{bail, Context};
use plotwire::{MemorySink, MessageFormat, MessageParser, ParserConfig};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

struct Args {
    format: MessageFormat,
    file: PathBuf,
    topic: Option<String>,
    config: ParserConfig,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut topic = None;
    let mut config = ParserConfig::default();
    let mut positional = Vec::new();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--topic" => topic = Some(args.next().context("--topic needs a value")?),
            "--key" => config.key = args.next().context("--key needs a value")?,
            "--use-timestamp" => config.use_message_timestamp = true,
            "--no-key-series" => config.emit_key_series = false,
            "--config" => {
                let path = args.next().context("--config needs a value")?;
                config = ParserConfig::load(&path)?;
            }
            "--help" | "-h" => {
                bail!("usage: plotwire-dump [--topic NAME] [--key KEY] [--use-timestamp] [--no-key-series] [--config FILE] <format> <file>");
            }
            other => positional.push(other.to_owned()),
        }
    }

    let [format, file] = positional.as_slice() else {
        bail!("expected <format> <file> (formats: json, cbor, bson, msgpack)");
    };
    let format = format
        .parse::<MessageFormat>()
        .map_err(anyhow::Error::msg)?;

    Ok(Args {
        format,
        file: PathBuf::from(file),
        topic,
        config,
    })
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,plotwire=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = parse_args()?;

    let topic = match args.topic {
        Some(topic) => topic,
        None => args
            .file
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "message".to_owned()),
    };

    let bytes = std::fs::read(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    tracing::info!(
        "Parsing {} bytes of {} as topic '{}'",
        bytes.len(),
        args.format,
        topic
    );

    let parser = MessageParser::new(topic, args.format, args.config);
    let mut sink = MemorySink::new();
    let timestamp = parser.parse(&bytes, 0.0, &mut sink)?;

    println!("timestamp: {}", timestamp);
    println!("{} series:", sink.len());
    for path in sink.sorted_paths() {
        let series = sink.series(path).expect("path came from the sink");
        let values: Vec<String> = series
            .points()
            .iter()
            .map(|p| format!("{}", p.value))
            .collect();
        println!("  {:<48} {}", path, values.join(", "));
    }

    Ok(())
}
