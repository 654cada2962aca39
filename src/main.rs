//! IDO CLI - decompile and compile IDO game asset containers.
//!
//! The tool speaks a line protocol meant for a host process: progress and
//! diagnostics are JSON objects, one per line, and the last line on stdout
//! is always `RESULT:` followed by a single JSON result object.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Result};
use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

use ido::container::Error as ContainerError;
use ido::prelude::*;

/// IDO - game asset container codec
#[derive(Parser)]
#[command(name = "ido")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Operation to run: `decompile` or `compile`
    operation: String,

    /// Input file (a container for decompile, an artifact for compile)
    input: PathBuf,

    /// Output file
    output: PathBuf,

    /// How progress events are written
    #[arg(long, value_enum, default_value_t = LogFormat::Json, env = "IDO_LOG_FORMAT")]
    format: LogFormat,

    /// Zlib compression level used when compiling
    #[arg(
        long,
        default_value_t = 6,
        value_parser = clap::value_parser!(u32).range(0..=9),
        env = "IDO_COMPRESSION_LEVEL"
    )]
    level: u32,

    /// Legacy encoding of XML payloads
    #[arg(long, default_value = "euc-kr", env = "IDO_ENCODING")]
    encoding: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    /// One `{"level", "message"}` JSON object per line on stdout
    Json,
    /// Human-readable `tracing` output on stderr, filtered by `RUST_LOG`
    Text,
}

/// Writes events as JSON lines on stdout.
struct JsonLineSink;

impl EventSink for JsonLineSink {
    fn emit(&self, level: Level, message: &str) {
        let line = json!({ "level": level.as_str(), "message": message });
        let mut stdout = io::stdout().lock();
        // A closed stdout leaves nobody to report to.
        let _ = writeln!(stdout, "{}", line);
        let _ = stdout.flush();
    }
}

fn main() -> Result<ExitCode> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            print_result(&json!({ "success": false, "error": e.to_string().trim() }));
            return Ok(ExitCode::FAILURE);
        }
    };

    let sink: Box<dyn EventSink> = match cli.format {
        LogFormat::Json => Box::new(JsonLineSink),
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
                )
                .with_writer(io::stderr)
                .try_init()
                .map_err(|e| anyhow!("failed to initialise logging: {}", e))?;
            Box::new(TracingSink)
        }
    };

    let result = TranscodeOptions::default()
        .with_level(cli.level)
        .with_encoding(&cli.encoding)
        .and_then(|options| execute(&cli.operation, &cli.input, &cli.output, &options, &sink));

    if let Err(e @ ContainerError::UnknownEncoding(_)) = &result {
        sink.error(&e.to_string());
    }

    print_result(&result_json(&result));

    Ok(ExitCode::SUCCESS)
}

fn print_result(result: &Value) {
    println!("RESULT:{}", result);
}

fn result_json(result: &Result<Report, ContainerError>) -> Value {
    match result {
        Ok(Report::Decompiled(decompiled)) => {
            let mut value = json!({
                "success": true,
                "output": decompiled.output().display().to_string(),
                "type": decompiled.type_label(),
            });
            if let Some(meta) = decompiled.meta() {
                value["meta"] = json!(meta.display().to_string());
            }
            if let Decompiled::ShopDatabase { items, .. } = decompiled {
                value["items"] = json!(items);
            }
            value
        }
        Ok(Report::Compiled(compiled)) => json!({
            "success": true,
            "output": compiled.output.display().to_string(),
            "size": compiled.size,
        }),
        Err(e) => json!({ "success": false, "error": e.to_string() }),
    }
}
