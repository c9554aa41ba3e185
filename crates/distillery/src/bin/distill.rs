// ABOUTME: CLI binary for the Distillery content extractor.
// ABOUTME: Reads an HTML file or stdin and writes the main content as HTML, Markdown, text or JSON.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use distillery::{ContentType, DistillError, DistillResult, Document, Options, Resource};
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "distill")]
#[command(about = "Extract the main content of an HTML page")]
struct Args {
    /// HTML file to read (default: stdin)
    #[arg()]
    input: Option<PathBuf>,

    /// Output format: html (default), markdown/md, text/txt
    #[arg(short = 'f', long = "format", default_value = "html")]
    format: String,

    /// Skip cleaning the selected content
    #[arg(long = "no-clean")]
    no_clean: bool,

    /// Keep images and the nodes holding them
    #[arg(long = "images")]
    images: bool,

    /// Input charset, overriding <meta> and detection
    #[arg(long = "charset")]
    charset: Option<String>,

    /// Output the full result as JSON instead of raw content
    #[arg(long = "json")]
    json_output: bool,

    /// Output file path (default: stdout)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Print elapsed time in ms to stderr
    #[arg(long = "timing")]
    timing: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Install a stderr subscriber. RUST_LOG wins over -v.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn read_input(args: &Args) -> Result<Resource, DistillError> {
    let charset = args.charset.as_deref();
    match &args.input {
        Some(path) => Resource::from_path(path, charset),
        None => Resource::from_reader(io::stdin().lock(), charset),
    }
}

/// Render the result as bytes: pretty JSON, or raw content in the input's encoding.
fn format_output(
    result: &DistillResult,
    resource: &Resource,
    json_output: bool,
) -> Result<Vec<u8>, serde_json::Error> {
    if json_output {
        serde_json::to_vec_pretty(result)
    } else {
        Ok(resource.encode(&result.content).into_owned())
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let options = Options::builder()
        .clean(!args.no_clean)
        .images(args.images)
        .content_type(ContentType::from(args.format.as_str()))
        .build();
    debug!(?options, "parsed arguments");

    let start = Instant::now();

    let resource = match read_input(&args) {
        Ok(resource) => resource,
        Err(e) => {
            eprintln!("error reading input: {}", e);
            return ExitCode::from(1);
        }
    };

    let result = match Document::from_resource(&resource).extract(&options) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("error distilling content: {}", e);
            return ExitCode::from(1);
        }
    };

    let elapsed = start.elapsed();
    let mut output = match format_output(&result, &resource, args.json_output) {
        Ok(output) => output,
        Err(e) => {
            eprintln!("error serializing result: {}", e);
            return ExitCode::from(1);
        }
    };
    output.push(b'\n');

    let written = match &args.output {
        Some(path) => fs::write(path, &output)
            .map_err(|e| format!("error writing to {:?}: {}", path, e)),
        None => io::stdout()
            .lock()
            .write_all(&output)
            .map_err(|e| format!("error writing to stdout: {}", e)),
    };

    if args.timing {
        let _ = writeln!(io::stderr(), "elapsed: {}ms", elapsed.as_millis());
    }

    match written {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{}", message);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (DistillResult, Resource) {
        let resource = Resource::from_bytes(b"<p>caf\xe9</p>", Some("windows-1252"));
        let result = DistillResult {
            title: "Menu".to_string(),
            content: "café".to_string(),
            ..Default::default()
        };
        (result, resource)
    }

    #[test]
    fn format_output_json_is_parseable() {
        let (result, resource) = sample();
        let bytes = format_output(&result, &resource, true).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["title"], "Menu");
        assert_eq!(json["content"], "café");
    }

    #[test]
    fn format_output_raw_uses_input_encoding() {
        let (result, resource) = sample();
        let bytes = format_output(&result, &resource, false).unwrap();
        assert_eq!(bytes, b"caf\xe9".to_vec());
    }
}
