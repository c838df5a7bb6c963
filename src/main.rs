mod args;
mod decode;
mod encode;
mod error;
mod luminance;
mod qr;

use anyhow::{Context, Result};
use args::{parse_args, Cli, Invocation, Mode, Request, USAGE};
use clap::{CommandFactory, Parser};
use encode::{DEFAULT_OUTPUT, FALLBACK_TARGET};
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    init_tracing()?;

    let cli = Cli::parse();

    let (mode, args) = match cli.request() {
        Request::Convert { mode, args } => (mode, args),
        Request::Help => {
            Cli::command().print_help()?;
            return Ok(());
        }
        Request::Version => {
            print!("{}", Cli::command().render_version());
            return Ok(());
        }
        Request::Usage => {
            println!("Usage: {USAGE}");
            return Ok(());
        }
    };

    let Some(Invocation { input, output }) = parse_args(args) else {
        println!("Error: Input is required");
        return Ok(());
    };

    match mode.parse::<Mode>() {
        Ok(Mode::Encode) => {
            let output = output.as_deref().unwrap_or(DEFAULT_OUTPUT);
            let written = encode::encode_to_file(&input, output)
                .with_context(|| format!("Failed to encode QR code to {output}"))?;
            println!("QR code written to {written}");
        }
        Ok(Mode::Decode) => {
            let url = decode::decode_file(Path::new(&input))
                .with_context(|| format!("Failed to decode QR code from {input}"))?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &url)
                        .with_context(|| format!("Failed to write TOTP URL to {path}"))?;
                    println!("TOTP URL written to {path}");
                }
                None => println!("{url}"),
            }
        }
        Err(_) => println!("Error: Mode must be 'encode' or 'decode'"),
    }

    Ok(())
}

/// `RUST_LOG` drives the filter, but format fallback warnings are always kept.
fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"))
        .add_directive(format!("{FALLBACK_TARGET}=warn").parse()?);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
    Ok(())
}
