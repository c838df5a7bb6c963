use clap::Parser;
use std::str::FromStr;

pub const USAGE: &str = "qr-totp-converter <encode|decode> [-o output] <input>";

const OUTPUT_FLAG: &str = "-o";

/// Clap's own flags are only recognized as the first token, so every token
/// after the mode reaches [`parse_args`] untouched.
#[derive(Parser, Debug)]
#[command(name = "qr-totp-converter", version)]
#[command(about = "Convert TOTP URLs to QR code images and QR code images back to TOTP URLs")]
#[command(override_usage = USAGE)]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct Cli {
    /// Mode (encode or decode), then the TOTP URL or image path and an optional `-o <output>`
    #[arg(
        value_name = "ARGS",
        trailing_var_arg = true,
        allow_hyphen_values = true,
        num_args = 0..
    )]
    pub tokens: Vec<String>,
}

/// What the first token asks for.
#[derive(Debug, PartialEq, Eq)]
pub enum Request<'a> {
    Help,
    Version,
    /// Fewer than two tokens.
    Usage,
    Convert { mode: &'a str, args: &'a [String] },
}

impl Cli {
    pub fn request(&self) -> Request<'_> {
        match self.tokens.split_first() {
            Some((first, _)) if first == "-h" || first == "--help" => Request::Help,
            Some((first, _)) if first == "-V" || first == "--version" => Request::Version,
            Some((mode, args)) if !args.is_empty() => Request::Convert {
                mode: mode.as_str(),
                args,
            },
            _ => Request::Usage,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Encode,
    Decode,
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "encode" => Ok(Mode::Encode),
            "decode" => Ok(Mode::Decode),
            other => Err(format!("unknown mode: {other}")),
        }
    }
}

/// Input and optional output pulled out of the tokens following the mode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    pub input: String,
    pub output: Option<String>,
}

/// Scans `tokens` for `-o <output>` and the input.
///
/// Any token that is neither `-o` nor the value right after one is taken
/// as the input, the last one winning. A trailing `-o` is ignored.
/// Returns `None` when no input is present.
pub fn parse_args<S: AsRef<str>>(tokens: &[S]) -> Option<Invocation> {
    let mut input = None;
    let mut output = None;

    for (i, arg) in tokens.iter().map(AsRef::as_ref).enumerate() {
        if arg == OUTPUT_FLAG {
            if let Some(next) = tokens.get(i + 1) {
                output = Some(next.as_ref().to_string());
            }
        } else if i == 0 || tokens[i - 1].as_ref() != OUTPUT_FLAG {
            input = Some(arg.to_string());
        }
    }

    input.map(|input| Invocation { input, output })
}
