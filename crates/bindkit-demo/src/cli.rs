#![forbid(unsafe_code)]

//! Command-line argument parsing for the demo.
//!
//! Parses args manually to keep the binary lean. Supports environment
//! variable overrides via the `BINDKIT_DEMO_*` prefix.

use std::env;
use std::process;

use crate::logging::LogFormat;
use crate::screens::ScreenId;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
bindkit demo: observable state driving text-rendered screens

USAGE:
    bindkit-demo [OPTIONS]

OPTIONS:
    --screen=NAME        Screen to open above the catalog (default: catalog)
    --press=ACTION       Apply an action to the top screen; repeatable
    --log-format=FMT     Log format on stderr: 'pretty' or 'json' (default: pretty)
    --help, -h           Show this help message
    --version, -V        Show version

SCREENS:
    catalog   Navigation list            actions: info, dismiss, open=NAME
    form      Personal info form         actions: name=TEXT, location=N, building=N, type=N
    stacks    Rows and an alert          actions: alert, ok
    buttons   Action buttons             actions: send, add, map
    framed    Nested frames              actions: done
    list      Sections and a food list
    binding   Shared drink record        actions: load
    (every screen but the catalog also accepts 'back')

ENVIRONMENT VARIABLES:
    BINDKIT_DEMO_SCREEN       Override the default for --screen
    BINDKIT_DEMO_LOG_FORMAT   Override the default for --log-format
    BINDKIT_MAX_NOTIFY_PASSES Bound on queued notification passes (default: 1024)
    RUST_LOG                  Log filter (default: warn)";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    /// Screen pushed above the catalog at startup.
    pub screen: ScreenId,
    /// Actions applied in order after startup.
    pub presses: Vec<String>,
    /// Log output format.
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ParseError {
    Help,
    Version,
    InvalidValue { flag: &'static str, value: String },
    UnknownArg(String),
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            screen: ScreenId::Catalog,
            presses: Vec::new(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl Opts {
    /// Parse command-line arguments and environment variables.
    ///
    /// Environment variables take precedence over defaults but are overridden
    /// by explicit command-line flags.
    pub fn parse() -> Self {
        match Self::parse_from_env_and_args(env::args().skip(1), |key| env::var(key).ok()) {
            Ok(opts) => opts,
            Err(ParseError::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Err(ParseError::Version) => {
                println!("bindkit-demo {VERSION}");
                process::exit(0);
            }
            Err(ParseError::InvalidValue { flag, value }) => {
                eprintln!("Invalid {flag} value: {value}");
                process::exit(1);
            }
            Err(ParseError::UnknownArg(arg)) => {
                eprintln!("Unknown argument: {arg}");
                eprintln!("Run with --help for usage information.");
                process::exit(1);
            }
        }
    }

    fn parse_from_env_and_args<I, F>(args: I, mut get_env: F) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = String>,
        F: FnMut(&str) -> Option<String>,
    {
        let mut opts = Self::default();

        if let Some(value) = get_env("BINDKIT_DEMO_SCREEN") {
            opts.screen = parse_screen(&value)?;
        }
        if let Some(value) = get_env("BINDKIT_DEMO_LOG_FORMAT") {
            opts.log_format = parse_log_format(&value)?;
        }

        for arg in args {
            match arg.as_str() {
                "--help" | "-h" => return Err(ParseError::Help),
                "--version" | "-V" => return Err(ParseError::Version),
                _ => {}
            }
            if let Some(value) = arg.strip_prefix("--screen=") {
                opts.screen = parse_screen(value)?;
            } else if let Some(value) = arg.strip_prefix("--press=") {
                opts.presses.push(value.to_string());
            } else if let Some(value) = arg.strip_prefix("--log-format=") {
                opts.log_format = parse_log_format(value)?;
            } else {
                return Err(ParseError::UnknownArg(arg));
            }
        }

        Ok(opts)
    }
}

fn parse_screen(value: &str) -> Result<ScreenId, ParseError> {
    ScreenId::from_name(value).ok_or_else(|| ParseError::InvalidValue {
        flag: "--screen",
        value: value.to_string(),
    })
}

fn parse_log_format(value: &str) -> Result<LogFormat, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue {
        flag: "--log-format",
        value: value.to_string(),
    })
}
