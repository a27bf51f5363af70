mod cli;
mod dispatch;
mod logging;
mod output;
mod stdout_io;

use std::process::ExitCode;

use clap::{Parser, error::ErrorKind};
use subtrack_client::ClientError;
use stdout_io::write_stdout_text;

const ROOT_HELP: &str = "Subtrack - recurring subscription spending calculator

Usage:
  subtrack <command>

Start here:
  subtrack validate --help
  subtrack dash
";

const TOP_LEVEL_HELP: &str = "Subtrack - recurring subscription spending calculator

USAGE: subtrack <command> [--file <path>] [--as-of YYYY-MM-DD] [--json]

Set up your subscriptions:
  1. subtrack validate --help                 Read the file format and field rules
  2. subtrack validate <path>                 Check a file and list rows that need fixes

See where the money goes:
  subtrack dash                               Monthly spend, renewals due soon, category split
  subtrack summary                            Monthly and yearly totals
  subtrack categories                         Monthly spend per category
  subtrack cycles                             Monthly spend per billing cycle
  subtrack list [--search T] [--sort KEY]     Every subscription with costs and renewal

Look ahead:
  subtrack upcoming [--days N]                Renewals due within N days (default 30)
  subtrack forecast [--months N]              Month-by-month projection (default 12)

Where data comes from:
  --file <path> (or `-` for stdin), else SUBTRACK_FILE,
  else $SUBTRACK_HOME/subscriptions.json (SUBTRACK_HOME defaults to ~/.subtrack).
  Set SUBTRACK_LOG=debug to see diagnostics on stderr.

Having issues or errors?
  Run `subtrack <command> --help` for command usage.
";

fn main() -> ExitCode {
    logging::init();
    match run() {
        Ok(code) => code,
        Err(code) => code,
    }
}

fn run() -> Result<ExitCode, ExitCode> {
    let raw_args = std::env::args().collect::<Vec<String>>();
    if raw_args.len() == 1 {
        if write_stdout_text(ROOT_HELP).is_err() {
            return Err(ExitCode::from(2));
        }
        return Ok(ExitCode::SUCCESS);
    }
    let parsed = cli::Cli::try_parse();
    let cli = match parsed {
        Ok(value) => value,
        Err(err) => return Err(handle_parse_error(&err, &raw_args)),
    };
    let mode = output::mode_for_command(&cli.command);
    log::debug!("running `{}`", cli.command.name());

    match dispatch::dispatch(&cli) {
        Ok(success) => {
            if output::print_success(&success, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            log::debug!("`{}` failed with {}", cli.command.name(), error.code);
            if output::print_failure(&error, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Err(exit_code_for_error(&error))
        }
    }
}

/// Help and version requests exit 0; everything else is a usage error.
fn handle_parse_error(err: &clap::Error, raw_args: &[String]) -> ExitCode {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            let text = if is_top_level_help_request(raw_args) {
                TOP_LEVEL_HELP.to_string()
            } else {
                err.to_string()
            };
            if write_stdout_text(&text).is_err() {
                return ExitCode::from(2);
            }
            ExitCode::SUCCESS
        }
        ErrorKind::DisplayVersion => {
            if write_stdout_text(&err.to_string()).is_err() {
                return ExitCode::from(2);
            }
            ExitCode::SUCCESS
        }
        _ => {
            let command_hint = command_path_from_args(raw_args);
            let clean_message = strip_clap_boilerplate(&err.to_string());
            let parse_error =
                ClientError::invalid_argument_for_command(&clean_message, command_hint.as_deref());
            let mode = infer_requested_output_mode(raw_args);
            if output::print_failure(&parse_error, mode).is_err() {
                return ExitCode::from(2);
            }
            ExitCode::from(1)
        }
    }
}

fn is_top_level_help_request(raw_args: &[String]) -> bool {
    raw_args.len() == 2 && matches!(raw_args[1].as_str(), "--help" | "-h")
}

/// Drops clap's trailing usage block and "For more information" hint.
fn strip_clap_boilerplate(message: &str) -> String {
    let trimmed = if let Some(pos) = message.find("\n\nUsage:") {
        &message[..pos]
    } else if let Some(pos) = message.find("\nFor more information") {
        &message[..pos]
    } else {
        message
    };
    trimmed.trim_end().to_string()
}

/// The first non-flag argument, when it names a known command.
fn command_path_from_args(raw_args: &[String]) -> Option<String> {
    let first = raw_args
        .iter()
        .skip(1)
        .find(|value| !value.starts_with('-'))?;
    match first.as_str() {
        "summary" | "categories" | "cycles" | "list" | "upcoming" | "forecast" | "dash"
        | "validate" => Some(first.clone()),
        _ => None,
    }
}

fn exit_code_for_error(error: &ClientError) -> ExitCode {
    if is_internal_error(error) {
        ExitCode::from(2)
    } else {
        ExitCode::from(1)
    }
}

fn infer_requested_output_mode(raw_args: &[String]) -> output::OutputMode {
    if raw_args.iter().skip(1).any(|value| value == "--json") {
        return output::OutputMode::Json;
    }
    output::OutputMode::Text
}

fn is_internal_error(error: &ClientError) -> bool {
    error.code.starts_with("internal_")
        || matches!(
            error.code.as_str(),
            "home_unresolved" | "subscriptions_read_failed"
        )
}
