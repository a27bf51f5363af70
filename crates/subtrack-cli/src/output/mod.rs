mod error_text;
mod format;
mod json;
mod mode;
mod spending_text;

use std::io;

use subtrack_client::{ClientError, SuccessEnvelope};

use crate::stdout_io::write_stdout_line;

pub use mode::{OutputMode, mode_for_command};

pub fn print_success(success: &SuccessEnvelope, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Text => render_text_success(success)?,
        OutputMode::Json => json::render_success_json(success)?,
    };
    write_stdout_line(&body)
}

pub fn print_failure(error: &ClientError, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Json => json::render_error_json(error)?,
        OutputMode::Text => error_text::render_error(error),
    };
    write_stdout_line(&body)
}

fn render_text_success(success: &SuccessEnvelope) -> io::Result<String> {
    match success.command.as_str() {
        "summary" => spending_text::render_summary(&success.data),
        "categories" => spending_text::render_categories(&success.data),
        "cycles" => spending_text::render_cycles(&success.data),
        "list" => spending_text::render_list(&success.data),
        "upcoming" => spending_text::render_upcoming(&success.data),
        "forecast" => spending_text::render_forecast(&success.data),
        "dash" => spending_text::render_dash(&success.data),
        "validate" => spending_text::render_validate(&success.data),
        _ => Err(io::Error::other(format!(
            "unsupported text output command `{}`",
            success.command
        ))),
    }
}
