use std::fs;
use std::io::{ErrorKind, IsTerminal, Read};
use std::path::Path;

use crate::contracts::types::SourceHint;
use crate::source::invalid_input_error;
use crate::state::DataLocation;
use crate::{ClientError, ClientResult};

#[derive(Debug, Clone)]
pub(crate) struct ResolvedSource {
    pub(crate) hint: SourceHint,
    pub(crate) content: String,
}

pub(crate) fn resolve_source(
    location: &DataLocation,
    stdin_override: Option<String>,
) -> ClientResult<ResolvedSource> {
    match location {
        DataLocation::Stdin => {
            let Some(body) = read_stdin(stdin_override)? else {
                return Err(invalid_input_error(
                    "Path `-` means stdin input, but stdin was empty. Pipe JSON/CSV input or pass a file path.",
                ));
            };
            log::debug!("reading subscriptions from stdin ({} bytes)", body.len());
            Ok(ResolvedSource {
                hint: SourceHint {
                    kind: "stdin".to_string(),
                    path: None,
                },
                content: body,
            })
        }
        DataLocation::File(path) => {
            let content = read_file(path)?;
            log::debug!(
                "reading subscriptions from {} ({} bytes)",
                path.display(),
                content.len()
            );
            Ok(ResolvedSource {
                hint: SourceHint {
                    kind: "file".to_string(),
                    path: Some(path.display().to_string()),
                },
                content,
            })
        }
    }
}

fn read_file(path: &Path) -> ClientResult<String> {
    fs::read_to_string(path).map_err(|error| match error.kind() {
        ErrorKind::NotFound => ClientError::subscriptions_not_found(path),
        ErrorKind::InvalidData => ClientError::invalid_subscriptions_format(
            "Subscriptions file is not valid UTF-8 text.",
            "binary",
        ),
        _ => ClientError::subscriptions_read_failed(path, &error.to_string()),
    })
}

fn read_stdin(stdin_override: Option<String>) -> ClientResult<Option<String>> {
    if let Some(value) = stdin_override {
        return Ok(Some(value).filter(|body| !body.trim().is_empty()));
    }

    if std::io::stdin().is_terminal() {
        return Ok(None);
    }

    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|error| {
            ClientError::invalid_argument_with_recovery(
                &format!("Could not read stdin: {error}"),
                vec![
                    "Retry with `--file <path>`.".to_string(),
                    "Or rerun with valid stdin content.".to_string(),
                ],
            )
        })?;

    if buffer.trim().is_empty() {
        return Ok(None);
    }

    Ok(Some(buffer))
}
