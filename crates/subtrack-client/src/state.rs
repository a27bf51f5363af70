use std::path::{Path, PathBuf};

use crate::{ClientError, ClientResult};

pub const HOME_ENV: &str = "SUBTRACK_HOME";
pub const FILE_ENV: &str = "SUBTRACK_FILE";
pub const STDIN_PATH: &str = "-";

const DEFAULT_HOME_DIR: &str = ".subtrack";
const DEFAULT_FILE_NAME: &str = "subscriptions.json";

/// Where subscriptions are read from.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum DataLocation {
    Stdin,
    File(PathBuf),
}

pub fn resolve_subtrack_home(home_override: Option<&Path>) -> ClientResult<PathBuf> {
    let candidate = match home_override {
        Some(path) => path.to_path_buf(),
        None => {
            if let Some(override_path) = std::env::var_os(HOME_ENV) {
                PathBuf::from(override_path)
            } else if let Some(home_path) = home::home_dir() {
                home_path.join(DEFAULT_HOME_DIR)
            } else {
                return Err(ClientError::home_unresolved(
                    "no home directory is available for this user.",
                ));
            }
        }
    };

    absolutize(&candidate)
}

pub fn default_subscriptions_path(home: &Path) -> PathBuf {
    home.join(DEFAULT_FILE_NAME)
}

/// Picks the data file: an explicit path first, then `SUBTRACK_FILE`, then
/// `subscriptions.json` under the subtrack home.
///
/// A `home_override` pins resolution to that directory and skips both
/// environment variables.
pub fn resolve_data_location(
    file: Option<&str>,
    home_override: Option<&Path>,
) -> ClientResult<DataLocation> {
    if let Some(value) = file {
        return location_for(value);
    }

    if home_override.is_none()
        && let Some(env_file) = std::env::var_os(FILE_ENV)
        && !env_file.is_empty()
    {
        return location_for(&env_file.to_string_lossy());
    }

    let home = resolve_subtrack_home(home_override)?;
    Ok(DataLocation::File(default_subscriptions_path(&home)))
}

fn location_for(value: &str) -> ClientResult<DataLocation> {
    if value == STDIN_PATH {
        return Ok(DataLocation::Stdin);
    }
    Ok(DataLocation::File(absolutize(Path::new(value))?))
}

fn absolutize(path: &Path) -> ClientResult<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }

    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .map_err(|error| ClientError::home_unresolved(&error.to_string()))
}
