use crate::cli::Commands;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum OutputMode {
    Text,
    Json,
}

pub fn mode_for_command(command: &Commands) -> OutputMode {
    let json = match command {
        Commands::Summary { source }
        | Commands::Categories { source }
        | Commands::Cycles { source }
        | Commands::List { source, .. }
        | Commands::Upcoming { source, .. }
        | Commands::Forecast { source, .. }
        | Commands::Dash { source } => source.json,
        Commands::Validate { json, .. } => *json,
    };

    if json {
        OutputMode::Json
    } else {
        OutputMode::Text
    }
}
