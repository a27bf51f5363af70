use subtrack_client::commands;
use subtrack_client::{ClientResult, SuccessEnvelope};

use crate::cli::{Cli, Commands};

pub fn dispatch(cli: &Cli) -> ClientResult<SuccessEnvelope> {
    match &cli.command {
        Commands::Summary { source } => commands::summary::run(source.file(), source.as_of()),
        Commands::Categories { source } => {
            commands::categories::run(source.file(), source.as_of())
        }
        Commands::Cycles { source } => commands::cycles::run(source.file(), source.as_of()),
        Commands::List {
            source,
            search,
            category,
            sort,
            all,
        } => commands::list::run(
            source.file(),
            source.as_of(),
            search.as_deref(),
            category.as_deref(),
            sort.as_deref(),
            *all,
        ),
        Commands::Upcoming { source, days } => {
            commands::upcoming::run(source.file(), source.as_of(), *days)
        }
        Commands::Forecast { source, months } => {
            commands::forecast::run(source.file(), source.as_of(), *months)
        }
        Commands::Dash { source } => commands::dash::run(source.file(), source.as_of()),
        Commands::Validate { path, .. } => commands::validate::run(path.as_deref()),
    }
}
