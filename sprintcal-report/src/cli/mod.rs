mod commands;

pub use commands::Cli;
pub use commands::Commands;
pub use commands::Options;

use crate::error::Result;

pub fn run(cli: Cli) -> Result<()> {
    match &cli.command {
        Some(Commands::Sprints { file, min }) => {
            commands::sprints(&Options::from_cli(&cli)?, file, *min)
        }
        Some(Commands::Velocity {
            file,
            field,
            sprints,
            year,
        }) => commands::velocity(&Options::from_cli(&cli)?, file, field, sprints, *year),
        Some(Commands::Version) => commands::version(),
        None => commands::default_action(),
    }
}
