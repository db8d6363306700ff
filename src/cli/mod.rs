mod commands;

pub use commands::Cli;
pub use commands::Commands;
pub use commands::ConfigCmd;
pub use commands::{Session, parse_date, parse_sprint};

use crate::error::Result;
use crate::storage::SettingsStore;

pub fn run(cli: Cli) -> Result<()> {
    let store = match &cli.config {
        Some(path) => SettingsStore::new(path),
        None => SettingsStore::global(),
    };
    let json_output = cli.json;
    let open = || Session::open(&store, cli.locale.as_deref(), cli.today.as_deref());

    match cli.command {
        Some(Commands::Current) => commands::current(&open()?, json_output),
        Some(Commands::Previous) => commands::previous(&open()?, json_output),
        Some(Commands::History { count }) => commands::history(&open()?, count, json_output),
        Some(Commands::Weeks { sprint }) => commands::weeks(sprint, json_output),
        Some(Commands::Range { sprint }) => commands::range(&open()?, sprint, json_output),
        Some(Commands::Week { date }) => commands::week(&open()?, date.as_deref(), json_output),
        Some(Commands::Config { command }) => {
            commands::config(&store, command, cli.locale.as_deref(), json_output)
        }
        Some(Commands::Version) => commands::version(),
        None => commands::default_action(),
    }
}
