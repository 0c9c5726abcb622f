use crate::cli::Commands;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum OutputMode {
    Text,
    Json,
}

pub fn mode_for_command(command: &Commands) -> OutputMode {
    let json = match command {
        Commands::Dashboard { json, .. }
        | Commands::Breakdown { json, .. }
        | Commands::Revenue { json, .. }
        | Commands::Check { json, .. }
        | Commands::Contact { json, .. } => *json,
        Commands::Chat { .. } => false,
    };
    if json {
        OutputMode::Json
    } else {
        OutputMode::Text
    }
}
