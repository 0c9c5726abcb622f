use salesdash_client::commands;
use salesdash_client::commands::breakdown::BreakdownOptions;
use salesdash_client::commands::common::SourceOptions;
use salesdash_client::commands::contact::ContactOptions;
use salesdash_client::commands::dashboard::DashboardOptions;
use salesdash_client::contact::ContactSubmission;
use salesdash_client::{ClientResult, SuccessEnvelope};

use crate::cli::{Cli, Commands};

/// Runs every command that produces a single envelope. `chat` streams and is
/// handled by `run_chat` in main instead.
pub fn dispatch(cli: &Cli) -> ClientResult<SuccessEnvelope> {
    match &cli.command {
        Commands::Dashboard {
            source,
            year,
            previous_year,
            ..
        } => commands::dashboard::run_with_options(DashboardOptions {
            source: source_options(source),
            current_year: *year,
            previous_year: *previous_year,
        }),
        Commands::Breakdown {
            city,
            by,
            year,
            previous_year_view,
            source,
            ..
        } => commands::breakdown::run_with_options(BreakdownOptions {
            source: source_options(source),
            city: city.clone(),
            dimension: by.clone(),
            year: *year,
            previous_year_view: *previous_year_view,
        }),
        Commands::Revenue { source, .. } => {
            commands::revenue::run_with_options(source_options(source))
        }
        Commands::Check { source, .. } => commands::check::run(source.clone()),
        Commands::Contact {
            name,
            email,
            message,
            webhook_url,
            ..
        } => commands::contact::run_with_options(ContactOptions {
            submission: ContactSubmission {
                name: name.clone(),
                email: email.clone(),
                message: message.clone(),
            },
            webhook_url: webhook_url.clone(),
            home_override: None,
        }),
        Commands::Chat { .. } => Err(salesdash_client::ClientError::invalid_argument_for_command(
            "chat output is streamed and has no envelope.",
            Some("chat"),
        )),
    }
}

fn source_options(source: &Option<String>) -> SourceOptions<'static> {
    SourceOptions {
        source: source.clone(),
        ..SourceOptions::default()
    }
}
