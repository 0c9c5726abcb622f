mod cli;
mod dispatch;
mod output;
mod stdout_io;

use std::io::{self, BufRead, IsTerminal};
use std::process::ExitCode;

use clap::{Parser, error::ErrorKind};
use salesdash_client::ClientError;
use salesdash_client::chat::chat_rng;
use salesdash_client::commands::chat::{self, ChatOptions};
use stdout_io::{write_stdout_line, write_stdout_text, write_stdout_token};
use tracing::debug;
use tracing_subscriber::EnvFilter;

const ROOT_HELP: &str = "salesdash - sales dashboard reports from a CSV

Usage:
  salesdash <command>

Start here:
  salesdash check <path>
  salesdash dashboard
  salesdash --help
";

const LOG_ENV: &str = "SALESDASH_LOG";

fn main() -> ExitCode {
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

    let cli = match cli::Cli::try_parse() {
        Ok(value) => value,
        Err(err) => return handle_parse_error(&err, &raw_args),
    };
    init_logging(cli.verbose);
    debug!(command = ?cli.command, "parsed command line");

    if let cli::Commands::Chat { message, delay_ms } = &cli.command {
        return run_chat(message.as_deref(), *delay_ms);
    }

    let mode = output::mode_for_command(&cli.command);
    match dispatch::dispatch(&cli) {
        Ok(success) => {
            if output::print_success(&success, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            if output::print_failure(&error, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Err(exit_code_for_error(&error))
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}

fn handle_parse_error(err: &clap::Error, raw_args: &[String]) -> Result<ExitCode, ExitCode> {
    if matches!(
        err.kind(),
        ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
    ) {
        if write_stdout_text(&err.to_string()).is_err() {
            return Err(ExitCode::from(2));
        }
        return Ok(ExitCode::SUCCESS);
    }

    let command_hint = raw_args
        .iter()
        .skip(1)
        .find(|value| !value.starts_with('-'))
        .filter(|value| {
            matches!(
                value.as_str(),
                "dashboard" | "breakdown" | "revenue" | "check" | "chat" | "contact"
            )
        })
        .map(String::as_str);
    let clean_message = strip_clap_boilerplate(&err.to_string());
    let parse_error = ClientError::invalid_argument_for_command(&clean_message, command_hint);
    let mode = infer_requested_output_mode(raw_args);
    if output::print_failure(&parse_error, mode).is_err() {
        return Err(ExitCode::from(2));
    }
    Err(ExitCode::from(1))
}

fn run_chat(message: Option<&str>, delay_ms: Option<u64>) -> Result<ExitCode, ExitCode> {
    let mut session = match chat::start(ChatOptions {
        delay_ms,
        home_override: None,
    }) {
        Ok(session) => session,
        Err(error) => {
            if output::print_failure(&error, output::OutputMode::Text).is_err() {
                return Err(ExitCode::from(2));
            }
            return Err(exit_code_for_error(&error));
        }
    };
    let mut rng = chat_rng();

    let mut answer = |prompt: &str| -> io::Result<()> {
        if let Some(stream) = session.respond(prompt, &mut rng) {
            for token in stream {
                write_stdout_token(&token)?;
            }
            write_stdout_line("")?;
        }
        Ok(())
    };

    let outcome = match message {
        Some(prompt) => answer(prompt),
        None => chat_over_stdin(&mut answer),
    };

    if outcome.is_err() {
        return Err(ExitCode::from(2));
    }
    Ok(ExitCode::SUCCESS)
}

fn chat_over_stdin(answer: &mut impl FnMut(&str) -> io::Result<()>) -> io::Result<()> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        write_stdout_line("What is up? (Ctrl-D to quit)")?;
    }
    for line in stdin.lock().lines() {
        answer(&line?)?;
    }
    Ok(())
}

/// Strips clap's trailing boilerplate (Usage line, "For more information" hint)
/// so the recovery steps are the single source of guidance.
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

fn infer_requested_output_mode(raw_args: &[String]) -> output::OutputMode {
    if raw_args.iter().skip(1).any(|value| value == "--json") {
        return output::OutputMode::Json;
    }
    output::OutputMode::Text
}

fn exit_code_for_error(error: &ClientError) -> ExitCode {
    if error.code.starts_with("internal_") {
        ExitCode::from(2)
    } else {
        ExitCode::from(1)
    }
}
