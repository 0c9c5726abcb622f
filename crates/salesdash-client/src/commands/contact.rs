use std::path::Path;

use tracing::info;

use crate::ClientResult;
use crate::config::Config;
use crate::contact::{ContactSubmission, validate_submission};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::ContactData;

#[derive(Debug, Default)]
pub struct ContactOptions<'a> {
    pub submission: ContactSubmission,
    pub webhook_url: Option<String>,
    pub home_override: Option<&'a Path>,
}

pub fn run(submission: ContactSubmission) -> ClientResult<SuccessEnvelope> {
    run_with_options(ContactOptions {
        submission,
        ..ContactOptions::default()
    })
}

/// Validates a submission and returns the payload without sending it.
#[doc(hidden)]
pub fn run_with_options(options: ContactOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let config = Config::load(options.home_override)?;
    let webhook_url = options
        .webhook_url
        .unwrap_or(config.contact.webhook_url);
    let payload = validate_submission(&webhook_url, &options.submission)?;
    info!(webhook = %webhook_url, "contact submission validated");

    success(
        "contact",
        ContactData {
            webhook_url,
            payload,
            delivered: false,
        },
    )
}
