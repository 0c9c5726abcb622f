use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::{ClientError, ClientResult};

static EMAIL_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9.-]+$").ok());

#[derive(Debug, Clone, Default)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Body that would be posted to the webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactPayload {
    pub email: String,
    pub name: String,
    pub message: String,
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(email))
}

/// Checks a submission in form order and reports the first problem.
pub fn validate_submission(
    webhook_url: &str,
    submission: &ContactSubmission,
) -> ClientResult<ContactPayload> {
    if webhook_url.trim().is_empty() {
        return Err(ClientError::contact_not_configured());
    }

    let name = submission.name.trim();
    if name.is_empty() {
        return Err(ClientError::contact_invalid(
            "name",
            "Please provide your name.",
        ));
    }

    let email = submission.email.trim();
    if email.is_empty() {
        return Err(ClientError::contact_invalid(
            "email",
            "Please provide your email address.",
        ));
    }
    if !is_valid_email(email) {
        return Err(ClientError::contact_invalid(
            "email",
            "Please provide a valid email address.",
        ));
    }

    let message = submission.message.trim();
    if message.is_empty() {
        return Err(ClientError::contact_invalid(
            "message",
            "Please provide a message.",
        ));
    }

    Ok(ContactPayload {
        email: email.to_string(),
        name: name.to_string(),
        message: message.to_string(),
    })
}
