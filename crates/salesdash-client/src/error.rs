use std::path::Path;

use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

pub(crate) const CHECK_HELP_COMMAND: &str = "salesdash check --help";

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ClientError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

/// Fatal failure while reading or decoding a sales source. Aborts the load.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DataSourceError {
    #[error("Sales source `{source_id}` could not be read: {detail}")]
    Unreachable { source_id: String, detail: String },
    #[error("Sales source `{source_id}` is empty.")]
    Empty { source_id: String },
    #[error("Sales source `{source_id}` is not valid CSV: {detail}")]
    Malformed { source_id: String, detail: String },
    #[error("Sales source `{source_id}` is missing required columns: {}", missing.join(", "))]
    MissingColumns {
        source_id: String,
        missing: Vec<String>,
        actual: Vec<String>,
    },
}

/// A single rejected input row. Collected during load, never fatal.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize)]
#[error("row {row}: {message}")]
pub struct RowParseError {
    pub row: i64,
    pub field: String,
    pub value: String,
    pub message: String,
}

impl ClientError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn invalid_argument(message: &str) -> Self {
        Self::invalid_argument_for_command(message, None)
    }

    pub fn invalid_argument_for_command(message: &str, command: Option<&str>) -> Self {
        let help_hint = match command {
            Some(cmd) => format!("Run `salesdash {cmd} --help` for usage."),
            None => "Run `salesdash --help` for usage.".to_string(),
        };
        let error = Self::new("invalid_argument", message, vec![help_hint]);
        if let Some(cmd) = command {
            return error.with_data(json!({
                "command_hint": cmd,
            }));
        }
        error
    }

    pub fn invalid_argument_with_recovery(message: &str, recovery_steps: Vec<String>) -> Self {
        Self::new("invalid_argument", message, recovery_steps)
    }

    pub fn config_invalid(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "config_invalid",
            &format!("Config file at `{location}` could not be parsed: {detail}"),
            vec![
                format!("Fix the TOML syntax in `{location}` or remove the file to use defaults."),
                "Set `SALESDASH_HOME` to point at a different config directory.".to_string(),
            ],
        )
        .with_data(json!({
            "config_path": location,
        }))
    }

    pub fn config_unreadable(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "config_unreadable",
            &format!("Config file at `{location}` could not be read: {detail}"),
            vec![format!("Grant read access to `{location}`.")],
        )
    }

    pub fn home_unresolved() -> Self {
        Self::new(
            "config_unreadable",
            "Could not resolve a home directory for the salesdash config.",
            vec!["Set `SALESDASH_HOME` to a readable directory.".to_string()],
        )
    }

    pub fn contact_not_configured() -> Self {
        Self::new(
            "contact_not_configured",
            "Email service is not set up. Please try again later.",
            vec![
                "Set `contact.webhook_url` in config.toml.".to_string(),
                "Or pass `--webhook-url <url>`.".to_string(),
            ],
        )
    }

    pub fn contact_invalid(field: &str, message: &str) -> Self {
        Self::new(
            "contact_invalid",
            message,
            vec![format!("Provide a valid `{field}` and resubmit.")],
        )
        .with_data(json!({
            "field": field,
        }))
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }
}

impl From<DataSourceError> for ClientError {
    fn from(error: DataSourceError) -> Self {
        let message = error.to_string();
        match error {
            DataSourceError::Unreachable { source_id, detail } => Self::new(
                "data_source_unreachable",
                &message,
                vec![
                    "Verify the path or URL exists and is readable.".to_string(),
                    "Pass a different source with `--source <path|url|->`.".to_string(),
                ],
            )
            .with_data(json!({
                "source": source_id,
                "detail": detail,
            })),
            DataSourceError::Empty { source_id } => Self::new(
                "data_source_empty",
                &message,
                vec!["Provide a CSV with a header row and at least one data row.".to_string()],
            )
            .with_data(json!({
                "source": source_id,
            })),
            DataSourceError::Malformed { source_id, detail } => Self::new(
                "data_source_malformed",
                &message,
                vec![
                    "Check that quoted fields are closed and the header row is valid CSV."
                        .to_string(),
                    "Save the file as UTF-8 CSV.".to_string(),
                ],
            )
            .with_data(json!({
                "source": source_id,
                "detail": detail,
                "help_command": CHECK_HELP_COMMAND,
            })),
            DataSourceError::MissingColumns {
                source_id,
                missing,
                actual,
            } => Self::new(
                "data_source_schema_mismatch",
                &message,
                vec![
                    "Include the headers date_of_sale, city, sales_amount, product_category."
                        .to_string(),
                    format!("Run `{CHECK_HELP_COMMAND}` to review the expected columns."),
                ],
            )
            .with_data(json!({
                "source": source_id,
                "missing_headers": missing,
                "actual_headers": actual,
                "help_command": CHECK_HELP_COMMAND,
            })),
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::{ClientError, DataSourceError};

    #[test]
    fn missing_columns_map_to_schema_mismatch() {
        let error = ClientError::from(DataSourceError::MissingColumns {
            source_id: "sales.csv".to_string(),
            missing: vec!["city".to_string()],
            actual: vec!["date_of_sale".to_string()],
        });

        assert_eq!(error.code, "data_source_schema_mismatch");
        assert!(error.message.contains("city"));
        assert!(error.data.is_some());
        if let Some(data) = error.data {
            assert_eq!(data["missing_headers"][0], "city");
        }
    }

    #[test]
    fn unreachable_sources_keep_detail() {
        let error = ClientError::from(DataSourceError::Unreachable {
            source_id: "nope.csv".to_string(),
            detail: "No such file".to_string(),
        });

        assert_eq!(error.code, "data_source_unreachable");
        assert!(error.message.contains("nope.csv"));
        assert!(!error.recovery_steps.is_empty());
    }
}
