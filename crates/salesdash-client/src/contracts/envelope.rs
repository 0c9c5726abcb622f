use serde::Serialize;
use serde_json::Value;

use crate::API_VERSION;
use crate::error::{ClientError, ClientResult};

/// What a report or form command hands back to the CLI. The CLI picks a text
/// renderer by `command`; `--json` prints the whole envelope.
#[derive(Debug, Clone, Serialize)]
pub struct SuccessEnvelope {
    pub ok: bool,
    pub command: String,
    pub version: String,
    pub data: Value,
}

/// JSON shape of a failed command. `data` carries the structured context of
/// the error, such as `missing_headers` or the rejected contact `field`.
#[derive(Debug, Clone, Serialize)]
pub struct FailureEnvelope {
    pub ok: bool,
    pub version: String,
    pub error: ErrorContract,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorContract {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
}

impl From<&ClientError> for ErrorContract {
    fn from(error: &ClientError) -> Self {
        Self {
            code: error.code.clone(),
            message: error.message.clone(),
            recovery_steps: error.recovery_steps.clone(),
        }
    }
}

impl From<&ClientError> for FailureEnvelope {
    fn from(error: &ClientError) -> Self {
        Self {
            ok: false,
            version: API_VERSION.to_string(),
            error: ErrorContract::from(error),
            data: error.data.clone(),
        }
    }
}

impl SuccessEnvelope {
    pub fn new(command: &str, data: Value) -> Self {
        Self {
            ok: true,
            command: command.to_string(),
            version: API_VERSION.to_string(),
            data,
        }
    }
}

/// Serializes a command payload. A payload that cannot become JSON is an
/// internal error, never a user error.
pub fn success<T>(command: &str, data: T) -> ClientResult<SuccessEnvelope>
where
    T: Serialize,
{
    serde_json::to_value(data)
        .map(|value| SuccessEnvelope::new(command, value))
        .map_err(|err| ClientError::internal_serialization(&err.to_string()))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{FailureEnvelope, success};
    use crate::{ClientError, DataSourceError};

    #[test]
    fn success_wraps_payload_with_command_and_version() {
        let envelope = success("revenue", json!({ "rows": [] }));
        assert!(envelope.is_ok());
        if let Ok(value) = envelope {
            assert!(value.ok);
            assert_eq!(value.command, "revenue");
            assert_eq!(value.version, crate::API_VERSION);
            assert!(value.data["rows"].is_array());
        }
    }

    #[test]
    fn failure_keeps_error_data() {
        let error = ClientError::contact_invalid("email", "Please provide a valid email address.");
        let envelope = FailureEnvelope::from(&error);
        assert!(!envelope.ok);
        assert_eq!(envelope.error.code, "contact_invalid");
        assert!(envelope.data.is_some());
    }

    #[test]
    fn schema_failures_serialize_missing_headers() {
        let error = ClientError::from(DataSourceError::MissingColumns {
            source_id: "sales.csv".to_string(),
            missing: vec!["sales_amount".to_string()],
            actual: vec!["date_of_sale".to_string(), "city".to_string()],
        });
        let value = serde_json::to_value(FailureEnvelope::from(&error));
        assert!(value.is_ok());
        if let Ok(json) = value {
            assert_eq!(json["ok"], false);
            assert_eq!(json["error"]["code"], "data_source_schema_mismatch");
            assert_eq!(json["data"]["missing_headers"][0], "sales_amount");
            assert!(json["error"]["recovery_steps"].is_array());
        }
    }
}
