//! Request and response envelopes exchanged with the backend.
//!
//! Every JSON response is an object discriminated by a boolean `success`
//! key. `/status` answers without the key; a 2xx body shaped like that is
//! read as a success whose `data` is the whole object.

use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Fallback failure text when the body names no reason
pub const DEFAULT_SERVER_ERROR: &str = "Server error";

/// Decoded response envelope.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse<T> {
    Success {
        data: Option<T>,
        message: Option<String>,
        /// Top-level keys other than `success`, `data` and `message`
        extra: Map<String, Value>,
    },
    Failure {
        error: Option<String>,
        message: Option<String>,
    },
}

impl<T: DeserializeOwned> ApiResponse<T> {
    /// Decode an envelope from an already parsed body.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        let Value::Object(mut body) = value else {
            return Err(serde::de::Error::custom("response envelope is not a JSON object"));
        };

        let success = match body.remove("success") {
            Some(Value::Bool(flag)) => flag,
            Some(other) => {
                return Err(serde::de::Error::custom(format!(
                    "`success` must be a boolean, got {other}"
                )))
            }
            None => {
                let data = T::deserialize(Value::Object(body))?;
                return Ok(ApiResponse::Success {
                    data: Some(data),
                    message: None,
                    extra: Map::new(),
                });
            }
        };

        if !success {
            return Ok(ApiResponse::Failure {
                error: take_text(&mut body, "error"),
                message: take_text(&mut body, "message"),
            });
        }

        let data = match body.remove("data") {
            None | Some(Value::Null) => None,
            Some(raw) => Some(T::deserialize(raw)?),
        };
        let message = take_text(&mut body, "message");

        Ok(ApiResponse::Success {
            data,
            message,
            extra: body,
        })
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for ApiResponse<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        ApiResponse::from_value(value).map_err(serde::de::Error::custom)
    }
}

impl<T> ApiResponse<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, ApiResponse::Success { .. })
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            ApiResponse::Success { data, .. } => data.as_ref(),
            ApiResponse::Failure { .. } => None,
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            ApiResponse::Success { data, .. } => data,
            ApiResponse::Failure { .. } => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            ApiResponse::Success { message, .. } | ApiResponse::Failure { message, .. } => {
                message.as_deref()
            }
        }
    }

    /// Reason of a failed envelope: `error`, then `message`, then the default.
    /// Empty strings count as absent.
    pub fn failure_reason(&self) -> Option<String> {
        match self {
            ApiResponse::Success { .. } => None,
            ApiResponse::Failure { error, message } => {
                fn text(field: &Option<String>) -> Option<&str> {
                    field.as_deref().filter(|text| !text.is_empty())
                }
                Some(
                    text(error)
                        .or_else(|| text(message))
                        .unwrap_or(DEFAULT_SERVER_ERROR)
                        .to_string(),
                )
            }
        }
    }

    /// Untyped top-level field of a successful envelope
    pub fn extra(&self, key: &str) -> Option<&Value> {
        match self {
            ApiResponse::Success { extra, .. } => extra.get(key),
            ApiResponse::Failure { .. } => None,
        }
    }

    /// Operation the AI command resolved to
    pub fn operation(&self) -> Option<&str> {
        self.extra("operation").and_then(Value::as_str)
    }

    /// Free-form result of an AI command (a number, a list, a sentence)
    pub fn result(&self) -> Option<&Value> {
        self.extra("result")
    }

    /// Whether the AI command changed the table and `data` holds the new one
    pub fn refresh_needed(&self) -> bool {
        self.extra("refresh_needed")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Stored name of an uploaded file
    pub fn filename(&self) -> Option<&str> {
        self.extra("filename").and_then(Value::as_str)
    }
}

/// Reason carried by an error body: `error` wins over `message`.
pub(crate) fn failure_reason_from_body(body: &Value) -> String {
    let text = |key: &str| {
        body.get(key)
            .and_then(Value::as_str)
            .filter(|text| !text.is_empty())
    };

    text("error")
        .or_else(|| text("message"))
        .unwrap_or(DEFAULT_SERVER_ERROR)
        .to_string()
}

fn take_text(body: &mut Map<String, Value>, key: &str) -> Option<String> {
    match body.remove(key) {
        Some(Value::String(text)) => Some(text),
        Some(Value::Null) | None => None,
        Some(other) => Some(other.to_string()),
    }
}

/// One column of the grid as the backend describes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDef {
    pub field: String,
    pub header_name: String,
    #[serde(default)]
    pub editable: bool,
    #[serde(default)]
    pub width: Option<u32>,
}

/// Table snapshot returned by upload, data and AI endpoints.
///
/// Each row is an object keyed by column field, plus a numeric `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TablePayload {
    pub data: Vec<Map<String, Value>>,
    pub columns: Vec<ColumnDef>,
    pub row_count: usize,
    pub col_count: usize,
}

/// Health report of the backend (`GET /status`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerStatus {
    pub status: String,
    pub has_data: bool,
    pub current_file: Option<String>,
    pub timestamp: String,
}

/// File picked for upload.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub filename: String,
    pub bytes: bytes::Bytes,
    pub content_type: Option<String>,
}

impl UploadFile {
    pub fn new(filename: impl Into<String>, bytes: impl Into<bytes::Bytes>) -> Self {
        Self {
            filename: filename.into(),
            bytes: bytes.into(),
            content_type: None,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellUpdate {
    pub row_id: Value,
    pub column: String,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AiCommandRequest {
    pub command: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRequest {
    pub filename: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_envelope_with_table() {
        let body = json!({
            "success": true,
            "message": "File loaded",
            "filename": "20240101_120000_sales.csv",
            "data": {
                "data": [{"id": 0, "Price": 10}],
                "columns": [
                    {"field": "id", "headerName": "ID", "width": 70, "editable": false},
                    {"field": "Price", "headerName": "Price", "width": 150, "editable": true}
                ],
                "rowCount": 1,
                "colCount": 1
            }
        });

        let response: ApiResponse<TablePayload> = ApiResponse::from_value(body).unwrap();
        assert!(response.is_success());
        assert_eq!(response.message(), Some("File loaded"));
        assert_eq!(response.filename(), Some("20240101_120000_sales.csv"));

        let table = response.data().unwrap();
        assert_eq!(table.row_count, 1);
        assert_eq!(table.columns[0].header_name, "ID");
        assert!(!table.columns[0].editable);
        assert_eq!(table.columns[1].width, Some(150));
        assert_eq!(table.data[0]["Price"], json!(10));
    }

    #[test]
    fn test_ai_envelope_extras() {
        let body = json!({
            "success": true,
            "message": "Sum computed",
            "operation": "sum",
            "result": 1234.5,
            "refresh_needed": false
        });

        let response: ApiResponse<TablePayload> = serde_json::from_value(body).unwrap();
        assert!(response.data().is_none());
        assert_eq!(response.operation(), Some("sum"));
        assert_eq!(response.result(), Some(&json!(1234.5)));
        assert!(!response.refresh_needed());
    }

    #[test]
    fn test_failure_envelope_precedence() {
        let both: ApiResponse<Value> = ApiResponse::from_value(json!({
            "success": false,
            "error": "Unknown column",
            "message": "Try again"
        }))
        .unwrap();
        assert_eq!(both.failure_reason().as_deref(), Some("Unknown column"));

        let message_only: ApiResponse<Value> =
            ApiResponse::from_value(json!({"success": false, "message": "Try again"})).unwrap();
        assert_eq!(message_only.failure_reason().as_deref(), Some("Try again"));

        let bare: ApiResponse<Value> =
            ApiResponse::from_value(json!({"success": false})).unwrap();
        assert_eq!(bare.failure_reason().as_deref(), Some("Server error"));

        let body = json!({"success": false, "error": "", "message": "Column missing"});
        let blank_error: ApiResponse<Value> = ApiResponse::from_value(body.clone()).unwrap();
        assert_eq!(blank_error.failure_reason().as_deref(), Some("Column missing"));
        assert_eq!(failure_reason_from_body(&body), "Column missing");

        let all_blank: ApiResponse<Value> =
            ApiResponse::from_value(json!({"success": false, "error": "", "message": ""}))
                .unwrap();
        assert_eq!(all_blank.failure_reason().as_deref(), Some("Server error"));
    }

    #[test]
    fn test_body_reason_precedence() {
        assert_eq!(
            failure_reason_from_body(&json!({"error": "A", "message": "B"})),
            "A"
        );
        assert_eq!(failure_reason_from_body(&json!({"message": "B"})), "B");
        assert_eq!(failure_reason_from_body(&json!({"error": "", "message": "B"})), "B");
        assert_eq!(failure_reason_from_body(&json!({})), "Server error");
        assert_eq!(failure_reason_from_body(&json!("plain text")), "Server error");
    }

    #[test]
    fn test_status_body_without_success_key() {
        let body = json!({
            "status": "active",
            "has_data": true,
            "current_file": "20240101_sales.xlsx",
            "timestamp": "2024-01-01T12:00:00"
        });

        let response: ApiResponse<ServerStatus> = ApiResponse::from_value(body).unwrap();
        let status = response.into_data().unwrap();
        assert_eq!(status.status, "active");
        assert!(status.has_data);
        assert_eq!(status.current_file.as_deref(), Some("20240101_sales.xlsx"));
    }

    #[test]
    fn test_rejects_non_object_and_bad_flag() {
        assert!(ApiResponse::<Value>::from_value(json!([1, 2])).is_err());
        assert!(ApiResponse::<Value>::from_value(json!({"success": "yes"})).is_err());
    }

    #[test]
    fn test_cell_update_wire_shape() {
        let update = CellUpdate {
            row_id: json!(3),
            column: "Price".to_string(),
            value: json!("12.5"),
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({"rowId": 3, "column": "Price", "value": "12.5"})
        );
    }
}
