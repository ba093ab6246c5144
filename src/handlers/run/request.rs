//! Run request DTOs

use serde_json::Value;
use validator::Validate;

use crate::{
    constants::MAX_FILENAME_LENGTH,
    error::{AppError, AppResult},
    models::Submission,
};

/// Run submission request
///
/// Built from a raw JSON body so that a missing or mistyped `code` gets a
/// precise message instead of a generic deserialization error.
#[derive(Debug, Validate)]
pub struct RunRequest {
    /// Source code
    pub code: String,

    /// Advisory label reported back as `source_file`
    #[validate(length(max = MAX_FILENAME_LENGTH))]
    pub filename: Option<String>,
}

impl TryFrom<Value> for RunRequest {
    type Error = AppError;

    fn try_from(body: Value) -> AppResult<Self> {
        let Value::Object(mut fields) = body else {
            return Err(missing_code());
        };

        let code = match fields.remove("code") {
            Some(Value::String(code)) => code,
            Some(_) => {
                return Err(AppError::InvalidRequest(
                    "'code' must be a string".to_string(),
                ))
            }
            None => return Err(missing_code()),
        };

        let filename = match fields.remove("filename") {
            None | Some(Value::Null) => None,
            Some(Value::String(name)) => Some(name),
            Some(_) => {
                return Err(AppError::InvalidRequest(
                    "'filename' must be a string".to_string(),
                ))
            }
        };

        Ok(Self { code, filename })
    }
}

impl From<RunRequest> for Submission {
    fn from(request: RunRequest) -> Self {
        Submission::new(request.code, request.filename)
    }
}

fn missing_code() -> AppError {
    AppError::InvalidRequest("expected JSON with 'code'".to_string())
}
