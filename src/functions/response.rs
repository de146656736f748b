// ABOUTME: Tagged success/error result returned by every function invocation
// ABOUTME: Produces the wire mapping {status, data, error?, meta} callers branch on

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::bundle::{Map, Value};

pub const MISSING_PARAM: &str = "missing_param";
pub const EXCEPTION: &str = "exception";
pub const NOT_IMPLEMENTED: &str = "not_implemented";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorItem {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Map>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementalResponse {
    pub status: ResponseStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorItem>,
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub meta: Option<Value>,
}

/// Whatever a function's `run` hands back, before normalisation.
#[derive(Debug, Clone, PartialEq)]
pub enum FunctionOutput {
    Response(ElementalResponse),
    Raw(Value),
}

impl ElementalResponse {
    pub fn success(data: Value, meta: Option<Value>) -> Self {
        Self {
            status: ResponseStatus::Success,
            error: None,
            data,
            meta,
        }
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>, meta: Option<Value>) -> Self {
        Self {
            status: ResponseStatus::Error,
            error: Some(ErrorItem {
                code: code.into(),
                message: message.into(),
                details: None,
            }),
            data: Value::Null,
            meta,
        }
    }

    pub fn missing_param(message: impl Into<String>, meta: Option<Value>) -> Self {
        Self::error(MISSING_PARAM, message, meta)
    }

    pub fn exception(message: impl Into<String>, meta: Option<Value>) -> Self {
        Self::error(EXCEPTION, message, meta)
    }

    pub fn not_implemented(meta: Option<Value>) -> Self {
        Self::error(NOT_IMPLEMENTED, "Function not implemented yet", meta)
    }

    pub fn with_details(mut self, details: Map) -> Self {
        if let Some(ref mut error) = self.error {
            error.details = Some(details);
        }
        self
    }

    pub fn is_success(&self) -> bool {
        self.status == ResponseStatus::Success
    }

    pub fn error_code(&self) -> Option<&str> {
        self.error.as_ref().map(|e| e.code.as_str())
    }

    /// Plain wire mapping: `error` only on failures, `details` only when set
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("status".to_string(), Value::from(self.status.to_string()));
        if let Some(ref error) = self.error {
            let mut item = Map::new();
            item.insert("code".to_string(), Value::from(error.code.as_str()));
            item.insert("message".to_string(), Value::from(error.message.as_str()));
            if let Some(ref details) = error.details {
                item.insert("details".to_string(), Value::Map(details.clone()));
            }
            map.insert("error".to_string(), Value::Map(item));
        }
        map.insert("data".to_string(), self.data.clone());
        map.insert("meta".to_string(), self.meta.clone().unwrap_or(Value::Null));
        Value::Map(map)
    }
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseStatus::Success => write!(f, "success"),
            ResponseStatus::Error => write!(f, "error"),
        }
    }
}

impl From<ElementalResponse> for FunctionOutput {
    fn from(response: ElementalResponse) -> Self {
        FunctionOutput::Response(response)
    }
}

impl From<Value> for FunctionOutput {
    fn from(value: Value) -> Self {
        FunctionOutput::Raw(value)
    }
}
