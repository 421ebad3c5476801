/// Response envelope shared by every endpoint: `{ code, message, data }`
use crate::errors::{ErrorCode, RequestError, SUCCESS_CODE};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default = "none", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

fn none<T>() -> Option<T> {
    None
}

impl<T> ApiEnvelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: SUCCESS_CODE,
            message: "success".to_string(),
            data: Some(data),
        }
    }

    pub fn failure(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.code(),
            message: message.into(),
            data: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    /// Split into the payload or an envelope error carrying the server message
    pub fn into_result(self) -> Result<Option<T>, RequestError> {
        if self.is_success() {
            Ok(self.data)
        } else {
            Err(RequestError::Envelope {
                code: self.code,
                message: self.message,
            })
        }
    }
}

/// `data` of every list endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageData<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
}

impl<T> PageData<T> {
    pub fn total_pages(&self) -> usize {
        if self.page_size == 0 {
            0
        } else {
            self.total.div_ceil(self.page_size)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_failure_without_data_parses() {
        let envelope: ApiEnvelope<Value> =
            serde_json::from_value(json!({"code": 40004, "message": "Enterprise not found"}))
                .expect("envelope without data");

        match envelope.into_result() {
            Err(RequestError::Envelope { code, message }) => {
                assert_eq!(code, 40004);
                assert_eq!(message, "Enterprise not found");
            }
            other => panic!("expected envelope error, got {:?}", other),
        }
    }

    #[test]
    fn test_page_data_wire_names() {
        let page = PageData {
            items: vec![1, 2, 3],
            total: 21,
            page: 1,
            page_size: 10,
        };
        let value = serde_json::to_value(&page).expect("serialize");
        assert_eq!(value["pageSize"], json!(10));
        assert_eq!(page.total_pages(), 3);
    }
}
