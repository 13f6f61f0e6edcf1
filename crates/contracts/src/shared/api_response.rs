use serde::{Deserialize, Serialize};

/// Стандартная обёртка ответа backend: `{ success, data, message }`.
///
/// `data` may be missing or of an unexpected shape; callers decide how
/// strict they want to be, so it defaults to `None` instead of failing
/// deserialization of the whole envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }

    /// Payload of a successful envelope, `None` otherwise.
    pub fn into_success_data(self) -> Option<T> {
        if self.success {
            self.data
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_data_is_none() {
        let resp: ApiResponse<serde_json::Value> =
            serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(resp.success);
        assert_eq!(resp.data, None);
    }

    #[test]
    fn test_unsuccessful_envelope_drops_data() {
        let resp: ApiResponse<Vec<u32>> =
            serde_json::from_str(r#"{"success":false,"data":[1,2]}"#).unwrap();
        assert_eq!(resp.into_success_data(), None);
    }
}
