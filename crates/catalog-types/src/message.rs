//! Message envelope types

use serde::{Deserialize, Serialize};

/// `{"message": ...}` body used by every response that does not carry a product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_shape() {
        let body = serde_json::to_string(&MessageBody::new("server is up")).unwrap();
        assert_eq!(body, r#"{"message":"server is up"}"#);
    }
}
