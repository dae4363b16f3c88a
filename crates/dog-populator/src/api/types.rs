//! Dog API request and response types.

use serde::{Deserialize, Serialize};

/// Body of the login request
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
}

/// Search response
///
/// The API also returns `total`, `next` and `prev`; pagination here is driven
/// by the offset alone, so only the ids are kept.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(rename = "resultIds")]
    pub result_ids: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_response_ignores_cursor_fields() {
        let json = r#"{
            "resultIds": ["a1", "a2"],
            "total": 150,
            "next": "/dogs/search?size=100&from=100",
            "prev": null
        }"#;

        let response: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.result_ids, vec!["a1", "a2"]);
    }

    #[test]
    fn test_search_response_requires_ids() {
        assert!(serde_json::from_str::<SearchResponse>(r#"{"total": 0}"#).is_err());
    }

    #[test]
    fn test_login_request_body() {
        let body = LoginRequest {
            name: "temp",
            email: "temp@email.com",
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"name": "temp", "email": "temp@email.com"})
        );
    }
}
