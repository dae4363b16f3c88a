//! Data models for the project.
//!
//! A [`Dog`] is decoded straight from the hydration endpoint and written
//! straight into the `Dog` table, so the same struct serves both sides.

use serde::{Deserialize, Serialize};

/// A dog record as returned by the remote API
///
/// Every field is required. A record with a missing or `null` field, or an
/// age that does not fit in a `u8`, fails to decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dog {
    pub age: u8,
    pub breed: String,
    /// Globally unique identity, primary key of the `Dog` table
    pub id: String,
    #[serde(rename = "img")]
    pub image_link: String,
    pub name: String,
    pub zip_code: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_wire_format() {
        let json = r#"{
            "age": 3,
            "breed": "lab",
            "id": "a1",
            "img": "https://example.com/a1.jpg",
            "name": "Rex",
            "zip_code": "12345"
        }"#;

        let dog: Dog = serde_json::from_str(json).unwrap();
        assert_eq!(dog.age, 3);
        assert_eq!(dog.breed, "lab");
        assert_eq!(dog.id, "a1");
        assert_eq!(dog.image_link, "https://example.com/a1.jpg");
        assert_eq!(dog.name, "Rex");
        assert_eq!(dog.zip_code, "12345");
    }

    #[test]
    fn test_missing_field_rejected() {
        let json = r#"{"age": 3, "breed": "lab", "id": "a1", "name": "Rex", "zip_code": "12345"}"#;
        assert!(serde_json::from_str::<Dog>(json).is_err());
    }

    #[test]
    fn test_null_field_rejected() {
        let json = r#"{"age": 3, "breed": "lab", "id": "a1", "img": null, "name": "Rex", "zip_code": "12345"}"#;
        assert!(serde_json::from_str::<Dog>(json).is_err());
    }

    #[test]
    fn test_age_out_of_range_rejected() {
        let json = r#"{"age": 300, "breed": "lab", "id": "a1", "img": "x", "name": "Rex", "zip_code": "12345"}"#;
        assert!(serde_json::from_str::<Dog>(json).is_err());
    }
}
