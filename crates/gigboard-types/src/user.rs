//! User types

use crate::RowId;
use serde::{Deserialize, Serialize};

/// Longest value the `role` column accepts
pub const ROLE_MAX_LEN: usize = 10;

/// Stored user row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: RowId,
    pub first_name: String,
    pub last_name: String,
    pub age: Option<i64>,
    pub email: String,
    pub role: Option<String>,
    pub phone: Option<String>,
}

/// User creation request (`POST /users`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub age: Option<i64>,
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Replacement values for every mutable user column (`PUT /users/{id}`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserUpdate {
    pub first_name: String,
    pub last_name: String,
    #[serde(deserialize_with = "crate::nullable::deserialize")]
    pub role: Option<String>,
    #[serde(deserialize_with = "crate::nullable::deserialize")]
    pub phone: Option<String>,
    pub email: String,
    #[serde(deserialize_with = "crate::nullable::deserialize")]
    pub age: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_serializes_every_column_in_order() {
        let user = User {
            id: 1,
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            age: None,
            email: "a@x.com".to_string(),
            role: None,
            phone: None,
        };

        assert_eq!(
            serde_json::to_string(&user).unwrap(),
            r#"{"id":1,"first_name":"Ann","last_name":"Lee","age":null,"email":"a@x.com","role":null,"phone":null}"#
        );
    }

    #[test]
    fn test_new_user_optional_fields_may_be_omitted() {
        let new_user: NewUser = serde_json::from_value(json!({
            "first_name": "Ann",
            "last_name": "Lee",
            "email": "a@x.com"
        }))
        .unwrap();

        assert_eq!(new_user.age, None);
        assert_eq!(new_user.role, None);
        assert_eq!(new_user.phone, None);
    }

    #[test]
    fn test_new_user_requires_email() {
        let err = serde_json::from_value::<NewUser>(json!({
            "first_name": "Ann",
            "last_name": "Lee"
        }))
        .unwrap_err();

        assert!(err.to_string().contains("missing field `email`"), "{}", err);
    }

    #[test]
    fn test_new_user_rejects_null_required_field() {
        let result = serde_json::from_value::<NewUser>(json!({
            "first_name": null,
            "last_name": "Lee",
            "email": "a@x.com"
        }));

        assert!(result.is_err());
    }

    #[test]
    fn test_new_user_rejects_client_supplied_id() {
        let err = serde_json::from_value::<NewUser>(json!({
            "id": 7,
            "first_name": "Ann",
            "last_name": "Lee",
            "email": "a@x.com"
        }))
        .unwrap_err();

        assert!(err.to_string().contains("unknown field `id`"), "{}", err);
    }

    #[test]
    fn test_update_requires_nullable_keys() {
        let err = serde_json::from_value::<UserUpdate>(json!({
            "first_name": "Ann",
            "last_name": "Lee",
            "phone": null,
            "email": "a@x.com",
            "age": 30
        }))
        .unwrap_err();

        assert!(err.to_string().contains("missing field `role`"), "{}", err);
    }

    #[test]
    fn test_update_accepts_explicit_nulls() {
        let update: UserUpdate = serde_json::from_value(json!({
            "first_name": "Ann",
            "last_name": "Lee",
            "role": null,
            "phone": null,
            "email": "a@x.com",
            "age": null
        }))
        .unwrap();

        assert_eq!(update.role, None);
        assert_eq!(update.age, None);
    }
}
