//! Record kinds served by the API.
//!
//! Field names on the wire are case-sensitive and match the JSON the service
//! has always spoken (`Id`, `ImageURL`, ...). Missing fields decode as empty
//! strings and unknown fields are ignored.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A storable record.
///
/// The id belongs to the store: it is assigned on insert and never taken
/// from the client.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    fn id(&self) -> &str;
    fn assign_id(&mut self, id: String);
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct User {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Password")]
    pub password: String,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct Post {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Caption")]
    pub caption: String,
    #[serde(rename = "ImageURL")]
    pub image_url: String,
    #[serde(rename = "TimeStamp")]
    pub timestamp: String,
}

impl Record for User {
    fn id(&self) -> &str { &self.id }
    fn assign_id(&mut self, id: String) { self.id = id; }
}

impl Record for Post {
    fn id(&self) -> &str { &self.id }
    fn assign_id(&mut self, id: String) { self.id = id; }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn post_uses_wire_field_names() {
        let post = Post {
            id: "1".into(),
            caption: "sunset".into(),
            image_url: "http://img/1.png".into(),
            timestamp: "2021-10-09T10:00:00Z".into(),
        };
        assert_eq!(
            serde_json::to_value(&post).unwrap(),
            json!({
                "Id": "1",
                "Caption": "sunset",
                "ImageURL": "http://img/1.png",
                "TimeStamp": "2021-10-09T10:00:00Z",
            })
        );
    }

    #[test]
    fn missing_fields_default_and_unknown_fields_are_ignored() {
        let user: User = serde_json::from_str(r#"{"Name":"Ada","Role":"admin"}"#).unwrap();
        assert_eq!(user.name, "Ada");
        assert_eq!(user.email, "");
        assert_eq!(user.id, "");
    }

    #[test]
    fn field_names_are_case_sensitive() {
        let user: User = serde_json::from_str(r#"{"name":"Ada"}"#).unwrap();
        assert_eq!(user.name, "");
    }

    #[test]
    fn non_string_field_is_rejected() {
        assert!(serde_json::from_str::<User>(r#"{"Name":42}"#).is_err());
    }
}
