//! Domain models for the posts and users resources.
//!
//! # Design
//! Top-level fields are `Option` so a model can represent both a create
//! request (no `id` yet, optional sections left out) and a decoded response
//! that is missing a field. `None` is never serialized, and unknown response
//! fields are ignored on decode.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl Post {
    /// Create-request literal: everything but the server-assigned id.
    pub fn new(user_id: u32, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: None,
            user_id: Some(user_id),
            title: Some(title.into()),
            body: Some(body.into()),
        }
    }

    /// A post is valid when it has an author, a non-blank title and a body.
    /// The body may be empty.
    pub fn is_valid(&self) -> bool {
        self.user_id.is_some()
            && self.title.as_deref().is_some_and(|t| !t.trim().is_empty())
            && self.body.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Geo {
    #[serde(default)]
    pub lat: String,
    #[serde(default)]
    pub lng: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub suite: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub zipcode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geo: Option<Geo>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub catch_phrase: String,
    #[serde(default)]
    pub bs: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<Company>,
}

impl User {
    /// Loose syntactic check: present, contains `@` and contains `.`.
    /// Not RFC validation; `"a.b@c"` passes.
    pub fn is_valid_email(&self) -> bool {
        self.email
            .as_deref()
            .is_some_and(|e| e.contains('@') && e.contains('.'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_email(email: Option<&str>) -> User {
        User {
            email: email.map(str::to_string),
            ..User::default()
        }
    }

    #[test]
    fn email_validity_heuristic() {
        assert!(user_with_email(Some("test@example.com")).is_valid_email());
        assert!(!user_with_email(Some("not-an-email")).is_valid_email());
        assert!(!user_with_email(Some("user@localhost")).is_valid_email());
        assert!(!user_with_email(None).is_valid_email());
    }

    #[test]
    fn post_validity() {
        assert!(Post::new(1, "title", "body").is_valid());
        assert!(Post::new(1, "title", "").is_valid());
        assert!(!Post::new(1, "   ", "body").is_valid());

        let no_author = Post {
            user_id: None,
            ..Post::new(1, "title", "body")
        };
        assert!(!no_author.is_valid());

        let no_body = Post {
            body: None,
            ..Post::new(1, "title", "body")
        };
        assert!(!no_body.is_valid());
    }

    #[test]
    fn new_post_serializes_without_id() {
        let json = serde_json::to_value(Post::new(1, "t", "b")).unwrap();
        assert_eq!(json, serde_json::json!({"userId": 1, "title": "t", "body": "b"}));
    }

    #[test]
    fn post_ignores_unknown_fields() {
        let post: Post =
            serde_json::from_str(r#"{"id":1,"userId":2,"title":"t","body":"b","extra":[1]}"#).unwrap();
        assert_eq!(post.id, Some(1));
        assert_eq!(post.user_id, Some(2));
    }

    #[test]
    fn user_decodes_nested_records() {
        let raw = r#"{
            "id": 1,
            "name": "Leanne Graham",
            "username": "Bret",
            "email": "Sincere@april.biz",
            "address": {
                "street": "Kulas Light",
                "suite": "Apt. 556",
                "city": "Gwenborough",
                "zipcode": "92998-3874",
                "geo": {"lat": "-37.3159", "lng": "81.1496"}
            },
            "phone": "1-770-736-8031 x56442",
            "website": "hildegard.org",
            "company": {
                "name": "Romaguera-Crona",
                "catchPhrase": "Multi-layered client-server neural-net",
                "bs": "harness real-time e-markets"
            }
        }"#;
        let user: User = serde_json::from_str(raw).unwrap();
        let address = user.address.as_ref().unwrap();
        assert_eq!(address.city, "Gwenborough");
        assert_eq!(address.geo.as_ref().unwrap().lng, "81.1496");
        assert_eq!(
            user.company.as_ref().unwrap().catch_phrase,
            "Multi-layered client-server neural-net"
        );
        assert!(user.is_valid_email());
    }

    #[test]
    fn partial_user_omits_missing_sections() {
        let user = User {
            name: Some("John Doe".to_string()),
            email: Some("john.doe@example.com".to_string()),
            ..User::default()
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("address").is_none());
        assert!(json.get("id").is_none());
        assert_eq!(json["email"], "john.doe@example.com");
    }
}
