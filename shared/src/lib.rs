use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod protocol;

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 持久化 Bearer Token 的存储键
pub const TOKEN_STORAGE_KEY: &str = "token";
pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const API_PREFIX: &str = "/api/v1";

/// 生成 `Authorization` 头的值
pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 用户资料
///
/// 后端返回的用户对象字段较多，客户端只强依赖 id/username/email，
/// 其余字段缺省时使用默认值。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub first_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub last_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub phone: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn new(id: u64, username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            email: email.into(),
            first_name: String::new(),
            last_name: String::new(),
            phone: String::new(),
            status: String::new(),
            created_at: None,
            updated_at: None,
            deleted_at: None,
        }
    }

    /// 已被软删除
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// 用于界面显示的名称，没有姓名时退回到用户名
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

/// 用户资料的更新内容，未设置的字段保持服务端原值
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_decodes_full_backend_payload() {
        let json = r#"{
            "id": 7,
            "username": "alice",
            "password": "ignored",
            "email": "alice@example.com",
            "first_name": "Alice",
            "last_name": "Liddell",
            "phone": "",
            "status": "active",
            "created_at": "2024-05-01T10:00:00Z",
            "updated_at": "2024-05-02T10:00:00Z"
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, 7);
        assert_eq!(user.status, "active");
        assert!(user.created_at.is_some());
        assert!(!user.is_deleted());
        assert_eq!(user.display_name(), "Alice Liddell");
    }

    #[test]
    fn user_decodes_register_reply() {
        let json = r#"{"id":1,"username":"bob","email":"bob@example.com","status":"active"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user, User { status: "active".into(), ..User::new(1, "bob", "bob@example.com") });
        assert_eq!(user.display_name(), "bob");
    }

    #[test]
    fn update_only_serializes_set_fields() {
        let update = UserUpdate {
            email: Some("new@example.com".into()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_string(&update).unwrap(),
            r#"{"email":"new@example.com"}"#
        );
    }

    #[test]
    fn bearer_header_value() {
        assert_eq!(bearer("abc"), "Bearer abc");
    }
}
