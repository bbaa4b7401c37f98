//! 用户管理 API
//!
//! `/user` 页面使用的受保护接口，结果原样返回 `HttpError`，
//! 由页面决定如何提示用户。

use userdesk_shared::protocol::{
    DeleteUserRequest, GetUserRequest, RestoreUserRequest, UpdateUserRequest,
};
use userdesk_shared::{User, UserUpdate};

use crate::error::HttpResult;
use crate::http::ApiClient;

#[derive(Debug, Clone)]
pub struct UserDirectory {
    client: ApiClient,
}

impl UserDirectory {
    /// 客户端应当已携带 Bearer 凭据（通常来自 `SessionStore::client`）
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn get(&self, id: u64) -> HttpResult<User> {
        self.client.call(&GetUserRequest { id }).await
    }

    pub async fn update(&self, id: u64, update: UserUpdate) -> HttpResult<User> {
        self.client.call(&UpdateUserRequest { id, update }).await
    }

    /// 软删除
    pub async fn delete(&self, id: u64) -> HttpResult<()> {
        self.client.call(&DeleteUserRequest { id }).await
    }

    /// 撤销软删除
    pub async fn restore(&self, id: u64) -> HttpResult<()> {
        self.client.call(&RestoreUserRequest { id }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::tests::MockTransport;
    use userdesk_shared::{HEADER_AUTHORIZATION, HEADER_CONTENT_TYPE};
    use userdesk_shared::protocol::HttpMethod;

    fn directory(transport: &std::rc::Rc<MockTransport>) -> UserDirectory {
        let mut client = ApiClient::new("http://api", transport.clone());
        client.set_bearer("abc");
        UserDirectory::new(client)
    }

    #[tokio::test]
    async fn get_fetches_by_id_with_bearer() {
        let transport = MockTransport::new();
        transport.reply(200, r#"{"id":3,"username":"carol","email":"c@example.com"}"#);

        let user = directory(&transport).get(3).await.unwrap();
        assert_eq!(user.username, "carol");

        let sent = transport.last();
        assert_eq!(sent.method, HttpMethod::Get);
        assert_eq!(sent.url, "http://api/api/v1/users/3");
        assert_eq!(sent.header(HEADER_AUTHORIZATION), Some("Bearer abc"));
    }

    #[tokio::test]
    async fn update_sends_only_changed_fields() {
        let transport = MockTransport::new();
        transport.reply(
            200,
            r#"{"id":3,"username":"carol","email":"new@example.com"}"#,
        );

        let update = UserUpdate {
            email: Some("new@example.com".into()),
            ..Default::default()
        };
        let user = directory(&transport).update(3, update).await.unwrap();
        assert_eq!(user.email, "new@example.com");

        let sent = transport.last();
        assert_eq!(sent.method, HttpMethod::Put);
        assert_eq!(sent.body.as_deref(), Some(r#"{"email":"new@example.com"}"#));
    }

    #[tokio::test]
    async fn delete_surfaces_server_error() {
        let transport = MockTransport::new();
        transport.reply(204, "");
        transport.reply(500, r#"{"message":"db down"}"#);

        let users = directory(&transport);
        users.delete(3).await.unwrap();
        let err = users.delete(3).await.unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert_eq!(transport.last().url, "http://api/api/v1/users/3");
    }

    #[tokio::test]
    async fn restore_patches_without_body() {
        let transport = MockTransport::new();
        transport.reply(200, "");

        directory(&transport).restore(3).await.unwrap();

        let sent = transport.last();
        assert_eq!(sent.method, HttpMethod::Patch);
        assert_eq!(sent.url, "http://api/api/v1/users/3");
        assert_eq!(sent.body, None);
        assert_eq!(sent.header(HEADER_CONTENT_TYPE), None);
        assert_eq!(sent.header(HEADER_AUTHORIZATION), Some("Bearer abc"));
    }
}
