//! 应用启动
//!
//! 按依赖顺序一次性构建全部组件：
//! 配置 -> HTTP 客户端 -> 会话存储 -> 通知存储 -> 导航器。
//! 没有重入，也没有销毁路径。

use std::rc::Rc;

use crate::config::AppConfig;
use crate::http::{ApiClient, HttpTransport};
use crate::navigation::Navigator;
use crate::notification::NotificationStore;
use crate::session::SessionStore;
use crate::storage::KeyValueStore;
use crate::users::UserDirectory;

/// 挂载到视图树上的组件容器
pub struct App {
    pub config: AppConfig,
    pub session: Rc<SessionStore>,
    pub notifications: Rc<NotificationStore>,
    pub navigator: Rc<Navigator>,
}

impl App {
    pub fn bootstrap(
        config: AppConfig,
        transport: Rc<dyn HttpTransport>,
        storage: Rc<dyn KeyValueStore>,
        initial_path: &str,
    ) -> Self {
        // 1. HTTP 客户端：base URL 来自配置
        let client = ApiClient::new(config.api_base_url.as_str(), transport);

        // 2. 会话存储：读取持久化的 Token 并配置客户端
        let session = Rc::new(SessionStore::new(client, storage));

        // 3. 通知存储
        let notifications = Rc::new(NotificationStore::new());

        // 4. 导航器：守卫通过闭包读取会话状态
        let navigator = Rc::new(Navigator::new(initial_path, {
            let session = session.clone();
            move || session.is_authenticated()
        }));

        // 5. 认证状态变化时重新执行守卫
        let weak = Rc::downgrade(&navigator);
        session.subscribe(move |_| {
            if let Some(navigator) = weak.upgrade() {
                navigator.reevaluate();
            }
        });

        log::info!(
            "userdesk started against {} (authenticated: {})",
            config.api_base_url,
            session.is_authenticated()
        );

        Self {
            config,
            session,
            notifications,
            navigator,
        }
    }

    /// 用户管理接口，使用当前会话的凭据
    pub fn users(&self) -> UserDirectory {
        UserDirectory::new(self.session.client())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::tests::MockTransport;
    use crate::routes::AppRoute;
    use crate::storage::MemoryStore;
    use userdesk_shared::{HEADER_AUTHORIZATION, TOKEN_STORAGE_KEY};

    fn boot(transport: &Rc<MockTransport>, storage: &MemoryStore, path: &str) -> App {
        App::bootstrap(
            AppConfig::default(),
            transport.clone(),
            Rc::new(storage.clone()),
            path,
        )
    }

    #[test]
    fn no_token_at_startup_lands_on_login() {
        let app = boot(&MockTransport::new(), &MemoryStore::new(), "/");
        assert!(!app.session.is_authenticated());
        assert_eq!(app.navigator.current(), AppRoute::Login);
        assert_eq!(app.navigator.navigate("/").resolved, AppRoute::Login);
        assert!(!app.notifications.current().visible);
    }

    #[test]
    fn persisted_token_opens_protected_route() {
        let storage = MemoryStore::with_entry(TOKEN_STORAGE_KEY, "abc");
        let app = boot(&MockTransport::new(), &storage, "/user");
        assert!(app.session.is_authenticated());
        assert_eq!(app.navigator.current(), AppRoute::UserManagement);
        assert_eq!(app.session.client().authorization().as_deref(), Some("Bearer abc"));
    }

    #[tokio::test]
    async fn login_against_stub_then_navigate() {
        let transport = MockTransport::new();
        let storage = MemoryStore::new();
        let app = boot(&transport, &storage, "/user");
        assert_eq!(app.navigator.current(), AppRoute::Login);

        transport.reply(200, r#"{"token":"abc"}"#);
        assert!(app.session.login("alice", "pw").await);
        assert!(app.session.is_authenticated());
        assert_eq!(storage.get(TOKEN_STORAGE_KEY).as_deref(), Some("abc"));
        assert_eq!(app.navigator.navigate("/user").resolved, AppRoute::UserManagement);

        transport.reply(204, "");
        app.users().delete(2).await.unwrap();
        assert_eq!(transport.last().header(HEADER_AUTHORIZATION), Some("Bearer abc"));
    }

    #[test]
    fn logout_on_protected_route_redirects() {
        let storage = MemoryStore::with_entry(TOKEN_STORAGE_KEY, "abc");
        let app = boot(&MockTransport::new(), &storage, "/user");

        app.session.logout();
        assert_eq!(app.navigator.current(), AppRoute::Login);
        assert!(storage.get(TOKEN_STORAGE_KEY).is_none());
    }

    #[tokio::test]
    async fn rejected_token_is_detectable_for_logout() {
        let transport = MockTransport::new();
        let storage = MemoryStore::with_entry(TOKEN_STORAGE_KEY, "expired");
        let app = boot(&transport, &storage, "/user");

        transport.reply(401, r#"{"message":"invalid or expired jwt"}"#);
        let err = app.users().get(1).await.unwrap_err();
        assert!(err.is_unauthorized());

        app.session.logout();
        assert_eq!(app.navigator.current(), AppRoute::Login);
        assert_eq!(app.session.client().authorization(), None);
    }
}
