//! 会话存储
//!
//! 持有当前 Bearer Token 与（可选的）用户资料，
//! 认证状态完全由 Token 是否存在推导。
//! 所有网络失败都在这里被收敛为 `false`，不会向调用方传播。

use std::cell::RefCell;
use std::rc::Rc;

use userdesk_shared::protocol::{GetUserRequest, LoginRequest, RegisterRequest};
use userdesk_shared::{TOKEN_STORAGE_KEY, User};

use crate::http::ApiClient;
use crate::observable::Observable;
use crate::storage::KeyValueStore;


/// 会话状态
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<User>,
}

impl Session {
    /// Token 非空即视为已认证
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

/// 会话存储
///
/// 拥有一个 `ApiClient`，登录/登出时同步更新它的 Bearer 凭据。
pub struct SessionStore {
    state: Observable<Session>,
    client: RefCell<ApiClient>,
    storage: Rc<dyn KeyValueStore>,
}

impl SessionStore {
    /// 从持久化存储恢复会话
    ///
    /// 如果存有 Token，客户端会立即带上它。
    pub fn new(mut client: ApiClient, storage: Rc<dyn KeyValueStore>) -> Self {
        let token = storage
            .get(TOKEN_STORAGE_KEY)
            .filter(|t| !t.is_empty());

        if let Some(token) = &token {
            client.set_bearer(token.as_str());
            log::debug!("[Session] restored persisted token");
        }

        Self {
            state: Observable::new(Session { token, user: None }),
            client: RefCell::new(client),
            storage,
        }
    }

    pub fn session(&self) -> Session {
        self.state.get()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.with(Session::is_authenticated)
    }

    pub fn token(&self) -> Option<String> {
        self.state.with(|s| s.token.clone())
    }

    pub fn user(&self) -> Option<User> {
        self.state.with(|s| s.user.clone())
    }

    /// 当前配置好的客户端（携带 Bearer 凭据）
    pub fn client(&self) -> ApiClient {
        self.client.borrow().clone()
    }

    pub fn subscribe(&self, f: impl Fn(&Session) + 'static) {
        self.state.subscribe(f);
    }

    /// 登录
    ///
    /// # Returns
    /// 登录是否成功；失败时状态保持不变
    pub async fn login(&self, username: &str, password: &str) -> bool {
        let client = self.client();
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        let token = match client.call(&request).await {
            Ok(resp) if !resp.token.is_empty() => resp.token,
            Ok(_) => {
                log::error!("Login failed: server returned an empty token");
                return false;
            }
            Err(e) => {
                log::error!("Login failed: {}", e);
                return false;
            }
        };

        if !self.storage.set(TOKEN_STORAGE_KEY, &token) {
            log::warn!("[Session] failed to persist token, session will not survive a reload");
        }
        self.client.borrow_mut().set_bearer(token.as_str());
        self.state.update(|s| s.token = Some(token));
        log::info!("[Session] logged in as {}", username);
        true
    }

    /// 注册新账号
    ///
    /// 注册不等于登录，无论结果如何都不修改会话状态。
    pub async fn register(&self, username: &str, password: &str, email: &str) -> bool {
        let request = RegisterRequest {
            username: username.to_string(),
            password: password.to_string(),
            email: email.to_string(),
        };

        // 任何 2xx 都算成功，响应体只用于日志
        match self.client().execute(&request).await {
            Ok(resp) => {
                match resp.json::<User>() {
                    Ok(user) => {
                        log::info!("[Session] registered user {} (id {})", user.username, user.id)
                    }
                    Err(_) => log::info!("[Session] registered user {}", username),
                }
                true
            }
            Err(e) => {
                log::error!("Registration failed: {}", e);
                false
            }
        }
    }

    /// 加载用户资料到会话中，需要已登录
    pub async fn load_profile(&self, id: u64) -> bool {
        if !self.is_authenticated() {
            return false;
        }

        match self.client().call(&GetUserRequest { id }).await {
            Ok(user) => {
                self.state.update(|s| s.user = Some(user));
                true
            }
            Err(e) => {
                log::error!("Loading profile {} failed: {}", id, e);
                false
            }
        }
    }

    /// 注销并清除状态，可重复调用
    pub fn logout(&self) {
        self.storage.remove(TOKEN_STORAGE_KEY);
        self.client.borrow_mut().clear_bearer();
        self.state.update(|s| {
            s.token = None;
            s.user = None;
        });
        log::info!("[Session] logged out");
    }
}
