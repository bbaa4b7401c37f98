//! userdesk 核心
//!
//! 单页应用外壳中与平台无关的部分，可在原生与 wasm32 目标上编译：
//! - `config`: 运行时配置（API 地址）
//! - `storage`: 持久化键值存储抽象
//! - `http`: 携带 Bearer 凭据的 API 客户端与传输层抽象
//! - `session` / `notification`: 显式可订阅的状态存储
//! - `routes` / `navigation`: 路由表、守卫与导航状态机
//! - `app`: 按依赖顺序完成启动

pub mod app;
pub mod config;
pub mod error;
pub mod http;
pub mod navigation;
pub mod notification;
pub mod observable;
pub mod routes;
pub mod session;
pub mod storage;
pub mod users;

pub use app::App;
pub use config::AppConfig;
pub use error::{HttpError, HttpResult};
pub use http::{ApiClient, HttpRequest, HttpResponse, HttpTransport};
pub use navigation::{Navigation, Navigator};
pub use notification::{Notification, NotificationColor, NotificationStore};
pub use observable::Observable;
pub use routes::{AppRoute, GuardDecision, ROUTES, RouteRecord};
pub use session::{Session, SessionStore};
pub use storage::{KeyValueStore, MemoryStore};
pub use users::UserDirectory;

#[cfg(not(target_arch = "wasm32"))]
pub use http::ReqwestTransport;

pub use userdesk_shared as shared;
