//! userdesk 前端应用
//!
//! 采用 Context-Driven 的架构：
//! - `userdesk`（核心库）: 会话、通知、路由守卫，均为显式可订阅的状态
//! - `state`: 把核心状态桥接到 Leptos 信号
//! - `web`: 浏览器原生 API 封装（localStorage / fetch / History / setTimeout）
//! - `components`: UI 组件层

mod components {
    mod icons;
    pub mod login;
    pub mod notification_banner;
    pub mod register;
    pub mod user_management;
}
mod state;

use std::rc::Rc;

use crate::components::login::LoginPage;
use crate::components::notification_banner::NotificationBanner;
use crate::components::register::RegisterPage;
use crate::components::user_management::UserManagementPage;
use crate::state::AppContext;

use leptos::prelude::*;
use userdesk::{AppConfig, AppRoute};

// 原生 Web API 封装模块
// 此模块提供对浏览器原生 API 的轻量级封装，替代 gloo-* 系列 crate，
// 以减小 WASM 二进制体积。
pub(crate) mod web {
    mod http;
    pub mod router;
    mod storage;
    mod timer;

    pub use http::FetchTransport;
    pub use storage::LocalStorage;
    pub use timer::Timeout;
}

use web::router::{Router, RouterOutlet, current_path};
use web::{FetchTransport, LocalStorage};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        // 根路径在守卫阶段已被重定向，这里兜底渲染登录页
        AppRoute::Root | AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::UserManagement => view! { <UserManagementPage /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 启动核心组件：配置 -> 客户端 -> 会话 -> 通知 -> 导航器
    let app = userdesk::App::bootstrap(
        AppConfig::from_build_env(),
        Rc::new(FetchTransport),
        Rc::new(LocalStorage),
        &current_path(),
    );

    // 2. 建立信号桥接并提供上下文
    let ctx = AppContext::new(app);
    provide_context(ctx);

    view! {
        // 3. 路由器组件：守卫由核心导航器执行
        <Router>
            <NotificationBanner />
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
