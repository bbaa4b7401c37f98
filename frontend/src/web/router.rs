//! 路由服务模块 - History 引擎
//!
//! 封装了 web_sys 的 History API，实现高内聚：
//! 所有对 window.history 的操作都集中在此模块。
//! 守卫判定交给核心库的 `Navigator`，这里只负责同步浏览器地址。

use leptos::prelude::*;
use userdesk::AppRoute;
use wasm_bindgen::prelude::*;

use crate::state::{AppContext, use_app};

/// 获取当前浏览器路径
pub fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 推送 History 状态（内部工具函数）
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换 History 状态（内部工具函数，用于重定向）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 路由器服务
#[derive(Clone, Copy)]
pub struct RouterService {
    ctx: AppContext,
}

impl RouterService {
    fn new(ctx: AppContext) -> Self {
        Self { ctx }
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.ctx.route
    }

    /// **核心方法：导航与守卫**
    ///
    /// 流程：请求 -> 验证(Guard) -> 推入 History
    pub fn navigate(&self, path: &str) {
        let nav = self.ctx.navigator().navigate(path);
        if nav.resolved == AppRoute::NotFound {
            push_history_state(path);
        } else {
            push_history_state(nav.resolved.path());
        }
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let ctx = self.ctx;

        let closure = Closure::<dyn Fn()>::new(move || {
            // popstate 时也执行守卫逻辑
            let nav = ctx.navigator().navigate(&current_path());
            if nav.redirected() && nav.resolved != AppRoute::NotFound {
                replace_history_state(nav.resolved.path());
            }
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 路由被守卫改写时（启动重定向、登出后重新检查）同步地址栏
    fn setup_location_sync(&self) {
        let route = self.ctx.route;

        Effect::new(move |_| {
            let route = route.get();
            if route != AppRoute::NotFound && current_path() != route.path() {
                log::info!("[Router] Syncing location to {}.", route);
                replace_history_state(route.path());
            }
        });
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(ctx: AppContext) -> RouterService {
    let router = RouterService::new(ctx);

    router.init_popstate_listener();
    router.setup_location_sync();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

/// 导航函数（返回一个可调用的闭包）
pub fn use_navigate() -> impl Fn(&str) + Clone {
    let router = use_router();
    move |to: &str| {
        router.navigate(to);
    }
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部、`AppContext` 之后使用。
#[component]
pub fn Router(children: Children) -> impl IntoView {
    provide_router(use_app());

    children()
}

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}

/// 站内链接，点击时走路由服务而不是整页跳转
#[component]
pub fn Link(
    /// 目标路径
    #[prop(into)]
    to: String,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let target = to.clone();
    let on_click = move |ev: leptos::ev::MouseEvent| {
        ev.prevent_default();
        router.navigate(&target);
    };

    view! {
        <a href=to class=class on:click=on_click>
            {children()}
        </a>
    }
}
