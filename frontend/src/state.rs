//! 状态桥接模块
//!
//! 核心库的存储只提供显式订阅，这里把它们的变化写入 Leptos 信号，
//! 并通过 Context 在组件间共享。

use std::rc::Rc;

use leptos::prelude::*;
use userdesk::{
    App, AppRoute, Navigator, Notification, NotificationStore, Session, SessionStore,
    UserDirectory,
};

/// 应用上下文
///
/// 核心组件不是 `Send`，放在本地 `StoredValue` 中；
/// 对外暴露的只读信号由订阅回调驱动。
#[derive(Clone, Copy)]
pub struct AppContext {
    app: StoredValue<App, LocalStorage>,
    /// 会话状态（只读）
    pub session: ReadSignal<Session>,
    /// 当前通知（只读）
    pub notification: ReadSignal<Notification>,
    /// 当前路由（只读）
    pub route: ReadSignal<AppRoute>,
}

impl AppContext {
    /// 接管启动完成的核心组件，并建立信号桥接
    pub fn new(app: App) -> Self {
        let (session, set_session) = signal(app.session.session());
        let (notification, set_notification) = signal(app.notifications.current());
        let (route, set_route) = signal(app.navigator.current());

        app.session.subscribe(move |s| set_session.set(s.clone()));
        app.notifications
            .subscribe(move |n| set_notification.set(n.clone()));
        app.navigator.subscribe(move |r| set_route.set(*r));

        Self {
            app: StoredValue::new_local(app),
            session,
            notification,
            route,
        }
    }

    pub fn session_store(&self) -> Rc<SessionStore> {
        self.app.with_value(|app| app.session.clone())
    }

    pub fn notifications(&self) -> Rc<NotificationStore> {
        self.app.with_value(|app| app.notifications.clone())
    }

    pub fn navigator(&self) -> Rc<Navigator> {
        self.app.with_value(|app| app.navigator.clone())
    }

    pub fn users(&self) -> UserDirectory {
        self.app.with_value(App::users)
    }
}

/// 从 Context 获取应用上下文
pub fn use_app() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}
