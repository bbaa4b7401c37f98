//! 导航状态机
//!
//! 状态是"当前位于路由 R"，每次导航请求都先经过守卫再落地。
//! 认证检查以闭包形式注入，导航器本身不认识会话存储。

use std::rc::Rc;

use crate::observable::Observable;
use crate::routes::{AppRoute, GuardDecision, guard, resolve};

/// 一次导航的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation {
    /// 请求的路由
    pub requested: AppRoute,
    /// 实际落地的路由
    pub resolved: AppRoute,
}

impl Navigation {
    /// 是否被重定向（静态重定向或守卫拦截）
    pub fn redirected(&self) -> bool {
        self.requested != self.resolved
    }
}

type AuthProbe = Rc<dyn Fn() -> bool>;

pub struct Navigator {
    current: Observable<AppRoute>,
    is_authenticated: AuthProbe,
}

impl Navigator {
    /// 创建导航器，初始路径同样经过守卫
    pub fn new(initial_path: &str, is_authenticated: impl Fn() -> bool + 'static) -> Self {
        let is_authenticated: AuthProbe = Rc::new(is_authenticated);
        let initial = resolve(initial_path, is_authenticated());
        Self {
            current: Observable::new(initial),
            is_authenticated,
        }
    }

    pub fn current(&self) -> AppRoute {
        self.current.get()
    }

    /// **核心方法：导航与守卫**
    ///
    /// 流程：请求 -> 验证(Guard) -> 加载
    pub fn navigate(&self, path: &str) -> Navigation {
        let requested = AppRoute::from_path(path);
        let is_auth = (self.is_authenticated)();
        let resolved = resolve(path, is_auth);

        if requested.requires_auth() && resolved != requested {
            log::info!("[Router] Access Denied. Redirecting to {}.", resolved);
        }

        self.current.set(resolved);
        Navigation {
            requested,
            resolved,
        }
    }

    /// 认证状态变化后重新检查当前路由
    ///
    /// 例如在 `/user` 上登出后应回到登录页。返回发生的重定向。
    pub fn reevaluate(&self) -> Option<Navigation> {
        let route = self.current();
        match guard(route, (self.is_authenticated)()) {
            GuardDecision::Allow => None,
            GuardDecision::Redirect(to) => {
                log::info!("[Router] Auth state changed: redirecting to {}.", to);
                self.current.set(to);
                Some(Navigation {
                    requested: route,
                    resolved: to,
                })
            }
        }
    }

    pub fn subscribe(&self, f: impl Fn(&AppRoute) + 'static) {
        self.current.subscribe(f);
    }
}
