//! 路由定义模块 - 领域模型
//!
//! 纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由、静态重定向及守卫规则。

use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppRoute {
    /// 根路径，只做重定向
    Root,
    /// 登录页面
    #[default]
    Login,
    /// 注册页面
    Register,
    /// 用户管理 (需要认证)
    UserManagement,
    /// 页面未找到
    NotFound,
}

/// 路由表中的一条静态记录
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteRecord {
    pub path: &'static str,
    pub name: Option<&'static str>,
    pub route: AppRoute,
    pub requires_auth: bool,
    pub redirect: Option<AppRoute>,
}

/// 静态路由表，运行期间不会修改
pub const ROUTES: &[RouteRecord] = &[
    RouteRecord {
        path: "/",
        name: None,
        route: AppRoute::Root,
        requires_auth: false,
        redirect: Some(AppRoute::Login),
    },
    RouteRecord {
        path: "/login",
        name: Some("Login"),
        route: AppRoute::Login,
        requires_auth: false,
        redirect: None,
    },
    RouteRecord {
        path: "/register",
        name: Some("Register"),
        route: AppRoute::Register,
        requires_auth: false,
        redirect: None,
    },
    RouteRecord {
        path: "/user",
        name: Some("UserManagement"),
        route: AppRoute::UserManagement,
        requires_auth: true,
        redirect: None,
    },
];

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        // 忽略查询串、片段和末尾斜杠
        let path = path.split(['?', '#']).next().unwrap_or("");
        let trimmed = path.trim_end_matches('/');
        let path = if trimmed.is_empty() { "/" } else { trimmed };

        ROUTES
            .iter()
            .find(|r| r.path == path)
            .map(|r| r.route)
            .unwrap_or(Self::NotFound)
    }

    /// 路由表中的记录，`NotFound` 没有记录
    pub fn record(&self) -> Option<&'static RouteRecord> {
        ROUTES.iter().find(|r| r.route == *self)
    }

    /// 获取路由对应的 URL path
    pub fn path(&self) -> &'static str {
        self.record().map(|r| r.path).unwrap_or("/404")
    }

    pub fn name(&self) -> Option<&'static str> {
        self.record().and_then(|r| r.name)
    }

    /// **核心守卫规则：该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        self.record().is_some_and(|r| r.requires_auth)
    }

    /// 静态重定向目标
    pub fn redirect(&self) -> Option<AppRoute> {
        self.record().and_then(|r| r.redirect)
    }

    /// 认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// 守卫判定结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(AppRoute),
}

/// 导航守卫：受保护路由在未认证时改去登录页，其余一律放行
pub fn guard(target: AppRoute, is_authenticated: bool) -> GuardDecision {
    if target.requires_auth() && !is_authenticated {
        GuardDecision::Redirect(AppRoute::auth_failure_redirect())
    } else {
        GuardDecision::Allow
    }
}

/// 解析一次导航的最终落点
///
/// 先展开静态重定向，再对结果执行守卫。
pub fn resolve(path: &str, is_authenticated: bool) -> AppRoute {
    let mut route = AppRoute::from_path(path);
    // 路由表里的重定向链很短，限制跳数防止配置成环
    for _ in 0..ROUTES.len() {
        match route.redirect() {
            Some(next) => route = next,
            None => break,
        }
    }

    match guard(route, is_authenticated) {
        GuardDecision::Allow => route,
        GuardDecision::Redirect(to) => to,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_paths() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::Root);
        assert_eq!(AppRoute::from_path("/login"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/register/"), AppRoute::Register);
        assert_eq!(AppRoute::from_path("/user?tab=all"), AppRoute::UserManagement);
        assert_eq!(AppRoute::from_path("/nope"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path(""), AppRoute::Root);
    }

    #[test]
    fn route_metadata() {
        assert_eq!(AppRoute::UserManagement.path(), "/user");
        assert_eq!(AppRoute::UserManagement.name(), Some("UserManagement"));
        assert_eq!(AppRoute::Root.name(), None);
        assert_eq!(AppRoute::NotFound.path(), "/404");
        assert_eq!(AppRoute::Login.to_string(), "/login");

        let protected: Vec<_> = ROUTES.iter().filter(|r| r.requires_auth).collect();
        assert_eq!(protected.len(), 1);
        assert_eq!(protected[0].path, "/user");
    }

    #[test]
    fn guard_only_blocks_protected_routes_when_logged_out() {
        assert_eq!(
            guard(AppRoute::UserManagement, false),
            GuardDecision::Redirect(AppRoute::Login)
        );
        assert_eq!(guard(AppRoute::UserManagement, true), GuardDecision::Allow);
        assert_eq!(guard(AppRoute::Register, false), GuardDecision::Allow);
        assert_eq!(guard(AppRoute::Login, true), GuardDecision::Allow);
        assert_eq!(guard(AppRoute::NotFound, false), GuardDecision::Allow);
    }

    #[test]
    fn resolve_follows_redirect_then_guard() {
        assert_eq!(resolve("/", false), AppRoute::Login);
        assert_eq!(resolve("/", true), AppRoute::Login);
        assert_eq!(resolve("/user", false), AppRoute::Login);
        assert_eq!(resolve("/user", true), AppRoute::UserManagement);
        assert_eq!(resolve("/missing", false), AppRoute::NotFound);
    }
}
