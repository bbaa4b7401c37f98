// =========================================================
// 运行时配置 (Runtime Configuration)
// =========================================================

/// 选择 API 地址的环境变量名
pub const API_URL_VAR: &str = "USERDESK_API_URL";

/// 环境变量未设置时使用的默认地址
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

/// 应用配置
///
/// 只在启动时解析一次，之后作为只读值传给各组件。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

impl AppConfig {
    /// 通过注入的查找函数解析配置，读不到（或为空）就用默认值
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup(API_URL_VAR)
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        Self { api_base_url }
    }

    /// 从进程环境变量读取
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 使用编译期注入的环境变量
    ///
    /// 浏览器里没有进程环境，构建 wasm 包时由 `USERDESK_API_URL` 决定。
    pub fn from_build_env() -> Self {
        Self::from_lookup(|key| match key {
            API_URL_VAR => option_env!("USERDESK_API_URL").map(str::to_string),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_when_unset() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config.api_base_url, "http://localhost:8080");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn blank_value_counts_as_unset() {
        let config = AppConfig::from_lookup(|_| Some("   ".to_string()));
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn reads_variable_and_trims_slash() {
        let config = AppConfig::from_lookup(|key| {
            (key == API_URL_VAR).then(|| "https://api.example.com/".to_string())
        });
        assert_eq!(config.api_base_url, "https://api.example.com");
    }
}
