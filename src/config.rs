use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

/// 指定 TOML 配置文件路径的环境变量
pub const CONFIG_PATH_ENV: &str = "GOLDEN_EARS_CONFIG";

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 浏览器调试端口
    pub browser_debug_port: u16,
    /// 目标URL（未找到目标页面时打开）
    pub target_url: String,
    /// 目标页面标题关键字
    pub target_title: String,
    /// 验证服务地址，为空时取页面的 origin
    pub base_url: String,
    /// 验证接口路径
    pub endpoint_path: String,
    /// 单次网络请求超时（秒）
    pub request_timeout_secs: u64,
    /// 单个子问题等待正确答案的上限（秒）
    pub resolve_timeout_secs: u64,
    /// 轮询题目完成状态的间隔（毫秒）
    pub poll_interval_ms: u64,
    /// 等待单题完成的上限（秒）
    pub finish_timeout_secs: u64,
    /// 启动后等待用户进入挑战页面的上限（秒）
    pub quiz_wait_secs: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            browser_debug_port: 9222,
            target_url: "http://www.goldenears.cn/".to_string(),
            target_title: "金耳朵".to_string(),
            base_url: String::new(),
            endpoint_path: "/ajax/ears.ashx".to_string(),
            request_timeout_secs: 5,
            resolve_timeout_secs: 15,
            poll_interval_ms: 50,
            finish_timeout_secs: 30,
            quiz_wait_secs: 300,
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 加载配置：若设置了 `GOLDEN_EARS_CONFIG` 则先读取该 TOML 文件，再应用环境变量覆盖
    pub fn load() -> Result<Self, ConfigError> {
        let base = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_toml_file(&path)?,
            Err(_) => Self::default(),
        };
        Ok(base.with_env_overrides())
    }

    pub fn from_toml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.to_string(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| ConfigError::ParseFailed {
            path: path.to_string(),
            source,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    fn with_env_overrides(self) -> Self {
        Self {
            browser_debug_port: env_parse("BROWSER_DEBUG_PORT").unwrap_or(self.browser_debug_port),
            target_url: std::env::var("TARGET_URL").unwrap_or(self.target_url),
            target_title: std::env::var("TARGET_TITLE").unwrap_or(self.target_title),
            base_url: std::env::var("EARS_BASE_URL").unwrap_or(self.base_url),
            endpoint_path: std::env::var("EARS_ENDPOINT_PATH").unwrap_or(self.endpoint_path),
            request_timeout_secs: env_parse("REQUEST_TIMEOUT_SECS").unwrap_or(self.request_timeout_secs),
            resolve_timeout_secs: env_parse("RESOLVE_TIMEOUT_SECS").unwrap_or(self.resolve_timeout_secs),
            poll_interval_ms: env_parse("POLL_INTERVAL_MS").unwrap_or(self.poll_interval_ms),
            finish_timeout_secs: env_parse("FINISH_TIMEOUT_SECS").unwrap_or(self.finish_timeout_secs),
            quiz_wait_secs: env_parse("QUIZ_WAIT_SECS").unwrap_or(self.quiz_wait_secs),
            verbose_logging: env_parse("VERBOSE_LOGGING").unwrap_or(self.verbose_logging),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn resolve_timeout(&self) -> Duration {
        Duration::from_secs(self.resolve_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn finish_timeout(&self) -> Duration {
        Duration::from_secs(self.finish_timeout_secs)
    }

    pub fn quiz_wait(&self) -> Duration {
        Duration::from_secs(self.quiz_wait_secs)
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}
