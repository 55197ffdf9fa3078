use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 网络请求错误（拉取题目 / 验证答案）
    #[error("网络错误: {0}")]
    Network(#[from] NetworkError),
    /// 答案推断错误
    #[error("推断错误: {0}")]
    Resolve(#[from] ResolveError),
    /// 页面读取 / 操作错误
    #[error("页面错误: {0}")]
    Page(#[from] PageError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 网络相关错误
///
/// 任何一次拉取或验证请求的失败都会导致本题推断失败，不做重试。
#[derive(Debug, Error)]
pub enum NetworkError {
    /// 请求超时
    #[error("请求超时 ({endpoint})")]
    Timeout { endpoint: String },
    /// 传输层失败
    #[error("请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 服务端返回非 2xx 状态码
    #[error("服务端返回错误状态 ({endpoint}): {status}")]
    BadStatus { endpoint: String, status: u16 },
    /// 题目数据无法解析
    #[error("题目数据解析失败: {source}")]
    DecodeFailed {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl NetworkError {
    /// 根据 reqwest 错误区分超时与其他传输失败
    pub fn from_reqwest(endpoint: impl Into<String>, err: reqwest::Error) -> Self {
        let endpoint = endpoint.into();
        if err.is_timeout() {
            NetworkError::Timeout { endpoint }
        } else {
            NetworkError::RequestFailed {
                endpoint,
                source: Box::new(err),
            }
        }
    }
}

/// 答案推断错误
#[derive(Debug, Error)]
pub enum ResolveError {
    /// 验证请求失败
    #[error(transparent)]
    Network(#[from] NetworkError),
    /// 页面与题目数据之间的映射查找失败
    #[error("映射查找失败: {what}")]
    LookupMiss { what: String },
    /// 所有候选均被判定错误，或在限定时间内没有任何候选被确认
    #[error("未找到正确答案 ({sub_question})")]
    NoMatchFound { sub_question: &'static str },
    /// 题号超出题目数据范围
    #[error("题号 {index} 超出范围 (共 {count} 题)")]
    QuestionOutOfRange { index: usize, count: usize },
}

impl ResolveError {
    pub fn lookup_miss(what: impl Into<String>) -> Self {
        ResolveError::LookupMiss { what: what.into() }
    }
}

/// 页面相关错误
#[derive(Debug, Error)]
pub enum PageError {
    /// 执行脚本失败
    #[error("执行脚本失败: {source}")]
    ScriptFailed {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 页面数据不符合预期
    #[error("页面数据异常: {0}")]
    BadState(String),
    /// 不支持的挑战类型
    #[error("未知的挑战类型: {0:?}")]
    UnknownTestType(String),
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 配置文件读取失败
    #[error("读取配置文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 配置文件解析失败
    #[error("解析配置文件失败 ({path}): {source}")]
    ParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

// ========== 从常见错误类型转换 ==========

impl From<chromiumoxide::error::CdpError> for PageError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        PageError::ScriptFailed {
            source: Box::new(err),
        }
    }
}

impl From<serde_json::Error> for PageError {
    fn from(err: serde_json::Error) -> Self {
        PageError::BadState(err.to_string())
    }
}

impl AppError {
    /// 是否属于网络类失败（用于决定是否向用户弹出"网络连接失败"提示）
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            AppError::Network(_) | AppError::Resolve(ResolveError::Network(_))
        )
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
