//! 应用入口 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：连接浏览器、找到挑战页面、创建 JsExecutor
//! 2. **组装协作者**：页面读取、页面操作；进入挑战后再创建验证服务客户端
//! 3. **资源管理**：唯一持有 Browser 的模块
//! 4. **向下委托**：委托 `Autopilot` 完成整次挑战

use std::sync::Arc;

use chromiumoxide::Browser;
use tracing::{debug, info, warn};

use crate::browser;
use crate::clients::HttpOracle;
use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::JsExecutor;
use crate::orchestrator::autopilot::{wait_for_quiz, Autopilot, QuizStats};
use crate::page::{DomActuator, DomPageProvider};
use crate::utils::logging;

/// 应用主结构
pub struct App {
    config: Config,
    _browser: Browser,
    executor: Arc<JsExecutor>,
    provider: DomPageProvider,
    actuator: DomActuator,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> AppResult<Self> {
        logging::log_startup(config.browser_debug_port, config.request_timeout_secs);

        let (browser, page) = browser::connect_to_browser_and_page(
            config.browser_debug_port,
            Some(&config.target_url),
            Some(&config.target_title),
        )
        .await?;

        // 页面读取与页面操作共用同一个 JsExecutor（持有 page）
        let executor = Arc::new(JsExecutor::new(page));
        let provider = DomPageProvider::new(executor.clone());
        let actuator = DomActuator::new(executor.clone());

        Ok(Self {
            config,
            _browser: browser,
            executor,
            provider,
            actuator,
        })
    }

    /// 创建验证服务客户端：地址取配置或页面 origin，附带页面上的会话 Cookie
    async fn build_oracle(&self) -> AppResult<HttpOracle> {
        let base_url = if self.config.base_url.is_empty() {
            let origin: String = self.executor.eval_as("location.origin").await?;
            debug!("使用页面 origin 作为验证服务地址: {}", origin);
            origin
        } else {
            self.config.base_url.clone()
        };

        let mut oracle = HttpOracle::from_config(&self.config, &base_url)?;
        match self.executor.cookie_header().await {
            Ok(cookie) if !cookie.is_empty() => oracle = oracle.with_cookie(&cookie),
            Ok(_) => warn!("⚠️ 页面没有 Cookie，验证请求可能被拒绝"),
            Err(e) => warn!("⚠️ 读取页面 Cookie 失败: {}", e),
        }
        info!("✓ 验证服务: {}", oracle.endpoint());
        Ok(oracle)
    }

    /// 运行应用主逻辑：等待进入挑战，然后完成全部题目
    pub async fn run(&self) -> AppResult<QuizStats> {
        wait_for_quiz(&self.provider, &self.config).await?;
        let oracle = self.build_oracle().await?;

        Autopilot::new(&oracle, &self.provider, &self.actuator, &self.config)
            .run()
            .await
    }
}
