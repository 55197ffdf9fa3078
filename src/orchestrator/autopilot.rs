//! 挑战处理器 - 编排层
//!
//! ## 职责
//!
//! 0. **等待进入挑战**：页面 URL 带有挑战ID与类型后才开始
//! 1. **拉取题目**：每次挑战只拉取一次
//! 2. **逐题作答**：委托 `QuestionFlow` 处理当前题目
//! 3. **等待完成**：轮询题号按钮，出现 `finish` 后进入下一题
//! 4. **失败提示**：网络失败时向用户显示统一提示后中止

use tokio::time::{sleep, timeout};
use tracing::{error, info, warn};

use crate::clients::Oracle;
use crate::config::Config;
use crate::error::{AppResult, PageError};
use crate::models::Test;
use crate::page::{PageState, PageStateProvider, UiActuator};
use crate::utils::logging;
use crate::workflow::{ProcessResult, QuestionFlow};

/// 网络失败时显示给用户的提示
pub const NETWORK_FAILURE_NOTICE: &str = "网络连接失败，请稍候再试";

/// 轮询页面直到进入挑战，超过 `quiz_wait_secs` 视为页面状态异常
pub async fn wait_for_quiz<P>(provider: &P, config: &Config) -> AppResult<()>
where
    P: PageStateProvider + ?Sized,
{
    let interval = config.poll_interval();
    let poll = async {
        let mut announced = false;
        loop {
            match provider.is_quiz_open().await {
                Ok(true) => return Ok(()),
                Ok(false) => {
                    if !announced {
                        info!("⏳ 等待进入挑战页面...");
                        announced = true;
                    }
                    sleep(interval).await;
                }
                Err(e) => return Err::<(), PageError>(e),
            }
        }
    };

    match timeout(config.quiz_wait(), poll).await {
        Ok(result) => Ok(result?),
        Err(_) => Err(PageError::BadState("等待挑战页面超时，请先打开一个挑战".to_string()).into()),
    }
}

/// 挑战统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct QuizStats {
    pub answered: usize,
    pub total: usize,
}

/// 自动作答器
pub struct Autopilot<'a, O: ?Sized, P: ?Sized, A: ?Sized> {
    oracle: &'a O,
    provider: &'a P,
    actuator: &'a A,
    config: &'a Config,
}

impl<'a, O, P, A> Autopilot<'a, O, P, A>
where
    O: Oracle + ?Sized,
    P: PageStateProvider + ?Sized,
    A: UiActuator + ?Sized,
{
    pub fn new(oracle: &'a O, provider: &'a P, actuator: &'a A, config: &'a Config) -> Self {
        Self {
            oracle,
            provider,
            actuator,
            config,
        }
    }

    /// 只回答页面上的当前题目
    pub async fn answer_current(&self) -> AppResult<ProcessResult> {
        let result: AppResult<ProcessResult> = async {
            let (test, _) = self.fetch_test().await?;
            self.flow().run(&test).await
        }
        .await;
        self.report_failure(result).await
    }

    /// 从当前题目开始作答，直到最后一题完成
    pub async fn run(&self) -> AppResult<QuizStats> {
        let result = self.run_to_end().await;
        self.report_failure(result).await
    }

    async fn run_to_end(&self) -> AppResult<QuizStats> {
        let (test, first) = self.fetch_test().await?;
        let flow = self.flow();
        let mut stats = QuizStats::default();

        logging::log_question_start(first.question_index, first.question_count);

        // 题号只会前进，最多作答题目总数次
        let mut remaining = test.len().max(1);
        while remaining > 0 {
            remaining -= 1;

            let result = flow.run(&test).await?;
            stats.answered += 1;
            stats.total = result.ctx.question_count;

            self.wait_until_finished(result.ctx.question_index).await?;
            if result.ctx.is_last() {
                break;
            }
            logging::log_question_start(result.ctx.question_index + 1, result.ctx.question_count);
        }

        logging::print_final_stats(stats.answered, stats.total);
        Ok(stats)
    }

    /// 拉取题目，同时返回拉取时的页面快照
    async fn fetch_test(&self) -> AppResult<(Test, PageState)> {
        let state = self.provider.snapshot().await?;
        info!("📥 正在拉取挑战 {} 的题目...", state.test_id);
        let test = self.oracle.fetch_test(&state.test_id).await?;
        logging::log_quiz_start(
            &state.test_id,
            &state.test_type.to_string(),
            state.question_count,
            test.len(),
        );
        Ok((test, state))
    }

    fn flow(&self) -> QuestionFlow<'a, O, P, A> {
        QuestionFlow::new(
            self.oracle,
            self.provider,
            self.actuator,
            self.config.resolve_timeout(),
        )
    }

    async fn wait_until_finished(&self, question_index: usize) -> AppResult<()> {
        let interval = self.config.poll_interval();
        let poll = async {
            loop {
                match self.provider.is_question_finished(question_index).await {
                    Ok(true) => return Ok(()),
                    Ok(false) => sleep(interval).await,
                    Err(e) => return Err::<(), PageError>(e),
                }
            }
        };

        match timeout(self.config.finish_timeout(), poll).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(PageError::BadState(format!(
                "等待第 {} 题完成超时",
                question_index + 1
            ))
            .into()),
        }
    }

    async fn report_failure<T>(&self, result: AppResult<T>) -> AppResult<T> {
        if let Err(e) = &result {
            error!("❌ 自动作答中止: {}", e);
            if e.is_network() {
                if let Err(notify_err) = self.actuator.notify(NETWORK_FAILURE_NOTICE).await {
                    warn!("⚠️ 无法显示提示: {}", notify_err);
                }
            }
        }
        result
    }
}
