//! 题目处理流程 - 流程层
//!
//! 核心职责：定义"一道题"的完整处理流程
//!
//! 流程顺序：
//! 1. 读取页面快照
//! 2. 推断答案（验证服务竞速）
//! 3. 点击答案

use std::time::Duration;

use tracing::{debug, info};

use crate::clients::Oracle;
use crate::engine::{Answer, AnswerEngine};
use crate::error::AppResult;
use crate::models::Test;
use crate::page::{PageStateProvider, UiActuator};
use crate::utils::logging;
use crate::workflow::question_ctx::QuestionCtx;

/// 单题处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessResult {
    pub ctx: QuestionCtx,
    pub answer: Answer,
}

/// 题目处理流程
///
/// - 编排单题的读取、推断、点击
/// - 不持有浏览器资源，只依赖三个协作者
pub struct QuestionFlow<'a, O: ?Sized, P: ?Sized, A: ?Sized> {
    oracle: &'a O,
    provider: &'a P,
    actuator: &'a A,
    resolve_timeout: Duration,
}

impl<'a, O, P, A> QuestionFlow<'a, O, P, A>
where
    O: Oracle + ?Sized,
    P: PageStateProvider + ?Sized,
    A: UiActuator + ?Sized,
{
    pub fn new(oracle: &'a O, provider: &'a P, actuator: &'a A, resolve_timeout: Duration) -> Self {
        Self {
            oracle,
            provider,
            actuator,
            resolve_timeout,
        }
    }

    /// 处理页面上的当前题目
    pub async fn run(&self, test: &Test) -> AppResult<ProcessResult> {
        let state = self.provider.snapshot().await?;
        let ctx = QuestionCtx::from_state(&state);
        info!("{} 🔍 正在推断答案...", ctx);

        let answer = AnswerEngine::new(self.oracle, self.resolve_timeout)
            .resolve(test, &state)
            .await?;

        debug!("{} 点击答案 {:?}", ctx, answer);
        self.actuator.apply(ctx.test_type, answer).await?;
        logging::log_answer(&ctx.to_string(), &format!("{:?}", answer));

        Ok(ProcessResult { ctx, answer })
    }
}
