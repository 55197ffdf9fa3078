use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::engine::Answer;
use crate::error::PageError;
use crate::infrastructure::JsExecutor;
use crate::models::TestType;
use crate::page::OPTIONS_JS;

/// 页面操作者：把推断出的答案落实为点击
#[async_trait]
pub trait UiActuator: Send + Sync {
    /// 根据挑战类型点击答案（必要时点击"下一题"）
    async fn apply(&self, test_type: TestType, answer: Answer) -> Result<(), PageError>;

    /// 向用户显示提示
    async fn notify(&self, message: &str) -> Result<(), PageError>;
}

/// 通过浏览器脚本操作页面
pub struct DomActuator {
    executor: Arc<JsExecutor>,
}

impl DomActuator {
    pub fn new(executor: Arc<JsExecutor>) -> Self {
        Self { executor }
    }

    fn click_single_script(index: usize) -> String {
        format!(
            r#"
            (() => {{
                {OPTIONS_JS}
                return clickOption('#divMainInfo', {index});
            }})()
            "#
        )
    }

    fn click_pair_script(strength: usize, band: usize) -> String {
        format!(
            r#"
            (() => {{
                {OPTIONS_JS}
                document.querySelectorAll('.play-box').forEach(el => el.classList.add('on'));
                const clickNext = () => document.querySelectorAll('a.bg-next').forEach(el => el.click());
                clickNext();
                const upper = clickOption('#divMainTitle', {strength});
                const lower = clickOption('#divMainInfo', {band});
                clickNext();
                return upper && lower;
            }})()
            "#
        )
    }
}

#[async_trait]
impl UiActuator for DomActuator {
    async fn apply(&self, test_type: TestType, answer: Answer) -> Result<(), PageError> {
        let js_code = match (test_type.has_band(), answer) {
            (false, Answer::Single(index)) => Self::click_single_script(index),
            (true, Answer::Pair { strength, band }) => Self::click_pair_script(strength, band),
            (_, answer) => {
                warn!("答案形式 {:?} 与挑战类型 {} 不匹配", answer, test_type);
                return Err(PageError::BadState(format!(
                    "答案 {:?} 不适用于 {}",
                    answer, test_type
                )));
            }
        };

        debug!("点击答案: {:?}", answer);
        self.executor.run_action(js_code, "点击答案").await
    }

    async fn notify(&self, message: &str) -> Result<(), PageError> {
        // alert 会阻塞脚本执行，延迟到本次 evaluate 返回之后再弹出
        let js_code = format!(
            "(() => {{ const msg = {}; setTimeout(() => alert(msg), 0); return true; }})()",
            serde_json::to_string(message)?
        );
        self.executor.run_action(js_code, "显示提示").await
    }
}
