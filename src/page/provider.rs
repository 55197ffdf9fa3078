use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::error::PageError;
use crate::infrastructure::JsExecutor;
use crate::page::state::{has_quiz_params, PageState, RawPageState};
use crate::page::OPTIONS_JS;

/// 页面状态提供者
#[async_trait]
pub trait PageStateProvider: Send + Sync {
    /// 当前页面是否已进入挑战（URL 带有挑战ID与类型）
    async fn is_quiz_open(&self) -> Result<bool, PageError>;

    /// 读取一份当前页面状态快照
    async fn snapshot(&self) -> Result<PageState, PageError>;

    /// 第 `index` 题（从0起）的题号按钮是否已标记完成
    async fn is_question_finished(&self, index: usize) -> Result<bool, PageError>;
}

/// 通过浏览器脚本读取页面状态
pub struct DomPageProvider {
    executor: Arc<JsExecutor>,
}

impl DomPageProvider {
    pub fn new(executor: Arc<JsExecutor>) -> Self {
        Self { executor }
    }
}

#[async_trait]
impl PageStateProvider for DomPageProvider {
    async fn is_quiz_open(&self) -> Result<bool, PageError> {
        let search: String = self.executor.eval_as("location.search").await?;
        Ok(has_quiz_params(&search))
    }

    async fn snapshot(&self) -> Result<PageState, PageError> {
        let js_code = format!(
            r#"
            (() => {{
                {OPTIONS_JS}
                const tagsOf = (sel) => visibleOptions(sel).map(li => li.getAttribute('data-tag'));
                const list = document.querySelector('#divList');
                const current = list ? list.querySelector(':scope > a.on') : null;
                const title = document.querySelector('#divMainTitle');
                const audios = Array.from(document.querySelectorAll('#divAudio > audio')).map(a => {{
                    const source = a.querySelector(':scope > source');
                    return {{ id: a.getAttribute('id') || '', src: source ? (source.getAttribute('src') || '') : '' }};
                }});
                return {{
                    origin: location.origin,
                    search: location.search,
                    currentLabel: current ? current.textContent : null,
                    count: list ? list.children.length : 0,
                    musicId: title ? title.getAttribute('data-musicid') : null,
                    audios: audios,
                    upper: tagsOf('#divMainTitle'),
                    lower: tagsOf('#divMainInfo'),
                }};
            }})()
            "#
        );

        let raw: RawPageState = self.executor.eval_as(js_code).await?;
        debug!(
            "页面快照: 当前题 {:?} / {}，音频 {} 个，上方选项 {} 个，下方选项 {} 个",
            raw.current_label,
            raw.count,
            raw.audios.len(),
            raw.upper.len(),
            raw.lower.len()
        );
        PageState::try_from(raw)
    }

    async fn is_question_finished(&self, index: usize) -> Result<bool, PageError> {
        let js_code = format!(
            r#"
            (() => {{
                const buttons = document.querySelectorAll('#divList > a');
                const button = buttons[{index}];
                return !!button && button.classList.contains('finish');
            }})()
            "#
        );
        self.executor.eval_as(js_code).await
    }
}
