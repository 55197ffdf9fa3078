//! 页面协作者
//!
//! - `PageStateProvider`：判断是否已进入挑战，读取挑战ID、类型、题号以及选项标识
//! - `UiActuator`：点击答案、显示提示
//!
//! 推断引擎只接收 `PageState` 快照，从不直接读取或修改页面。

pub mod actuator;
pub mod provider;
pub mod state;

pub use actuator::{DomActuator, UiActuator};
pub use provider::{DomPageProvider, PageStateProvider};
pub use state::{ChoiceBox, PageState, RenderedAudio};

/// 页面脚本共用的选项查找函数：返回区域内第一个可见 `ul[data-type]` 的 `li`
pub(crate) const OPTIONS_JS: &str = r#"
const visibleOptions = (sel) => {
    const root = document.querySelector(sel);
    if (!root) return [];
    for (const ul of root.querySelectorAll(':scope > ul[data-type]')) {
        if (getComputedStyle(ul).display !== 'none') {
            return Array.from(ul.children).filter(el => el.tagName === 'LI');
        }
    }
    return [];
};
const clickOption = (sel, index) => {
    const li = visibleOptions(sel)[index];
    const link = li ? li.querySelector(':scope > a') : null;
    if (!link) return false;
    link.click();
    return true;
};
"#;
