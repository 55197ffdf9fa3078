//! JS 执行器 - 基础设施层
//!
//! 持有唯一的 page 资源，只暴露"执行 JS"的能力

use chromiumoxide::Page;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use tracing::trace;

use crate::error::PageError;

/// JS 执行器
///
/// 职责：
/// - 持有唯一的 Page 资源
/// - 暴露 eval() 能力
/// - 不认识 Test / Question
/// - 不参与答案推断
pub struct JsExecutor {
    page: Page,
}

impl JsExecutor {
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    /// 执行 JS 代码并返回 JSON 结果
    pub async fn eval(&self, js_code: impl Into<String>) -> Result<JsonValue, PageError> {
        let js_code = js_code.into();
        trace!("执行脚本: {}", js_code);
        let result = self.page.evaluate(js_code).await?;
        Ok(result.into_value()?)
    }

    /// 执行 JS 代码并反序列化为指定类型
    pub async fn eval_as<T: DeserializeOwned>(&self, js_code: impl Into<String>) -> Result<T, PageError> {
        let json_value = self.eval(js_code).await?;
        Ok(serde_json::from_value(json_value)?)
    }

    /// 执行返回布尔值的操作脚本，返回 `false` 视为页面状态异常
    pub async fn run_action(&self, js_code: impl Into<String>, what: &str) -> Result<(), PageError> {
        if self.eval_as::<bool>(js_code).await? {
            Ok(())
        } else {
            Err(PageError::BadState(format!("页面操作失败: {}", what)))
        }
    }

    /// 以 `name=value; ...` 形式返回当前页面的 Cookie
    pub async fn cookie_header(&self) -> Result<String, PageError> {
        let cookies = self.page.get_cookies().await?;
        Ok(cookies
            .iter()
            .map(|c| format!("{}={}", c.name, c.value))
            .collect::<Vec<_>>()
            .join("; "))
    }
}
