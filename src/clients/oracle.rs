//! 验证服务抽象
//!
//! 引擎只依赖 `Oracle` trait，具体传输由 `HttpOracle` 或测试中的脚本实现提供。

use async_trait::async_trait;
use serde::Serialize;

use crate::error::NetworkError;
use crate::models::{Choice, Test, TestType};

/// 验证接口固定的 action 名
pub const CHECK_ACTION: &str = "checkexamoptionsright";

/// 附加在验证请求上的可选参数
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// 是否增强（强弱类题目）
    pub is_increase: Option<String>,
    /// 受影响的值（频带类题目）
    pub affect_value: Option<String>,
    /// 是否结束（多步流程的最后一次提交）
    pub is_finish: Option<String>,
}

impl Modifiers {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn increase(tag: impl Into<String>) -> Self {
        Self {
            is_increase: Some(tag.into()),
            ..Self::default()
        }
    }

    pub fn affect(tag: impl Into<String>) -> Self {
        Self {
            affect_value: Some(tag.into()),
            ..Self::default()
        }
    }
}

/// 一次验证请求所需的全部信息
#[derive(Debug, Clone)]
pub struct Probe<'a> {
    pub test_id: &'a str,
    pub test_type: TestType,
    /// 题目或选项的考核ID，取决于推断策略
    pub examine_id: &'a str,
    /// 所属题目的时间戳
    pub timestamp: &'a str,
    pub choice: &'a Choice,
    pub modifiers: Modifiers,
}

impl Probe<'_> {
    /// 转换为接口要求的表单，缺省参数以空字符串提交
    pub fn to_form(&self) -> VerifyForm<'_> {
        VerifyForm {
            test_item_id: self.test_id,
            test_type: self.test_type.tag(),
            timespan: self.timestamp,
            music_id: &self.choice.examine_sub_id,
            is_increase: self.modifiers.is_increase.as_deref().unwrap_or(""),
            is_finish: self.modifiers.is_finish.as_deref().unwrap_or(""),
            examine_id: self.examine_id,
            encode_music_id: &self.choice.encode_music_id,
            affect_value: self.modifiers.affect_value.as_deref().unwrap_or(""),
            action: CHECK_ACTION,
        }
    }
}

/// 验证请求表单
#[derive(Debug, Serialize)]
pub struct VerifyForm<'a> {
    #[serde(rename = "testItemId")]
    pub test_item_id: &'a str,
    #[serde(rename = "type")]
    pub test_type: &'a str,
    pub timespan: &'a str,
    #[serde(rename = "musicId")]
    pub music_id: &'a str,
    #[serde(rename = "isIncrease")]
    pub is_increase: &'a str,
    #[serde(rename = "isFinish")]
    pub is_finish: &'a str,
    #[serde(rename = "examineId")]
    pub examine_id: &'a str,
    #[serde(rename = "encodeMusicId")]
    pub encode_music_id: &'a str,
    #[serde(rename = "affectValue")]
    pub affect_value: &'a str,
    pub action: &'a str,
}

/// 拉取题目的请求表单
#[derive(Debug, Serialize)]
pub struct FetchForm<'a> {
    #[serde(rename = "testItemId")]
    pub test_item_id: &'a str,
    pub action: &'a str,
}

/// 远程验证服务
#[async_trait]
pub trait Oracle: Send + Sync {
    /// 拉取本次挑战的全部题目
    async fn fetch_test(&self, test_id: &str) -> Result<Test, NetworkError>;

    /// 验证某个候选在给定参数下是否正确
    async fn verify(&self, probe: &Probe<'_>) -> Result<bool, NetworkError>;
}

/// 接口以字面量 "1" 表示正确
pub fn is_affirmative(body: &str) -> bool {
    body.trim() == "1"
}
