//! 页面状态快照
//!
//! 每次推断开始前读取一次页面，之后的所有查找都基于这份快照进行。

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;

use crate::error::PageError;
use crate::models::TestType;

/// 页面上的两个选项区域
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceBox {
    /// `#divMainTitle` 中可见的选项
    Upper,
    /// `#divMainInfo` 中可见的选项
    Lower,
}

/// 页面上渲染的一个音频元素
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RenderedAudio {
    /// 音乐的加密ID（`audio` 的 id 属性）
    #[serde(default)]
    pub id: String,
    /// 音频源路径
    #[serde(default)]
    pub src: String,
}

/// 推断所需的页面状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageState {
    pub origin: String,
    pub test_id: String,
    pub test_type: TestType,
    /// 当前题号（从0起）
    pub question_index: usize,
    pub question_count: usize,
    /// 当前正在播放的音乐的加密ID
    pub current_music_id: String,
    pub audios: Vec<RenderedAudio>,
    pub upper_tags: Vec<String>,
    pub lower_tags: Vec<String>,
}

impl PageState {
    pub fn tags(&self, choice_box: ChoiceBox) -> &[String] {
        match choice_box {
            ChoiceBox::Upper => &self.upper_tags,
            ChoiceBox::Lower => &self.lower_tags,
        }
    }
}

/// 页面脚本返回的原始数据
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPageState {
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub search: String,
    pub current_label: Option<String>,
    #[serde(default)]
    pub count: usize,
    pub music_id: Option<String>,
    #[serde(default)]
    pub audios: Vec<RenderedAudio>,
    #[serde(default)]
    pub upper: Vec<Option<String>>,
    #[serde(default)]
    pub lower: Vec<Option<String>>,
}

impl TryFrom<RawPageState> for PageState {
    type Error = PageError;

    fn try_from(raw: RawPageState) -> Result<Self, Self::Error> {
        let params = parse_query_params(&raw.search);
        let test_id = params
            .get("id")
            .filter(|v| !v.is_empty())
            .ok_or_else(|| PageError::BadState("URL 中缺少挑战ID (id)".to_string()))?
            .to_string();
        let test_type: TestType = params
            .get("type")
            .ok_or_else(|| PageError::BadState("URL 中缺少挑战类型 (type)".to_string()))?
            .parse()?;

        let label = raw
            .current_label
            .ok_or_else(|| PageError::BadState("未找到当前题号".to_string()))?;
        let question_index = parse_question_number(&label)?;

        Ok(Self {
            origin: raw.origin,
            test_id,
            test_type,
            question_index,
            question_count: raw.count,
            current_music_id: raw.music_id.unwrap_or_default(),
            audios: raw.audios,
            upper_tags: raw.upper.into_iter().map(Option::unwrap_or_default).collect(),
            lower_tags: raw.lower.into_iter().map(Option::unwrap_or_default).collect(),
        })
    }
}

/// 解析 URL 查询字符串（可带前导 `?`）
pub fn parse_query_params(search: &str) -> HashMap<String, String> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter(|kv| !kv.is_empty())
        .map(|kv| match kv.split_once('=') {
            Some((k, v)) => (k.to_string(), v.to_string()),
            None => (kv.to_string(), String::new()),
        })
        .collect()
}

/// URL 查询字符串是否带有可识别的挑战ID与挑战类型
pub fn has_quiz_params(search: &str) -> bool {
    let params = parse_query_params(search);
    let has_id = params.get("id").is_some_and(|v| !v.is_empty());
    let has_type = params
        .get("type")
        .is_some_and(|v| v.parse::<TestType>().is_ok());
    has_id && has_type
}

/// 将题号按钮上的文字（从1起）转换为从0起的题号
pub fn parse_question_number(label: &str) -> Result<usize, PageError> {
    static DIGITS: OnceLock<Regex> = OnceLock::new();
    let re = DIGITS.get_or_init(|| Regex::new(r"\d+").expect("valid regex"));

    re.find(label)
        .and_then(|m| m.as_str().parse::<usize>().ok())
        .and_then(|n| n.checked_sub(1))
        .ok_or_else(|| PageError::BadState(format!("无法解析题号: {:?}", label)))
}
