use serde::{Deserialize, Serialize};

/// 一个候选选项（音频）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// 验证时作为 `musicId` 提交
    #[serde(rename = "ExamineSubIdStr", default)]
    pub examine_sub_id: String,
    /// 加密的音乐ID，验证时作为 `encodeMusicId` 提交
    #[serde(rename = "EncodeMusicId", default)]
    pub encode_music_id: String,
    /// 音频文件路径
    #[serde(rename = "MusicPath", default)]
    pub music_path: String,
    /// 选项级别的考核ID（强弱类题目使用）
    #[serde(rename = "ExamineId", default, deserialize_with = "deserialize_text")]
    pub examine_id: String,
}

impl Choice {
    pub fn file_name(&self) -> &str {
        file_name_from_uri(&self.music_path)
    }

    pub fn field(&self, field: ChoiceField) -> &str {
        match field {
            ChoiceField::EncodeMusicId => &self.encode_music_id,
            ChoiceField::MusicPath => &self.music_path,
            ChoiceField::ExamineSubId => &self.examine_sub_id,
            ChoiceField::ExamineId => &self.examine_id,
        }
    }
}

/// 可用于查找选项的字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceField {
    EncodeMusicId,
    MusicPath,
    ExamineSubId,
    ExamineId,
}

/// 一道题目
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "examineId", deserialize_with = "deserialize_text")]
    pub examine_id: String,
    /// 验证时作为 `timespan` 提交的时间戳
    #[serde(deserialize_with = "deserialize_text")]
    pub timestamp: String,
    #[serde(rename = "gearsExamOptionsList", default)]
    pub choices: Vec<Choice>,
}

impl Question {
    pub fn find_exact(&self, field: ChoiceField, value: &str) -> Option<&Choice> {
        self.choices.iter().find(|c| c.field(field) == value)
    }

    pub fn find_by_substring(&self, field: ChoiceField, value: &str) -> Option<&Choice> {
        self.choices.iter().find(|c| c.field(field).contains(value))
    }

    /// 根据加密ID获取音频文件名
    pub fn file_name_for_encoded_id(&self, encode_music_id: &str) -> Option<&str> {
        self.find_exact(ChoiceField::EncodeMusicId, encode_music_id)
            .map(Choice::file_name)
    }
}

/// 一次挑战的全部题目，拉取后只读
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Test {
    pub questions: Vec<Question>,
}

impl Test {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// 按题目顺序返回第一个包含 `value` 的选项
    pub fn find_by_substring(&self, field: ChoiceField, value: &str) -> Option<&Choice> {
        self.questions
            .iter()
            .find_map(|q| q.find_by_substring(field, value))
    }
}

/// 提取 URI 中的文件名
pub fn file_name_from_uri(uri: &str) -> &str {
    match uri.rfind('/') {
        Some(pos) => &uri[pos + 1..],
        None => uri,
    }
}

// 接口中的 ID / 时间戳可能是字符串也可能是数字，统一转换为字符串
fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Visitor;
    use std::fmt;

    struct TextVisitor;

    impl<'de> Visitor<'de> for TextVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or number")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(String::new())
        }
    }

    deserializer.deserialize_any(TextVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_test() -> Test {
        serde_json::from_value(json!([
            {
                "examineId": 101,
                "timestamp": 1500000000123u64,
                "gearsExamOptionsList": [
                    {"ExamineSubIdStr": "s1", "EncodeMusicId": "encA", "MusicPath": "/upload/music/a.mp3", "ExamineId": 11},
                    {"ExamineSubIdStr": "s2", "EncodeMusicId": "encB", "MusicPath": "/upload/music/b.mp3", "ExamineId": 12}
                ]
            },
            {
                "examineId": "102",
                "timestamp": "1500000000456",
                "gearsExamOptionsList": [
                    {"ExamineSubIdStr": "s3", "EncodeMusicId": "encC", "MusicPath": "/upload/music/c.mp3", "ExamineId": "13"}
                ]
            }
        ]))
        .unwrap()
    }

    #[test]
    fn numeric_ids_and_timestamps_are_stringified() {
        let test = sample_test();
        assert_eq!(test.len(), 2);
        assert_eq!(test.questions[0].examine_id, "101");
        assert_eq!(test.questions[0].timestamp, "1500000000123");
        assert_eq!(test.questions[0].choices[1].examine_id, "12");
        assert_eq!(test.questions[1].timestamp, "1500000000456");
    }

    #[test]
    fn exact_lookup_does_not_match_substrings() {
        let test = sample_test();
        let q = &test.questions[0];
        assert!(q.find_exact(ChoiceField::MusicPath, "a.mp3").is_none());
        assert_eq!(
            q.find_exact(ChoiceField::EncodeMusicId, "encB").map(|c| c.examine_sub_id.as_str()),
            Some("s2")
        );
    }

    #[test]
    fn substring_lookup_searches_across_questions_in_order() {
        let test = sample_test();
        let choice = test.find_by_substring(ChoiceField::MusicPath, "c.mp3").unwrap();
        assert_eq!(choice.examine_id, "13");
        assert!(test.find_by_substring(ChoiceField::MusicPath, "d.mp3").is_none());
    }

    #[test]
    fn file_name_for_encoded_id_strips_directories() {
        let test = sample_test();
        let q = test.question(0).unwrap();
        assert_eq!(q.file_name_for_encoded_id("encA"), Some("a.mp3"));
        assert_eq!(q.file_name_for_encoded_id("missing"), None);
    }

    #[test]
    fn file_name_without_slash_is_unchanged() {
        assert_eq!(file_name_from_uri("plain.mp3"), "plain.mp3");
        assert_eq!(file_name_from_uri("http://x/y/z.wav"), "z.wav");
        assert_eq!(file_name_from_uri("dir/"), "");
    }
}
