use std::fmt;
use std::str::FromStr;

use crate::error::PageError;

/// 强弱判断类挑战的两种形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrengthKind {
    /// 听参考音和比较音，判断比较音是否更响亮（类型 2）
    Reference,
    /// 判断响度变化（类型 5）
    Change,
}

/// 挑战类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestType {
    /// 听三个音频，选出其中一个正确答案（类型 1）
    SingleChoice,
    /// 判断是否更强（类型 2 / 5）
    BinaryStrength(StrengthKind),
    /// 听两个音频，判断强弱并选出影响的频带范围（类型 3）
    BandWithPair,
    /// 听一个音频，判断强弱并选出影响的频带范围（类型 4）
    BandWithSingle,
}

impl TestType {
    /// 接口使用的类型标识
    pub fn tag(self) -> &'static str {
        match self {
            TestType::SingleChoice => "1",
            TestType::BinaryStrength(StrengthKind::Reference) => "2",
            TestType::BandWithPair => "3",
            TestType::BandWithSingle => "4",
            TestType::BinaryStrength(StrengthKind::Change) => "5",
        }
    }

    /// 是否需要同时给出强弱和频带两个答案
    pub fn has_band(self) -> bool {
        matches!(self, TestType::BandWithPair | TestType::BandWithSingle)
    }
}

impl FromStr for TestType {
    type Err = PageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(TestType::SingleChoice),
            "2" => Ok(TestType::BinaryStrength(StrengthKind::Reference)),
            "3" => Ok(TestType::BandWithPair),
            "4" => Ok(TestType::BandWithSingle),
            "5" => Ok(TestType::BinaryStrength(StrengthKind::Change)),
            other => Err(PageError::UnknownTestType(other.to_string())),
        }
    }
}

impl fmt::Display for TestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TestType::SingleChoice => "三选一",
            TestType::BinaryStrength(StrengthKind::Reference) => "参考音强弱",
            TestType::BinaryStrength(StrengthKind::Change) => "响度变化",
            TestType::BandWithPair => "双音频强弱+频带",
            TestType::BandWithSingle => "单音频强弱+频带",
        };
        write!(f, "{}(类型 {})", name, self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_tag_parses_back_to_itself() {
        for tag in ["1", "2", "3", "4", "5"] {
            let ty: TestType = tag.parse().unwrap();
            assert_eq!(ty.tag(), tag);
        }
    }

    #[test]
    fn band_types_are_three_and_four() {
        assert!("3".parse::<TestType>().unwrap().has_band());
        assert!("4".parse::<TestType>().unwrap().has_band());
        assert!(!"2".parse::<TestType>().unwrap().has_band());
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let err = "6".parse::<TestType>().unwrap_err();
        assert!(matches!(err, PageError::UnknownTestType(ref t) if t == "6"));
    }
}
