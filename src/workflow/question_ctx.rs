//! 题目处理上下文
//!
//! 封装"我正在处理哪次挑战的第几题"这一信息

use std::fmt::Display;

use crate::models::TestType;
use crate::page::PageState;

/// 题目处理上下文
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionCtx {
    /// 挑战ID
    pub test_id: String,

    /// 挑战类型
    pub test_type: TestType,

    /// 当前题号（从0起）
    pub question_index: usize,

    /// 题目总数
    pub question_count: usize,
}

impl QuestionCtx {
    pub fn from_state(state: &PageState) -> Self {
        Self {
            test_id: state.test_id.clone(),
            test_type: state.test_type,
            question_index: state.question_index,
            question_count: state.question_count,
        }
    }

    pub fn is_last(&self) -> bool {
        self.question_index + 1 >= self.question_count
    }
}

impl Display for QuestionCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[挑战 ID#{} 题目#{}/{} {}]",
            self.test_id,
            self.question_index + 1,
            self.question_count,
            self.test_type
        )
    }
}
