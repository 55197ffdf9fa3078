//! 答案推断引擎
//!
//! - `race`：同一子问题的验证请求竞速，第一个正确结果胜出
//! - `resolver`：按挑战类型分派推断策略

pub mod race;
pub mod resolver;

pub use race::first_positive;
pub use resolver::{Answer, AnswerEngine, Strategy};
