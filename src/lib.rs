//! # Golden Ears Solver
//!
//! 金耳朵听力挑战的自动作答工具：通过远程验证接口逐个确认候选答案，再在浏览器页面中点击。
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `browser/` - 连接调试端口已开启的浏览器
//! - `infrastructure/` - `JsExecutor`，唯一的 page owner，提供 eval() 能力
//!
//! ### ② 模型与客户端
//! - `models/` - 挑战、题目、选项、挑战类型
//! - `clients/` - `Oracle` 验证服务抽象与 reqwest 实现
//!
//! ### ③ 业务能力层
//! - `page/` - 页面状态快照、页面读取与页面操作
//! - `services/` - `ChoiceTagMapper`，在文件名 / 加密ID / 选项序号之间转换
//! - `engine/` - 答案推断引擎（验证竞速 + 按类型分派策略）
//!
//! ### ④ 流程层与编排层
//! - `workflow/` - 单题流程（快照 → 推断 → 点击）
//! - `orchestrator/` - 整个挑战的作答循环与应用入口

pub mod browser;
pub mod clients;
pub mod config;
pub mod engine;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod page;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use browser::connect_to_browser_and_page;
pub use clients::{HttpOracle, Modifiers, Oracle, Probe};
pub use config::Config;
pub use engine::{Answer, AnswerEngine};
pub use error::{AppError, AppResult};
pub use infrastructure::JsExecutor;
pub use models::{Choice, ChoiceField, Question, Test, TestType};
pub use orchestrator::{App, Autopilot, QuizStats};
pub use page::{ChoiceBox, PageState, PageStateProvider, UiActuator};
pub use workflow::{ProcessResult, QuestionCtx, QuestionFlow};
