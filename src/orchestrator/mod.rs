//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `app` - 应用入口
//! - 连接浏览器，组装页面协作者与验证服务客户端
//! - 持有 Browser 资源
//!
//! ### `autopilot` - 挑战处理器
//! - 等待页面进入挑战
//! - 每次挑战拉取一次题目
//! - 逐题委托 `QuestionFlow`，轮询完成状态
//! - 网络失败时显示统一提示
//!
//! ## 层次关系
//!
//! ```text
//! app (持有 Browser)
//!     ↓
//! autopilot (处理整个挑战)
//!     ↓
//! workflow::QuestionFlow (处理单个题目)
//!     ↓
//! engine (推断) + page (读取 / 点击)
//!     ↓
//! clients (验证服务) + infrastructure (JsExecutor)
//! ```

pub mod app;
pub mod autopilot;

pub use app::App;
pub use autopilot::{wait_for_quiz, Autopilot, QuizStats, NETWORK_FAILURE_NOTICE};
