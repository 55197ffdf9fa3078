//! 日志工具模块
//!
//! 提供日志初始化和横幅输出的辅助函数

use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// 优先使用 `RUST_LOG`，否则按 `verbose` 选择 `debug` 或 `info` 级别。
/// 重复初始化时静默忽略。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), default_level))
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
///
/// # 参数
/// - `port`: 浏览器调试端口
/// - `request_timeout_secs`: 单次请求超时
pub fn log_startup(port: u16, request_timeout_secs: u64) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 金耳朵自动作答");
    info!("🌐 浏览器调试端口: {}", port);
    info!("⏱️ 请求超时: {} 秒", request_timeout_secs);
    info!("{}", "=".repeat(60));
}

/// 记录挑战开始信息
pub fn log_quiz_start(test_id: &str, test_type: &str, question_count: usize, fetched: usize) {
    info!("\n{}", "=".repeat(60));
    info!("📦 挑战 {} - {}", test_id, test_type);
    info!("📄 页面题目数: {}，拉取题目数: {}", question_count, fetched);
    info!("{}", "=".repeat(60));
}

/// 记录单题开始信息
pub fn log_question_start(question_index: usize, total: usize) {
    info!("\n{}", "─".repeat(30));
    info!("处理第 {}/{} 道题目", question_index + 1, total);
}

/// 记录单题作答结果
pub fn log_answer(ctx: &str, answer: &str) {
    info!("{} ✓ 已作答: {}", ctx, answer);
}

/// 打印最终统计信息
///
/// # 参数
/// - `answered`: 已作答数量
/// - `total`: 题目总数
pub fn print_final_stats(answered: usize, total: usize) {
    info!("\n{}", "=".repeat(60));
    info!("📊 挑战完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 已作答: {}/{}", answered, total);
    info!("{}", "=".repeat(60));
}
