//! 验证竞速
//!
//! 同一子问题的所有验证请求同时发出，第一个返回正确的候选胜出，
//! 其余请求随任务组一起被丢弃（即取消）。

use std::future::Future;
use std::time::Duration;

use futures::stream::{FuturesUnordered, StreamExt};
use tracing::debug;

use crate::error::{NetworkError, ResolveError};

/// 并发执行 `probes`，返回第一个被确认正确的候选序号
///
/// - 任一请求失败：立即以网络错误结束
/// - 全部请求返回错误答案：`NoMatchFound`
/// - 超过 `wait` 仍无结果：`NoMatchFound`
pub async fn first_positive<F>(
    sub_question: &'static str,
    probes: Vec<F>,
    wait: Duration,
) -> Result<usize, ResolveError>
where
    F: Future<Output = Result<bool, NetworkError>>,
{
    let total = probes.len();
    let mut group: FuturesUnordered<_> = probes
        .into_iter()
        .enumerate()
        .map(|(index, probe)| async move { (index, probe.await) })
        .collect();

    let race = async {
        while let Some((index, outcome)) = group.next().await {
            match outcome {
                Ok(true) => return Ok(index),
                Ok(false) => debug!("[{}] 候选 {} 被否定", sub_question, index),
                Err(e) => return Err(ResolveError::Network(e)),
            }
        }
        Err(ResolveError::NoMatchFound { sub_question })
    };

    let result = match tokio::time::timeout(wait, race).await {
        Ok(result) => result,
        Err(_) => Err(ResolveError::NoMatchFound { sub_question }),
    };

    if let Ok(index) = result {
        debug!(
            "[{}] 候选 {}/{} 被确认，取消剩余 {} 个请求",
            sub_question,
            index,
            total,
            group.len()
        );
    }
    result
}
