//! 后台重算
//!
//! 界面线程需要保持响应时，用单槽"最新参数"通道把重算挪到独立任务：
//! - 输入端只保留最后一次提交的参数，中间的提交可能被跳过，但不会乱序
//! - 输出端同样只保留最新结果，并带上对应的提交序号
//!
//! 最后提交的参数集总是最终被计算、显示和导出的那一个。

use crate::engine::{compute, Computation};
use crate::error::CoreError;
use crate::params::PrimaryParameters;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy)]
struct Submission {
    generation: u64,
    params: PrimaryParameters,
}

/// 一次重算的结果
#[derive(Debug, Clone)]
pub struct RecomputeOutcome {
    /// 对应的提交序号（从 1 开始递增）
    pub generation: u64,
    pub result: Result<Computation, CoreError>,
}

type OutcomeSlot = Option<Arc<RecomputeOutcome>>;

/// 最新参数优先的重算任务
pub struct Recomputer {
    input: watch::Sender<Option<Submission>>,
    output: watch::Receiver<OutcomeSlot>,
    worker: JoinHandle<()>,
}

impl Recomputer {
    /// 启动重算任务（需在 tokio 运行时内调用）
    pub fn spawn() -> Self {
        let (input, input_rx) = watch::channel(None);
        let (output_tx, output) = watch::channel(None);

        let worker = tokio::spawn(run(input_rx, output_tx));

        Self {
            input,
            output,
            worker,
        }
    }

    /// 提交新参数，覆盖尚未处理的旧参数；返回提交序号
    ///
    /// 序号在通道写锁内分配，多个提交方并发时槽中始终是序号最大的一次提交。
    pub fn submit(&self, params: PrimaryParameters) -> u64 {
        let mut generation = 0;
        self.input.send_modify(|slot| {
            generation = slot.as_ref().map_or(0, |s| s.generation) + 1;
            *slot = Some(Submission { generation, params });
        });
        tracing::trace!(generation, "submitted parameters");
        generation
    }

    /// 订阅结果
    pub fn subscribe(&self) -> watch::Receiver<OutcomeSlot> {
        self.output.clone()
    }

    /// 当前最新结果
    pub fn latest(&self) -> OutcomeSlot {
        self.output.borrow().clone()
    }

    /// 等待序号不小于 `generation` 的结果；任务已退出时返回 `None`
    pub async fn wait_for(&self, generation: u64) -> OutcomeSlot {
        let mut rx = self.output.clone();
        let outcome = rx
            .wait_for(|slot| slot.as_ref().is_some_and(|o| o.generation >= generation))
            .await
            .ok()?;
        outcome.clone()
    }

    /// 停止任务并等待其退出
    pub async fn shutdown(self) {
        let Recomputer { input, worker, .. } = self;
        drop(input);
        if let Err(e) = worker.await {
            tracing::error!("recompute task panicked: {}", e);
        }
    }
}

async fn run(mut input: watch::Receiver<Option<Submission>>, output: watch::Sender<OutcomeSlot>) {
    while input.changed().await.is_ok() {
        let Some(submission) = *input.borrow_and_update() else {
            continue;
        };

        let outcome = RecomputeOutcome {
            generation: submission.generation,
            result: compute(&submission.params),
        };

        if output.send(Some(Arc::new(outcome))).is_err() {
            break;
        }
    }
    tracing::debug!("recompute task stopped");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_last_submission_wins() {
        let recomputer = Recomputer::spawn();

        let mut last = 0;
        for outer_radius in [39.0, 40.0, 41.0, 42.5] {
            last = recomputer.submit(PrimaryParameters {
                outer_radius,
                ..PrimaryParameters::default()
            });
        }

        let outcome = recomputer.wait_for(last).await.unwrap();
        assert_eq!(outcome.generation, last);
        let computation = outcome.result.as_ref().unwrap();
        assert_eq!(computation.params.outer_radius, 42.5);

        recomputer.shutdown().await;
    }

    #[tokio::test]
    async fn test_infeasible_is_published() {
        let recomputer = Recomputer::spawn();
        let generation = recomputer.submit(PrimaryParameters {
            outer_radius: 30.0,
            ..PrimaryParameters::default()
        });

        let outcome = recomputer.wait_for(generation).await.unwrap();
        assert!(matches!(outcome.result, Err(CoreError::Infeasible { .. })));
        assert_eq!(recomputer.latest().unwrap().generation, generation);

        recomputer.shutdown().await;
    }

    #[tokio::test]
    async fn test_concurrent_submitters_keep_latest() {
        let recomputer = Recomputer::spawn();
        let shared = &recomputer;

        let mut generations: Vec<u64> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    scope.spawn(move || {
                        (0..50)
                            .map(|_| shared.submit(PrimaryParameters::default()))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            handles
                .into_iter()
                .flat_map(|h| h.join().unwrap())
                .collect()
        });

        generations.sort_unstable();
        assert_eq!(generations, (1..=200).collect::<Vec<u64>>());

        let outcome = tokio::time::timeout(
            std::time::Duration::from_secs(10),
            recomputer.wait_for(200),
        )
        .await
        .unwrap()
        .unwrap();
        assert_eq!(outcome.generation, 200);

        recomputer.shutdown().await;
    }

    #[tokio::test]
    async fn test_generations_never_go_backwards() {
        let recomputer = Recomputer::spawn();
        let mut rx = recomputer.subscribe();

        let mut last = 0;
        for ratio in 5..15 {
            last = recomputer.submit(PrimaryParameters {
                ratio,
                outer_radius: 60.0,
                ..PrimaryParameters::default()
            });
        }

        let mut seen = 0;
        while seen < last {
            rx.changed().await.unwrap();
            let generation = rx.borrow_and_update().as_ref().map(|o| o.generation).unwrap();
            assert!(generation > seen);
            seen = generation;
        }

        recomputer.shutdown().await;
    }
}
