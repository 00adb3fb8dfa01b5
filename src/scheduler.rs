//! Periodic eviction scheduler.
//!
//! One background task drives the idle sweep through the same guarded
//! repository interface the request handlers use; there is no bypass of
//! the locking discipline. A single task awaits each sweep before the
//! next tick can fire, so a sweep never overlaps itself; late ticks are
//! absorbed (`MissedTickBehavior::Delay`), never run twice.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::domain::RoomRepository;
use crate::usecase::SweepIdleParticipantsUseCase;

/// Timing knobs of the eviction scheduler.
///
/// The sweep interval and the staleness timeout are independent
/// constants; defaults match the original deployment (15 s / 10 s).
#[derive(Debug, Clone, Copy)]
pub struct SweepConfig {
    /// How often the sweep runs
    pub interval: Duration,
    /// Inactivity span after which a participant is evicted
    pub idle_timeout: Duration,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(15),
            idle_timeout: Duration::from_secs(10),
        }
    }
}

/// Handle to a running scheduler; dropping it does NOT stop the task,
/// call [`EvictionSchedulerHandle::shutdown`].
pub struct EvictionSchedulerHandle {
    shutdown_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl EvictionSchedulerHandle {
    /// Signal the scheduler to stop and wait for the task to finish.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(true);
        let _ = self.handle.await;
    }
}

/// Spawner for the background sweep task.
pub struct EvictionScheduler;

impl EvictionScheduler {
    /// Start the periodic sweep. Started once at process start; stopped
    /// at shutdown through the returned handle.
    pub fn spawn(
        repository: Arc<dyn RoomRepository>,
        config: SweepConfig,
    ) -> EvictionSchedulerHandle {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let usecase = SweepIdleParticipantsUseCase::new(repository, config.idle_timeout);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(config.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately; skip it so the first
            // sweep happens one full interval after startup.
            ticker.tick().await;

            tracing::info!(
                "eviction scheduler started (interval {:?}, idle timeout {:?})",
                config.interval,
                config.idle_timeout
            );

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if let Err(e) = usecase.execute().await {
                            // Not swallowed: logged here, and the next tick
                            // re-evaluates staleness from current timestamps.
                            tracing::error!("idle sweep failed: {}", e);
                        }
                    }
                    _ = shutdown_rx.changed() => {
                        tracing::info!("eviction scheduler stopping");
                        break;
                    }
                }
            }
        });

        EvictionSchedulerHandle {
            shutdown_tx,
            handle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{ParticipantName, Timestamp},
        infrastructure::repository::InMemoryRoomRepository,
    };

    fn name(s: &str) -> ParticipantName {
        ParticipantName::new(s.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_scheduler_evicts_stale_participant_eventually() {
        // テスト項目: スケジューラが tick ごとに sweep を実行し stale な参加者を退出させる
        // given (前提条件): 遠い過去の last_seen を持つ alice
        let repository = Arc::new(InMemoryRoomRepository::new());
        repository
            .add_participant(name("alice"), Timestamp::new(0))
            .await
            .unwrap();
        let config = SweepConfig {
            interval: Duration::from_millis(20),
            idle_timeout: Duration::from_millis(10),
        };

        // when (操作): スケジューラを起動して数 tick 待つ
        let scheduler = EvictionScheduler::spawn(repository.clone(), config);
        tokio::time::sleep(Duration::from_millis(200)).await;
        scheduler.shutdown().await;

        // then (期待する結果):
        assert!(repository.list_participants().await.unwrap().is_empty());
        let messages = repository.list_messages().await.unwrap();
        // 冪等なので退出メッセージは一件だけ
        assert_eq!(messages.len(), 1);
    }

    #[tokio::test]
    async fn test_scheduler_shutdown_stops_task() {
        // テスト項目: shutdown でタスクが停止する
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::new());
        let scheduler = EvictionScheduler::spawn(repository, SweepConfig::default());

        // when (操作) / then (期待する結果): ハングせずに完了する
        scheduler.shutdown().await;
    }
}
