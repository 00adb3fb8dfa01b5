//! UseCase: 退出 sweep 処理
//!
//! staleness timeout を超えて無活動の参加者を一括退出させます。
//! 退出と退出通知の合成はストアが一括で適用するため、リクエスト
//! 処理と並行しても半退出状態は観測されません。失敗は呼び出し側
//! （スケジューラ）に伝播し、次の tick が現在のタイムスタンプから
//! 再評価して自然に追いつきます。

use std::sync::Arc;
use std::time::Duration;

use crate::{
    common::time::get_timestamp_millis,
    domain::{ParticipantName, RepositoryError, RoomRepository, Timestamp},
};

/// 退出 sweep のユースケース
pub struct SweepIdleParticipantsUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
    /// この時間を超えて無活動の参加者が退出対象になる
    idle_timeout: Duration,
}

impl SweepIdleParticipantsUseCase {
    /// 新しい SweepIdleParticipantsUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>, idle_timeout: Duration) -> Self {
        Self {
            repository,
            idle_timeout,
        }
    }

    /// 現在時刻を基準に sweep を実行
    pub async fn execute(&self) -> Result<Vec<ParticipantName>, RepositoryError> {
        self.execute_at(Timestamp::new(get_timestamp_millis())).await
    }

    /// 指定時刻を基準に sweep を実行（テストからの決定的な入口）
    ///
    /// `last_seen <= now - idle_timeout` の参加者を全員退出させ、
    /// 退出した名前を返します。冪等：新たに stale になった参加者が
    /// いなければ何も起きません。
    pub async fn execute_at(&self, now: Timestamp) -> Result<Vec<ParticipantName>, RepositoryError> {
        let cutoff = now.minus_millis(self.idle_timeout.as_millis() as i64);
        let evicted = self.repository.sweep_idle(cutoff).await?;
        if !evicted.is_empty() {
            tracing::info!(
                "evicted {} idle participant(s): {:?}",
                evicted.len(),
                evicted.iter().map(|n| n.as_str()).collect::<Vec<_>>()
            );
        }
        Ok(evicted)
    }
}
