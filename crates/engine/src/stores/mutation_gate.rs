//! Per-game mutation exclusion.
//!
//! At most one gate mutation per game is in flight at a time; games never
//! wait on each other. Waiters for the same game are admitted in arrival
//! order (tokio's mutex is FIFO). A waiter whose cancellation token fires
//! leaves the queue without taking a turn.
//!
//! Slots are created lazily and dropped again once nobody holds or waits on
//! them, so idle games do not pin memory.

use std::sync::Arc;

use dashmap::DashMap;
use gategraph_domain::GameId;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tokio_util::sync::CancellationToken;

type Slots = DashMap<GameId, Arc<Mutex<()>>>;

/// Keyed exclusion table, one FIFO lock per game.
#[derive(Default)]
pub struct MutationGate {
    slots: Arc<Slots>,
}

/// Exclusive right to mutate one game's graph. Released on drop.
pub struct MutationPermit {
    game_id: GameId,
    guard: Option<OwnedMutexGuard<()>>,
    slots: Arc<Slots>,
}

impl MutationGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `game_id`.
    ///
    /// Returns `None` if `cancel` fires first, including when it was already
    /// cancelled on entry.
    pub async fn acquire(
        &self,
        game_id: GameId,
        cancel: &CancellationToken,
    ) -> Option<MutationPermit> {
        let slot = self.slot(game_id);

        let acquired = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            guard = slot.lock_owned() => Some(guard),
        };

        match acquired {
            Some(guard) => Some(MutationPermit {
                game_id,
                guard: Some(guard),
                slots: Arc::clone(&self.slots),
            }),
            None => {
                prune(&self.slots, game_id);
                tracing::debug!(game_id = %game_id, "Mutation admission cancelled");
                None
            }
        }
    }

    /// Number of games with a live slot (held or waited on).
    pub fn tracked_games(&self) -> usize {
        self.slots.len()
    }

    fn slot(&self, game_id: GameId) -> Arc<Mutex<()>> {
        // Clone under the shard lock so pruning never sees a stale count.
        let entry = self
            .slots
            .entry(game_id)
            .or_insert_with(|| Arc::new(Mutex::new(())));
        Arc::clone(entry.value())
    }
}

impl MutationPermit {
    pub fn game_id(&self) -> GameId {
        self.game_id
    }
}

impl Drop for MutationPermit {
    fn drop(&mut self) {
        // Unlock first so the count only reflects waiters.
        self.guard.take();
        prune(&self.slots, self.game_id);
    }
}

/// Remove the slot if the table holds the only reference.
fn prune(slots: &Slots, game_id: GameId) {
    slots.remove_if(&game_id, |_, slot| Arc::strong_count(slot) == 1);
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex as StdMutex;
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn test_permit_is_exclusive_per_game() {
        let gate = Arc::new(MutationGate::new());
        let game_id = GameId::new();
        let cancel = CancellationToken::new();

        let held = gate.acquire(game_id, &cancel).await.unwrap();
        assert_eq!(held.game_id(), game_id);

        let contender = {
            let gate = Arc::clone(&gate);
            let cancel = cancel.clone();
            tokio::spawn(async move { gate.acquire(game_id, &cancel).await.is_some() })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!contender.is_finished());

        drop(held);
        assert!(contender.await.unwrap());
    }

    #[tokio::test]
    async fn test_games_do_not_block_each_other() {
        let gate = MutationGate::new();
        let cancel = CancellationToken::new();

        let _first = gate.acquire(GameId::new(), &cancel).await.unwrap();
        let second = tokio::time::timeout(
            Duration::from_millis(100),
            gate.acquire(GameId::new(), &cancel),
        )
        .await;

        assert!(matches!(second, Ok(Some(_))));
        assert_eq!(gate.tracked_games(), 2);
    }

    #[tokio::test]
    async fn test_waiters_admitted_in_arrival_order() {
        let gate = Arc::new(MutationGate::new());
        let game_id = GameId::new();
        let cancel = CancellationToken::new();
        let order = Arc::new(StdMutex::new(Vec::new()));

        let held = gate.acquire(game_id, &cancel).await.unwrap();

        let mut waiters = Vec::new();
        for n in 0..4 {
            let gate = Arc::clone(&gate);
            let cancel = cancel.clone();
            let order = Arc::clone(&order);
            waiters.push(tokio::spawn(async move {
                let _permit = gate.acquire(game_id, &cancel).await.unwrap();
                order.lock().unwrap().push(n);
            }));
            // Let this waiter enqueue before spawning the next.
            tokio::time::sleep(Duration::from_millis(5)).await;
        }

        drop(held);
        for waiter in waiters {
            waiter.await.unwrap();
        }
        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2, 3]);
    }

    #[tokio::test]
    async fn test_cancelled_waiter_gives_up_its_turn() {
        let gate = Arc::new(MutationGate::new());
        let game_id = GameId::new();
        let shared = CancellationToken::new();
        let doomed = CancellationToken::new();

        let held = gate.acquire(game_id, &shared).await.unwrap();

        let cancelled = {
            let gate = Arc::clone(&gate);
            let doomed = doomed.clone();
            tokio::spawn(async move { gate.acquire(game_id, &doomed).await.is_some() })
        };
        tokio::time::sleep(Duration::from_millis(5)).await;
        let patient = {
            let gate = Arc::clone(&gate);
            let shared = shared.clone();
            tokio::spawn(async move { gate.acquire(game_id, &shared).await.is_some() })
        };
        tokio::time::sleep(Duration::from_millis(5)).await;

        doomed.cancel();
        assert!(!cancelled.await.unwrap());

        drop(held);
        assert!(patient.await.unwrap());
    }

    #[tokio::test]
    async fn test_pre_cancelled_token_never_admits() {
        let gate = MutationGate::new();
        let cancel = CancellationToken::new();
        cancel.cancel();

        assert!(gate.acquire(GameId::new(), &cancel).await.is_none());
        assert_eq!(gate.tracked_games(), 0);
    }

    #[tokio::test]
    async fn test_idle_slots_are_pruned() {
        let gate = MutationGate::new();
        let cancel = CancellationToken::new();
        let game_id = GameId::new();

        let permit = gate.acquire(game_id, &cancel).await.unwrap();
        assert_eq!(gate.tracked_games(), 1);
        drop(permit);
        assert_eq!(gate.tracked_games(), 0);

        // A fresh slot works after pruning.
        assert!(gate.acquire(game_id, &cancel).await.is_some());
    }
}
