//! Committed snapshot table.
//!
//! Holds one `Arc<GraphSnapshot>` per game. Readers clone the `Arc` and work
//! on an immutable object; writers replace the pointer wholesale. Nothing is
//! ever edited in place.
//!
//! Every publish and invalidation bumps the game's epoch. A reader that loads
//! outside a mutation only caches its result if the epoch it saw before
//! loading is still current.

use std::sync::Arc;

use dashmap::DashMap;
use gategraph_domain::{GameId, GraphSnapshot};

#[derive(Default)]
struct Slot {
    epoch: u64,
    snapshot: Option<Arc<GraphSnapshot>>,
}

#[derive(Default)]
pub struct SnapshotStore {
    slots: DashMap<GameId, Slot>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current committed snapshot for a game, if cached.
    pub fn get(&self, game_id: GameId) -> Option<Arc<GraphSnapshot>> {
        self.slots
            .get(&game_id)
            .and_then(|slot| slot.snapshot.clone())
    }

    /// Version of the game's cache entry. Read it before loading from storage
    /// and hand it back to `publish_if_current`.
    pub fn epoch(&self, game_id: GameId) -> u64 {
        self.slots.get(&game_id).map_or(0, |slot| slot.epoch)
    }

    /// Swap in a new committed snapshot. Only call while holding the game's
    /// mutation permit.
    pub fn publish(&self, snapshot: GraphSnapshot) -> Arc<GraphSnapshot> {
        let snapshot = Arc::new(snapshot);
        let mut slot = self.slots.entry(snapshot.game_id()).or_default();
        slot.epoch += 1;
        slot.snapshot = Some(Arc::clone(&snapshot));
        snapshot
    }

    /// Cache a snapshot loaded outside a mutation.
    ///
    /// A writer's snapshot always wins. If the entry was published or
    /// invalidated since `seen_epoch`, the loaded snapshot is handed back to
    /// the caller but not cached.
    pub fn publish_if_current(
        &self,
        snapshot: GraphSnapshot,
        seen_epoch: u64,
    ) -> Arc<GraphSnapshot> {
        let game_id = snapshot.game_id();
        let mut slot = self.slots.entry(game_id).or_default();
        if let Some(cached) = &slot.snapshot {
            return Arc::clone(cached);
        }

        let snapshot = Arc::new(snapshot);
        if slot.epoch == seen_epoch {
            slot.snapshot = Some(Arc::clone(&snapshot));
        } else {
            tracing::debug!(
                game_id = %game_id,
                seen_epoch,
                epoch = slot.epoch,
                "Loaded snapshot went stale; not caching"
            );
        }
        snapshot
    }

    /// Drop the cached snapshot so the next reader reloads from storage.
    /// Loads already in flight will not cache their result.
    pub fn invalidate(&self, game_id: GameId) -> bool {
        let mut slot = self.slots.entry(game_id).or_default();
        slot.epoch += 1;
        slot.snapshot.take().is_some()
    }
}
