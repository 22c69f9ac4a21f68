// src/retention.rs
//! Which snapshots serve as the delta baseline and which get pruned.
//!
//! A snapshot is "old" once it is at least `interval_secs` older than the
//! current run. The newest old snapshot is the baseline and survives; every
//! other old snapshot is deleted. Snapshots younger than the interval are kept.

use crate::error::StoreResult;
use crate::store::SnapshotStore;

/// Default retention interval in seconds.
pub const DEFAULT_RETENTION_SECS: i64 = 600;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RetentionPlan {
    /// Newest old snapshot; compared against and kept.
    pub baseline: Option<i64>,
    /// Older snapshots to delete, newest first.
    pub stale: Vec<i64>,
}

impl RetentionPlan {
    pub fn compute(timestamps: &[i64], now: i64, interval_secs: i64) -> Self {
        let cutoff = now.saturating_sub(interval_secs);
        let mut old: Vec<i64> = timestamps
            .iter()
            .copied()
            .filter(|&ts| ts <= cutoff)
            .collect();
        old.sort_unstable_by(|a, b| b.cmp(a));
        old.dedup();

        let mut old = old.into_iter();
        let baseline = old.next();
        Self {
            baseline,
            stale: old.collect(),
        }
    }

    /// Timestamp list after this run: stale entries removed, `now` added once.
    /// Surviving entries keep their order.
    pub fn next_timestamps(&self, timestamps: &[i64], now: i64) -> Vec<i64> {
        let mut out: Vec<i64> = Vec::with_capacity(timestamps.len() + 1);
        for &ts in timestamps {
            if !self.stale.contains(&ts) && !out.contains(&ts) {
                out.push(ts);
            }
        }
        if !out.contains(&now) {
            out.push(now);
        }
        out
    }

    /// Delete stale snapshots from the store and write the new timestamp list.
    pub fn apply(
        &self,
        store: &mut SnapshotStore,
        timestamps: &[i64],
        now: i64,
    ) -> StoreResult<Vec<i64>> {
        for ts in &self.stale {
            store.delete(&ts.to_string())?;
        }
        let next = self.next_timestamps(timestamps, now);
        store.set_timestamps(&next)?;
        Ok(next)
    }
}
