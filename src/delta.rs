// src/delta.rs
//! Rank movement between the new ranking and a baseline snapshot.

use crate::trend::Trend;

/// Set `delta = old_index - new_index` on every new trend whose fingerprint
/// appears in `old`. Positive means the keyword moved up. Trends without a
/// match keep their current delta (`DELTA_NEW` when freshly built). If `old`
/// holds a fingerprint more than once, the last occurrence wins.
pub fn apply_delta(new: &mut [Trend], old: &[Trend]) {
    for (new_index, trend) in new.iter_mut().enumerate() {
        if let Some(old_index) = old.iter().rposition(|o| o.fingerprint == trend.fingerprint) {
            trend.delta = old_index as i64 - new_index as i64;
        }
    }
}
