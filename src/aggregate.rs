// src/aggregate.rs
//! Cross-source trend scoring.
//!
//! Each source contributes `WEIGHTS[rank] * bias` for its first ten keywords.
//! Contributions sharing a fingerprint are summed, then keywords that contain
//! another surviving keyword are folded into it at `SIMILARITY_WEIGHT`.
//!
//! Merge order is the first-seen order of fingerprints across sources, in the
//! order the batches are given. The containment pass is order-dependent and that
//! order is part of the contract (see `chain_merge_depends_on_first_seen_order`).

use std::collections::HashMap;

use crate::trend::Trend;

/// Rank weights for the top ten positions of a source.
pub const WEIGHTS: [f64; 10] = [20.0, 19.0, 18.0, 17.0, 16.0, 15.0, 14.0, 13.0, 12.0, 11.0];

/// Share of a folded trend's score carried into the trend it contains.
pub const SIMILARITY_WEIGHT: f64 = 0.7;

/// Normalized keywords from one source, best rank first.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceBatch {
    pub source: String,
    pub bias: f64,
    pub keywords: Vec<String>,
}

impl SourceBatch {
    pub fn new(source: impl Into<String>, bias: f64, keywords: Vec<String>) -> Self {
        Self {
            source: source.into(),
            bias,
            keywords,
        }
    }
}

/// Score, dedupe and rank keywords from all batches. Highest score first;
/// equal scores keep their merge order.
pub fn aggregate(batches: &[SourceBatch]) -> Vec<Trend> {
    let mut trends: Vec<Trend> = Vec::new();
    let mut by_fingerprint: HashMap<String, usize> = HashMap::new();

    for batch in batches {
        // Empty keywords still occupy their rank slot.
        for (rank, keyword) in batch.keywords.iter().take(WEIGHTS.len()).enumerate() {
            if keyword.is_empty() {
                continue;
            }
            let score = WEIGHTS[rank] * batch.bias;
            let candidate = Trend::new(keyword.as_str(), score);
            match by_fingerprint.get(&candidate.fingerprint) {
                Some(&i) => trends[i].add(score, score),
                None => {
                    by_fingerprint.insert(candidate.fingerprint.clone(), trends.len());
                    trends.push(candidate);
                }
            }
        }
    }

    let mut ranked = merge_near_duplicates(trends);
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}

/// Fold every trend whose keyword contains another live trend's keyword into
/// that trend, in slice order.
///
/// Trend `i` is compared against all trends still alive at its turn; it adds
/// `score * SIMILARITY_WEIGHT` (and its maxscore) to each one it contains and is
/// then dropped. A dropped trend no longer absorbs later trends. Removal is
/// tracked in a mask and applied once at the end.
pub fn merge_near_duplicates(mut trends: Vec<Trend>) -> Vec<Trend> {
    debug_assert!(
        {
            let mut seen = std::collections::HashSet::new();
            trends.iter().all(|t| seen.insert(t.fingerprint.clone()))
        },
        "duplicate fingerprints before containment merge"
    );

    let mut removed = vec![false; trends.len()];

    for i in 0..trends.len() {
        let folded_score = trends[i].score * SIMILARITY_WEIGHT;
        let folded_max = trends[i].maxscore;
        let mut folded = false;

        for j in 0..trends.len() {
            if i == j || removed[j] {
                continue;
            }
            if trends[i].keyword.contains(trends[j].keyword.as_str()) {
                trends[j].add(folded_score, folded_max);
                folded = true;
            }
        }

        if folded {
            removed[i] = true;
        }
    }

    trends
        .into_iter()
        .zip(removed)
        .filter_map(|(t, gone)| (!gone).then_some(t))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kws(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(aggregate(&[]).is_empty());
        assert!(aggregate(&[SourceBatch::new("zum", 1.0, vec![])]).is_empty());
    }

    #[test]
    fn scores_add_across_sources() {
        let batches = vec![
            SourceBatch::new("nate", 0.7, kws(&["x"])),
            SourceBatch::new("zum", 1.0, kws(&["x"])),
        ];
        let out = aggregate(&batches);
        assert_eq!(out.len(), 1);
        assert!(approx(out[0].score, 14.0 + 20.0));
        assert!(approx(out[0].maxscore, 20.0));
    }

    #[test]
    fn whitespace_variants_share_a_trend() {
        let batches = vec![
            SourceBatch::new("nate", 1.0, kws(&["foo bar"])),
            SourceBatch::new("zum", 1.0, kws(&["q", "foobar"])),
        ];
        let out = aggregate(&batches);
        let foo = out.iter().find(|t| t.keyword == "foo bar").unwrap();
        assert!(approx(foo.score, 20.0 + 19.0));
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn only_first_ten_ranks_count() {
        let many: Vec<String> = (0..15).map(|i| format!("kw{i:02}")).collect();
        let out = aggregate(&[SourceBatch::new("zum", 1.0, many)]);
        assert_eq!(out.len(), 10);
        assert!(out.iter().all(|t| t.keyword.as_str() < "kw10"));
        assert!(approx(out[9].score, 11.0));
    }

    #[test]
    fn empty_keywords_keep_their_rank_slot() {
        let out = aggregate(&[SourceBatch::new("zum", 1.0, kws(&["", "b"]))]);
        assert_eq!(out.len(), 1);
        assert!(approx(out[0].score, 19.0));
    }

    #[test]
    fn contained_keyword_absorbs_container() {
        let merged = merge_near_duplicates(vec![
            Trend::new("seoul", 10.0),
            Trend::new("seoul station", 5.0),
        ]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].keyword, "seoul");
        assert!(approx(merged[0].score, 13.5));
        assert!(approx(merged[0].maxscore, 10.0));
    }

    #[test]
    fn folded_trend_is_dropped_even_if_it_contains_nothing_live() {
        // "ab" folds into "b" first; "abc" then finds "ab" gone and folds into "b".
        let merged = merge_near_duplicates(vec![
            Trend::new("ab", 10.0),
            Trend::new("abc", 5.0),
            Trend::new("b", 4.0),
        ]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].keyword, "b");
        assert!(approx(merged[0].score, 4.0 + 7.0 + 3.5));
    }

    #[test]
    fn chain_merge_depends_on_first_seen_order() {
        let forward = merge_near_duplicates(vec![
            Trend::new("a b c", 10.0),
            Trend::new("a b", 8.0),
            Trend::new("a", 6.0),
        ]);
        assert_eq!(forward.len(), 1);
        assert_eq!(forward[0].keyword, "a");
        // a += 7 (from "a b c"), then "a b" (now 15) adds 10.5
        assert!(approx(forward[0].score, 23.5));
        assert!(approx(forward[0].maxscore, 10.0));

        let backward = merge_near_duplicates(vec![
            Trend::new("a", 6.0),
            Trend::new("a b", 8.0),
            Trend::new("a b c", 10.0),
        ]);
        assert_eq!(backward.len(), 1);
        assert_eq!(backward[0].keyword, "a");
        // "a b" adds 5.6, "a b c" adds 7 ("a b" is already gone)
        assert!(approx(backward[0].score, 18.6));
    }

    #[test]
    fn ties_keep_merge_order() {
        let batches = vec![
            SourceBatch::new("nate", 1.0, kws(&["first"])),
            SourceBatch::new("zum", 1.0, kws(&["second"])),
        ];
        let out = aggregate(&batches);
        assert_eq!(out[0].keyword, "first");
        assert_eq!(out[1].keyword, "second");
    }

    #[test]
    fn output_is_sorted_by_score_desc() {
        let batches = vec![
            SourceBatch::new("nate", 0.7, kws(&["n1", "n2", "shared"])),
            SourceBatch::new("zum", 1.0, kws(&["z1", "shared", "z3"])),
        ];
        let out = aggregate(&batches);
        assert!(out.windows(2).all(|w| w[0].score >= w[1].score));
        assert_eq!(out[0].keyword, "shared");
        assert!(approx(out[0].score, 18.0 * 0.7 + 19.0));
    }
}
