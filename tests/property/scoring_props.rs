//! Scoring invariants: coverage monotonicity, recency bounds.

use super::strategies::{FILLER_WORDS, QUERY_WORDS};
use crate::common::{loaded_engine, reference_now, search};
use chrono::Duration;
use postdex::scoring::{coverage_factor, recency_bonus};
use postdex::{Document, ScoringConfig};
use proptest::prelude::*;

fn filler() -> impl Strategy<Value = Vec<&'static str>> {
    prop::collection::vec(prop::sample::select(FILLER_WORDS), 0..8)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_coverage_factor_bounded_and_monotone(total in 1usize..10, a in 0usize..10, b in 0usize..10) {
        let (lo, hi) = (a.min(b).min(total), a.max(b).min(total));
        let f_lo = coverage_factor(lo, total);
        let f_hi = coverage_factor(hi, total);
        prop_assert!((0.5..=1.0).contains(&f_lo));
        prop_assert!(f_lo <= f_hi);
        prop_assert_eq!(coverage_factor(total, total), 1.0);
    }

    #[test]
    fn prop_recency_bonus_bounded(age in -30i64..90) {
        let config = ScoringConfig::default();
        let now = reference_now();
        let bonus = recency_bonus(Some(now - Duration::days(age)), now, &config);
        let max = config.recent_post_bonus * config.recent_window_days as f64;
        prop_assert!(bonus >= 0.0);
        prop_assert!(bonus <= max + 1e-12);
        if age >= config.recent_window_days {
            prop_assert_eq!(bonus, 0.0);
        }
    }

    #[test]
    fn prop_older_never_beats_newer(younger in 0i64..60, extra in 0i64..60) {
        let config = ScoringConfig::default();
        let now = reference_now();
        let newer = recency_bonus(Some(now - Duration::days(younger)), now, &config);
        let older = recency_bonus(Some(now - Duration::days(younger + extra)), now, &config);
        prop_assert!(older <= newer);
    }

    /// Adding one more query term to a post never lowers its score.
    #[test]
    fn prop_more_coverage_never_scores_lower(
        title in filler(),
        content in filler(),
        pair in prop::sample::subsequence(QUERY_WORDS.to_vec(), 2),
        in_title in any::<bool>(),
    ) {
        let (t1, t2) = (pair[0], pair[1]);
        let mut title = title;
        if in_title {
            title.push(t1);
        }
        let mut content = content;
        content.push(t1);

        let fewer = Document::new("fewer", title.join(" ")).with_content(content.join(" "));
        let mut more = fewer.clone();
        more.id = "more".into();
        more.content.push(' ');
        more.content.push_str(t2);

        let engine = loaded_engine(vec![fewer, more]);
        let query = format!("{t1} {t2}");
        let results = search(&engine, &query);

        prop_assert_eq!(results.len(), 2);
        prop_assert_eq!(&results[0].document.id, "more");
        prop_assert!(results[0].score >= results[1].score);
    }
}
