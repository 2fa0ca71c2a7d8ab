//! End-of-match statistics: accuracy, headshot rate, grade and the
//! high-score comparison. Pure functions of the final match state.

use duel_core::enums::Grade;
use duel_core::state::{MatchSummary, ShotStats};

use crate::match_state::MatchState;

/// Build the summary for a finished match against the previously
/// persisted high score. Persisting the new record is the caller's job.
pub fn summarize(state: &MatchState, previous_high_score: u32) -> MatchSummary {
    summarize_stats(state.score, state.stats, previous_high_score)
}

pub fn summarize_stats(score: u32, stats: ShotStats, previous_high_score: u32) -> MatchSummary {
    let accuracy = percent(stats.hits, stats.shots_fired);
    let new_high_score = score > previous_high_score;

    MatchSummary {
        score,
        stats,
        accuracy,
        headshot_rate: percent(stats.headshots, stats.hits),
        grade: Grade::from_accuracy(accuracy),
        previous_high_score,
        high_score: previous_high_score.max(score),
        score_delta: score as i64 - previous_high_score as i64,
        new_high_score,
    }
}

/// `round(part / whole * 100)` with half-up rounding; 0 when `whole` is 0.
fn percent(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    let part = part as u64;
    let whole = whole as u64;
    ((part * 200 + whole) / (whole * 2)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(shots_fired: u32, hits: u32, headshots: u32) -> ShotStats {
        ShotStats {
            shots_fired,
            hits,
            headshots,
            misses: shots_fired - hits,
        }
    }

    #[test]
    fn test_eight_of_ten_grades_a() {
        let summary = summarize_stats(40, stats(10, 8, 4), 0);
        assert_eq!(summary.accuracy, 80);
        assert_eq!(summary.headshot_rate, 50);
        assert_eq!(summary.grade, Grade::A);
    }

    #[test]
    fn test_no_shots_is_zero_and_c() {
        let summary = summarize_stats(0, ShotStats::default(), 0);
        assert_eq!(summary.accuracy, 0);
        assert_eq!(summary.headshot_rate, 0);
        assert_eq!(summary.grade, Grade::C);
    }

    #[test]
    fn test_misses_only_has_zero_headshot_rate() {
        let summary = summarize_stats(0, stats(4, 0, 0), 10);
        assert_eq!(summary.accuracy, 0);
        assert_eq!(summary.headshot_rate, 0);
    }

    #[test]
    fn test_rounding_is_half_up() {
        // 2/3 = 66.67 -> 67, 1/8 = 12.5 -> 13, 1/3 = 33.33 -> 33
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(1, 8), 13);
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(7, 7), 100);
    }

    #[test]
    fn test_accuracy_feeds_grade_thresholds() {
        // 171/200 = 85.5 -> 86 -> S; 17/20 = 85 -> A
        assert_eq!(summarize_stats(0, stats(200, 171, 0), 0).grade, Grade::S);
        assert_eq!(summarize_stats(0, stats(20, 17, 0), 0).grade, Grade::A);
    }

    #[test]
    fn test_record_not_beaten() {
        let summary = summarize_stats(30, stats(5, 5, 5), 50);
        assert!(!summary.new_high_score);
        assert_eq!(summary.high_score, 50);
        assert_eq!(summary.previous_high_score, 50);
        assert_eq!(summary.score_delta, -20);
    }

    #[test]
    fn test_record_tied_is_not_new() {
        let summary = summarize_stats(50, stats(5, 5, 5), 50);
        assert!(!summary.new_high_score);
        assert_eq!(summary.score_delta, 0);
    }

    #[test]
    fn test_record_beaten() {
        let summary = summarize_stats(75, stats(5, 5, 5), 50);
        assert!(summary.new_high_score);
        assert_eq!(summary.high_score, 75);
        assert_eq!(summary.score_delta, 25);
    }
}
