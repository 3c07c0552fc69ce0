use constants::model::{PROGRESS_BASELINE_BYTES, PROGRESS_ESTIMATE_CAP};

/// Visual load fraction. Exact when the transfer total is known; otherwise a
/// saturating estimate that never reports completion early.
pub fn progress_fraction(loaded: u64, total: Option<u64>) -> f32 {
    match total {
        Some(total) if total > 0 => (loaded as f32 / total as f32).min(1.0),
        _ => (loaded as f32 / PROGRESS_BASELINE_BYTES as f32).min(PROGRESS_ESTIMATE_CAP),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_totals_report_exact_fractions() {
        assert_eq!(progress_fraction(0, Some(1000)), 0.0);
        assert_eq!(progress_fraction(250, Some(1000)), 0.25);
        assert_eq!(progress_fraction(2000, Some(1000)), 1.0);
    }

    #[test]
    fn test_unknown_totals_saturate_below_completion() {
        assert_eq!(progress_fraction(500_000, None), 0.5);
        assert_eq!(progress_fraction(5_000_000, None), PROGRESS_ESTIMATE_CAP);
        assert_eq!(progress_fraction(u64::MAX, None), PROGRESS_ESTIMATE_CAP);
    }

    #[test]
    fn test_zero_total_falls_back_to_the_estimate() {
        assert_eq!(progress_fraction(100_000, Some(0)), 0.1);
    }
}
