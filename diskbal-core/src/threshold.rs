//! Threshold resolution
//!
//! Determines the effective imbalance tolerance percentage from operator
//! input, falling back to the cluster-wide default when the input is
//! absent, unparseable, or out of range. The fallback is silent: an
//! out-of-range value is replaced, never rejected with an error.

use tracing::debug;

/// Resolve the effective threshold percentage.
///
/// Accepts the user value only when it parses as a float in (0, 100];
/// anything else yields `cluster_default`.
pub fn resolve_threshold(user_value: Option<&str>, cluster_default: f64) -> f64 {
    let value = user_value.and_then(|v| v.parse::<f64>().ok()).unwrap_or(0.0);

    if value <= 0.0 || value > 100.0 {
        debug!(
            requested = ?user_value,
            default = cluster_default,
            "Threshold absent or out of range, using cluster default"
        );
        cluster_default
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT: f64 = 10.0;

    #[test]
    fn test_in_range_value_returned_unchanged() {
        assert_eq!(resolve_threshold(Some("5"), DEFAULT), 5.0);
        assert_eq!(resolve_threshold(Some("0.5"), DEFAULT), 0.5);
        assert_eq!(resolve_threshold(Some("100"), DEFAULT), 100.0);
    }

    #[test]
    fn test_absent_falls_back_to_default() {
        assert_eq!(resolve_threshold(None, DEFAULT), DEFAULT);
    }

    #[test]
    fn test_out_of_range_falls_back_to_default() {
        assert_eq!(resolve_threshold(Some("0"), DEFAULT), DEFAULT);
        assert_eq!(resolve_threshold(Some("-3"), DEFAULT), DEFAULT);
        assert_eq!(resolve_threshold(Some("100.1"), DEFAULT), DEFAULT);
        assert_eq!(resolve_threshold(Some("250"), DEFAULT), DEFAULT);
    }

    #[test]
    fn test_unparseable_falls_back_to_default() {
        assert_eq!(resolve_threshold(Some("ten"), DEFAULT), DEFAULT);
        assert_eq!(resolve_threshold(Some(""), DEFAULT), DEFAULT);
    }
}
