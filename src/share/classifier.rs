//! Threshold-based classification of glucose values.

use super::types::{AdvancedTrend, Range, Trend};

/// Glucose thresholds in mg/dL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    /// Lower bound of the target range.
    pub low: i32,
    /// Upper bound of the target range.
    pub high: i32,
    /// Values below this are urgent lows.
    pub urgent_low: i32,
    /// Values above this are urgent highs.
    pub urgent_high: i32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            low: 80,
            high: 200,
            urgent_low: 65,
            urgent_high: 300,
        }
    }
}

impl Thresholds {
    /// Zone of `value`. The first matching check wins: urgent bounds are
    /// strict, the high/low bounds inclusive, so `value == high` is
    /// [`Range::TooHigh`].
    pub fn range(&self, value: i32) -> Range {
        if value > self.urgent_high {
            Range::UrgentHigh
        } else if value < self.urgent_low {
            Range::UrgentLow
        } else if value >= self.high {
            Range::TooHigh
        } else if value >= self.low {
            Range::InRange
        } else {
            Range::TooLow
        }
    }

    /// Combines `trend` with a strict high/low split of `value`.
    pub fn advanced_trend(&self, value: i32, trend: Trend) -> AdvancedTrend {
        use AdvancedTrend::*;

        let zone = if value > self.high {
            Zone::High
        } else if value > self.low {
            Zone::InRange
        } else {
            Zone::Low
        };

        let [high, in_range, low] = match trend {
            Trend::DoubleUp => [DoubleUpHigh, DoubleUpInRange, DoubleUpLow],
            Trend::SingleUp => [SingleUpHigh, SingleUpInRange, SingleUpLow],
            Trend::FortyFiveUp => [FortyFiveUpHigh, FortyFiveUpInRange, FortyFiveUpLow],
            Trend::Flat => [FlatHigh, FlatInRange, FlatLow],
            Trend::FortyFiveDown => [FortyFiveDownHigh, FortyFiveDownInRange, FortyFiveDownLow],
            Trend::SingleDown => [SingleDownHigh, SingleDownInRange, SingleDownLow],
            Trend::DoubleDown => [DoubleDownHigh, DoubleDownInRange, DoubleDownLow],
            Trend::NotComputable | Trend::RateOutOfRange => return Unknown,
        };

        match zone {
            Zone::High => high,
            Zone::InRange => in_range,
            Zone::Low => low,
        }
    }
}

enum Zone {
    High,
    InRange,
    Low,
}

/// Maps a service trend label to a [`Trend`].
///
/// Matching is exact and case-sensitive; unknown labels fall back to
/// [`Trend::NotComputable`].
pub fn trend_from_label(label: &str) -> Trend {
    Trend::ALL
        .into_iter()
        .find(|trend| trend.as_str() == label)
        .unwrap_or(Trend::NotComputable)
}
