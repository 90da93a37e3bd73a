use chrono::NaiveDateTime;

use crate::domain::{AvailabilityKind, AvailabilityRule};

/// Decides whether a referee may officiate at `when`.
///
/// No rule means always available. A specific window compares only the
/// time-of-day component, inclusive on both bounds, with no tolerance; the
/// calendar date never matters. A window rule missing either bound counts as
/// unavailable.
pub fn is_available(rule: Option<&AvailabilityRule>, when: NaiveDateTime) -> bool {
    let Some(rule) = rule else {
        return true;
    };

    match rule.kind {
        AvailabilityKind::Always => true,
        AvailabilityKind::Never => false,
        AvailabilityKind::SpecificWindow => match (rule.window_start, rule.window_end) {
            (Some(start), Some(end)) => {
                let time = when.time();
                start <= time && time <= end
            }
            _ => false,
        },
    }
}
