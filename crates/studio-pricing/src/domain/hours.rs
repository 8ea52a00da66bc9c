use rust_decimal::Decimal;

/// Collapses the two "unset" encodings of a duration into `None`.
///
/// A zero-hour base or event carries no information, so `Some(0)` and `None`
/// are treated identically everywhere hours are compared or multiplied.
pub fn normalize_hours(hours: Option<Decimal>) -> Option<Decimal> {
    hours.filter(|h| !h.is_zero())
}

/// Outcome of comparing a package's base hours against the event duration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoursMatch {
    /// Both durations are set
    pub constraint_set: bool,
    /// Both durations are set and numerically equal
    pub hours_match: bool,
}

impl HoursMatch {
    /// True when the personalized price may be used as-is
    pub fn permits_personalized(&self) -> bool {
        self.hours_match || !self.constraint_set
    }
}

pub struct HoursMatchResolver;

impl HoursMatchResolver {
    pub fn resolve(base_hours: Option<Decimal>, duration_hours: Option<Decimal>) -> HoursMatch {
        match (normalize_hours(base_hours), normalize_hours(duration_hours)) {
            (Some(base), Some(duration)) => HoursMatch {
                constraint_set: true,
                hours_match: base == duration,
            },
            _ => HoursMatch {
                constraint_set: false,
                hours_match: false,
            },
        }
    }
}
