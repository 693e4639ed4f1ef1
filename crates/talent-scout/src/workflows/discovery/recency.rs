use chrono::{DateTime, Duration, Utc};

/// Admission filter on account activity.
///
/// The reference instant is fixed when the gate is built so every candidate
/// in one discovery run is measured against the same cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecencyGate {
    cutoff: DateTime<Utc>,
}

impl RecencyGate {
    /// A window reaching past the earliest representable instant admits
    /// every account.
    pub fn new(now: DateTime<Utc>, window_days: u32) -> Self {
        let cutoff = Duration::try_days(i64::from(window_days))
            .and_then(|window| now.checked_sub_signed(window))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        Self { cutoff }
    }

    pub fn cutoff(&self) -> DateTime<Utc> {
        self.cutoff
    }

    /// Accounts updated exactly at the cutoff are admitted.
    pub fn admits(&self, updated_at: DateTime<Utc>) -> bool {
        updated_at >= self.cutoff
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 7, 1, 9, 30, 0).unwrap()
    }

    #[test]
    fn boundary_is_inclusive() {
        let gate = RecencyGate::new(now(), 90);
        let cutoff = now() - Duration::days(90);

        assert_eq!(gate.cutoff(), cutoff);
        assert!(gate.admits(cutoff));
        assert!(!gate.admits(cutoff - Duration::seconds(1)));
        assert!(gate.admits(now()));
    }

    #[test]
    fn oversized_window_saturates_at_earliest_instant() {
        let gate = RecencyGate::new(now(), u32::MAX);
        assert_eq!(gate.cutoff(), DateTime::<Utc>::MIN_UTC);
        assert!(gate.admits(Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap()));

        let large = RecencyGate::new(now(), 200_000_000);
        assert!(large.admits(DateTime::<Utc>::MIN_UTC));
    }

    #[test]
    fn zero_window_admits_only_current_activity() {
        let gate = RecencyGate::new(now(), 0);
        assert!(gate.admits(now()));
        assert!(!gate.admits(now() - Duration::seconds(1)));
    }
}
