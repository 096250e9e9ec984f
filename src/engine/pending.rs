use std::time::{Duration, Instant};

/// An advance scheduled after a quiz answer, tied to the session generation that
/// created it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingAdvance {
    generation: u64,
    due: Instant,
}

impl PendingAdvance {
    pub fn new(generation: u64, due: Instant) -> Self {
        Self { generation, due }
    }

    pub fn belongs_to(&self, generation: u64) -> bool {
        self.generation == generation
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.due
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        self.due.saturating_duration_since(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_due_and_remaining() {
        let start = Instant::now();
        let pending = PendingAdvance::new(3, start + Duration::from_millis(450));
        assert!(!pending.is_due(start));
        assert_eq!(pending.remaining(start), Duration::from_millis(450));
        assert!(pending.is_due(start + Duration::from_millis(450)));
        assert_eq!(
            pending.remaining(start + Duration::from_secs(1)),
            Duration::ZERO
        );
        assert!(pending.belongs_to(3));
        assert!(!pending.belongs_to(4));
    }
}
