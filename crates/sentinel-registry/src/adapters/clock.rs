//! # Manual Clock Adapter
//!
//! Host clock that only moves when told to, and never backwards.

use crate::domain::value_objects::Timestamp;
use crate::errors::LedgerError;
use crate::ports::outbound::Clock;

/// Monotonic, explicitly driven clock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ManualClock {
    now: Timestamp,
}

impl ManualClock {
    /// Clock starting at `start`.
    #[must_use]
    pub const fn starting_at(start: Timestamp) -> Self {
        Self { now: start }
    }

    /// Moves the clock to `to`.
    ///
    /// # Errors
    ///
    /// [`LedgerError::ClockRegression`] if `to` is earlier than now.
    pub fn set(&mut self, to: Timestamp) -> Result<(), LedgerError> {
        if to < self.now {
            return Err(LedgerError::ClockRegression {
                current: self.now,
                requested: to,
            });
        }
        self.now = to;
        Ok(())
    }

    /// Moves the clock forward by `secs`, saturating.
    pub fn advance(&mut self, secs: u64) {
        self.now = Timestamp::from_secs(self.now.as_secs().saturating_add(secs));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        self.now
    }
}
