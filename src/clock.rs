use chrono::{DateTime, Local};

/// Wall-clock source. Instants are read here and passed into actions.
pub trait Clock {
    fn now(&self) -> DateTime<Local>;

    fn today(&self) -> chrono::NaiveDate {
        self.now().date_naive()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::cell::Cell;

    /// Clock that only moves when told to
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        now: Cell<DateTime<Local>>,
    }

    impl FixedClock {
        pub fn at(now: DateTime<Local>) -> Self {
            Self { now: Cell::new(now) }
        }

        pub fn advance(&self, by: chrono::Duration) {
            self.now.set(self.now.get() + by);
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Local> {
            self.now.get()
        }
    }
}
