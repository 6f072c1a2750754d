use chrono::Utc;

/// Source of the current Unix time, in seconds.
pub trait Clock: Send + Sync {
    fn now(&self) -> i64;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        Utc::now().timestamp()
    }
}

#[cfg(test)]
pub mod manual {
    use std::sync::atomic::{AtomicI64, Ordering};

    use super::Clock;

    pub struct ManualClock(AtomicI64);

    impl ManualClock {
        pub fn new(now: i64) -> Self {
            Self(AtomicI64::new(now))
        }

        pub fn set(&self, now: i64) {
            self.0.store(now, Ordering::SeqCst);
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> i64 {
            self.0.load(Ordering::SeqCst)
        }
    }
}
