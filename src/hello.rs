use std::sync::atomic::{AtomicI32, Ordering};

/// Text shown by the main activity.
pub fn greeting() -> &'static str {
    "Hello from Rust"
}

/// Counts button presses; each call to `next` yields the previous count.
#[derive(Debug, Default)]
pub struct ClickCounter {
    count: AtomicI32,
}

impl ClickCounter {
    pub const fn new() -> Self {
        ClickCounter {
            count: AtomicI32::new(0),
        }
    }

    pub fn next(&self) -> i32 {
        self.count.fetch_add(1, Ordering::Relaxed)
    }

    pub fn current(&self) -> i32 {
        self.count.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_starts_at_zero() {
        let counter = ClickCounter::new();
        assert_eq!(counter.next(), 0);
        assert_eq!(counter.next(), 1);
        assert_eq!(counter.current(), 2);
    }
}
