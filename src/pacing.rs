use rand::Rng;
use std::time::Duration;

/// Upper bound for a single pause, in seconds
pub const MAX_DELAY_SECS: f64 = 3600.0;

/// Anything the fetch loop can wait on between pages
pub trait Pace {
    /// Wait before the next page and return how long it waited
    fn pause(&self) -> Duration;
}

/// Randomized pause between page requests so the request pattern is less regular
#[derive(Debug, Clone, PartialEq)]
pub struct Pacer {
    min_secs: f64,
    max_secs: f64,
}

impl Default for Pacer {
    fn default() -> Self {
        Self::new(3.0, 6.0)
    }
}

impl Pacer {
    /// Create a pacer sleeping uniformly within `[min_secs, max_secs]`.
    /// Bounds are clamped to `[0, MAX_DELAY_SECS]` (NaN counts as 0) and
    /// swapped if given in the wrong order.
    pub fn new(min_secs: f64, max_secs: f64) -> Self {
        let min_secs = clamp_secs(min_secs);
        let max_secs = clamp_secs(max_secs);
        if min_secs <= max_secs {
            Self { min_secs, max_secs }
        } else {
            Self { min_secs: max_secs, max_secs: min_secs }
        }
    }

    /// A pacer that never sleeps
    pub fn disabled() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Pick the next delay without sleeping
    pub fn next_delay(&self) -> Duration {
        if self.max_secs <= self.min_secs {
            return Duration::from_secs_f64(self.min_secs);
        }
        let mut rng = rand::thread_rng();
        Duration::from_secs_f64(rng.gen_range(self.min_secs..=self.max_secs))
    }

    /// Sleep for a random delay and return how long it slept
    pub fn pause(&self) -> Duration {
        let delay = self.next_delay();
        if !delay.is_zero() {
            log::info!("Sleeping for {:.2} seconds...", delay.as_secs_f64());
            std::thread::sleep(delay);
        }
        delay
    }
}

impl Pace for Pacer {
    fn pause(&self) -> Duration {
        Pacer::pause(self)
    }
}

fn clamp_secs(secs: f64) -> f64 {
    let clamped = if secs > 0.0 { secs.min(MAX_DELAY_SECS) } else { 0.0 };
    if clamped != secs {
        log::warn!("Pacing bound {} out of range, using {}", secs, clamped);
    }
    clamped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_within_bounds() {
        let pacer = Pacer::new(0.01, 0.05);
        for _ in 0..100 {
            let delay = pacer.next_delay();
            assert!(delay >= Duration::from_secs_f64(0.01));
            assert!(delay <= Duration::from_secs_f64(0.05));
        }
    }

    #[test]
    fn test_default_range() {
        let delay = Pacer::default().next_delay();
        assert!(delay >= Duration::from_secs(3));
        assert!(delay <= Duration::from_secs(6));
    }

    #[test]
    fn test_disabled_never_sleeps() {
        assert_eq!(Pacer::disabled().pause(), Duration::ZERO);
    }

    #[test]
    fn test_swapped_and_negative_bounds() {
        assert_eq!(Pacer::new(5.0, 2.0), Pacer::new(2.0, 5.0));
        assert_eq!(Pacer::new(-1.0, -3.0), Pacer::disabled());
    }

    #[test]
    fn test_unbounded_values_are_clamped() {
        let pacer = Pacer::new(0.0, f64::INFINITY);
        assert_eq!(pacer, Pacer::new(0.0, MAX_DELAY_SECS));
        assert!(pacer.next_delay() <= Duration::from_secs_f64(MAX_DELAY_SECS));

        assert_eq!(Pacer::new(1e30, 1e30).next_delay(), Duration::from_secs_f64(MAX_DELAY_SECS));
        assert_eq!(Pacer::new(f64::NAN, f64::NEG_INFINITY), Pacer::disabled());
    }
}
