//! Exponential inter-arrival times for a Poisson spawn process.

use rand::distributions::OpenClosed01;
use rand::Rng;
use crate::config::{ConfigError, require_positive};

/// Source of waiting times, in ticks, between consecutive spawns.
pub trait ArrivalSource {
    fn next_wait_ticks(&mut self) -> f64;
}

/// Draws one exponential waiting time with the given rate (arrivals per
/// tick) by inverse-transform sampling.
pub fn next_wait_ticks<R: Rng + ?Sized>(rng: &mut R, rate_per_tick: f64) -> f64 {
    let u: f64 = rng.sample(OpenClosed01);
    -u.ln() / rate_per_tick
}

/// Memoryless arrivals driven by an explicit RNG handle.
#[derive(Debug, Clone)]
pub struct PoissonArrivals<R> {
    rate_per_tick: f64,
    rng: R,
}

impl<R: Rng> PoissonArrivals<R> {
    pub fn new(rate_per_tick: f64, rng: R) -> Result<Self, ConfigError> {
        require_positive("arrival rate", rate_per_tick)?;
        Ok(Self { rate_per_tick, rng })
    }

    pub fn rate_per_tick(&self) -> f64 {
        self.rate_per_tick
    }
}

impl<R: Rng> ArrivalSource for PoissonArrivals<R> {
    fn next_wait_ticks(&mut self) -> f64 {
        next_wait_ticks(&mut self.rng, self.rate_per_tick)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample_mean(rate: f64, draws: usize, seed: u64) -> f64 {
        let mut arrivals = PoissonArrivals::new(rate, StdRng::seed_from_u64(seed)).unwrap();
        (0..draws).map(|_| arrivals.next_wait_ticks()).sum::<f64>() / draws as f64
    }

    #[test]
    fn mean_converges_to_inverse_rate() {
        let rate = 0.25;
        let expected = 1.0 / rate;
        let coarse = (sample_mean(rate, 1_000, 7) - expected).abs();
        let fine = (sample_mean(rate, 200_000, 7) - expected).abs();
        // Standard error is 4 / sqrt(n): 0.126 and 0.009
        assert!(coarse < 0.5, "mean off by {} after 1k draws", coarse);
        assert!(fine < 0.05, "mean off by {} after 200k draws", fine);
    }

    #[test]
    fn waits_are_never_negative() {
        let mut arrivals = PoissonArrivals::new(100.0 / 1440.0, StdRng::seed_from_u64(3)).unwrap();
        for _ in 0..10_000 {
            let wait = arrivals.next_wait_ticks();
            assert!(wait >= 0.0 && wait.is_finite());
        }
    }

    #[test]
    fn uniform_one_means_no_wait() {
        // All-ones bits sample u = 1
        let mut rng = StepRng::new(u64::MAX, 0);
        assert_eq!(next_wait_ticks(&mut rng, 0.5), 0.0);
    }

    #[test]
    fn same_seed_same_waits() {
        let mut a = PoissonArrivals::new(0.1, StdRng::seed_from_u64(99)).unwrap();
        let mut b = PoissonArrivals::new(0.1, StdRng::seed_from_u64(99)).unwrap();
        for _ in 0..100 {
            assert_eq!(a.next_wait_ticks(), b.next_wait_ticks());
        }
    }

    #[test]
    fn rejects_non_positive_rate() {
        assert!(PoissonArrivals::new(0.0, StdRng::seed_from_u64(1)).is_err());
        assert!(PoissonArrivals::new(-2.0, StdRng::seed_from_u64(1)).is_err());
    }
}
