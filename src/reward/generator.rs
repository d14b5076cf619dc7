use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

use super::bands::{RewardBand, LOW_BAND_CEILING, PRIMARY_DOMAIN, SUB_DOMAIN};

/// Weighted reward generator.
///
/// One primary draw picks a band from the ladder; draws landing in the low
/// 90% of the domain take a secondary draw to pick a sub-band. The reward is
/// then uniform within the band. Total over its random source, no error
/// paths.
pub struct RewardGenerator<R: RngCore> {
    rng: R,
}

impl RewardGenerator<StdRng> {
    /// Generator backed by OS entropy.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: RngCore> RewardGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Draws one reward. The sub-draw is taken only when the primary draw
    /// lands in the low band, and fixed bands consume no reward draw.
    pub fn draw(&mut self) -> u64 {
        let d = self.rng.gen_range(0..PRIMARY_DOMAIN);
        let band = if d < LOW_BAND_CEILING {
            let s = self.rng.gen_range(0..SUB_DOMAIN);
            RewardBand::for_draws(d, s)
        } else {
            RewardBand::for_draws(d, 0)
        };
        self.reward_in(band)
    }

    fn reward_in(&mut self, band: RewardBand) -> u64 {
        if band.is_fixed() {
            return band.min_reward;
        }
        self.rng.gen_range(band.min_reward..band.max_reward)
    }
}
