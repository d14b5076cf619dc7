use serde::{Deserialize, Serialize};

/// Reward tiers, rarest first. Thresholds mirror the reward bands of the
/// draw ladder so a band's outcome always lands in the matching tier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RewardTier {
    Legendary,  // >= 800_000
    Impossible, // >= 500_000
    UltraRare,  // >= 100_000
    Epic,       // >= 10_000
    Amazing,    // >= 1_000
    Wonderful,  // >= 100
    PrettyGood, // >= 10
    NotBad,     // >= 5
    Consolation, // >= 1
    Naughty,    // 0
}

/// How flashy the reveal renders for a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealIntensity {
    Plain,
    Festive,
    Golden,
    Jackpot,
}

impl RewardTier {
    pub fn from_reward(reward: u64) -> Self {
        match reward {
            r if r >= 800_000 => RewardTier::Legendary,
            r if r >= 500_000 => RewardTier::Impossible,
            r if r >= 100_000 => RewardTier::UltraRare,
            r if r >= 10_000 => RewardTier::Epic,
            r if r >= 1_000 => RewardTier::Amazing,
            r if r >= 100 => RewardTier::Wonderful,
            r if r >= 10 => RewardTier::PrettyGood,
            r if r >= 5 => RewardTier::NotBad,
            r if r >= 1 => RewardTier::Consolation,
            _ => RewardTier::Naughty,
        }
    }

    /// Rank for ordering tiers; higher is rarer.
    pub fn rank(&self) -> u8 {
        match self {
            RewardTier::Legendary => 9,
            RewardTier::Impossible => 8,
            RewardTier::UltraRare => 7,
            RewardTier::Epic => 6,
            RewardTier::Amazing => 5,
            RewardTier::Wonderful => 4,
            RewardTier::PrettyGood => 3,
            RewardTier::NotBad => 2,
            RewardTier::Consolation => 1,
            RewardTier::Naughty => 0,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            RewardTier::Legendary => {
                "LEGENDARY!!! 🌟 You've hit the jackpot! Santa's entire workshop is yours!"
            }
            RewardTier::Impossible => "IMPOSSIBLE! 🎇 You're Santa's favorite this millennium!",
            RewardTier::UltraRare => "ULTRA RARE! 🌠 You've been blessed by Santa's magic!",
            RewardTier::Epic => "EPIC! ⭐ Santa's elves worked overtime for you!",
            RewardTier::Amazing => "AMAZING! 🎄 You've made Santa's VIP list!",
            RewardTier::Wonderful => "Wonderful! 🎁 Santa really likes you!",
            RewardTier::PrettyGood => "Pretty good! 🎅 Santa's checking his list twice for you!",
            RewardTier::NotBad => "Not bad! 🎄 You're on Santa's good list!",
            RewardTier::Consolation => "Well... 🤔 At least you got something!",
            RewardTier::Naughty => "Oh no! 😅 Someone's been naughty this year!",
        }
    }

    pub fn intensity(&self) -> RevealIntensity {
        match self {
            RewardTier::Legendary => RevealIntensity::Jackpot,
            RewardTier::Impossible | RewardTier::UltraRare => RevealIntensity::Golden,
            RewardTier::Epic | RewardTier::Amazing => RevealIntensity::Festive,
            _ => RevealIntensity::Plain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(RewardTier::from_reward(0), RewardTier::Naughty);
        assert_eq!(RewardTier::from_reward(1), RewardTier::Consolation);
        assert_eq!(RewardTier::from_reward(4), RewardTier::Consolation);
        assert_eq!(RewardTier::from_reward(5), RewardTier::NotBad);
        assert_eq!(RewardTier::from_reward(9), RewardTier::NotBad);
        assert_eq!(RewardTier::from_reward(10), RewardTier::PrettyGood);
        assert_eq!(RewardTier::from_reward(42), RewardTier::PrettyGood);
        assert_eq!(RewardTier::from_reward(100), RewardTier::Wonderful);
        assert_eq!(RewardTier::from_reward(1_000), RewardTier::Amazing);
        assert_eq!(RewardTier::from_reward(10_000), RewardTier::Epic);
        assert_eq!(RewardTier::from_reward(100_000), RewardTier::UltraRare);
        assert_eq!(RewardTier::from_reward(500_000), RewardTier::Impossible);
        assert_eq!(RewardTier::from_reward(800_000), RewardTier::Legendary);
        assert_eq!(RewardTier::from_reward(999_999), RewardTier::Legendary);
    }

    #[test]
    fn test_tier_rank_monotonic() {
        let samples = [0u64, 1, 4, 5, 9, 10, 99, 100, 999, 1_000, 9_999, 10_000, 99_999, 100_000, 499_999, 500_000, 799_999, 800_000, 999_999];
        for pair in samples.windows(2) {
            let lo = RewardTier::from_reward(pair[0]).rank();
            let hi = RewardTier::from_reward(pair[1]).rank();
            assert!(lo <= hi, "rank must not decrease: {} vs {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_intensity_mapping() {
        assert_eq!(RewardTier::from_reward(0).intensity(), RevealIntensity::Plain);
        assert_eq!(RewardTier::from_reward(2_000).intensity(), RevealIntensity::Festive);
        assert_eq!(RewardTier::from_reward(150_000).intensity(), RevealIntensity::Golden);
        assert_eq!(RewardTier::from_reward(900_000).intensity(), RevealIntensity::Jackpot);
    }
}
