use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::roll::FACE_COUNT;

/// 骰子点数生成器，均匀分布在 1..=6
#[derive(Debug)]
pub struct DiceRoller {
    rng: StdRng,
}

impl DiceRoller {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// 固定种子构造，测试用
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn roll(&mut self) -> u8 {
        self.rng.random_range(1..=FACE_COUNT)
    }
}

impl Default for DiceRoller {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roll_stays_in_face_range() {
        let mut roller = DiceRoller::from_seed(42);
        for _ in 0..1000 {
            let face = roller.roll();
            assert!((1..=6).contains(&face));
        }
    }

    #[test]
    fn roll_distribution_is_roughly_uniform() {
        let mut roller = DiceRoller::from_seed(7);
        let mut counts = [0usize; 6];
        let total = 6000;
        for _ in 0..total {
            counts[(roller.roll() - 1) as usize] += 1;
        }
        // 期望每面 1000 次，允许 ±15% 偏差
        for (i, &count) in counts.iter().enumerate() {
            assert!(
                (850..=1150).contains(&count),
                "face {} appeared {} times out of {}",
                i + 1,
                count,
                total
            );
        }
    }

    #[test]
    fn seeded_rollers_are_reproducible() {
        let mut a = DiceRoller::from_seed(123);
        let mut b = DiceRoller::from_seed(123);
        for _ in 0..50 {
            assert_eq!(a.roll(), b.roll());
        }
    }
}
