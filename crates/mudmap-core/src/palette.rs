//! Color assignment policies for new layers.
//!
//! A layer's color is chosen once, by whoever creates the layer, and never
//! changes. The policy is passed in explicitly so that layout and rendering
//! stay deterministic for a given tower.

use log::trace;
use rand::Rng;

use crate::color::Color;

/// Golden angle in degrees; successive hues stepped by it stay well apart.
const GOLDEN_ANGLE: f32 = 137.507_77;

/// Supplies colors for newly created layers.
pub trait ColorPolicy {
    /// Returns the color for the next layer.
    fn next_color(&mut self) -> Color;
}

/// Picks a uniformly random hue for each layer.
///
/// The random source is injected, so a seeded generator gives a
/// reproducible sequence.
#[derive(Debug, Clone)]
pub struct RandomHue<R> {
    rng: R,
}

impl<R: Rng> RandomHue<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomHue<rand::rngs::ThreadRng> {
    /// Creates a policy backed by the thread-local generator.
    pub fn from_thread_rng() -> Self {
        Self::new(rand::rng())
    }
}

impl<R: Rng> ColorPolicy for RandomHue<R> {
    fn next_color(&mut self) -> Color {
        let hue: f32 = self.rng.random_range(0.0..360.0);
        trace!(hue; "Random layer hue");
        Color::from_hue(hue)
    }
}

/// Steps the hue by the golden angle for each layer.
///
/// Fully deterministic: the n-th color depends only on the starting hue.
#[derive(Debug, Clone, Default)]
pub struct GoldenAngleHue {
    hue: f32,
}

impl GoldenAngleHue {
    /// Creates a policy whose first color has the given hue.
    pub fn starting_at(hue: f32) -> Self {
        Self { hue }
    }
}

impl ColorPolicy for GoldenAngleHue {
    fn next_color(&mut self) -> Color {
        let color = Color::from_hue(self.hue);
        trace!(hue = self.hue; "Golden angle layer hue");
        self.hue = (self.hue + GOLDEN_ANGLE).rem_euclid(360.0);
        color
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn test_golden_angle_is_deterministic() {
        let mut first = GoldenAngleHue::default();
        let mut second = GoldenAngleHue::default();

        for _ in 0..10 {
            assert_eq!(first.next_color(), second.next_color());
        }
    }

    #[test]
    fn test_golden_angle_starts_at_hue() {
        let mut policy = GoldenAngleHue::starting_at(200.0);
        assert_eq!(policy.next_color(), Color::from_hue(200.0));
        assert_ne!(policy.next_color(), Color::from_hue(200.0));
    }

    #[test]
    fn test_golden_angle_colors_differ() {
        let mut policy = GoldenAngleHue::default();
        let colors: Vec<Color> = (0..5).map(|_| policy.next_color()).collect();

        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_random_hue_seeded_is_reproducible() {
        let mut first = RandomHue::new(ChaCha8Rng::seed_from_u64(42));
        let mut second = RandomHue::new(ChaCha8Rng::seed_from_u64(42));

        for _ in 0..5 {
            assert_eq!(first.next_color(), second.next_color());
        }
    }

    #[test]
    fn test_random_hue_colors_are_opaque() {
        let mut policy = RandomHue::from_thread_rng();
        let color = policy.next_color();
        assert!((color.alpha() - 1.0).abs() < 0.001);
    }
}
