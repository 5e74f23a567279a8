use rand::Rng;

use super::config::{FixedLane, RainConfig, ResetPolicy};

/// One falling stream of digits.
///
/// `position` is the scroll-axis coordinate of the first symbol; later
/// symbols trail below it at the configured spacing. `lane` never changes
/// for the lifetime of the column, across resets included.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    position: f32,
    velocity: f32,
    symbols: Vec<u8>,
    highlight: usize,
    lane: f32,
}

impl Column {
    /// `highlight` is clamped into the sequence; an empty sequence becomes `[0]`.
    pub fn new(lane: f32, position: f32, velocity: f32, mut symbols: Vec<u8>, highlight: usize) -> Self {
        if symbols.is_empty() {
            symbols.push(0);
        }
        let highlight = highlight.min(symbols.len() - 1);
        Self { position, velocity, symbols, highlight, lane }
    }

    /// Fresh column in `lane` with everything else drawn from `config`.
    pub fn spawn<R: Rng + ?Sized>(config: &RainConfig, lane: f32, position: f32, rng: &mut R) -> Self {
        let symbols = random_symbols(config, rng);
        let highlight = rng.random_range(0..symbols.len());
        Self { position, velocity: config.velocity.sample(rng), symbols, highlight, lane }
    }

    pub fn fixed(lane: f32, spec: &FixedLane, position: f32) -> Self {
        Self::new(lane, position, spec.velocity, spec.symbols.clone(), spec.highlight)
    }

    /// The column this one becomes after leaving the visible area.
    pub fn reset<R: Rng + ?Sized>(&self, config: &RainConfig, rng: &mut R) -> Column {
        let position = config.reset_offset.sample(rng);
        match config.reset_policy {
            ResetPolicy::Reseed => Column::spawn(config, self.lane, position, rng),
            ResetPolicy::RerollHighlight { probability } => {
                let highlight = if rng.random_bool(probability as f64) {
                    rng.random_range(0..self.symbols.len())
                } else {
                    self.highlight
                };
                Column { position, highlight, symbols: self.symbols.clone(), ..*self }
            }
        }
    }

    #[inline]
    pub(crate) fn advance(&mut self, by: f32) {
        self.position += self.velocity * by;
    }

    #[inline]
    pub fn position(&self) -> f32 {
        self.position
    }

    #[inline]
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    #[inline]
    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    #[inline]
    pub fn highlight(&self) -> usize {
        self.highlight
    }

    #[inline]
    pub fn lane(&self) -> f32 {
        self.lane
    }
}

fn random_symbols<R: Rng + ?Sized>(config: &RainConfig, rng: &mut R) -> Vec<u8> {
    let len = rng.random_range(config.symbol_count.clone());
    (0..len).map(|_| rng.random_range(0..=9u8)).collect()
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn spawn_respects_config() {
        let config = RainConfig::matrix();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..500 {
            let c = Column::spawn(&config, 10.0, -20.0, &mut rng);
            assert!(config.symbol_count.contains(&c.symbols().len()));
            assert!(c.highlight() < c.symbols().len());
            assert!(c.symbols().iter().all(|&s| s <= 9));
            assert!(config.velocity.contains(c.velocity()));
            assert_eq!(c.lane(), 10.0);
        }
    }

    #[test]
    fn reseed_reset_draws_everything_fresh() {
        let config = RainConfig::rain();
        let mut rng = StdRng::seed_from_u64(5);
        let mut c = Column::spawn(&config, 120.0, 0.0, &mut rng);
        for _ in 0..200 {
            let next = c.reset(&config, &mut rng);
            assert!(next.position() < 0.0);
            assert_eq!(next.lane(), 120.0);
            assert!(config.velocity.contains(next.velocity()));
            assert!(next.highlight() < next.symbols().len());
            c = next;
        }
    }

    #[test]
    fn reroll_reset_keeps_sequence_and_velocity() {
        let config = RainConfig::exact();
        let mut rng = StdRng::seed_from_u64(9);
        let c = Column::new(300.0, 900.0, 1.3, vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 1, 2], 5);
        let mut moved = 0;
        for _ in 0..200 {
            let next = c.reset(&config, &mut rng);
            assert_eq!(next.position(), -200.0);
            assert_eq!(next.velocity(), 1.3);
            assert_eq!(next.symbols(), c.symbols());
            assert_eq!(next.lane(), 300.0);
            if next.highlight() != 5 {
                moved += 1;
            }
        }
        // p = 0.3 re-roll, landing elsewhere 11/12 of the time
        assert!(moved > 20 && moved < 100, "moved {moved} times");
    }

    #[test]
    fn new_clamps_highlight() {
        let c = Column::new(0.0, 0.0, 1.0, vec![1, 2, 3], 9);
        assert_eq!(c.highlight(), 2);
        let c = Column::new(0.0, 0.0, 1.0, Vec::new(), 0);
        assert_eq!(c.symbols(), &[0]);
    }

    #[test]
    fn reset_is_pure() {
        let config = RainConfig::rain();
        let c = Column::new(40.0, 1234.0, 2.0, vec![1, 2, 3, 4], 1);
        let snapshot = c.clone();
        let _ = c.reset(&config, &mut StdRng::seed_from_u64(1));
        assert_eq!(c, snapshot);
    }
}
