use std::ops::RangeInclusive;

use rand::Rng;

use super::highlight::Falloff;
use crate::error::ConfigError;

/// Closed interval of `f32`, sampled uniformly.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub const fn exactly(v: f32) -> Self {
        Self { min: v, max: v }
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        if self.max > self.min {
            rng.random_range(self.min..=self.max)
        } else {
            self.min
        }
    }

    #[inline]
    pub fn contains(&self, v: f32) -> bool {
        v >= self.min && v <= self.max
    }
}

/// Where a column starts when the simulator (re)initializes.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SpawnDepth {
    /// Uniform in `[-depth, 0]`.
    Uniform(f32),
    /// Uniform in `[-visible height, 0]`.
    ViewHeight,
    /// Every column starts at this position.
    At(f32),
}

impl SpawnDepth {
    pub fn sample<R: Rng + ?Sized>(&self, height: f32, rng: &mut R) -> f32 {
        match *self {
            SpawnDepth::Uniform(depth) => -Span::new(0.0, depth).sample(rng),
            SpawnDepth::ViewHeight => -Span::new(0.0, height.max(0.0)).sample(rng),
            SpawnDepth::At(y) => y,
        }
    }
}

/// What a column keeps when it wraps around.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ResetPolicy {
    /// Fresh velocity, sequence and highlight.
    Reseed,
    /// Keep velocity and sequence; move the highlight with `probability`.
    RerollHighlight { probability: f32 },
}

/// A hand-placed lane with a fixed sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedLane {
    /// Cross-axis position as a fraction of the visible width.
    pub fraction: f32,
    pub velocity: f32,
    pub symbols: Vec<u8>,
    pub highlight: usize,
}

impl FixedLane {
    pub fn new(fraction: f32, velocity: f32, symbols: &[u8], highlight: usize) -> Self {
        Self { fraction, velocity, symbols: symbols.to_vec(), highlight }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LaneLayout {
    /// One lane every `lane_width`, centred in its slot.
    Uniform,
    Fixed(Vec<FixedLane>),
}

/// Constants of one rain preset.
#[derive(Debug, Clone, PartialEq)]
pub struct RainConfig {
    pub lane_width: f32,
    /// Distance past the bottom edge a column travels before it resets.
    pub reset_margin: f32,
    pub velocity: Span,
    pub symbol_count: RangeInclusive<usize>,
    /// Post-reset position; strictly negative.
    pub reset_offset: Span,
    pub spawn_depth: SpawnDepth,
    pub glyph_spacing: f32,
    /// Glyphs further than this outside the visible area are not drawn.
    pub cull_margin: f32,
    pub disc_radius: f32,
    pub background_alpha: f32,
    pub falloff: Falloff,
    pub reset_policy: ResetPolicy,
    pub layout: LaneLayout,
}

impl RainConfig {
    /// Sparse grey rain with a long trail.
    pub fn rain() -> Self {
        Self {
            lane_width: 80.0,
            reset_margin: 200.0,
            velocity: Span::new(1.0, 3.0),
            symbol_count: 4..=11,
            reset_offset: Span::exactly(-200.0),
            spawn_depth: SpawnDepth::Uniform(500.0),
            glyph_spacing: 30.0,
            cull_margin: 30.0,
            disc_radius: 20.0,
            background_alpha: 0.1,
            falloff: Falloff::Positional { step: 0.1, floor: 0.3 },
            reset_policy: ResetPolicy::Reseed,
            layout: LaneLayout::Uniform,
        }
    }

    /// Six hand-placed columns on an opaque background.
    pub fn exact() -> Self {
        Self {
            lane_width: 80.0,
            reset_margin: 200.0,
            velocity: Span::new(1.2, 1.8),
            symbol_count: 6..=12,
            reset_offset: Span::exactly(-200.0),
            spawn_depth: SpawnDepth::At(0.0),
            glyph_spacing: 40.0,
            cull_margin: 50.0,
            disc_radius: 22.0,
            background_alpha: 1.0,
            falloff: Falloff::Distance { step: 0.15, floor: 0.1 },
            reset_policy: ResetPolicy::RerollHighlight { probability: 0.3 },
            layout: LaneLayout::Fixed(vec![
                FixedLane::new(0.20, 1.5, &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9], 0),
                FixedLane::new(0.35, 1.2, &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9], 4),
                FixedLane::new(0.45, 1.8, &[0, 1, 2, 3, 4, 5, 6], 2),
                FixedLane::new(0.55, 1.3, &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 1, 2], 5),
                FixedLane::new(0.65, 1.6, &[3, 4, 5, 6, 7, 8], 2),
                FixedLane::new(0.80, 1.4, &[4, 5, 6, 7, 8, 9], 5),
            ]),
        }
    }

    /// Dense narrow lanes, long streams, faint trail.
    pub fn matrix() -> Self {
        Self {
            lane_width: 20.0,
            reset_margin: 100.0,
            velocity: Span::new(1.0, 4.0),
            symbol_count: 5..=19,
            reset_offset: Span::new(-200.0, -1.0),
            spawn_depth: SpawnDepth::ViewHeight,
            glyph_spacing: 25.0,
            cull_margin: 30.0,
            disc_radius: 15.0,
            background_alpha: 0.05,
            falloff: Falloff::Positional { step: 0.08, floor: 0.1 },
            reset_policy: ResetPolicy::Reseed,
            layout: LaneLayout::Uniform,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("lane_width", self.lane_width)?;
        non_negative("reset_margin", self.reset_margin)?;
        positive("velocity.min", self.velocity.min)?;
        ordered("velocity", self.velocity)?;

        let (lo, hi) = (*self.symbol_count.start(), *self.symbol_count.end());
        if lo == 0 || lo > hi {
            return Err(ConfigError::SymbolCount { min: lo, max: hi });
        }

        ordered("reset_offset", self.reset_offset)?;
        if !(self.reset_offset.max < 0.0) {
            return Err(ConfigError::ResetOffsetNotAbove { max: self.reset_offset.max });
        }

        match self.spawn_depth {
            SpawnDepth::Uniform(depth) => non_negative("spawn_depth", depth)?,
            SpawnDepth::ViewHeight => {}
            SpawnDepth::At(y) => non_negative("spawn_depth", -y)?,
        }

        positive("glyph_spacing", self.glyph_spacing)?;
        non_negative("cull_margin", self.cull_margin)?;
        non_negative("disc_radius", self.disc_radius)?;
        unit("background_alpha", self.background_alpha)?;

        let (step, floor) = self.falloff.params();
        non_negative("falloff.step", step)?;
        unit("falloff.floor", floor)?;

        if let ResetPolicy::RerollHighlight { probability } = self.reset_policy {
            unit("reset_policy.probability", probability)?;
        }

        if let LaneLayout::Fixed(lanes) = &self.layout {
            for (index, lane) in lanes.iter().enumerate() {
                validate_lane(index, lane, self.velocity)?;
            }
        }
        Ok(())
    }
}

fn validate_lane(index: usize, lane: &FixedLane, velocity: Span) -> Result<(), ConfigError> {
    let fail = |reason: &'static str| -> Result<(), ConfigError> {
        Err(ConfigError::FixedLane { index, reason })
    };
    if !(0.0..=1.0).contains(&lane.fraction) {
        return fail("fraction outside [0, 1]");
    }
    if !velocity.contains(lane.velocity) {
        return fail("velocity outside the configured range");
    }
    if lane.symbols.is_empty() {
        return fail("empty symbol sequence");
    }
    if lane.symbols.iter().any(|&s| s > 9) {
        return fail("symbol is not a single digit");
    }
    if lane.highlight >= lane.symbols.len() {
        return fail("highlight index past the sequence");
    }
    Ok(())
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

fn unit(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfUnitRange { field, value })
    }
}

fn ordered(field: &'static str, span: Span) -> Result<(), ConfigError> {
    if span.min.is_finite() && span.max.is_finite() && span.min <= span.max {
        Ok(())
    } else {
        Err(ConfigError::InvertedRange { field, min: span.min, max: span.max })
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn presets_validate() {
        RainConfig::rain().validate().unwrap();
        RainConfig::exact().validate().unwrap();
        RainConfig::matrix().validate().unwrap();
    }

    #[test]
    fn zero_velocity_is_rejected() {
        let mut c = RainConfig::rain();
        c.velocity = Span::new(0.0, 2.0);
        assert_eq!(
            c.validate(),
            Err(ConfigError::NotPositive { field: "velocity.min", value: 0.0 })
        );
    }

    #[test]
    fn inverted_velocity_is_rejected() {
        let mut c = RainConfig::rain();
        c.velocity = Span::new(3.0, 1.0);
        assert!(matches!(c.validate(), Err(ConfigError::InvertedRange { field: "velocity", .. })));
    }

    #[test]
    fn reset_offset_must_be_above_view() {
        let mut c = RainConfig::matrix();
        c.reset_offset = Span::new(-200.0, 0.0);
        assert_eq!(c.validate(), Err(ConfigError::ResetOffsetNotAbove { max: 0.0 }));
    }

    #[test]
    fn empty_symbol_count_is_rejected() {
        let mut c = RainConfig::rain();
        c.symbol_count = 0..=3;
        assert!(matches!(c.validate(), Err(ConfigError::SymbolCount { min: 0, max: 3 })));
    }

    #[test]
    fn fixed_lane_highlight_must_be_in_sequence() {
        let mut c = RainConfig::exact();
        if let LaneLayout::Fixed(lanes) = &mut c.layout {
            lanes[2].highlight = 7;
        }
        assert!(matches!(c.validate(), Err(ConfigError::FixedLane { index: 2, .. })));
    }

    #[test]
    fn reroll_probability_in_unit_range() {
        let mut c = RainConfig::exact();
        c.reset_policy = ResetPolicy::RerollHighlight { probability: 1.5 };
        assert!(matches!(c.validate(), Err(ConfigError::OutOfUnitRange { .. })));
    }

    #[test]
    fn span_samples_within_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let s = Span::new(1.0, 4.0);
        for _ in 0..1000 {
            assert!(s.contains(s.sample(&mut rng)));
        }
        assert_eq!(Span::exactly(-200.0).sample(&mut rng), -200.0);
    }

    #[test]
    fn spawn_depth_is_never_below_zero() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let y = SpawnDepth::ViewHeight.sample(600.0, &mut rng);
            assert!((-600.0..=0.0).contains(&y));
            let y = SpawnDepth::Uniform(500.0).sample(600.0, &mut rng);
            assert!((-500.0..=0.0).contains(&y));
        }
        assert_eq!(SpawnDepth::At(0.0).sample(600.0, &mut rng), 0.0);
    }
}
