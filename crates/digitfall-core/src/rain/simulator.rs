use log::{debug, trace};
use rand::Rng;

use super::column::Column;
use super::config::{LaneLayout, RainConfig};
use super::highlight::HighlightModel;
use crate::error::ConfigError;
use crate::surface::DrawSurface;

/// A symbol ready to draw.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GlyphPlacement {
    pub symbol: u8,
    pub x: f32,
    pub y: f32,
    pub opacity: f32,
    pub emphasized: bool,
}

/// Owns the columns of one rain view.
#[derive(Debug, Clone)]
pub struct ColumnSimulator {
    config: RainConfig,
    highlight: HighlightModel,
    columns: Vec<Column>,
    width: f32,
    height: f32,
}

impl ColumnSimulator {
    pub fn new(config: RainConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            highlight: HighlightModel::new(config.falloff),
            config,
            columns: Vec::new(),
            width: 0.0,
            height: 0.0,
        })
    }

    /// Simulator over explicit columns; the visible area is `width × height`.
    pub fn with_columns(
        config: RainConfig,
        width: f32,
        height: f32,
        columns: Vec<Column>,
    ) -> Result<Self, ConfigError> {
        let mut sim = Self::new(config)?;
        sim.width = width;
        sim.height = height;
        sim.columns = columns;
        Ok(sim)
    }

    /// Replaces the whole column set for a `width × height` visible area.
    ///
    /// Uniform layouts get `floor(width / lane_width)` lanes centred in their
    /// slots; fixed layouts place their lanes at fractions of `width`.
    pub fn initialize<R: Rng + ?Sized>(&mut self, width: f32, height: f32, rng: &mut R) {
        let width = width.max(0.0);
        let height = height.max(0.0);
        let config = &self.config;

        let columns = match &config.layout {
            LaneLayout::Uniform => {
                let count = (width / config.lane_width).floor() as usize;
                (0..count)
                    .map(|i| {
                        let lane = i as f32 * config.lane_width + config.lane_width / 2.0;
                        let y = config.spawn_depth.sample(height, rng);
                        Column::spawn(config, lane, y, rng)
                    })
                    .collect()
            }
            LaneLayout::Fixed(lanes) => lanes
                .iter()
                .map(|spec| {
                    let y = config.spawn_depth.sample(height, rng);
                    Column::fixed(width * spec.fraction, spec, y)
                })
                .collect(),
        };

        self.columns = columns;
        self.width = width;
        self.height = height;
        debug!("rain initialized: {} columns over {width}x{height}", self.columns.len());
    }

    /// Discards in-flight state and reinitializes for the visible area, even
    /// when the size did not change.
    pub fn resize<R: Rng + ?Sized>(&mut self, width: f32, height: f32, rng: &mut R) {
        self.initialize(width, height, rng);
    }

    /// Advances every column by `velocity * advance` and recycles those past
    /// the bottom margin. Returns how many columns reset.
    ///
    /// `advance` must be positive; positions only ever move down.
    pub fn step<R: Rng + ?Sized>(&mut self, advance: f32, rng: &mut R) -> usize {
        debug_assert!(advance > 0.0, "step advance must be positive, got {advance}");
        let limit = self.height + self.config.reset_margin;
        let mut resets = 0;
        for column in &mut self.columns {
            column.advance(advance);
            if column.position() > limit {
                let next = column.reset(&self.config, rng);
                trace!(
                    "column at x={} reset: y={:.1} v={:.2} len={}",
                    next.lane(),
                    next.position(),
                    next.velocity(),
                    next.symbols().len()
                );
                *column = next;
                resets += 1;
            }
        }
        resets
    }

    #[inline]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    #[inline]
    pub fn config(&self) -> &RainConfig {
        &self.config
    }

    #[inline]
    pub fn highlight_model(&self) -> &HighlightModel {
        &self.highlight
    }

    #[inline]
    pub fn visible_size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// Snapshot of every symbol inside the visible area plus the cull margin.
    pub fn glyphs(&self) -> impl Iterator<Item = GlyphPlacement> + '_ {
        let cull = self.config.cull_margin;
        let spacing = self.config.glyph_spacing;
        let (top, bottom) = (-cull, self.height + cull);

        self.columns.iter().flat_map(move |column| {
            column.symbols().iter().enumerate().filter_map(move |(index, &symbol)| {
                let y = column.position() + index as f32 * spacing;
                if y <= top || y >= bottom {
                    return None;
                }
                Some(GlyphPlacement {
                    symbol,
                    x: column.lane(),
                    y,
                    opacity: self.highlight.opacity(column, index),
                    emphasized: self.highlight.is_emphasized(column, index),
                })
            })
        })
    }

    /// Issues one frame: background, then each glyph (with its disc when emphasized).
    pub fn draw(&self, surface: &mut impl DrawSurface) {
        surface.fill_background(self.config.background_alpha);
        for g in self.glyphs() {
            if g.emphasized {
                surface.draw_highlight_disc(g.x, g.y, self.config.disc_radius);
            }
            surface.draw_glyph(g.symbol, g.x, g.y, g.opacity, g.emphasized);
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[derive(Default)]
    struct Recorder {
        backgrounds: Vec<f32>,
        glyphs: Vec<(u8, f32, f32, f32, bool)>,
        discs: Vec<(f32, f32, f32)>,
    }

    impl DrawSurface for Recorder {
        fn fill_background(&mut self, alpha: f32) {
            self.backgrounds.push(alpha);
        }
        fn draw_glyph(&mut self, symbol: u8, x: f32, y: f32, opacity: f32, emphasized: bool) {
            self.glyphs.push((symbol, x, y, opacity, emphasized));
        }
        fn draw_highlight_disc(&mut self, x: f32, y: f32, radius: f32) {
            self.discs.push((x, y, radius));
        }
    }

    #[test]
    fn uniform_lane_count_and_centres() {
        let mut sim = ColumnSimulator::new(RainConfig::rain()).unwrap();
        sim.initialize(1000.0, 700.0, &mut StdRng::seed_from_u64(1));
        assert_eq!(sim.columns().len(), 12);
        let lanes: Vec<f32> = sim.columns().iter().map(Column::lane).collect();
        assert_eq!(lanes[0], 40.0);
        assert_eq!(lanes[11], 920.0);
        assert!(sim.columns().iter().all(|c| (-500.0..=0.0).contains(&c.position())));
    }

    #[test]
    fn narrow_view_has_no_columns() {
        let mut sim = ColumnSimulator::new(RainConfig::rain()).unwrap();
        sim.initialize(79.0, 700.0, &mut StdRng::seed_from_u64(1));
        assert!(sim.columns().is_empty());
        assert_eq!(sim.step(1.0, &mut StdRng::seed_from_u64(1)), 0);
    }

    #[test]
    fn fixed_layout_places_lanes_by_fraction() {
        let mut sim = ColumnSimulator::new(RainConfig::exact()).unwrap();
        sim.initialize(1000.0, 800.0, &mut StdRng::seed_from_u64(1));
        let lanes: Vec<f32> = sim.columns().iter().map(Column::lane).collect();
        assert_eq!(lanes, vec![200.0, 350.0, 450.0, 550.0, 650.0, 800.0]);
        assert!(sim.columns().iter().all(|c| c.position() == 0.0));
    }

    #[test]
    fn positions_increase_until_reset() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut sim = ColumnSimulator::new(RainConfig::matrix()).unwrap();
        sim.initialize(400.0, 300.0, &mut rng);
        let lanes: Vec<f32> = sim.columns().iter().map(Column::lane).collect();

        for _ in 0..2000 {
            let before: Vec<f32> = sim.columns().iter().map(Column::position).collect();
            sim.step(1.0, &mut rng);
            for (b, c) in before.iter().zip(sim.columns()) {
                assert!(c.position() > *b || c.position() < 0.0);
            }
        }
        let after: Vec<f32> = sim.columns().iter().map(Column::lane).collect();
        assert_eq!(lanes, after);
    }

    #[test]
    fn resize_discards_state() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut sim = ColumnSimulator::new(RainConfig::rain()).unwrap();
        sim.initialize(800.0, 600.0, &mut rng);
        for _ in 0..50 {
            sim.step(1.0, &mut rng);
        }
        sim.resize(400.0, 600.0, &mut rng);
        assert_eq!(sim.columns().len(), 5);
        assert_eq!(sim.visible_size(), (400.0, 600.0));
    }

    #[test]
    fn same_size_resize_still_reinitializes() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut sim = ColumnSimulator::new(RainConfig::rain()).unwrap();
        sim.initialize(800.0, 600.0, &mut rng);
        for _ in 0..37 {
            sim.step(1.0, &mut rng);
        }
        let stepped: Vec<f32> = sim.columns().iter().map(Column::position).collect();

        let mut fresh_rng = rng.clone();
        sim.resize(800.0, 600.0, &mut rng);
        let mut fresh = ColumnSimulator::new(RainConfig::rain()).unwrap();
        fresh.initialize(800.0, 600.0, &mut fresh_rng);

        let resized: Vec<f32> = sim.columns().iter().map(Column::position).collect();
        let expected: Vec<f32> = fresh.columns().iter().map(Column::position).collect();
        assert_eq!(resized, expected);
        assert_ne!(resized, stepped);
        assert!(resized.iter().all(|y| (-500.0..=0.0).contains(y)));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "step advance must be positive")]
    fn non_positive_advance_is_rejected() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut sim = ColumnSimulator::new(RainConfig::rain()).unwrap();
        sim.initialize(800.0, 600.0, &mut rng);
        sim.step(0.0, &mut rng);
    }

    #[test]
    fn draw_emits_disc_for_each_visible_highlight() {
        let config = RainConfig::rain();
        let column = Column::new(40.0, 100.0, 1.0, vec![3, 1, 4, 1, 5], 2);
        let sim = ColumnSimulator::with_columns(config, 80.0, 600.0, vec![column]).unwrap();

        let mut rec = Recorder::default();
        sim.draw(&mut rec);

        assert_eq!(rec.backgrounds, vec![0.1]);
        assert_eq!(rec.glyphs.len(), 5);
        assert_eq!(rec.discs, vec![(40.0, 160.0, 20.0)]);
        let (symbol, _, y, opacity, emphasized) = rec.glyphs[2];
        assert_eq!((symbol, y, opacity, emphasized), (4, 160.0, 1.0, true));
        assert!(rec.glyphs.iter().filter(|g| g.4).count() == 1);
    }

    #[test]
    fn glyphs_outside_cull_margin_are_skipped() {
        let config = RainConfig::rain();
        // spacing 30: y = -60, -30, 0, 30
        let column = Column::new(40.0, -60.0, 1.0, vec![1, 2, 3, 4], 0);
        let sim = ColumnSimulator::with_columns(config, 80.0, 600.0, vec![column]).unwrap();
        let ys: Vec<f32> = sim.glyphs().map(|g| g.y).collect();
        assert_eq!(ys, vec![0.0, 30.0]);
    }

    #[test]
    fn invalid_config_is_rejected_at_construction() {
        let mut config = RainConfig::rain();
        config.lane_width = 0.0;
        assert!(ColumnSimulator::new(config).is_err());
    }
}
