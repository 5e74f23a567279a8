use log::info;
use rand::Rng;

use super::config::RainConfig;
use super::simulator::ColumnSimulator;
use crate::error::ConfigError;
use crate::schedule::{FrameLoop, Host};
use crate::surface::DrawSurface;

/// A mounted rain view: its simulator, its randomness and its frame loop.
#[derive(Debug)]
pub struct RainField<R> {
    sim: ColumnSimulator,
    rng: R,
    frames: FrameLoop,
}

impl<R: Rng> RainField<R> {
    pub fn new(config: RainConfig, rng: R) -> Result<Self, ConfigError> {
        Ok(Self { sim: ColumnSimulator::new(config)?, rng, frames: FrameLoop::new() })
    }

    pub fn mount(&mut self, width: f32, height: f32, host: &mut impl Host) {
        self.sim.initialize(width, height, &mut self.rng);
        self.frames.start(host);
        info!("rain mounted: {} columns", self.sim.columns().len());
    }

    /// One animation frame. Returns `false` when the field is not mounted.
    pub fn advance(&mut self, host: &mut impl Host) -> bool {
        if !self.frames.on_frame(host) {
            return false;
        }
        self.sim.step(1.0, &mut self.rng);
        true
    }

    pub fn draw(&self, surface: &mut impl DrawSurface) {
        self.sim.draw(surface);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.sim.resize(width, height, &mut self.rng);
        info!("rain reinitialized for {width}x{height}: {} columns", self.sim.columns().len());
    }

    pub fn unmount(&mut self) {
        if self.frames.is_running() {
            info!("rain unmounted after {} frames", self.frames.frames());
        }
        self.frames.stop();
    }

    #[inline]
    pub fn simulator(&self) -> &ColumnSimulator {
        &self.sim
    }

    #[inline]
    pub fn is_mounted(&self) -> bool {
        self.frames.is_running()
    }
}

impl<R> Drop for RainField<R> {
    fn drop(&mut self) {
        self.frames.stop();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[derive(Default)]
    struct Frames(usize);

    impl Host for Frames {
        fn request_frame(&mut self) {
            self.0 += 1;
        }
        fn wake_at(&mut self, _: Instant) {}
    }

    #[test]
    fn unmounted_field_does_not_step() {
        let mut host = Frames::default();
        let mut field = RainField::new(RainConfig::rain(), StdRng::seed_from_u64(1)).unwrap();
        assert!(!field.advance(&mut host));
        assert_eq!(host.0, 0);
    }

    #[test]
    fn mount_advance_unmount() {
        let mut host = Frames::default();
        let mut field = RainField::new(RainConfig::rain(), StdRng::seed_from_u64(1)).unwrap();
        field.mount(800.0, 600.0, &mut host);
        assert_eq!(field.simulator().columns().len(), 10);

        let before: Vec<f32> = field.simulator().columns().iter().map(|c| c.position()).collect();
        assert!(field.advance(&mut host));
        let after: Vec<f32> = field.simulator().columns().iter().map(|c| c.position()).collect();
        assert!(before.iter().zip(&after).all(|(b, a)| a > b));
        assert_eq!(host.0, 2);

        field.unmount();
        assert!(!field.advance(&mut host));
        assert_eq!(host.0, 2);
        assert!(!field.is_mounted());
    }

    #[test]
    fn resize_reinitializes_columns() {
        let mut host = Frames::default();
        let mut field = RainField::new(RainConfig::matrix(), StdRng::seed_from_u64(2)).unwrap();
        field.mount(200.0, 400.0, &mut host);
        assert_eq!(field.simulator().columns().len(), 10);
        field.resize(300.0, 400.0);
        assert_eq!(field.simulator().columns().len(), 15);
    }
}
