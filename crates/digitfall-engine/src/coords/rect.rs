use super::Vec2;

/// Axis-aligned rectangle in logical pixels (top-left origin).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { origin: Vec2::new(x, y), size: Vec2::new(w, h) }
    }

    /// Rect of `size` centred on `center`.
    #[inline]
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self { origin: center - size * 0.5, size }
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        self.origin + self.size
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        self.origin + self.size * 0.5
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    /// Width/height made non-negative, moving the origin as needed.
    #[inline]
    pub fn normalized(self) -> Self {
        let (mut x, mut y) = (self.origin.x, self.origin.y);
        let (mut w, mut h) = (self.size.x, self.size.y);
        if w < 0.0 {
            x += w;
            w = -w;
        }
        if h < 0.0 {
            y += h;
            h = -h;
        }
        Rect::new(x, y, w, h)
    }

    /// Shrinks every edge by `d`; never produces a negative size.
    #[inline]
    pub fn inset(self, d: f32) -> Self {
        let r = self.normalized();
        let w = (r.size.x - 2.0 * d).max(0.0);
        let h = (r.size.y - 2.0 * d).max(0.0);
        Rect::centered(r.center(), Vec2::new(w, h))
    }

    /// Splits horizontally into `n` equal columns separated by `gap`.
    pub fn columns(self, n: usize, gap: f32) -> Vec<Rect> {
        if n == 0 {
            return Vec::new();
        }
        let r = self.normalized();
        let total_gap = gap * (n - 1) as f32;
        let w = ((r.size.x - total_gap) / n as f32).max(0.0);
        (0..n)
            .map(|i| Rect::new(r.origin.x + i as f32 * (w + gap), r.origin.y, w, r.size.y))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::new(x, y, w, h)
    }

    // ── normalized ────────────────────────────────────────────────────────

    #[test]
    fn normalized_positive_is_identity() {
        let rect = r(1.0, 2.0, 10.0, 20.0);
        assert_eq!(rect.normalized(), rect);
    }

    #[test]
    fn normalized_flips_negative_extent() {
        let n = r(10.0, 10.0, -4.0, -3.0).normalized();
        assert_eq!(n, r(6.0, 7.0, 4.0, 3.0));
    }

    // ── centring ──────────────────────────────────────────────────────────

    #[test]
    fn centered_round_trips_center() {
        let rect = Rect::centered(Vec2::new(50.0, 40.0), Vec2::new(20.0, 10.0));
        assert_eq!(rect, r(40.0, 35.0, 20.0, 10.0));
        assert_eq!(rect.center(), Vec2::new(50.0, 40.0));
    }

    #[test]
    fn inset_never_goes_negative() {
        assert_eq!(r(0.0, 0.0, 10.0, 10.0).inset(2.0), r(2.0, 2.0, 6.0, 6.0));
        assert!(r(0.0, 0.0, 4.0, 4.0).inset(3.0).is_empty());
    }

    // ── columns ───────────────────────────────────────────────────────────

    #[test]
    fn columns_split_evenly_with_gaps() {
        let cols = r(0.0, 0.0, 100.0, 20.0).columns(4, 4.0);
        assert_eq!(cols.len(), 4);
        assert_eq!(cols[0], r(0.0, 0.0, 22.0, 20.0));
        assert_eq!(cols[3].max().x, 100.0);
    }

    #[test]
    fn zero_columns_is_empty() {
        assert!(r(0.0, 0.0, 100.0, 20.0).columns(0, 4.0).is_empty());
    }

    #[test]
    fn is_empty_zero_size() {
        assert!(r(0.0, 0.0, 0.0, 5.0).is_empty());
        assert!(!r(0.0, 0.0, 1.0, 1.0).is_empty());
    }
}
