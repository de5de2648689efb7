/// Which image of a listing is showing. The auto-advance timer only ever
/// increments; the position is taken modulo the image count when rendered,
/// so one carousel can drive several listings with different image counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Carousel {
    index: usize,
}

impl Carousel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self) {
        self.index = self.index.wrapping_add(1);
    }

    /// Position within `len` images; 0 when there are none.
    pub fn position(&self, len: usize) -> usize {
        if len == 0 { 0 } else { self.index % len }
    }

    pub fn next(&mut self, len: usize) {
        self.index = if len == 0 { 0 } else { (self.position(len) + 1) % len };
    }

    pub fn previous(&mut self, len: usize) {
        self.index = match self.position(len) {
            _ if len == 0 => 0,
            0 => len - 1,
            pos => pos - 1,
        };
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_wraps_per_listing() {
        let mut carousel = Carousel::new();
        for _ in 0..5 {
            carousel.tick();
        }
        assert_eq!(carousel.position(2), 1);
        assert_eq!(carousel.position(3), 2);
        assert_eq!(carousel.position(0), 0);
    }

    #[test]
    fn test_manual_navigation_wraps() {
        let mut carousel = Carousel::new();
        carousel.previous(4);
        assert_eq!(carousel.position(4), 3);
        carousel.next(4);
        assert_eq!(carousel.position(4), 0);
        carousel.next(0);
        assert_eq!(carousel.position(4), 0);
    }
}
