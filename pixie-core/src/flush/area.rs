//! Rectangular screen regions

/// Rectangle with inclusive corner coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Area {
    pub x1: u16,
    pub y1: u16,
    pub x2: u16,
    pub y2: u16,
}

impl Area {
    /// Create an area from inclusive corners
    ///
    /// Corners are normalised so that `x1 <= x2` and `y1 <= y2`.
    pub const fn new(x1: u16, y1: u16, x2: u16, y2: u16) -> Self {
        let (x1, x2) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        let (y1, y2) = if y1 <= y2 { (y1, y2) } else { (y2, y1) };
        Self { x1, y1, x2, y2 }
    }

    /// Create an area from its top-left corner and size
    ///
    /// Returns `None` for an empty size or a size that overflows the
    /// coordinate range.
    pub fn with_size(x: u16, y: u16, width: u16, height: u16) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        let x2 = x.checked_add(width - 1)?;
        let y2 = y.checked_add(height - 1)?;
        Some(Self::new(x, y, x2, y2))
    }

    pub fn width(&self) -> u16 {
        self.x2 - self.x1 + 1
    }

    pub fn height(&self) -> u16 {
        self.y2 - self.y1 + 1
    }

    /// Number of pixels covered
    pub fn pixel_count(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    /// Check if the area lies inside a `width` x `height` screen
    pub fn fits_within(&self, width: u16, height: u16) -> bool {
        self.x2 < width && self.y2 < height
    }

    /// Smallest area covering both
    pub fn union(&self, other: &Area) -> Area {
        Area {
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
            x2: self.x2.max(other.x2),
            y2: self.y2.max(other.y2),
        }
    }

    /// Check if the two areas share at least one pixel
    pub fn intersects(&self, other: &Area) -> bool {
        self.x1 <= other.x2 && other.x1 <= self.x2 && self.y1 <= other.y2 && other.y1 <= self.y2
    }

    /// Check if a point lies inside the area
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x1 && x <= self.x2 && y >= self.y1 && y <= self.y2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions() {
        let area = Area::new(0, 0, 9, 9);
        assert_eq!(area.width(), 10);
        assert_eq!(area.height(), 10);
        assert_eq!(area.pixel_count(), 100);
    }

    #[test]
    fn test_corners_normalised() {
        let area = Area::new(9, 4, 2, 1);
        assert_eq!(area, Area::new(2, 1, 9, 4));
    }

    #[test]
    fn test_with_size() {
        assert_eq!(Area::with_size(5, 5, 60, 20), Some(Area::new(5, 5, 64, 24)));
        assert_eq!(Area::with_size(0, 0, 0, 10), None);
        assert_eq!(Area::with_size(u16::MAX, 0, 2, 1), None);
    }

    #[test]
    fn test_fits_within() {
        assert!(Area::new(0, 0, 159, 79).fits_within(160, 80));
        assert!(!Area::new(0, 0, 160, 79).fits_within(160, 80));
        assert!(!Area::new(0, 70, 10, 80).fits_within(160, 80));
    }

    #[test]
    fn test_union_and_intersects() {
        let a = Area::new(5, 5, 64, 24);
        let b = Area::new(5, 30, 64, 49);
        assert!(!a.intersects(&b));
        assert_eq!(a.union(&b), Area::new(5, 5, 64, 49));
        assert!(a.union(&b).intersects(&b));
        assert!(a.contains(5, 24));
        assert!(!a.contains(65, 10));
    }
}
