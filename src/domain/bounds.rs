/// Bounding box as reported by a provider, each axis a percentage (0-100)
/// of the image dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PercentBounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PercentBounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Bounding box in the fixed 0-1000 reference frame handed to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelBounds {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl PixelBounds {
    pub fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_wider_than_tall(&self) -> bool {
        self.width > self.height
    }
}
