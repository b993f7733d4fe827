// Core types shared by every module: the pixel buffer, the selection
// shapes, and the occupancy mask a shape rasterizes into.

/// One point in canvas space. Pointer coordinates arrive as floats and the
/// geometry math stays in floats until rasterization.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point (this is how the circle radius
    /// is derived from the pointer).
    pub fn distance(&self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Which selection tool is active. Exactly one at a time; switching tools
/// discards whatever shape was in progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionMode {
    Freehand,
    Rectangle,
    Circle,
}

/// The shape being drawn (or just finished).
/// Rectangle width/height stay signed: a drag up-left gives a negative
/// size, and rasterization normalizes it. Circle radius is never negative.
#[derive(Clone, Debug, PartialEq)]
pub enum SelectionShape {
    /// Pointer trail in draw order; holds at least one point once begun.
    Freehand { path: Vec<Point> },
    Rectangle { origin: Point, width: f32, height: f32 },
    Circle { center: Point, radius: f32 },
}

/// A dense grid of pixels, one `0xAARRGGBB` word each, row-major.
/// minifb ignores the top byte when presenting; the alpha byte is what the
/// compositor keys on. Buffers are never edited in place after capture,
/// every transform builds a new one.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelBuffer {
    pub width: usize,     // pixels per row
    pub height: usize,    // rows
    pub pixels: Vec<u32>, // length = width * height
}

impl PixelBuffer {
    /// A fully transparent buffer of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }

    /// A buffer with every pixel set to `color` (handy in tests).
    pub fn filled(width: usize, height: usize, color: u32) -> Self {
        Self { width, height, pixels: vec![color; width * height] }
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }
}

/// Pack RGBA channels into one pixel word.
#[inline]
pub fn pack(r: u8, g: u8, b: u8, a: u8) -> u32 {
    ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

/// Unpack a pixel word into (r, g, b, a).
#[inline]
pub fn unpack(px: u32) -> (u8, u8, u8, u8) {
    (
        ((px >> 16) & 0xFF) as u8,
        ((px >> 8) & 0xFF) as u8,
        (px & 0xFF) as u8,
        ((px >> 24) & 0xFF) as u8,
    )
}

#[inline]
pub fn alpha(px: u32) -> u8 {
    ((px >> 24) & 0xFF) as u8
}

/// Per-pixel occupancy derived from a selection shape, sized to match the
/// buffer it is applied to. `true` = the pixel belongs to the selection.
pub struct Mask {
    pub width: usize,
    pub height: usize,
    pub inside: Vec<bool>, // length = width * height
}

impl Mask {
    pub fn empty(width: usize, height: usize) -> Self {
        Self { width, height, inside: vec![false; width * height] }
    }

    /// Number of selected pixels.
    pub fn area(&self) -> usize {
        self.inside.iter().filter(|&&b| b).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.inside.iter().any(|&b| b)
    }
}
