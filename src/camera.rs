use crate::color::Color;
use crate::face::Face;
use crate::quadtree::Aabb;
use crate::quadtree::Point;
use crate::visit::PlaneRenderer;

/// Hex values of braille dots
///
/// ```text
///  1   8
///  2  10
///  4  20
/// 40  80
/// ```
///
/// Where the base blank pattern is codepoint `0x2800` (or U+2800)
///
/// To get other configurations, just add the numbers above.
const BRAILLE_EMPTY: u32 = 0x2800;

/// Maps a face-space region onto a rectangle of pixels. Face space has `y` up, pixels have `y`
/// down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub region: Aabb,

    /// Top left pixel
    pub x: i64,
    pub y: i64,

    /// Size in pixels
    pub w: i64,
    pub h: i64,
}

impl Viewport {
    pub fn new(region: Aabb, x: i64, y: i64, w: i64, h: i64) -> Self {
        Self { region, x, y, w, h }
    }

    /// The tile `face` occupies in an unfolded cube:
    ///
    /// ```notrust
    ///         top
    ///   left front right back
    ///        bottom
    /// ```
    ///
    /// Each tile is `tile` pixels square with a one pixel gutter on its right and bottom.
    pub fn cube_cross(face: Face, region: Aabb, tile: i64) -> Self {
        let (col, row) = match face {
            Face::Top => (1, 0),
            Face::Left => (0, 1),
            Face::Front => (1, 1),
            Face::Right => (2, 1),
            Face::Back => (3, 1),
            Face::Bottom => (1, 2),
        };

        let side = (tile - 1).max(1);

        Self::new(region, col * tile, row * tile, side, side)
    }

    /// Pixel nearest to `p`. May lie outside the viewport.
    pub fn to_pixel(&self, p: Point) -> (i64, i64) {
        let fx = (p.x - self.region.min.x) / self.region.width();
        let fy = (self.region.max.y - p.y) / self.region.height();

        let px = (fx * (self.w - 1) as f64).round() as i64;
        let py = (fy * (self.h - 1) as f64).round() as i64;

        (self.x + px, self.y + py)
    }
}

/// Braille framebuffer. Every glyph packs a 2x4 block of pixels.
pub struct Camera {
    /// The cell buffer
    cb: Vec<bool>,

    /// The frame buffer.
    fb: String,

    /// Codepoints. This allows us to construct the framebuffer more easily
    cp: Vec<u32>,

    /// Width of the framebuffer
    w: usize,

    /// Height of the framebuffer
    h: usize,

    /// Where `draw_plane` puts face-space squares
    viewport: Viewport,

    /// Outline squares instead of filling bright ones
    wireframe: bool,
}

impl Camera {
    pub fn new(w: usize, h: usize) -> Self {
        // For each braille character, we need 3 bytes:
        //  - The leader byte:     0b11100010
        //  - Continuation byte 1: 0b101000xx
        //  - Continuation byte 2: 0b10xxxxxx
        // For each newline, we need one byte: 0b00001010
        //
        // Let `w` and `h` refer to width and height of the cell buffer. Then `bw = ceil(w / 2)`
        // and `bh = ceil(h / 4)` are the width and height of braille characters of our framebuffer
        // (that is, not accounting for the trailing newlines expected at the end of each line).
        let (bw, bh) = (w.div_ceil(2), h.div_ceil(4));

        let region = Aabb::from_center(Point::new(0f64, 0f64), 1f64);

        Self {
            cb: vec![false; w * h],
            fb: String::with_capacity(3 * (bw * bh) + bh),
            cp: vec![BRAILLE_EMPTY; bw * bh],
            w,
            h,
            viewport: Viewport::new(region, 0, 0, w as i64, h as i64),
            wireframe: false,
        }
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    /// Drop the current picture and take new dimensions.
    pub fn resize(&mut self, w: usize, h: usize) {
        let viewport = self.viewport;
        *self = Self::new(w, h);
        self.viewport = viewport;
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Whether the pixel at `(x, y)` is on.
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        x < self.w && y < self.h && self.cb[self.xy_from(x, y)]
    }

    /// Turns on a single pixel of the framebuffer. Pixels off screen are ignored.
    pub fn draw_pixel(&mut self, x: i64, y: i64) {
        let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
            return;
        };

        if x >= self.w || y >= self.h {
            return;
        }

        let i = self.xy_from(x, y);
        self.cb[i] = true;
    }

    /// Outline of the rectangle spanning `(x0, y0)` to `(x1, y1)`, both inclusive.
    pub fn draw_outline(&mut self, x0: i64, y0: i64, x1: i64, y1: i64) {
        let (x0, x1) = (x0.min(x1), x0.max(x1));
        let (y0, y1) = (y0.min(y1), y0.max(y1));

        for x in x0..=x1 {
            self.draw_pixel(x, y0);
            self.draw_pixel(x, y1);
        }

        for y in y0..=y1 {
            self.draw_pixel(x0, y);
            self.draw_pixel(x1, y);
        }
    }

    /// Turns on every pixel of the rectangle spanning `(x0, y0)` to `(x1, y1)`.
    pub fn fill_rect(&mut self, x0: i64, y0: i64, x1: i64, y1: i64) {
        let (x0, x1) = (x0.min(x1).max(0), x0.max(x1).min(self.w as i64 - 1));
        let (y0, y1) = (y0.min(y1).max(0), y0.max(y1).min(self.h as i64 - 1));

        for y in y0..=y1 {
            for x in x0..=x1 {
                self.draw_pixel(x, y);
            }
        }
    }

    /// Reset the cell buffer
    pub fn reset(&mut self) {
        self.cb.fill(false);
    }

    /// Pack the cell buffer into braille glyphs, one line of text per 4 pixel rows.
    pub fn render(&mut self) -> &str {
        let bw = self.w.div_ceil(2);

        // compute new codepoints
        self.cp.fill(BRAILLE_EMPTY);

        for (n, &px) in self.cb.iter().enumerate() {
            let (x, y) = self.xy_to(n);
            let hex = Self::get_hex_value(x, y);

            if px {
                self.cp[(y / 4) * bw + (x / 2)] += hex;
            }
        }

        // update framebuffer
        self.fb.clear();

        for (i, &c) in self.cp.iter().enumerate() {
            if i > 0 && i % bw == 0 {
                self.fb.push('\n');
            }

            self.fb.push(char::from_u32(c).unwrap_or(' '));
        }
        self.fb.push('\n');

        &self.fb
    }

    fn xy_to(&self, n: usize) -> (usize, usize) {
        (n % self.w, n / self.w)
    }

    fn xy_from(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }

    fn get_hex_value(x: usize, y: usize) -> u32 {
        match (x % 2, y % 4) {
            (0, 0) => 0x1,
            (1, 0) => 0x8,
            (0, 1) => 0x2,
            (1, 1) => 0x10,
            (0, 2) => 0x4,
            (1, 2) => 0x20,
            (0, 3) => 0x40,
            (1, 3) => 0x80,
            _ => unreachable!(),
        }
    }
}

impl PlaneRenderer for Camera {
    fn draw_plane(&mut self, x: f64, y: f64, size: f64, color: Color) {
        let half = size / 2f64;

        let (x0, y0) = self.viewport.to_pixel(Point::new(x - half, y + half));
        let (x1, y1) = self.viewport.to_pixel(Point::new(x + half, y - half));

        if !self.wireframe && color.luminance() >= 0.5 {
            self.fill_rect(x0, y0, x1, y1);
        } else {
            self.draw_outline(x0, y0, x1, y1);
        }
    }

    fn set_wireframe(&mut self, on: bool) {
        self.wireframe = on;
    }
}
