//! Caller-owned pixel buffer that the generators and clippers draw into.
//!
//! Pixels are addressed in y-up world coordinates: `(0, 0)` is the
//! bottom-left pixel. The backing buffer is stored row-major top-down,
//! which is what SDL2 textures and PNG files expect.

use std::path::Path;

use crate::clip::{ClipWindow, Polygon, Segment};
use crate::math::{PixelCoord, Point2D};
use crate::raster::{rasterize_line, LineAlgorithm};

pub const COLOR_BACKGROUND: u32 = 0xFF1E1E1E;
pub const COLOR_GRID: u32 = 0xFF333333;
pub const COLOR_AXIS: u32 = 0xFF5A5A5A;
pub const COLOR_WHITE: u32 = 0xFFFFFFFF;
pub const COLOR_RED: u32 = 0xFFE05252;
pub const COLOR_GREEN: u32 = 0xFF4EC96A;
pub const COLOR_BLUE: u32 = 0xFF4F8FE0;
pub const COLOR_YELLOW: u32 = 0xFFE8C547;
pub const COLOR_MAGENTA: u32 = 0xFFD152D1;

pub struct Canvas {
    color_buffer: Vec<u32>,
    width: u32,
    height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width * height) as usize;
        Self {
            color_buffer: vec![COLOR_BACKGROUND; size],
            width,
            height,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        let size = (width * height) as usize;
        self.color_buffer = vec![COLOR_BACKGROUND; size];
        self.width = width;
        self.height = height;
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn clear(&mut self, color: u32) {
        self.color_buffer.fill(color);
    }

    /// Buffer index of a world pixel, or `None` off-canvas.
    #[inline]
    fn index(&self, pixel: PixelCoord) -> Option<usize> {
        let (w, h) = (self.width as i64, self.height as i64);
        let x = pixel.x as i64;
        let row = h - 1 - pixel.y as i64;
        if x >= 0 && x < w && row >= 0 && row < h {
            Some((row * w + x) as usize)
        } else {
            None
        }
    }

    /// Writes one pixel. Off-canvas pixels are silently ignored.
    #[inline]
    pub fn set_pixel(&mut self, pixel: PixelCoord, color: u32) {
        if let Some(i) = self.index(pixel) {
            self.color_buffer[i] = color;
        }
    }

    /// Color at `pixel`, or `None` if it is off-canvas.
    #[inline]
    pub fn get_pixel(&self, pixel: PixelCoord) -> Option<u32> {
        self.index(pixel).map(|i| self.color_buffer[i])
    }

    /// Draws every pixel of a sequence. Returns how many were consumed.
    pub fn plot<I>(&mut self, pixels: I, color: u32) -> usize
    where
        I: IntoIterator<Item = PixelCoord>,
    {
        let mut count = 0;
        for p in pixels {
            self.set_pixel(p, color);
            count += 1;
        }
        count
    }

    /// Draws at most the first `limit` pixels of a sequence, for
    /// progressive reveal. Returns how many were drawn.
    pub fn plot_prefix<I>(&mut self, pixels: I, limit: usize, color: u32) -> usize
    where
        I: IntoIterator<Item = PixelCoord>,
    {
        self.plot(pixels.into_iter().take(limit), color)
    }

    pub fn draw_segment(&mut self, segment: Segment, algorithm: LineAlgorithm, color: u32) {
        self.plot(rasterize_line(algorithm, segment.p1, segment.p2), color);
    }

    /// Like [`Canvas::draw_segment`] but only every `period`-th pixel is set.
    /// Used for the parts of a segment a clipper discarded.
    pub fn draw_dotted_segment(
        &mut self,
        segment: Segment,
        algorithm: LineAlgorithm,
        period: usize,
        color: u32,
    ) {
        let pixels = rasterize_line(algorithm, segment.p1, segment.p2);
        self.plot(pixels.step_by(period.max(1)), color);
    }

    /// Outline of a closed polygon. Fewer than two vertices draws at most a
    /// single pixel.
    pub fn draw_polygon(&mut self, polygon: &Polygon, algorithm: LineAlgorithm, color: u32) {
        match polygon.vertices() {
            [] => {}
            [only] => self.set_pixel(only.round(), color),
            _ => {
                for (a, b) in polygon.edges() {
                    self.draw_segment(Segment::new(a, b), algorithm, color);
                }
            }
        }
    }

    pub fn draw_window(&mut self, window: &ClipWindow, color: u32) {
        self.draw_polygon(&window.outline(), LineAlgorithm::Bresenham, color);
    }

    /// Grid lines every `spacing` pixels, measured from the bottom-left.
    pub fn draw_grid(&mut self, spacing: i32, color: u32) {
        if spacing <= 0 {
            return;
        }
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                if x % spacing == 0 || y % spacing == 0 {
                    self.set_pixel(PixelCoord::new(x, y), color);
                }
            }
        }
    }

    /// Horizontal and vertical lines through `origin`.
    pub fn draw_axes(&mut self, origin: PixelCoord, color: u32) {
        let (w, h) = (self.width as f64, self.height as f64);
        let o = Point2D::from(origin);
        self.draw_segment(
            Segment::new(Point2D::new(0.0, o.y), Point2D::new(w - 1.0, o.y)),
            LineAlgorithm::Bresenham,
            color,
        );
        self.draw_segment(
            Segment::new(Point2D::new(o.x, 0.0), Point2D::new(o.x, h - 1.0)),
            LineAlgorithm::Bresenham,
            color,
        );
    }

    /// Number of pixels currently holding `color`.
    pub fn count_color(&self, color: u32) -> usize {
        self.color_buffer.iter().filter(|&&c| c == color).count()
    }

    /// ARGB8888 bytes in native order, top row first, ready for an SDL2
    /// streaming texture.
    pub fn as_bytes(&self) -> &[u8] {
        // SAFETY: u32 has no padding and u8 has alignment 1, so the buffer
        // reinterpreted as bytes is valid for `len * 4` bytes.
        unsafe {
            std::slice::from_raw_parts(
                self.color_buffer.as_ptr() as *const u8,
                self.color_buffer.len() * 4,
            )
        }
    }

    /// Converts the ARGB buffer into an RGBA image.
    pub fn to_image(&self) -> image::RgbaImage {
        let mut img = image::RgbaImage::new(self.width, self.height);
        for (pixel, &argb) in img.pixels_mut().zip(self.color_buffer.iter()) {
            let a = (argb >> 24) as u8;
            let r = (argb >> 16) as u8;
            let g = (argb >> 8) as u8;
            let b = argb as u8;
            *pixel = image::Rgba([r, g, b, a]);
        }
        img
    }

    /// Writes the canvas as a PNG file.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), image::ImageError> {
        let path = path.as_ref();
        self.to_image()
            .save_with_format(path, image::ImageFormat::Png)?;
        log::info!(
            "saved {}x{} snapshot to {}",
            self.width,
            self.height,
            path.display()
        );
        Ok(())
    }
}
