use crate::foundation::core::{Canvas, Color};

/// Writable pixel target for the wireframe renderer.
pub trait PixelSurface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// Callers keep `x < width` and `y < height`.
    fn set_pixel(&mut self, x: u32, y: u32, color: Color);
    fn fill(&mut self, color: Color);
}

/// Tightly packed RGB8 frame, row-major, no padding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRgb {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl FrameRgb {
    pub fn new(canvas: Canvas, background: Color) -> Self {
        let data = background
            .to_array()
            .into_iter()
            .cycle()
            .take(canvas.pixel_count() * 3)
            .collect();
        Self {
            width: canvas.width,
            height: canvas.height,
            data,
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.offset(x, y);
        Some(Color::rgb(self.data[i], self.data[i + 1], self.data[i + 2]))
    }

    pub fn count_color(&self, color: Color) -> usize {
        let want = color.to_array();
        self.data.chunks_exact(3).filter(|px| *px == want).count()
    }

    pub fn into_image(self) -> Option<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.data)
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 3
    }
}

impl PixelSurface for FrameRgb {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        let i = self.offset(x, y);
        self.data[i..i + 3].copy_from_slice(&color.to_array());
    }

    fn fill(&mut self, color: Color) {
        let rgb = color.to_array();
        for px in self.data.chunks_exact_mut(3) {
            px.copy_from_slice(&rgb);
        }
    }
}

impl PixelSurface for image::RgbImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        self.put_pixel(x, y, image::Rgb(color.to_array()));
    }

    fn fill(&mut self, color: Color) {
        let rgb = image::Rgb(color.to_array());
        for px in self.pixels_mut() {
            *px = rgb;
        }
    }
}
