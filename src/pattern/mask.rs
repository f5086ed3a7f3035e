use crate::foundation::error::{WireError, WireResult};

/// Rectangular boolean grid; `true` marks a silhouette pixel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatternMask {
    width: usize,
    height: usize,
    cells: Vec<bool>, // row-major
}

impl PatternMask {
    pub fn new(width: usize, height: usize, cells: Vec<bool>) -> WireResult<Self> {
        if cells.len() != width * height {
            return Err(WireError::validation(format!(
                "pattern mask expects {} cells for {width}x{height}, got {}",
                width * height,
                cells.len()
            )));
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> bool) -> Self {
        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                cells.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    /// Parse rows of `#` (on) and any other character (off). Rows must have equal length.
    pub fn from_ascii(rows: &[&str]) -> WireResult<Self> {
        let width = rows.first().map_or(0, |r| r.chars().count());
        let mut cells = Vec::with_capacity(width * rows.len());
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(WireError::validation(format!(
                    "pattern row {y} has {} cells, expected {width}",
                    row.chars().count()
                )));
            }
            cells.extend(row.chars().map(|c| c == '#'));
        }
        Self::new(width, rows.len(), cells)
    }

    /// Threshold a grayscale bitmap: a pixel is on when its luma is `>= threshold`
    /// (or `< threshold` with `invert`).
    pub fn from_luma(img: &image::GrayImage, threshold: u8, invert: bool) -> Self {
        Self::from_fn(img.width() as usize, img.height() as usize, |x, y| {
            let luma = img.get_pixel(x as u32, y as u32).0[0];
            (luma >= threshold) != invert
        })
    }

    /// Like [`PatternMask::from_luma`]; fully transparent pixels are always off.
    pub fn from_image(img: &image::DynamicImage, threshold: u8, invert: bool) -> Self {
        let la = img.to_luma_alpha8();
        Self::from_fn(la.width() as usize, la.height() as usize, |x, y| {
            let [luma, alpha] = la.get_pixel(x as u32, y as u32).0;
            alpha > 0 && ((luma >= threshold) != invert)
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.cells[y * self.width + x]
    }

    pub fn count_on(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }
}
