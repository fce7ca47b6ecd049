//! CPU pixel surface stars are drawn into.

use glam::IVec2;

use crate::entry::Rgb;

/// Pixel format of a [`SurfaceArea`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PixelDepth {
    /// One byte per pixel holding a grey level.
    Indexed8,
    /// Two bytes per pixel, 5-6-5 RGB.
    #[default]
    Rgb565,
}

impl PixelDepth {
    /// Encode a colour as a raw pixel value in this format.
    pub fn encode(self, color: Rgb) -> u16 {
        match self {
            PixelDepth::Indexed8 => u16::from(color.luminance()),
            PixelDepth::Rgb565 => color.to_rgb565(),
        }
    }

    /// Decode a raw pixel value back to a colour.
    pub fn decode(self, raw: u16) -> Rgb {
        match self {
            PixelDepth::Indexed8 => {
                let grey = raw.min(255) as u8;
                Rgb::new(grey, grey, grey)
            }
            PixelDepth::Rgb565 => Rgb::from_rgb565(raw),
        }
    }
}

/// A fixed-size pixel buffer with a pixel format.
///
/// Raw pixels are stored as `u16` whatever the depth; `Indexed8` surfaces only
/// use the low byte.
#[derive(Clone, Debug)]
pub struct SurfaceArea {
    width: u32,
    height: u32,
    depth: PixelDepth,
    pixels: Vec<u16>,
}

impl SurfaceArea {
    pub fn new(width: u32, height: u32, depth: PixelDepth) -> Self {
        Self {
            width,
            height,
            depth,
            pixels: vec![0; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn depth(&self) -> PixelDepth {
        self.depth
    }

    /// Centre of the surface in pixels, the origin of projected coordinates.
    pub fn center(&self) -> glam::DVec2 {
        glam::DVec2::new(f64::from(self.width) * 0.5, f64::from(self.height) * 0.5)
    }

    pub fn contains(&self, point: IVec2) -> bool {
        point.x >= 0 && point.y >= 0 && (point.x as u32) < self.width && (point.y as u32) < self.height
    }

    fn offset(&self, point: IVec2) -> Option<usize> {
        self.contains(point)
            .then(|| point.y as usize * self.width as usize + point.x as usize)
    }

    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    /// Raw pixel value, or `None` outside the surface.
    pub fn pixel(&self, point: IVec2) -> Option<u16> {
        self.offset(point).map(|i| self.pixels[i])
    }

    /// Colour of a pixel, or `None` outside the surface.
    pub fn color_at(&self, point: IVec2) -> Option<Rgb> {
        self.pixel(point).map(|raw| self.depth.decode(raw))
    }

    /// Write a raw pixel value. Returns false if the point is off-surface.
    pub fn set_pixel(&mut self, point: IVec2, raw: u16) -> bool {
        match self.offset(point) {
            Some(i) => {
                self.pixels[i] = raw;
                true
            }
            None => false,
        }
    }

    /// Plot a colour, encoded for this surface's depth.
    pub fn plot(&mut self, point: IVec2, color: Rgb) -> bool {
        let raw = self.depth.encode(color);
        self.set_pixel(point, raw)
    }

    /// Outline the rectangle with corners `min` and `max` (inclusive).
    pub fn draw_rect(&mut self, min: IVec2, max: IVec2, color: Rgb) {
        for x in min.x..=max.x {
            self.plot(IVec2::new(x, min.y), color);
            self.plot(IVec2::new(x, max.y), color);
        }
        for y in min.y..=max.y {
            self.plot(IVec2::new(min.x, y), color);
            self.plot(IVec2::new(max.x, y), color);
        }
    }

    /// Fill a disc of `radius` pixels around `center`.
    pub fn fill_disc(&mut self, center: IVec2, radius: i32, color: Rgb) {
        let r2 = radius * radius;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= r2 {
                    self.plot(center + IVec2::new(dx, dy), color);
                }
            }
        }
    }

    /// Convert the surface to RGBA8 bytes, row-major.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for &raw in &self.pixels {
            let c = self.depth.decode(raw);
            bytes.extend_from_slice(&[c.r, c.g, c.b, 0xFF]);
        }
        bytes
    }

    /// Number of pixels that are not zero.
    pub fn lit_pixel_count(&self) -> usize {
        self.pixels.iter().filter(|&&p| p != 0).count()
    }
}
