//! Star entries and their on-disk record layout.
//!
//! ## Binary Layout
//!
//! Each entry is a fixed 40-byte little-endian record:
//!
//! | Offset | Size | Field |
//! |--------|------|-------|
//! | 0 | 1 | Red (`u8`) |
//! | 1 | 1 | Green (`u8`) |
//! | 2 | 1 | Blue (`u8`) |
//! | 3 | 1 | Thickness (`u8`) |
//! | 4 | 4 | Value (`f32`) |
//! | 8 | 12 | Position x, y, z (`f32` each) |
//! | 20 | 20 | Five opaque `u32` words |

use std::io::{self, Read, Write};

use glam::{DVec3, IVec2};

/// Size in bytes of one encoded [`BaseStarEntry`].
pub const ENTRY_SIZE: usize = 40;

/// Number of opaque metadata words carried by each entry.
pub const ENTRY_DATA_WORDS: usize = 5;

/// An 8-bit RGB colour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(0xFF, 0xFF, 0xFF);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Multiply every channel by `factor`, clamped to [0, 1].
    pub fn scaled(self, factor: f64) -> Self {
        let f = factor.clamp(0.0, 1.0);
        let ch = |c: u8| (f64::from(c) * f).round() as u8;
        Self::new(ch(self.r), ch(self.g), ch(self.b))
    }

    /// Linear blend toward `other`; `t = 0` keeps `self`, `t = 1` yields `other`.
    pub fn lerp(self, other: Rgb, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let ch = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
        Self::new(ch(self.r, other.r), ch(self.g, other.g), ch(self.b, other.b))
    }

    /// Rec. 601 luma in [0, 255].
    pub fn luminance(self) -> u8 {
        let y = 0.299 * f64::from(self.r) + 0.587 * f64::from(self.g) + 0.114 * f64::from(self.b);
        y.round().clamp(0.0, 255.0) as u8
    }

    /// Pack into a 5-6-5 RGB word.
    pub fn to_rgb565(self) -> u16 {
        (u16::from(self.r >> 3) << 11) | (u16::from(self.g >> 2) << 5) | u16::from(self.b >> 3)
    }

    /// Expand a 5-6-5 RGB word back to 8 bits per channel.
    pub fn from_rgb565(word: u16) -> Self {
        let r = ((word >> 11) & 0x1F) as u8;
        let g = ((word >> 5) & 0x3F) as u8;
        let b = (word & 0x1F) as u8;
        Self::new((r << 3) | (r >> 2), (g << 2) | (g >> 4), (b << 3) | (b >> 2))
    }
}

/// One star's persisted rendering attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct BaseStarEntry {
    pub color: Rgb,
    /// Line thickness; non-zero stars are drawn as a 2x2 block.
    pub thickness: u8,
    /// Brightness/magnitude used for shading.
    pub value: f64,
    pub position: DVec3,
    /// Opaque per-star words, carried through unchanged.
    pub data: [u32; ENTRY_DATA_WORDS],
}

impl Default for BaseStarEntry {
    fn default() -> Self {
        Self {
            color: Rgb::WHITE,
            thickness: 0,
            value: 0.0,
            position: DVec3::ZERO,
            data: [0; ENTRY_DATA_WORDS],
        }
    }
}

impl BaseStarEntry {
    /// Convenience constructor for a star with the given colour and position.
    pub fn new(color: Rgb, value: f64, position: DVec3) -> Self {
        Self {
            color,
            value,
            position,
            ..Self::default()
        }
    }

    /// Read one entry record from `reader`.
    pub fn read_from<R: Read + ?Sized>(reader: &mut R) -> io::Result<Self> {
        let mut buf = [0u8; ENTRY_SIZE];
        reader.read_exact(&mut buf)?;

        let f32_at = |offset: usize| {
            f32::from_le_bytes([buf[offset], buf[offset + 1], buf[offset + 2], buf[offset + 3]])
        };
        let u32_at = |offset: usize| {
            u32::from_le_bytes([buf[offset], buf[offset + 1], buf[offset + 2], buf[offset + 3]])
        };

        let mut data = [0u32; ENTRY_DATA_WORDS];
        for (i, word) in data.iter_mut().enumerate() {
            *word = u32_at(20 + i * 4);
        }

        Ok(Self {
            color: Rgb::new(buf[0], buf[1], buf[2]),
            thickness: buf[3],
            value: f64::from(f32_at(4)),
            position: DVec3::new(
                f64::from(f32_at(8)),
                f64::from(f32_at(12)),
                f64::from(f32_at(16)),
            ),
            data,
        })
    }

    /// Write this entry as one record. Value and position are narrowed to `f32`.
    pub fn write_to<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<()> {
        let mut buf = Vec::with_capacity(ENTRY_SIZE);
        buf.extend_from_slice(&[self.color.r, self.color.g, self.color.b, self.thickness]);
        buf.extend_from_slice(&(self.value as f32).to_le_bytes());
        for c in self.position.to_array() {
            buf.extend_from_slice(&(c as f32).to_le_bytes());
        }
        for word in self.data {
            buf.extend_from_slice(&word.to_le_bytes());
        }
        writer.write_all(&buf)
    }
}

/// A screen point tagged with two indices into other star lists.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct StarPosition {
    pub point: IVec2,
    pub index1: i32,
    pub index2: i32,
}

impl StarPosition {
    pub fn new(point: IVec2, index1: i32, index2: i32) -> Self {
        Self {
            point,
            index1,
            index2,
        }
    }
}
