//! Visual attribute bundles.
//!
//! Attributes are pure presentation: the adapter pushes a bundle per entity
//! and the paint layer reads it back. Nothing here is structural — changing
//! attributes never requires a re-link.

/// An sRGB color with alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba {
    /// Opaque black.
    pub const BLACK: Self = Self::from_rgb8(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::from_rgb8(255, 255, 255);

    /// Build an opaque color from 8-bit channels.
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Build a color from 8-bit channels with alpha.
    pub const fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Presentation bundle for a column item.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnAttributes {
    /// Fill color.
    pub bgcolor: Rgba,
    /// Border color.
    pub border_color: Rgba,
    /// Label text color.
    pub label_color: Rgba,
    /// Border stroke width.
    pub border_width: f32,
    /// Label text.
    pub label: String,
    /// Width of the central label spacer.
    pub spacer_width: f32,
}

impl Default for ColumnAttributes {
    fn default() -> Self {
        Self {
            bgcolor: Rgba::WHITE,
            border_color: Rgba::BLACK,
            label_color: Rgba::BLACK,
            border_width: 1.0,
            label: String::new(),
            spacer_width: 20.0,
        }
    }
}

/// Presentation bundle for a band item.
#[derive(Debug, Clone, PartialEq)]
pub struct BandAttributes {
    /// Fill color.
    pub bgcolor: Rgba,
    /// Border color.
    pub border_color: Rgba,
    /// Label text color.
    pub label_color: Rgba,
    /// Label text.
    pub label: String,
    /// Band thickness.
    pub width: f32,
}

impl Default for BandAttributes {
    fn default() -> Self {
        Self {
            bgcolor: Rgba::WHITE,
            border_color: Rgba::BLACK,
            label_color: Rgba::BLACK,
            label: String::new(),
            width: 15.0,
        }
    }
}

/// Presentation bundle for a connection point item.
#[derive(Debug, Clone, PartialEq)]
pub struct PointAttributes {
    /// Fill color.
    pub bgcolor: Rgba,
    /// Border color.
    pub border_color: Rgba,
    /// Label text color.
    pub label_color: Rgba,
    /// Label text.
    pub label: String,
    /// Point width inside its role container.
    pub width: f32,
}

impl Default for PointAttributes {
    fn default() -> Self {
        Self {
            bgcolor: Rgba::WHITE,
            border_color: Rgba::BLACK,
            label_color: Rgba::BLACK,
            label: String::new(),
            width: 20.0,
        }
    }
}
