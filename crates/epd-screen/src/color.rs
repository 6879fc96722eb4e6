//! Logical colours and their packed encodings
//!
//! Callers draw in logical colours; each film class renders them with
//! the primaries it actually has. Composite colours (grey and the
//! blended reds, yellows and orange) are dithered with a checkerboard:
//! a pixel whose physical coordinates sum to an even number takes the
//! first primary of the pair, the rest take the second. Fills derive
//! their byte patterns from the same rule, so a cleared surface is
//! indistinguishable from one painted pixel by pixel.

use embedded_graphics::pixelcolor::raw::RawU4;
use embedded_graphics::pixelcolor::PixelColor;
use epd_specs::PanelProfile;

/// Colour requested by the caller.
///
/// The first four are primaries some film can show natively; the rest
/// are composites that always dither.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogicalColor {
    /// Black, available on every film.
    Black,
    /// White, available on every film.
    #[default]
    White,
    /// Red, native on BWR and BWRY films.
    Red,
    /// Yellow, native on BWY and BWRY films.
    Yellow,
    /// Black/white checkerboard.
    Grey,
    /// Red/black checkerboard.
    DarkRed,
    /// Red/white checkerboard.
    LightRed,
    /// Yellow/black checkerboard.
    DarkYellow,
    /// Yellow/white checkerboard.
    LightYellow,
    /// Yellow/red checkerboard.
    Orange,
}

impl PixelColor for LogicalColor {
    type Raw = RawU4;
}

impl LogicalColor {
    /// Whether the colour dithers rather than mapping to one primary.
    pub const fn is_composite(self) -> bool {
        !matches!(self, Self::Black | Self::White | Self::Red | Self::Yellow)
    }

    /// Resolve a composite to the primary used at the given
    /// checkerboard parity. Primaries resolve to themselves.
    pub const fn resolve(self, even_parity: bool) -> Self {
        let (first, second) = match self {
            Self::Grey => (Self::Black, Self::White),
            Self::DarkRed => (Self::Red, Self::Black),
            Self::LightRed => (Self::Red, Self::White),
            Self::DarkYellow => (Self::Yellow, Self::Black),
            Self::LightYellow => (Self::Yellow, Self::White),
            Self::Orange => (Self::Yellow, Self::Red),
            primary => (primary, primary),
        };
        if even_parity {
            first
        } else {
            second
        }
    }
}

/// How logical colours become plane bits for the resolved panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Encoding {
    /// One plane of 2-bit colour codes (BWRY controllers).
    QuadColor,
    /// Next/previous mono planes; only the next plane is drawn into
    /// (fast and wide films).
    FastMono,
    /// Separate black and red planes (standard, freezer, BWR, BWY).
    DualPlane,
}

/// Packed value of one pixel, shaped per encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PixelCode {
    /// 2-bit colour code for the single colour plane.
    Quad(u8),
    /// Bit for the next plane.
    Mono { black: bool },
    /// Bits for the black plane and the red plane.
    Dual { black: bool, red: bool },
}

/// Per-plane fill bytes for even- and odd-indexed buffer rows.
///
/// Uniform colours repeat one byte; dithered colours alternate two so
/// the checkerboard lines up across rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FillPattern {
    pub even: [u8; 2],
    pub odd: [u8; 2],
}

impl Encoding {
    pub(crate) fn for_profile(profile: &PanelProfile) -> Self {
        if profile.cog.is_bwry() {
            Self::QuadColor
        } else if profile.cog.has_fast_update() {
            Self::FastMono
        } else {
            Self::DualPlane
        }
    }

    /// Encode one pixel at the given checkerboard parity.
    pub(crate) fn encode(self, color: LogicalColor, even_parity: bool) -> PixelCode {
        match self {
            Self::QuadColor => PixelCode::Quad(quad_code(color.resolve(even_parity))),
            Self::FastMono => {
                // Anything the mono film cannot show darkens to black.
                let resolved = color.resolve(even_parity);
                PixelCode::Mono {
                    black: resolved != LogicalColor::White,
                }
            }
            Self::DualPlane => {
                // The red plane doubles for yellow on BWY panels, so the
                // yellow family degrades to its red counterpart first.
                let resolved = to_red_family(color).resolve(even_parity);
                PixelCode::Dual {
                    black: resolved == LogicalColor::Black,
                    red: resolved == LogicalColor::Red || resolved == LogicalColor::Yellow,
                }
            }
        }
    }

    /// Build the fill bytes for a whole-surface clear by encoding one
    /// byte worth of pixels at each row parity.
    pub(crate) fn fill_pattern(self, color: LogicalColor) -> FillPattern {
        FillPattern {
            even: self.row_byte(color, 0),
            odd: self.row_byte(color, 1),
        }
    }

    // SAFETY: shifts are bounded by the 4 or 8 pixels packed per byte.
    #[allow(clippy::arithmetic_side_effects)]
    fn row_byte(self, color: LogicalColor, row_parity: u16) -> [u8; 2] {
        let mut bytes = [0u8; 2];
        let pixels = match self {
            Self::QuadColor => 4u16,
            Self::FastMono | Self::DualPlane => 8,
        };
        for column in 0..pixels {
            let even_parity = (row_parity + column) % 2 == 0;
            match self.encode(color, even_parity) {
                PixelCode::Quad(code) => {
                    bytes[0] |= code << (6 - 2 * column as u8);
                }
                PixelCode::Mono { black } => {
                    bytes[0] |= u8::from(black) << (7 - column as u8);
                }
                PixelCode::Dual { black, red } => {
                    bytes[0] |= u8::from(black) << (7 - column as u8);
                    bytes[1] |= u8::from(red) << (7 - column as u8);
                }
            }
        }
        bytes
    }
}

/// 2-bit colour codes of the quad-colour controllers.
const fn quad_code(color: LogicalColor) -> u8 {
    match color {
        LogicalColor::White => 0b01,
        LogicalColor::Yellow => 0b10,
        LogicalColor::Red => 0b11,
        _ => 0b00,
    }
}

/// Degrade the yellow family to its red counterpart.
const fn to_red_family(color: LogicalColor) -> LogicalColor {
    match color {
        LogicalColor::Yellow | LogicalColor::Orange => LogicalColor::Red,
        LogicalColor::DarkYellow => LogicalColor::DarkRed,
        LogicalColor::LightYellow => LogicalColor::LightRed,
        other => other,
    }
}
