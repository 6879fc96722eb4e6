//! Packed buffer addressing
//!
//! Maps a physical `(row, column)` pixel to the byte offset within a
//! plane and the bit position inside that byte. Split panels rebase
//! columns past the midline into the second half of the plane, which
//! is streamed to the slave half-screen as-is.

use epd_specs::{AddressingScheme, PanelProfile};

/// Byte offset within one plane plus the low bit of the pixel's field.
///
/// For 2-bit packings the pixel occupies `bit + 1` and `bit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PixelAddress {
    pub byte: usize,
    pub bit: u8,
}

/// Resolve the plane-relative address of a physical pixel.
///
/// Callers guarantee `row < profile.rows` and `column < profile.columns`;
/// the orientation mapping enforces this.
// SAFETY: row < rows and column < columns, both from the static extents
// table, so every product and sum below fits usize and the midline
// rebase cannot underflow.
#[allow(clippy::arithmetic_side_effects)]
pub(crate) fn address_of(profile: &PanelProfile, row: u16, column: u16) -> PixelAddress {
    let stride = profile.row_stride as usize;
    let row = row as usize;
    let mut column = column as usize;

    match profile.addressing {
        AddressingScheme::QuadPack => PixelAddress {
            byte: row * stride + (column >> 2),
            bit: quad_bit(column),
        },
        AddressingScheme::QuadPackSplit => {
            let base = rebase_split(profile, &mut column);
            PixelAddress {
                byte: base + row * (stride / 2) + (column >> 2),
                bit: quad_bit(column),
            }
        }
        AddressingScheme::MonoPack => PixelAddress {
            byte: row * stride + (column >> 3),
            bit: mono_bit(column),
        },
        AddressingScheme::MonoPackSplit => {
            let base = rebase_split(profile, &mut column);
            PixelAddress {
                byte: base + row * (stride / 2) + (column >> 3),
                bit: mono_bit(column),
            }
        }
    }
}

/// Rebase a column past the midline into the slave half of the plane.
#[allow(clippy::arithmetic_side_effects)]
fn rebase_split(profile: &PanelProfile, column: &mut usize) -> usize {
    let midline = profile.columns as usize / 2;
    if *column >= midline {
        *column -= midline;
        profile.plane_bytes as usize / 2
    } else {
        0
    }
}

/// Low bit of a 2-bit colour code: four pixels per byte, first pixel in
/// the two most significant bits.
#[allow(clippy::arithmetic_side_effects)]
const fn quad_bit(column: usize) -> u8 {
    6 - 2 * (column % 4) as u8
}

/// Bit of a 1-bit pixel: eight per byte, first pixel most significant.
#[allow(clippy::arithmetic_side_effects)]
const fn mono_bit(column: usize) -> u8 {
    7 - (column % 8) as u8
}
