//! Logical-to-physical coordinate mapping
//!
//! The packed buffer is always laid out along the panel's physical
//! axes. Callers draw in logical coordinates under one of four
//! rotations; this module maps each logical point to its physical
//! position, or reports it as off-panel.

/// Logical rotation of the drawing surface, in 90 degree steps
/// counted clockwise from the connector-down position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    /// Connector down; logical width is the panel's small axis.
    #[default]
    Rotate0,
    /// Quarter turn; logical width is the panel's wide axis.
    Rotate90,
    /// Upside down.
    Rotate180,
    /// Three-quarter turn.
    Rotate270,
}

impl From<u8> for Rotation {
    /// Wraps, so `4` means no rotation again.
    fn from(quarter_turns: u8) -> Self {
        match quarter_turns % 4 {
            1 => Self::Rotate90,
            2 => Self::Rotate180,
            3 => Self::Rotate270,
            _ => Self::Rotate0,
        }
    }
}

impl Rotation {
    /// Whether the logical axes are swapped relative to the panel.
    pub const fn swaps_axes(self) -> bool {
        matches!(self, Self::Rotate90 | Self::Rotate270)
    }
}

/// Map a logical point to physical `(row, column)` coordinates.
///
/// `columns` and `rows` are the physical extents from the panel
/// profile. Returns `None` when the point falls outside the logical
/// surface; callers clip silently.
// SAFETY: subtractions only run after the matching bound check, so
// they cannot underflow.
#[allow(clippy::arithmetic_side_effects)]
pub(crate) fn orient(
    rotation: Rotation,
    columns: u16,
    rows: u16,
    x: u16,
    y: u16,
) -> Option<(u16, u16)> {
    match rotation {
        Rotation::Rotate0 => (x < columns && y < rows).then_some((y, x)),
        Rotation::Rotate90 => (x < rows && y < columns).then(|| (x, columns - 1 - y)),
        Rotation::Rotate180 => {
            (x < columns && y < rows).then(|| (rows - 1 - y, columns - 1 - x))
        }
        Rotation::Rotate270 => (x < rows && y < columns).then(|| (rows - 1 - x, y)),
    }
}
