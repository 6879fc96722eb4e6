//! Packed panel model identifiers
//!
//! A panel SKU is one packed integer; fixed-width sub-fields encode the
//! size class, the film letter, the controller revision letter and the
//! capability flags. Geometry and addressing both key off these
//! sub-fields, so the layout is a de-facto wire format.

use core::fmt;

/// Capability flag: panel carries a touch layer.
const FLAG_TOUCH: u32 = 0b0001;

/// Capability flag: demo-kit panel.
const FLAG_DEMO: u32 = 0b0010;

/// Packed panel model identifier.
///
/// Layout, most significant bits first:
///
/// | bits  | field                               |
/// |-------|-------------------------------------|
/// | 31-28 | capability flags (touch, demo)      |
/// | 27-16 | size class, diagonal in 1/100 inch  |
/// | 15-8  | film letter (ASCII)                 |
/// | 7-0   | controller revision letter (ASCII)  |
///
/// The commercial form renders as `271-KS-09-Touch`: size class, film
/// letter + `S`, `0` + revision letter, then the capability suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct PanelSku(u32);

impl PanelSku {
    /// Pack a SKU from its sub-fields, with no capability flags set.
    pub const fn new(size: u16, film: u8, revision: u8) -> Self {
        Self((((size as u32) & 0x0fff) << 16) | ((film as u32) << 8) | (revision as u32))
    }

    /// Mark the panel as touch-capable.
    pub const fn with_touch(self) -> Self {
        Self(self.0 | (FLAG_TOUCH << 28))
    }

    /// Mark the panel as a demo-kit unit.
    pub const fn with_demo(self) -> Self {
        Self(self.0 | (FLAG_DEMO << 28))
    }

    /// The raw packed value.
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Rebuild a SKU from a raw packed value.
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Size class: panel diagonal in hundredths of an inch (e.g. 271).
    pub const fn size_code(self) -> u16 {
        ((self.0 >> 16) & 0x0fff) as u16
    }

    /// Film letter (ASCII), e.g. `b'K'` for wide-temperature film.
    pub const fn film_code(self) -> u8 {
        ((self.0 >> 8) & 0xff) as u8
    }

    /// Controller revision letter (ASCII).
    pub const fn revision_code(self) -> u8 {
        (self.0 & 0xff) as u8
    }

    /// Whether the panel carries a touch layer.
    pub const fn has_touch(self) -> bool {
        (self.0 >> 28) & FLAG_TOUCH != 0
    }

    /// Whether the panel is a demo-kit unit.
    pub const fn is_demo(self) -> bool {
        (self.0 >> 28) & FLAG_DEMO != 0
    }
}

impl fmt::Display for PanelSku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}S-0{}",
            self.size_code(),
            self.film_code() as char,
            self.revision_code() as char
        )?;
        if self.has_touch() {
            write!(f, "-Touch")?;
        } else if self.is_demo() {
            write!(f, "-Demo")?;
        }
        Ok(())
    }
}
