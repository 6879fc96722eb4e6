//! Controller (chip-on-glass) families
//!
//! The COG generation determines the buffer plane count, the packed bit
//! density and whether the panel is addressed as one surface or as two
//! physical halves. The addressing family is derived once here and
//! cached in the panel profile, so the per-pixel path never re-dispatches
//! on the controller type.

use crate::film::FilmKind;

/// Controller families, as reported by the hardware driver.
///
/// Large panels combine two half-screens behind one connector and are
/// addressed as two physical halves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum CogFamily {
    /// Normal-update controller, small panels.
    NormalSmall,
    /// Normal-update controller, medium panels.
    NormalMedium,
    /// Normal-update controller, large split panels.
    NormalLarge,
    /// Embedded fast-update controller, small panels.
    FastSmall,
    /// Embedded fast-update controller, medium panels.
    FastMedium,
    /// Embedded fast-update controller, large split panels.
    FastLarge,
    /// Wide-temperature fast-update controller, small panels.
    WideSmall,
    /// Wide-temperature fast-update controller, medium panels.
    WideMedium,
    /// Wide-temperature fast-update controller, large split panels.
    WideLarge,
    /// Black/white/red/yellow controller, small panels.
    BwrySmall,
    /// Black/white/red/yellow controller, medium panels.
    BwryMedium,
    /// Black/white/red/yellow controller, large split panels.
    BwryLarge,
}

/// Packed-buffer addressing family, derived from the COG family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum AddressingScheme {
    /// 8 pixels per byte, one surface.
    MonoPack,
    /// 8 pixels per byte, two physical halves split at the midline.
    MonoPackSplit,
    /// 4 pixels per byte (2-bit colour codes), one surface.
    QuadPack,
    /// 4 pixels per byte, two physical halves split at the midline.
    QuadPackSplit,
}

impl CogFamily {
    /// Whether this is a black/white/red/yellow (2-bit) controller.
    pub const fn is_bwry(self) -> bool {
        matches!(self, Self::BwrySmall | Self::BwryMedium | Self::BwryLarge)
    }

    /// Whether the controller supports the embedded fast-update waveform.
    pub const fn has_fast_update(self) -> bool {
        matches!(
            self,
            Self::FastSmall
                | Self::FastMedium
                | Self::FastLarge
                | Self::WideSmall
                | Self::WideMedium
                | Self::WideLarge
        )
    }

    /// Whether the panel is addressed as two physical halves.
    pub const fn is_split(self) -> bool {
        matches!(
            self,
            Self::NormalLarge | Self::FastLarge | Self::WideLarge | Self::BwryLarge
        )
    }

    /// Number of buffer planes: one packed colour plane for BWRY, two
    /// planes (colour, or next/previous) for everything else.
    pub const fn plane_count(self) -> u8 {
        if self.is_bwry() {
            1
        } else {
            2
        }
    }

    /// Packed bit density per pixel.
    pub const fn bits_per_pixel(self) -> u8 {
        if self.is_bwry() {
            2
        } else {
            1
        }
    }

    /// Pixels packed into one buffer byte.
    pub const fn pixels_per_byte(self) -> u16 {
        (8 / self.bits_per_pixel()) as u16
    }

    /// The addressing family, fixed per controller generation.
    pub const fn addressing(self) -> AddressingScheme {
        match (self.is_bwry(), self.is_split()) {
            (true, true) => AddressingScheme::QuadPackSplit,
            (true, false) => AddressingScheme::QuadPack,
            (false, true) => AddressingScheme::MonoPackSplit,
            (false, false) => AddressingScheme::MonoPack,
        }
    }

    /// Whether this controller generation can drive the given film.
    ///
    /// Touch variants of the fast and wide films report the same COG
    /// family as their plain counterparts.
    pub const fn supports_film(self, film: FilmKind) -> bool {
        match self {
            Self::NormalSmall | Self::NormalMedium | Self::NormalLarge => matches!(
                film,
                FilmKind::Standard | FilmKind::Freezer | FilmKind::Bwr | FilmKind::Bwy
            ),
            Self::FastSmall | Self::FastMedium | Self::FastLarge => {
                matches!(film, FilmKind::Fast)
            }
            Self::WideSmall | Self::WideMedium | Self::WideLarge => {
                matches!(film, FilmKind::Wide)
            }
            Self::BwrySmall | Self::BwryMedium | Self::BwryLarge => {
                matches!(film, FilmKind::Bwry)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_counts() {
        assert_eq!(CogFamily::BwrySmall.plane_count(), 1);
        assert_eq!(CogFamily::BwryLarge.plane_count(), 1);
        assert_eq!(CogFamily::NormalSmall.plane_count(), 2);
        assert_eq!(CogFamily::WideLarge.plane_count(), 2);
    }

    #[test]
    fn test_bit_density() {
        assert_eq!(CogFamily::BwryMedium.bits_per_pixel(), 2);
        assert_eq!(CogFamily::BwryMedium.pixels_per_byte(), 4);
        assert_eq!(CogFamily::FastSmall.bits_per_pixel(), 1);
        assert_eq!(CogFamily::FastSmall.pixels_per_byte(), 8);
    }

    #[test]
    fn test_addressing_families() {
        assert_eq!(CogFamily::BwrySmall.addressing(), AddressingScheme::QuadPack);
        assert_eq!(
            CogFamily::BwryLarge.addressing(),
            AddressingScheme::QuadPackSplit
        );
        assert_eq!(CogFamily::WideSmall.addressing(), AddressingScheme::MonoPack);
        assert_eq!(
            CogFamily::NormalLarge.addressing(),
            AddressingScheme::MonoPackSplit
        );
    }

    #[test]
    fn test_only_large_panels_split() {
        assert!(CogFamily::NormalLarge.is_split());
        assert!(CogFamily::BwryLarge.is_split());
        assert!(!CogFamily::NormalMedium.is_split());
        assert!(!CogFamily::WideSmall.is_split());
    }

    #[test]
    fn test_film_compatibility() {
        assert!(CogFamily::NormalSmall.supports_film(FilmKind::Standard));
        assert!(CogFamily::NormalSmall.supports_film(FilmKind::Bwr));
        assert!(!CogFamily::NormalSmall.supports_film(FilmKind::Fast));

        assert!(CogFamily::FastMedium.supports_film(FilmKind::Fast));
        assert!(!CogFamily::FastMedium.supports_film(FilmKind::Wide));

        assert!(CogFamily::WideSmall.supports_film(FilmKind::Wide));
        assert!(CogFamily::BwryLarge.supports_film(FilmKind::Bwry));
        assert!(!CogFamily::BwryLarge.supports_film(FilmKind::Bwr));
    }
}
