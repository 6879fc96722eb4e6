//! Panel profile resolution
//!
//! Maps a packed SKU plus the driver-reported COG family to an immutable
//! [`PanelProfile`]: physical extents, plane count, packed stride and the
//! addressing family. Resolution happens once at initialization; every
//! later pixel operation reads the cached profile.

use core::fmt;

use crate::cog::{AddressingScheme, CogFamily};
use crate::film::FilmKind;
use crate::sku::PanelSku;

/// Physical extents (rows, columns) for a size class.
///
/// `rows` is the wide axis the buffer iterates over; `columns` is the
/// small axis that gets packed into bytes. Unknown size classes return
/// `None` and must be treated as a configuration error.
pub const fn panel_extents(size_code: u16) -> Option<(u16, u16)> {
    match size_code {
        150 | 152 => Some((200, 200)),
        154 => Some((152, 152)),
        206 => Some((248, 128)),
        213 => Some((212, 104)),
        266 => Some((296, 152)),
        271 => Some((264, 176)),
        287 => Some((296, 128)),
        290 => Some((384, 168)),
        340 | 343 => Some((392, 456)),
        370 => Some((416, 240)),
        417 => Some((300, 400)),
        437 => Some((480, 176)),
        565 => Some((600, 448)),
        581 => Some((720, 256)),
        741 => Some((800, 480)),
        // Large panels: two half-screens behind one connector.
        969 => Some((672, 960)),
        1198 => Some((768, 960)),
        _ => None,
    }
}

/// Touch digitizer extents (x max, y max) for touch-capable sizes.
///
/// Hard-coded in the touch controller; only a few sizes ship with a
/// touch layer.
pub const fn touch_extents(size_code: u16) -> Option<(u16, u16)> {
    match size_code {
        271 => Some((176, 264)),
        343 => Some((455, 391)),
        370 => Some((239, 415)),
        _ => None,
    }
}

/// Configuration errors detected while resolving a panel profile.
///
/// These are static wiring or catalog problems: they will not change
/// without a code or hardware fix, so no retry is attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecError {
    /// The SKU size sub-field is not in the supported table.
    UnsupportedSize(u16),
    /// The SKU film letter is not a known film class.
    UnknownFilm(u8),
    /// The film class cannot be driven by the reported COG family.
    CogMismatch {
        /// Film decoded from the SKU.
        film: FilmKind,
        /// COG family reported by the driver.
        cog: CogFamily,
    },
}

impl fmt::Display for SpecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedSize(size) => write!(f, "screen size {size} is not supported"),
            Self::UnknownFilm(code) => write!(f, "unknown film letter {:?}", *code as char),
            Self::CogMismatch { film, cog } => write!(
                f,
                "film {} cannot be driven by COG family {cog:?}",
                film.code() as char
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SpecError {}

/// Resolved, immutable panel profile.
///
/// Invariants, checked by construction:
/// - `plane_bytes == row_stride * rows` and fits a `u32`
/// - `row_stride * pixels-per-byte >= columns`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelProfile {
    /// The packed model identifier this profile was resolved from.
    pub sku: PanelSku,
    /// Film class decoded from the SKU.
    pub film: FilmKind,
    /// Controller family reported by the driver.
    pub cog: CogFamily,
    /// Physical extent along the wide axis (buffer rows).
    pub rows: u16,
    /// Physical extent along the small axis (packed into bytes).
    pub columns: u16,
    /// Buffer planes: 1 for BWRY, 2 otherwise.
    pub plane_count: u8,
    /// Bytes per buffer row (`columns` / pixels-per-byte).
    pub row_stride: u16,
    /// Bytes per plane (`rows * row_stride`).
    pub plane_bytes: u32,
    /// Addressing family, fixed per controller generation.
    pub addressing: AddressingScheme,
    /// Whether the panel carries a touch layer.
    pub has_touch: bool,
    /// Whether the panel is a demo-kit unit.
    pub is_demo: bool,
}

impl PanelProfile {
    /// Resolve a profile from the SKU and the driver-reported COG family.
    // SAFETY: extents come from the static table above (rows <= 800,
    // columns <= 960, pixels-per-byte is 4 or 8), so row_stride <= 240
    // and plane_bytes <= 800 * 240, well inside u32.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn resolve(sku: PanelSku, cog: CogFamily) -> Result<Self, SpecError> {
        let film =
            FilmKind::from_code(sku.film_code()).ok_or(SpecError::UnknownFilm(sku.film_code()))?;
        let (rows, columns) =
            panel_extents(sku.size_code()).ok_or(SpecError::UnsupportedSize(sku.size_code()))?;
        if !cog.supports_film(film) {
            return Err(SpecError::CogMismatch { film, cog });
        }

        let row_stride = columns / cog.pixels_per_byte();
        let plane_bytes = (rows as u32) * (row_stride as u32);

        Ok(Self {
            sku,
            film,
            cog,
            rows,
            columns,
            plane_count: cog.plane_count(),
            row_stride,
            plane_bytes,
            addressing: cog.addressing(),
            has_touch: sku.has_touch(),
            is_demo: sku.is_demo(),
        })
    }

    /// Whether the panel is addressed as two physical halves.
    pub const fn is_split(&self) -> bool {
        self.cog.is_split()
    }

    /// Large panels need the auxiliary chip-select wired for the second
    /// half-screen.
    pub const fn requires_aux_chip_select(&self) -> bool {
        matches!(self.sku.size_code(), 969 | 1198)
    }

    /// Panel diagonal in inches.
    pub fn diagonal_inches(&self) -> f32 {
        self.sku.size_code() as f32 / 100.0
    }

    /// Approximate pixel density of the panel.
    pub fn pixels_per_inch(&self) -> f32 {
        let rows = self.rows as f32;
        let columns = self.columns as f32;
        libm::sqrtf(rows * rows + columns * columns) / self.diagonal_inches()
    }
}

impl fmt::Display for PanelProfile {
    // Renders the screen description, e.g. `iTC 2.71"-Wide+Touch`.
    // SAFETY: size_code <= 4095, division and modulo by 100 cannot fail.
    #[allow(clippy::arithmetic_side_effects)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = self.sku.size_code();
        write!(
            f,
            "iTC {}.{:02}\"{}",
            size / 100,
            size % 100,
            self.film.name_suffix()
        )?;
        if self.has_touch {
            write!(f, "+Touch")?;
        } else if self.is_demo {
            write!(f, "+Demo")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]
    use super::*;
    use crate::catalog;
    use std::format;

    #[test]
    fn test_geometry_invariants_across_catalog() {
        // Every supported SKU must satisfy the packing invariants for
        // every COG family that accepts its film.
        let families = [
            CogFamily::NormalSmall,
            CogFamily::NormalMedium,
            CogFamily::NormalLarge,
            CogFamily::FastSmall,
            CogFamily::FastMedium,
            CogFamily::FastLarge,
            CogFamily::WideSmall,
            CogFamily::WideMedium,
            CogFamily::WideLarge,
            CogFamily::BwrySmall,
            CogFamily::BwryMedium,
            CogFamily::BwryLarge,
        ];

        for &sku in catalog::ALL {
            for cog in families {
                let Ok(profile) = PanelProfile::resolve(sku, cog) else {
                    continue;
                };
                assert_eq!(
                    profile.plane_bytes,
                    u32::from(profile.row_stride) * u32::from(profile.rows),
                    "plane bytes mismatch for {sku}"
                );
                assert!(
                    profile.row_stride * cog.pixels_per_byte() >= profile.columns,
                    "stride too small for {sku}"
                );
            }
        }
    }

    #[test]
    fn test_resolve_small_wide_panel() {
        let profile =
            PanelProfile::resolve(catalog::SKU_271_KS_09_TOUCH, CogFamily::WideSmall).unwrap();
        assert_eq!(profile.rows, 264);
        assert_eq!(profile.columns, 176);
        assert_eq!(profile.plane_count, 2);
        assert_eq!(profile.row_stride, 22);
        assert_eq!(profile.plane_bytes, 264 * 22);
        assert_eq!(profile.addressing, AddressingScheme::MonoPack);
        assert!(profile.has_touch);
        assert!(!profile.is_split());
    }

    #[test]
    fn test_resolve_bwry_panel() {
        let profile = PanelProfile::resolve(catalog::SKU_417_QS_0A, CogFamily::BwryMedium).unwrap();
        assert_eq!(profile.rows, 300);
        assert_eq!(profile.columns, 400);
        assert_eq!(profile.plane_count, 1);
        // 4 pixels per byte.
        assert_eq!(profile.row_stride, 100);
        assert_eq!(profile.addressing, AddressingScheme::QuadPack);
    }

    #[test]
    fn test_resolve_large_panel() {
        let profile = PanelProfile::resolve(catalog::SKU_969_CS_0B, CogFamily::NormalLarge).unwrap();
        assert_eq!(profile.rows, 672);
        assert_eq!(profile.columns, 960);
        assert!(profile.is_split());
        assert!(profile.requires_aux_chip_select());
        assert_eq!(profile.addressing, AddressingScheme::MonoPackSplit);
    }

    #[test]
    fn test_unsupported_size_is_rejected() {
        let sku = PanelSku::new(999, b'C', b'B');
        assert_eq!(
            PanelProfile::resolve(sku, CogFamily::NormalSmall),
            Err(SpecError::UnsupportedSize(999))
        );
    }

    #[test]
    fn test_unknown_film_is_rejected() {
        let sku = PanelSku::new(271, b'X', b'9');
        assert_eq!(
            PanelProfile::resolve(sku, CogFamily::NormalSmall),
            Err(SpecError::UnknownFilm(b'X'))
        );
    }

    #[test]
    fn test_film_cog_mismatch_is_rejected() {
        // A BWRY SKU on a monochrome fast controller is a wiring error.
        let err = PanelProfile::resolve(catalog::SKU_417_QS_0A, CogFamily::FastSmall).unwrap_err();
        assert!(matches!(err, SpecError::CogMismatch { .. }));
    }

    #[test]
    fn test_screen_description() {
        let profile =
            PanelProfile::resolve(catalog::SKU_271_KS_09_TOUCH, CogFamily::WideSmall).unwrap();
        assert_eq!(format!("{profile}"), "iTC 2.71\"-Wide+Touch");

        let plain = PanelProfile::resolve(catalog::SKU_154_CS_0C, CogFamily::NormalSmall).unwrap();
        assert_eq!(format!("{plain}"), "iTC 1.54\"-BW");
    }

    #[test]
    fn test_pixel_density_is_plausible() {
        let profile = PanelProfile::resolve(catalog::SKU_154_CS_0C, CogFamily::NormalSmall).unwrap();
        let ppi = profile.pixels_per_inch();
        assert!(ppi > 100.0 && ppi < 180.0, "unexpected density {ppi}");
    }

    #[test]
    fn test_touch_extents_table() {
        assert_eq!(touch_extents(271), Some((176, 264)));
        assert_eq!(touch_extents(370), Some((239, 415)));
        assert_eq!(touch_extents(154), None);
    }
}
