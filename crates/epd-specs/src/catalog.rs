//! Supported panel catalog
//!
//! Named SKU constants for the screens this library has been validated
//! against. Any SKU with a known size class and film letter will
//! resolve; these are the reference part numbers.

use crate::sku::PanelSku;

/// 1.52" standard monochrome.
pub const SKU_152_CS_0J: PanelSku = PanelSku::new(152, b'C', b'J');

/// 1.54" standard monochrome.
pub const SKU_154_CS_0C: PanelSku = PanelSku::new(154, b'C', b'C');

/// 2.13" monochrome with embedded fast update.
pub const SKU_213_PS_0E: PanelSku = PanelSku::new(213, b'P', b'E');

/// 2.66" wide temperature with embedded fast update.
pub const SKU_266_KS_0C: PanelSku = PanelSku::new(266, b'K', b'C');

/// 2.71" wide temperature, touch variant.
pub const SKU_271_KS_09_TOUCH: PanelSku = PanelSku::new(271, b'K', b'9').with_touch();

/// 2.90" wide temperature with embedded fast update.
pub const SKU_290_KS_0F: PanelSku = PanelSku::new(290, b'K', b'F');

/// 3.40" wide temperature with embedded fast update.
pub const SKU_340_KS_0G: PanelSku = PanelSku::new(340, b'K', b'G');

/// 3.43" wide temperature, touch variant.
pub const SKU_343_KS_0B_TOUCH: PanelSku = PanelSku::new(343, b'K', b'B').with_touch();

/// 3.70" fast update, touch variant.
pub const SKU_370_PS_0C_TOUCH: PanelSku = PanelSku::new(370, b'P', b'C').with_touch();

/// 4.17" black/white/red/yellow "Spectra 4".
pub const SKU_417_QS_0A: PanelSku = PanelSku::new(417, b'Q', b'A');

/// 4.37" monochrome with embedded fast update.
pub const SKU_437_PS_0C: PanelSku = PanelSku::new(437, b'P', b'C');

/// 5.65" black/white/red "Spectra".
pub const SKU_565_JS_08: PanelSku = PanelSku::new(565, b'J', b'8');

/// 7.41" standard monochrome.
pub const SKU_741_CS_08: PanelSku = PanelSku::new(741, b'C', b'8');

/// 9.69" standard monochrome, two half-screens.
pub const SKU_969_CS_0B: PanelSku = PanelSku::new(969, b'C', b'B');

/// 11.98" standard monochrome, two half-screens.
pub const SKU_B98_CS_0B: PanelSku = PanelSku::new(1198, b'C', b'B');

/// 11.98" black/white/red/yellow, two half-screens.
pub const SKU_B98_QS_0B: PanelSku = PanelSku::new(1198, b'Q', b'B');

/// Every reference SKU, for table-driven tests and reports.
pub const ALL: &[PanelSku] = &[
    SKU_152_CS_0J,
    SKU_154_CS_0C,
    SKU_213_PS_0E,
    SKU_266_KS_0C,
    SKU_271_KS_09_TOUCH,
    SKU_290_KS_0F,
    SKU_340_KS_0G,
    SKU_343_KS_0B_TOUCH,
    SKU_370_PS_0C_TOUCH,
    SKU_417_QS_0A,
    SKU_437_PS_0C,
    SKU_565_JS_08,
    SKU_741_CS_08,
    SKU_969_CS_0B,
    SKU_B98_CS_0B,
    SKU_B98_QS_0B,
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{panel_extents, FilmKind};

    #[test]
    fn test_catalog_sizes_are_supported() {
        for sku in ALL {
            assert!(
                panel_extents(sku.size_code()).is_some(),
                "no extents for {sku}"
            );
        }
    }

    #[test]
    fn test_catalog_films_are_known() {
        for sku in ALL {
            assert!(
                FilmKind::from_code(sku.film_code()).is_some(),
                "unknown film for {sku}"
            );
        }
    }

    #[test]
    fn test_touch_skus_have_touch_extents() {
        use crate::touch_extents;
        for sku in ALL {
            if sku.has_touch() {
                assert!(
                    touch_extents(sku.size_code()).is_some(),
                    "touch SKU {sku} has no digitizer extents"
                );
            }
        }
    }
}
