//! Panel specifications for iTC electrophoretic (e-paper) displays
//!
//! Decodes packed panel model identifiers (SKUs) into immutable panel
//! profiles: physical extents, buffer plane count, packed-byte stride and
//! the controller addressing family. Also carries the per-film thermal
//! windows that gate fast versus normal panel updates.
//!
//! # Features
//!
//! - **no_std compatible** - Works on embedded systems
//! - **Panel catalog** - Named SKU constants for the supported screens
//! - **Serde support** - Optional serialization for TOML/JSON configs
//! - **Thermal gating** - Resolve the safe update mode for a temperature
//!
//! # Example
//!
//! ```
//! use epd_specs::{catalog, CogFamily, PanelProfile, UpdateMode};
//!
//! let sku = catalog::SKU_271_KS_09_TOUCH;
//! let profile = PanelProfile::resolve(sku, CogFamily::WideSmall).unwrap();
//!
//! assert_eq!(profile.rows, 264);
//! assert_eq!(profile.columns, 176);
//! assert_eq!(profile.plane_bytes, 264 * 176 / 8);
//!
//! // Fast update is thermally safe across the wide film's whole window.
//! let mode = profile.film.resolve_update(UpdateMode::Fast, 40);
//! assert_eq!(mode, UpdateMode::Fast);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(test)]
extern crate std;

pub mod catalog;
mod cog;
mod film;
mod profile;
mod sku;

pub use cog::{AddressingScheme, CogFamily};
pub use film::{FilmKind, UpdateMode};
pub use profile::{panel_extents, touch_extents, PanelProfile, SpecError};
pub use sku::PanelSku;
