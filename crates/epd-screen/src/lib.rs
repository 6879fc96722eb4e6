//! Framebuffer encoding and transfer engine for iTC e-paper panels
//!
//! Renders logical pixels into the packed, controller-specific bit
//! layout an electrophoretic panel expects, and orchestrates when the
//! prepared buffer may be handed to the hardware driver.
//!
//! - One uniform set/clear/flush API across panel families that differ
//!   in bits per pixel, plane count and physical split
//! - Parity dithering for composite colours the film cannot show
//!   natively
//! - Temperature-gated update-mode selection (see
//!   [`Screen::update_mode`])
//! - Power suspend/resume policy around each transfer
//!
//! The hardware itself sits behind the injected [`PanelDriver`]
//! capability, so the encoding math is fully testable on the host.
//!
//! # Example
//!
//! ```no_run
//! use epd_screen::{LogicalColor, PanelDriver, Screen, UpdateMode};
//! # fn demo<D: PanelDriver>(driver: D) -> Result<(), epd_screen::ScreenError> {
//! let mut screen = Screen::new(driver)?;
//! screen.set_temperature_c(20);
//!
//! if screen.update_mode(UpdateMode::Fast) != UpdateMode::None {
//!     screen.clear(LogicalColor::White);
//!     screen.set_pixel(0, 0, LogicalColor::Black);
//!     screen.flush();
//! }
//! # Ok(())
//! # }
//! ```

mod address;
mod buffer;
pub mod color;
pub mod driver;
mod error;
pub mod orientation;
pub mod power;
mod screen;

pub use color::LogicalColor;
pub use driver::{PanelDriver, Segments};
pub use error::ScreenError;
pub use orientation::Rotation;
pub use power::{PowerMode, PowerScope};
pub use screen::Screen;

// Re-export the specs crate: every public Screen signature uses its types.
pub use epd_specs as specs;
pub use epd_specs::{CogFamily, FilmKind, PanelProfile, PanelSku, UpdateMode};
