//! The screen engine
//!
//! Owns the packed frame buffer and the injected hardware driver, and
//! enforces the ordering rules around a refresh: resolve the profile
//! once, encode pixels into the controller's layout, gate the update
//! mode on temperature, wrap every transfer in resume/suspend.

use embedded_graphics::prelude::{DrawTarget, OriginDimensions, Pixel, Size};
use epd_specs::{touch_extents, PanelProfile, UpdateMode};

use crate::address::address_of;
use crate::buffer::FrameBuffer;
use crate::color::{Encoding, LogicalColor, PixelCode};
use crate::driver::{PanelDriver, Segments};
use crate::error::ScreenError;
use crate::orientation::{orient, Rotation};
use crate::power::{PowerMode, PowerScope, PowerSettings, PowerState};

/// A panel with its frame buffer and transfer policy.
///
/// Drawing mutates only host memory; nothing reaches the hardware
/// until [`Screen::flush`]. There is no read-back: the buffer is the
/// single source of truth for what the next refresh will show.
#[derive(Debug)]
pub struct Screen<D: PanelDriver> {
    driver: D,
    profile: PanelProfile,
    encoding: Encoding,
    buffer: FrameBuffer,
    rotation: Rotation,
    temperature_c: i8,
    resolved_mode: UpdateMode,
    power: PowerSettings,
}

impl<D: PanelDriver> Screen<D> {
    /// Resolve the panel profile and bring the controller up.
    ///
    /// Fails fast on static configuration problems; a failed screen
    /// holds no buffer and has touched no hardware.
    pub fn new(mut driver: D) -> Result<Self, ScreenError> {
        let profile = match PanelProfile::resolve(driver.sku(), driver.cog()) {
            Ok(profile) => profile,
            Err(err) => {
                tracing::error!(sku = %driver.sku(), %err, "panel profile rejected");
                return Err(err.into());
            }
        };
        if profile.requires_aux_chip_select() && !driver.has_aux_chip_select() {
            tracing::error!(sku = %profile.sku, "second half-screen has no chip-select");
            return Err(ScreenError::MissingChipSelect);
        }

        driver.begin();
        driver.set_temperature_c(25);

        tracing::debug!(
            panel = %profile,
            rows = profile.rows,
            columns = profile.columns,
            planes = profile.plane_count,
            "panel ready"
        );

        Ok(Self {
            driver,
            encoding: Encoding::for_profile(&profile),
            buffer: FrameBuffer::new(&profile),
            profile,
            rotation: Rotation::default(),
            temperature_c: 25,
            resolved_mode: UpdateMode::Normal,
            power: PowerSettings::default(),
        })
    }

    /// The resolved, immutable panel profile.
    pub fn profile(&self) -> &PanelProfile {
        &self.profile
    }

    /// Logical width under the current rotation.
    pub fn width(&self) -> u16 {
        if self.rotation.swaps_axes() {
            self.profile.rows
        } else {
            self.profile.columns
        }
    }

    /// Logical height under the current rotation.
    pub fn height(&self) -> u16 {
        if self.rotation.swaps_axes() {
            self.profile.columns
        } else {
            self.profile.rows
        }
    }

    /// Current rotation of the drawing surface.
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Rotate the drawing surface. Buffer contents are unaffected;
    /// only future draws are remapped.
    pub fn set_rotation(&mut self, rotation: Rotation) {
        self.rotation = rotation;
    }

    /// Human-readable screen description, e.g. `iTC 2.71"-Wide+Touch`.
    pub fn description(&self) -> String {
        self.profile.to_string()
    }

    /// Panel diagonal in inches.
    pub fn diagonal_inches(&self) -> f32 {
        self.profile.diagonal_inches()
    }

    /// Number of colours the film shows natively.
    pub fn color_count(&self) -> u8 {
        self.profile.film.color_count()
    }

    /// Digitizer extents `(x max, y max)` for touch-capable panels.
    pub fn touch_bounds(&self) -> Result<(u16, u16), ScreenError> {
        if !self.profile.has_touch {
            return Err(ScreenError::TouchNotAvailable);
        }
        touch_extents(self.profile.sku.size_code()).ok_or(ScreenError::TouchNotAvailable)
    }

    /// Draw one pixel in logical coordinates.
    ///
    /// Off-surface points are clipped silently. Composite colours
    /// dither on the physical checkerboard, so adjacent draws line up
    /// regardless of rotation.
    // SAFETY: row and column are panel extents (<= 960), their sum is
    // far below u32 limits.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn set_pixel(&mut self, x: u16, y: u16, color: LogicalColor) {
        let Some((row, column)) = orient(
            self.rotation,
            self.profile.columns,
            self.profile.rows,
            x,
            y,
        ) else {
            return;
        };
        let even_parity = (u32::from(row) + u32::from(column)) % 2 == 0;
        let address = address_of(&self.profile, row, column);

        match self.encoding.encode(color, even_parity) {
            PixelCode::Quad(code) => self.buffer.write_quad(address, code),
            PixelCode::Mono { black } => self.buffer.set_bit(0, address, black),
            PixelCode::Dual { black, red } => {
                self.buffer.set_bit(0, address, black);
                self.buffer.set_bit(1, address, red);
            }
        }
    }

    /// Fill the whole surface with one colour.
    ///
    /// Equivalent to setting every pixel, including the checkerboard
    /// phase of dithered colours, but runs as row fills.
    pub fn clear(&mut self, color: LogicalColor) {
        self.buffer.fill(self.encoding.fill_pattern(color));
    }

    /// Resolve and cache the thermally safe update mode.
    ///
    /// The returned mode is what the next [`Screen::flush`] will use;
    /// [`UpdateMode::None`] means no transfer is safe and flush will
    /// skip. Temperature changes re-resolve the cached mode.
    pub fn update_mode(&mut self, requested: UpdateMode) -> UpdateMode {
        self.resolved_mode = self
            .profile
            .film
            .resolve_update(requested, self.temperature_c);
        self.resolved_mode
    }

    /// Set the panel temperature in Celsius.
    ///
    /// Pushed to the driver for waveform selection and used to
    /// re-resolve the cached update mode.
    pub fn set_temperature_c(&mut self, temperature: i8) {
        self.temperature_c = temperature;
        self.driver.set_temperature_c(temperature);
        self.resolved_mode = self
            .profile
            .film
            .resolve_update(self.resolved_mode, temperature);
    }

    /// Set the panel temperature in Fahrenheit.
    // SAFETY: i16 input widened to i32 before the conversion, the
    // result is clamped back into i8.
    #[allow(
        clippy::arithmetic_side_effects,
        clippy::cast_possible_truncation
    )]
    pub fn set_temperature_f(&mut self, temperature: i16) {
        let celsius = (i32::from(temperature) - 32) * 5 / 9;
        self.set_temperature_c(celsius.clamp(i32::from(i8::MIN), i32::from(i8::MAX)) as i8);
    }

    /// Last resolved update mode, as the next flush will see it.
    pub fn resolved_mode(&self) -> UpdateMode {
        self.resolved_mode
    }

    /// Transfer the buffer and refresh the panel.
    ///
    /// Resumes power first, picks the fast entry point only when the
    /// film has one and the cached gate said [`UpdateMode::Fast`], and
    /// suspends again afterwards in automatic power mode. Skipped
    /// entirely when the cached gate said [`UpdateMode::None`].
    pub fn flush(&mut self) {
        if self.resolved_mode == UpdateMode::None {
            tracing::warn!(
                temperature_c = self.temperature_c,
                "flush skipped, no thermally safe update"
            );
            return;
        }

        self.resume();

        let fast = self.profile.film.has_fast_update() && self.resolved_mode == UpdateMode::Fast;
        tracing::trace!(mode = ?self.resolved_mode, fast, "transferring frame");

        // Borrow segments in a scope so the buffer can be mutated after.
        {
            let segments = match (self.profile.plane_count, self.profile.is_split()) {
                (1, false) => Segments::Single(self.buffer.plane(0)),
                (1, true) => {
                    let (master, slave) = self.buffer.plane_halves(0);
                    Segments::SplitSingle(master, slave)
                }
                (_, false) => Segments::Dual(self.buffer.plane(0), self.buffer.plane(1)),
                (_, true) => {
                    let (next_master, next_slave) = self.buffer.plane_halves(0);
                    let (prev_master, prev_slave) = self.buffer.plane_halves(1);
                    Segments::Quad(next_master, next_slave, prev_master, prev_slave)
                }
            };
            if fast {
                self.driver.update_fast(segments);
            } else {
                self.driver.update_normal(segments);
            }
        }

        // Fast films refresh against the previously shown frame, so
        // the reference plane must now match what the panel displays.
        if self.profile.film.has_fast_update() {
            self.buffer.copy_next_to_previous();
        }

        if self.power.mode == PowerMode::Auto {
            self.suspend();
        }
    }

    /// Run the ghost-clearing regeneration cycle.
    ///
    /// Fast films flash to black and back to white; other films get a
    /// single white pass.
    pub fn regenerate(&mut self) {
        if self.profile.film.has_fast_update() {
            self.clear(LogicalColor::Black);
            self.flush();
            self.driver.delay_ms(100);
            self.clear(LogicalColor::White);
            self.flush();
            self.driver.delay_ms(100);
        } else {
            self.driver.delay_ms(100);
            self.clear(LogicalColor::White);
            self.flush();
        }
    }

    /// Configure the power policy.
    ///
    /// Without a switchable power rail the policy degrades to manual
    /// mode with nothing to release.
    pub fn set_power_profile(&mut self, mode: PowerMode, scope: PowerScope) {
        if self.driver.has_power_pin() {
            self.power.mode = mode;
            self.power.scope = scope;
        } else {
            self.power.mode = PowerMode::Manual;
            self.power.scope = PowerScope::None;
        }
    }

    /// Release the control lines and cut panel power.
    ///
    /// A no-op unless a rail is wired, the scope releases GPIOs and
    /// the panel is currently active.
    pub fn suspend(&mut self) {
        if self.driver.has_power_pin()
            && self.power.scope == PowerScope::GpioOnly
            && self.power.state == PowerState::Active
        {
            self.driver.suspend();
            self.power.state = PowerState::Suspended;
        }
    }

    /// Restore power and re-drive the control lines.
    ///
    /// Issued unconditionally before every transfer; the driver call
    /// is idempotent, so an already-active panel stays active.
    pub fn resume(&mut self) {
        self.driver.resume();
        self.power.state = PowerState::Active;
    }

    /// Borrow the hardware driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Mutably borrow the hardware driver.
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }
}

impl<D: PanelDriver> OriginDimensions for Screen<D> {
    fn size(&self) -> Size {
        Size::new(u32::from(self.width()), u32::from(self.height()))
    }
}

impl<D: PanelDriver> DrawTarget for Screen<D> {
    type Color = LogicalColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let (Ok(x), Ok(y)) = (u16::try_from(point.x), u16::try_from(point.y)) {
                self.set_pixel(x, y, color);
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        Screen::clear(self, color);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use epd_specs::{catalog, CogFamily, PanelSku};

    // Minimal stub; behavioural coverage lives in the test harness
    // crate with a recording mock.
    #[derive(Debug)]
    struct StubDriver {
        sku: PanelSku,
        cog: CogFamily,
    }

    impl PanelDriver for StubDriver {
        fn sku(&self) -> PanelSku {
            self.sku
        }
        fn cog(&self) -> CogFamily {
            self.cog
        }
        fn has_aux_chip_select(&self) -> bool {
            false
        }
        fn has_power_pin(&self) -> bool {
            false
        }
        fn begin(&mut self) {}
        fn resume(&mut self) {}
        fn suspend(&mut self) {}
        fn set_temperature_c(&mut self, _temperature: i8) {}
        fn update_normal(&mut self, _segments: Segments<'_>) {}
        fn update_fast(&mut self, _segments: Segments<'_>) {}
        fn delay_ms(&mut self, _ms: u32) {}
    }

    fn wide_screen() -> Screen<StubDriver> {
        Screen::new(StubDriver {
            sku: catalog::SKU_271_KS_09_TOUCH,
            cog: CogFamily::WideSmall,
        })
        .unwrap()
    }

    #[test]
    fn test_logical_extents_follow_rotation() {
        let mut screen = wide_screen();
        assert_eq!((screen.width(), screen.height()), (176, 264));

        screen.set_rotation(Rotation::Rotate90);
        assert_eq!((screen.width(), screen.height()), (264, 176));

        screen.set_rotation(Rotation::Rotate180);
        assert_eq!((screen.width(), screen.height()), (176, 264));
    }

    #[test]
    fn test_description() {
        let screen = wide_screen();
        assert_eq!(screen.description(), "iTC 2.71\"-Wide+Touch");
    }

    #[test]
    fn test_touch_bounds() {
        let screen = wide_screen();
        assert_eq!(screen.touch_bounds(), Ok((176, 264)));

        let plain = Screen::new(StubDriver {
            sku: catalog::SKU_154_CS_0C,
            cog: CogFamily::NormalSmall,
        })
        .unwrap();
        assert_eq!(plain.touch_bounds(), Err(ScreenError::TouchNotAvailable));
    }

    #[test]
    fn test_large_panel_requires_chip_select() {
        let err = Screen::new(StubDriver {
            sku: catalog::SKU_969_CS_0B,
            cog: CogFamily::NormalLarge,
        })
        .unwrap_err();
        assert_eq!(err, ScreenError::MissingChipSelect);
    }

    #[test]
    fn test_fahrenheit_conversion() {
        let mut screen = wide_screen();
        screen.set_temperature_f(77);
        assert_eq!(screen.temperature_c, 25);
        screen.set_temperature_f(32);
        assert_eq!(screen.temperature_c, 0);
        screen.set_temperature_f(-40);
        assert_eq!(screen.temperature_c, -40);
    }

    #[test]
    fn test_update_mode_is_cached() {
        let mut screen = wide_screen();
        assert_eq!(screen.update_mode(UpdateMode::Fast), UpdateMode::Fast);
        assert_eq!(screen.resolved_mode(), UpdateMode::Fast);

        // Cooling past the wide fast window degrades the cached mode.
        screen.set_temperature_c(-5);
        assert_eq!(screen.resolved_mode(), UpdateMode::Normal);
    }

    #[test]
    fn test_power_profile_degrades_without_rail() {
        let mut screen = wide_screen();
        screen.set_power_profile(PowerMode::Auto, PowerScope::GpioOnly);
        assert_eq!(screen.power.mode, PowerMode::Manual);
        assert_eq!(screen.power.scope, PowerScope::None);
    }
}
