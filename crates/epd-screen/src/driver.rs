//! Hardware driver capability
//!
//! The [`Screen`](crate::Screen) owns encoding and orchestration; the
//! actual COG initialization sequences, SPI transfers and waveform
//! timing live behind this trait. Transfers are blocking and
//! infallible from the engine's point of view: once a buffer is handed
//! over, the driver either completes the refresh or the hardware
//! policy layer resets the panel.

use epd_specs::{CogFamily, PanelSku};

/// Borrowed views of the packed planes handed to a transfer.
///
/// Which variant a driver receives is fixed by the resolved panel
/// profile, so implementations only need to handle the shapes their
/// controller family can produce.
#[derive(Debug, Clone, Copy)]
pub enum Segments<'a> {
    /// One colour plane, one surface (small and medium BWRY).
    Single(&'a [u8]),
    /// Next and previous planes, one surface.
    Dual(&'a [u8], &'a [u8]),
    /// One colour plane split into master and slave halves (large BWRY).
    SplitSingle(&'a [u8], &'a [u8]),
    /// Two planes split into halves, in transfer order: next master,
    /// next slave, previous master, previous slave.
    Quad(&'a [u8], &'a [u8], &'a [u8], &'a [u8]),
}

impl Segments<'_> {
    /// Total number of bytes across all segments.
    pub fn len(&self) -> usize {
        match self {
            Self::Single(a) => a.len(),
            Self::Dual(a, b) | Self::SplitSingle(a, b) => a.len().saturating_add(b.len()),
            Self::Quad(a, b, c, d) => a
                .len()
                .saturating_add(b.len())
                .saturating_add(c.len())
                .saturating_add(d.len()),
        }
    }

    /// Whether the transfer carries no data.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Capability trait for the panel hardware.
///
/// One implementation per board wiring. Temperature is pushed into the
/// driver before a transfer so the COG can pick the matching waveform
/// table; the engine separately gates *which* update is requested.
pub trait PanelDriver {
    /// Packed model identifier of the connected panel.
    fn sku(&self) -> PanelSku;

    /// Controller family of the connected panel.
    fn cog(&self) -> CogFamily;

    /// Whether the auxiliary chip-select for a second half-screen is
    /// wired. Only consulted for split panels.
    fn has_aux_chip_select(&self) -> bool;

    /// Whether a switchable power rail is wired.
    fn has_power_pin(&self) -> bool;

    /// One-time controller bring-up.
    fn begin(&mut self);

    /// Re-drive control lines and restore power ahead of a transfer.
    fn resume(&mut self);

    /// Release control lines and cut the power rail.
    fn suspend(&mut self);

    /// Panel temperature for waveform selection, in degrees Celsius.
    fn set_temperature_c(&mut self, temperature: i8);

    /// Transfer the planes and run a full (normal) refresh.
    fn update_normal(&mut self, segments: Segments<'_>);

    /// Transfer the planes and run the embedded fast refresh.
    ///
    /// Only called for controller families where
    /// [`CogFamily::has_fast_update`] holds.
    fn update_fast(&mut self, segments: Segments<'_>);

    /// Blocking delay, used between the passes of a regeneration cycle.
    fn delay_ms(&mut self, ms: u32);
}
