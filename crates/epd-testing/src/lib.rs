//! Screen Engine Testing Utilities
//!
//! A recording [`PanelDriver`] plus independent buffer decoders, so
//! integration tests can drive a [`Screen`] end to end on the host and
//! assert on exactly what would have crossed the wire.
//!
//! # Quick start
//!
//! ```
//! use epd_screen::{LogicalColor, Screen, UpdateMode};
//! use epd_specs::{catalog, CogFamily};
//! use epd_testing::{MockPanelDriver, TransferKind};
//!
//! let driver = MockPanelDriver::new(catalog::SKU_271_KS_09_TOUCH, CogFamily::WideSmall);
//! let mut screen = Screen::new(driver).unwrap();
//!
//! screen.update_mode(UpdateMode::Fast);
//! screen.clear(LogicalColor::White);
//! screen.set_pixel(0, 0, LogicalColor::Black);
//! screen.flush();
//!
//! let transfer = &screen.driver().transfers()[0];
//! assert_eq!(transfer.kind, TransferKind::Fast);
//! ```

#![warn(clippy::all)]
#![warn(clippy::dbg_macro)]
#![warn(clippy::print_stdout)]

use epd_screen::driver::{PanelDriver, Segments};
use epd_specs::{AddressingScheme, CogFamily, PanelProfile, PanelSku};

// ─────────────────────────────────────────────────────────────────────────────
// Recording driver
// ─────────────────────────────────────────────────────────────────────────────

/// Everything a screen asks of its driver, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverEvent {
    /// One-time controller bring-up.
    Begin,
    /// Power and control lines restored.
    Resume,
    /// Power and control lines released.
    Suspend,
    /// Waveform temperature pushed down, in Celsius.
    SetTemperature(i8),
    /// Full refresh transfer.
    UpdateNormal,
    /// Embedded fast refresh transfer.
    UpdateFast,
    /// Blocking delay in milliseconds.
    Delay(u32),
}

/// Which refresh entry point a transfer used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferKind {
    /// Full, ghost-clearing refresh.
    Normal,
    /// Partial refresh against the previous frame.
    Fast,
}

/// Shape of the segments handed to one transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentShape {
    /// One colour plane.
    Single,
    /// Next plane then previous plane.
    Dual,
    /// Master half then slave half of one plane.
    SplitSingle,
    /// Next master, next slave, previous master, previous slave.
    Quad,
}

/// One captured transfer: the entry point, the segment shape and an
/// owned copy of every segment in wire order.
#[derive(Debug, Clone)]
pub struct Transfer {
    /// Which refresh entry point was called.
    pub kind: TransferKind,
    /// How the planes were segmented.
    pub shape: SegmentShape,
    /// Segment bytes in wire order.
    pub segments: Vec<Vec<u8>>,
}

impl Transfer {
    /// The full next (or only) plane, with split halves re-joined.
    pub fn next_plane(&self) -> Vec<u8> {
        match self.shape {
            SegmentShape::Single | SegmentShape::Dual => {
                self.segments.first().cloned().unwrap_or_default()
            }
            SegmentShape::SplitSingle | SegmentShape::Quad => join(self.segments.get(0..2)),
        }
    }

    /// The full previous plane, if the transfer carried one.
    pub fn previous_plane(&self) -> Option<Vec<u8>> {
        match self.shape {
            SegmentShape::Single | SegmentShape::SplitSingle => None,
            SegmentShape::Dual => self.segments.get(1).cloned(),
            SegmentShape::Quad => Some(join(self.segments.get(2..4))),
        }
    }
}

fn join(segments: Option<&[Vec<u8>]>) -> Vec<u8> {
    segments
        .unwrap_or_default()
        .iter()
        .flat_map(|segment| segment.iter().copied())
        .collect()
}

/// A [`PanelDriver`] that records instead of driving hardware.
///
/// By default no power rail and no auxiliary chip-select are wired;
/// enable them with the builder methods to exercise those paths.
#[derive(Debug, Clone)]
pub struct MockPanelDriver {
    sku: PanelSku,
    cog: CogFamily,
    aux_chip_select: bool,
    power_pin: bool,
    events: Vec<DriverEvent>,
    transfers: Vec<Transfer>,
}

impl MockPanelDriver {
    /// A driver reporting the given panel, with minimal wiring.
    pub fn new(sku: PanelSku, cog: CogFamily) -> Self {
        Self {
            sku,
            cog,
            aux_chip_select: false,
            power_pin: false,
            events: Vec::new(),
            transfers: Vec::new(),
        }
    }

    /// Wire the auxiliary chip-select for split panels.
    #[must_use]
    pub fn with_aux_chip_select(mut self) -> Self {
        self.aux_chip_select = true;
        self
    }

    /// Wire a switchable power rail.
    #[must_use]
    pub fn with_power_pin(mut self) -> Self {
        self.power_pin = true;
        self
    }

    /// Every driver call so far, in order.
    pub fn events(&self) -> &[DriverEvent] {
        &self.events
    }

    /// Every captured transfer so far, in order.
    pub fn transfers(&self) -> &[Transfer] {
        &self.transfers
    }

    /// Drop recorded events and transfers, keeping the wiring.
    pub fn reset_recording(&mut self) {
        self.events.clear();
        self.transfers.clear();
    }

    fn capture(&mut self, kind: TransferKind, segments: Segments<'_>) {
        let (shape, segments) = match segments {
            Segments::Single(a) => (SegmentShape::Single, vec![a.to_vec()]),
            Segments::Dual(a, b) => (SegmentShape::Dual, vec![a.to_vec(), b.to_vec()]),
            Segments::SplitSingle(a, b) => {
                (SegmentShape::SplitSingle, vec![a.to_vec(), b.to_vec()])
            }
            Segments::Quad(a, b, c, d) => (
                SegmentShape::Quad,
                vec![a.to_vec(), b.to_vec(), c.to_vec(), d.to_vec()],
            ),
        };
        self.transfers.push(Transfer {
            kind,
            shape,
            segments,
        });
    }
}

impl PanelDriver for MockPanelDriver {
    fn sku(&self) -> PanelSku {
        self.sku
    }

    fn cog(&self) -> CogFamily {
        self.cog
    }

    fn has_aux_chip_select(&self) -> bool {
        self.aux_chip_select
    }

    fn has_power_pin(&self) -> bool {
        self.power_pin
    }

    fn begin(&mut self) {
        self.events.push(DriverEvent::Begin);
    }

    fn resume(&mut self) {
        self.events.push(DriverEvent::Resume);
    }

    fn suspend(&mut self) {
        self.events.push(DriverEvent::Suspend);
    }

    fn set_temperature_c(&mut self, temperature: i8) {
        self.events.push(DriverEvent::SetTemperature(temperature));
    }

    fn update_normal(&mut self, segments: Segments<'_>) {
        self.events.push(DriverEvent::UpdateNormal);
        self.capture(TransferKind::Normal, segments);
    }

    fn update_fast(&mut self, segments: Segments<'_>) {
        self.events.push(DriverEvent::UpdateFast);
        self.capture(TransferKind::Fast, segments);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.events.push(DriverEvent::Delay(ms));
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Independent plane decoders
// ─────────────────────────────────────────────────────────────────────────────

/// Read one mono pixel bit back out of a captured plane.
///
/// Deliberately written from the wire format description rather than
/// shared with the engine, so encoder and decoder can disagree in
/// tests.
pub fn mono_bit(plane: &[u8], profile: &PanelProfile, row: u16, column: u16) -> bool {
    let (byte, bit) = mono_offset(profile, row, column);
    plane.get(byte).is_some_and(|&b| b & (1 << bit) != 0)
}

/// Read one 2-bit colour code back out of a captured plane.
pub fn quad_code(plane: &[u8], profile: &PanelProfile, row: u16, column: u16) -> u8 {
    let (byte, low_bit) = quad_offset(profile, row, column);
    plane
        .get(byte)
        .map_or(0, |&b| (b >> low_bit) & 0b11)
}

#[allow(clippy::arithmetic_side_effects)]
fn mono_offset(profile: &PanelProfile, row: u16, mut column: u16) -> (usize, u8) {
    let bit = 7 - (column % 8) as u8;
    if profile.addressing == AddressingScheme::MonoPackSplit {
        let mut base = 0usize;
        if column >= profile.columns / 2 {
            column -= profile.columns / 2;
            base = profile.plane_bytes as usize / 2;
        }
        let byte =
            base + usize::from(row) * usize::from(profile.row_stride / 2) + usize::from(column / 8);
        (byte, bit)
    } else {
        let byte = usize::from(row) * usize::from(profile.row_stride) + usize::from(column / 8);
        (byte, bit)
    }
}

#[allow(clippy::arithmetic_side_effects)]
fn quad_offset(profile: &PanelProfile, row: u16, mut column: u16) -> (usize, u8) {
    let low_bit = 6 - 2 * (column % 4) as u8;
    if profile.addressing == AddressingScheme::QuadPackSplit {
        let mut base = 0usize;
        if column >= profile.columns / 2 {
            column -= profile.columns / 2;
            base = profile.plane_bytes as usize / 2;
        }
        let byte =
            base + usize::from(row) * usize::from(profile.row_stride / 2) + usize::from(column / 4);
        (byte, low_bit)
    } else {
        let byte = usize::from(row) * usize::from(profile.row_stride) + usize::from(column / 4);
        (byte, low_bit)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Logging
// ─────────────────────────────────────────────────────────────────────────────

/// Install a test subscriber honouring `RUST_LOG`. Safe to call from
/// every test; only the first call wins.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::indexing_slicing)]
    use super::*;
    use epd_specs::catalog;

    #[test]
    fn test_mock_records_call_order() {
        let mut driver =
            MockPanelDriver::new(catalog::SKU_154_CS_0C, CogFamily::NormalSmall);
        driver.begin();
        driver.set_temperature_c(25);
        driver.resume();
        driver.update_normal(Segments::Single(&[1, 2, 3]));
        driver.suspend();

        assert_eq!(
            driver.events(),
            &[
                DriverEvent::Begin,
                DriverEvent::SetTemperature(25),
                DriverEvent::Resume,
                DriverEvent::UpdateNormal,
                DriverEvent::Suspend,
            ]
        );
        assert_eq!(driver.transfers()[0].segments, vec![vec![1, 2, 3]]);
    }

    #[test]
    fn test_transfer_plane_reassembly() {
        let transfer = Transfer {
            kind: TransferKind::Normal,
            shape: SegmentShape::Quad,
            segments: vec![vec![1], vec![2], vec![3], vec![4]],
        };
        assert_eq!(transfer.next_plane(), vec![1, 2]);
        assert_eq!(transfer.previous_plane(), Some(vec![3, 4]));

        let single = Transfer {
            kind: TransferKind::Normal,
            shape: SegmentShape::Single,
            segments: vec![vec![9]],
        };
        assert_eq!(single.next_plane(), vec![9]);
        assert_eq!(single.previous_plane(), None);
    }

    #[test]
    fn test_decoders_on_handmade_planes() {
        let profile =
            PanelProfile::resolve(catalog::SKU_154_CS_0C, CogFamily::NormalSmall).unwrap();
        let mut plane = vec![0u8; profile.plane_bytes as usize];
        // Row 1, column 0 is bit 7 of the second row's first byte.
        plane[usize::from(profile.row_stride)] = 0b1000_0000;
        assert!(mono_bit(&plane, &profile, 1, 0));
        assert!(!mono_bit(&plane, &profile, 0, 0));
        assert!(!mono_bit(&plane, &profile, 1, 1));
    }
}
