//! Packed frame storage
//!
//! One contiguous allocation holding the panel's plane(s) in transfer
//! order. All offsets come from the addressing module, which stays
//! inside the plane by construction; out-of-range writes are dropped
//! rather than panicking.

use crate::address::PixelAddress;
use crate::color::FillPattern;
use epd_specs::PanelProfile;

#[derive(Debug)]
pub(crate) struct FrameBuffer {
    data: Vec<u8>,
    plane_bytes: usize,
    plane_count: usize,
    /// Bytes per buffer row, halved on split panels where each half
    /// is laid out row-major on its own.
    row_span: usize,
}

impl FrameBuffer {
    /// Allocate zeroed planes for the resolved panel.
    // SAFETY: plane_bytes <= 800 * 240 and plane_count <= 2, the
    // product is far below usize limits.
    #[allow(clippy::arithmetic_side_effects)]
    pub(crate) fn new(profile: &PanelProfile) -> Self {
        let plane_bytes = profile.plane_bytes as usize;
        let plane_count = usize::from(profile.plane_count);
        let row_span = if profile.is_split() {
            usize::from(profile.row_stride) / 2
        } else {
            usize::from(profile.row_stride)
        };
        Self {
            data: vec![0; plane_bytes * plane_count],
            plane_bytes,
            plane_count,
            row_span,
        }
    }

    /// Borrow one whole plane.
    pub(crate) fn plane(&self, index: usize) -> &[u8] {
        self.plane_range(index)
            .and_then(|range| self.data.get(range))
            .unwrap_or(&[])
    }

    /// Borrow the master and slave halves of one plane.
    #[allow(clippy::arithmetic_side_effects)]
    pub(crate) fn plane_halves(&self, index: usize) -> (&[u8], &[u8]) {
        let plane = self.plane(index);
        plane.split_at(plane.len() / 2)
    }

    /// Set or clear one pixel bit in a plane.
    pub(crate) fn set_bit(&mut self, plane: usize, address: PixelAddress, value: bool) {
        if let Some(byte) = self.byte_mut(plane, address.byte) {
            if value {
                *byte |= 1 << address.bit;
            } else {
                *byte &= !(1 << address.bit);
            }
        }
    }

    /// Overwrite one 2-bit colour code; `address.bit` is the low bit.
    pub(crate) fn write_quad(&mut self, address: PixelAddress, code: u8) {
        if let Some(byte) = self.byte_mut(0, address.byte) {
            *byte &= !(0b11 << address.bit);
            *byte |= (code & 0b11) << address.bit;
        }
    }

    /// Fill one plane with a row-parity pattern.
    pub(crate) fn fill_plane(&mut self, plane: usize, even: u8, odd: u8) {
        let Some(range) = self.plane_range(plane) else {
            return;
        };
        let row_span = self.row_span;
        let Some(slice) = self.data.get_mut(range) else {
            return;
        };
        if even == odd {
            slice.fill(even);
            return;
        }
        for (row, chunk) in slice.chunks_exact_mut(row_span).enumerate() {
            chunk.fill(if row % 2 == 0 { even } else { odd });
        }
    }

    /// Fill every plane from the per-plane bytes of a pattern.
    pub(crate) fn fill(&mut self, pattern: FillPattern) {
        for plane in 0..self.plane_count {
            let (Some(&even), Some(&odd)) = (pattern.even.get(plane), pattern.odd.get(plane))
            else {
                continue;
            };
            self.fill_plane(plane, even, odd);
        }
    }

    /// Copy the next plane over the previous one after a fast-film
    /// transfer, so the controller's delta reference stays truthful.
    pub(crate) fn copy_next_to_previous(&mut self) {
        if self.plane_count < 2 {
            return;
        }
        let (next, previous) = self.data.split_at_mut(self.plane_bytes);
        previous.copy_from_slice(next);
    }

    #[allow(clippy::arithmetic_side_effects)]
    fn plane_range(&self, index: usize) -> Option<core::ops::Range<usize>> {
        if index >= self.plane_count {
            return None;
        }
        let start = index * self.plane_bytes;
        Some(start..start + self.plane_bytes)
    }

    #[allow(clippy::arithmetic_side_effects)]
    fn byte_mut(&mut self, plane: usize, offset: usize) -> Option<&mut u8> {
        if plane >= self.plane_count || offset >= self.plane_bytes {
            return None;
        }
        self.data.get_mut(plane * self.plane_bytes + offset)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::arithmetic_side_effects, clippy::indexing_slicing)]
    use super::*;
    use crate::address::PixelAddress;
    use crate::color::Encoding;
    use crate::LogicalColor;
    use epd_specs::{catalog, CogFamily, PanelProfile};

    fn dual_buffer() -> (PanelProfile, FrameBuffer) {
        let profile =
            PanelProfile::resolve(catalog::SKU_271_KS_09_TOUCH, CogFamily::WideSmall).unwrap();
        let buffer = FrameBuffer::new(&profile);
        (profile, buffer)
    }

    #[test]
    fn test_new_buffer_is_zeroed() {
        let (profile, buffer) = dual_buffer();
        assert_eq!(buffer.plane(0).len(), profile.plane_bytes as usize);
        assert_eq!(buffer.plane(1).len(), profile.plane_bytes as usize);
        assert!(buffer.plane(0).iter().all(|&b| b == 0));
        assert!(buffer.plane(2).is_empty());
    }

    #[test]
    fn test_set_and_clear_bit() {
        let (_, mut buffer) = dual_buffer();
        let address = PixelAddress { byte: 10, bit: 3 };

        buffer.set_bit(0, address, true);
        assert_eq!(buffer.plane(0)[10], 0b0000_1000);
        assert_eq!(buffer.plane(1)[10], 0);

        buffer.set_bit(0, address, false);
        assert_eq!(buffer.plane(0)[10], 0);
    }

    #[test]
    fn test_out_of_plane_writes_are_dropped() {
        let (profile, mut buffer) = dual_buffer();
        let oob = PixelAddress {
            byte: profile.plane_bytes as usize,
            bit: 0,
        };
        buffer.set_bit(0, oob, true);
        buffer.set_bit(5, PixelAddress { byte: 0, bit: 0 }, true);
        assert!(buffer.plane(0).iter().all(|&b| b == 0));
    }

    #[test]
    fn test_write_quad_replaces_code() {
        let profile = PanelProfile::resolve(catalog::SKU_417_QS_0A, CogFamily::BwryMedium).unwrap();
        let mut buffer = FrameBuffer::new(&profile);
        let address = PixelAddress { byte: 0, bit: 4 };

        buffer.write_quad(address, 0b11);
        assert_eq!(buffer.plane(0)[0], 0b0011_0000);
        buffer.write_quad(address, 0b01);
        assert_eq!(buffer.plane(0)[0], 0b0001_0000);
    }

    #[test]
    fn test_alternating_fill_follows_row_parity() {
        let (profile, mut buffer) = dual_buffer();
        buffer.fill_plane(0, 0xAA, 0x55);

        let stride = profile.row_stride as usize;
        assert_eq!(buffer.plane(0)[0], 0xAA);
        assert_eq!(buffer.plane(0)[stride], 0x55);
        assert_eq!(buffer.plane(0)[2 * stride], 0xAA);
    }

    #[test]
    fn test_split_fill_uses_half_stride_rows() {
        let profile = PanelProfile::resolve(catalog::SKU_969_CS_0B, CogFamily::NormalLarge).unwrap();
        let mut buffer = FrameBuffer::new(&profile);
        buffer.fill_plane(0, 0xAA, 0x55);

        let half_stride = profile.row_stride as usize / 2;
        let (master, slave) = buffer.plane_halves(0);
        assert_eq!(master[0], 0xAA);
        assert_eq!(master[half_stride], 0x55);
        // The slave half starts at an even row again.
        assert_eq!(slave[0], 0xAA);
        assert_eq!(slave[half_stride], 0x55);
    }

    #[test]
    fn test_fill_pattern_covers_both_planes() {
        let (_, mut buffer) = dual_buffer();
        buffer.fill(Encoding::DualPlane.fill_pattern(LogicalColor::Red));
        assert!(buffer.plane(0).iter().all(|&b| b == 0x00));
        assert!(buffer.plane(1).iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn test_copy_next_to_previous() {
        let (_, mut buffer) = dual_buffer();
        buffer.set_bit(0, PixelAddress { byte: 42, bit: 1 }, true);
        buffer.copy_next_to_previous();
        assert_eq!(buffer.plane(1)[42], 0b0000_0010);
        assert_eq!(buffer.plane(0), buffer.plane(1));
    }

    #[test]
    fn test_plane_halves_split_evenly() {
        let (profile, buffer) = dual_buffer();
        let (master, slave) = buffer.plane_halves(0);
        assert_eq!(master.len(), slave.len());
        assert_eq!(
            master.len() + slave.len(),
            profile.plane_bytes as usize
        );
    }
}
