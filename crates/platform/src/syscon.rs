//! Shared configuration register block (GRF) access
//!
//! The general register files are one register block multiplexed across
//! unrelated hardware functions on the chip: display mux bits sit next to
//! GPIO iomux fields and clock selects owned by other drivers. A driver may
//! write to the block but never owns it, so plain read-modify-write is
//! forbidden — a concurrent writer could be interleaved between the read and
//! the write and neither side would notice.
//!
//! The hardware solves this with a write-mask protocol: the upper half of
//! every 32-bit word names the bits being modified, the lower half carries
//! their new values. Bits whose mask bit is clear are left untouched by the
//! register block itself, so no locking is needed on the writer's side.
//! [`SharedRegisterMap::write_masked`] is the only write path this crate
//! offers; there is deliberately no read-modify-write helper.

/// Raw transport to the shared register block.
///
/// Implemented by the platform's syscon provider. The implementor is
/// responsible for serializing access across devices; callers only see a
/// single fallible word write.
pub trait SysconBus {
    /// Transport error type.
    type Error: core::fmt::Debug;

    /// Write one 32-bit word at a byte offset into the block.
    fn write(&mut self, offset: u32, value: u32) -> Result<(), Self::Error>;
}

/// Errors from [`SharedRegisterMap`] writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GrfError {
    /// The host did not provide a syscon handle; the write was dropped.
    Unavailable,
    /// The backing transport rejected the write.
    Write,
}

impl core::fmt::Display for GrfError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Unavailable => write!(f, "syscon register map not available"),
            Self::Write => write!(f, "syscon register write failed"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GrfError {}

/// Handle to the shared register block, carrying the masked-write protocol.
///
/// The handle is a borrow: the block's lifetime is owned by the platform's
/// syscon registry. A device whose descriptor lacks the syscon reference
/// gets an [`absent`](SharedRegisterMap::absent) map — every write is then a
/// no-op reporting [`GrfError::Unavailable`], and the missing handle is
/// logged once rather than per call.
pub struct SharedRegisterMap<B> {
    bus: Option<B>,
    unavailable_reported: bool,
}

impl<B: SysconBus> SharedRegisterMap<B> {
    /// Wrap a live syscon handle.
    pub fn new(bus: B) -> Self {
        Self {
            bus: Some(bus),
            unavailable_reported: false,
        }
    }

    /// Construct the map for a device whose syscon reference is missing.
    pub fn absent() -> Self {
        Self {
            bus: None,
            unavailable_reported: false,
        }
    }

    /// Whether a live handle backs this map.
    ///
    /// Drivers for which the shared block is configuration-critical must
    /// treat `false` as a hard configuration error at probe time.
    pub fn is_present(&self) -> bool {
        self.bus.is_some()
    }

    /// Give the syscon handle back, consuming the map.
    pub fn release(self) -> Option<B> {
        self.bus
    }

    /// Masked write: update exactly the bits of `mask`, leaving the rest of
    /// the register to its other owners.
    ///
    /// The emitted word is `(mask << 16) | (value & mask)`. Value bits
    /// outside the mask are discarded before the write — a caller that
    /// needs to touch them must widen the mask.
    pub fn write_masked(&mut self, offset: u32, mask: u16, value: u16) -> Result<(), GrfError> {
        let Some(bus) = self.bus.as_mut() else {
            if !self.unavailable_reported {
                self.unavailable_reported = true;
                #[cfg(feature = "defmt")]
                defmt::error!(
                    "syscon map absent, dropping writes (first at offset {=u32:#x})",
                    offset
                );
            }
            return Err(GrfError::Unavailable);
        };

        // The mask occupies the upper half-word; a shift by 16 on u32 cannot
        // overflow, and the masked value fits the lower half-word.
        #[allow(clippy::arithmetic_side_effects)]
        let word = (u32::from(mask) << 16) | u32::from(value & mask);
        bus.write(offset, word).map_err(|_| GrfError::Write)
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::arithmetic_side_effects
)]
mod tests {
    use super::*;
    use crate::mocks::MockSyscon;

    #[test]
    fn test_masked_write_word_layout() {
        let mut grf = SharedRegisterMap::new(MockSyscon::new());
        grf.write_masked(0x0260, 0x00ff, 0xabcd).unwrap();

        let word = grf.bus.as_ref().unwrap().last_write(0x0260).unwrap();
        assert_eq!(word >> 16, 0x00ff, "upper half-word must equal the mask");
        assert_eq!(
            word & 0xffff,
            0x00cd,
            "lower half-word must equal value & mask"
        );
    }

    #[test]
    fn test_masked_write_zero_mask_is_noop_word() {
        let mut grf = SharedRegisterMap::new(MockSyscon::new());
        grf.write_masked(0x0260, 0x0000, 0xffff).unwrap();
        assert_eq!(grf.bus.as_ref().unwrap().last_write(0x0260), Some(0));
    }

    #[test]
    fn test_masked_write_full_mask_overwrites() {
        let mut grf = SharedRegisterMap::new(MockSyscon::new());
        grf.write_masked(0x025c, 0xffff, 0x8421).unwrap();
        assert_eq!(
            grf.bus.as_ref().unwrap().last_write(0x025c),
            Some(0xffff_8421)
        );
    }

    #[test]
    fn test_absent_map_reports_unavailable_every_call() {
        let mut grf = SharedRegisterMap::<MockSyscon>::absent();
        assert!(!grf.is_present());
        assert_eq!(grf.write_masked(0x0260, 0xffff, 0), Err(GrfError::Unavailable));
        assert_eq!(grf.write_masked(0x0260, 0xffff, 0), Err(GrfError::Unavailable));
        // Logged once; subsequent calls stay silent no-ops.
        assert!(grf.unavailable_reported);
    }

    #[test]
    fn test_transport_failure_maps_to_write_error() {
        let mut bus = MockSyscon::new();
        bus.fail_writes = true;
        let mut grf = SharedRegisterMap::new(bus);
        assert_eq!(grf.write_masked(0x0260, 0xffff, 0), Err(GrfError::Write));
    }
}
