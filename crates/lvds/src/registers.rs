//! RK3288 LVDS transmitter register map
//!
//! Source: RK3288 TRM, GRF chapter (SOC_CON6/SOC_CON7/GPIO1D_IOMUX fields)
//! and the LVDS PHY register window.
//!
//! Two distinct register spaces meet here:
//!
//! - The **GRF fields**: half-word values for the shared syscon block,
//!   always written through the masked-write protocol. SOC_CON7 carries the
//!   whole output configuration; SOC_CON6 bit 3 selects which VOP feeds the
//!   transmitter; GPIO1D_IOMUX re-muxes the parallel-RGB pins.
//! - The **PHY window**: the device-private MMIO window holding the PLL and
//!   TX enables plus two banks of per-channel analogue tuning registers.
//!   The channel banks exist in duplicate: every value written to an offset
//!   in `0x000..=0x0ff` must also be written to the shadow bank at
//!   `+0x100`, with a barrier after the pair.

// ---------------------------------------------------------------------------
// PHY window: mirrored channel banks
// ---------------------------------------------------------------------------

/// Byte distance between a channel register and its shadow copy.
pub const MIRROR_BANK_STRIDE: u32 = 0x100;

/// Channel 0 analogue control 0 — drive strength / enable bits.
pub const CH0_REG0: u32 = 0x00;
/// Channel 0 analogue control 1.
pub const CH0_REG1: u32 = 0x04;
/// Channel 0 analogue control 2 — lane enables.
pub const CH0_REG2: u32 = 0x08;
/// Channel 0 analogue control 3.
pub const CH0_REG3: u32 = 0x0c;
/// Channel 0 analogue control 4.
pub const CH0_REG4: u32 = 0x10;
/// Channel 0 analogue control 5.
pub const CH0_REG5: u32 = 0x14;
/// Channel 0 bias control.
pub const CH0_REGD: u32 = 0x34;
/// Channel 0 common-mode control.
pub const CH0_REG20: u32 = 0x80;

/// Channel 1 bank base (same layout as channel 0).
pub const CH1_REG0: u32 = 0x100;
/// Channel 1 analogue control 1.
pub const CH1_REG1: u32 = 0x104;
/// Channel 1 analogue control 2.
pub const CH1_REG2: u32 = 0x108;
/// Channel 1 analogue control 3.
pub const CH1_REG3: u32 = 0x10c;
/// Channel 1 analogue control 4.
pub const CH1_REG4: u32 = 0x110;
/// Channel 1 analogue control 5.
pub const CH1_REG5: u32 = 0x114;
/// Channel 1 bias control.
pub const CH1_REGD: u32 = 0x134;

// ---------------------------------------------------------------------------
// PHY window: PLL / TX control
// ---------------------------------------------------------------------------

/// PLL control register.
pub const CFG_REGC: u32 = 0x00c0;
/// CFG_REGC value: PLL running.
pub const CFG_REGC_PLL_ENABLE: u32 = 0x00;
/// CFG_REGC value: PLL powered down.
pub const CFG_REGC_PLL_DISABLE: u32 = 0xff;

/// Transmitter control register.
pub const CFG_REG21: u32 = 0x0084;
/// CFG_REG21 value: drivers enabled.
pub const CFG_REG21_TX_ENABLE: u32 = 0x92;
/// CFG_REG21 value: drivers tri-stated.
pub const CFG_REG21_TX_DISABLE: u32 = 0x00;

// ---------------------------------------------------------------------------
// GRF SOC_CON7 fields (low half-word; write with mask CON7_WRITE_MASK)
// ---------------------------------------------------------------------------

/// Data mapping select: set = JEIDA bit order, clear = VESA.
pub const FORMAT_JEIDA: u16 = 1 << 0;
/// Data mapping select: VESA bit order (field cleared).
pub const FORMAT_VESA: u16 = 0;
/// Data width select: set = 18-bit, clear = 24-bit.
pub const WIDTH_18BIT: u16 = 1 << 1;
/// Data width select: 24-bit (field cleared).
pub const WIDTH_24BIT: u16 = 0;
/// MSB-first lane order select. Left at its reset value by this driver.
pub const MSB_SEL: u16 = 1 << 3;
/// Dual-channel (even/odd pixel split) enable.
pub const DUAL_CHANNEL: u16 = 1 << 4;
/// TTL bypass: route parallel RGB through both channels' pads.
pub const TTL_EN: u16 = 1 << 6;
/// Serializer start-phase reset, needed when the back porch is odd.
pub const START_PHASE_RST_1: u16 = 1 << 7;
/// Pixel clock polarity (set = rising-edge latch).
pub const DCLK_POL: u16 = 1 << 8;
/// Horizontal sync polarity (set = active high).
pub const HSYNC_POL: u16 = 1 << 9;
/// Channel 0 enable.
pub const CH0_EN: u16 = 1 << 11;
/// Channel 1 enable.
pub const CH1_EN: u16 = 1 << 12;
/// Transmitter power-down.
pub const PWRDN: u16 = 1 << 15;

/// Mode-set rewrites the whole SOC_CON7 low half-word.
pub const CON7_WRITE_MASK: u16 = 0xffff;

/// Power-off SOC_CON7 value: everything cleared except power-down.
pub const CON7_RESET_VALUE: u16 = PWRDN;

// ---------------------------------------------------------------------------
// GRF SOC_CON6 fields
// ---------------------------------------------------------------------------

/// VOP select: set = the little pipe feeds this transmitter.
pub const SEL_VOP_LIT: u16 = 1 << 3;

// ---------------------------------------------------------------------------
// GRF GPIO1D iomux
// ---------------------------------------------------------------------------

/// GPIO1D iomux field covering the parallel-RGB data pins.
pub const GPIO1D_IOMUX_RGB_MASK: u16 = 0x007f;
/// GPIO1D iomux value routing those pins to the LCD controller function.
pub const GPIO1D_IOMUX_RGB: u16 = 0x007f;

// ---------------------------------------------------------------------------
// Channel register tables
// ---------------------------------------------------------------------------

/// Channel programme for the TTL (parallel RGB) path.
///
/// RGB drives the pixel bus through both channels' pads, so both banks are
/// programmed; every entry is mirror-written to its shadow as well.
pub const RGB_CHANNEL_TABLE: [(u32, u32); 15] = [
    (CH0_REG0, 0x7f),
    (CH0_REG1, 0x40),
    (CH0_REG2, 0x00),
    (CH0_REG4, 0x3f),
    (CH0_REG5, 0x3f),
    (CH0_REG3, 0x46),
    (CH0_REGD, 0x0a),
    (CH0_REG20, 0x44),
    (CH1_REG0, 0x7f),
    (CH1_REG1, 0x40),
    (CH1_REG2, 0x00),
    (CH1_REG3, 0x46),
    (CH1_REG4, 0x3f),
    (CH1_REG5, 0x3f),
    (CH1_REGD, 0x0a),
];

/// Channel programme for the native LVDS serializer path (channel 0 bank;
/// dual-link mode picks up channel 1 through the shadow writes).
pub const LVDS_CHANNEL_TABLE: [(u32, u32); 7] = [
    (CH0_REG0, 0xbf),
    (CH0_REG1, 0x3f),
    (CH0_REG2, 0xfe),
    (CH0_REG3, 0x46),
    (CH0_REG4, 0x00),
    (CH0_REGD, 0x0a),
    (CH0_REG20, 0x44),
];

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_con7_fields_disjoint() {
        let fields = [
            FORMAT_JEIDA,
            WIDTH_18BIT,
            MSB_SEL,
            DUAL_CHANNEL,
            TTL_EN,
            START_PHASE_RST_1,
            DCLK_POL,
            HSYNC_POL,
            CH0_EN,
            CH1_EN,
            PWRDN,
        ];
        let mut seen: u16 = 0;
        for field in fields {
            assert_eq!(seen & field, 0, "overlapping SOC_CON7 field {field:#x}");
            seen |= field;
        }
    }

    #[test]
    fn test_channel_tables_are_distinct_programmes() {
        // Mutually exclusive paths: the lane-defining registers disagree.
        let rgb = |off| RGB_CHANNEL_TABLE.iter().find(|(o, _)| *o == off);
        let lvds = |off| LVDS_CHANNEL_TABLE.iter().find(|(o, _)| *o == off);
        for off in [CH0_REG0, CH0_REG1, CH0_REG2, CH0_REG4] {
            let (_, rgb_val) = rgb(off).expect("rgb table entry");
            let (_, lvds_val) = lvds(off).expect("lvds table entry");
            assert_ne!(rgb_val, lvds_val, "tables must disagree at {off:#x}");
        }
    }

    #[test]
    fn test_rgb_table_covers_both_banks() {
        assert!(RGB_CHANNEL_TABLE.iter().any(|(o, _)| *o < MIRROR_BANK_STRIDE));
        assert!(RGB_CHANNEL_TABLE.iter().any(|(o, _)| *o >= MIRROR_BANK_STRIDE));
    }

    #[test]
    fn test_lvds_table_is_channel0_only() {
        assert!(LVDS_CHANNEL_TABLE
            .iter()
            .all(|(o, _)| *o < MIRROR_BANK_STRIDE));
    }

    #[test]
    fn test_power_off_resets_to_pwrdn_only() {
        assert_eq!(CON7_RESET_VALUE, 0x8000);
    }
}
