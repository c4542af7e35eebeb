//! RK3288 LVDS transmitter driver
//!
//! The transmitter sits between a video output processor (VOP) and the
//! panel link. Its configuration is split across two register spaces: the
//! shared GRF block (output variant, polarities, channel enables — written
//! with the masked-write protocol) and a private PHY window (PLL/TX enables
//! and the mirrored per-channel analogue banks).
//!
//! Power management is a four-state DPMS machine collapsed onto two
//! hardware sequences: only `On` powers the link up, every other state runs
//! the same power-down. The enable and disable orders are asymmetric — the
//! panel and clock must be live before the serializer is driven, and on the
//! way down the serializer is silenced before the panel and clock go away.
//!
//! Generic parameters:
//! - `W` — the private register window ([`RegisterWindow`])
//! - `G` — the shared syscon transport ([`SysconBus`])
//! - `C` — the device clock ([`PeripheralClock`])
//! - `P` — the attached panel ([`Panel`])
//! - `D` — delay provider for the PLL settle window
//!   ([`embedded_hal_async::delay::DelayNs`])

use embedded_hal_async::delay::DelayNs;
use platform::{
    ConnectorId, ConnectorOps, ConnectorStatus, DisplayFramework, DisplayTiming, DpmsState,
    EncoderId, EncoderOps, ModeStatus, Panel, PeripheralClock, PixelFormat, RegisterWindow,
    SharedRegisterMap, SysconBus, VideoPipe,
};

use crate::config::{LvdsConfig, OutputMode};
use crate::error::{ModeSetError, PowerError};
use crate::registers;

/// PLL settle window after the enable write, before the TX drivers come up.
const PLL_SETTLE_US: u32 = 100;

/// One LVDS/RGB transmitter instance.
///
/// All entry points take `&mut self`; the display framework serializes
/// calls into a driver instance, so the driver holds no locks of its own.
pub struct Rk3288Lvds<W, G, C, P, D> {
    pub(crate) config: LvdsConfig,
    pub(crate) grf: SharedRegisterMap<G>,
    pub(crate) regs: W,
    pub(crate) clock: C,
    pub(crate) panel: P,
    pub(crate) delay: D,
    pub(crate) dpms: DpmsState,
    pub(crate) mux: Option<VideoPipe>,
    pub(crate) encoder: Option<EncoderId>,
    pub(crate) connector: Option<ConnectorId>,
    pub(crate) panel_attached: bool,
}

impl<W, G, C, P, D> Rk3288Lvds<W, G, C, P, D>
where
    W: RegisterWindow,
    G: SysconBus,
    C: PeripheralClock,
    P: Panel,
    D: DelayNs,
{
    /// The resolved device configuration.
    pub fn config(&self) -> &LvdsConfig {
        &self.config
    }

    /// Current DPMS state.
    pub fn dpms_state(&self) -> DpmsState {
        self.dpms
    }

    /// The video pipe feeding this encoder, cached at prepare time.
    pub fn bound_pipe(&self) -> Option<VideoPipe> {
        self.mux
    }

    /// Tear the driver value apart, handing the borrowed resources back to
    /// the host. Call after [`unbind`](Self::unbind).
    pub fn release(self) -> (W, SharedRegisterMap<G>, C, P, D) {
        (self.regs, self.grf, self.clock, self.panel, self.delay)
    }

    // -----------------------------------------------------------------------
    // Mirrored channel-bank writes
    // -----------------------------------------------------------------------

    /// Write `value` to a channel register and its shadow copy, then fence.
    ///
    /// The two banks must never diverge; both writes happen here or not at
    /// all (a failed first write skips the shadow).
    fn mirrored_write(&mut self, offset: u32, value: u32) -> Result<(), W::Error> {
        self.regs.write(offset, value)?;
        // Channel offsets top out at 0x134; adding the bank stride stays
        // far below u32::MAX.
        #[allow(clippy::arithmetic_side_effects)]
        self.regs
            .write(offset + registers::MIRROR_BANK_STRIDE, value)?;
        self.regs.barrier();
        Ok(())
    }

    fn write_channel_table(&mut self, table: &[(u32, u32)]) -> Result<(), ModeSetError> {
        for &(offset, value) in table {
            if self.mirrored_write(offset, value).is_err() {
                #[cfg(feature = "defmt")]
                defmt::error!(
                    "channel register write failed at {=u32:#x}, aborting table",
                    offset
                );
                return Err(ModeSetError::ChannelWrite);
            }
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Mode set
    // -----------------------------------------------------------------------

    /// Program the output configuration for `timing`.
    ///
    /// Composes the SOC_CON7 word from the resolved configuration plus the
    /// two timing-derived polarity bits, then programs the channel bank
    /// matching the output variant. A failure aborts the remaining writes
    /// of this call; registers already written keep their values.
    pub fn mode_set(&mut self, timing: &DisplayTiming) -> Result<(), ModeSetError> {
        let mut val = self.config.format_bits();

        val |= match self.config.output {
            OutputMode::DualLvds => {
                registers::DUAL_CHANNEL | registers::CH0_EN | registers::CH1_EN
            }
            OutputMode::Lvds => registers::CH0_EN,
            OutputMode::Rgb => registers::TTL_EN | registers::CH0_EN | registers::CH1_EN,
        };

        // An odd back porch leaves the serializer half a pixel out of step;
        // the start phase must be re-armed.
        if timing.h_back_porch() & 1 == 1 {
            val |= registers::START_PHASE_RST_1;
        }

        if timing.clock_positive {
            val |= registers::DCLK_POL;
        }
        if timing.hsync_positive {
            val |= registers::HSYNC_POL;
        }

        let grf_offsets = self.config.soc.grf();
        if let Err(e) =
            self.grf
                .write_masked(grf_offsets.soc_con7, registers::CON7_WRITE_MASK, val)
        {
            #[cfg(feature = "defmt")]
            defmt::error!("could not write output configuration to GRF: {}", e);
            return Err(ModeSetError::Grf(e));
        }

        if self.config.output == OutputMode::Rgb {
            // Parallel RGB borrows the GPIO1D pins; re-mux them first.
            if let Err(e) = self.grf.write_masked(
                grf_offsets.gpio1d_iomux,
                registers::GPIO1D_IOMUX_RGB_MASK,
                registers::GPIO1D_IOMUX_RGB,
            ) {
                #[cfg(feature = "defmt")]
                defmt::error!("could not write RGB pin mux to GRF: {}", e);
                return Err(ModeSetError::Grf(e));
            }
            self.write_channel_table(&registers::RGB_CHANNEL_TABLE)
        } else {
            self.write_channel_table(&registers::LVDS_CHANNEL_TABLE)
        }
    }

    // -----------------------------------------------------------------------
    // Power sequences
    // -----------------------------------------------------------------------

    /// Bring the link up: panel, clock, PLL, TX — in that order.
    ///
    /// Only the clock gate is checked; its failure aborts the sequence.
    /// Completed hardware effects are not rolled back — power-up is not
    /// reversible mid-sequence.
    async fn power_on(&mut self) -> Result<(), PowerError> {
        if self.panel.enable().await.is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("panel enable failed, continuing power-on");
        }

        self.clock.enable().map_err(|_| PowerError::ClockEnable)?;

        let _ = self
            .regs
            .write(registers::CFG_REGC, registers::CFG_REGC_PLL_ENABLE);
        self.delay.delay_us(PLL_SETTLE_US).await;
        let _ = self
            .regs
            .write(registers::CFG_REG21, registers::CFG_REG21_TX_ENABLE);
        Ok(())
    }

    /// Take the link down: GRF reset, TX, PLL, panel, clock — in that order.
    ///
    /// Safe against a device that is already partially off. The GRF reset
    /// is best-effort: adjacent bits belong to other consumers, so a failed
    /// shared-map write is logged and the teardown continues.
    async fn power_off(&mut self) {
        let grf_offsets = self.config.soc.grf();
        if let Err(_e) = self.grf.write_masked(
            grf_offsets.soc_con7,
            registers::CON7_WRITE_MASK,
            registers::CON7_RESET_VALUE,
        ) {
            #[cfg(feature = "defmt")]
            defmt::error!("could not write power-down state to GRF: {}", _e);
        }

        let _ = self
            .regs
            .write(registers::CFG_REG21, registers::CFG_REG21_TX_DISABLE);
        let _ = self
            .regs
            .write(registers::CFG_REGC, registers::CFG_REGC_PLL_DISABLE);

        if self.panel.disable().await.is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("panel disable failed, continuing power-off");
        }

        self.clock.disable();
    }

    /// Move the output to `target`.
    ///
    /// Re-entering the current state is a no-op that performs zero register
    /// writes. Any target other than [`DpmsState::On`] runs the power-down
    /// sequence. Hardware failures are logged, not propagated; the state
    /// machine advances regardless so a later opposite transition still
    /// runs its full sequence.
    pub async fn set_dpms(&mut self, target: DpmsState) {
        if self.dpms == target {
            return;
        }

        match target {
            DpmsState::On => {
                if let Err(_e) = self.power_on().await {
                    #[cfg(feature = "defmt")]
                    defmt::error!("power-on failed: {}", _e);
                }
            }
            DpmsState::Standby | DpmsState::Suspend | DpmsState::Off => {
                self.power_off().await;
            }
        }

        self.dpms = target;
    }
}

// ---------------------------------------------------------------------------
// Framework callbacks
// ---------------------------------------------------------------------------

impl<W, G, C, P, D, F> EncoderOps<F> for Rk3288Lvds<W, G, C, P, D>
where
    W: RegisterWindow,
    G: SysconBus,
    C: PeripheralClock,
    P: Panel,
    D: DelayNs,
    F: DisplayFramework,
{
    type Error = ModeSetError;

    async fn dpms(&mut self, target: DpmsState) {
        self.set_dpms(target).await;
    }

    fn mode_fixup(&self, _requested: &DisplayTiming, _adjusted: &mut DisplayTiming) -> bool {
        // The transmitter has no timing constraints of its own.
        true
    }

    fn mode_set(&mut self, timing: &DisplayTiming) -> Result<(), Self::Error> {
        Rk3288Lvds::mode_set(self, timing)
    }

    fn prepare(&mut self, framework: &mut F) {
        let Some(encoder) = self.encoder else {
            #[cfg(feature = "defmt")]
            defmt::error!("prepare called on an unbound encoder");
            return;
        };

        if framework
            .configure_source(encoder, PixelFormat::Rgb888)
            .is_err()
        {
            #[cfg(feature = "defmt")]
            defmt::error!("could not configure source pipe output format");
            return;
        }

        let Some(pipe) = framework.bound_source(encoder) else {
            #[cfg(feature = "defmt")]
            defmt::error!("no source pipe bound to encoder");
            return;
        };
        self.mux = Some(pipe);

        let sel = match pipe {
            VideoPipe::Little => registers::SEL_VOP_LIT,
            VideoPipe::Big => 0,
        };
        if let Err(_e) = self.grf.write_masked(
            self.config.soc.grf().soc_con6,
            registers::SEL_VOP_LIT,
            sel,
        ) {
            #[cfg(feature = "defmt")]
            defmt::error!("could not write pipe select to GRF: {}", _e);
        }
    }

    async fn commit(&mut self) {
        self.set_dpms(DpmsState::On).await;
    }

    async fn disable(&mut self) {
        self.set_dpms(DpmsState::Off).await;
    }
}

impl<W, G, C, P, D> ConnectorOps for Rk3288Lvds<W, G, C, P, D>
where
    W: RegisterWindow,
    G: SysconBus,
    C: PeripheralClock,
    P: Panel,
    D: DelayNs,
{
    fn detect(&self) -> ConnectorStatus {
        // Fixed panel link; nothing to detect.
        ConnectorStatus::Connected
    }

    fn mode_valid(&self, _timing: &DisplayTiming) -> ModeStatus {
        ModeStatus::Ok
    }

    fn modes(&self) -> &[DisplayTiming] {
        self.panel.modes()
    }

    fn best_encoder(&self) -> Option<EncoderId> {
        self.encoder
    }
}
