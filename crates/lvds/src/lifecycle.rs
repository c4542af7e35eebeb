//! Probe, bind and unbind
//!
//! Probe resolves the immutable configuration and settles the panel
//! question before anything is acquired; bind then takes resources in a
//! fixed order and registers the encoder/connector pair with the display
//! framework. A failure at any bind step unwinds exactly the steps already
//! completed, in reverse order, before the error is returned — a failed
//! bind leaves neither framework registrations nor held resources behind.
//! Unbind is the strict mirror of a successful bind and is safe against a
//! device that is already powered off.

use embedded_hal_async::delay::DelayNs;
use platform::{
    ConnectorId, ConnectorKind, DisplayFramework, DpmsState, EncoderId, EncoderKind, Panel,
    PeripheralClock, PollMode, RegisterWindow, SharedRegisterMap, SysconBus,
};

use crate::config::{ConfigError, DeviceDescriptor, LvdsConfig};
use crate::driver::Rk3288Lvds;
use crate::error::{BindError, BindStep, ProbeOutcome};

impl<W, G, C, P, D> Rk3288Lvds<W, G, C, P, D>
where
    W: RegisterWindow,
    G: SysconBus,
    C: PeripheralClock,
    P: Panel,
    D: DelayNs,
{
    /// Probe one device instance.
    ///
    /// `panel` is the result of looking up the descriptor's panel
    /// reference: `None` means the reference exists but its driver has not
    /// registered yet, which defers the probe rather than failing it. The
    /// configuration is fully resolved here — bind never sees a
    /// half-configured device.
    pub fn probe(
        desc: &DeviceDescriptor<'_>,
        grf: SharedRegisterMap<G>,
        regs: W,
        clock: C,
        panel: Option<P>,
        delay: D,
    ) -> ProbeOutcome<Self> {
        if !desc.has_panel_ref {
            return ProbeOutcome::Failed(ConfigError::MissingPanel);
        }
        let Some(panel) = panel else {
            return ProbeOutcome::Deferred;
        };

        // The output configuration lives in the shared block; without the
        // syscon handle this device could never be programmed.
        if !grf.is_present() {
            return ProbeOutcome::Failed(ConfigError::MissingSyscon);
        }

        let config = match LvdsConfig::from_descriptor(desc) {
            Ok(config) => config,
            Err(e) => return ProbeOutcome::Failed(e),
        };

        ProbeOutcome::Ready(Self {
            config,
            grf,
            regs,
            clock,
            panel,
            delay,
            dpms: DpmsState::Off,
            mux: None,
            encoder: None,
            connector: None,
            panel_attached: false,
        })
    }

    /// Bind the device to the display framework.
    ///
    /// Step order: map window → prepare clock → query possible sources →
    /// register encoder → register connector → publish connector → attach
    /// encoder → attach panel. Each failure arm below is the mirror image
    /// of the steps completed before it.
    pub fn bind<F: DisplayFramework>(
        &mut self,
        framework: &mut F,
    ) -> Result<(EncoderId, ConnectorId), BindError> {
        self.regs.map().map_err(|_| BindError::WindowMap)?;

        if self.clock.prepare().is_err() {
            self.regs.unmap();
            return Err(BindError::ClockPrepare);
        }

        let sources = framework.possible_sources();

        let encoder = match framework.register_encoder(EncoderKind::Lvds, sources) {
            Ok(id) => id,
            Err(_) => {
                self.clock.unprepare();
                self.regs.unmap();
                return Err(BindError::Framework(BindStep::RegisterEncoder));
            }
        };

        let connector =
            match framework.register_connector(ConnectorKind::Lvds, PollMode::HotPlugDetect) {
                Ok(id) => id,
                Err(_) => {
                    framework.remove_encoder(encoder);
                    self.clock.unprepare();
                    self.regs.unmap();
                    return Err(BindError::Framework(BindStep::RegisterConnector));
                }
            };

        if framework.publish_connector(connector).is_err() {
            framework.remove_connector(connector);
            framework.remove_encoder(encoder);
            self.clock.unprepare();
            self.regs.unmap();
            return Err(BindError::Framework(BindStep::PublishConnector));
        }

        if framework.attach_encoder(connector, encoder).is_err() {
            framework.withdraw_connector(connector);
            framework.remove_connector(connector);
            framework.remove_encoder(encoder);
            self.clock.unprepare();
            self.regs.unmap();
            return Err(BindError::Framework(BindStep::AttachEncoder));
        }

        if self.panel.attach().is_err() {
            framework.withdraw_connector(connector);
            framework.remove_connector(connector);
            framework.remove_encoder(encoder);
            self.clock.unprepare();
            self.regs.unmap();
            return Err(BindError::PanelAttach);
        }

        self.encoder = Some(encoder);
        self.connector = Some(connector);
        self.panel_attached = true;
        Ok((encoder, connector))
    }

    /// Unbind the device.
    ///
    /// Always succeeds from the driver's perspective; powering down an
    /// already-off device is a no-op through the DPMS state machine, and
    /// every removal below tolerates an object that was never registered.
    pub async fn unbind<F: DisplayFramework>(&mut self, framework: &mut F) {
        if self.panel_attached {
            self.panel.detach();
            self.panel_attached = false;
        }

        self.set_dpms(DpmsState::Off).await;

        if let Some(encoder) = self.encoder.take() {
            framework.remove_encoder(encoder);
        }
        if let Some(connector) = self.connector.take() {
            framework.withdraw_connector(connector);
            framework.remove_connector(connector);
        }

        self.mux = None;
        self.clock.unprepare();
        self.regs.unmap();
    }
}
