//! Display framework seam
//!
//! The display framework is the host orchestrator: it enumerates encoders
//! and connectors, binds a video pipe (VOP) to an encoder, and drives the
//! per-encoder lifecycle callbacks around a mode change. Drivers register
//! their objects through [`DisplayFramework`] and implement [`EncoderOps`] /
//! [`ConnectorOps`]; the framework serializes every call into a driver
//! instance, so the callbacks take `&mut self` and need no locking.

use crate::timing::DisplayTiming;

/// Framework handle for a registered encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderId(pub u32);

/// Framework handle for a registered connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConnectorId(pub u32);

/// Bitmask of video pipes that may feed an encoder.
pub type SourceMask = u32;

/// Which video output processor feeds an encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum VideoPipe {
    /// The full-featured pipe.
    Big,
    /// The reduced ("little") pipe.
    Little,
}

/// Electrical class of an encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncoderKind {
    /// LVDS serializer (also covers its parallel-RGB bypass mode).
    Lvds,
    /// TMDS (HDMI/DVI) transmitter.
    Tmds,
    /// MIPI DSI host.
    Dsi,
}

/// Physical connector class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConnectorKind {
    /// LVDS / parallel panel connector.
    Lvds,
    /// HDMI receptacle.
    Hdmi,
    /// MIPI DSI panel connector.
    Dsi,
}

/// How the framework watches a connector for plug events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PollMode {
    /// Hardware hot-plug-detect interrupt.
    HotPlugDetect,
    /// Periodic detect() polling.
    Poll,
    /// Fixed panel, never re-detected.
    None,
}

/// Pixel format the video pipe emits towards an encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PixelFormat {
    /// 24-bit parallel RGB (8 bits per component).
    Rgb888,
    /// 18-bit parallel RGB (6 bits per component).
    Rgb666,
}

/// Display power management state of an encoder or connector.
///
/// Any state other than `On` powers the output down; the distinction
/// between the intermediate states exists for connector bookkeeping only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DpmsState {
    /// Output driven.
    On,
    /// Blanked, sync maintained.
    Standby,
    /// Blanked, sync suspended.
    Suspend,
    /// Fully powered down.
    #[default]
    Off,
}

/// Result of a connector detect cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConnectorStatus {
    /// A sink is present.
    Connected,
    /// No sink.
    Disconnected,
    /// Detection not possible on this connector.
    Unknown,
}

/// Verdict on a single mode from a connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ModeStatus {
    /// The mode can be driven.
    Ok,
    /// The mode is outside hardware limits.
    Bad,
}

/// Registration and video-pipe services the framework offers a driver.
///
/// Every `register_*`/`publish`/`attach` call has an exact inverse; a
/// driver that fails mid-bind must invoke the inverses of precisely the
/// calls that succeeded, in reverse order.
pub trait DisplayFramework {
    /// Error type for registration failures.
    type Error: core::fmt::Debug;

    /// The pipes that can feed this device, from the host topology.
    fn possible_sources(&self) -> SourceMask;

    /// Register an encoder. Inverse: [`remove_encoder`](Self::remove_encoder).
    fn register_encoder(
        &mut self,
        kind: EncoderKind,
        sources: SourceMask,
    ) -> Result<EncoderId, Self::Error>;

    /// Register a connector with its polling policy.
    /// Inverse: [`remove_connector`](Self::remove_connector).
    fn register_connector(
        &mut self,
        kind: ConnectorKind,
        poll: PollMode,
    ) -> Result<ConnectorId, Self::Error>;

    /// Expose the connector to user-visible enumeration.
    /// Inverse: [`withdraw_connector`](Self::withdraw_connector).
    fn publish_connector(&mut self, connector: ConnectorId) -> Result<(), Self::Error>;

    /// Record the encoder↔connector association.
    /// Undone implicitly when either object is removed.
    fn attach_encoder(
        &mut self,
        connector: ConnectorId,
        encoder: EncoderId,
    ) -> Result<(), Self::Error>;

    /// Remove the connector from user-visible enumeration.
    fn withdraw_connector(&mut self, connector: ConnectorId);

    /// Destroy a registered connector.
    fn remove_connector(&mut self, connector: ConnectorId);

    /// Destroy a registered encoder.
    fn remove_encoder(&mut self, encoder: EncoderId);

    /// Configure the pipe bound to `encoder` for an output pixel format.
    fn configure_source(
        &mut self,
        encoder: EncoderId,
        format: PixelFormat,
    ) -> Result<(), Self::Error>;

    /// The pipe currently bound to `encoder`, if any.
    fn bound_source(&self, encoder: EncoderId) -> Option<VideoPipe>;
}

/// Per-encoder lifecycle callbacks, invoked by the framework.
///
/// Call order around a mode change: `prepare` → `mode_fixup` → `mode_set`
/// → `commit`; teardown calls `disable`. `dpms` may arrive at any point
/// between prepare and disable.
pub trait EncoderOps<F: DisplayFramework> {
    /// Error type surfaced by [`mode_set`](Self::mode_set).
    type Error: core::fmt::Debug;

    /// Move the output to a power state. Infallible at this boundary;
    /// hardware failures are logged by the driver.
    async fn dpms(&mut self, target: DpmsState);

    /// Adjust `adjusted` if the hardware needs a variant of `requested`.
    /// Returns `false` to reject the mode entirely.
    fn mode_fixup(&self, requested: &DisplayTiming, adjusted: &mut DisplayTiming) -> bool;

    /// Program the output configuration for `timing`.
    fn mode_set(&mut self, timing: &DisplayTiming) -> Result<(), Self::Error>;

    /// Pre-mode-set hook: bind-time pipe configuration (output format and
    /// pipe mux). Failures are logged; the pipeline continues degraded.
    fn prepare(&mut self, framework: &mut F);

    /// Post-mode-set hook: light the output up.
    async fn commit(&mut self);

    /// Turn the output off ahead of teardown.
    async fn disable(&mut self);
}

/// Per-connector callbacks, invoked by the framework.
pub trait ConnectorOps {
    /// Probe for a sink.
    fn detect(&self) -> ConnectorStatus;

    /// Judge one candidate mode.
    fn mode_valid(&self, timing: &DisplayTiming) -> ModeStatus;

    /// Modes this connector offers, preferred first.
    fn modes(&self) -> &[DisplayTiming];

    /// The encoder that should drive this connector.
    fn best_encoder(&self) -> Option<EncoderId>;
}
