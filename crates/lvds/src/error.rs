//! Driver error taxonomy
//!
//! Probe distinguishes "retry later" from "never": a missing panel driver
//! is a [`ProbeOutcome::Deferred`], everything else that stops a probe is a
//! [`ProbeOutcome::Failed`]. Bind failures name the step that failed; by
//! the time a [`BindError`] reaches the caller the completed steps have
//! already been unwound.

use platform::GrfError;

use crate::config::ConfigError;

/// Three-way probe result.
///
/// `Deferred` asks the host to retry once the missing collaborator (the
/// panel driver) has registered; it must never be collapsed into a hard
/// failure.
#[must_use]
pub enum ProbeOutcome<T> {
    /// The device is configured and ready to bind.
    Ready(T),
    /// A required collaborator is not yet available; retry probe later.
    Deferred,
    /// The descriptor can never produce a working device.
    Failed(ConfigError),
}

// Hand-written so the device type itself needs no Debug impl.
impl<T> core::fmt::Debug for ProbeOutcome<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Ready(_) => f.write_str("Ready"),
            Self::Deferred => f.write_str("Deferred"),
            Self::Failed(e) => f.debug_tuple("Failed").field(e).finish(),
        }
    }
}

impl<T> ProbeOutcome<T> {
    /// The device, if probing succeeded.
    pub fn ready(self) -> Option<T> {
        match self {
            Self::Ready(device) => Some(device),
            Self::Deferred | Self::Failed(_) => None,
        }
    }

    /// True for the retry-later outcome.
    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred)
    }
}

/// The bind step whose framework call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BindStep {
    /// Encoder registration.
    RegisterEncoder,
    /// Connector registration.
    RegisterConnector,
    /// Connector publication to user-visible enumeration.
    PublishConnector,
    /// Encoder↔connector association.
    AttachEncoder,
}

/// Bind failures. Completed steps are unwound before this is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BindError {
    /// The private register window could not be mapped.
    WindowMap,
    /// The device clock could not be acquired/prepared.
    ClockPrepare,
    /// A framework registration step failed.
    Framework(BindStep),
    /// The panel rejected the attach.
    PanelAttach,
}

impl core::fmt::Display for BindError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::WindowMap => write!(f, "failed to map register window"),
            Self::ClockPrepare => write!(f, "failed to prepare device clock"),
            Self::Framework(step) => write!(f, "framework registration failed at {step:?}"),
            Self::PanelAttach => write!(f, "failed to attach panel"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BindError {}

/// Mode-set failures. Remaining register writes for the call were skipped;
/// registers already written keep their values (re-invoke mode-set or power
/// cycle to reach a known state).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ModeSetError {
    /// The shared-map write of the output configuration failed.
    Grf(GrfError),
    /// A channel-table write to the private window failed.
    ChannelWrite,
}

impl core::fmt::Display for ModeSetError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Grf(e) => write!(f, "output configuration write failed: {e}"),
            Self::ChannelWrite => write!(f, "channel register write failed"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ModeSetError {}

/// Power-on failures. Completed hardware effects are not rolled back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerError {
    /// The device clock would not enable; the sequence was aborted.
    ClockEnable,
}

impl core::fmt::Display for PowerError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ClockEnable => write!(f, "failed to enable device clock"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PowerError {}
