//! Display panel abstraction
//!
//! A panel is owned by the panel subsystem; an encoder driver holds a
//! borrowed reference from bind to unbind. Enable/disable are async because
//! real panels carry power-up delays (backlight ramp, T3 timing windows).

use crate::timing::DisplayTiming;

/// One attached display panel.
pub trait Panel {
    /// Error type for panel operations.
    type Error: core::fmt::Debug;

    /// Record the connector this panel now feeds. Called at bind.
    fn attach(&mut self) -> Result<(), Self::Error>;

    /// Drop the connector association. Safe to call when not attached.
    fn detach(&mut self);

    /// Power the panel up.
    async fn enable(&mut self) -> Result<(), Self::Error>;

    /// Power the panel down.
    async fn disable(&mut self) -> Result<(), Self::Error>;

    /// The modes this panel supports, preferred mode first.
    fn modes(&self) -> &[DisplayTiming];
}
