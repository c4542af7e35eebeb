//! Peripheral clock gating
//!
//! A device borrows its clock from the platform clock controller. The
//! prepare/enable split follows the controller's contract: `prepare` may be
//! slow (PLL re-parenting), `enable` is the fast gate toggle and is the only
//! step legal inside power sequences.

/// One gated peripheral clock.
pub trait PeripheralClock {
    /// Error type for prepare/enable failures.
    type Error: core::fmt::Debug;

    /// Acquire and prepare the clock. Called once at bind.
    fn prepare(&mut self) -> Result<(), Self::Error>;

    /// Release the prepared clock. Safe to call on an unprepared clock.
    fn unprepare(&mut self);

    /// Ungate the clock.
    fn enable(&mut self) -> Result<(), Self::Error>;

    /// Gate the clock. Never fails; gating an already-gated clock is a no-op.
    fn disable(&mut self);
}
