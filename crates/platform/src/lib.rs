//! Hardware-environment abstraction layer for the display-output drivers
//!
//! This crate provides trait-based abstractions for every resource a
//! display-output encoder driver borrows from the host environment, enabling
//! development and testing without physical hardware.
//!
//! # Architecture Layers
//!
//! ```text
//! Display framework (host orchestrator — serializes all driver calls)
//!         ↓
//! Encoder drivers (lvds crate)
//!         ↓
//! Platform HAL (this crate - trait abstractions)
//!         ↓
//! Hardware Layer (MMIO windows, syscon block, clock controller, panel)
//! ```
//!
//! # Abstraction Levels
//!
//! ## Borrowed chip-wide resources
//! - [`SysconBus`] / [`SharedRegisterMap`] - the shared configuration
//!   register block (GRF) multiplexed across unrelated hardware functions;
//!   all access goes through the masked-write protocol
//! - [`PeripheralClock`] - gate/ungate one peripheral clock
//!
//! ## Device-private resources
//! - [`RegisterWindow`] / [`MmioWindow`] - an exclusively owned
//!   memory-mapped register window
//!
//! ## Collaborating subsystems
//! - [`Panel`] - the attached display panel (lifetime owned elsewhere)
//! - [`DisplayFramework`] - encoder/connector registration and the video
//!   pipe (VOP) that feeds an encoder
//!
//! # Features
//!
//! - `std`: expose the [`mocks`] module to dependent crates' tests
//! - `defmt`: enable defmt logging and `defmt::Format` derives

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_op_in_unsafe_fn)] // unsafe fn body is not implicitly unsafe block
#![allow(clippy::doc_markdown)] // hex addresses and register names in doc comments
#![allow(clippy::must_use_candidate)] // hardware accessors — callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(async_fn_in_trait)] // single-threaded host task, Send bounds not needed

pub mod clock;
pub mod framework;
pub mod panel;
pub mod regwindow;
pub mod syscon;
pub mod timing;

#[cfg(any(test, feature = "std"))]
pub mod mocks;

// Re-export main traits and their vocabulary
pub use clock::PeripheralClock;
pub use framework::{
    ConnectorId, ConnectorKind, ConnectorOps, ConnectorStatus, DisplayFramework, DpmsState,
    EncoderId, EncoderKind, EncoderOps, ModeStatus, PixelFormat, PollMode, SourceMask, VideoPipe,
};
pub use panel::Panel;
pub use regwindow::{MmioWindow, RegisterWindow, WindowError};
pub use syscon::{GrfError, SharedRegisterMap, SysconBus};
pub use timing::DisplayTiming;
