//! RK3288 LVDS/RGB display-output transmitter driver
//!
//! Drives the LVDS transmitter block found on the RK3288: negotiates the
//! output electrical standard (parallel RGB, single- or dual-link LVDS)
//! and bit-mapping convention (JEIDA/VESA at 18 or 24 bits), walks the
//! power state machine, and manages the encoder/connector lifecycle
//! against the display framework.
//!
//! # Architecture
//!
//! ```text
//! Display framework (host orchestrator)
//!         ↓ EncoderOps / ConnectorOps callbacks
//! Lifecycle controller (probe / bind / unbind)     lifecycle.rs
//!         ↓
//! DPMS state machine + mode-set engine             driver.rs
//!         ↓
//! Register map (GRF fields, PHY window, tables)    registers.rs
//!         ↓
//! platform traits (SysconBus, RegisterWindow, PeripheralClock, Panel)
//! ```
//!
//! The driver is generic over the `platform` traits, so the whole state
//! machine runs unchanged against host-side mocks; see the `tests/`
//! directory.

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
#![deny(unsafe_op_in_unsafe_fn)]
#![allow(clippy::doc_markdown)] // hex addresses and register names in doc comments
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(async_fn_in_trait)] // single-threaded host task, Send bounds not needed

pub mod config;
pub mod driver;
pub mod error;
pub mod lifecycle;
pub mod registers;

pub use config::{
    ConfigError, DataMapping, DataWidth, DeviceDescriptor, GrfOffsets, LvdsConfig, OutputMode,
    SocVariant,
};
pub use driver::Rk3288Lvds;
pub use error::{BindError, BindStep, ModeSetError, PowerError, ProbeOutcome};
