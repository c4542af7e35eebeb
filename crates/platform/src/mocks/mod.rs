//! Mock implementations for testing
//!
//! This module provides mock implementations of all platform traits for use
//! in unit and integration tests. Each mock records the calls it receives
//! and can be armed to fail at a chosen point, so tests can drive error
//! paths (bind rollback, aborted register tables) deterministically.

#![cfg(any(test, feature = "std"))]
#![allow(missing_docs)]

use crate::clock::PeripheralClock;
use crate::framework::{
    ConnectorId, ConnectorKind, DisplayFramework, EncoderId, EncoderKind, PixelFormat, PollMode,
    SourceMask, VideoPipe,
};
use crate::panel::Panel;
use crate::regwindow::RegisterWindow;
use crate::syscon::SysconBus;
use crate::timing::DisplayTiming;

/// Unit error shared by the mocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

// ---------------------------------------------------------------------------
// Syscon
// ---------------------------------------------------------------------------

/// Mock syscon transport — records every word written.
#[derive(Default)]
pub struct MockSyscon {
    /// `(offset, word)` pairs in write order.
    pub writes: heapless::Vec<(u32, u32), 32>,
    /// Reject every write with an error.
    pub fail_writes: bool,
}

impl MockSyscon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last word written at `offset`, if any.
    pub fn last_write(&self, offset: u32) -> Option<u32> {
        self.writes
            .iter()
            .rev()
            .find(|(o, _)| *o == offset)
            .map(|(_, w)| *w)
    }

    /// Number of writes that targeted `offset`.
    pub fn write_count(&self, offset: u32) -> usize {
        self.writes.iter().filter(|(o, _)| *o == offset).count()
    }
}

impl SysconBus for MockSyscon {
    type Error = MockError;

    fn write(&mut self, offset: u32, value: u32) -> Result<(), Self::Error> {
        if self.fail_writes {
            return Err(MockError);
        }
        let _ = self.writes.push((offset, value));
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Register window
// ---------------------------------------------------------------------------

/// Mock register window — records writes and barriers.
#[derive(Default)]
pub struct MockWindow {
    /// `(offset, value)` pairs in write order.
    pub writes: heapless::Vec<(u32, u32), 128>,
    /// Count of all writes, including any dropped by capacity.
    pub total_writes: usize,
    /// Barriers issued so far.
    pub barriers: usize,
    pub mapped: bool,
    /// Make `map()` fail.
    pub fail_map: bool,
    /// Fail the write once `total_writes` reaches this count.
    pub fail_at_write: Option<usize>,
}

impl MockWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last value written at `offset`, if any.
    pub fn reg(&self, offset: u32) -> Option<u32> {
        self.writes
            .iter()
            .rev()
            .find(|(o, _)| *o == offset)
            .map(|(_, v)| *v)
    }

    /// Number of writes that targeted `offset`.
    pub fn write_count(&self, offset: u32) -> usize {
        self.writes.iter().filter(|(o, _)| *o == offset).count()
    }
}

impl RegisterWindow for MockWindow {
    type Error = MockError;

    fn map(&mut self) -> Result<(), Self::Error> {
        if self.fail_map {
            return Err(MockError);
        }
        self.mapped = true;
        Ok(())
    }

    fn unmap(&mut self) {
        self.mapped = false;
    }

    fn write(&mut self, offset: u32, value: u32) -> Result<(), Self::Error> {
        if !self.mapped {
            return Err(MockError);
        }
        if self.fail_at_write == Some(self.total_writes) {
            return Err(MockError);
        }
        self.total_writes = self.total_writes.wrapping_add(1);
        let _ = self.writes.push((offset, value));
        Ok(())
    }

    fn barrier(&mut self) {
        self.barriers = self.barriers.wrapping_add(1);
    }
}

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

/// Mock peripheral clock — tracks the prepare/enable state machine.
#[derive(Default)]
pub struct MockClock {
    pub prepared: bool,
    pub enabled: bool,
    pub enable_calls: usize,
    pub disable_calls: usize,
    pub fail_prepare: bool,
    pub fail_enable: bool,
}

impl MockClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PeripheralClock for MockClock {
    type Error = MockError;

    fn prepare(&mut self) -> Result<(), Self::Error> {
        if self.fail_prepare {
            return Err(MockError);
        }
        self.prepared = true;
        Ok(())
    }

    fn unprepare(&mut self) {
        self.prepared = false;
    }

    fn enable(&mut self) -> Result<(), Self::Error> {
        if self.fail_enable {
            return Err(MockError);
        }
        self.enabled = true;
        self.enable_calls = self.enable_calls.wrapping_add(1);
        Ok(())
    }

    fn disable(&mut self) {
        self.enabled = false;
        self.disable_calls = self.disable_calls.wrapping_add(1);
    }
}

// ---------------------------------------------------------------------------
// Panel
// ---------------------------------------------------------------------------

/// Mock panel — records attach/enable cycles.
#[derive(Default)]
pub struct MockPanel {
    pub attached: bool,
    pub enabled: bool,
    pub enable_calls: usize,
    pub disable_calls: usize,
    pub fail_attach: bool,
    pub mode_list: heapless::Vec<DisplayTiming, 4>,
}

impl MockPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// A panel advertising one fixed mode.
    pub fn with_mode(mode: DisplayTiming) -> Self {
        let mut panel = Self::default();
        let _ = panel.mode_list.push(mode);
        panel
    }
}

impl Panel for MockPanel {
    type Error = MockError;

    fn attach(&mut self) -> Result<(), Self::Error> {
        if self.fail_attach {
            return Err(MockError);
        }
        self.attached = true;
        Ok(())
    }

    fn detach(&mut self) {
        self.attached = false;
    }

    async fn enable(&mut self) -> Result<(), Self::Error> {
        self.enabled = true;
        self.enable_calls = self.enable_calls.wrapping_add(1);
        Ok(())
    }

    async fn disable(&mut self) -> Result<(), Self::Error> {
        self.enabled = false;
        self.disable_calls = self.disable_calls.wrapping_add(1);
        Ok(())
    }

    fn modes(&self) -> &[DisplayTiming] {
        &self.mode_list
    }
}

// ---------------------------------------------------------------------------
// Display framework
// ---------------------------------------------------------------------------

/// One recorded framework call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameworkEvent {
    RegisterEncoder(EncoderId),
    RegisterConnector(ConnectorId),
    PublishConnector(ConnectorId),
    AttachEncoder(ConnectorId, EncoderId),
    WithdrawConnector(ConnectorId),
    RemoveConnector(ConnectorId),
    RemoveEncoder(EncoderId),
    ConfigureSource(EncoderId, PixelFormat),
}

/// Fallible framework entry points, for failure injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameworkStep {
    RegisterEncoder,
    RegisterConnector,
    PublishConnector,
    AttachEncoder,
    ConfigureSource,
}

/// Mock display framework — records the full call log plus the live
/// registration state, so tests can assert both ordering and cleanliness.
pub struct MockFramework {
    pub events: heapless::Vec<FrameworkEvent, 32>,
    pub fail_at: Option<FrameworkStep>,
    pub sources: SourceMask,
    pub bound_pipe: Option<VideoPipe>,
    pub live_encoders: heapless::Vec<EncoderId, 4>,
    pub live_connectors: heapless::Vec<ConnectorId, 4>,
    pub published: heapless::Vec<ConnectorId, 4>,
    pub links: heapless::Vec<(ConnectorId, EncoderId), 4>,
    next_id: u32,
}

impl Default for MockFramework {
    fn default() -> Self {
        Self {
            events: heapless::Vec::new(),
            fail_at: None,
            sources: 0b01,
            bound_pipe: Some(VideoPipe::Big),
            live_encoders: heapless::Vec::new(),
            live_connectors: heapless::Vec::new(),
            published: heapless::Vec::new(),
            links: heapless::Vec::new(),
            next_id: 1,
        }
    }
}

impl MockFramework {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the given entry point (once reached) with `MockError`.
    pub fn failing_at(step: FrameworkStep) -> Self {
        Self {
            fail_at: Some(step),
            ..Self::default()
        }
    }

    /// True when no encoder, connector, publication, or link survives.
    pub fn is_empty(&self) -> bool {
        self.live_encoders.is_empty()
            && self.live_connectors.is_empty()
            && self.published.is_empty()
            && self.links.is_empty()
    }

    fn record(&mut self, event: FrameworkEvent) {
        let _ = self.events.push(event);
    }

    fn take_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }
}

impl DisplayFramework for MockFramework {
    type Error = MockError;

    fn possible_sources(&self) -> SourceMask {
        self.sources
    }

    fn register_encoder(
        &mut self,
        _kind: EncoderKind,
        _sources: SourceMask,
    ) -> Result<EncoderId, Self::Error> {
        if self.fail_at == Some(FrameworkStep::RegisterEncoder) {
            return Err(MockError);
        }
        let id = EncoderId(self.take_id());
        let _ = self.live_encoders.push(id);
        self.record(FrameworkEvent::RegisterEncoder(id));
        Ok(id)
    }

    fn register_connector(
        &mut self,
        _kind: ConnectorKind,
        _poll: PollMode,
    ) -> Result<ConnectorId, Self::Error> {
        if self.fail_at == Some(FrameworkStep::RegisterConnector) {
            return Err(MockError);
        }
        let id = ConnectorId(self.take_id());
        let _ = self.live_connectors.push(id);
        self.record(FrameworkEvent::RegisterConnector(id));
        Ok(id)
    }

    fn publish_connector(&mut self, connector: ConnectorId) -> Result<(), Self::Error> {
        if self.fail_at == Some(FrameworkStep::PublishConnector) {
            return Err(MockError);
        }
        let _ = self.published.push(connector);
        self.record(FrameworkEvent::PublishConnector(connector));
        Ok(())
    }

    fn attach_encoder(
        &mut self,
        connector: ConnectorId,
        encoder: EncoderId,
    ) -> Result<(), Self::Error> {
        if self.fail_at == Some(FrameworkStep::AttachEncoder) {
            return Err(MockError);
        }
        let _ = self.links.push((connector, encoder));
        self.record(FrameworkEvent::AttachEncoder(connector, encoder));
        Ok(())
    }

    fn withdraw_connector(&mut self, connector: ConnectorId) {
        self.published.retain(|c| *c != connector);
        self.record(FrameworkEvent::WithdrawConnector(connector));
    }

    fn remove_connector(&mut self, connector: ConnectorId) {
        self.live_connectors.retain(|c| *c != connector);
        self.links.retain(|(c, _)| *c != connector);
        self.record(FrameworkEvent::RemoveConnector(connector));
    }

    fn remove_encoder(&mut self, encoder: EncoderId) {
        self.live_encoders.retain(|e| *e != encoder);
        self.links.retain(|(_, e)| *e != encoder);
        self.record(FrameworkEvent::RemoveEncoder(encoder));
    }

    fn configure_source(
        &mut self,
        encoder: EncoderId,
        format: PixelFormat,
    ) -> Result<(), Self::Error> {
        if self.fail_at == Some(FrameworkStep::ConfigureSource) {
            return Err(MockError);
        }
        self.record(FrameworkEvent::ConfigureSource(encoder, format));
        Ok(())
    }

    fn bound_source(&self, _encoder: EncoderId) -> Option<VideoPipe> {
        self.bound_pipe
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
