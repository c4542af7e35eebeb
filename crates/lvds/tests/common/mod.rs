//! Shared fixtures for the driver integration tests.
#![allow(dead_code)] // not every test file uses every fixture
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use embedded_hal_mock::eh1::delay::NoopDelay;
use lvds::{DeviceDescriptor, ProbeOutcome, Rk3288Lvds};
use platform::mocks::{MockClock, MockPanel, MockSyscon, MockWindow};
use platform::{DisplayTiming, SharedRegisterMap};

pub type TestLvds = Rk3288Lvds<MockWindow, MockSyscon, MockClock, MockPanel, NoopDelay>;

/// GRF offsets of the one supported SoC, for register assertions.
pub const GRF_GPIO1D_IOMUX: u32 = 0x000c;
pub const GRF_SOC_CON6: u32 = 0x025c;
pub const GRF_SOC_CON7: u32 = 0x0260;

pub fn descriptor() -> DeviceDescriptor<'static> {
    DeviceDescriptor {
        compatible: "rockchip,rk3288-lvds",
        has_panel_ref: true,
        output: None,
        data_mapping: None,
        data_width: None,
    }
}

/// 1024×768@60: even back porch (296), negative syncs.
pub fn timing() -> DisplayTiming {
    DisplayTiming {
        pixel_clock_khz: 65_000,
        hactive: 1024,
        hsync_start: 1048,
        hsync_end: 1184,
        htotal: 1344,
        vactive: 768,
        vsync_start: 771,
        vsync_end: 777,
        vtotal: 806,
        hsync_positive: false,
        clock_positive: false,
    }
}

/// Probe with default mocks; panics on a non-ready outcome.
pub fn probe(desc: &DeviceDescriptor<'_>) -> TestLvds {
    probe_with(desc, MockWindow::new(), MockSyscon::new(), MockClock::new())
}

/// Probe with caller-supplied window/syscon/clock mocks.
pub fn probe_with(
    desc: &DeviceDescriptor<'_>,
    window: MockWindow,
    syscon: MockSyscon,
    clock: MockClock,
) -> TestLvds {
    match Rk3288Lvds::probe(
        desc,
        SharedRegisterMap::new(syscon),
        window,
        clock,
        Some(MockPanel::new()),
        NoopDelay::new(),
    ) {
        ProbeOutcome::Ready(device) => device,
        other => panic!("probe did not succeed: {other:?}"),
    }
}

/// Probe and bind against `framework`; the window arrives pre-mapped and
/// the clock prepared, as after a successful bind.
pub fn probe_bound(
    desc: &DeviceDescriptor<'_>,
    framework: &mut platform::mocks::MockFramework,
) -> TestLvds {
    let mut device = probe(desc);
    device.bind(framework).expect("bind should succeed");
    device
}
