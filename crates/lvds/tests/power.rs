//! DPMS state machine integration tests — sequence ordering, idempotence,
//! and failure behaviour of the power paths.
// Integration test file: expect/unwrap/panic are intentional test mechanisms.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, clippy::arithmetic_side_effects)]

mod common;

use common::{descriptor, probe_with, GRF_SOC_CON7};
use lvds::registers;
use platform::mocks::{MockClock, MockSyscon, MockWindow};
use platform::DpmsState;

fn mapped_window() -> MockWindow {
    let mut window = MockWindow::new();
    window.mapped = true;
    window
}

#[tokio::test]
async fn test_power_on_sequence_order() {
    let mut device = probe_with(
        &descriptor(),
        mapped_window(),
        MockSyscon::new(),
        MockClock::new(),
    );
    device.set_dpms(DpmsState::On).await;

    assert_eq!(device.dpms_state(), DpmsState::On);
    let (window, _, clock, panel, _) = device.release();

    assert_eq!(panel.enable_calls, 1);
    assert!(clock.enabled);
    // PLL comes up before the TX drivers.
    assert_eq!(
        window.writes.as_slice(),
        [
            (registers::CFG_REGC, registers::CFG_REGC_PLL_ENABLE),
            (registers::CFG_REG21, registers::CFG_REG21_TX_ENABLE),
        ]
        .as_slice()
    );
}

#[tokio::test]
async fn test_repeated_on_is_noop() {
    let mut device = probe_with(
        &descriptor(),
        mapped_window(),
        MockSyscon::new(),
        MockClock::new(),
    );
    device.set_dpms(DpmsState::On).await;
    device.set_dpms(DpmsState::On).await;

    let (window, _, clock, panel, _) = device.release();
    assert_eq!(panel.enable_calls, 1, "power-on must run exactly once");
    assert_eq!(clock.enable_calls, 1);
    assert_eq!(window.total_writes, 2);
}

#[tokio::test]
async fn test_initial_off_is_noop() {
    let mut device = probe_with(
        &descriptor(),
        mapped_window(),
        MockSyscon::new(),
        MockClock::new(),
    );
    // The device starts Off; requesting Off again must touch nothing.
    device.set_dpms(DpmsState::Off).await;

    let (window, grf, clock, panel, _) = device.release();
    assert_eq!(window.total_writes, 0);
    assert!(grf.release().unwrap().writes.is_empty());
    assert_eq!(clock.disable_calls, 0);
    assert_eq!(panel.disable_calls, 0);
}

#[tokio::test]
async fn test_on_then_off_round_trip() {
    let mut device = probe_with(
        &descriptor(),
        mapped_window(),
        MockSyscon::new(),
        MockClock::new(),
    );
    device.set_dpms(DpmsState::On).await;
    device.set_dpms(DpmsState::Off).await;

    assert_eq!(device.dpms_state(), DpmsState::Off);
    let (window, grf, clock, panel, _) = device.release();

    // The transmitter ends in its fixed disable values regardless of what
    // was written before.
    assert_eq!(
        window.reg(registers::CFG_REG21),
        Some(registers::CFG_REG21_TX_DISABLE)
    );
    assert_eq!(
        window.reg(registers::CFG_REGC),
        Some(registers::CFG_REGC_PLL_DISABLE)
    );
    // GRF reset pattern: mask all, power-down bit set.
    assert_eq!(
        grf.release().unwrap().last_write(GRF_SOC_CON7),
        Some(0xffff_8000)
    );
    assert!(!clock.enabled);
    assert!(!panel.enabled);
    assert_eq!(panel.disable_calls, 1);
}

#[tokio::test]
async fn test_standby_and_suspend_collapse_to_power_off() {
    let mut device = probe_with(
        &descriptor(),
        mapped_window(),
        MockSyscon::new(),
        MockClock::new(),
    );
    device.set_dpms(DpmsState::On).await;
    device.set_dpms(DpmsState::Standby).await;
    assert_eq!(device.dpms_state(), DpmsState::Standby);

    // A different non-On target runs the power-down again; repeating the
    // same target does not.
    device.set_dpms(DpmsState::Suspend).await;
    device.set_dpms(DpmsState::Suspend).await;

    let (_, _, clock, panel, _) = device.release();
    assert_eq!(panel.disable_calls, 2);
    assert_eq!(clock.disable_calls, 2);
}

#[tokio::test]
async fn test_clock_failure_aborts_power_on() {
    let mut clock = MockClock::new();
    clock.fail_enable = true;
    let mut device = probe_with(&descriptor(), mapped_window(), MockSyscon::new(), clock);

    device.set_dpms(DpmsState::On).await;

    let (window, _, _, panel, _) = device.release();
    // The panel step precedes the clock gate; the PLL/TX writes must not.
    assert_eq!(panel.enable_calls, 1);
    assert_eq!(window.total_writes, 0, "no PLL/TX writes after clock failure");
}

#[tokio::test]
async fn test_power_off_survives_grf_failure() {
    let mut syscon = MockSyscon::new();
    syscon.fail_writes = true;
    let mut device = probe_with(&descriptor(), mapped_window(), syscon, MockClock::new());

    device.set_dpms(DpmsState::On).await;
    device.set_dpms(DpmsState::Off).await;

    let (window, _, clock, panel, _) = device.release();
    // Best-effort GRF reset: the rest of the teardown still runs.
    assert_eq!(
        window.reg(registers::CFG_REG21),
        Some(registers::CFG_REG21_TX_DISABLE)
    );
    assert_eq!(
        window.reg(registers::CFG_REGC),
        Some(registers::CFG_REGC_PLL_DISABLE)
    );
    assert!(!clock.enabled);
    assert_eq!(panel.disable_calls, 1);
}

#[tokio::test]
async fn test_power_writes_are_not_mirrored() {
    let mut device = probe_with(
        &descriptor(),
        mapped_window(),
        MockSyscon::new(),
        MockClock::new(),
    );
    device.set_dpms(DpmsState::On).await;

    let (window, _, _, _, _) = device.release();
    // PLL/TX control sits outside the mirrored channel banks.
    assert_eq!(window.write_count(registers::CFG_REGC + 0x100), 0);
    assert_eq!(window.write_count(registers::CFG_REG21 + 0x100), 0);
}
