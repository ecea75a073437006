//! Control-core behaviour against mock adapters.
//!
//! Covers the firmware's observable contract: transmit gating, heartbeat
//! cadence and pacing, go-latch idempotence, inbound dispatch, and
//! decode-failure isolation.

use crate::mock_hw::{MockIndicators, MockLink, MockPacer, RecordingSink};
use scoutlink::app::events::AppEvent;
use scoutlink::app::service::ControlCore;
use scoutlink::config::SystemConfig;
use scoutlink::drivers::go_button::GoLatch;
use scoutlink::link::frame::{
    self, BROADCAST_ADDR, MSG_ALERT, MSG_HEARTBEAT, MSG_STORAGE_UPDATE, MSG_SUPPLY_UPDATE,
};
use scoutlink::timing::TickClock;

const ROBOT: u8 = 0x42; // SystemConfig::default().robot_address
const CONTROLLER: u8 = 0x01;

fn fixtures() -> (SystemConfig, TickClock, GoLatch) {
    let config = SystemConfig::default();
    let clock = TickClock::new(config.ticks_per_second, config.heartbeat_interval_ticks);
    (config, clock, GoLatch::new())
}

/// Drive `n` tick periods the way the real loop does: one tick, one poll.
fn run_ticks(
    n: u32,
    clock: &TickClock,
    core: &mut ControlCore<'_>,
    link: &mut MockLink,
    indicators: &mut MockIndicators,
    pacer: &mut MockPacer,
    sink: &mut RecordingSink,
) {
    for _ in 0..n {
        clock.tick();
        core.poll(link, indicators, pacer, sink);
    }
}

// ── 1. No transmission before permission ─────────────────────

#[test]
fn silent_until_go_granted() {
    let (config, clock, latch) = fixtures();
    let mut core = ControlCore::new(config, &clock, &latch);
    let (mut link, mut ind, mut pacer, mut sink) = (
        MockLink::new(),
        MockIndicators::new(),
        MockPacer::new(),
        RecordingSink::new(),
    );

    // Five full heartbeat intervals with the latch never fired.
    run_ticks(100, &clock, &mut core, &mut link, &mut ind, &mut pacer, &mut sink);

    assert!(link.sent.is_empty(), "no frames may leave before the go button");
    assert_eq!(ind.liveness_toggles, 0);
    assert_eq!(pacer.delays_ns.len(), 0, "pacing only happens around a send");
}

// ── 2. Heartbeat cadence once granted ────────────────────────

#[test]
fn one_heartbeat_alert_pair_per_interval() {
    let (config, clock, latch) = fixtures();
    let mut core = ControlCore::new(config, &clock, &latch);
    let (mut link, mut ind, mut pacer, mut sink) = (
        MockLink::new(),
        MockIndicators::new(),
        MockPacer::new(),
        RecordingSink::new(),
    );

    latch.latch_from_isr();

    // Three full intervals, with inbound chatter arriving throughout.
    for interval in 0..3u8 {
        let update =
            frame::encode_to_vec(ROBOT, CONTROLLER, MSG_SUPPLY_UPDATE, &[interval]).unwrap();
        link.inject(&update);
        run_ticks(20, &clock, &mut core, &mut link, &mut ind, &mut pacer, &mut sink);
    }

    assert_eq!(link.sent.len(), 6, "exactly one pair per interval");
    for pair in 0..3 {
        assert_eq!(link.sent_type(pair * 2), MSG_HEARTBEAT);
        assert_eq!(link.sent_type(pair * 2 + 1), MSG_ALERT);
    }
    assert_eq!(ind.liveness_toggles, 3);
    // One 20 ms pacing stall between the members of each pair.
    assert_eq!(pacer.delays_ns.len(), 3);
    assert_eq!(pacer.total_ms(), 60);
}

// ── 3. Idempotent go latch ───────────────────────────────────

#[test]
fn repeated_go_edges_have_no_extra_effect() {
    let (config, clock, latch) = fixtures();
    let mut core = ControlCore::new(config, &clock, &latch);
    let (mut link, mut ind, mut pacer, mut sink) = (
        MockLink::new(),
        MockIndicators::new(),
        MockPacer::new(),
        RecordingSink::new(),
    );

    for _ in 0..5 {
        latch.latch_from_isr();
        core.poll(&mut link, &mut ind, &mut pacer, &mut sink);
    }

    assert!(ind.ready);
    assert_eq!(ind.ready_writes, 1, "ready LED is lit exactly once");
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::GoGranted)),
        1,
        "grant is announced exactly once"
    );
}

// ── 4. Bitmask round-trip onto indicators ────────────────────

#[test]
fn storage_update_drives_storage_indicators_only() {
    let (config, clock, latch) = fixtures();
    let mut core = ControlCore::new(config, &clock, &latch);
    let (mut link, mut ind, mut pacer, mut sink) = (
        MockLink::new(),
        MockIndicators::new(),
        MockPacer::new(),
        RecordingSink::new(),
    );

    let update =
        frame::encode_to_vec(ROBOT, CONTROLLER, MSG_STORAGE_UPDATE, &[0b0000_1011]).unwrap();
    link.inject(&update);
    core.poll(&mut link, &mut ind, &mut pacer, &mut sink);

    assert_eq!(core.storage_mask(), 0b0000_1011);
    assert_eq!(ind.storage, [true, true, false, true]);
    assert_eq!(core.supply_mask(), 0, "supply state untouched");
    assert_eq!(ind.supply, [false; 4]);
}

// ── 5. Decode-failure isolation ──────────────────────────────

#[test]
fn malformed_frame_changes_nothing() {
    let (config, clock, latch) = fixtures();
    let mut core = ControlCore::new(config, &clock, &latch);
    let (mut link, mut ind, mut pacer, mut sink) = (
        MockLink::new(),
        MockIndicators::new(),
        MockPacer::new(),
        RecordingSink::new(),
    );

    // Establish known state first.
    let good = frame::encode_to_vec(ROBOT, CONTROLLER, MSG_SUPPLY_UPDATE, &[0x09]).unwrap();
    link.inject(&good);
    core.poll(&mut link, &mut ind, &mut pacer, &mut sink);
    assert_eq!(core.supply_mask(), 0x09);
    let writes_before = ind.slot_writes;

    // Corrupt a copy of the same frame.
    let mut bad: Vec<u8> = good.to_vec();
    let last = bad.len() - 1;
    bad[last] ^= 0xFF;
    link.inject(&bad);
    core.poll(&mut link, &mut ind, &mut pacer, &mut sink);

    assert_eq!(core.supply_mask(), 0x09);
    assert_eq!(core.storage_mask(), 0);
    assert_eq!(ind.supply, [true, false, false, true]);
    assert_eq!(
        ind.slot_writes, writes_before,
        "rejected frames must not touch the indicators"
    );
    assert_eq!(sink.count(|e| matches!(e, AppEvent::FrameRejected(_))), 1);
}

#[test]
fn frame_for_another_robot_is_discarded() {
    let (config, clock, latch) = fixtures();
    let mut core = ControlCore::new(config, &clock, &latch);
    let (mut link, mut ind, mut pacer, mut sink) = (
        MockLink::new(),
        MockIndicators::new(),
        MockPacer::new(),
        RecordingSink::new(),
    );

    let foreign = frame::encode_to_vec(0x13, CONTROLLER, MSG_STORAGE_UPDATE, &[0x0F]).unwrap();
    link.inject(&foreign);
    core.poll(&mut link, &mut ind, &mut pacer, &mut sink);

    assert_eq!(core.storage_mask(), 0);
    assert_eq!(ind.slot_writes, 0);
}

// ── Unknown types still refresh indicators ───────────────────

#[test]
fn unknown_type_refreshes_indicators_without_state_change() {
    let (config, clock, latch) = fixtures();
    let mut core = ControlCore::new(config, &clock, &latch);
    let (mut link, mut ind, mut pacer, mut sink) = (
        MockLink::new(),
        MockIndicators::new(),
        MockPacer::new(),
        RecordingSink::new(),
    );

    let unknown = frame::encode_to_vec(ROBOT, CONTROLLER, 0x5E, &[1, 2, 3]).unwrap();
    link.inject(&unknown);
    core.poll(&mut link, &mut ind, &mut pacer, &mut sink);

    assert_eq!(core.storage_mask(), 0);
    assert_eq!(core.supply_mask(), 0);
    assert_eq!(ind.slot_writes, 8, "decode succeeded, so all eight LEDs refresh");
    assert_eq!(sink.count(|e| matches!(e, AppEvent::UnknownType(0x5E))), 1);
}

// ── Send failure is fire-and-forget ──────────────────────────

#[test]
fn refused_send_is_dropped_not_retried() {
    let (config, clock, latch) = fixtures();
    let mut core = ControlCore::new(config, &clock, &latch);
    let (mut link, mut ind, mut pacer, mut sink) = (
        MockLink::new(),
        MockIndicators::new(),
        MockPacer::new(),
        RecordingSink::new(),
    );

    latch.latch_from_isr();
    link.fail_sends = true;
    run_ticks(20, &clock, &mut core, &mut link, &mut ind, &mut pacer, &mut sink);

    assert!(link.sent.is_empty());
    assert_eq!(sink.count(|e| matches!(e, AppEvent::SendFailed(_))), 2);

    // Channel recovers: the next interval transmits normally.
    link.fail_sends = false;
    run_ticks(20, &clock, &mut core, &mut link, &mut ind, &mut pacer, &mut sink);
    assert_eq!(link.sent.len(), 2);
}

// ── 7. End-to-end scenario ───────────────────────────────────

#[test]
fn end_to_end_boot_grant_heartbeat_and_supply_update() {
    let (config, clock, latch) = fixtures();
    let alert_code = config.alert_code;
    let mut core = ControlCore::new(config, &clock, &latch);
    let (mut link, mut ind, mut pacer, mut sink) = (
        MockLink::new(),
        MockIndicators::new(),
        MockPacer::new(),
        RecordingSink::new(),
    );

    // Phase 1: a full interval elapses before the go button — silence.
    run_ticks(20, &clock, &mut core, &mut link, &mut ind, &mut pacer, &mut sink);
    assert!(link.sent.is_empty());

    // Phase 2: operator presses go; the next interval transmits one pair.
    latch.latch_from_isr();
    run_ticks(20, &clock, &mut core, &mut link, &mut ind, &mut pacer, &mut sink);

    assert_eq!(link.sent.len(), 2, "exactly one heartbeat + one alert");
    assert_eq!(link.sent_dest(0), BROADCAST_ADDR);
    assert_eq!(link.sent_type(0), MSG_HEARTBEAT);
    assert!(link.sent_payload(0).is_empty());
    assert_eq!(link.sent_dest(1), BROADCAST_ADDR);
    assert_eq!(link.sent_type(1), MSG_ALERT);
    assert_eq!(link.sent_payload(1), &[alert_code]);

    // Phase 3: controller reports supply slots 1 and 3 occupied.
    let update = frame::encode_to_vec(ROBOT, CONTROLLER, MSG_SUPPLY_UPDATE, &[0x05]).unwrap();
    link.inject(&update);
    core.poll(&mut link, &mut ind, &mut pacer, &mut sink);

    assert_eq!(core.supply_mask(), 0x05);
    assert_eq!(ind.supply, [true, false, true, false]);
    assert_eq!(ind.storage, [false; 4], "storage indicators unchanged");
}

// ── Dropped-cycle policy ─────────────────────────────────────

#[test]
fn pre_grant_heartbeat_cycle_is_dropped_not_deferred() {
    let (config, clock, latch) = fixtures();
    let mut core = ControlCore::new(config, &clock, &latch);
    let (mut link, mut ind, mut pacer, mut sink) = (
        MockLink::new(),
        MockIndicators::new(),
        MockPacer::new(),
        RecordingSink::new(),
    );

    // Heartbeat becomes due and is consumed while ungranted.
    run_ticks(20, &clock, &mut core, &mut link, &mut ind, &mut pacer, &mut sink);
    assert!(link.sent.is_empty());

    // Granting now must NOT cause an immediate burst send; the next
    // pair waits out a full interval.
    latch.latch_from_isr();
    core.poll(&mut link, &mut ind, &mut pacer, &mut sink);
    assert!(link.sent.is_empty(), "no burst right after the button press");

    run_ticks(19, &clock, &mut core, &mut link, &mut ind, &mut pacer, &mut sink);
    assert!(link.sent.is_empty());
    run_ticks(1, &clock, &mut core, &mut link, &mut ind, &mut pacer, &mut sink);
    assert_eq!(link.sent.len(), 2);
}
