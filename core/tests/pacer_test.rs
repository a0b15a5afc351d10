use std::time::{Duration, Instant};

use vgasim_core::pacer::{ClockMeter, FramePacer};

const FRAME: Duration = Duration::from_nanos(16_666_667);

#[test]
fn test_no_gate_before_interval() {
    let start = Instant::now();
    let mut pacer = FramePacer::new(FRAME, start);

    assert!(!pacer.gate(start));
    assert!(!pacer.gate(start + FRAME / 2));
    assert!(!pacer.gate(start + FRAME - Duration::from_nanos(1)));
    assert_eq!(pacer.presented(), 0);
}

#[test]
fn test_gates_once_interval_elapsed() {
    let start = Instant::now();
    let mut pacer = FramePacer::new(FRAME, start);

    assert!(pacer.gate(start + FRAME));
    assert_eq!(pacer.presented(), 1);
}

#[test]
fn test_at_most_once_per_window() {
    let start = Instant::now();
    let mut pacer = FramePacer::new(FRAME, start);
    let step = Duration::from_micros(250);

    let mut gated = Vec::new();
    let mut now = start;
    for _ in 0..4000 {
        now += step;
        if pacer.gate(now) {
            gated.push(now);
        }
    }

    assert!(!gated.is_empty());
    for pair in gated.windows(2) {
        assert!(pair[1] - pair[0] >= FRAME);
    }
    // Every full interval since the last pass got a pass.
    let last = *gated.last().unwrap();
    assert!(now - last < FRAME);
}

#[test]
fn test_interval_measured_from_previous_pass() {
    let start = Instant::now();
    let mut pacer = FramePacer::new(FRAME, start);

    let late = start + FRAME * 3;
    assert!(pacer.gate(late));
    assert!(!pacer.gate(late + FRAME / 2));
    assert!(pacer.gate(late + FRAME));
}

#[test]
fn test_zero_interval_always_gates() {
    let start = Instant::now();
    let mut pacer = FramePacer::new(Duration::ZERO, start);
    assert!(pacer.gate(start));
    assert!(pacer.gate(start));
    assert_eq!(pacer.presented(), 2);
}

#[test]
fn test_meter_reports_after_interval() {
    let start = Instant::now();
    let mut meter = ClockMeter::new(2_000_000, start);
    assert_eq!(meter.mhz(), None);

    meter.observe(1_999_998, start + Duration::from_millis(100));
    assert_eq!(meter.mhz(), None);

    // One million bus cycles in half a second.
    meter.observe(2_000_000, start + Duration::from_millis(500));
    let mhz = meter.mhz().unwrap();
    assert!((mhz - 2.0).abs() < 1e-9, "got {mhz}");
    assert_eq!(meter.last_delta(), Some(Duration::from_millis(500)));
}

#[test]
fn test_meter_measures_from_previous_sample() {
    let start = Instant::now();
    let mut meter = ClockMeter::new(1_000, start);

    meter.observe(1_000, start + Duration::from_secs(1));
    meter.observe(2_000, start + Duration::from_millis(1_250));
    assert_eq!(meter.last_delta(), Some(Duration::from_millis(250)));
}
