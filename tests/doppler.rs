//! 도플러 식과 스윕/애니메이션 회귀 테스트.
use physics_lab_toolbox::doppler::{
    checked_observed_frequency, linspace, observed_frequency, sweep, AnimationSettings,
    DopplerAnimation, DopplerError, SweepRange, WaveParameters,
};

fn assert_close(label: &str, actual: f64, expected: f64, rel_tol: f64) {
    let denom = expected.abs().max(1.0);
    let diff = (actual - expected).abs();
    assert!(
        diff <= rel_tol * denom,
        "{label} expected {expected:.6} got {actual:.6} (diff {diff:.6}, tol {rel_tol})"
    );
}

fn air() -> WaveParameters {
    WaveParameters {
        wave_speed: 343.0,
        observer_speed: 0.0,
        base_frequency: 1000.0,
    }
}

#[test]
fn no_relative_motion_keeps_frequency() {
    for f in [1.0, 440.0, 1000.0, 12_345.678] {
        assert_close("f", observed_frequency(343.0, 0.0, 0.0, f), f, 1e-12);
    }
}

#[test]
fn approaching_source_raises_frequency() {
    // 1000 Hz * 343 / (343 - 34.3) = 1111.11 Hz
    assert_close("f", observed_frequency(343.0, 0.0, 34.3, 1000.0), 1111.111_111, 1e-9);
    // 관측자가 음원 쪽으로 이동
    assert_close("f", observed_frequency(343.0, 34.3, 0.0, 1000.0), 1100.0, 1e-12);
}

#[test]
fn frequency_is_monotonic_below_wave_speed() {
    let s = sweep(
        &air(),
        &SweepRange {
            source_speed_min: -100.0,
            source_speed_max: 330.0,
            steps: 200,
        },
    )
    .expect("sweep");
    let f = s.observed_frequencies();
    assert!(f.windows(2).all(|w| w[1] > w[0]));
}

#[test]
fn singular_and_supersonic_values_are_reproduced() {
    assert!(observed_frequency(343.0, 0.0, 343.0, 1000.0).is_infinite());
    assert!(observed_frequency(343.0, 0.0, 400.0, 1000.0) < 0.0);
    assert_eq!(
        checked_observed_frequency(343.0, 0.0, 343.0, 1000.0),
        Err(DopplerError::Singularity { source_speed: 343.0 })
    );
    assert!(checked_observed_frequency(343.0, 0.0, 400.0, 1000.0).expect("finite") < 0.0);
}

#[test]
fn sweep_hits_both_endpoints() {
    let s = sweep(
        &air(),
        &SweepRange {
            source_speed_min: 0.0,
            source_speed_max: 300.0,
            steps: 50,
        },
    )
    .expect("sweep");
    assert_eq!(s.len(), 50);
    assert_eq!(s.observed_frequencies().len(), s.source_speeds().len());
    assert_eq!(s.source_speeds()[0], 0.0);
    assert_eq!(s.source_speeds()[49], 300.0);
    assert_close("f0", s.observed_frequencies()[0], 1000.0, 1e-12);
    assert_close("f_last", s.observed_frequencies()[49], 1000.0 * 343.0 / 43.0, 1e-12);
    assert_eq!(s.supersonic_count(343.0), 0);
}

#[test]
fn single_step_sweep_uses_minimum() {
    assert_eq!(linspace(5.0, 9.0, 1), vec![5.0]);
    assert!(linspace(5.0, 9.0, 0).is_empty());
    assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
}

#[test]
fn sweep_through_wave_speed_is_an_error() {
    let err = sweep(
        &air(),
        &SweepRange {
            source_speed_min: 0.0,
            source_speed_max: 343.0,
            steps: 8,
        },
    )
    .unwrap_err();
    assert_eq!(err, DopplerError::Singularity { source_speed: 343.0 });
}

#[test]
fn supersonic_samples_are_counted_not_rejected() {
    let s = sweep(
        &air(),
        &SweepRange {
            source_speed_min: 350.0,
            source_speed_max: 500.0,
            steps: 4,
        },
    )
    .expect("supersonic sweep");
    assert_eq!(s.supersonic_count(343.0), 4);
    assert!(s.observed_frequencies().iter().all(|&f| f < 0.0));
}

#[test]
fn invalid_sweep_inputs_are_rejected() {
    let range = SweepRange {
        source_speed_min: 0.0,
        source_speed_max: 10.0,
        steps: 0,
    };
    assert!(matches!(sweep(&air(), &range), Err(DopplerError::InvalidInput(_))));
    let bad = WaveParameters {
        wave_speed: -1.0,
        ..air()
    };
    let range = SweepRange { steps: 3, ..range };
    assert!(matches!(sweep(&bad, &range), Err(DopplerError::InvalidInput(_))));
}

fn animation() -> DopplerAnimation {
    DopplerAnimation::new(
        air(),
        SweepRange {
            source_speed_min: 0.0,
            source_speed_max: 300.0,
            steps: 50,
        },
        AnimationSettings {
            frames: 100,
            fps: 10,
            window_start: 0.0,
            window_end: 10.0,
            wave_samples: 11,
        },
    )
    .expect("animation")
}

#[test]
fn animation_maps_position_onto_speed_range() {
    let anim = animation();
    let first = anim.frame(0);
    assert_eq!(first.source_position, 0.0);
    assert_eq!(first.source_speed, 0.0);
    assert_close("f", first.observed_frequency, 1000.0, 1e-12);

    let mid = anim.frame(50);
    assert_close("x", mid.source_position, 5.0, 1e-12);
    assert_close("v", mid.source_speed, 150.0, 1e-12);
    assert_close("t", mid.time_s, 5.0, 1e-12);
    assert_close(
        "f",
        mid.observed_frequency,
        observed_frequency(343.0, 0.0, 150.0, 1000.0),
        1e-12,
    );

    // 한 주기 후 창의 시작으로 돌아온다
    assert_eq!(anim.frame(100).source_position, 0.0);
    assert_eq!(anim.frames().count(), 100);
}

#[test]
fn waveform_is_sampled_across_window() {
    let frame = animation().frame(0);
    assert_eq!(frame.waveform.len(), 11);
    assert_eq!(frame.waveform[0].0, 0.0);
    assert_eq!(frame.waveform[10].0, 10.0);
    // t=0, x=위치 → sin(0)
    assert!(frame.waveform[0].1.abs() < 1e-12);
    assert!(frame.waveform.iter().all(|(_, y)| y.abs() <= 1.0));
}

#[test]
fn animation_rejects_empty_window() {
    let err = DopplerAnimation::new(
        air(),
        SweepRange {
            source_speed_min: 0.0,
            source_speed_max: 1.0,
            steps: 2,
        },
        AnimationSettings {
            window_start: 3.0,
            window_end: 3.0,
            ..AnimationSettings::default()
        },
    )
    .unwrap_err();
    assert!(matches!(err, DopplerError::InvalidInput(_)));
}

#[test]
fn animation_frame_landing_on_wave_speed_is_rejected() {
    let range = SweepRange {
        source_speed_min: 0.0,
        source_speed_max: 686.0,
        steps: 100,
    };
    // 100개 표본은 343을 건너뛰지만 애니메이션 100번째 프레임은 정확히 343이다.
    assert!(sweep(&air(), &range).is_ok());
    let err = DopplerAnimation::new(air(), range, AnimationSettings::default()).unwrap_err();
    assert_eq!(err, DopplerError::Singularity { source_speed: 343.0 });
}

#[test]
fn supersonic_animation_frames_stay_finite() {
    let anim = DopplerAnimation::new(
        air(),
        SweepRange {
            source_speed_min: 0.0,
            source_speed_max: 600.0,
            steps: 10,
        },
        AnimationSettings::default(),
    )
    .expect("animation");
    assert_eq!(anim.frames().count(), 200);
    assert!(anim.frames().all(|f| f.observed_frequency.is_finite()));
    assert!(anim.frames().any(|f| f.observed_frequency < 0.0));
}
