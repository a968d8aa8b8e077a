//! 그래프/애니메이션/CSV 파일 출력 테스트.
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use image::codecs::gif::GifDecoder;
use image::AnimationDecoder;
use physics_lab_toolbox::app;
use physics_lab_toolbox::config::Config;
use physics_lab_toolbox::doppler::{
    sweep, AnimationSettings, DopplerAnimation, SweepRange, WaveParameters,
};
use physics_lab_toolbox::render::{
    self, bar_chart, line_chart, ChartSize, DopplerExport, DopplerFileNames, ReactionExport,
    RenderError,
};
use physics_lab_toolbox::thermo::{analyze, FormationEnthalpyTable, ReactionPreset};

fn gif_frame_count(path: &Path) -> usize {
    let decoder = GifDecoder::new(BufReader::new(File::open(path).expect("open gif"))).expect("gif");
    decoder.into_frames().collect_frames().expect("frames").len()
}

fn wave() -> WaveParameters {
    WaveParameters {
        wave_speed: 343.0,
        observer_speed: 0.0,
        base_frequency: 1000.0,
    }
}

fn range() -> SweepRange {
    SweepRange {
        source_speed_min: 0.0,
        source_speed_max: 300.0,
        steps: 6,
    }
}

#[test]
fn file_names_embed_frequency_and_wave_speed() {
    let names = DopplerFileNames::new(1000.0, 343.0);
    assert_eq!(names.plot, "doppler_f_1000.0_v_343.0.png");
    assert_eq!(names.sweep_animation, "doppler_anim_f_1000.0_v_343.0.gif");
    assert_eq!(DopplerFileNames::new(440.5, 1500.0).data, "doppler_f_440.5_v_1500.0.csv");
    assert_eq!(render::reaction_file_stem("Methane Combustion"), "reaction_methane_combustion");
}

#[test]
fn charts_have_requested_size() {
    let size = ChartSize::new(200, 120);
    let img = line_chart(&[(0.0, 1.0), (1.0, 2.0), (2.0, f64::INFINITY)], Some(1.5), size)
        .expect("line chart");
    assert_eq!(img.dimensions(), (200, 120));
    let bars = bar_chart(&[-890.31, 0.0, 12.0], size).expect("bar chart");
    assert_eq!(bars.dimensions(), (200, 120));
}

#[test]
fn empty_series_is_an_error() {
    let size = ChartSize::new(100, 100);
    assert!(matches!(line_chart(&[], None, size), Err(RenderError::EmptySeries)));
    assert!(matches!(
        line_chart(&[(f64::NAN, 1.0)], None, size),
        Err(RenderError::EmptySeries)
    ));
    assert!(matches!(bar_chart(&[], size), Err(RenderError::EmptySeries)));
}

#[test]
fn doppler_export_writes_every_requested_file() {
    let dir = tempfile::tempdir().unwrap();
    let s = sweep(&wave(), &range()).expect("sweep");
    let anim = DopplerAnimation::new(
        wave(),
        range(),
        AnimationSettings {
            frames: 3,
            fps: 5,
            wave_samples: 20,
            ..AnimationSettings::default()
        },
    )
    .expect("animation");

    let outputs = render::export_doppler(
        dir.path(),
        &s,
        Some(&anim),
        1000.0,
        343.0,
        DopplerExport {
            plot: true,
            csv: true,
            animate: true,
            fps: 5,
            size: ChartSize::new(96, 72),
        },
    )
    .expect("export");

    for path in [
        outputs.plot.as_ref(),
        outputs.data.as_ref(),
        outputs.sweep_animation.as_ref(),
        outputs.wave_animation.as_ref(),
    ] {
        let path = path.expect("path recorded");
        assert!(path.exists(), "{} missing", path.display());
    }

    // 스윕 GIF는 표본마다 한 프레임, 파형 GIF는 설정된 프레임 수.
    let sweep_gif = outputs.sweep_animation.as_ref().unwrap();
    assert_eq!(gif_frame_count(sweep_gif), s.len());
    let wave_gif = outputs.wave_animation.as_ref().unwrap();
    assert_eq!(gif_frame_count(wave_gif), anim.frame_count());
}

#[test]
fn doppler_csv_holds_one_row_per_sample() {
    let dir = tempfile::tempdir().unwrap();
    let s = sweep(&wave(), &range()).expect("sweep");
    let outputs = render::export_doppler(
        dir.path(),
        &s,
        None,
        1000.0,
        343.0,
        DopplerExport {
            plot: false,
            csv: true,
            animate: false,
            fps: 10,
            size: ChartSize::new(96, 72),
        },
    )
    .expect("export");
    assert!(outputs.plot.is_none());

    let mut reader = csv::Reader::from_path(outputs.data.expect("csv")).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        ["source_speed_m_s", "observed_frequency_hz"]
    );
    let rows: Vec<(f64, f64)> = reader
        .records()
        .map(|r| {
            let r = r.unwrap();
            (r[0].parse().unwrap(), r[1].parse().unwrap())
        })
        .collect();
    assert_eq!(rows.len(), 6);
    assert_eq!(rows[0], (0.0, 1000.0));
    assert_eq!(rows[5].0, 300.0);
    assert!((rows[5].1 - 1000.0 * 343.0 / 43.0).abs() < 1e-9);
}

#[test]
fn plot_only_export_skips_animation_and_csv() {
    let dir = tempfile::tempdir().unwrap();
    let s = sweep(&wave(), &range()).expect("sweep");
    let outputs = render::export_doppler(
        dir.path(),
        &s,
        None,
        1000.0,
        343.0,
        DopplerExport {
            plot: true,
            csv: false,
            animate: false,
            fps: 10,
            size: ChartSize::new(96, 72),
        },
    )
    .expect("export");
    assert!(outputs.plot.expect("plot").ends_with("doppler_f_1000.0_v_343.0.png"));
    assert!(outputs.data.is_none());
    assert!(outputs.sweep_animation.is_none());
}

#[test]
fn reaction_export_writes_chart_and_csv() {
    let dir = tempfile::tempdir().unwrap();
    let table = FormationEnthalpyTable::built_in();
    let preset = ReactionPreset::MethaneCombustion;
    let energy = analyze(&preset.reaction(), &table, 298.0).expect("energy");
    let files = render::export_reaction(
        dir.path(),
        preset.key(),
        &energy,
        ReactionExport {
            plot: true,
            csv: true,
            size: ChartSize::new(96, 72),
        },
    )
    .expect("export");
    assert_eq!(files.len(), 2);
    assert!(files.iter().all(|p| p.exists()));
    assert!(files[0].ends_with("reaction_methane_combustion.png"));

    let mut reader = csv::Reader::from_path(&files[1]).unwrap();
    let record = reader.records().next().expect("one row").unwrap();
    let delta_h: f64 = record[2].parse().unwrap();
    assert!((delta_h + 890.31).abs() < 1e-9);
}

#[test]
fn enthalpy_csv_is_written_without_plot() {
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = Config::default();
    cfg.output.directory = dir.path().to_path_buf();
    cfg.output.write_csv = true;
    let table = FormationEnthalpyTable::built_in();
    let preset = ReactionPreset::MethaneCombustion;

    let report = app::run_enthalpy(&cfg, &table, &preset.reaction(), preset.key(), 298.0, false)
        .expect("run");
    assert_eq!(report.files, vec![dir.path().join("reaction_methane_combustion.csv")]);
    assert!(!dir.path().join("reaction_methane_combustion.png").exists());

    cfg.output.write_csv = false;
    let report = app::run_enthalpy(&cfg, &table, &preset.reaction(), preset.key(), 298.0, false)
        .expect("run");
    assert!(report.files.is_empty());
}
