use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, DynamicImage, Frame, RgbImage};
use serde::Serialize;
use tracing::info;

use super::chart::{self, Bounds, Canvas, ChartSize, MARKER, REFERENCE, SERIES};
use super::RenderError;
use crate::doppler::{DopplerAnimation, DopplerSweep};
use crate::thermo::ReactionEnergy;

/// GIF 양자화 속도(1=고품질/느림, 30=빠름).
const GIF_SPEED: i32 = 10;

/// 출력 디렉터리를 필요할 때 만든다.
pub fn ensure_dir(dir: &Path) -> Result<PathBuf, RenderError> {
    fs::create_dir_all(dir)?;
    Ok(dir.to_path_buf())
}

/// 파일명에 넣을 숫자 표기. 정수값도 `1000.0`처럼 소수 한 자리를 남긴다.
pub fn format_param(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

/// 기본 주파수와 파동 속도로 정해지는 도플러 출력 파일 이름 묶음.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DopplerFileNames {
    pub plot: String,
    pub data: String,
    pub sweep_animation: String,
    pub wave_animation: String,
}

impl DopplerFileNames {
    pub fn new(base_frequency: f64, wave_speed: f64) -> Self {
        let tag = format!(
            "f_{}_v_{}",
            format_param(base_frequency),
            format_param(wave_speed)
        );
        Self {
            plot: format!("doppler_{tag}.png"),
            data: format!("doppler_{tag}.csv"),
            sweep_animation: format!("doppler_anim_{tag}.gif"),
            wave_animation: format!("doppler_wave_{tag}.gif"),
        }
    }
}

pub fn reaction_file_stem(key: &str) -> String {
    let cleaned: String = key
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    format!("reaction_{cleaned}")
}

pub fn save_png(image: &RgbImage, path: &Path) -> Result<(), RenderError> {
    image.save(path)?;
    info!(path = %path.display(), "chart written");
    Ok(())
}

/// 프레임 목록을 무한 반복 GIF로 저장한다.
pub fn save_gif<I>(frames: I, fps: u32, path: &Path) -> Result<usize, RenderError>
where
    I: IntoIterator<Item = RgbImage>,
{
    let file = BufWriter::new(File::create(path)?);
    let mut encoder = GifEncoder::new_with_speed(file, GIF_SPEED);
    encoder.set_repeat(Repeat::Infinite)?;
    let delay = Delay::from_numer_denom_ms(1000, fps.max(1));
    let mut count = 0;
    for image in frames {
        let rgba = DynamicImage::ImageRgb8(image).into_rgba8();
        encoder.encode_frame(Frame::from_parts(rgba, 0, 0, delay))?;
        count += 1;
    }
    if count == 0 {
        return Err(RenderError::EmptySeries);
    }
    info!(path = %path.display(), frames = count, "animation written");
    Ok(count)
}

/// 스윕 CSV 한 행.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SweepRow {
    pub source_speed_m_s: f64,
    pub observed_frequency_hz: f64,
}

/// 반응 CSV 한 행.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ReactionRow {
    pub reactant_enthalpy_kj: f64,
    pub product_enthalpy_kj: f64,
    pub delta_h_kj: f64,
    pub delta_u_kj: f64,
    pub temperature_k: f64,
}

impl From<&ReactionEnergy> for ReactionRow {
    fn from(e: &ReactionEnergy) -> Self {
        Self {
            reactant_enthalpy_kj: e.reactant_enthalpy_kj,
            product_enthalpy_kj: e.product_enthalpy_kj,
            delta_h_kj: e.delta_h_kj,
            delta_u_kj: e.delta_u_kj,
            temperature_k: e.temperature_k,
        }
    }
}

/// 행들을 CSV로 쓴다. 머리글은 필드 이름에서 나온다.
pub fn write_csv<T, I>(path: &Path, rows: I) -> Result<usize, RenderError>
where
    T: Serialize,
    I: IntoIterator<Item = T>,
{
    let mut writer = csv::Writer::from_path(path)?;
    let mut count = 0;
    for row in rows {
        writer.serialize(row)?;
        count += 1;
    }
    writer.flush()?;
    info!(path = %path.display(), rows = count, "data written");
    Ok(count)
}

/// 음원 속도-관측 주파수 정적 그래프. 기준 주파수는 빨간 점선.
pub fn doppler_sweep_chart(
    sweep: &DopplerSweep,
    base_frequency: f64,
    size: ChartSize,
) -> Result<RgbImage, RenderError> {
    let points: Vec<(f64, f64)> = sweep.points().collect();
    chart::line_chart(&points, Some(base_frequency), size)
}

/// 스윕 곡선을 한 점씩 늘려 가며 그리는 프레임들. 축은 고정된다.
///
/// 프레임은 인코더가 당겨 갈 때 하나씩 그려진다.
pub fn sweep_reveal_frames(
    sweep: &DopplerSweep,
    base_frequency: f64,
    size: ChartSize,
) -> Result<impl Iterator<Item = RgbImage>, RenderError> {
    let points: Vec<(f64, f64)> = sweep.points().collect();
    let bounds = Bounds::from_points(&points)
        .ok_or(RenderError::EmptySeries)?
        .include_y(base_frequency)
        .padded(0.1, 0.1);
    Ok((1..=points.len())
        .map(move |k| chart::line_chart_in(&points[..k], Some(base_frequency), bounds, size)))
}

/// 이동 음원 파형 애니메이션의 프레임 하나를 그린다.
pub fn wave_frame_image(animation: &DopplerAnimation, index: usize, size: ChartSize) -> RgbImage {
    let settings = animation.settings();
    let bounds = Bounds {
        x_min: settings.window_start,
        x_max: settings.window_end,
        y_min: -1.25,
        y_max: 1.25,
    };
    let frame = animation.frame(index);
    let mut canvas = Canvas::new(size, bounds);
    canvas.dashed_hline(0.0, REFERENCE);
    canvas.polyline(&frame.waveform, SERIES);
    canvas.vline(frame.source_position, MARKER);
    canvas.marker(frame.source_position, 0.0, 6, MARKER);
    canvas.into_image()
}

/// ΔH 구성 막대: 반응물 Σ, 생성물 Σ, ΔH, ΔU.
pub fn reaction_energy_chart(energy: &ReactionEnergy, size: ChartSize) -> Result<RgbImage, RenderError> {
    chart::bar_chart(
        &[
            energy.reactant_enthalpy_kj,
            energy.product_enthalpy_kj,
            energy.delta_h_kj,
            energy.delta_u_kj,
        ],
        size,
    )
}

/// 도플러 결과 파일 경로 묶음.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DopplerOutputs {
    pub plot: Option<PathBuf>,
    pub data: Option<PathBuf>,
    pub sweep_animation: Option<PathBuf>,
    pub wave_animation: Option<PathBuf>,
}

/// 도플러 내보내기 옵션.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DopplerExport {
    pub plot: bool,
    pub csv: bool,
    pub animate: bool,
    pub fps: u32,
    pub size: ChartSize,
}

/// 스윕 결과(와 선택적으로 애니메이션)를 디렉터리에 저장한다.
pub fn export_doppler(
    dir: &Path,
    sweep: &DopplerSweep,
    animation: Option<&DopplerAnimation>,
    base_frequency: f64,
    wave_speed: f64,
    options: DopplerExport,
) -> Result<DopplerOutputs, RenderError> {
    let dir = ensure_dir(dir)?;
    let names = DopplerFileNames::new(base_frequency, wave_speed);
    let mut outputs = DopplerOutputs::default();

    if options.plot {
        let path = dir.join(&names.plot);
        save_png(&doppler_sweep_chart(sweep, base_frequency, options.size)?, &path)?;
        outputs.plot = Some(path);
    }
    if options.csv {
        let path = dir.join(&names.data);
        let rows = sweep.points().map(|(v, f)| SweepRow {
            source_speed_m_s: v,
            observed_frequency_hz: f,
        });
        write_csv(&path, rows)?;
        outputs.data = Some(path);
    }
    if options.animate {
        let path = dir.join(&names.sweep_animation);
        let frames = sweep_reveal_frames(sweep, base_frequency, options.size)?;
        save_gif(frames, options.fps, &path)?;
        outputs.sweep_animation = Some(path);

        if let Some(animation) = animation {
            let path = dir.join(&names.wave_animation);
            let frames = (0..animation.frame_count())
                .map(|i| wave_frame_image(animation, i, options.size));
            save_gif(frames, animation.settings().fps, &path)?;
            outputs.wave_animation = Some(path);
        }
    }
    Ok(outputs)
}

/// 반응 내보내기 옵션.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReactionExport {
    pub plot: bool,
    pub csv: bool,
    pub size: ChartSize,
}

/// 반응 에너지 막대 그래프와 CSV 중 요청된 것을 저장한다.
pub fn export_reaction(
    dir: &Path,
    key: &str,
    energy: &ReactionEnergy,
    options: ReactionExport,
) -> Result<Vec<PathBuf>, RenderError> {
    let mut written = Vec::new();
    if !options.plot && !options.csv {
        return Ok(written);
    }
    let dir = ensure_dir(dir)?;
    let stem = reaction_file_stem(key);

    if options.plot {
        let png = dir.join(format!("{stem}.png"));
        save_png(&reaction_energy_chart(energy, options.size)?, &png)?;
        written.push(png);
    }
    if options.csv {
        let path = dir.join(format!("{stem}.csv"));
        write_csv(&path, [ReactionRow::from(energy)])?;
        written.push(path);
    }
    Ok(written)
}
