//! 시간 매개변수 도플러 모델.
//!
//! 음원이 고정된 공간 창을 주기적으로 가로지르며, 창 안의 위치가 설정된 음원 속도
//! 구간으로 선형 사상된다. 각 프레임은 프레임 번호만으로 결정되는 순수 함수이다.

use super::model::{
    checked_observed_frequency, linspace, DopplerError, SweepRange, WaveParameters,
};
use std::f64::consts::PI;

/// 애니메이션 프레임 구성값.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSettings {
    /// 한 주기의 프레임 수
    pub frames: usize,
    /// 초당 프레임 수
    pub fps: u32,
    /// 공간 창 시작 위치
    pub window_start: f64,
    /// 공간 창 끝 위치
    pub window_end: f64,
    /// 파형 표본 수
    pub wave_samples: usize,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            frames: 200,
            fps: 10,
            window_start: 0.0,
            window_end: 10.0,
            wave_samples: 400,
        }
    }
}

/// 한 프레임의 계산 결과.
#[derive(Debug, Clone, PartialEq)]
pub struct DopplerFrame {
    pub index: usize,
    pub time_s: f64,
    pub source_position: f64,
    pub source_speed: f64,
    pub observed_frequency: f64,
    /// (x, 진폭) 표본
    pub waveform: Vec<(f64, f64)>,
}

#[derive(Debug, Clone)]
pub struct DopplerAnimation {
    wave: WaveParameters,
    range: SweepRange,
    settings: AnimationSettings,
    grid: Vec<f64>,
}

impl DopplerAnimation {
    pub fn new(
        wave: WaveParameters,
        range: SweepRange,
        settings: AnimationSettings,
    ) -> Result<Self, DopplerError> {
        wave.validate()?;
        if settings.frames == 0 || settings.fps == 0 {
            return Err(DopplerError::InvalidInput("frames and fps must be at least 1"));
        }
        if !(settings.window_end > settings.window_start) {
            return Err(DopplerError::InvalidInput(
                "animation window end must exceed its start",
            ));
        }
        if settings.wave_samples < 2 {
            return Err(DopplerError::InvalidInput("waveform needs at least 2 samples"));
        }
        if !range.source_speed_min.is_finite() || !range.source_speed_max.is_finite() {
            return Err(DopplerError::InvalidInput("source speed range must be finite"));
        }
        let grid = linspace(
            settings.window_start,
            settings.window_end,
            settings.wave_samples,
        );
        let animation = Self {
            wave,
            range,
            settings,
            grid,
        };
        // 주기 안의 모든 프레임 속도가 특이점을 피해야 한다.
        for index in 0..animation.settings.frames {
            let speed = animation.speed_at_position(animation.source_position(index));
            checked_observed_frequency(
                wave.wave_speed,
                wave.observer_speed,
                speed,
                wave.base_frequency,
            )?;
        }
        Ok(animation)
    }

    pub fn settings(&self) -> &AnimationSettings {
        &self.settings
    }

    pub fn frame_count(&self) -> usize {
        self.settings.frames
    }

    /// 프레임 번호 → 음원 위치. 창을 한 주기마다 한 번 가로지른다.
    pub fn source_position(&self, index: usize) -> f64 {
        let width = self.settings.window_end - self.settings.window_start;
        let fraction = (index % self.settings.frames) as f64 / self.settings.frames as f64;
        self.settings.window_start + fraction * width
    }

    /// 창 내 위치를 음원 속도 구간으로 선형 사상한다.
    pub fn speed_at_position(&self, position: f64) -> f64 {
        let width = self.settings.window_end - self.settings.window_start;
        let fraction = (position - self.settings.window_start) / width;
        self.range.source_speed_min
            + fraction * (self.range.source_speed_max - self.range.source_speed_min)
    }

    /// 프레임 하나를 계산한다. 특이 프레임은 생성 시점에 이미 걸러졌다.
    pub fn frame(&self, index: usize) -> DopplerFrame {
        let time_s = index as f64 / self.settings.fps as f64;
        let source_position = self.source_position(index);
        let source_speed = self.speed_at_position(source_position);
        let observed_frequency = self.wave.observed_frequency(source_speed);
        let phase = self.wave.base_frequency * time_s;
        let waveform = self
            .grid
            .iter()
            .map(|&x| (x, (2.0 * PI * (phase - (x - source_position))).sin()))
            .collect();

        DopplerFrame {
            index,
            time_s,
            source_position,
            source_speed,
            observed_frequency,
            waveform,
        }
    }

    pub fn frames(&self) -> impl Iterator<Item = DopplerFrame> + '_ {
        (0..self.settings.frames).map(move |i| self.frame(i))
    }
}
