/// 도플러 계산 오류를 표현한다.
#[derive(Debug, Clone, PartialEq)]
pub enum DopplerError {
    /// 입력값이 잘못된 경우
    InvalidInput(&'static str),
    /// 음원 속도가 파동 속도와 같아 분모가 0이 되는 경우
    Singularity { source_speed: f64 },
}

impl std::fmt::Display for DopplerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DopplerError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            DopplerError::Singularity { source_speed } => write!(
                f,
                "source speed {source_speed} m/s equals the wave speed; observed frequency diverges"
            ),
        }
    }
}

impl std::error::Error for DopplerError {}

/// 매질과 관측자 조건.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveParameters {
    /// 매질 내 파동 속도 [m/s]
    pub wave_speed: f64,
    /// 관측자 속도 [m/s] (음원을 향할 때 양수)
    pub observer_speed: f64,
    /// 음원 고유 주파수 [Hz]
    pub base_frequency: f64,
}

impl WaveParameters {
    pub fn validate(&self) -> Result<(), DopplerError> {
        if !self.wave_speed.is_finite() || self.wave_speed <= 0.0 {
            return Err(DopplerError::InvalidInput("wave speed must be positive"));
        }
        if !self.base_frequency.is_finite() || self.base_frequency <= 0.0 {
            return Err(DopplerError::InvalidInput("base frequency must be positive"));
        }
        if !self.observer_speed.is_finite() {
            return Err(DopplerError::InvalidInput("observer speed must be finite"));
        }
        Ok(())
    }

    pub fn observed_frequency(&self, source_speed: f64) -> f64 {
        observed_frequency(
            self.wave_speed,
            self.observer_speed,
            source_speed,
            self.base_frequency,
        )
    }
}

/// 음원 속도 구간과 표본 수.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepRange {
    pub source_speed_min: f64,
    pub source_speed_max: f64,
    pub steps: usize,
}

/// 음원 속도 스윕 결과. 생성 후에는 읽기 전용이다.
#[derive(Debug, Clone, PartialEq)]
pub struct DopplerSweep {
    source_speeds: Vec<f64>,
    observed_frequencies: Vec<f64>,
}

impl DopplerSweep {
    pub fn source_speeds(&self) -> &[f64] {
        &self.source_speeds
    }

    pub fn observed_frequencies(&self) -> &[f64] {
        &self.observed_frequencies
    }

    pub fn len(&self) -> usize {
        self.source_speeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source_speeds.is_empty()
    }

    /// (음원 속도, 관측 주파수) 쌍을 순서대로 돌려준다.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.source_speeds
            .iter()
            .copied()
            .zip(self.observed_frequencies.iter().copied())
    }

    /// 관측 주파수의 (최소, 최대). 유한값만 고려한다.
    pub fn frequency_bounds(&self) -> Option<(f64, f64)> {
        self.observed_frequencies
            .iter()
            .copied()
            .filter(|f| f.is_finite())
            .fold(None, |acc, f| match acc {
                None => Some((f, f)),
                Some((lo, hi)) => Some((lo.min(f), hi.max(f))),
            })
    }

    /// 음원 속도가 파동 속도를 넘는(초음속) 표본 수.
    pub fn supersonic_count(&self, wave_speed: f64) -> usize {
        self.source_speeds.iter().filter(|&&v| v > wave_speed).count()
    }
}

/// 고전 도플러 식으로 관측 주파수를 계산한다.
///
/// f = f0 * (v + v_o) / (v - v_s)
///
/// 아음속 여부를 검사하지 않는다. `source_speed == wave_speed`이면 무한대(또는 NaN),
/// `source_speed > wave_speed`이면 음수가 그대로 반환된다.
pub fn observed_frequency(
    wave_speed: f64,
    observer_speed: f64,
    source_speed: f64,
    base_frequency: f64,
) -> f64 {
    base_frequency * (wave_speed + observer_speed) / (wave_speed - source_speed)
}

/// 특이점을 오류로 돌려주는 `observed_frequency`.
pub fn checked_observed_frequency(
    wave_speed: f64,
    observer_speed: f64,
    source_speed: f64,
    base_frequency: f64,
) -> Result<f64, DopplerError> {
    if wave_speed - source_speed == 0.0 {
        return Err(DopplerError::Singularity { source_speed });
    }
    Ok(observed_frequency(
        wave_speed,
        observer_speed,
        source_speed,
        base_frequency,
    ))
}

/// 양 끝점을 포함하는 등간격 표본을 만든다. `steps == 1`이면 `[min]`.
pub fn linspace(min: f64, max: f64, steps: usize) -> Vec<f64> {
    match steps {
        0 => Vec::new(),
        1 => vec![min],
        n => {
            let step = (max - min) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { max } else { min + i as f64 * step })
                .collect()
        }
    }
}

/// 음원 속도를 선형 스윕하며 관측 주파수 계열을 계산한다.
///
/// 표본 중 하나가 파동 속도와 정확히 같으면 `Singularity`를 돌려준다.
/// 초음속 표본은 식 그대로(음수) 계산된다.
pub fn sweep(wave: &WaveParameters, range: &SweepRange) -> Result<DopplerSweep, DopplerError> {
    wave.validate()?;
    if range.steps == 0 {
        return Err(DopplerError::InvalidInput("step count must be at least 1"));
    }
    if !range.source_speed_min.is_finite() || !range.source_speed_max.is_finite() {
        return Err(DopplerError::InvalidInput("source speed range must be finite"));
    }

    let source_speeds = linspace(range.source_speed_min, range.source_speed_max, range.steps);
    let observed_frequencies = source_speeds
        .iter()
        .map(|&vs| {
            checked_observed_frequency(
                wave.wave_speed,
                wave.observer_speed,
                vs,
                wave.base_frequency,
            )
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(DopplerSweep {
        source_speeds,
        observed_frequencies,
    })
}
