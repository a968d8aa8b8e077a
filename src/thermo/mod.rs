//! 반응 열역학(생성 엔탈피 기반 ΔH/ΔU) 계산 모듈 모음.

pub mod energy;
pub mod enthalpy_table;
pub mod reaction;

pub use energy::*;
pub use enthalpy_table::*;
pub use reaction::*;

/// 반응 열역학 계산 오류.
#[derive(Debug, Clone, PartialEq)]
pub enum ThermoError {
    /// 생성 엔탈피 표에 없는 화합물
    UnknownCompound(String),
    /// 알 수 없는 프리셋 키
    UnknownPreset(String),
    /// 입력값 오류
    InvalidInput(&'static str),
}

impl std::fmt::Display for ThermoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThermoError::UnknownCompound(name) => {
                write!(f, "compound not found in the enthalpy table: '{name}'")
            }
            ThermoError::UnknownPreset(key) => write!(f, "unknown reaction preset: '{key}'"),
            ThermoError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
        }
    }
}

impl std::error::Error for ThermoError {}
