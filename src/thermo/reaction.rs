use serde::{Deserialize, Serialize};

use super::ThermoError;

/// 반응식의 한 항(화합물, 양론 계수).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Species {
    pub compound: String,
    pub coefficient: f64,
}

impl Species {
    pub fn new(compound: impl Into<String>, coefficient: f64) -> Self {
        Self {
            compound: compound.into(),
            coefficient,
        }
    }
}

/// 반응물/생성물 목록과 기체 몰수 변화(Δn_gas = 생성물 − 반응물).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reaction {
    pub reactants: Vec<Species>,
    pub products: Vec<Species>,
    pub gas_mole_delta: i32,
}

impl Reaction {
    pub fn new(reactants: Vec<Species>, products: Vec<Species>, gas_mole_delta: i32) -> Self {
        Self {
            reactants,
            products,
            gas_mole_delta,
        }
    }

    /// 반응물과 생성물에 쓰인 모든 화합물 이름.
    pub fn compounds(&self) -> impl Iterator<Item = &str> + '_ {
        self.reactants
            .iter()
            .chain(self.products.iter())
            .map(|s| s.compound.as_str())
    }
}

impl std::fmt::Display for Reaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn side(species: &[Species]) -> String {
            species
                .iter()
                .map(|s| {
                    if (s.coefficient - 1.0).abs() < f64::EPSILON {
                        s.compound.clone()
                    } else {
                        format!("{} {}", s.coefficient, s.compound)
                    }
                })
                .collect::<Vec<_>>()
                .join(" + ")
        }
        write!(f, "{} -> {}", side(&self.reactants), side(&self.products))
    }
}

/// 내장 반응 프리셋.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReactionPreset {
    MethaneCombustion,
    HydrogenCombustion,
    AmmoniaSynthesis,
    WaterElectrolysis,
    EthanolCombustion,
    CalciumCarbonateDecomposition,
    Neutralization,
}

impl ReactionPreset {
    pub const ALL: [ReactionPreset; 7] = [
        ReactionPreset::MethaneCombustion,
        ReactionPreset::HydrogenCombustion,
        ReactionPreset::AmmoniaSynthesis,
        ReactionPreset::WaterElectrolysis,
        ReactionPreset::EthanolCombustion,
        ReactionPreset::CalciumCarbonateDecomposition,
        ReactionPreset::Neutralization,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            ReactionPreset::MethaneCombustion => "methane_combustion",
            ReactionPreset::HydrogenCombustion => "hydrogen_combustion",
            ReactionPreset::AmmoniaSynthesis => "ammonia_synthesis",
            ReactionPreset::WaterElectrolysis => "water_electrolysis",
            ReactionPreset::EthanolCombustion => "ethanol_combustion",
            ReactionPreset::CalciumCarbonateDecomposition => "calcium_carbonate_decomposition",
            ReactionPreset::Neutralization => "neutralization",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ReactionPreset::MethaneCombustion => "Methane combustion",
            ReactionPreset::HydrogenCombustion => "Hydrogen combustion",
            ReactionPreset::AmmoniaSynthesis => "Ammonia synthesis",
            ReactionPreset::WaterElectrolysis => "Water electrolysis",
            ReactionPreset::EthanolCombustion => "Ethanol combustion",
            ReactionPreset::CalciumCarbonateDecomposition => "Calcium carbonate decomposition",
            ReactionPreset::Neutralization => "Acid-base neutralization",
        }
    }

    /// 키(대소문자, '-' 무시)로 프리셋을 찾는다.
    pub fn from_key(key: &str) -> Result<Self, ThermoError> {
        let normalized = key.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.key() == normalized)
            .ok_or_else(|| ThermoError::UnknownPreset(key.to_string()))
    }

    pub fn reaction(&self) -> Reaction {
        let s = Species::new;
        match self {
            ReactionPreset::MethaneCombustion => Reaction::new(
                vec![s("CH4 (g)", 1.0), s("O2 (g)", 2.0)],
                vec![s("CO2 (g)", 1.0), s("H2O (l)", 2.0)],
                -2,
            ),
            ReactionPreset::HydrogenCombustion => Reaction::new(
                vec![s("H2 (g)", 2.0), s("O2 (g)", 1.0)],
                vec![s("H2O (l)", 2.0)],
                -3,
            ),
            ReactionPreset::AmmoniaSynthesis => Reaction::new(
                vec![s("N2 (g)", 1.0), s("H2 (g)", 3.0)],
                vec![s("NH3 (g)", 2.0)],
                -2,
            ),
            ReactionPreset::WaterElectrolysis => Reaction::new(
                vec![s("H2O (l)", 2.0)],
                vec![s("H2 (g)", 2.0), s("O2 (g)", 1.0)],
                3,
            ),
            ReactionPreset::EthanolCombustion => Reaction::new(
                vec![s("C2H5OH (l)", 1.0), s("O2 (g)", 3.0)],
                vec![s("CO2 (g)", 2.0), s("H2O (l)", 3.0)],
                -1,
            ),
            ReactionPreset::CalciumCarbonateDecomposition => Reaction::new(
                vec![s("CaCO3 (s)", 1.0)],
                vec![s("CaO (s)", 1.0), s("CO2 (g)", 1.0)],
                1,
            ),
            ReactionPreset::Neutralization => Reaction::new(
                vec![s("HCl (aq)", 1.0), s("NaOH (aq)", 1.0)],
                vec![s("NaCl (aq)", 1.0), s("H2O (l)", 1.0)],
                0,
            ),
        }
    }
}

/// 사용자 정의 반응 입력 단계.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderStage {
    Reactants,
    Products,
    GasDelta,
}

/// 사용자 정의 반응을 단계별로 누적한다.
///
/// 반응물 → (종료어) → 생성물 → (종료어) → Δn_gas 순서. 화합물 존재 여부는
/// 여기서 검사하지 않고 엔탈피 계산 시점에 확인한다.
#[derive(Debug, Clone)]
pub struct ReactionBuilder {
    stage: BuilderStage,
    reactants: Vec<Species>,
    products: Vec<Species>,
}

impl Default for ReactionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReactionBuilder {
    pub fn new() -> Self {
        Self {
            stage: BuilderStage::Reactants,
            reactants: Vec::new(),
            products: Vec::new(),
        }
    }

    pub fn stage(&self) -> BuilderStage {
        self.stage
    }

    /// 목록 종료어인지 확인한다. ("fin", "end", 빈 줄)
    pub fn is_terminator(input: &str) -> bool {
        let t = input.trim();
        t.is_empty() || t.eq_ignore_ascii_case("fin") || t.eq_ignore_ascii_case("end")
    }

    /// 현재 단계(반응물/생성물)에 항을 추가한다.
    pub fn push(&mut self, compound: &str, coefficient: f64) -> Result<(), ThermoError> {
        let compound = compound.trim();
        if compound.is_empty() {
            return Err(ThermoError::InvalidInput("compound name must not be empty"));
        }
        if !coefficient.is_finite() || coefficient <= 0.0 {
            return Err(ThermoError::InvalidInput(
                "stoichiometric coefficient must be positive",
            ));
        }
        let species = Species::new(compound, coefficient);
        match self.stage {
            BuilderStage::Reactants => self.reactants.push(species),
            BuilderStage::Products => self.products.push(species),
            BuilderStage::GasDelta => {
                return Err(ThermoError::InvalidInput(
                    "species lists are already closed",
                ))
            }
        }
        Ok(())
    }

    /// 현재 목록을 닫고 다음 단계로 넘어간다.
    pub fn close_list(&mut self) {
        self.stage = match self.stage {
            BuilderStage::Reactants => BuilderStage::Products,
            BuilderStage::Products | BuilderStage::GasDelta => BuilderStage::GasDelta,
        };
    }

    pub fn finish(self, gas_mole_delta: i32) -> Result<Reaction, ThermoError> {
        if self.reactants.is_empty() && self.products.is_empty() {
            return Err(ThermoError::InvalidInput(
                "reaction needs at least one reactant or product",
            ));
        }
        Ok(Reaction::new(self.reactants, self.products, gas_mole_delta))
    }
}
