use super::{FormationEnthalpyTable, Reaction, Species, ThermoError};

/// 이상기체 상수 [kJ/(mol·K)]
pub const GAS_CONSTANT_KJ: f64 = 8.314 / 1000.0;

/// ΔU 계산 기본 온도 [K]
pub const STANDARD_TEMPERATURE_K: f64 = 298.0;

/// ΔH 부호에 따른 반응 분류.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeatFlow {
    Exothermic,
    Endothermic,
}

impl std::fmt::Display for HeatFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HeatFlow::Exothermic => write!(f, "exothermic"),
            HeatFlow::Endothermic => write!(f, "endothermic"),
        }
    }
}

/// 한 반응의 에너지 수지 요약.
#[derive(Debug, Clone, PartialEq)]
pub struct ReactionEnergy {
    /// Σ(계수 × ΔHf) 반응물 [kJ]
    pub reactant_enthalpy_kj: f64,
    /// Σ(계수 × ΔHf) 생성물 [kJ]
    pub product_enthalpy_kj: f64,
    pub delta_h_kj: f64,
    pub delta_u_kj: f64,
    pub temperature_k: f64,
    pub heat_flow: HeatFlow,
}

fn weighted_sum(species: &[Species], table: &FormationEnthalpyTable) -> Result<f64, ThermoError> {
    species.iter().try_fold(0.0, |acc, s| -> Result<f64, ThermoError> {
        Ok(acc + s.coefficient * table.value_of(&s.compound)?)
    })
}

/// ΔH = Σ생성물 − Σ반응물 [kJ].
///
/// 반응물/생성물 중 하나라도 표에 없으면 `UnknownCompound`를 돌려주며 부분 결과는 없다.
pub fn enthalpy_change(reaction: &Reaction, table: &FormationEnthalpyTable) -> Result<f64, ThermoError> {
    let products = weighted_sum(&reaction.products, table)?;
    let reactants = weighted_sum(&reaction.reactants, table)?;
    Ok(products - reactants)
}

/// ΔU = ΔH − Δn_gas·R·T [kJ].
pub fn internal_energy_change(enthalpy_change: f64, gas_mole_delta: i32, temperature_k: f64) -> f64 {
    enthalpy_change - gas_mole_delta as f64 * GAS_CONSTANT_KJ * temperature_k
}

/// ΔH < 0 이면 발열, 그 외(0 포함)는 흡열.
pub fn classify(enthalpy_change: f64) -> HeatFlow {
    if enthalpy_change < 0.0 {
        HeatFlow::Exothermic
    } else {
        HeatFlow::Endothermic
    }
}

/// ΔH, ΔU와 분류를 한 번에 계산한다.
pub fn analyze(
    reaction: &Reaction,
    table: &FormationEnthalpyTable,
    temperature_k: f64,
) -> Result<ReactionEnergy, ThermoError> {
    if !temperature_k.is_finite() || temperature_k <= 0.0 {
        return Err(ThermoError::InvalidInput(
            "temperature must be a positive number of kelvin",
        ));
    }
    let product_enthalpy_kj = weighted_sum(&reaction.products, table)?;
    let reactant_enthalpy_kj = weighted_sum(&reaction.reactants, table)?;
    let delta_h_kj = product_enthalpy_kj - reactant_enthalpy_kj;
    let delta_u_kj = internal_energy_change(delta_h_kj, reaction.gas_mole_delta, temperature_k);

    Ok(ReactionEnergy {
        reactant_enthalpy_kj,
        product_enthalpy_kj,
        delta_h_kj,
        delta_u_kj,
        temperature_k,
        heat_flow: classify(delta_h_kj),
    })
}
