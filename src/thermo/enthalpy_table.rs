//! 표준 생성 엔탈피 표(298.15 K, 1 bar). 값은 교육용 참고치이다.
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::ThermoError;

/// 표의 한 항목.
#[derive(Debug, Clone, PartialEq)]
pub struct FormationEnthalpy {
    pub value_kj_per_mol: f64,
    pub reference: Option<String>,
}

/// 설정 파일에서 읽는 추가/대체 항목.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundEntry {
    pub name: String,
    pub value_kj_per_mol: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

#[derive(Debug, Clone, Copy)]
struct BuiltInCompound {
    name: &'static str,
    value_kj_per_mol: f64,
    reference: &'static str,
}

impl BuiltInCompound {
    const fn new(name: &'static str, value_kj_per_mol: f64, reference: &'static str) -> Self {
        Self {
            name,
            value_kj_per_mol,
            reference,
        }
    }
}

const NIST: &str = "NIST Chemistry WebBook, SRD 69";
const CRC: &str = "CRC Handbook of Chemistry and Physics, 5-4";
const ELEMENT: &str = "element in its reference state";

const BUILT_IN: [BuiltInCompound; 14] = [
    BuiltInCompound::new("H2O (l)", -285.83, NIST),
    BuiltInCompound::new("CO2 (g)", -393.52, NIST),
    BuiltInCompound::new("CH4 (g)", -74.87, NIST),
    BuiltInCompound::new("O2 (g)", 0.00, ELEMENT),
    BuiltInCompound::new("H2 (g)", 0.00, ELEMENT),
    BuiltInCompound::new("N2 (g)", 0.00, ELEMENT),
    BuiltInCompound::new("NH3 (g)", -45.94, NIST),
    BuiltInCompound::new("H2O (g)", -241.82, NIST),
    BuiltInCompound::new("C2H5OH (l)", -277.69, CRC),
    BuiltInCompound::new("CaCO3 (s)", -1206.92, CRC),
    BuiltInCompound::new("CaO (s)", -635.09, CRC),
    BuiltInCompound::new("HCl (aq)", -167.16, CRC),
    BuiltInCompound::new("NaOH (aq)", -470.11, CRC),
    BuiltInCompound::new("NaCl (aq)", -407.27, CRC),
];

/// 화합물 이름 → 생성 엔탈피 [kJ/mol].
///
/// 생성 후 변경되지 않는다. 목록 출력 시 삽입 순서를 유지한다.
#[derive(Debug, Clone)]
pub struct FormationEnthalpyTable {
    order: Vec<String>,
    entries: HashMap<String, FormationEnthalpy>,
}

impl FormationEnthalpyTable {
    /// 내장 항목만으로 표를 만든다.
    pub fn built_in() -> Self {
        let mut table = Self {
            order: Vec::with_capacity(BUILT_IN.len()),
            entries: HashMap::with_capacity(BUILT_IN.len()),
        };
        for c in BUILT_IN.iter() {
            table.insert(
                c.name.to_string(),
                FormationEnthalpy {
                    value_kj_per_mol: c.value_kj_per_mol,
                    reference: Some(c.reference.to_string()),
                },
            );
        }
        table
    }

    /// 내장 항목에 설정 항목을 덧붙인다. 같은 이름은 설정 값으로 대체한다.
    pub fn with_extra(extra: &[CompoundEntry]) -> Result<Self, ThermoError> {
        let mut table = Self::built_in();
        for entry in extra {
            let name = entry.name.trim();
            if name.is_empty() {
                return Err(ThermoError::InvalidInput("compound name must not be empty"));
            }
            if !entry.value_kj_per_mol.is_finite() {
                return Err(ThermoError::InvalidInput(
                    "formation enthalpy must be a finite number",
                ));
            }
            table.insert(
                name.to_string(),
                FormationEnthalpy {
                    value_kj_per_mol: entry.value_kj_per_mol,
                    reference: entry.reference.clone(),
                },
            );
        }
        Ok(table)
    }

    fn insert(&mut self, name: String, value: FormationEnthalpy) {
        if self.entries.insert(name.clone(), value).is_none() {
            self.order.push(name);
        }
    }

    pub fn get(&self, compound: &str) -> Option<&FormationEnthalpy> {
        self.entries.get(compound)
    }

    /// 화합물의 생성 엔탈피. 표에 없으면 `UnknownCompound`.
    pub fn value_of(&self, compound: &str) -> Result<f64, ThermoError> {
        self.get(compound)
            .map(|e| e.value_kj_per_mol)
            .ok_or_else(|| ThermoError::UnknownCompound(compound.to_string()))
    }

    pub fn contains(&self, compound: &str) -> bool {
        self.entries.contains_key(compound)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// 삽입 순서대로 (이름, 항목)을 돌려준다.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &FormationEnthalpy)> + '_ {
        self.order
            .iter()
            .filter_map(move |name| self.entries.get(name).map(|e| (name.as_str(), e)))
    }
}

impl Default for FormationEnthalpyTable {
    fn default() -> Self {
        Self::built_in()
    }
}
