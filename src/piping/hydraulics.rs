use serde::{Deserialize, Serialize};

use super::diameter_sizing::SizingError;

/// 층류/난류 경계 레이놀즈수. 이 값 미만이면 층류로 본다.
pub const LAMINAR_REYNOLDS_LIMIT: f64 = 2000.0;

/// 유동 영역.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowRegime {
    Laminar,
    Turbulent,
}

impl FlowRegime {
    /// 레이놀즈수로 유동 영역을 판정한다. Re=2000 은 난류로 분류한다.
    pub fn from_reynolds(reynolds: f64) -> Self {
        if reynolds < LAMINAR_REYNOLDS_LIMIT {
            FlowRegime::Laminar
        } else {
            FlowRegime::Turbulent
        }
    }
}

/// 원형 배관 단면적 [m2].
pub fn cross_section_area(diameter_m: f64) -> f64 {
    std::f64::consts::PI * (diameter_m / 2.0).powi(2)
}

/// 연속 방정식으로 유속을 계산한다. v = ṁ / (ρ·A)
pub fn velocity_from_mass_flow(
    mass_flow_kg_per_s: f64,
    density_kg_per_m3: f64,
    area_m2: f64,
) -> Result<f64, SizingError> {
    let denom = density_kg_per_m3 * area_m2;
    if denom <= 0.0 || !denom.is_finite() {
        return Err(SizingError::DegenerateFormula {
            formula: "continuity",
            reason: "density × area must be positive",
        });
    }
    Ok(mass_flow_kg_per_s / denom)
}

/// 레이놀즈수 Re = ρ·v·D / μ
pub fn reynolds_number(
    density_kg_per_m3: f64,
    velocity_m_per_s: f64,
    diameter_m: f64,
    viscosity_pa_s: f64,
) -> Result<f64, SizingError> {
    if viscosity_pa_s == 0.0 {
        return Err(SizingError::DegenerateFormula {
            formula: "reynolds",
            reason: "viscosity is zero",
        });
    }
    let re = density_kg_per_m3 * velocity_m_per_s * diameter_m / viscosity_pa_s;
    if !re.is_finite() {
        return Err(SizingError::DegenerateFormula {
            formula: "reynolds",
            reason: "result is not finite",
        });
    }
    Ok(re)
}

/// Darcy 마찰계수.
///
/// - 층류(Re < 2000): f = 64 / Re
/// - 난류(Re ≥ 2000): Blasius 근사 f = 0.3164 / Re^0.25
pub fn friction_factor(reynolds: f64) -> Result<f64, SizingError> {
    if reynolds <= 0.0 || !reynolds.is_finite() {
        return Err(SizingError::DegenerateFormula {
            formula: "friction_factor",
            reason: "reynolds number must be positive and finite",
        });
    }
    let f = match FlowRegime::from_reynolds(reynolds) {
        FlowRegime::Laminar => 64.0 / reynolds,
        FlowRegime::Turbulent => 0.3164 / reynolds.powf(0.25),
    };
    Ok(f)
}

/// Darcy-Weisbach 압력강하 [Pa].
///
/// ΔP = f · (L/D) · ρ·v² / 2
pub fn pressure_drop(
    friction_factor: f64,
    length_m: f64,
    diameter_m: f64,
    density_kg_per_m3: f64,
    velocity_m_per_s: f64,
) -> Result<f64, SizingError> {
    if diameter_m <= 0.0 || diameter_m.is_nan() {
        return Err(SizingError::DegenerateFormula {
            formula: "darcy_weisbach",
            reason: "diameter must be positive",
        });
    }
    Ok(friction_factor
        * (length_m / diameter_m)
        * (density_kg_per_m3 * velocity_m_per_s * velocity_m_per_s / 2.0))
}

/// 미터를 인치로 환산한다. (× 100 / 2.54)
pub fn meters_to_inches(value_m: f64) -> f64 {
    value_m * 100.0 / 2.54
}
