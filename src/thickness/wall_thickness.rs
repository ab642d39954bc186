//! 내압을 견디는 최소 배관 두께 계산 (Barlow 식, ASME B31.3 식).
//!
//! 두 식 모두 단위에 무관하다. P, D, S 를 같은 단위계(psi/in 또는 Pa/m)로
//! 넣으면 두께는 D 와 같은 길이 단위로 나온다.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// 용접 효율 기본값 (이음매 없는 관)
pub const DEFAULT_WELD_EFFICIENCY: f64 = 1.0;
/// ASME B31.3 Y 계수 기본값 (탄소강, 482°C 이하)
pub const DEFAULT_Y_COEFFICIENT: f64 = 0.4;

/// 두께 계산 오류를 표현한다.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ThicknessError {
    /// 입력값이 허용 범위를 벗어난 경우
    #[error("입력 오류: {field} = {value} ({constraint})")]
    InvalidInput {
        field: &'static str,
        value: f64,
        constraint: &'static str,
    },

    /// 분모가 0이 되는 경우
    #[error("계산 불가({formula}): 분모가 0입니다")]
    DegenerateFormula { formula: &'static str },
}

fn require_finite(field: &'static str, value: f64) -> Result<(), ThicknessError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ThicknessError::InvalidInput {
            field,
            value,
            constraint: "must be finite",
        })
    }
}

fn require_positive(field: &'static str, value: f64) -> Result<(), ThicknessError> {
    require_finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ThicknessError::InvalidInput {
            field,
            value,
            constraint: "must be greater than 0",
        })
    }
}

/// Barlow 식: t = P·D / (2·S·E)
pub fn barlow(
    pressure: f64,
    outside_diameter: f64,
    allowable_stress: f64,
    weld_efficiency: f64,
) -> Result<f64, ThicknessError> {
    require_finite("pressure", pressure)?;
    require_positive("outside_diameter", outside_diameter)?;
    require_positive("allowable_stress", allowable_stress)?;
    require_positive("weld_efficiency", weld_efficiency)?;
    Ok(pressure * outside_diameter / (2.0 * allowable_stress * weld_efficiency))
}

/// ASME B31.3 식: t = P·D / (2·(S·E + P·Y))
pub fn asme_b31_3(
    pressure: f64,
    outside_diameter: f64,
    allowable_stress: f64,
    y_coefficient: f64,
    weld_efficiency: f64,
) -> Result<f64, ThicknessError> {
    require_finite("pressure", pressure)?;
    require_positive("outside_diameter", outside_diameter)?;
    require_positive("allowable_stress", allowable_stress)?;
    require_positive("weld_efficiency", weld_efficiency)?;
    require_finite("y_coefficient", y_coefficient)?;
    if y_coefficient < 0.0 {
        return Err(ThicknessError::InvalidInput {
            field: "y_coefficient",
            value: y_coefficient,
            constraint: "must not be negative",
        });
    }

    let denom = 2.0 * (allowable_stress * weld_efficiency + pressure * y_coefficient);
    if denom == 0.0 {
        return Err(ThicknessError::DegenerateFormula {
            formula: "asme_b31_3",
        });
    }
    Ok(pressure * outside_diameter / denom)
}

/// 두께 계산 입력값.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThicknessInput {
    /// 설계 내압 P
    pub pressure: f64,
    /// 외경 D
    pub outside_diameter: f64,
    /// 허용 응력 S
    pub allowable_stress: f64,
    /// 용접 효율 E (보통 0.85~1.0)
    pub weld_efficiency: f64,
    /// ASME B31.3 Y 계수
    pub y_coefficient: f64,
}

impl ThicknessInput {
    /// E=1.0, Y=0.4 기본값으로 입력을 만든다.
    pub fn new(pressure: f64, outside_diameter: f64, allowable_stress: f64) -> Self {
        Self {
            pressure,
            outside_diameter,
            allowable_stress,
            weld_efficiency: DEFAULT_WELD_EFFICIENCY,
            y_coefficient: DEFAULT_Y_COEFFICIENT,
        }
    }

    pub fn with_weld_efficiency(mut self, weld_efficiency: f64) -> Self {
        self.weld_efficiency = weld_efficiency;
        self
    }

    pub fn with_y_coefficient(mut self, y_coefficient: f64) -> Self {
        self.y_coefficient = y_coefficient;
        self
    }
}

/// 두 식의 결과. 서로 독립적인 추정치이다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThicknessResult {
    pub barlow_thickness: f64,
    pub asme_b31_3_thickness: f64,
    /// ASME 식 적용 조건(t < D/6) 만족 여부. false 면 후육관 해석이 필요하다.
    pub asme_thin_wall_valid: bool,
}

/// Barlow 와 ASME B31.3 두께를 함께 계산한다.
pub fn pipe_thickness(input: &ThicknessInput) -> Result<ThicknessResult, ThicknessError> {
    let barlow_thickness = barlow(
        input.pressure,
        input.outside_diameter,
        input.allowable_stress,
        input.weld_efficiency,
    )?;
    let asme_b31_3_thickness = asme_b31_3(
        input.pressure,
        input.outside_diameter,
        input.allowable_stress,
        input.y_coefficient,
        input.weld_efficiency,
    )?;
    debug!(barlow_thickness, asme_b31_3_thickness, "wall thickness computed");

    Ok(ThicknessResult {
        barlow_thickness,
        asme_b31_3_thickness,
        asme_thin_wall_valid: asme_b31_3_thickness < input.outside_diameter / 6.0,
    })
}

/// 부식 여유와 제작 공차.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ThicknessAllowances {
    /// 부식/침식 여유 c (D 와 같은 길이 단위)
    pub corrosion_allowance: f64,
    /// 제작 두께 하한 공차 비율 (예: 0.125 = 12.5%)
    pub mill_tolerance_fraction: f64,
}

/// 여유를 반영한 요구 두께.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RequiredThickness {
    /// t_m = t + c
    pub minimum_required: f64,
    /// 공차를 보정한 공칭 두께 t_m / (1 - 공차)
    pub nominal_with_mill_tolerance: f64,
}

/// 압력 두께에 부식 여유와 제작 공차를 더한다.
pub fn minimum_required_thickness(
    pressure_thickness: f64,
    allowances: &ThicknessAllowances,
) -> Result<RequiredThickness, ThicknessError> {
    require_finite("pressure_thickness", pressure_thickness)?;
    let c = allowances.corrosion_allowance;
    require_finite("corrosion_allowance", c)?;
    if c < 0.0 {
        return Err(ThicknessError::InvalidInput {
            field: "corrosion_allowance",
            value: c,
            constraint: "must not be negative",
        });
    }
    let tol = allowances.mill_tolerance_fraction;
    if !(0.0..1.0).contains(&tol) {
        return Err(ThicknessError::InvalidInput {
            field: "mill_tolerance_fraction",
            value: tol,
            constraint: "must be in [0, 1)",
        });
    }

    let minimum_required = pressure_thickness + c;
    Ok(RequiredThickness {
        minimum_required,
        nominal_with_mill_tolerance: minimum_required / (1.0 - tol),
    })
}

/// 위치 인자 형태의 두께 계산 진입점.
pub fn pipe_thickness_from(
    pressure: f64,
    outside_diameter: f64,
    allowable_stress: f64,
    y_coefficient: f64,
    weld_efficiency: f64,
) -> Result<ThicknessResult, ThicknessError> {
    pipe_thickness(
        &ThicknessInput::new(pressure, outside_diameter, allowable_stress)
            .with_y_coefficient(y_coefficient)
            .with_weld_efficiency(weld_efficiency),
    )
}
