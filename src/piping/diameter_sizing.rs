use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace, warn};

use super::hydraulics::{
    cross_section_area, friction_factor, meters_to_inches, pressure_drop, reynolds_number,
    velocity_from_mass_flow, FlowRegime,
};

/// 배관 사이징 계산 오류를 표현한다.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SizingError {
    /// 양수여야 하는 입력값이 0 이하이거나 유한하지 않은 경우
    #[error("입력 오류: {field} 값은 0보다 큰 유한한 수여야 합니다 (입력값 {value})")]
    InvalidInput { field: &'static str, value: f64 },

    /// 탐색 한계 설정이 잘못된 경우
    #[error("탐색 설정 오류: {reason}")]
    InvalidLimits { reason: &'static str },

    /// 반복 한계 안에서 두 제약을 모두 만족하는 직경을 찾지 못한 경우
    #[error(
        "수렴 실패: {iterations}회 반복 후에도 조건을 만족하지 못했습니다 (마지막 직경 {last_diameter_m:.4} m)"
    )]
    NonConvergence {
        iterations: usize,
        /// 마지막으로 평가한 후보 직경 [m]
        last_diameter_m: f64,
    },

    /// 0으로 나누기 등 식이 정의되지 않는 경우
    #[error("계산 불가({formula}): {reason}")]
    DegenerateFormula {
        formula: &'static str,
        reason: &'static str,
    },
}

/// 직경 탐색 입력값. 모든 값은 SI 단위이며 0보다 커야 한다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizingInput {
    /// 질량 유량 [kg/s]
    pub mass_flow_kg_per_s: f64,
    /// 밀도 [kg/m3]
    pub density_kg_per_m3: f64,
    /// 점도 [Pa·s]
    pub viscosity_pa_s: f64,
    /// 배관 길이 [m]
    pub pipe_length_m: f64,
    /// 허용 압력강하 [Pa]
    pub max_pressure_drop_pa: f64,
    /// 허용 유속 [m/s]
    pub max_velocity_m_per_s: f64,
}

impl SizingInput {
    /// 모든 필드가 유한한 양수인지 검사한다. 위반한 첫 필드를 오류로 돌려준다.
    pub fn validate(&self) -> Result<(), SizingError> {
        let fields = [
            ("mass_flow_rate", self.mass_flow_kg_per_s),
            ("density", self.density_kg_per_m3),
            ("viscosity", self.viscosity_pa_s),
            ("pipe_length", self.pipe_length_m),
            ("max_pressure_drop", self.max_pressure_drop_pa),
            ("max_velocity", self.max_velocity_m_per_s),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(SizingError::InvalidInput { field, value });
            }
        }
        Ok(())
    }
}

/// 직경 탐색 범위와 종료 조건.
///
/// 기본값(초기 0.05 m, 증분 0.01 m)은 기존 계산표와 동일한 결과를 재현한다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchLimits {
    pub initial_diameter_m: f64,
    pub step_m: f64,
    /// 평가할 후보 직경 수의 상한
    pub max_iterations: usize,
    /// 후보 직경 상한 [m]. None 이면 반복 횟수로만 제한한다.
    pub max_diameter_m: Option<f64>,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            initial_diameter_m: 0.05,
            step_m: 0.01,
            max_iterations: 100_000,
            max_diameter_m: None,
        }
    }
}

impl SearchLimits {
    pub fn validate(&self) -> Result<(), SizingError> {
        if !self.initial_diameter_m.is_finite() || self.initial_diameter_m <= 0.0 {
            return Err(SizingError::InvalidLimits {
                reason: "initial_diameter_m must be finite and positive",
            });
        }
        if !self.step_m.is_finite() || self.step_m <= 0.0 {
            return Err(SizingError::InvalidLimits {
                reason: "step_m must be finite and positive",
            });
        }
        if self.max_iterations == 0 {
            return Err(SizingError::InvalidLimits {
                reason: "max_iterations must be at least 1",
            });
        }
        if let Some(max_d) = self.max_diameter_m {
            if !max_d.is_finite() || max_d < self.initial_diameter_m {
                return Err(SizingError::InvalidLimits {
                    reason: "max_diameter_m must be finite and not below initial_diameter_m",
                });
            }
        }
        Ok(())
    }
}

/// 직경 탐색 결과.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizingResult {
    pub diameter_m: f64,
    pub diameter_in: f64,
    pub velocity_m_per_s: f64,
    pub reynolds: f64,
    pub friction_factor: f64,
    pub pressure_drop_pa: f64,
    pub regime: FlowRegime,
    /// 평가한 후보 직경 수
    pub iterations: usize,
}

/// 기본 탐색 설정으로 최소 배관 내경을 찾는다.
pub fn size_pipeline(input: &SizingInput) -> Result<SizingResult, SizingError> {
    size_pipeline_with_limits(input, &SearchLimits::default())
}

/// 유속/압력강하 제약을 모두 만족하는 최소 내경을 선형 증분 탐색으로 찾는다.
///
/// 유속 조건을 통과하지 못한 후보는 레이놀즈수 이하 계산을 생략하고 바로 다음
/// 직경으로 넘어간다.
pub fn size_pipeline_with_limits(
    input: &SizingInput,
    limits: &SearchLimits,
) -> Result<SizingResult, SizingError> {
    input.validate()?;
    limits.validate()?;

    // 누적 덧셈 오차로 격자점이 상한을 몇 ulp 넘는 경우도 상한 안으로 본다.
    let ceiling_tolerance = limits.step_m * 1e-9;
    let mut diameter = limits.initial_diameter_m;
    let mut last_evaluated = diameter;
    let mut iterations = 0usize;
    loop {
        let over_ceiling = limits
            .max_diameter_m
            .is_some_and(|max_d| diameter > max_d + ceiling_tolerance);
        if iterations >= limits.max_iterations || over_ceiling {
            warn!(
                iterations,
                diameter_m = last_evaluated,
                "diameter search stopped without satisfying constraints"
            );
            return Err(SizingError::NonConvergence {
                iterations,
                last_diameter_m: last_evaluated,
            });
        }
        iterations += 1;
        last_evaluated = diameter;

        let area = cross_section_area(diameter);
        let velocity =
            velocity_from_mass_flow(input.mass_flow_kg_per_s, input.density_kg_per_m3, area)?;
        if velocity > input.max_velocity_m_per_s {
            trace!(diameter_m = diameter, velocity, "velocity limit exceeded");
            diameter += limits.step_m;
            continue;
        }

        let reynolds = reynolds_number(
            input.density_kg_per_m3,
            velocity,
            diameter,
            input.viscosity_pa_s,
        )?;
        let f = friction_factor(reynolds)?;
        let dp = pressure_drop(
            f,
            input.pipe_length_m,
            diameter,
            input.density_kg_per_m3,
            velocity,
        )?;
        if dp > input.max_pressure_drop_pa {
            trace!(diameter_m = diameter, pressure_drop_pa = dp, "pressure drop limit exceeded");
            diameter += limits.step_m;
            continue;
        }

        debug!(
            diameter_m = diameter,
            velocity,
            reynolds,
            pressure_drop_pa = dp,
            iterations,
            "pipe diameter found"
        );
        return Ok(SizingResult {
            diameter_m: diameter,
            diameter_in: meters_to_inches(diameter),
            velocity_m_per_s: velocity,
            reynolds,
            friction_factor: f,
            pressure_drop_pa: dp,
            regime: FlowRegime::from_reynolds(reynolds),
            iterations,
        });
    }
}

/// 위치 인자 형태의 사이징 진입점.
pub fn pipeline_sizing(
    mass_flow_rate: f64,
    density: f64,
    viscosity: f64,
    pipe_length: f64,
    max_pressure_drop: f64,
    max_velocity: f64,
) -> Result<SizingResult, SizingError> {
    size_pipeline(&SizingInput {
        mass_flow_kg_per_s: mass_flow_rate,
        density_kg_per_m3: density,
        viscosity_pa_s: viscosity,
        pipe_length_m: pipe_length,
        max_pressure_drop_pa: max_pressure_drop,
        max_velocity_m_per_s: max_velocity,
    })
}
