use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::config::{Config, ConfigError};
use crate::i18n::{self, Translator};
use crate::piping::{SizingError, SizingInput, SizingResult};
use crate::thickness::{
    minimum_required_thickness, pipe_thickness, RequiredThickness, ThicknessAllowances,
    ThicknessError, ThicknessInput, ThicknessResult,
};
use crate::ui_cli::{self, MenuChoice};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 파일/콘솔 입출력 오류
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    /// 내경 사이징 오류
    #[error("배관 사이징 오류: {0}")]
    Sizing(#[from] SizingError),
    /// 두께 계산 오류
    #[error("두께 계산 오류: {0}")]
    Thickness(#[from] ThicknessError),
    /// 결과 직렬화 오류
    #[error("결과 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl AppError {
    /// 계산 입력 문제라서 대화형 루프를 계속 진행해도 되는 오류인지 여부.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, AppError::Sizing(_) | AppError::Thickness(_))
    }
}

/// 사이징 입력과 결과를 함께 담은 보고서.
#[derive(Debug, Clone, Serialize)]
pub struct SizingReport {
    pub input: SizingInput,
    pub result: SizingResult,
}

/// 두께 입력, 두 식의 결과, 여유 반영 두께를 함께 담은 보고서.
#[derive(Debug, Clone, Serialize)]
pub struct ThicknessReport {
    pub input: ThicknessInput,
    pub result: ThicknessResult,
    /// 여유가 모두 0이면 생략한다.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<RequiredThickness>,
}

/// 두께를 계산하고 ASME 두께 기준으로 여유를 반영한다.
pub fn thickness_report(
    input: ThicknessInput,
    allowances: &ThicknessAllowances,
) -> Result<ThicknessReport, ThicknessError> {
    let result = pipe_thickness(&input)?;
    let required = if *allowances == ThicknessAllowances::default() {
        None
    } else {
        Some(minimum_required_thickness(
            result.asme_b31_3_thickness,
            allowances,
        )?)
    };
    Ok(ThicknessReport {
        input,
        result,
        required,
    })
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
pub fn run(config: &mut Config, tr: &mut Translator) -> Result<(), AppError> {
    loop {
        let outcome = match ui_cli::main_menu(tr)? {
            MenuChoice::PipeSizing => ui_cli::handle_pipe_sizing(tr, config),
            MenuChoice::WallThickness => ui_cli::handle_wall_thickness(tr, config),
            MenuChoice::Settings => {
                if ui_cli::handle_settings(tr, config)? {
                    let lang = i18n::resolve_language("auto", Some(config.language.as_str()));
                    *tr = Translator::new_with_pack(&lang, config.language_pack_dir.as_deref());
                }
                config.save().map_err(AppError::from)
            }
            MenuChoice::Exit => {
                config.save()?;
                println!("{}", tr.t(i18n::keys::APP_EXIT));
                break;
            }
        };
        match outcome {
            Ok(()) => {}
            Err(err) if err.is_recoverable() => {
                debug!(error = %err, "calculation rejected");
                println!("{}: {err}", tr.t(i18n::keys::ERROR_PREFIX));
            }
            Err(err) => return Err(err),
        }
    }
    Ok(())
}
