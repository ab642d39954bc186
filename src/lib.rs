//! 배관 내경 사이징과 두께 계산 로직을 라이브러리로 분리하여 CLI 외의 호출자도 쓸 수 있게 한다.

pub mod app;
pub mod config;
pub mod i18n;
pub mod piping;
pub mod thickness;
pub mod ui_cli;

pub use piping::{pipeline_sizing, SizingError, SizingInput, SizingResult};
pub use thickness::{pipe_thickness, ThicknessError, ThicknessInput, ThicknessResult};
