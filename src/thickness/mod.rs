//! 배관 두께 계산 모듈.

pub mod wall_thickness;

pub use wall_thickness::*;
