//! 배관 내경 사이징 모듈 모음.

pub mod diameter_sizing;
pub mod hydraulics;

pub use diameter_sizing::*;
pub use hydraulics::FlowRegime;
