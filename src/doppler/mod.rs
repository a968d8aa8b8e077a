//! 도플러 효과 계산 모듈 모음.

pub mod animation;
pub mod model;

pub use animation::*;
pub use model::*;
