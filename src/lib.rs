//! 도플러 효과와 반응 엔탈피 계산 로직을 라이브러리로 분리하여 CLI와 테스트에서 함께 쓴다.

pub mod app;
pub mod cli;
pub mod config;
pub mod doppler;
pub mod i18n;
pub mod render;
pub mod thermo;
pub mod ui_cli;
