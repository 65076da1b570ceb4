//! 습공기 상태 계산 로직을 라이브러리로 분리하여 CLI와 GUI가 같은 계산 패스를 공유한다.

pub mod app;
pub mod chart;
pub mod config;
pub mod i18n;
pub mod input;
pub mod logging;
pub mod psychro;
pub mod report;
pub mod resolver;
pub mod ui_cli;
