//! stderr 로거. `log` 파사드의 출력 대상으로 바이너리 시작 시 한 번 설치한다.

use log::{LevelFilter, Log, Metadata, Record};

/// 환경변수로 설정 파일의 로그 레벨을 덮어쓴다.
pub const LOG_ENV: &str = "PSYCHRO_LOG";

struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{} {}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

/// 문자열 레벨을 해석한다. 알 수 없으면 Warn.
pub fn parse_level(level: &str) -> LevelFilter {
    level.trim().parse().unwrap_or(LevelFilter::Warn)
}

/// 로거를 설치한다. 이미 설치되어 있으면 레벨만 갱신한다.
pub fn init(config_level: &str) {
    let level = std::env::var(LOG_ENV)
        .map(|v| parse_level(&v))
        .unwrap_or_else(|_| parse_level(config_level));
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}
