use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::input::{InputPair, PlotRange, STANDARD_PRESSURE_PA};

const CONFIG_FILE: &str = "config.toml";

/// 애플리케이션 설정을 표현한다. 누락된 필드는 기본값으로 채운다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 언어 코드 (auto/en/es/ko)
    pub language: String,
    /// 언어팩 디렉터리. 없으면 ./locales 를 찾는다.
    pub language_pack_dir: Option<String>,
    /// 로그 레벨 (error/warn/info/debug/trace)
    pub log_level: String,
    /// 마지막으로 사용한 전압 [Pa]
    pub pressure_pa: f64,
    /// 마지막으로 사용한 입력 쌍
    pub input_pair: InputPair,
    /// 그래프 범위
    pub plot: PlotRange,
    #[serde(skip)]
    path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".into(),
            language_pack_dir: None,
            log_level: "warn".into(),
            pressure_pa: STANDARD_PRESSURE_PA,
            input_pair: InputPair::RelHum,
            plot: PlotRange::default(),
            path: None,
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 파일 입출력 오류
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// TOML 역직렬화 오류
    #[error("설정 파싱 오류: {0}")]
    Parse(#[from] toml::de::Error),
    /// TOML 직렬화 오류
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// 현재 디렉터리의 config.toml을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default() -> Result<Config, ConfigError> {
    load_or_default_at(Path::new(CONFIG_FILE))
}

/// 지정 경로의 설정을 로드하거나 없으면 기본 설정을 그 경로에 저장한다.
pub fn load_or_default_at(path: &Path) -> Result<Config, ConfigError> {
    let mut cfg = if path.exists() {
        let content = fs::read_to_string(path)?;
        toml::from_str::<Config>(&content)?
    } else {
        let cfg = Config::default();
        save_config(&cfg, path)?;
        cfg
    };
    cfg.path = Some(path.to_path_buf());
    Ok(cfg)
}

fn save_config(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(cfg)?;
    fs::write(path, content)?;
    Ok(())
}

impl Config {
    /// 설정을 로드했던 파일(기본 config.toml)에 저장한다.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = self
            .path
            .clone()
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));
        save_config(self, &path)
    }
}
