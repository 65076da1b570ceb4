use log::warn;
use std::fmt::Display;

use crate::chart::SaturationChart;
use crate::config::{Config, ConfigError};
use crate::i18n::{keys, Translator};
use crate::input::{InputPair, InputSnapshot};
use crate::report::Report;
use crate::resolver::{self, PsychroState, ResolveError};
use crate::ui_cli::{self, CliArgs, MenuChoice};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 파일/터미널 입출력 오류
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    /// 단발 계산 실패 (사용자에게 이미 표시된 메시지)
    #[error("{0}")]
    Calculation(String),
}

/// 한 번의 계산 패스 결과. 실패 시에는 메시지 하나만 남는다.
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluation {
    Ready {
        state: PsychroState,
        report: Report,
        chart: SaturationChart,
    },
    Failed {
        message: String,
    },
}

impl Evaluation {
    /// 패스 경계 밖에서 생긴 오류(입력 쌍 해석 실패 등)를 계산 실패와 같은 형태로 만든다.
    pub fn failed(err: &dyn Display, tr: &Translator) -> Self {
        Evaluation::Failed {
            message: format!("{}: {err}", tr.t(keys::CALC_ERROR)),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Evaluation::Ready { .. })
    }
}

/// 입력 스냅샷 하나로 해석, 결과 문자열, 그래프 데이터를 만든다. 입력에 대한 순수 함수다.
pub fn evaluate(snapshot: &InputSnapshot, tr: &Translator) -> Evaluation {
    match compute(snapshot) {
        Ok((state, chart)) => Evaluation::Ready {
            report: Report::new(&state, tr),
            state,
            chart,
        },
        Err(err) => {
            warn!("{} 계산 실패: {err}", snapshot.known.pair());
            Evaluation::failed(&err, tr)
        }
    }
}

fn compute(snapshot: &InputSnapshot) -> Result<(PsychroState, SaturationChart), ResolveError> {
    let state = resolver::resolve(snapshot.known, snapshot.pressure_pa)?;
    let chart = SaturationChart::new(&state, &snapshot.plot)?;
    Ok((state, chart))
}

/// 입력 쌍 이름을 해석한 뒤 계산 패스를 실행한다. 이름 해석 실패도 계산 실패와 같은 형태로 남는다.
pub fn evaluate_named<F>(pair_name: &str, tr: &Translator, snapshot_for: F) -> Evaluation
where
    F: FnOnce(InputPair) -> InputSnapshot,
{
    match pair_name.parse::<InputPair>().map_err(ResolveError::from) {
        Ok(pair) => evaluate(&snapshot_for(pair), tr),
        Err(err) => {
            warn!("{err}");
            Evaluation::failed(&err, tr)
        }
    }
}

/// 플래그로 받은 입력으로 한 번 계산하고 결과를 출력한다. 실패 시 `AppError::Calculation`.
pub fn run_once(args: &CliArgs, pair_name: &str, config: &Config, tr: &Translator) -> Result<(), AppError> {
    let evaluation = evaluate_named(pair_name, tr, |pair| args.snapshot(pair, config));
    ui_cli::print_evaluation(tr, &evaluation, args.curve);
    match evaluation {
        Evaluation::Ready { .. } => Ok(()),
        Evaluation::Failed { message } => Err(AppError::Calculation(message)),
    }
}

/// CLI 대화형 메인 루프를 실행한다.
pub fn run(config: &mut Config, tr: &Translator) -> Result<(), AppError> {
    loop {
        match ui_cli::main_menu(tr)? {
            MenuChoice::Pair(pair) => {
                let snapshot = ui_cli::prompt_snapshot(tr, config, pair)?;
                let evaluation = evaluate(&snapshot, tr);
                ui_cli::print_evaluation(tr, &evaluation, false);
                config.input_pair = pair;
            }
            MenuChoice::Settings => {
                ui_cli::handle_settings(tr, config)?;
                config.save()?;
                println!("{}", tr.t(keys::SETTINGS_SAVED));
            }
            MenuChoice::Exit => {
                config.save()?;
                println!("{}", tr.t(keys::APP_EXIT));
                break;
            }
        }
    }
    Ok(())
}
