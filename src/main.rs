use clap::Parser;
use psychro_calc::{app, config, i18n, logging, ui_cli::CliArgs};
use std::process::ExitCode;

/// CLI 엔트리 포인트. 설정을 로드한 뒤 단발 계산 또는 대화형 메뉴를 실행한다.
fn main() -> ExitCode {
    match try_run() {
        Ok(()) => ExitCode::SUCCESS,
        // 계산 실패 메시지는 결과 영역에 이미 출력됨
        Err(app::AppError::Calculation(_)) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("오류: {err}");
            ExitCode::FAILURE
        }
    }
}

fn try_run() -> Result<(), app::AppError> {
    let args = CliArgs::parse();
    let mut cfg = config::load_or_default()?;
    logging::init(&cfg.log_level);
    let lang = i18n::resolve_language(&args.lang, Some(cfg.language.as_str()));
    let tr = i18n::Translator::new_with_pack(&lang, cfg.language_pack_dir.as_deref());
    log::debug!("language resolved: {lang}");

    match args.pair.as_deref() {
        Some(pair_name) => app::run_once(&args, pair_name, &cfg, &tr),
        None => app::run(&mut cfg, &tr),
    }
}
