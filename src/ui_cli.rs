use clap::Parser;
use log::warn;
use std::io::{self, Write};

use crate::app::{AppError, Evaluation};
use crate::chart::SaturationChart;
use crate::config::Config;
use crate::i18n::{keys, Translator};
use crate::input::{InputPair, InputSnapshot, KnownPair, PlotRange, PRESSURE_MAX_PA, PRESSURE_MIN_PA};

/// 습공기 계산기 CLI. `--pair`가 없으면 대화형 메뉴로 동작한다.
#[derive(Debug, Clone, Parser)]
#[command(name = "psychro_calc_cli", version)]
pub struct CliArgs {
    /// 입력 쌍: tdb+rh, tdb+twb, tdb+tdp, tdb+w, tdb+pv
    #[arg(long)]
    pub pair: Option<String>,
    /// 건구온도 [°C]
    #[arg(long, allow_negative_numbers = true)]
    pub tdb: Option<f64>,
    /// 상대습도 [%]
    #[arg(long, value_name = "PERCENT")]
    pub rh: Option<f64>,
    /// 습구온도 [°C]
    #[arg(long, allow_negative_numbers = true)]
    pub twb: Option<f64>,
    /// 이슬점 [°C]
    #[arg(long, allow_negative_numbers = true)]
    pub tdp: Option<f64>,
    /// 습도비 [kg/kg 건공기]
    #[arg(long)]
    pub w: Option<f64>,
    /// 수증기 분압 [Pa]
    #[arg(long)]
    pub pv: Option<f64>,
    /// 전압 [Pa] (50000~300000)
    #[arg(long, value_name = "PA")]
    pub pressure: Option<f64>,
    /// 그래프 건구온도 하한 [°C]
    #[arg(long, allow_negative_numbers = true)]
    pub t_min: Option<f64>,
    /// 그래프 건구온도 상한 [°C]
    #[arg(long, allow_negative_numbers = true)]
    pub t_max: Option<f64>,
    /// 그래프 습도비 상한 [g/kg]
    #[arg(long)]
    pub w_max: Option<f64>,
    /// 포화곡선 표 출력
    #[arg(long)]
    pub curve: bool,
    /// 언어: auto, en, es, ko
    #[arg(long, default_value = "auto")]
    pub lang: String,
}

impl CliArgs {
    /// 플래그로 스냅샷을 만든다. 빠진 값은 모드 기본값/설정값을 쓰고, 비활성 모드 플래그는 무시한다.
    pub fn snapshot(&self, pair: InputPair, config: &Config) -> InputSnapshot {
        let defaults = KnownPair::defaults(pair);
        let flags = [
            (InputPair::RelHum, "--rh", self.rh.map(|pct| pct / 100.0)),
            (InputPair::WetBulb, "--twb", self.twb),
            (InputPair::DewPoint, "--tdp", self.tdp),
            (InputPair::HumRatio, "--w", self.w),
            (InputPair::VapPres, "--pv", self.pv),
        ];
        let mut second = defaults.second();
        for (flag_pair, flag, value) in flags {
            match value {
                Some(v) if flag_pair == pair => second = v,
                Some(_) => warn!("{flag}는 {pair} 모드에서 사용되지 않으므로 무시합니다"),
                None => {}
            }
        }
        let plot = PlotRange {
            t_min_c: self.t_min.unwrap_or(config.plot.t_min_c),
            t_max_c: self.t_max.unwrap_or(config.plot.t_max_c),
            w_max_g_per_kg: self.w_max.unwrap_or(config.plot.w_max_g_per_kg),
        };
        InputSnapshot::new(
            self.pressure.unwrap_or(config.pressure_pa),
            KnownPair::new(pair, self.tdb.unwrap_or(defaults.t_dry_bulb()), second),
            plot,
        )
    }
}

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Pair(InputPair),
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MENU_TITLE));
    for pair in InputPair::ALL {
        println!("{}) {}", pair.index() + 1, pair.label());
    }
    println!("{}", tr.t(keys::MENU_SETTINGS));
    println!("{}", tr.t(keys::MENU_EXIT));
    loop {
        let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
        match parse_menu_choice(&sel) {
            Some(choice) => return Ok(choice),
            None => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

fn parse_menu_choice(sel: &str) -> Option<MenuChoice> {
    match sel.trim() {
        "0" => Some(MenuChoice::Exit),
        "6" => Some(MenuChoice::Settings),
        other => {
            let n: usize = other.parse().ok()?;
            InputPair::ALL.get(n.checked_sub(1)?).copied().map(MenuChoice::Pair)
        }
    }
}

/// 선택된 입력 쌍의 두 값을 묻는다. 엔터만 누르면 모드 기본값을 쓴다.
pub fn prompt_snapshot(
    tr: &Translator,
    config: &Config,
    pair: InputPair,
) -> Result<InputSnapshot, AppError> {
    let defaults = KnownPair::defaults(pair);
    let tdb = read_f64_or(tr, tr.t(keys::LABEL_TDB), defaults.t_dry_bulb())?;
    let second = match pair {
        InputPair::RelHum => read_f64_or(tr, tr.t(keys::LABEL_RH), defaults.second() * 100.0)? / 100.0,
        InputPair::WetBulb => read_f64_or(tr, tr.t(keys::LABEL_TWB), defaults.second())?,
        InputPair::DewPoint => read_f64_or(tr, tr.t(keys::LABEL_TDP), defaults.second())?,
        InputPair::HumRatio => read_f64_or(tr, tr.t(keys::LABEL_W), defaults.second())?,
        InputPair::VapPres => read_f64_or(tr, tr.t(keys::LABEL_PV), defaults.second())?,
    };
    Ok(InputSnapshot::new(
        config.pressure_pa,
        KnownPair::new(pair, tdb, second),
        config.plot,
    ))
}

/// 전압과 그래프 범위를 변경한다.
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    let pressure = read_f64_or(tr, tr.t(keys::LABEL_PRESSURE), cfg.pressure_pa)?;
    cfg.pressure_pa = pressure.clamp(PRESSURE_MIN_PA, PRESSURE_MAX_PA);
    let plot = PlotRange {
        t_min_c: read_f64_or(tr, tr.t(keys::LABEL_T_MIN), cfg.plot.t_min_c)?,
        t_max_c: read_f64_or(tr, tr.t(keys::LABEL_T_MAX), cfg.plot.t_max_c)?,
        w_max_g_per_kg: read_f64_or(tr, tr.t(keys::LABEL_W_MAX), cfg.plot.w_max_g_per_kg)?,
    };
    cfg.plot = plot.clamped();
    Ok(())
}

/// 계산 결과 또는 오류 메시지 하나를 출력한다.
pub fn print_evaluation(tr: &Translator, evaluation: &Evaluation, with_curve: bool) {
    println!("\n{}", tr.t(keys::RESULTS_HEADING));
    match evaluation {
        Evaluation::Failed { message } => println!("{message}"),
        Evaluation::Ready { report, chart, .. } => {
            for metric in report.metrics() {
                println!("  {:<28} {}", metric.label, metric.value);
            }
            println!("  {}", report.caption);
            if with_curve {
                print_curve(tr, chart);
            }
        }
    }
}

fn print_curve(tr: &Translator, chart: &SaturationChart) {
    println!("\n{}", tr.t(keys::CURVE_HEADING));
    println!("{:>10} {:>12}", "Tdb [°C]", "W [g/kg]");
    for &[t, w] in &chart.curve {
        println!("{t:>10.2} {w:>12.3}");
    }
    let [t, w] = chart.state_point;
    println!("{}: ({t:.2} °C, {w:.2} g/kg)", tr.t(keys::CHART_POINT));
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    if io::stdin().read_line(&mut buf)? == 0 {
        return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
    }
    Ok(buf)
}

/// 숫자를 입력받는다. 빈 입력이면 `current`를 그대로 쓴다.
fn read_f64_or(tr: &Translator, label: &str, current: f64) -> Result<f64, AppError> {
    let prompt = format!("{label} ({}: {current}): ", tr.t(keys::PROMPT_KEEP_HINT));
    loop {
        let s = read_line(&prompt)?;
        if s.trim().is_empty() {
            return Ok(current);
        }
        match s.trim().parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}
