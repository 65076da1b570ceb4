#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use eframe::{egui, App, Frame};
use egui_plot::{Legend, Line, MarkerShape, Plot, PlotBounds, PlotPoints, Points};
use image::GenericImageView;
use psychro_calc::{
    app::{self, Evaluation},
    chart::SaturationChart,
    config, i18n,
    i18n::keys,
    input::{
        InputPair, InputSnapshot, KnownPair, PlotRange, PLOT_T_LIMIT_MAX_C, PLOT_T_LIMIT_MIN_C,
        PLOT_W_LIMIT_G_PER_KG, PRESSURE_MAX_PA, PRESSURE_MIN_PA,
    },
    logging,
    report::{Metric, Report},
};
use std::{env, error::Error, fs, path::Path, process::ExitCode};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("오류: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let cli_lang = parse_lang_arg(env::args().skip(1));
    let app_cfg = config::load_or_default()?;
    logging::init(&app_cfg.log_level);
    let lang = i18n::resolve_language(cli_lang.as_deref().unwrap_or("auto"), Some(app_cfg.language.as_str()));
    log::debug!("language resolved: {lang}");

    let mut viewport = egui::ViewportBuilder::default()
        .with_title("Psychrometric Calculator")
        .with_inner_size(egui::vec2(1100.0, 760.0));
    if let Some(icon) = load_app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native(
        "Psychrometric Calculator",
        options,
        Box::new(move |cc| {
            if let Err(e) = setup_fonts(&cc.egui_ctx) {
                log::warn!("폰트 설정 실패: {e}");
            }
            Box::new(GuiApp::new(app_cfg.clone(), &lang))
        }),
    )?;
    Ok(())
}

/// `--lang xx`, `--lang=xx`, `-L xx` 중 마지막 값을 돌려준다.
fn parse_lang_arg<I>(args: I) -> Option<String>
where
    I: IntoIterator<Item = String>,
{
    let mut cli_lang = None;
    let mut args = args.into_iter();
    while let Some(a) = args.next() {
        if let Some(val) = a.strip_prefix("--lang=") {
            cli_lang = Some(val.to_string());
        } else if a == "--lang" || a == "-L" {
            if let Some(val) = args.next() {
                cli_lang = Some(val);
            }
        }
    }
    cli_lang
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["psychro.png", "icon.png", "assets/icon.png", "../assets/icon.png"];
    let path = search.iter().find(|p| Path::new(*p).exists())?;
    let bytes = fs::read(path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: img.to_rgba8().into_raw(),
        width: w,
        height: h,
    })
}

fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    let mut fonts = egui::FontDefinitions::default();
    fonts
        .font_data
        .insert(name.to_string(), egui::FontData::from_owned(bytes));
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        // 기본 폰트 뒤에 두어 라틴 글자는 그대로, 한글만 대체 폰트로 그린다
        fonts.families.entry(family).or_default().push(name.to_string());
    }
    ctx.set_fonts(fonts);
}

/// 한글 표시용 폰트를 찾아 등록한다.
/// 1) assets/fonts 2) Windows 시스템 폰트 3) 리눅스 Noto CJK/나눔 순서.
fn setup_fonts(ctx: &egui::Context) -> Result<(), String> {
    let mut candidates = vec![
        Path::new("assets/fonts/malgun.ttf").to_path_buf(),
        Path::new("assets/fonts/NanumGothic.ttf").to_path_buf(),
    ];
    if let Some(windir) = env::var_os("WINDIR") {
        let fonts = Path::new(&windir).join("Fonts");
        candidates.extend(["malgun.ttf", "gulim.ttc"].iter().map(|f| fonts.join(f)));
    }
    candidates.extend(
        [
            "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
            "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
            "/usr/share/fonts/truetype/nanum/NanumGothic.ttf",
            "/System/Library/Fonts/AppleSDGothicNeo.ttc",
        ]
        .iter()
        .map(|p| Path::new(p).to_path_buf()),
    );

    let path = candidates
        .iter()
        .find(|p| p.exists())
        .ok_or_else(|| "Korean font not found; Hangul labels may not render.".to_string())?;
    let bytes =
        fs::read(path).map_err(|e| format!("Failed to read font file ({}): {e}", path.display()))?;
    apply_font_bytes(ctx, bytes, "korean_font");
    Ok(())
}

fn notes_toggle(ui: &mut egui::Ui, title: &str, body: &str, state: &mut bool) {
    ui.checkbox(state, title);
    if *state {
        ui.add(egui::Label::new(egui::RichText::new(body).small()).wrap(true));
    }
}

struct GuiApp {
    config: config::Config,
    tr: i18n::Translator,
    pressure_pa: f64,
    pair: InputPair,
    /// 모드별 입력값. 두 번째 값은 화면 단위(RH는 %)로 보관한다.
    t_dry_bulb: [f64; 5],
    second: [f64; 5],
    plot: PlotRange,
    last: Option<(InputSnapshot, Evaluation)>,
    show_notes: bool,
    config_saved: bool,
}

impl GuiApp {
    fn new(config: config::Config, lang: &str) -> Self {
        let tr = i18n::Translator::new_with_pack(lang, config.language_pack_dir.as_deref());
        let mut t_dry_bulb = [0.0; 5];
        let mut second = [0.0; 5];
        for pair in InputPair::ALL {
            let known = KnownPair::defaults(pair);
            t_dry_bulb[pair.index()] = known.t_dry_bulb();
            second[pair.index()] = to_display(pair, known.second());
        }
        Self {
            pressure_pa: config.pressure_pa,
            pair: config.input_pair,
            plot: config.plot.clamped(),
            tr,
            config,
            t_dry_bulb,
            second,
            last: None,
            show_notes: false,
            config_saved: false,
        }
    }

    /// 현재 위젯 값으로 입력 스냅샷을 만든다. 비활성 모드의 값은 쓰지 않는다.
    fn snapshot(&self) -> InputSnapshot {
        let i = self.pair.index();
        let second = from_display(self.pair, self.second[i]);
        InputSnapshot::new(
            self.pressure_pa,
            KnownPair::new(self.pair, self.t_dry_bulb[i], second),
            self.plot,
        )
    }

    /// 스냅샷이 바뀐 경우에만 계산 패스를 다시 돌린다.
    fn refresh(&mut self) {
        let snapshot = self.snapshot();
        let stale = self.last.as_ref().map_or(true, |(prev, _)| *prev != snapshot);
        if stale {
            let evaluation = app::evaluate(&snapshot, &self.tr);
            self.last = Some((snapshot, evaluation));
        }
    }

    fn save_config(&mut self) {
        self.config.pressure_pa = self.pressure_pa;
        self.config.input_pair = self.pair;
        self.config.plot = self.plot;
        match self.config.save() {
            Ok(()) => log::info!("설정 저장 완료"),
            Err(e) => log::error!("설정 저장 실패: {e}"),
        }
    }

    fn ui_inputs(&mut self, ui: &mut egui::Ui) {
        let tr = &self.tr;
        ui.heading(tr.t(keys::SIDEBAR_HEADING));
        ui.separator();

        ui.label(tr.t(keys::LABEL_PRESSURE));
        ui.add(
            egui::DragValue::new(&mut self.pressure_pa)
                .clamp_range(PRESSURE_MIN_PA..=PRESSURE_MAX_PA)
                .speed(100.0)
                .fixed_decimals(1)
                .suffix(" Pa"),
        );
        ui.add_space(8.0);

        ui.label(tr.t(keys::LABEL_PAIR))
            .on_hover_text(tr.t(keys::HELP_PAIR));
        for pair in InputPair::ALL {
            ui.radio_value(&mut self.pair, pair, pair.label());
        }
        ui.add_space(8.0);

        let i = self.pair.index();
        ui.label(tr.t(keys::LABEL_TDB));
        ui.add(
            egui::DragValue::new(&mut self.t_dry_bulb[i])
                .speed(0.1)
                .fixed_decimals(2)
                .suffix(" °C"),
        );
        let second = &mut self.second[i];
        match self.pair {
            InputPair::RelHum => {
                ui.label(tr.t(keys::LABEL_RH));
                ui.add(egui::Slider::new(second, 0.0..=100.0).step_by(1.0).suffix(" %"));
            }
            InputPair::WetBulb => {
                ui.label(tr.t(keys::LABEL_TWB));
                ui.add(egui::DragValue::new(second).speed(0.1).fixed_decimals(2).suffix(" °C"));
            }
            InputPair::DewPoint => {
                ui.label(tr.t(keys::LABEL_TDP));
                ui.add(egui::DragValue::new(second).speed(0.1).fixed_decimals(2).suffix(" °C"));
            }
            InputPair::HumRatio => {
                ui.label(tr.t(keys::LABEL_W));
                ui.add(
                    egui::DragValue::new(second)
                        .clamp_range(0.0..=f64::MAX)
                        .speed(0.0005)
                        .fixed_decimals(5),
                );
            }
            InputPair::VapPres => {
                ui.label(tr.t(keys::LABEL_PV));
                ui.add(
                    egui::DragValue::new(second)
                        .clamp_range(0.0..=f64::MAX)
                        .speed(10.0)
                        .fixed_decimals(1)
                        .suffix(" Pa"),
                );
            }
        }

        ui.add_space(12.0);
        ui.heading(tr.t(keys::PLOT_RANGE_HEADING));
        ui.separator();
        let t_range = PLOT_T_LIMIT_MIN_C..=PLOT_T_LIMIT_MAX_C;
        ui.add(egui::Slider::new(&mut self.plot.t_min_c, t_range.clone()).step_by(1.0).text(tr.t(keys::LABEL_T_MIN)));
        ui.add(egui::Slider::new(&mut self.plot.t_max_c, t_range).step_by(1.0).text(tr.t(keys::LABEL_T_MAX)));
        let (w_lo, w_hi) = PLOT_W_LIMIT_G_PER_KG;
        ui.add(egui::Slider::new(&mut self.plot.w_max_g_per_kg, w_lo..=w_hi).step_by(1.0).text(tr.t(keys::LABEL_W_MAX)));
        self.plot = self.plot.clamped();
    }
}

/// 내부 값(RH는 분율) → 화면 값(RH는 %).
fn to_display(pair: InputPair, value: f64) -> f64 {
    match pair {
        InputPair::RelHum => value * 100.0,
        _ => value,
    }
}

fn from_display(pair: InputPair, value: f64) -> f64 {
    match pair {
        InputPair::RelHum => value / 100.0,
        _ => value,
    }
}

fn metric_ui(ui: &mut egui::Ui, metric: &Metric) {
    ui.label(egui::RichText::new(&metric.label).small().weak());
    ui.label(egui::RichText::new(&metric.value).size(20.0).strong());
    ui.add_space(6.0);
}

fn results_ui(ui: &mut egui::Ui, report: &Report, tr: &i18n::Translator) {
    ui.heading(tr.t(keys::RESULTS_HEADING));
    ui.separator();
    ui.columns(3, |cols| {
        for (col, metrics) in cols.iter_mut().zip(report.columns.iter()) {
            for metric in metrics {
                metric_ui(col, metric);
            }
        }
    });
    ui.label(egui::RichText::new(&report.caption).small().weak());
}

fn chart_ui(ui: &mut egui::Ui, chart: &SaturationChart, tr: &i18n::Translator) {
    let curve = Line::new(PlotPoints::from(chart.curve.clone()))
        .name(tr.t(keys::CHART_SATURATION))
        .width(2.0);
    let point = Points::new(vec![chart.state_point])
        .name(tr.t(keys::CHART_POINT))
        .shape(MarkerShape::Circle)
        .radius(5.0);
    let (x_min, x_max) = chart.x_bounds;
    let (y_min, y_max) = chart.y_bounds;
    Plot::new("saturation_chart")
        .legend(Legend::default())
        .x_axis_label(tr.t(keys::CHART_X_AXIS))
        .y_axis_label(tr.t(keys::CHART_Y_AXIS))
        .height(380.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.set_plot_bounds(PlotBounds::from_min_max([x_min, y_min], [x_max, y_max]));
            plot_ui.line(curve);
            plot_ui.points(point);
        });
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        if ctx.input(|i| i.viewport().close_requested()) && !self.config_saved {
            self.save_config();
            self.config_saved = true;
        }

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(self.tr.t(keys::APP_TITLE));
                ui.separator();
                ui.label(self.tr.t(keys::APP_CAPTION));
            });
        });

        egui::SidePanel::left("inputs")
            .resizable(true)
            .min_width(220.0)
            .default_width(260.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| self.ui_inputs(ui));
            });

        self.refresh();

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    if let Some((_, evaluation)) = &self.last {
                        match evaluation {
                            Evaluation::Failed { message } => {
                                ui.colored_label(ui.visuals().error_fg_color, message);
                            }
                            Evaluation::Ready { report, chart, .. } => {
                                results_ui(ui, report, &self.tr);
                                ui.add_space(12.0);
                                chart_ui(ui, chart, &self.tr);
                            }
                        }
                    }
                    ui.add_space(12.0);
                    notes_toggle(
                        ui,
                        self.tr.t(keys::NOTES_HEADING),
                        self.tr.t(keys::NOTES_BODY),
                        &mut self.show_notes,
                    );
                });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn lang_flag_forms() {
        assert_eq!(parse_lang_arg(args(&["--lang", "ko"])), Some("ko".into()));
        assert_eq!(parse_lang_arg(args(&["--lang=es"])), Some("es".into()));
        assert_eq!(parse_lang_arg(args(&["-L", "en", "--lang=ko"])), Some("ko".into()));
        assert_eq!(parse_lang_arg(args(&["--lang"])), None);
        assert_eq!(parse_lang_arg(args(&[])), None);
    }

    #[test]
    fn snapshot_reads_only_active_mode() {
        let mut gui = GuiApp::new(config::Config::default(), "en");
        gui.pair = InputPair::RelHum;
        gui.second[InputPair::RelHum.index()] = 40.0;
        gui.second[InputPair::WetBulb.index()] = 99.0;
        let snap = gui.snapshot();
        assert_eq!(
            snap.known,
            KnownPair::RelHum {
                t_dry_bulb: 25.0,
                rel_hum: 0.40
            }
        );
    }

    #[test]
    fn refresh_caches_until_snapshot_changes() {
        let mut gui = GuiApp::new(config::Config::default(), "en");
        gui.refresh();
        let first = gui.last.clone();
        assert!(matches!(&first, Some((_, ev)) if ev.is_ready()));
        gui.refresh();
        assert_eq!(gui.last, first);

        gui.pair = InputPair::WetBulb;
        gui.t_dry_bulb[InputPair::WetBulb.index()] = 20.0;
        gui.second[InputPair::WetBulb.index()] = 25.0;
        gui.refresh();
        assert!(matches!(&gui.last, Some((_, Evaluation::Failed { .. }))));
    }
}
