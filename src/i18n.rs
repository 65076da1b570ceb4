use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const APP_TITLE: &str = "app.title";
    pub const APP_CAPTION: &str = "app.caption";
    pub const APP_EXIT: &str = "app.exit";
    pub const CALC_ERROR: &str = "general.calc_error";

    pub const SIDEBAR_HEADING: &str = "inputs.heading";
    pub const LABEL_PRESSURE: &str = "inputs.pressure";
    pub const LABEL_PAIR: &str = "inputs.pair";
    pub const HELP_PAIR: &str = "inputs.pair_help";
    pub const LABEL_TDB: &str = "inputs.tdb";
    pub const LABEL_RH: &str = "inputs.rh";
    pub const LABEL_TWB: &str = "inputs.twb";
    pub const LABEL_TDP: &str = "inputs.tdp";
    pub const LABEL_W: &str = "inputs.w";
    pub const LABEL_PV: &str = "inputs.pv";
    pub const PLOT_RANGE_HEADING: &str = "inputs.plot_heading";
    pub const LABEL_T_MIN: &str = "inputs.t_min";
    pub const LABEL_T_MAX: &str = "inputs.t_max";
    pub const LABEL_W_MAX: &str = "inputs.w_max";

    pub const RESULTS_HEADING: &str = "results.heading";
    pub const METRIC_TDB: &str = "results.tdb";
    pub const METRIC_RH: &str = "results.rh";
    pub const METRIC_P: &str = "results.p";
    pub const METRIC_W: &str = "results.w";
    pub const METRIC_W_G: &str = "results.w_g";
    pub const METRIC_V: &str = "results.v";
    pub const METRIC_TWB: &str = "results.twb";
    pub const METRIC_TDP: &str = "results.tdp";
    pub const METRIC_PV: &str = "results.pv";
    pub const CAPTION_PWS: &str = "results.pws";

    pub const CHART_X_AXIS: &str = "chart.x_axis";
    pub const CHART_Y_AXIS: &str = "chart.y_axis";
    pub const CHART_SATURATION: &str = "chart.saturation";
    pub const CHART_POINT: &str = "chart.point";
    pub const CURVE_HEADING: &str = "chart.curve_heading";

    pub const NOTES_HEADING: &str = "notes.heading";
    pub const NOTES_BODY: &str = "notes.body";

    pub const MENU_TITLE: &str = "menu.title";
    pub const MENU_SETTINGS: &str = "menu.settings";
    pub const MENU_EXIT: &str = "menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const PROMPT_KEEP_HINT: &str = "prompt.keep_hint";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_SAVED: &str = "settings.saved";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Language {
    En,
    Es,
    Ko,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("es") {
            Language::Es
        } else if c.starts_with("ko") {
            Language::Ko
        } else {
            Language::En
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(en/es/ko)에 따라 번역기를 생성한다. 알 수 없는 코드는 en으로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    /// 번역을 가져온다. 언어팩 → 선택 언어 → 영어 순으로 찾는다.
    pub fn t<'a>(&'a self, key: &str) -> &'a str {
        if let Some(v) = self.overrides.as_ref().and_then(|m| m.get(key)) {
            return v;
        }
        let built_in = match self.lang {
            Language::En => None,
            Language::Es => es(key),
            Language::Ko => ko(key),
        };
        built_in.or_else(|| en(key)).unwrap_or("[missing translation]")
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("en") => Some("en".into()),
        other if other.starts_with("es") => Some("es".into()),
        other if other.starts_with("ko") => Some("ko".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다. (ex: es_AR.UTF-8 → es)
pub fn detect_system_language() -> Option<String> {
    let from_locale = get_locale().and_then(|loc| normalize_locale_string(&loc));
    from_locale
        .or_else(|| std::env::var("LANG").ok().and_then(|l| normalize_locale_string(&l)))
        .or_else(|| std::env::var("LC_ALL").ok().and_then(|l| normalize_locale_string(&l)))
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc.split(['.', '_', '-']).next().unwrap_or_default();
    normalize_lang(lang)
}

/// TOML 언어팩을 로드한다. `[results] tdb = "..."` 같은 중첩 테이블은 `results.tdb` 키가 된다.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let path = Path::new(dir).join(format!("{lang}.toml"));
    let content = fs::read_to_string(path).ok()?;
    parse_toml_to_map(&content)
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.clone());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    let value: toml::Value = toml::from_str(src).ok()?;
    let mut map = HashMap::new();
    walk("", &value, &mut map);
    (!map.is_empty()).then_some(map)
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        APP_TITLE => "Basic psychrometric chart (SI)",
        APP_CAPTION => "Moist-air properties from the ASHRAE Fundamentals correlations.",
        APP_EXIT => "Exiting application.",
        CALC_ERROR => "Calculation error",
        SIDEBAR_HEADING => "Conditions and inputs",
        LABEL_PRESSURE => "Total pressure P [Pa]",
        LABEL_PAIR => "Input pair",
        HELP_PAIR => "Choose the two known variables to compute the rest.",
        LABEL_TDB => "Dry-bulb temperature Tdb [°C]",
        LABEL_RH => "Relative humidity RH [%]",
        LABEL_TWB => "Wet-bulb temperature Twb [°C]",
        LABEL_TDP => "Dew-point temperature Tdp [°C]",
        LABEL_W => "Humidity ratio W [kg_vapor/kg_dry_air]",
        LABEL_PV => "Water vapor partial pressure Pv [Pa]",
        PLOT_RANGE_HEADING => "Chart range",
        LABEL_T_MIN => "Minimum Tdb [°C]",
        LABEL_T_MAX => "Maximum Tdb [°C]",
        LABEL_W_MAX => "Upper limit of W [g/kg dry air]",
        RESULTS_HEADING => "Results (SI)",
        METRIC_TDB => "Dry-bulb temperature Tdb",
        METRIC_RH => "Relative humidity RH",
        METRIC_P => "Total pressure P",
        METRIC_W => "Humidity ratio W",
        METRIC_W_G => "W",
        METRIC_V => "Specific volume v",
        METRIC_TWB => "Wet-bulb temperature Twb",
        METRIC_TDP => "Dew-point temperature Tdp",
        METRIC_PV => "Vapor pressure Pv",
        CAPTION_PWS => "Saturation vapor pressure at Tdb:",
        CHART_X_AXIS => "Dry-bulb temperature Tdb [°C]",
        CHART_Y_AXIS => "Humidity ratio W [g/kg dry air]",
        CHART_SATURATION => "φ = 100% (saturation)",
        CHART_POINT => "State point",
        CURVE_HEADING => "Saturation curve (φ = 100%)",
        NOTES_HEADING => "Notes:",
        NOTES_BODY => "- ASHRAE Fundamentals (2017) correlations, SI units.\n\
                       - \"W\" is the humidity ratio in kg of vapor / kg of dry air.\n\
                       - Specific volume is reported in m³/kg of dry air.\n\
                       - Only the φ = 100% (saturation) curve is drawn. Relative-humidity isolines may be added later.",
        MENU_TITLE => "\n=== Psychrometric Calculator (SI) ===",
        MENU_SETTINGS => "6) Settings (pressure, chart range)",
        MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        PROMPT_KEEP_HINT => "enter keeps",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_SAVED => "Settings saved.",
        _ => return None,
    })
}

fn es(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        APP_TITLE => "Diagrama psicrométrico básico (SI)",
        APP_CAPTION => "Propiedades del aire húmedo con las correlaciones de ASHRAE Fundamentals.",
        APP_EXIT => "Saliendo de la aplicación.",
        CALC_ERROR => "Error en el cálculo",
        SIDEBAR_HEADING => "Condiciones y entradas",
        LABEL_PRESSURE => "Presión total P [Pa]",
        LABEL_PAIR => "Par de entrada",
        HELP_PAIR => "Elegí las dos variables conocidas para calcular el resto.",
        LABEL_TDB => "T bulbo seco Tdb [°C]",
        LABEL_RH => "Humedad relativa RH [%]",
        LABEL_TWB => "T bulbo húmedo Twb [°C]",
        LABEL_TDP => "T punto de rocío Tdp [°C]",
        LABEL_W => "Humedad absoluta W [kg_vapor/kg_aire_seco]",
        LABEL_PV => "Presión parcial de vapor Pv [Pa]",
        PLOT_RANGE_HEADING => "Rango del gráfico",
        LABEL_T_MIN => "Tdb mínima [°C]",
        LABEL_T_MAX => "Tdb máxima [°C]",
        LABEL_W_MAX => "Límite superior de W [g/kg aire seco]",
        RESULTS_HEADING => "Resultados (SI)",
        METRIC_TDB => "T bulbo seco Tdb",
        METRIC_RH => "Humedad relativa RH",
        METRIC_P => "P total",
        METRIC_W => "Humedad absoluta W",
        METRIC_V => "Volumen específico v",
        METRIC_TWB => "T bulbo húmedo Twb",
        METRIC_TDP => "T punto de rocío Tdp",
        METRIC_PV => "P vapor Pv",
        CAPTION_PWS => "P vapor saturado a Tdb:",
        CHART_X_AXIS => "Temperatura bulbo seco Tdb [°C]",
        CHART_Y_AXIS => "Humedad absoluta W [g/kg aire seco]",
        CHART_SATURATION => "ϕ = 100% (saturación)",
        CHART_POINT => "Punto",
        CURVE_HEADING => "Curva de saturación (ϕ = 100%)",
        NOTES_HEADING => "Notas:",
        NOTES_BODY => "- Correlaciones de ASHRAE Fundamentals (2017). Unidades SI.\n\
                       - \"W\" es la relación de humedad en kg de vapor / kg de aire seco.\n\
                       - El volumen específico se reporta en m³/kg de aire seco.\n\
                       - La curva mostrada es únicamente ϕ = 100% (saturación). Se pueden agregar isohumedades relativas en futuras versiones.",
        MENU_TITLE => "\n=== Calculadora psicrométrica (SI) ===",
        MENU_SETTINGS => "6) Configuración (presión, rango del gráfico)",
        MENU_EXIT => "0) Salir",
        PROMPT_MENU_SELECT => "Elegí una opción: ",
        PROMPT_KEEP_HINT => "enter mantiene",
        INVALID_SELECTION_RETRY => "Entrada inválida. Probá de nuevo.",
        ERROR_INVALID_NUMBER => "Ingresá un número.",
        SETTINGS_HEADING => "\n-- Configuración --",
        SETTINGS_SAVED => "Configuración guardada.",
        _ => return None,
    })
}

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        APP_TITLE => "기본 습공기 선도 (SI)",
        APP_CAPTION => "ASHRAE Fundamentals 상관식 기반 습공기 물성 계산.",
        APP_EXIT => "프로그램을 종료합니다.",
        CALC_ERROR => "계산 오류",
        SIDEBAR_HEADING => "조건 및 입력",
        LABEL_PRESSURE => "전압 P [Pa]",
        LABEL_PAIR => "입력 쌍",
        HELP_PAIR => "알고 있는 두 변수를 선택하면 나머지를 계산합니다.",
        LABEL_TDB => "건구온도 Tdb [°C]",
        LABEL_RH => "상대습도 RH [%]",
        LABEL_TWB => "습구온도 Twb [°C]",
        LABEL_TDP => "이슬점 Tdp [°C]",
        LABEL_W => "습도비 W [kg수증기/kg건공기]",
        LABEL_PV => "수증기 분압 Pv [Pa]",
        PLOT_RANGE_HEADING => "그래프 범위",
        LABEL_T_MIN => "Tdb 최소 [°C]",
        LABEL_T_MAX => "Tdb 최대 [°C]",
        LABEL_W_MAX => "W 상한 [g/kg 건공기]",
        RESULTS_HEADING => "결과 (SI)",
        METRIC_TDB => "건구온도 Tdb",
        METRIC_RH => "상대습도 RH",
        METRIC_P => "전압 P",
        METRIC_W => "습도비 W",
        METRIC_V => "비체적 v",
        METRIC_TWB => "습구온도 Twb",
        METRIC_TDP => "이슬점 Tdp",
        METRIC_PV => "수증기 분압 Pv",
        CAPTION_PWS => "Tdb에서의 포화 수증기압:",
        CHART_X_AXIS => "건구온도 Tdb [°C]",
        CHART_Y_AXIS => "습도비 W [g/kg 건공기]",
        CHART_SATURATION => "φ = 100% (포화)",
        CHART_POINT => "상태점",
        CURVE_HEADING => "포화곡선 (φ = 100%)",
        NOTES_HEADING => "참고:",
        NOTES_BODY => "- ASHRAE Fundamentals (2017) 상관식, SI 단위.\n\
                       - W는 건공기 1 kg당 수증기 질량(kg)입니다.\n\
                       - 비체적은 건공기 1 kg 기준 m³로 표시합니다.\n\
                       - 포화곡선(φ = 100%)만 표시합니다. 상대습도 등습도선은 추후 추가 예정입니다.",
        MENU_TITLE => "\n=== 습공기 계산기 (SI) ===",
        MENU_SETTINGS => "6) 설정 (전압, 그래프 범위)",
        MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        PROMPT_KEEP_HINT => "엔터 시 유지",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_SAVED => "설정을 저장했습니다.",
        _ => return None,
    })
}
