//! 결과 표시용 문자열 생성. 계산은 하지 않는다.

use crate::i18n::{keys, Translator};
use crate::resolver::PsychroState;

/// 라벨과 단위가 붙은 값 하나.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metric {
    pub label: String,
    pub value: String,
}

impl Metric {
    fn new(tr: &Translator, key: &str, value: String) -> Self {
        Self {
            label: tr.t(key).to_string(),
            value,
        }
    }
}

/// 세 열로 배치된 9개 지표 + 포화 수증기압 캡션.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub columns: [Vec<Metric>; 3],
    pub caption: String,
}

impl Report {
    pub fn new(state: &PsychroState, tr: &Translator) -> Self {
        let w = state.hum_ratio;
        let columns = [
            vec![
                Metric::new(tr, keys::METRIC_TDB, format!("{:.2} °C", state.t_dry_bulb_c)),
                Metric::new(tr, keys::METRIC_RH, format!("{:.1} %", state.rel_hum * 100.0)),
                Metric::new(tr, keys::METRIC_P, format!("{} Pa", group_thousands(state.pressure_pa, 0))),
            ],
            vec![
                Metric::new(tr, keys::METRIC_W, format!("{w:.5} kg/kg_da")),
                Metric::new(tr, keys::METRIC_W_G, format!("{:.2} g/kg_da", w * 1000.0)),
                Metric::new(tr, keys::METRIC_V, format!("{:.4} m³/kg_da", state.specific_volume)),
            ],
            vec![
                Metric::new(tr, keys::METRIC_TWB, format!("{:.2} °C", state.t_wet_bulb_c)),
                Metric::new(tr, keys::METRIC_TDP, format!("{:.2} °C", state.t_dew_point_c)),
                Metric::new(tr, keys::METRIC_PV, format!("{} Pa", group_thousands(state.vap_pres_pa, 1))),
            ],
        ];
        let caption = format!(
            "{} {} Pa",
            tr.t(keys::CAPTION_PWS),
            group_thousands(state.sat_vap_pres_pa, 1)
        );
        Self { columns, caption }
    }

    /// 열 순서대로 모든 지표를 순회한다.
    pub fn metrics(&self) -> impl Iterator<Item = &Metric> {
        self.columns.iter().flatten()
    }
}

/// 천 단위 쉼표 구분 + 고정 소수 자릿수. (ex: 101325 → "101,325")
pub fn group_thousands(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };
    let mut grouped = String::with_capacity(formatted.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }
    let is_zero = formatted.chars().all(|c| c == '0' || c == '.');
    if value.is_sign_negative() && !is_zero {
        grouped.insert(0, '-');
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(group_thousands(101_325.0, 0), "101,325");
        assert_eq!(group_thousands(1_585.04, 1), "1,585.0");
        assert_eq!(group_thousands(999.96, 1), "1,000.0");
        assert_eq!(group_thousands(12.5, 1), "12.5");
        assert_eq!(group_thousands(1_234_567.0, 0), "1,234,567");
        assert_eq!(group_thousands(-2_500.0, 0), "-2,500");
        assert_eq!(group_thousands(-0.01, 1), "0.0");
    }
}
