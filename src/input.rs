//! 입력 선택기. 다섯 가지 입력 쌍 중 하나와 전압, 그래프 범위를 하나의 스냅샷으로 묶는다.
//!
//! 활성 모드의 두 값만 [`KnownPair`]에 담기므로 비활성 모드의 입력은 하위 계산으로 흘러갈 수 없다.
//! 검증은 각 필드의 범위 클램프뿐이며, 물리적 일관성은 계산 단계에서 판정한다.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 전압 입력 하한 [Pa]
pub const PRESSURE_MIN_PA: f64 = 50_000.0;
/// 전압 입력 상한 [Pa]
pub const PRESSURE_MAX_PA: f64 = 300_000.0;
/// 표준 대기압 [Pa]
pub const STANDARD_PRESSURE_PA: f64 = 101_325.0;
/// 그래프 건구온도 범위 하한 [°C]
pub const PLOT_T_LIMIT_MIN_C: f64 = -10.0;
/// 그래프 건구온도 범위 상한 [°C]
pub const PLOT_T_LIMIT_MAX_C: f64 = 60.0;
/// 그래프 온도 범위 최소 폭 [°C]
pub const PLOT_T_MIN_SPAN_C: f64 = 1.0;
/// 그래프 습도비 상한 설정 범위 [g/kg]
pub const PLOT_W_LIMIT_G_PER_KG: (f64, f64) = (1.0, 40.0);

/// 알 수 없는 입력 쌍 이름.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("인식할 수 없는 입력 쌍입니다: '{0}' (tdb+rh, tdb+twb, tdb+tdp, tdb+w, tdb+pv 중 선택)")]
pub struct UnknownPair(pub String);

/// 건구온도와 함께 주어지는 두 번째 기지 변수의 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum InputPair {
    /// Tdb + RH
    RelHum,
    /// Tdb + Twb
    WetBulb,
    /// Tdb + Tdp
    DewPoint,
    /// Tdb + W
    HumRatio,
    /// Tdb + Pv
    VapPres,
}

impl InputPair {
    pub const ALL: [InputPair; 5] = [
        InputPair::RelHum,
        InputPair::WetBulb,
        InputPair::DewPoint,
        InputPair::HumRatio,
        InputPair::VapPres,
    ];

    /// 설정 파일/CLI에서 쓰는 코드.
    pub fn code(self) -> &'static str {
        match self {
            InputPair::RelHum => "tdb+rh",
            InputPair::WetBulb => "tdb+twb",
            InputPair::DewPoint => "tdb+tdp",
            InputPair::HumRatio => "tdb+w",
            InputPair::VapPres => "tdb+pv",
        }
    }

    /// 화면 표시용 라벨.
    pub fn label(self) -> &'static str {
        match self {
            InputPair::RelHum => "Tdb + RH",
            InputPair::WetBulb => "Tdb + Twb",
            InputPair::DewPoint => "Tdb + Tdp",
            InputPair::HumRatio => "Tdb + W",
            InputPair::VapPres => "Tdb + Pv",
        }
    }

    pub fn index(self) -> usize {
        match self {
            InputPair::RelHum => 0,
            InputPair::WetBulb => 1,
            InputPair::DewPoint => 2,
            InputPair::HumRatio => 3,
            InputPair::VapPres => 4,
        }
    }
}

impl fmt::Display for InputPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for InputPair {
    type Err = UnknownPair;

    /// `tdb+rh`, `Tdb + RH`, `rh` 등 대소문자/공백을 무시하고 해석한다.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();
        let second = norm.strip_prefix("tdb+").unwrap_or(&norm);
        match second {
            "rh" => Ok(InputPair::RelHum),
            "twb" => Ok(InputPair::WetBulb),
            "tdp" => Ok(InputPair::DewPoint),
            "w" => Ok(InputPair::HumRatio),
            "pv" => Ok(InputPair::VapPres),
            _ => Err(UnknownPair(s.trim().to_string())),
        }
    }
}

impl TryFrom<String> for InputPair {
    type Error = UnknownPair;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<InputPair> for String {
    fn from(value: InputPair) -> Self {
        value.code().to_string()
    }
}

/// 활성 모드의 두 기지 변수. 단위: °C, 분율(0~1), kg/kg, Pa.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KnownPair {
    RelHum { t_dry_bulb: f64, rel_hum: f64 },
    WetBulb { t_dry_bulb: f64, t_wet_bulb: f64 },
    DewPoint { t_dry_bulb: f64, t_dew_point: f64 },
    HumRatio { t_dry_bulb: f64, hum_ratio: f64 },
    VapPres { t_dry_bulb: f64, vap_pres: f64 },
}

impl KnownPair {
    /// 모드와 두 값으로 생성한다. 두 번째 값은 모드별 범위로 클램프된다.
    /// NaN/무한대는 클램프하지 않고 그대로 두어 계산 패스에서 오류로 보고되게 한다.
    pub fn new(pair: InputPair, t_dry_bulb: f64, second: f64) -> Self {
        match pair {
            InputPair::RelHum => KnownPair::RelHum {
                t_dry_bulb,
                rel_hum: clamp_finite(second, 0.0, 1.0),
            },
            InputPair::WetBulb => KnownPair::WetBulb {
                t_dry_bulb,
                t_wet_bulb: second,
            },
            InputPair::DewPoint => KnownPair::DewPoint {
                t_dry_bulb,
                t_dew_point: second,
            },
            InputPair::HumRatio => KnownPair::HumRatio {
                t_dry_bulb,
                hum_ratio: clamp_finite(second, 0.0, f64::INFINITY),
            },
            InputPair::VapPres => KnownPair::VapPres {
                t_dry_bulb,
                vap_pres: clamp_finite(second, 0.0, f64::INFINITY),
            },
        }
    }

    /// 모드별 초기값.
    pub fn defaults(pair: InputPair) -> Self {
        match pair {
            InputPair::RelHum => KnownPair::new(pair, 25.0, 0.50),
            InputPair::WetBulb => KnownPair::new(pair, 30.0, 24.0),
            InputPair::DewPoint => KnownPair::new(pair, 25.0, 13.0),
            InputPair::HumRatio => KnownPair::new(pair, 25.0, 0.010),
            InputPair::VapPres => KnownPair::new(pair, 25.0, 2000.0),
        }
    }

    pub fn pair(&self) -> InputPair {
        match self {
            KnownPair::RelHum { .. } => InputPair::RelHum,
            KnownPair::WetBulb { .. } => InputPair::WetBulb,
            KnownPair::DewPoint { .. } => InputPair::DewPoint,
            KnownPair::HumRatio { .. } => InputPair::HumRatio,
            KnownPair::VapPres { .. } => InputPair::VapPres,
        }
    }

    pub fn t_dry_bulb(&self) -> f64 {
        match *self {
            KnownPair::RelHum { t_dry_bulb, .. }
            | KnownPair::WetBulb { t_dry_bulb, .. }
            | KnownPair::DewPoint { t_dry_bulb, .. }
            | KnownPair::HumRatio { t_dry_bulb, .. }
            | KnownPair::VapPres { t_dry_bulb, .. } => t_dry_bulb,
        }
    }

    /// 건구온도 외 두 번째 기지 값.
    pub fn second(&self) -> f64 {
        match *self {
            KnownPair::RelHum { rel_hum, .. } => rel_hum,
            KnownPair::WetBulb { t_wet_bulb, .. } => t_wet_bulb,
            KnownPair::DewPoint { t_dew_point, .. } => t_dew_point,
            KnownPair::HumRatio { hum_ratio, .. } => hum_ratio,
            KnownPair::VapPres { vap_pres, .. } => vap_pres,
        }
    }
}

/// 유한한 값만 클램프한다. `f64::max`는 NaN을 0으로 바꿔 버린다.
fn clamp_finite(v: f64, lo: f64, hi: f64) -> f64 {
    if v.is_finite() {
        v.clamp(lo, hi)
    } else {
        v
    }
}

/// 그래프 범위. 온도 [°C], 습도비 상한 [g/kg 건공기].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotRange {
    pub t_min_c: f64,
    pub t_max_c: f64,
    pub w_max_g_per_kg: f64,
}

impl Default for PlotRange {
    fn default() -> Self {
        Self {
            t_min_c: 0.0,
            t_max_c: 50.0,
            w_max_g_per_kg: 25.0,
        }
    }
}

impl PlotRange {
    /// 범위를 허용 구간으로 클램프하고 t_max ≥ t_min + 1 °C를 보장한다.
    /// 유한하지 않은 값은 기본값으로 대체한다.
    pub fn clamped(self) -> Self {
        let fallback = PlotRange::default();
        let finite_or = |v: f64, d: f64| if v.is_finite() { v } else { d };
        let lo = PLOT_T_LIMIT_MIN_C;
        let hi = PLOT_T_LIMIT_MAX_C;
        let t_min = finite_or(self.t_min_c, fallback.t_min_c).clamp(lo, hi - PLOT_T_MIN_SPAN_C);
        let t_max = finite_or(self.t_max_c, fallback.t_max_c).clamp(t_min + PLOT_T_MIN_SPAN_C, hi);
        let (w_lo, w_hi) = PLOT_W_LIMIT_G_PER_KG;
        Self {
            t_min_c: t_min,
            t_max_c: t_max,
            w_max_g_per_kg: finite_or(self.w_max_g_per_kg, fallback.w_max_g_per_kg)
                .clamp(w_lo, w_hi),
        }
    }
}

/// 한 번의 계산에 사용되는 입력 전체.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputSnapshot {
    pub pressure_pa: f64,
    pub known: KnownPair,
    pub plot: PlotRange,
}

impl InputSnapshot {
    /// 전압과 그래프 범위를 클램프하여 스냅샷을 만든다.
    pub fn new(pressure_pa: f64, known: KnownPair, plot: PlotRange) -> Self {
        Self {
            pressure_pa: pressure_pa.clamp(PRESSURE_MIN_PA, PRESSURE_MAX_PA),
            known,
            plot: plot.clamped(),
        }
    }
}

impl Default for InputSnapshot {
    fn default() -> Self {
        Self::new(
            STANDARD_PRESSURE_PA,
            KnownPair::defaults(InputPair::RelHum),
            PlotRange::default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pair_names_loosely() {
        assert_eq!("tdb+rh".parse::<InputPair>(), Ok(InputPair::RelHum));
        assert_eq!("Tdb + Twb".parse::<InputPair>(), Ok(InputPair::WetBulb));
        assert_eq!("TDP".parse::<InputPair>(), Ok(InputPair::DewPoint));
        assert_eq!(" w ".parse::<InputPair>(), Ok(InputPair::HumRatio));
        assert_eq!("tdb+pv".parse::<InputPair>(), Ok(InputPair::VapPres));
    }

    #[test]
    fn clamps_pass_non_finite_values_through() {
        assert!(KnownPair::new(InputPair::HumRatio, 20.0, f64::NAN).second().is_nan());
        assert!(KnownPair::new(InputPair::VapPres, 20.0, f64::NAN).second().is_nan());
        assert_eq!(KnownPair::new(InputPair::RelHum, 20.0, f64::INFINITY).second(), f64::INFINITY);
        assert_eq!(KnownPair::new(InputPair::RelHum, 20.0, 1.3).second(), 1.0);
        assert_eq!(KnownPair::new(InputPair::VapPres, 20.0, -5.0).second(), 0.0);
    }

    #[test]
    fn unknown_pair_is_reported() {
        let err = "tdb+h".parse::<InputPair>().unwrap_err();
        assert_eq!(err, UnknownPair("tdb+h".into()));
    }

    #[test]
    fn code_round_trips_for_all_pairs() {
        for pair in InputPair::ALL {
            assert_eq!(pair.code().parse::<InputPair>(), Ok(pair));
            assert_eq!(InputPair::ALL[pair.index()], pair);
        }
    }

    #[test]
    fn second_value_is_clamped_per_mode() {
        assert_eq!(KnownPair::new(InputPair::RelHum, 20.0, 1.4).second(), 1.0);
        assert_eq!(KnownPair::new(InputPair::RelHum, 20.0, -0.2).second(), 0.0);
        assert_eq!(KnownPair::new(InputPair::HumRatio, 20.0, -0.01).second(), 0.0);
        assert_eq!(KnownPair::new(InputPair::VapPres, 20.0, -5.0).second(), 0.0);
        // 온도 입력은 클램프하지 않는다
        assert_eq!(KnownPair::new(InputPair::WetBulb, 20.0, 45.0).second(), 45.0);
    }

    #[test]
    fn pressure_and_plot_range_are_clamped() {
        let snap = InputSnapshot::new(
            10_000.0,
            KnownPair::defaults(InputPair::RelHum),
            PlotRange {
                t_min_c: 30.0,
                t_max_c: 20.0,
                w_max_g_per_kg: 100.0,
            },
        );
        assert_eq!(snap.pressure_pa, PRESSURE_MIN_PA);
        assert_eq!(snap.plot.t_min_c, 30.0);
        assert_eq!(snap.plot.t_max_c, 31.0);
        assert_eq!(snap.plot.w_max_g_per_kg, 40.0);

        let high = InputSnapshot::new(1e6, KnownPair::defaults(InputPair::RelHum), PlotRange::default());
        assert_eq!(high.pressure_pa, PRESSURE_MAX_PA);
    }

    #[test]
    fn non_finite_plot_bounds_fall_back_to_defaults() {
        let range = PlotRange {
            t_min_c: f64::NAN,
            t_max_c: f64::INFINITY,
            w_max_g_per_kg: f64::NAN,
        }
        .clamped();
        assert_eq!(range, PlotRange::default());
    }

    #[test]
    fn defaults_match_form_initial_values() {
        let snap = InputSnapshot::default();
        assert_eq!(snap.pressure_pa, STANDARD_PRESSURE_PA);
        assert_eq!(snap.known.pair(), InputPair::RelHum);
        assert_eq!(snap.known.t_dry_bulb(), 25.0);
        assert_eq!(snap.plot, PlotRange::default());
    }
}
