//! 물성 해석기. 입력 쌍별 고정된 유도 순서(디스패치 테이블)를 실행해 나머지 물성을 채운다.
//!
//! 어느 한 단계라도 실패하면 부분 결과 없이 하나의 [`ResolveError`]만 반환한다.
//! 이슬점은 모든 모드에서 습도비를 거쳐 유도한다.

use log::debug;

use crate::input::{InputPair, KnownPair, UnknownPair};
use crate::psychro::{self, PsychroError};

/// 상대습도 실현 가능 판정 허용오차
const REL_HUM_EPS: f64 = 1e-9;

/// 물성 해석 실패.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResolveError {
    /// 상관식 호출 실패
    #[error(transparent)]
    Psychro(#[from] PsychroError),
    /// 계산은 되었으나 물리적으로 불가능한 상태 (포화 초과 등)
    #[error("상대습도 {rel_hum_pct:.1}%는 물리적으로 가능한 범위(0~100%)를 벗어났습니다")]
    Infeasible { rel_hum_pct: f64 },
    /// 입력 쌍 이름 해석 실패
    #[error(transparent)]
    UnknownPair(#[from] UnknownPair),
    /// NaN 또는 무한대 입력
    #[error("{quantity} 값이 유한한 수가 아닙니다 ({value})")]
    NotFinite { quantity: &'static str, value: f64 },
    /// 유도 순서상 선행 값이 없음
    #[error("{0} 값이 계산 순서에서 누락되었습니다")]
    MissingValue(&'static str),
}

/// 한 번의 유도 단계. 주석은 `출력 ← (입력)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// W ← (Tdb, RH, P)
    HumRatioFromRelHum,
    /// Pv ← (Tdb, RH)
    VapPresFromRelHum,
    /// Tdp ← (Tdb, W, P)
    TDewPointFromHumRatio,
    /// Twb ← (Tdb, RH, P)
    TWetBulbFromRelHum,
    /// W ← (Tdb, Twb, P)
    HumRatioFromTWetBulb,
    /// RH ← (Tdb, Twb, P)
    RelHumFromTWetBulb,
    /// Pv ← (W, P)
    VapPresFromHumRatio,
    /// W ← (Tdp, P)
    HumRatioFromTDewPoint,
    /// RH ← (Tdb, W, P)
    RelHumFromHumRatio,
    /// Twb ← (Tdb, W, P)
    TWetBulbFromHumRatio,
    /// RH ← (Tdb, Pv)
    RelHumFromVapPres,
}

const REL_HUM_STEPS: &[Step] = &[
    Step::HumRatioFromRelHum,
    Step::VapPresFromRelHum,
    Step::TDewPointFromHumRatio,
    Step::TWetBulbFromRelHum,
];

const WET_BULB_STEPS: &[Step] = &[
    Step::HumRatioFromTWetBulb,
    Step::RelHumFromTWetBulb,
    Step::VapPresFromHumRatio,
    Step::TDewPointFromHumRatio,
];

const DEW_POINT_STEPS: &[Step] = &[
    Step::HumRatioFromTDewPoint,
    Step::VapPresFromHumRatio,
    Step::RelHumFromHumRatio,
    Step::TWetBulbFromRelHum,
];

const HUM_RATIO_STEPS: &[Step] = &[
    Step::RelHumFromHumRatio,
    Step::VapPresFromHumRatio,
    Step::TDewPointFromHumRatio,
    Step::TWetBulbFromHumRatio,
];

const VAP_PRES_STEPS: &[Step] = &[
    Step::RelHumFromVapPres,
    Step::HumRatioFromRelHum,
    Step::TDewPointFromHumRatio,
    Step::TWetBulbFromRelHum,
];

/// 입력 쌍별 유도 순서.
pub fn derivation_steps(pair: InputPair) -> &'static [Step] {
    match pair {
        InputPair::RelHum => REL_HUM_STEPS,
        InputPair::WetBulb => WET_BULB_STEPS,
        InputPair::DewPoint => DEW_POINT_STEPS,
        InputPair::HumRatio => HUM_RATIO_STEPS,
        InputPair::VapPres => VAP_PRES_STEPS,
    }
}

/// 계산 도중의 미완성 상태.
#[derive(Debug, Default)]
struct Working {
    rel_hum: Option<f64>,
    t_wet_bulb: Option<f64>,
    t_dew_point: Option<f64>,
    hum_ratio: Option<f64>,
    vap_pres: Option<f64>,
}

impl Working {
    fn seeded(known: &KnownPair) -> Self {
        let mut w = Working::default();
        match *known {
            KnownPair::RelHum { rel_hum, .. } => w.rel_hum = Some(rel_hum),
            KnownPair::WetBulb { t_wet_bulb, .. } => w.t_wet_bulb = Some(t_wet_bulb),
            KnownPair::DewPoint { t_dew_point, .. } => w.t_dew_point = Some(t_dew_point),
            KnownPair::HumRatio { hum_ratio, .. } => w.hum_ratio = Some(hum_ratio),
            KnownPair::VapPres { vap_pres, .. } => w.vap_pres = Some(vap_pres),
        }
        w
    }
}

fn need(value: Option<f64>, name: &'static str) -> Result<f64, ResolveError> {
    value.ok_or(ResolveError::MissingValue(name))
}

impl Step {
    fn apply(self, tdb: f64, p: f64, w: &mut Working) -> Result<(), ResolveError> {
        match self {
            Step::HumRatioFromRelHum => {
                let rh = need(w.rel_hum, "RH")?;
                w.hum_ratio = Some(psychro::hum_ratio_from_rel_hum(tdb, rh, p)?);
            }
            Step::VapPresFromRelHum => {
                let rh = need(w.rel_hum, "RH")?;
                w.vap_pres = Some(psychro::vap_pres_from_rel_hum(tdb, rh)?);
            }
            Step::TDewPointFromHumRatio => {
                let hr = need(w.hum_ratio, "W")?;
                w.t_dew_point = Some(psychro::t_dew_point_from_hum_ratio(tdb, hr, p)?);
            }
            Step::TWetBulbFromRelHum => {
                let rh = need(w.rel_hum, "RH")?;
                w.t_wet_bulb = Some(psychro::t_wet_bulb_from_rel_hum(tdb, rh, p)?);
            }
            Step::HumRatioFromTWetBulb => {
                let twb = need(w.t_wet_bulb, "Twb")?;
                w.hum_ratio = Some(psychro::hum_ratio_from_t_wet_bulb(tdb, twb, p)?);
            }
            Step::RelHumFromTWetBulb => {
                let twb = need(w.t_wet_bulb, "Twb")?;
                w.rel_hum = Some(psychro::rel_hum_from_t_wet_bulb(tdb, twb, p)?);
            }
            Step::VapPresFromHumRatio => {
                let hr = need(w.hum_ratio, "W")?;
                w.vap_pres = Some(psychro::vap_pres_from_hum_ratio(hr, p)?);
            }
            Step::HumRatioFromTDewPoint => {
                let tdp = need(w.t_dew_point, "Tdp")?;
                w.hum_ratio = Some(psychro::hum_ratio_from_t_dew_point(tdp, p)?);
            }
            Step::RelHumFromHumRatio => {
                let hr = need(w.hum_ratio, "W")?;
                w.rel_hum = Some(psychro::rel_hum_from_hum_ratio(tdb, hr, p)?);
            }
            Step::TWetBulbFromHumRatio => {
                let hr = need(w.hum_ratio, "W")?;
                w.t_wet_bulb = Some(psychro::t_wet_bulb_from_hum_ratio(tdb, hr, p)?);
            }
            Step::RelHumFromVapPres => {
                let pv = need(w.vap_pres, "Pv")?;
                w.rel_hum = Some(psychro::rel_hum_from_vap_pres(tdb, pv)?);
            }
        }
        Ok(())
    }
}

/// 해석이 완료된 습공기 상태. [`resolve`]로만 생성된다.
#[derive(Debug, Clone, Copy, PartialEq)]
#[non_exhaustive]
pub struct PsychroState {
    /// 사용자가 선택한 입력 쌍
    pub pair: InputPair,
    /// 전압 [Pa]
    pub pressure_pa: f64,
    /// 건구온도 [°C]
    pub t_dry_bulb_c: f64,
    /// 상대습도 [0~1]
    pub rel_hum: f64,
    /// 습구온도 [°C]
    pub t_wet_bulb_c: f64,
    /// 이슬점 [°C]
    pub t_dew_point_c: f64,
    /// 습도비 [kg/kg_da]
    pub hum_ratio: f64,
    /// 수증기 분압 [Pa]
    pub vap_pres_pa: f64,
    /// 건구온도에서의 포화 수증기압 [Pa]
    pub sat_vap_pres_pa: f64,
    /// 비체적 [m³/kg_da]
    pub specific_volume: f64,
}

/// 허용오차 안의 상대습도는 [0, 1]로 자르고, 밖이면 실현 불가능으로 본다.
fn check_feasible(rel_hum: f64) -> Result<f64, ResolveError> {
    if (-REL_HUM_EPS..=1.0 + REL_HUM_EPS).contains(&rel_hum) {
        Ok(rel_hum.clamp(0.0, 1.0))
    } else {
        Err(ResolveError::Infeasible {
            rel_hum_pct: rel_hum * 100.0,
        })
    }
}

/// 두 번째 기지 변수의 기호.
fn second_symbol(pair: InputPair) -> &'static str {
    match pair {
        InputPair::RelHum => "RH",
        InputPair::WetBulb => "Twb",
        InputPair::DewPoint => "Tdp",
        InputPair::HumRatio => "W",
        InputPair::VapPres => "Pv",
    }
}

fn check_finite(known: &KnownPair, pressure_pa: f64) -> Result<(), ResolveError> {
    let inputs = [
        ("Tdb", known.t_dry_bulb()),
        (second_symbol(known.pair()), known.second()),
        ("P", pressure_pa),
    ];
    match inputs.into_iter().find(|(_, v)| !v.is_finite()) {
        Some((quantity, value)) => Err(ResolveError::NotFinite { quantity, value }),
        None => Ok(()),
    }
}

/// 기지 변수 쌍과 전압으로부터 전체 상태를 유도한다.
pub fn resolve(known: KnownPair, pressure_pa: f64) -> Result<PsychroState, ResolveError> {
    check_finite(&known, pressure_pa)?;
    let pair = known.pair();
    let tdb = known.t_dry_bulb();
    let mut work = Working::seeded(&known);
    for step in derivation_steps(pair) {
        step.apply(tdb, pressure_pa, &mut work)?;
        // 포화를 넘는 상태는 이후 단계의 범위 오류보다 먼저 보고한다
        if let Some(rh) = work.rel_hum {
            work.rel_hum = Some(check_feasible(rh)?);
        }
    }

    let hum_ratio = need(work.hum_ratio, "W")?;
    let rel_hum = need(work.rel_hum, "RH")?;

    let state = PsychroState {
        pair,
        pressure_pa,
        t_dry_bulb_c: tdb,
        rel_hum,
        t_wet_bulb_c: need(work.t_wet_bulb, "Twb")?,
        t_dew_point_c: need(work.t_dew_point, "Tdp")?,
        hum_ratio,
        vap_pres_pa: need(work.vap_pres, "Pv")?,
        sat_vap_pres_pa: psychro::sat_vap_pres(tdb)?,
        specific_volume: psychro::moist_air_volume(tdb, hum_ratio, pressure_pa)?,
    };
    debug!(
        "{pair}: Tdb={tdb:.2} RH={:.4} W={:.6} Twb={:.3} Tdp={:.3}",
        state.rel_hum, state.hum_ratio, state.t_wet_bulb_c, state.t_dew_point_c
    );
    Ok(state)
}
