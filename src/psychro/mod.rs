//! 습공기(psychrometric) 물성 상관식 모음. ASHRAE Handbook Fundamentals (2017, SI) 기준.
//!
//! 단위: 온도 °C, 압력 Pa, 습도비 kg수증기/kg건공기, 상대습도 0~1 분율.
//! 모든 함수는 유효 범위를 벗어난 입력에 대해 [`PsychroError`]를 반환하며 값을 임의로 보정하지 않는다
//! (습도비 하한 `MIN_HUM_RATIO` 적용은 예외).

pub mod humidity;
pub mod moist_air;
pub mod saturation;
pub mod wet_bulb;

pub use humidity::*;
pub use moist_air::*;
pub use saturation::*;
pub use wet_bulb::*;

/// 건공기 기체상수 [J/kg·K]
pub const R_DA: f64 = 287.042;
/// 수증기/건공기 몰질량비
pub const MOLAR_MASS_RATIO: f64 = 0.621_945;
/// 습도비 하한. 0 습도비에서 로그가 발산하지 않도록 한다.
pub const MIN_HUM_RATIO: f64 = 1e-7;
/// 반복 계산 최대 횟수
pub const MAX_ITER_COUNT: usize = 100;
/// 온도 반복 계산 수렴 허용오차 [°C]
pub const TOLERANCE_C: f64 = 0.001;
/// 포화압 상관식 유효 하한 [°C]
pub const T_MIN_C: f64 = -100.0;
/// 포화압 상관식 유효 상한 [°C]
pub const T_MAX_C: f64 = 200.0;

pub(crate) const ZERO_CELSIUS_K: f64 = 273.15;
pub(crate) const TRIPLE_POINT_WATER_C: f64 = 0.01;
pub(crate) const FREEZING_POINT_WATER_C: f64 = 0.0;

/// 상관식 계산 중 발생 가능한 오류.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PsychroError {
    /// 입력이 상관식 유효 범위 밖
    #[error("{quantity} = {value} 값이 유효 범위 [{min}, {max}]를 벗어났습니다")]
    OutOfRange {
        quantity: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    /// 음수가 될 수 없는 물리량에 음수 입력
    #[error("{quantity}는 음수일 수 없습니다 ({value})")]
    Negative { quantity: &'static str, value: f64 },
    /// 전압이 0 이하
    #[error("전압은 양수여야 합니다 ({0} Pa)")]
    NonPositivePressure(f64),
    /// 습구온도 > 건구온도
    #[error("습구온도({t_wet_bulb} °C)가 건구온도({t_dry_bulb} °C)보다 높습니다")]
    WetBulbAboveDryBulb { t_wet_bulb: f64, t_dry_bulb: f64 },
    /// 수증기 분압 >= 전압
    #[error("수증기 분압({vap_pres} Pa)이 전압({pressure} Pa) 이상입니다")]
    VapPresAboveTotal { vap_pres: f64, pressure: f64 },
    /// 반복 계산 미수렴
    #[error("{0}: 반복 계산이 수렴하지 않았습니다")]
    NoConvergence(&'static str),
}

pub(crate) fn check_non_negative(quantity: &'static str, value: f64) -> Result<f64, PsychroError> {
    if value < 0.0 || value.is_nan() {
        return Err(PsychroError::Negative { quantity, value });
    }
    Ok(value)
}

pub(crate) fn check_pressure(pressure: f64) -> Result<f64, PsychroError> {
    if pressure > 0.0 {
        Ok(pressure)
    } else {
        Err(PsychroError::NonPositivePressure(pressure))
    }
}

pub(crate) fn check_rel_hum(rel_hum: f64) -> Result<f64, PsychroError> {
    if (0.0..=1.0).contains(&rel_hum) {
        Ok(rel_hum)
    } else {
        Err(PsychroError::OutOfRange {
            quantity: "RH",
            value: rel_hum,
            min: 0.0,
            max: 1.0,
        })
    }
}
