//! 포화 수증기압(Hyland-Wexler) 및 그 역함수(이슬점).

use super::{
    check_pressure, PsychroError, FREEZING_POINT_WATER_C, MAX_ITER_COUNT, MIN_HUM_RATIO,
    MOLAR_MASS_RATIO, TOLERANCE_C, TRIPLE_POINT_WATER_C, T_MAX_C, T_MIN_C, ZERO_CELSIUS_K,
};

// 얼음 위 포화압 계수 (-100 ~ 0.01 °C)
const ICE_C: [f64; 7] = [
    -5.674_535_9e3,
    6.392_524_7,
    -9.677_843e-3,
    6.221_570_1e-7,
    2.074_782_5e-9,
    -9.484_024e-13,
    4.163_501_9,
];

// 물 위 포화압 계수 (0.01 ~ 200 °C)
const WATER_C: [f64; 6] = [
    -5.800_220_6e3,
    1.391_499_3,
    -4.864_023_9e-2,
    4.176_476_8e-5,
    -1.445_209_3e-8,
    6.545_967_3,
];

fn check_temperature(t_c: f64) -> Result<f64, PsychroError> {
    if (T_MIN_C..=T_MAX_C).contains(&t_c) {
        Ok(t_c)
    } else {
        Err(PsychroError::OutOfRange {
            quantity: "Tdb",
            value: t_c,
            min: T_MIN_C,
            max: T_MAX_C,
        })
    }
}

/// 포화 수증기압 [Pa]. 삼중점 이하에서는 얼음 기준식을 사용한다.
pub fn sat_vap_pres(t_dry_bulb_c: f64) -> Result<f64, PsychroError> {
    let t_k = check_temperature(t_dry_bulb_c)? + ZERO_CELSIUS_K;
    let ln_pws = if t_dry_bulb_c <= TRIPLE_POINT_WATER_C {
        ICE_C[0] / t_k
            + ICE_C[1]
            + ICE_C[2] * t_k
            + ICE_C[3] * t_k.powi(2)
            + ICE_C[4] * t_k.powi(3)
            + ICE_C[5] * t_k.powi(4)
            + ICE_C[6] * t_k.ln()
    } else {
        WATER_C[0] / t_k
            + WATER_C[1]
            + WATER_C[2] * t_k
            + WATER_C[3] * t_k.powi(2)
            + WATER_C[4] * t_k.powi(3)
            + WATER_C[5] * t_k.ln()
    };
    Ok(ln_pws.exp())
}

/// ln(Pws)의 온도 미분 [1/K]. 이슬점 뉴턴 반복에 사용한다.
fn d_ln_pws(t_c: f64) -> f64 {
    let t_k = t_c + ZERO_CELSIUS_K;
    if t_c <= TRIPLE_POINT_WATER_C {
        -ICE_C[0] / t_k.powi(2)
            + ICE_C[2]
            + 2.0 * ICE_C[3] * t_k
            + 3.0 * ICE_C[4] * t_k.powi(2)
            + 4.0 * ICE_C[5] * t_k.powi(3)
            + ICE_C[6] / t_k
    } else {
        -WATER_C[0] / t_k.powi(2)
            + WATER_C[2]
            + 2.0 * WATER_C[3] * t_k
            + 3.0 * WATER_C[4] * t_k.powi(2)
            + WATER_C[5] / t_k
    }
}

/// 포화 습도비 [kg/kg]. 포화곡선(RH=100%) 샘플링에 사용한다.
pub fn sat_hum_ratio(t_dry_bulb_c: f64, pressure_pa: f64) -> Result<f64, PsychroError> {
    let pressure = check_pressure(pressure_pa)?;
    let pws = sat_vap_pres(t_dry_bulb_c)?;
    if pws >= pressure {
        return Err(PsychroError::VapPresAboveTotal {
            vap_pres: pws,
            pressure,
        });
    }
    Ok((MOLAR_MASS_RATIO * pws / (pressure - pws)).max(MIN_HUM_RATIO))
}

/// 수증기 분압으로부터 이슬점 [°C]을 뉴턴 반복으로 구한다. 결과는 건구온도를 넘지 않는다.
pub fn t_dew_point_from_vap_pres(t_dry_bulb_c: f64, vap_pres_pa: f64) -> Result<f64, PsychroError> {
    let lo = sat_vap_pres(T_MIN_C)?;
    let hi = sat_vap_pres(T_MAX_C)?;
    if !(lo..=hi).contains(&vap_pres_pa) {
        return Err(PsychroError::OutOfRange {
            quantity: "Pv",
            value: vap_pres_pa,
            min: lo,
            max: hi,
        });
    }

    let ln_vp = vap_pres_pa.ln();
    let mut t_dew = t_dry_bulb_c.clamp(T_MIN_C, T_MAX_C);
    for _ in 0..MAX_ITER_COUNT {
        let t_iter = t_dew;
        let ln_vp_iter = sat_vap_pres(t_iter)?.ln();
        t_dew = (t_iter - (ln_vp_iter - ln_vp) / d_ln_pws(t_iter)).clamp(T_MIN_C, T_MAX_C);
        if (t_dew - t_iter).abs() <= TOLERANCE_C {
            return Ok(t_dew.min(t_dry_bulb_c));
        }
    }
    Err(PsychroError::NoConvergence("t_dew_point_from_vap_pres"))
}

/// 어는점(0 °C) 이상 여부. 습구 상관식의 물/얼음 분기 기준.
pub(crate) fn is_above_freezing(t_c: f64) -> bool {
    t_c >= FREEZING_POINT_WATER_C
}
