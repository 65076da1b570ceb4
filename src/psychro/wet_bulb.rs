//! 습구온도 관련 변환. 건습구계 식(ASHRAE Ch.1 식 33, 35)과 이분법 역산.

use super::saturation::is_above_freezing;
use super::{
    check_non_negative, hum_ratio_from_rel_hum, rel_hum_from_hum_ratio, sat_hum_ratio,
    t_dew_point_from_hum_ratio, PsychroError, MAX_ITER_COUNT, MIN_HUM_RATIO, TOLERANCE_C,
};

/// 건구/습구온도 → 습도비 [kg/kg].
pub fn hum_ratio_from_t_wet_bulb(
    t_dry_bulb_c: f64,
    t_wet_bulb_c: f64,
    pressure_pa: f64,
) -> Result<f64, PsychroError> {
    if t_wet_bulb_c > t_dry_bulb_c {
        return Err(PsychroError::WetBulbAboveDryBulb {
            t_wet_bulb: t_wet_bulb_c,
            t_dry_bulb: t_dry_bulb_c,
        });
    }
    let ws_star = sat_hum_ratio(t_wet_bulb_c, pressure_pa)?;
    let (tdb, twb) = (t_dry_bulb_c, t_wet_bulb_c);
    let w = if is_above_freezing(twb) {
        ((2501.0 - 2.326 * twb) * ws_star - 1.006 * (tdb - twb))
            / (2501.0 + 1.86 * tdb - 4.186 * twb)
    } else {
        // 습구가 얼음으로 덮인 경우
        ((2830.0 - 0.24 * twb) * ws_star - 1.006 * (tdb - twb))
            / (2830.0 + 1.86 * tdb - 2.1 * twb)
    };
    Ok(w.max(MIN_HUM_RATIO))
}

/// 건구/습구온도 → 상대습도.
pub fn rel_hum_from_t_wet_bulb(
    t_dry_bulb_c: f64,
    t_wet_bulb_c: f64,
    pressure_pa: f64,
) -> Result<f64, PsychroError> {
    let w = hum_ratio_from_t_wet_bulb(t_dry_bulb_c, t_wet_bulb_c, pressure_pa)?;
    rel_hum_from_hum_ratio(t_dry_bulb_c, w, pressure_pa)
}

/// 습도비 → 습구온도 [°C]. 이슬점과 건구온도 사이를 이분법으로 탐색한다.
pub fn t_wet_bulb_from_hum_ratio(
    t_dry_bulb_c: f64,
    hum_ratio: f64,
    pressure_pa: f64,
) -> Result<f64, PsychroError> {
    let w = check_non_negative("W", hum_ratio)?.max(MIN_HUM_RATIO);
    let t_dew = t_dew_point_from_hum_ratio(t_dry_bulb_c, w, pressure_pa)?;

    let mut lo = t_dew;
    let mut hi = t_dry_bulb_c;
    let mut t_wet = (lo + hi) / 2.0;
    let mut iterations = 1;
    while hi - lo > TOLERANCE_C {
        let w_star = hum_ratio_from_t_wet_bulb(t_dry_bulb_c, t_wet, pressure_pa)?;
        if w_star > w {
            hi = t_wet;
        } else {
            lo = t_wet;
        }
        t_wet = (lo + hi) / 2.0;
        if iterations >= MAX_ITER_COUNT {
            return Err(PsychroError::NoConvergence("t_wet_bulb_from_hum_ratio"));
        }
        iterations += 1;
    }
    Ok(t_wet)
}

/// 상대습도 → 습구온도 [°C].
pub fn t_wet_bulb_from_rel_hum(
    t_dry_bulb_c: f64,
    rel_hum: f64,
    pressure_pa: f64,
) -> Result<f64, PsychroError> {
    let w = hum_ratio_from_rel_hum(t_dry_bulb_c, rel_hum, pressure_pa)?;
    t_wet_bulb_from_hum_ratio(t_dry_bulb_c, w, pressure_pa)
}
