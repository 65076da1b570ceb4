//! 습도비 / 수증기 분압 / 상대습도 / 이슬점 상호 변환.

use super::{
    check_non_negative, check_pressure, check_rel_hum, sat_vap_pres, t_dew_point_from_vap_pres,
    PsychroError, MIN_HUM_RATIO, MOLAR_MASS_RATIO,
};

/// 수증기 분압 [Pa] → 습도비 [kg/kg].
pub fn hum_ratio_from_vap_pres(vap_pres_pa: f64, pressure_pa: f64) -> Result<f64, PsychroError> {
    let vap_pres = check_non_negative("Pv", vap_pres_pa)?;
    let pressure = check_pressure(pressure_pa)?;
    if vap_pres >= pressure {
        return Err(PsychroError::VapPresAboveTotal { vap_pres, pressure });
    }
    Ok((MOLAR_MASS_RATIO * vap_pres / (pressure - vap_pres)).max(MIN_HUM_RATIO))
}

/// 습도비 [kg/kg] → 수증기 분압 [Pa].
pub fn vap_pres_from_hum_ratio(hum_ratio: f64, pressure_pa: f64) -> Result<f64, PsychroError> {
    let w = check_non_negative("W", hum_ratio)?.max(MIN_HUM_RATIO);
    let pressure = check_pressure(pressure_pa)?;
    Ok(pressure * w / (MOLAR_MASS_RATIO + w))
}

/// 상대습도 → 수증기 분압 [Pa].
pub fn vap_pres_from_rel_hum(t_dry_bulb_c: f64, rel_hum: f64) -> Result<f64, PsychroError> {
    let rh = check_rel_hum(rel_hum)?;
    Ok(rh * sat_vap_pres(t_dry_bulb_c)?)
}

/// 수증기 분압 [Pa] → 상대습도. 포화압을 넘는 분압은 1보다 큰 값이 그대로 반환된다.
pub fn rel_hum_from_vap_pres(t_dry_bulb_c: f64, vap_pres_pa: f64) -> Result<f64, PsychroError> {
    let vap_pres = check_non_negative("Pv", vap_pres_pa)?;
    Ok(vap_pres / sat_vap_pres(t_dry_bulb_c)?)
}

/// 상대습도 → 습도비 [kg/kg].
pub fn hum_ratio_from_rel_hum(
    t_dry_bulb_c: f64,
    rel_hum: f64,
    pressure_pa: f64,
) -> Result<f64, PsychroError> {
    let vap_pres = vap_pres_from_rel_hum(t_dry_bulb_c, rel_hum)?;
    hum_ratio_from_vap_pres(vap_pres, pressure_pa)
}

/// 습도비 [kg/kg] → 상대습도.
pub fn rel_hum_from_hum_ratio(
    t_dry_bulb_c: f64,
    hum_ratio: f64,
    pressure_pa: f64,
) -> Result<f64, PsychroError> {
    let vap_pres = vap_pres_from_hum_ratio(hum_ratio, pressure_pa)?;
    rel_hum_from_vap_pres(t_dry_bulb_c, vap_pres)
}

/// 습도비 [kg/kg] → 이슬점 [°C].
pub fn t_dew_point_from_hum_ratio(
    t_dry_bulb_c: f64,
    hum_ratio: f64,
    pressure_pa: f64,
) -> Result<f64, PsychroError> {
    let vap_pres = vap_pres_from_hum_ratio(hum_ratio, pressure_pa)?;
    t_dew_point_from_vap_pres(t_dry_bulb_c, vap_pres)
}

/// 이슬점 [°C] → 습도비 [kg/kg].
pub fn hum_ratio_from_t_dew_point(t_dew_point_c: f64, pressure_pa: f64) -> Result<f64, PsychroError> {
    let vap_pres = sat_vap_pres(t_dew_point_c)?;
    hum_ratio_from_vap_pres(vap_pres, pressure_pa)
}

#[cfg(test)]
mod tests {
    use super::*;

    const P_ATM: f64 = 101_325.0;

    #[test]
    fn hum_ratio_and_vap_pres_are_inverse() {
        let w = hum_ratio_from_vap_pres(1_500.0, P_ATM).unwrap();
        let pv = vap_pres_from_hum_ratio(w, P_ATM).unwrap();
        assert!((pv - 1_500.0).abs() < 1e-6, "pv={pv}");
    }

    #[test]
    fn zero_vapor_pressure_floors_hum_ratio() {
        let w = hum_ratio_from_vap_pres(0.0, P_ATM).unwrap();
        assert_eq!(w, MIN_HUM_RATIO);
    }

    #[test]
    fn vapor_pressure_above_total_is_rejected() {
        assert!(matches!(
            hum_ratio_from_vap_pres(P_ATM, P_ATM),
            Err(PsychroError::VapPresAboveTotal { .. })
        ));
    }

    #[test]
    fn negative_inputs_are_rejected() {
        assert!(vap_pres_from_hum_ratio(-0.001, P_ATM).is_err());
        assert!(rel_hum_from_vap_pres(20.0, -1.0).is_err());
        assert!(vap_pres_from_rel_hum(20.0, -0.1).is_err());
    }

    #[test]
    fn dew_point_from_saturated_hum_ratio_equals_dry_bulb() {
        let w = hum_ratio_from_rel_hum(18.0, 1.0, P_ATM).unwrap();
        let t_dew = t_dew_point_from_hum_ratio(18.0, w, P_ATM).unwrap();
        assert!((t_dew - 18.0).abs() < 0.01, "t_dew={t_dew}");
    }

    #[test]
    fn dew_point_and_hum_ratio_are_inverse() {
        let w = hum_ratio_from_t_dew_point(10.0, P_ATM).unwrap();
        let t_dew = t_dew_point_from_hum_ratio(25.0, w, P_ATM).unwrap();
        assert!((t_dew - 10.0).abs() < 0.01, "t_dew={t_dew}");
    }
}
