//! ASHRAE Handbook Fundamentals (2017, SI) 예제 값과 IAPWS-IF97 포화선 대비 회귀 테스트.
use approx::assert_relative_eq;
use psychro_calc::chart::saturation_curve;
use psychro_calc::input::PlotRange;
use psychro_calc::psychro::{
    hum_ratio_from_rel_hum, hum_ratio_from_t_wet_bulb, moist_air_volume, sat_hum_ratio,
    sat_vap_pres, t_dew_point_from_vap_pres, PsychroError,
};

const P_STD: f64 = 101_325.0;

#[test]
fn saturation_pressure_table() {
    // ASHRAE 2017 Ch.1 Table 3
    let table = [
        (-20.0, 103.24),
        (-5.0, 401.74),
        (5.0, 872.6),
        (25.0, 3169.9),
        (50.0, 12_351.3),
        (100.0, 101_418.0),
        (150.0, 476_101.4),
    ];
    for (t, expected) in table {
        let pws = sat_vap_pres(t).expect("pws");
        assert_relative_eq!(pws, expected, max_relative = 3e-4);
    }
}

#[test]
fn saturation_pressure_matches_if97_line() {
    for t in (1..=90).map(f64::from) {
        let ours = sat_vap_pres(t).expect("pws");
        let if97_pa = seuif97::tx(t, 1.0, seuif97::OP) * 1e6;
        let rel = (ours - if97_pa).abs() / if97_pa;
        assert!(rel <= 3e-3, "t={t}: {ours:.2} Pa vs IF97 {if97_pa:.2} Pa");
    }
}

#[test]
fn saturation_hum_ratio_at_freezing_and_warm() {
    let w0 = sat_hum_ratio(0.0, P_STD).expect("ws(0)");
    assert_relative_eq!(w0, 0.00376, max_relative = 0.01);
    let w50 = sat_hum_ratio(50.0, P_STD).expect("ws(50)");
    assert!(w50 > 0.08, "ws(50) = {w50}");
    // RH = 100%와 포화 습도비는 같은 값이어야 한다
    assert_relative_eq!(hum_ratio_from_rel_hum(50.0, 1.0, P_STD).unwrap(), w50, max_relative = 1e-12);
}

#[test]
fn saturation_curve_increases_across_default_range() {
    let curve = saturation_curve(&PlotRange::default(), P_STD).expect("curve");
    assert_eq!(curve.first().map(|p| p[0]), Some(0.0));
    assert_eq!(curve.last().map(|p| p[0]), Some(50.0));
    assert!(curve.windows(2).all(|w| w[1][1] > w[0][1]));
    assert_relative_eq!(curve[0][1], 3.76, max_relative = 0.01);
}

#[test]
fn handbook_wet_bulb_example() {
    // Tdb 40 °C, Twb 20 °C, 해면 기압 → W ≈ 0.00640 (핸드북 반올림 0.0065), v ≈ 0.896 m³/kg
    let w = hum_ratio_from_t_wet_bulb(40.0, 20.0, P_STD).expect("w");
    assert_relative_eq!(w, 0.00640, max_relative = 0.005);
    let v = moist_air_volume(40.0, w, P_STD).expect("v");
    assert_relative_eq!(v, 0.896, max_relative = 0.005);
}

#[test]
fn dew_point_of_saturated_air_is_dry_bulb() {
    for t in [-10.0, 0.5, 20.0, 45.0] {
        let pws = sat_vap_pres(t).unwrap();
        let tdp = t_dew_point_from_vap_pres(t, pws).unwrap();
        assert!((tdp - t).abs() < 1e-3, "t={t} tdp={tdp}");
    }
}

#[test]
fn out_of_range_temperature_is_reported() {
    assert!(matches!(sat_vap_pres(250.0), Err(PsychroError::OutOfRange { .. })));
    assert!(matches!(sat_vap_pres(-120.0), Err(PsychroError::OutOfRange { .. })));
}
