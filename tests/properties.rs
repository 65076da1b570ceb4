//! 유효 입력 전 범위에 대한 불변식과 모드 간 왕복 일치.
use approx::assert_relative_eq;
use proptest::prelude::*;
use psychro_calc::input::{InputPair, KnownPair, STANDARD_PRESSURE_PA};
use psychro_calc::resolver::{resolve, PsychroState};

/// 상태에서 해당 모드의 두 번째 기지 변수를 꺼낸다.
fn second_of(state: &PsychroState, pair: InputPair) -> f64 {
    match pair {
        InputPair::RelHum => state.rel_hum,
        InputPair::WetBulb => state.t_wet_bulb_c,
        InputPair::DewPoint => state.t_dew_point_c,
        InputPair::HumRatio => state.hum_ratio,
        InputPair::VapPres => state.vap_pres_pa,
    }
}

proptest! {
    #[test]
    fn resolved_state_is_physical(tdb in 5.0f64..45.0, rh in 0.1f64..=1.0) {
        let s = resolve(KnownPair::new(InputPair::RelHum, tdb, rh), STANDARD_PRESSURE_PA).unwrap();
        prop_assert!((0.0..=1.0).contains(&s.rel_hum));
        prop_assert!(s.hum_ratio >= 0.0);
        prop_assert!(s.t_dew_point_c <= s.t_wet_bulb_c + 1e-3, "Tdp {} Twb {}", s.t_dew_point_c, s.t_wet_bulb_c);
        prop_assert!(s.t_wet_bulb_c <= s.t_dry_bulb_c);
        prop_assert!(s.vap_pres_pa <= s.sat_vap_pres_pa * (1.0 + 1e-12));
        prop_assert!(s.specific_volume > 0.0);
    }

    #[test]
    fn every_mode_reproduces_the_same_state(tdb in 5.0f64..45.0, rh in 0.1f64..=1.0) {
        let reference = resolve(KnownPair::new(InputPair::RelHum, tdb, rh), STANDARD_PRESSURE_PA).unwrap();
        for pair in InputPair::ALL {
            let known = KnownPair::new(pair, tdb, second_of(&reference, pair));
            let again = resolve(known, STANDARD_PRESSURE_PA)
                .unwrap_or_else(|e| panic!("{pair} failed for tdb={tdb} rh={rh}: {e}"));
            assert_relative_eq!(again.rel_hum, rh, max_relative = 1e-3, epsilon = 1e-4);
            assert_relative_eq!(again.hum_ratio, reference.hum_ratio, max_relative = 1e-3, epsilon = 1e-6);
            prop_assert!((again.t_dew_point_c - reference.t_dew_point_c).abs() < 0.01);
        }
    }

    #[test]
    fn moister_air_has_higher_dew_point(tdb in 5.0f64..45.0, rh in 0.1f64..0.9) {
        let dry = resolve(KnownPair::new(InputPair::RelHum, tdb, rh), STANDARD_PRESSURE_PA).unwrap();
        let wet = resolve(KnownPair::new(InputPair::RelHum, tdb, rh + 0.1), STANDARD_PRESSURE_PA).unwrap();
        prop_assert!(wet.hum_ratio > dry.hum_ratio);
        prop_assert!(wet.t_dew_point_c > dry.t_dew_point_c);
        prop_assert!(wet.t_wet_bulb_c > dry.t_wet_bulb_c);
    }
}
