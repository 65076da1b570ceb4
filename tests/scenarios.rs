//! 입력 스냅샷 → 계산 패스 → 결과/그래프 시나리오 테스트.
use approx::assert_relative_eq;
use psychro_calc::app::{evaluate, evaluate_named, Evaluation};
use psychro_calc::chart::SAMPLE_COUNT;
use psychro_calc::i18n::{keys, Translator};
use psychro_calc::input::{InputPair, InputSnapshot, KnownPair, PlotRange, STANDARD_PRESSURE_PA};
use psychro_calc::resolver::{resolve, ResolveError};

fn snapshot(pair: InputPair, tdb: f64, second: f64) -> InputSnapshot {
    InputSnapshot::new(
        STANDARD_PRESSURE_PA,
        KnownPair::new(pair, tdb, second),
        PlotRange::default(),
    )
}

fn assert_close(label: &str, actual: f64, expected: f64, abs_tol: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= abs_tol,
        "{label} expected {expected:.4} got {actual:.4} (diff {diff:.4}, tol {abs_tol})"
    );
}

#[test]
fn room_air_from_relative_humidity() {
    let tr = Translator::new("en");
    let Evaluation::Ready { state, report, chart } = evaluate(&snapshot(InputPair::RelHum, 25.0, 0.5), &tr)
    else {
        panic!("25 °C / 50 % must resolve");
    };
    assert_relative_eq!(state.hum_ratio, 0.00988, max_relative = 0.01);
    assert_close("Tdp", state.t_dew_point_c, 13.9, 0.14);
    assert_close("Twb", state.t_wet_bulb_c, 18.0, 0.2);
    assert_relative_eq!(state.rel_hum, 0.5, max_relative = 1e-12);

    let values: Vec<&str> = report.metrics().map(|m| m.value.as_str()).collect();
    assert_eq!(values.len(), 9);
    assert_eq!(values[0], "25.00 °C");
    assert_eq!(values[1], "50.0 %");
    assert_eq!(values[2], "101,325 Pa");
    assert!(values[3].ends_with(" kg/kg_da"));
    assert!(values[4].ends_with(" g/kg_da"));
    assert!(values[5].ends_with(" m³/kg_da"));
    assert!(report.caption.starts_with(tr.t(keys::CAPTION_PWS)));
    assert!(report.caption.ends_with(" Pa"));

    assert_eq!(chart.curve.len(), SAMPLE_COUNT);
    assert_eq!(chart.x_bounds, (0.0, 50.0));
    assert_eq!(chart.y_bounds, (0.0, 25.0));
    assert_relative_eq!(chart.state_point[1], state.hum_ratio * 1000.0);
}

#[test]
fn warm_air_from_wet_bulb() {
    let state = resolve(KnownPair::new(InputPair::WetBulb, 30.0, 24.0), STANDARD_PRESSURE_PA)
        .expect("30/24 resolves");
    // 상관식 기준 RH는 약 61.1 %
    assert!((0.59..0.615).contains(&state.rel_hum), "RH = {}", state.rel_hum);
    assert!((0.0161..=0.0165).contains(&state.hum_ratio), "W = {}", state.hum_ratio);
    assert_eq!(state.t_wet_bulb_c, 24.0);
}

#[test]
fn wet_bulb_above_dry_bulb_shows_only_error() {
    let tr = Translator::new("en");
    match evaluate(&snapshot(InputPair::WetBulb, 20.0, 25.0), &tr) {
        Evaluation::Failed { message } => {
            assert!(message.starts_with(tr.t(keys::CALC_ERROR)), "{message}");
        }
        other => panic!("expected failure, got {other:?}"),
    }
}

#[test]
fn dew_point_above_dry_bulb_is_infeasible() {
    let err = resolve(KnownPair::new(InputPair::DewPoint, 20.0, 25.0), STANDARD_PRESSURE_PA)
        .expect_err("supersaturated");
    assert!(matches!(err, ResolveError::Infeasible { rel_hum_pct } if rel_hum_pct > 100.0));
}

#[test]
fn vapor_pressure_at_total_pressure_fails() {
    let tr = Translator::new("en");
    let ev = evaluate(&snapshot(InputPair::VapPres, 25.0, STANDARD_PRESSURE_PA), &tr);
    assert!(!ev.is_ready());
}

#[test]
fn zero_humidity_boundary() {
    let state = resolve(KnownPair::new(InputPair::RelHum, 25.0, 0.0), STANDARD_PRESSURE_PA)
        .expect("dry air resolves");
    assert!(state.hum_ratio <= 1e-6);
    assert_eq!(state.vap_pres_pa, 0.0);
    assert!(state.t_dew_point_c.is_finite());
    assert!(state.t_dew_point_c >= -100.0);
    assert!(state.t_wet_bulb_c < state.t_dry_bulb_c);
}

#[test]
fn saturated_air_collapses_temperatures() {
    for tdb in [5.0, 25.0, 40.0] {
        let state = resolve(KnownPair::new(InputPair::RelHum, tdb, 1.0), STANDARD_PRESSURE_PA)
            .expect("saturated air resolves");
        assert_close("Twb", state.t_wet_bulb_c, tdb, 0.01);
        assert_close("Tdp", state.t_dew_point_c, tdb, 0.01);
    }
}

#[test]
fn identical_snapshots_evaluate_identically() {
    let tr = Translator::new("ko");
    let snap = snapshot(InputPair::HumRatio, 28.0, 0.012);
    assert_eq!(evaluate(&snap, &tr), evaluate(&snap, &tr));
}

#[test]
fn altitude_pressure_raises_hum_ratio() {
    let sea = resolve(KnownPair::new(InputPair::RelHum, 25.0, 0.5), STANDARD_PRESSURE_PA).unwrap();
    let high = resolve(KnownPair::new(InputPair::RelHum, 25.0, 0.5), 80_000.0).unwrap();
    assert!(high.hum_ratio > sea.hum_ratio);
    assert!(high.specific_volume > sea.specific_volume);
}

#[test]
fn narrow_plot_range_is_respected() {
    let tr = Translator::new("en");
    let plot = PlotRange {
        t_min_c: 10.0,
        t_max_c: 30.0,
        w_max_g_per_kg: 15.0,
    };
    let snap = InputSnapshot::new(
        STANDARD_PRESSURE_PA,
        KnownPair::defaults(InputPair::DewPoint),
        plot,
    );
    let Evaluation::Ready { chart, .. } = evaluate(&snap, &tr) else {
        panic!("default dew point mode must resolve");
    };
    assert_eq!(chart.curve.first().map(|p| p[0]), Some(10.0));
    assert_eq!(chart.curve.last().map(|p| p[0]), Some(30.0));
    assert_eq!(chart.y_bounds, (0.0, 15.0));
}

#[test]
fn unrecognized_pair_name_fails_like_a_calculation() {
    let tr = Translator::new("en");
    let mut built = false;
    let ev = evaluate_named("tdb+h", &tr, |pair| {
        built = true;
        snapshot(pair, 25.0, 0.5)
    });
    assert!(!built, "no snapshot is built for an unknown pair");
    match ev {
        Evaluation::Failed { message } => {
            assert!(message.starts_with(tr.t(keys::CALC_ERROR)), "{message}");
            assert!(message.contains("tdb+h"), "{message}");
        }
        other => panic!("expected failure, got {other:?}"),
    }
}

#[test]
fn known_pair_name_runs_the_pass() {
    let tr = Translator::new("en");
    let ev = evaluate_named("Tdb + RH", &tr, |pair| snapshot(pair, 25.0, 0.5));
    assert_eq!(ev, evaluate(&snapshot(InputPair::RelHum, 25.0, 0.5), &tr));
}

#[test]
fn nan_second_value_never_resolves_to_dry_air() {
    let tr = Translator::new("en");
    for pair in InputPair::ALL {
        let ev = evaluate(&snapshot(pair, 20.0, f64::NAN), &tr);
        assert!(
            matches!(&ev, Evaluation::Failed { message } if message.starts_with(tr.t(keys::CALC_ERROR))),
            "{pair}: {ev:?}"
        );
    }
    let err = resolve(KnownPair::new(InputPair::VapPres, 20.0, f64::NAN), STANDARD_PRESSURE_PA)
        .expect_err("NaN Pv");
    assert!(matches!(err, ResolveError::NotFinite { quantity: "Pv", .. }));
}
