//! 포화곡선(RH = 100%)과 상태점 데이터. 그리기는 각 UI가 담당한다.

use crate::input::PlotRange;
use crate::psychro::{self, PsychroError};
use crate::resolver::PsychroState;

/// 포화곡선 샘플 수 (양 끝 포함)
pub const SAMPLE_COUNT: usize = 200;

/// 그래프 한 장을 그리는 데 필요한 모든 데이터. 좌표는 (°C, g/kg).
#[derive(Debug, Clone, PartialEq)]
pub struct SaturationChart {
    pub curve: Vec<[f64; 2]>,
    pub state_point: [f64; 2],
    pub x_bounds: (f64, f64),
    pub y_bounds: (f64, f64),
}

impl SaturationChart {
    pub fn new(state: &PsychroState, range: &PlotRange) -> Result<Self, PsychroError> {
        Ok(Self {
            curve: saturation_curve(range, state.pressure_pa)?,
            state_point: [state.t_dry_bulb_c, state.hum_ratio * 1000.0],
            x_bounds: (range.t_min_c, range.t_max_c),
            y_bounds: (0.0, range.w_max_g_per_kg),
        })
    }
}

/// 범위 내 균등 간격 건구온도에서 포화 습도비 [g/kg]를 계산한다.
pub fn saturation_curve(range: &PlotRange, pressure_pa: f64) -> Result<Vec<[f64; 2]>, PsychroError> {
    linspace(range.t_min_c, range.t_max_c, SAMPLE_COUNT)
        .map(|t| Ok([t, psychro::hum_ratio_from_rel_hum(t, 1.0, pressure_pa)? * 1000.0]))
        .collect()
}

fn linspace(start: f64, end: f64, n: usize) -> impl Iterator<Item = f64> {
    let step = if n > 1 { (end - start) / (n - 1) as f64 } else { 0.0 };
    (0..n).map(move |i| if i + 1 == n { end } else { start + step * i as f64 })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_hits_both_ends() {
        let xs: Vec<f64> = linspace(0.0, 50.0, SAMPLE_COUNT).collect();
        assert_eq!(xs.len(), SAMPLE_COUNT);
        assert_eq!(xs[0], 0.0);
        assert_eq!(xs[SAMPLE_COUNT - 1], 50.0);
        assert!(xs.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn curve_is_strictly_increasing() {
        let curve = saturation_curve(&PlotRange::default(), 101_325.0).unwrap();
        assert_eq!(curve.len(), SAMPLE_COUNT);
        assert!(curve.windows(2).all(|w| w[1][1] > w[0][1]));
    }
}
