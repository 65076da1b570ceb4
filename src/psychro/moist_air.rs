//! 습공기 비체적.

use super::{check_non_negative, check_pressure, PsychroError, MIN_HUM_RATIO, R_DA, ZERO_CELSIUS_K};

/// 건공기 1 kg당 습공기 비체적 [m³/kg_da]. 이상기체 근사 (ASHRAE Ch.1 식 26).
pub fn moist_air_volume(
    t_dry_bulb_c: f64,
    hum_ratio: f64,
    pressure_pa: f64,
) -> Result<f64, PsychroError> {
    let w = check_non_negative("W", hum_ratio)?.max(MIN_HUM_RATIO);
    let pressure = check_pressure(pressure_pa)?;
    Ok(R_DA * (t_dry_bulb_c + ZERO_CELSIUS_K) * (1.0 + 1.607_858 * w) / pressure)
}
