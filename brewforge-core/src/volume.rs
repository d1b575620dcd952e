use crate::numeric::{floor_positive, liters_to_gallons, EPSILON, THERMAL_CONTRACTION};
use brewforge_schemas::equipment::EquipmentParams;
use tracing::debug;

/// Kettle volume left after the boil, in liters.
///
/// `boiled_off = boil_size * evaporation_rate/100 * boil_time/60`, and the
/// remainder is shrunk by the thermal-contraction factor. The result is
/// floored at [`EPSILON`] so it is always usable as a divisor.
pub fn post_boil_volume_liters(params: &EquipmentParams) -> f64 {
    let boil_size = floor_positive(params.boil_size, EPSILON);
    let evaporation = floor_positive(params.evaporation_rate, EPSILON) / 100.0;
    let hours = floor_positive(params.boil_time, EPSILON) / 60.0;

    let boiled_off = boil_size * evaporation * hours;
    let post_boil = (boil_size - boiled_off) * THERMAL_CONTRACTION;
    debug!(boil_size, boiled_off, post_boil, "post-boil volume");
    floor_positive(post_boil, EPSILON)
}

pub fn post_boil_volume_gallons(params: &EquipmentParams) -> f64 {
    liters_to_gallons(post_boil_volume_liters(params))
}
