/// Convert a land quantity in the given unit to hectares.
///
/// Unit names are matched case-insensitively against the fixed list in
/// [`crate::record::LAND_UNITS`]. Any unrecognized unit (including
/// "Hectare" itself) passes through unconverted; the pipeline never fails
/// on a unit string it does not know.
///
/// The "Square Miles" factor of 260 is carried over from the published
/// report figures and is not the reciprocal relationship the comment in
/// the books suggests; it is preserved rather than corrected.
pub fn normalize_to_hectares(quantity: f64, unit: &str) -> f64 {
    if unit.eq_ignore_ascii_case("Acre") {
        quantity * 0.404686
    } else if unit.eq_ignore_ascii_case("Bed (sq metre)")
        || unit.eq_ignore_ascii_case("Square Metres")
    {
        quantity * 0.00001
    } else if unit.eq_ignore_ascii_case("Square Feet") {
        // 107640 sqft = 1 Ha
        quantity / 107640.0
    } else if unit.eq_ignore_ascii_case("Square Miles") {
        quantity * 260.0
    } else {
        quantity
    }
}

/// Round to two decimal places, the precision the report columns use.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
