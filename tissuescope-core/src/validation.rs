pub struct Validator;

impl Validator {
    pub fn within(value: f64, bounds: (f64, f64)) -> bool {
        value.is_finite() && value >= bounds.0 && value <= bounds.1
    }

    pub fn validate_range(lo: f64, hi: f64, bounds: (f64, f64)) -> bool {
        Self::within(lo, bounds) && Self::within(hi, bounds) && lo < hi
    }

    /// `#rrggbb` colour accepted for laser overlays.
    pub fn validate_color(color: &str) -> bool {
        dataset::laser::parse_hex_color(color).is_some()
    }
}
