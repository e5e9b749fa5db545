use crate::write::{WriteJson, Writer};

/// `i64::MAX as f64` rounds up to 2^63, so the upper bound is exclusive.
const I64_UPPER: f64 = 9_223_372_036_854_775_808.0;

/// Whether `value` has no fractional part, up to machine epsilon.
pub(crate) fn is_integral(value: f64) -> bool {
    value.is_finite() && (value - value.trunc()).abs() < f64::EPSILON
}

pub(crate) fn as_i64(value: f64) -> Option<i64> {
    if is_integral(value) && value >= -I64_UPPER && value < I64_UPPER {
        #[allow(clippy::cast_possible_truncation)]
        Some(value.trunc() as i64)
    } else {
        None
    }
}

impl WriteJson for f64 {
    fn write_json(&self, w: &mut Writer) {
        if !self.is_finite() {
            w.put_null();
        } else if let Some(integer) = as_i64(*self) {
            w.buffer().push_str(&integer.to_string());
        } else {
            w.buffer().push_str(&self.to_string());
        }
    }
}

impl WriteJson for bool {
    fn write_json(&self, w: &mut Writer) {
        w.buffer().push_str(if *self { "true" } else { "false" });
    }
}
