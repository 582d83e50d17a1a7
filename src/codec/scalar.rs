//! Canonical text forms of the supported scalar types.
//!
//! The [`ScalarText`] trait is implemented for `bool`, `i32`, `i64`, `f32`,
//! `f64` and `String`. Each implementation writes the canonical form used in
//! `data` and `default` elements and parses it back. Parsing is slightly more
//! lenient than writing (`1`/`0` booleans, `inf`/`infinity` floats), writing is
//! always canonical so that a read-then-write cycle reproduces the same text.

use crate::{attributes::ScalarKind, Result};

/// Trait for scalar types with a canonical GraphML text form.
pub trait ScalarText: Sized + Clone + PartialEq + Send + Sync + 'static {
    /// The GraphML attribute type of this scalar.
    const KIND: ScalarKind;

    /// Appends the canonical text form of `self` to `out`.
    fn write_text(&self, out: &mut String);

    /// Parses a value from its text form.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Malformed`] if `text` is not a valid value of this type.
    fn read_text(text: &str) -> Result<Self>;
}

impl ScalarText for bool {
    const KIND: ScalarKind = ScalarKind::Boolean;

    fn write_text(&self, out: &mut String) {
        out.push_str(if *self { "true" } else { "false" });
    }

    fn read_text(text: &str) -> Result<Self> {
        match text.trim() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            other => Err(malformed_error!("invalid boolean value '{}'", other)),
        }
    }
}

macro_rules! integer_scalar {
    ($ty:ty, $kind:expr) => {
        impl ScalarText for $ty {
            const KIND: ScalarKind = $kind;

            fn write_text(&self, out: &mut String) {
                out.push_str(&self.to_string());
            }

            fn read_text(text: &str) -> Result<Self> {
                let trimmed = text.trim();
                trimmed.parse::<$ty>().map_err(|error| {
                    malformed_error!(
                        "invalid {} value '{}' - {}",
                        $kind,
                        trimmed,
                        error
                    )
                })
            }
        }
    };
}

integer_scalar!(i32, ScalarKind::Int);
integer_scalar!(i64, ScalarKind::Long);

macro_rules! float_scalar {
    ($ty:ty, $kind:expr) => {
        impl ScalarText for $ty {
            const KIND: ScalarKind = $kind;

            fn write_text(&self, out: &mut String) {
                if self.is_nan() {
                    out.push_str("NaN");
                } else if self.is_infinite() {
                    out.push_str(if self.is_sign_positive() { "INF" } else { "-INF" });
                } else if *self != 0.0 && !(1e-5..1e16).contains(&self.abs()) {
                    // exponent form outside [1e-5, 1e16)
                    out.push_str(&format!("{self:e}"));
                } else {
                    out.push_str(&self.to_string());
                }
            }

            fn read_text(text: &str) -> Result<Self> {
                let trimmed = text.trim();
                match trimmed {
                    "INF" => return Ok(<$ty>::INFINITY),
                    "-INF" => return Ok(<$ty>::NEG_INFINITY),
                    _ => {}
                }

                // Rust's own parser covers NaN, inf and infinity in any case
                trimmed.parse::<$ty>().map_err(|error| {
                    malformed_error!(
                        "invalid {} value '{}' - {}",
                        $kind,
                        trimmed,
                        error
                    )
                })
            }
        }
    };
}

float_scalar!(f32, ScalarKind::Float);
float_scalar!(f64, ScalarKind::Double);

impl ScalarText for String {
    const KIND: ScalarKind = ScalarKind::String;

    fn write_text(&self, out: &mut String) {
        out.push_str(self);
    }

    fn read_text(text: &str) -> Result<Self> {
        Ok(text.to_string())
    }
}

/// Returns the canonical text form of a scalar.
#[must_use]
pub fn to_text<T: ScalarText>(value: &T) -> String {
    let mut out = String::new();
    value.write_text(&mut out);
    out
}
