//! Hyperparameter values.

use std::fmt;

/// A single hyperparameter value.
///
/// Grid axes hold lists of these; [`PipelineSpec::set_param`]
/// (crate::PipelineSpec::set_param) checks the variant against the parameter
/// it addresses.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Integer parameter (seasonal periodicity, window lengths).
    Int(i64),
    /// Floating-point parameter (smoothing coefficients, scale bounds).
    Float(f64),
    /// Boolean switch.
    Bool(bool),
    /// Named choice (forecasting strategies).
    Str(String),
}

impl ParamValue {
    /// Returns the integer payload, if this is an `Int`.
    pub fn as_int(&self) -> Option<i64> {
        match *self {
            ParamValue::Int(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the float payload; an `Int` widens losslessly.
    pub fn as_float(&self) -> Option<f64> {
        match *self {
            ParamValue::Float(v) => Some(v),
            ParamValue::Int(v) => Some(v as f64),
            _ => None,
        }
    }

    /// Returns the boolean payload, if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            ParamValue::Bool(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the string payload, if this is a `Str`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Str(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(v) => write!(f, "{v}"),
            ParamValue::Float(v) => write!(f, "{v}"),
            ParamValue::Bool(v) => write!(f, "{v}"),
            ParamValue::Str(v) => write!(f, "{v}"),
        }
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Float(v)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Str(v.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_widens_to_float() {
        assert_eq!(ParamValue::Int(4).as_float(), Some(4.0));
        assert_eq!(ParamValue::Float(0.5).as_int(), None);
    }

    #[test]
    fn display_is_bare() {
        assert_eq!(ParamValue::Str("drift".into()).to_string(), "drift");
        assert_eq!(ParamValue::Int(12).to_string(), "12");
        assert_eq!(ParamValue::Bool(false).to_string(), "false");
    }
}
