//! Monotonic series transformations applied before scoring.

use std::str::FromStr;

use crate::error::ObjectiveError;

/// Element-wise transformation applied to both series before a metric.
///
/// Log and sqrt emphasise low-flow fit; both reject values outside their
/// domain instead of producing NaN.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Transform {
    /// Score the raw series.
    #[default]
    None,
    /// Score `ln(x)`; requires strictly positive values.
    Log,
    /// Score `sqrt(x)`; requires non-negative values.
    Sqrt,
}

impl Transform {
    /// All transformation names, in display order.
    pub const NAMES: &'static [&'static str] = &["none", "log", "sqrt"];

    /// Returns the lowercase name of this transformation.
    pub fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Log => "log",
            Self::Sqrt => "sqrt",
        }
    }

    /// Applies the transformation element-wise.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectiveError::NonPositiveLog`] for `Log` on a value
    /// `<= 0` and [`ObjectiveError::NegativeSqrt`] for `Sqrt` on a negative
    /// value.
    pub fn apply(self, values: &[f64]) -> Result<Vec<f64>, ObjectiveError> {
        match self {
            Self::None => Ok(values.to_vec()),
            Self::Log => values
                .iter()
                .enumerate()
                .map(|(index, &value)| {
                    if value <= 0.0 {
                        Err(ObjectiveError::NonPositiveLog { index, value })
                    } else {
                        Ok(value.ln())
                    }
                })
                .collect(),
            Self::Sqrt => values
                .iter()
                .enumerate()
                .map(|(index, &value)| {
                    if value < 0.0 {
                        Err(ObjectiveError::NegativeSqrt { index, value })
                    } else {
                        Ok(value.sqrt())
                    }
                })
                .collect(),
        }
    }
}

impl FromStr for Transform {
    type Err = ObjectiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "log" => Ok(Self::Log),
            "sqrt" => Ok(Self::Sqrt),
            _ => Err(ObjectiveError::UnknownTransform {
                name: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn none_is_identity() {
        let values = [0.0, 1.5, 100.0];
        assert_eq!(Transform::None.apply(&values).unwrap(), values.to_vec());
    }

    #[test]
    fn log_transforms_positive_values() {
        let out = Transform::Log.apply(&[1.0, std::f64::consts::E]).unwrap();
        assert_relative_eq!(out[0], 0.0);
        assert_relative_eq!(out[1], 1.0);
    }

    #[test]
    fn log_rejects_zero() {
        assert!(matches!(
            Transform::Log.apply(&[1.0, 0.0]),
            Err(ObjectiveError::NonPositiveLog { index: 1, value }) if value == 0.0
        ));
    }

    #[test]
    fn log_rejects_negative() {
        assert!(matches!(
            Transform::Log.apply(&[-0.1]),
            Err(ObjectiveError::NonPositiveLog { index: 0, .. })
        ));
    }

    #[test]
    fn sqrt_transforms_non_negative_values() {
        let out = Transform::Sqrt.apply(&[0.0, 4.0, 9.0]).unwrap();
        assert_eq!(out, vec![0.0, 2.0, 3.0]);
    }

    #[test]
    fn sqrt_rejects_negative() {
        assert!(matches!(
            Transform::Sqrt.apply(&[4.0, -1.0]),
            Err(ObjectiveError::NegativeSqrt { index: 1, .. })
        ));
    }

    #[test]
    fn transform_from_str() {
        assert_eq!("log".parse::<Transform>().unwrap(), Transform::Log);
        assert_eq!("SQRT".parse::<Transform>().unwrap(), Transform::Sqrt);
        assert_eq!("none".parse::<Transform>().unwrap(), Transform::None);
        assert!(matches!(
            "cube".parse::<Transform>(),
            Err(ObjectiveError::UnknownTransform { name }) if name == "cube"
        ));
    }
}
