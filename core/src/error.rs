use thiserror::Error;

// Configuration errors raised by setters, evaluation and map builders.
//
// Every variant names the module type that detected the problem so a
// failure deep inside a graph still points at the misconfigured node.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NoiseError {
    #[error("{module}: source module {index} has not been set")]
    NoSource { module: &'static str, index: usize },

    #[error("{module}: source index {index} is out of range (module takes {count} sources)")]
    SourceIndexOutOfRange {
        module: &'static str,
        index: usize,
        count: usize,
    },

    #[error("{module}: control point {value} must be greater than the previous point {previous}")]
    ControlPointOrder {
        module: &'static str,
        value: f64,
        previous: f64,
    },

    #[error("{module}: at least {required} control points are needed, {present} given")]
    TooFewControlPoints {
        module: &'static str,
        required: usize,
        present: usize,
    },

    #[error("{module}: lower bound {lower} is greater than upper bound {upper}")]
    InvalidBounds {
        module: &'static str,
        lower: f64,
        upper: f64,
    },

    #[error("{module}: invalid {parameter} {value}: {reason}")]
    InvalidParameter {
        module: &'static str,
        parameter: &'static str,
        value: f64,
        reason: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, NoiseError>;

// Shared validation used by the setters of several modules.

pub(crate) fn require_positive(
    module: &'static str,
    parameter: &'static str,
    value: f64,
) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(NoiseError::InvalidParameter {
            module,
            parameter,
            value,
            reason: "must be finite and greater than zero",
        })
    }
}

pub(crate) fn require_finite(
    module: &'static str,
    parameter: &'static str,
    value: f64,
) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(NoiseError::InvalidParameter {
            module,
            parameter,
            value,
            reason: "must be finite",
        })
    }
}

pub(crate) fn require_ordered(module: &'static str, lower: f64, upper: f64) -> Result<(f64, f64)> {
    require_finite(module, "lower bound", lower)?;
    require_finite(module, "upper bound", upper)?;
    if lower > upper {
        return Err(NoiseError::InvalidBounds { module, lower, upper });
    }
    Ok((lower, upper))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_module() {
        let err = NoiseError::NoSource { module: "Add", index: 1 };
        assert_eq!(err.to_string(), "Add: source module 1 has not been set");
    }

    #[test]
    fn positive_rejects_zero_and_nan() {
        assert!(require_positive("Perlin", "frequency", 0.0).is_err());
        assert!(require_positive("Perlin", "frequency", f64::NAN).is_err());
        assert_eq!(require_positive("Perlin", "frequency", 2.5), Ok(2.5));
    }

    #[test]
    fn ordered_rejects_inverted_bounds() {
        assert_eq!(
            require_ordered("Clamp", 1.0, -1.0),
            Err(NoiseError::InvalidBounds {
                module: "Clamp",
                lower: 1.0,
                upper: -1.0
            })
        );
        assert!(require_ordered("Clamp", 0.5, 0.5).is_ok());
    }
}
