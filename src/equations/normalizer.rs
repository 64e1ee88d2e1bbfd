//! Equation Normalizer
//! Converts either equation form into a canonical slope-intercept line.

use super::{EquationInput, FormKind};
use std::fmt;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EquationError {
    #[error("Invalid coefficient {field}: {reason}")]
    InvalidInput { field: String, reason: String },
    #[error("{a}x + 0y = {c} is a vertical line and has no slope-intercept form")]
    DegenerateLine { a: f64, c: f64 },
}

/// Canonical line y = slope * x + intercept.
///
/// Slope and intercept are always finite.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSpec {
    slope: f64,
    intercept: f64,
    label: String,
}

impl LineSpec {
    pub fn new(slope: f64, intercept: f64) -> Result<Self, EquationError> {
        if !slope.is_finite() {
            return Err(EquationError::InvalidInput {
                field: "slope".to_string(),
                reason: "must be a finite number".to_string(),
            });
        }
        if !intercept.is_finite() {
            return Err(EquationError::InvalidInput {
                field: "intercept".to_string(),
                reason: "must be a finite number".to_string(),
            });
        }

        let slope = positive_zero(slope);
        let intercept = positive_zero(intercept);
        Ok(Self {
            slope,
            intercept,
            label: format!(
                "y = {}x + {}",
                format_coefficient(slope),
                format_coefficient(intercept)
            ),
        })
    }

    pub fn slope(&self) -> f64 {
        self.slope
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Legend text, e.g. `y = -1x + 0`. Very large or small coefficients use
    /// exponent notation (`1e300`).
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn y_at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Where this line meets `other`.
    pub fn intersection(&self, other: &LineSpec) -> Intersection {
        if self.slope == other.slope {
            if self.intercept == other.intercept {
                Intersection::Coincident
            } else {
                Intersection::Parallel
            }
        } else {
            let x = (other.intercept - self.intercept) / (self.slope - other.slope);
            let y = self.y_at(x);
            // Nearly parallel lines can meet beyond f64 range
            if !x.is_finite() || !y.is_finite() {
                return Intersection::OutOfRange;
            }
            Intersection::Point {
                x: positive_zero(x),
                y: positive_zero(y),
            }
        }
    }
}

/// Relationship between two lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intersection {
    Point { x: f64, y: f64 },
    Parallel,
    Coincident,
    /// Slopes differ but the crossing point is not representable.
    OutOfRange,
}

impl fmt::Display for Intersection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Intersection::Point { x, y } => write!(f, "lines intersect at ({:.3}, {:.3})", x, y),
            Intersection::Parallel => f.write_str("lines are parallel"),
            Intersection::Coincident => f.write_str("lines are identical"),
            Intersection::OutOfRange => f.write_str("lines meet too far away to show"),
        }
    }
}

/// Normalize one equation to slope-intercept form.
///
/// Standard form with `b == 0` is rejected as a degenerate (vertical) line
/// before any division happens.
pub fn normalize(input: &EquationInput) -> Result<LineSpec, EquationError> {
    let line = match *input {
        EquationInput::Standard(form) => {
            require_finite("a", form.a)?;
            require_finite("b", form.b)?;
            require_finite("c", form.c)?;

            if form.b == 0.0 {
                return Err(EquationError::DegenerateLine { a: form.a, c: form.c });
            }

            let slope = -form.a / form.b;
            let intercept = form.c / form.b;
            // A subnormal b can still overflow the quotients
            if !slope.is_finite() || !intercept.is_finite() {
                return Err(EquationError::DegenerateLine { a: form.a, c: form.c });
            }
            LineSpec::new(slope, intercept)?
        }
        EquationInput::SlopeIntercept(form) => {
            require_finite("m", form.m)?;
            require_finite("b", form.b)?;
            LineSpec::new(form.m, form.b)?
        }
    };

    debug!(
        form = %input.kind(),
        slope = line.slope(),
        intercept = line.intercept(),
        "normalized equation"
    );
    Ok(line)
}

/// Normalize from a form tag and positional coefficients.
#[allow(dead_code)]
pub fn normalize_parts(kind: FormKind, coefficients: &[f64]) -> Result<LineSpec, EquationError> {
    normalize(&EquationInput::from_parts(kind, coefficients)?)
}

fn require_finite(field: &str, value: f64) -> Result<(), EquationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(EquationError::InvalidInput {
            field: field.to_string(),
            reason: "must be a finite number".to_string(),
        })
    }
}

/// Shortest decimal form, switching to exponent notation outside 1e-4..1e15.
fn format_coefficient(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-4..1e15).contains(&magnitude) {
        format!("{:e}", value)
    } else {
        format!("{}", value)
    }
}

/// Map -0.0 to 0.0 so labels never read "-0".
fn positive_zero(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}
