//! Equation Input Forms
//! Coefficient containers for standard form (ax + by = c) and
//! slope-intercept form (y = mx + b), plus the text-field state the
//! control panel edits.

use super::EquationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which form the user entered an equation in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FormKind {
    /// ax + by = c
    #[default]
    Standard,
    /// y = mx + b
    #[serde(rename = "Slope-Intercept", alias = "SlopeIntercept")]
    SlopeIntercept,
}

impl FormKind {
    pub const ALL: [FormKind; 2] = [FormKind::Standard, FormKind::SlopeIntercept];

    /// Name shown in the form selector.
    pub fn display_name(self) -> &'static str {
        match self {
            FormKind::Standard => "Standard",
            FormKind::SlopeIntercept => "Slope-Intercept",
        }
    }

    /// Coefficient names in the order `EquationInput::from_parts` expects them.
    pub fn coefficient_names(self) -> &'static [&'static str] {
        match self {
            FormKind::Standard => &["a", "b", "c"],
            FormKind::SlopeIntercept => &["m", "b"],
        }
    }
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// ax + by = c
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandardForm {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

/// y = mx + b
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlopeInterceptForm {
    pub m: f64,
    pub b: f64,
}

/// One equation as entered by the user, ready for normalization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EquationInput {
    Standard(StandardForm),
    SlopeIntercept(SlopeInterceptForm),
}

impl EquationInput {
    pub fn standard(a: f64, b: f64, c: f64) -> Self {
        EquationInput::Standard(StandardForm { a, b, c })
    }

    pub fn slope_intercept(m: f64, b: f64) -> Self {
        EquationInput::SlopeIntercept(SlopeInterceptForm { m, b })
    }

    pub fn kind(&self) -> FormKind {
        match self {
            EquationInput::Standard(_) => FormKind::Standard,
            EquationInput::SlopeIntercept(_) => FormKind::SlopeIntercept,
        }
    }

    /// Build an input from a form tag and positional coefficients.
    ///
    /// Standard expects `[a, b, c]`, slope-intercept expects `[m, b]`.
    pub fn from_parts(kind: FormKind, coefficients: &[f64]) -> Result<Self, EquationError> {
        let names = kind.coefficient_names();

        if let Some(missing) = names.get(coefficients.len()) {
            return Err(EquationError::InvalidInput {
                field: (*missing).to_string(),
                reason: "missing value".to_string(),
            });
        }
        if coefficients.len() > names.len() {
            return Err(EquationError::InvalidInput {
                field: "coefficients".to_string(),
                reason: format!(
                    "{} form takes {} coefficients, got {}",
                    kind,
                    names.len(),
                    coefficients.len()
                ),
            });
        }

        Ok(match kind {
            FormKind::Standard => {
                Self::standard(coefficients[0], coefficients[1], coefficients[2])
            }
            FormKind::SlopeIntercept => Self::slope_intercept(coefficients[0], coefficients[1]),
        })
    }
}

/// Parse a single coefficient from a text field.
pub fn parse_coefficient(field: &str, text: &str) -> Result<f64, EquationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(EquationError::InvalidInput {
            field: field.to_string(),
            reason: "missing value".to_string(),
        });
    }

    let value: f64 = trimmed.parse().map_err(|_| EquationError::InvalidInput {
        field: field.to_string(),
        reason: format!("'{}' is not a number", trimmed),
    })?;

    // "inf" and "NaN" parse fine but are not coefficients
    if !value.is_finite() {
        return Err(EquationError::InvalidInput {
            field: field.to_string(),
            reason: "must be a finite number".to_string(),
        });
    }

    Ok(value)
}

/// Text-field state for one equation editor.
///
/// Both forms keep their own fields so switching the selector back and forth
/// does not lose what was typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EquationFields {
    pub form: FormKind,
    pub a: String,
    pub b: String,
    pub c: String,
    pub m: String,
    pub intercept: String,
}

impl Default for EquationFields {
    fn default() -> Self {
        Self::standard("1", "1", "0")
    }
}

impl EquationFields {
    pub fn standard(a: &str, b: &str, c: &str) -> Self {
        Self {
            form: FormKind::Standard,
            a: a.to_string(),
            b: b.to_string(),
            c: c.to_string(),
            m: "1".to_string(),
            intercept: "0".to_string(),
        }
    }

    #[allow(dead_code)]
    pub fn slope_intercept(m: &str, intercept: &str) -> Self {
        Self {
            form: FormKind::SlopeIntercept,
            m: m.to_string(),
            intercept: intercept.to_string(),
            ..Self::standard("1", "1", "0")
        }
    }

    /// Parse the fields of the selected form, reporting the first bad one.
    pub fn to_input(&self) -> Result<EquationInput, EquationError> {
        EquationInput::from_parts(self.form, &self.coefficients()?)
    }

    /// Parsed coefficients of the selected form, in `from_parts` order.
    pub fn coefficients(&self) -> Result<Vec<f64>, EquationError> {
        match self.form {
            FormKind::Standard => Ok(vec![
                parse_coefficient("A", &self.a)?,
                parse_coefficient("B", &self.b)?,
                parse_coefficient("C", &self.c)?,
            ]),
            FormKind::SlopeIntercept => Ok(vec![
                parse_coefficient("slope (m)", &self.m)?,
                parse_coefficient("y-intercept (b)", &self.intercept)?,
            ]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coefficient_accepts_padded_numbers() {
        assert_eq!(parse_coefficient("a", "  2.5 ").unwrap(), 2.5);
        assert_eq!(parse_coefficient("a", "-3").unwrap(), -3.0);
        assert_eq!(parse_coefficient("a", "1e2").unwrap(), 100.0);
    }

    #[test]
    fn test_parse_coefficient_rejects_missing_and_garbage() {
        let err = parse_coefficient("B", "   ").unwrap_err();
        assert_eq!(
            err,
            EquationError::InvalidInput {
                field: "B".to_string(),
                reason: "missing value".to_string(),
            }
        );

        let err = parse_coefficient("C", "two").unwrap_err();
        assert!(err.to_string().contains("'two' is not a number"));
        assert!(err.to_string().contains('C'));
    }

    #[test]
    fn test_parse_coefficient_rejects_non_finite() {
        assert!(parse_coefficient("m", "inf").is_err());
        assert!(parse_coefficient("m", "NaN").is_err());
    }

    #[test]
    fn test_from_parts_checks_coefficient_count() {
        let input = EquationInput::from_parts(FormKind::Standard, &[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(input, EquationInput::standard(1.0, 2.0, 3.0));

        let input = EquationInput::from_parts(FormKind::SlopeIntercept, &[4.0, 5.0]).unwrap();
        assert_eq!(input, EquationInput::slope_intercept(4.0, 5.0));

        match EquationInput::from_parts(FormKind::Standard, &[1.0, 2.0]) {
            Err(EquationError::InvalidInput { field, .. }) => assert_eq!(field, "c"),
            other => panic!("expected missing c, got {:?}", other),
        }

        assert!(EquationInput::from_parts(FormKind::SlopeIntercept, &[1.0, 2.0, 3.0]).is_err());
    }

    #[test]
    fn test_fields_use_selected_form_only() {
        let mut fields = EquationFields::slope_intercept("-1", "0");
        fields.a = "not used".to_string();
        assert_eq!(fields.to_input().unwrap(), EquationInput::slope_intercept(-1.0, 0.0));

        fields.form = FormKind::Standard;
        assert!(fields.to_input().is_err());
    }

    #[test]
    fn test_form_kind_serde_names() {
        let json = serde_json::to_string(&FormKind::SlopeIntercept).unwrap();
        assert_eq!(json, "\"Slope-Intercept\"");
        let kind: FormKind = serde_json::from_str("\"SlopeIntercept\"").unwrap();
        assert_eq!(kind, FormKind::SlopeIntercept);
    }

    #[test]
    fn test_coefficients_match_from_parts_order() {
        let fields = EquationFields::standard("2", " -1 ", "4.5");
        assert_eq!(fields.coefficients().unwrap(), vec![2.0, -1.0, 4.5]);
        assert_eq!(fields.to_input().unwrap(), EquationInput::standard(2.0, -1.0, 4.5));

        let fields = EquationFields::slope_intercept("3", "");
        match fields.coefficients() {
            Err(EquationError::InvalidInput { field, reason }) => {
                assert_eq!(field, "y-intercept (b)");
                assert_eq!(reason, "missing value");
            }
            other => panic!("expected missing intercept, got {:?}", other),
        }
    }
}
