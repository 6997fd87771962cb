//! Form field metadata and the shared parse/validate rules.
//!
//! Every input schema is a flat list of numeric fields. A field is always
//! required; beyond that it is either non-negative, unbounded, or limited to
//! a small enumerated integer domain.

use serde::Serialize;

use super::Disease;

/// Numeric constraint attached to a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldConstraint {
    /// Value must be `>= 0`.
    NonNegative,
    /// Any finite value is accepted.
    Unbounded,
    /// Value must be one of the listed integers.
    OneOf(&'static [u8]),
}

impl FieldConstraint {
    /// Check a parsed value, returning the user-facing message on violation.
    fn check(&self, value: f64) -> Result<(), String> {
        match self {
            Self::NonNegative if value < 0.0 => Err("Must be 0 or greater".to_string()),
            Self::OneOf(allowed) => {
                let hit = value.fract() == 0.0 && allowed.iter().any(|&a| f64::from(a) == value);
                if hit {
                    Ok(())
                } else {
                    let listed: Vec<String> = allowed.iter().map(u8::to_string).collect();
                    Err(format!("Must be one of {}", listed.join(", ")))
                }
            }
            _ => Ok(()),
        }
    }
}

/// Static description of one input field.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// JSON key sent to the backend
    pub key: &'static str,
    /// Label shown next to the input
    pub label: &'static str,
    /// Message shown when the field is left empty
    pub required: &'static str,
    /// Placeholder hint (units or enumerated meaning)
    pub hint: &'static str,
    pub constraint: FieldConstraint,
}

impl FieldSpec {
    pub(crate) const fn non_negative(
        key: &'static str,
        label: &'static str,
        required: &'static str,
        hint: &'static str,
    ) -> Self {
        Self {
            key,
            label,
            required,
            hint,
            constraint: FieldConstraint::NonNegative,
        }
    }

    pub(crate) const fn unbounded(
        key: &'static str,
        label: &'static str,
        required: &'static str,
        hint: &'static str,
    ) -> Self {
        Self {
            key,
            label,
            required,
            hint,
            constraint: FieldConstraint::Unbounded,
        }
    }

    pub(crate) const fn one_of(
        key: &'static str,
        label: &'static str,
        required: &'static str,
        hint: &'static str,
        allowed: &'static [u8],
    ) -> Self {
        Self {
            key,
            label,
            required,
            hint,
            constraint: FieldConstraint::OneOf(allowed),
        }
    }

    fn error(&self, message: impl Into<String>) -> FieldError {
        FieldError {
            field: self.key,
            label: self.label,
            message: message.into(),
        }
    }

    /// Validate an already-numeric value against this field's rules.
    fn check(&self, value: f64) -> Result<(), FieldError> {
        if !value.is_finite() {
            return Err(self.error(format!("{} must be a number", self.label)));
        }
        self.constraint.check(value).map_err(|m| self.error(m))
    }

    /// Parse raw text entry into a value for this field.
    fn parse(&self, raw: &str) -> Result<f64, FieldError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(self.error(self.required));
        }
        let value: f64 = trimmed
            .parse()
            .map_err(|_| self.error(format!("{} must be a number", self.label)))?;
        self.check(value)?;
        Ok(value)
    }
}

/// A field-level validation message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// JSON key of the offending field
    pub field: &'static str,
    pub label: &'static str,
    pub message: String,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.label, self.message)
    }
}

/// Parse one text entry per field. Missing trailing entries count as empty.
///
/// # Errors
/// Returns every violation found, at most one per field, in form order.
pub fn parse_fields<S: AsRef<str>>(
    fields: &[FieldSpec],
    raw: &[S],
) -> Result<Vec<f64>, Vec<FieldError>> {
    let mut values = Vec::with_capacity(fields.len());
    let mut errors = Vec::new();

    for (i, spec) in fields.iter().enumerate() {
        let text = raw.get(i).map(AsRef::as_ref).unwrap_or("");
        match spec.parse(text) {
            Ok(v) => values.push(v),
            Err(e) => errors.push(e),
        }
    }

    if errors.is_empty() {
        Ok(values)
    } else {
        Err(errors)
    }
}

/// Check typed values against their field rules.
///
/// # Errors
/// Returns every violation found, in form order.
pub fn check_values(fields: &[FieldSpec], values: &[f64]) -> Result<(), Vec<FieldError>> {
    let errors: Vec<FieldError> = fields
        .iter()
        .zip(values)
        .filter_map(|(spec, &v)| spec.check(v).err())
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// A typed request body for one prediction endpoint.
pub trait PredictionInput: Serialize + Clone + Send + 'static {
    /// Disease (and therefore endpoint) this schema belongs to.
    const DISEASE: Disease;

    /// Field table in form order. `to_values`/`from_values` follow it.
    const FIELDS: &'static [FieldSpec];

    /// Build a record from values in field order.
    ///
    /// # Errors
    /// Returns error if the slice length does not match `FIELDS`.
    fn from_values(values: &[f64]) -> Result<Self, String>;

    /// Values in field order.
    fn to_values(&self) -> Vec<f64>;

    /// A representative record from the reference dataset.
    fn sample() -> Self;

    /// Check every field constraint on an already typed record.
    ///
    /// # Errors
    /// Returns the field-level messages for each violation.
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        check_values(Self::FIELDS, &self.to_values())
    }

    /// Parse text entries (one per field, in order) into a record.
    ///
    /// # Errors
    /// Returns the field-level messages for each missing, non-numeric or
    /// out-of-domain entry.
    fn parse<S: AsRef<str>>(raw: &[S]) -> Result<Self, Vec<FieldError>> {
        let values = parse_fields(Self::FIELDS, raw)?;
        Self::from_values(&values).map_err(|message| {
            vec![FieldError {
                field: "",
                label: Self::DISEASE.display_name(),
                message,
            }]
        })
    }
}

/// Check that a values slice has the expected length.
pub(crate) fn expect_len(values: &[f64], expected: usize) -> Result<(), String> {
    if values.len() == expected {
        Ok(())
    } else {
        Err(format!("Expected {} features, got {}", expected, values.len()))
    }
}
