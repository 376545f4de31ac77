//! Unit normalization applied while tables are read.
//!
//! A [`UnitPolicy`] receives each column's values together with its declared unit
//! and returns the values and unit to store instead. The resolver calls it once
//! for every column, whatever the column type, so implementations pass through
//! columns they do not handle.
//!
//! Provided implementations:
//!
//! - [`IdentityPolicy`]: keeps everything as read (the default)
//! - [`ScalingPolicy`]: multiplicative rules such as `kg -> g (x1000)`
//! - any closure `FnMut(ColumnValues, &str) -> Result<(ColumnValues, String), PolicyError>`
//!
//! The unit written back by the serializer is the converted one; a conversion
//! is never undone on write.
//!
//! ## Examples
//!
//! ```rust
//! use pdtable::{ColumnValues, ScalingPolicy, UnitPolicy};
//!
//! let mut policy = ScalingPolicy::new().with_rule("kg", "g", 1000.0);
//! let (values, unit) = policy
//!     .convert(ColumnValues::from(vec![3.0, 200.0]), "kg")
//!     .unwrap();
//! assert_eq!(unit, "g");
//! assert_eq!(values.as_floats(), Some(&[Some(3000.0), Some(200000.0)][..]));
//! ```

use crate::value::ColumnValues;
use indexmap::IndexMap;

/// Error returned by a [`UnitPolicy`]; carried verbatim in [`crate::Error::UnitPolicy`].
pub type PolicyError = Box<dyn std::error::Error + Send + Sync>;

/// Converts a column's raw values and declared unit during ingestion.
///
/// Implementations may keep state between calls. One policy instance is
/// borrowed mutably for the duration of a read, so sharing an instance across
/// threads is up to the caller.
///
/// The returned values must keep the column type and the number of rows;
/// the resolver rejects results that do not.
pub trait UnitPolicy {
    fn convert(
        &mut self,
        values: ColumnValues,
        unit: &str,
    ) -> Result<(ColumnValues, String), PolicyError>;
}

/// Leaves values and units untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IdentityPolicy;

impl UnitPolicy for IdentityPolicy {
    fn convert(
        &mut self,
        values: ColumnValues,
        unit: &str,
    ) -> Result<(ColumnValues, String), PolicyError> {
        Ok((values, unit.to_string()))
    }
}

impl<F> UnitPolicy for F
where
    F: FnMut(ColumnValues, &str) -> Result<(ColumnValues, String), PolicyError>,
{
    fn convert(
        &mut self,
        values: ColumnValues,
        unit: &str,
    ) -> Result<(ColumnValues, String), PolicyError> {
        self(values, unit)
    }
}

/// Rewrites float columns by a constant factor, keyed on the declared unit.
///
/// Integer columns are left alone, since scaling generally does not produce
/// integers. Missing cells stay missing.
#[derive(Clone, Debug, Default)]
pub struct ScalingPolicy {
    rules: IndexMap<String, (String, f64)>,
    strict: bool,
}

impl ScalingPolicy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule converting `from` into `to` by multiplying with `factor`.
    #[must_use]
    pub fn with_rule(mut self, from: impl Into<String>, to: impl Into<String>, factor: f64) -> Self {
        self.rules.insert(from.into(), (to.into(), factor));
        self
    }

    /// Fails on float columns whose unit has no rule, instead of passing them through.
    /// Dimensionless (`-`) columns are always accepted.
    #[must_use]
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    #[must_use]
    pub fn rule(&self, unit: &str) -> Option<(&str, f64)> {
        self.rules.get(unit).map(|(to, factor)| (to.as_str(), *factor))
    }
}

impl UnitPolicy for ScalingPolicy {
    fn convert(
        &mut self,
        values: ColumnValues,
        unit: &str,
    ) -> Result<(ColumnValues, String), PolicyError> {
        if !matches!(values, ColumnValues::Float(_)) {
            return Ok((values, unit.to_string()));
        }
        match self.rules.get(unit) {
            Some((to, factor)) => {
                let factor = *factor;
                log::trace!("scaling '{}' to '{}' by {}", unit, to, factor);
                Ok((values.map_floats(|x| x * factor), to.clone()))
            }
            None if self.strict && unit != crate::metadata::NO_UNIT => {
                Err(format!("no conversion rule for unit '{}'", unit).into())
            }
            None => Ok((values, unit.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_policy_is_noop() {
        let values = ColumnValues::from(vec![Some(1.0), None]);
        let (out, unit) = IdentityPolicy.convert(values.clone(), "kg").unwrap();
        assert_eq!(out, values);
        assert_eq!(unit, "kg");
    }

    #[test]
    fn test_scaling_policy_ignores_non_float_columns() {
        let mut policy = ScalingPolicy::new().with_rule("kg", "g", 1000.0);
        let ints = ColumnValues::from(vec![1i64, 2]);
        let (out, unit) = policy.convert(ints.clone(), "kg").unwrap();
        assert_eq!(out, ints);
        assert_eq!(unit, "kg");
    }

    #[test]
    fn test_scaling_policy_passes_unknown_units() {
        let mut policy = ScalingPolicy::new().with_rule("kg", "g", 1000.0);
        let (_, unit) = policy
            .convert(ColumnValues::from(vec![1.0]), "km")
            .unwrap();
        assert_eq!(unit, "km");
    }

    #[test]
    fn test_strict_scaling_policy_rejects_unknown_units() {
        let mut policy = ScalingPolicy::new().with_rule("kg", "g", 1000.0).strict();
        assert!(policy.convert(ColumnValues::from(vec![1.0]), "km").is_err());
        assert!(policy.convert(ColumnValues::from(vec![1.0]), "-").is_ok());
    }

    #[test]
    fn test_closure_policy() {
        let mut calls = 0;
        let mut policy = |values: ColumnValues, unit: &str| -> Result<(ColumnValues, String), PolicyError> {
            calls += 1;
            Ok((values, unit.to_uppercase()))
        };
        let (_, unit) = policy.convert(ColumnValues::from(vec!["a"]), "km").unwrap();
        assert_eq!(unit, "KM");
        drop(policy);
        assert_eq!(calls, 1);
    }
}
