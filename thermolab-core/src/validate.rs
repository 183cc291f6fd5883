//! Field-level validation helpers shared by the configuration structs.
//!
//! Each `chk_*` helper pushes a descriptive error onto a [`ValidationErrors`]
//! list so a single pass reports every offending field.

use crate::combo_error::ComboErrors;
use anyhow::anyhow;

pub type ValidationError = anyhow::Error;
pub type ValidationErrors = ComboErrors<ValidationError>;
pub type ValidationResults = Result<(), ValidationErrors>;

/// Specify when an object is valid
pub trait ObjState {
    fn validate(&self) -> ValidationResults {
        Ok(())
    }

    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// Validates `field_val` as a nested object, indenting its errors under `field_name`
pub fn validate_field<T: ObjState>(errors: &mut ValidationErrors, field_val: &T, field_name: &str) {
    if let Err(mut errors_add) = field_val.validate() {
        errors_add.add_context(anyhow!("{} must be valid!", field_name));
        errors.append(&mut errors_add);
    }
}

/// Check that value is finite and greater than or equal to zero
pub fn chk_num_gez_fin(errors: &mut ValidationErrors, field_val: f64, field_name: &str) {
    if !(field_val >= 0.0 && field_val.is_finite()) {
        errors.push(anyhow!(
            "{} = {:?} must be a finite positive number!",
            field_name,
            field_val
        ));
    }
}

/// Check that value is finite and strictly greater than zero
pub fn chk_num_gtz_fin(errors: &mut ValidationErrors, field_val: f64, field_name: &str) {
    if !(field_val > 0.0 && field_val.is_finite()) {
        errors.push(anyhow!(
            "{} = {:?} must be a finite number larger than zero!",
            field_name,
            field_val
        ));
    }
}

/// Check that an efficiency lies in (0, 1]
pub fn chk_eff(errors: &mut ValidationErrors, field_val: f64, field_name: &str) {
    if !(field_val > 0.0 && field_val <= 1.0) {
        errors.push(anyhow!(
            "{} = {:?} must be an efficiency in (0, 1]!",
            field_name,
            field_val
        ));
    }
}

/// Check that value lies in the closed interval [`lo`, `hi`]
pub fn chk_num_in_range(
    errors: &mut ValidationErrors,
    field_val: f64,
    lo: f64,
    hi: f64,
    field_name: &str,
) {
    if !(lo..=hi).contains(&field_val) {
        errors.push(anyhow!(
            "{} = {:?} must lie within [{}, {}]!",
            field_name,
            field_val,
            lo,
            hi
        ));
    }
}

macro_rules! early_err {
    ($errors:expr, $name:expr) => {
        if !$errors.is_empty() {
            $errors.push(anyhow!("{} validation unfinished!", $name));
            return Err($errors);
        }
    };
}

pub(crate) use early_err;
