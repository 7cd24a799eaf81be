// Copyright (c) 2024 Botho Foundation

//! Validation of a single transaction against a pool snapshot.

mod error;
mod validate;

pub use self::{
    error::{TransactionValidationError, TransactionValidationResult},
    validate::{
        is_valid, validate, validate_inputs, validate_output_values_are_non_negative,
        validate_value_is_conserved,
    },
};
