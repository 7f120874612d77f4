// src/validation.rs
use thiserror::Error;

use crate::dtos::product::ProductForm;
use crate::models::product::{NewProduct, ProductChanges};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("{field} must be a number, got '{value}'")]
    InvalidNumber { field: &'static str, value: String },
    #[error("{field} must be a whole number, got '{value}'")]
    InvalidInteger { field: &'static str, value: String },
}

/// Blank values count as absent. Anything else is kept exactly as sent.
fn provided(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

fn required<'a>(
    value: &'a Option<String>,
    field: &'static str,
) -> Result<&'a str, ValidationError> {
    provided(value).ok_or(ValidationError::MissingField(field))
}

fn parse_number(raw: &str, field: &'static str) -> Result<f64, ValidationError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| ValidationError::InvalidNumber {
            field,
            value: raw.to_string(),
        })
}

fn parse_integer(raw: &str, field: &'static str) -> Result<i64, ValidationError> {
    raw.trim().parse::<i64>().map_err(|_| ValidationError::InvalidInteger {
        field,
        value: raw.to_string(),
    })
}

/// Checks every required field of a create request.
pub fn validate_new_product(form: &ProductForm) -> Result<NewProduct, ValidationError> {
    Ok(NewProduct {
        name: required(&form.name, "name")?.to_string(),
        description: required(&form.description, "description")?.to_string(),
        code: required(&form.code, "code")?.to_string(),
        image_path: None,
        selling_price: parse_number(
            required(&form.selling_price, "selling_price")?,
            "selling_price",
        )?,
        cost_price: parse_number(required(&form.cost_price, "cost_price")?, "cost_price")?,
        quantity: parse_integer(required(&form.quantity, "quantity")?, "quantity")?,
    })
}

/// Collects the fields an update request actually supplies.
pub fn validate_changes(form: &ProductForm) -> Result<ProductChanges, ValidationError> {
    Ok(ProductChanges {
        name: provided(&form.name).map(str::to_string),
        description: provided(&form.description).map(str::to_string),
        code: provided(&form.code).map(str::to_string),
        image_path: None,
        selling_price: provided(&form.selling_price)
            .map(|raw| parse_number(raw, "selling_price"))
            .transpose()?,
        cost_price: provided(&form.cost_price)
            .map(|raw| parse_number(raw, "cost_price"))
            .transpose()?,
        quantity: provided(&form.quantity)
            .map(|raw| parse_integer(raw, "quantity"))
            .transpose()?,
    })
}
