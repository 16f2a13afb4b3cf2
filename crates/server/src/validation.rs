//! Input validation for product representations.
//!
//! Length rules are declared with `validator` on the request types in [`crate::dto`]; rules the
//! derive can't express (non-blank name, non-negative decimal price) are added here into the
//! same error set, so a request reports every violation at once.

use std::borrow::Cow;

use axum::extract::{FromRequest, Request};
use axum::{async_trait, Json};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::dto::{CreateProductRequest, UpdateProductRequest};
use crate::errors::{ApiError, Violation};

/// Validation beyond the derived `Validate` rules.
pub trait CheckedInput: Validate {
    fn check_extra(&self, errors: &mut ValidationErrors);
}

fn violation(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

fn check_product_fields(name: &str, price: Decimal, errors: &mut ValidationErrors) {
    if name.trim().is_empty() {
        errors.add("name", violation("required", "Name is required."));
    }
    if price < Decimal::ZERO {
        errors.add("price", violation("range", "Price must be non-negative."));
    }
}

impl CheckedInput for CreateProductRequest {
    fn check_extra(&self, errors: &mut ValidationErrors) {
        check_product_fields(&self.name, self.price, errors);
    }
}

impl CheckedInput for UpdateProductRequest {
    fn check_extra(&self, errors: &mut ValidationErrors) {
        check_product_fields(&self.name, self.price, errors);
    }
}

/// Run all rules; `Err` lists every violation, ordered by field then message.
pub fn check<T: CheckedInput>(input: &T) -> Result<(), Vec<Violation>> {
    let mut errors = input.validate().err().unwrap_or_else(ValidationErrors::new);
    input.check_extra(&mut errors);

    let mut violations: Vec<Violation> = errors
        .errors()
        .iter()
        .flat_map(|(field, kind)| match kind {
            ValidationErrorsKind::Field(list) => list
                .iter()
                .map(|e| {
                    let message = e.message.as_deref().unwrap_or(&e.code).to_string();
                    Violation::new(field.to_string(), message)
                })
                .collect(),
            _ => Vec::new(),
        })
        .collect();

    if violations.is_empty() {
        return Ok(());
    }
    violations.sort_by(|a, b| (&a.field, &a.message).cmp(&(&b.field, &b.message)));
    Err(violations)
}

/// JSON body extractor that rejects with 400 before the handler runs when the body can't be
/// decoded or breaks a rule.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + CheckedInput,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::Validation(vec![Violation::new("body", rejection.body_text())]))?;
        check(&value).map_err(ApiError::Validation)?;
        Ok(Self(value))
    }
}
