use std::collections::BTreeMap;

use anyhow::anyhow;
use uuid::Uuid;

use crate::domain::value_objects::{
    enums::invoice_statuses::InvoiceStatus,
    iam::{SignupFormData, ValidatedRegistration},
    invoices::{InvoiceFormData, ValidatedInvoice},
};

pub const CUSTOMER_REQUIRED_MESSAGE: &str = "Please select a customer.";
pub const AMOUNT_RANGE_MESSAGE: &str = "Please enter an amount greater than $0.";
pub const STATUS_REQUIRED_MESSAGE: &str = "Please select an invoice status.";
pub const EMAIL_INVALID_MESSAGE: &str = "Please enter a valid email address.";
pub const PASSWORD_TOO_SHORT_MESSAGE: &str = "Password must be at least 6 characters long.";
pub const NAME_REQUIRED_MESSAGE: &str = "Please enter your name.";

pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Field name mapped to the messages for that field, ready to render inline
/// next to the offending input.
pub type FieldErrors = BTreeMap<&'static str, Vec<String>>;

fn push_error(errors: &mut FieldErrors, field: &'static str, message: &str) {
    errors.entry(field).or_default().push(message.to_string());
}

/// Safe-mode validation: never fails hard, collects per-field messages
/// instead. Coercion failures (non-numeric amount, malformed customer id)
/// surface as field errors, not faults.
pub fn validate_invoice(form: &InvoiceFormData) -> Result<ValidatedInvoice, FieldErrors> {
    let mut errors = FieldErrors::new();

    let customer_id = form
        .customer_id
        .as_deref()
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .and_then(|raw| Uuid::parse_str(raw).ok());
    if customer_id.is_none() {
        push_error(&mut errors, "customer_id", CUSTOMER_REQUIRED_MESSAGE);
    }

    // The stored column is a 32-bit cents value; anything that would not fit
    // after conversion is out of range, same as a non-positive amount.
    let amount = form
        .amount
        .as_deref()
        .and_then(|raw| raw.trim().parse::<f64>().ok())
        .filter(|amount| amount.is_finite() && *amount > 0.0)
        .filter(|amount| (*amount * 100.0).round() <= i32::MAX as f64);
    if amount.is_none() {
        push_error(&mut errors, "amount", AMOUNT_RANGE_MESSAGE);
    }

    let status = form.status.as_deref().and_then(InvoiceStatus::from_str);
    if status.is_none() {
        push_error(&mut errors, "status", STATUS_REQUIRED_MESSAGE);
    }

    match (customer_id, amount, status) {
        (Some(customer_id), Some(amount), Some(status)) => Ok(ValidatedInvoice {
            customer_id,
            amount,
            status,
        }),
        _ => Err(errors),
    }
}

/// Strict-mode validation for the update path. Malformed input here means
/// broken form wiring, so failure is a fault for the caller to propagate, not
/// user input to correct inline.
pub fn parse_invoice(id: &str, form: &InvoiceFormData) -> anyhow::Result<(Uuid, ValidatedInvoice)> {
    let invoice_id = Uuid::parse_str(id.trim())
        .map_err(|_| anyhow!("invoice id is not a valid uuid: {id}"))?;
    let validated = validate_invoice(form)
        .map_err(|errors| anyhow!("invoice fields failed validation: {errors:?}"))?;
    Ok((invoice_id, validated))
}

/// Safe-mode validation for signup input. Runs before any hashing or store
/// access so invalid input never pays the hash cost.
pub fn validate_registration(
    form: &SignupFormData,
) -> Result<ValidatedRegistration, FieldErrors> {
    let mut errors = FieldErrors::new();

    let email = form
        .email
        .as_deref()
        .map(str::trim)
        .filter(|email| is_valid_email(email));
    if email.is_none() {
        push_error(&mut errors, "email", EMAIL_INVALID_MESSAGE);
    }

    let password = form
        .password
        .as_deref()
        .filter(|password| password.chars().count() >= MIN_PASSWORD_LENGTH);
    if password.is_none() {
        push_error(&mut errors, "password", PASSWORD_TOO_SHORT_MESSAGE);
    }

    // Presence only; an empty display name is accepted.
    let name = form.name.as_deref();
    if name.is_none() {
        push_error(&mut errors, "name", NAME_REQUIRED_MESSAGE);
    }

    match (email, password, name) {
        (Some(email), Some(password), Some(name)) => Ok(ValidatedRegistration {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }),
        _ => Err(errors),
    }
}

fn is_valid_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}
