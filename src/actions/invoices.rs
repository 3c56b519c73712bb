use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use super::{
    field, revalidate_and_redirect, ActionOutcome, FormData, FormState, Revalidate, INVOICES_PATH,
};
use crate::db::Database;
use crate::error::Result;
use crate::models::InvoiceStatus;
use crate::sql;
use crate::validation::{parse_uuid, FieldErrors};

const AMOUNT_MESSAGE: &str = "Please enter an amount greater than $0.";

/// A validated invoice form
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvoiceInput {
    pub customer_id: Uuid,
    pub amount_in_cents: i32,
    pub status: InvoiceStatus,
}

/// Check `customerId`, `amount` (dollars) and `status`.
pub fn validate_invoice(form: &FormData) -> std::result::Result<InvoiceInput, FieldErrors> {
    let mut errors = FieldErrors::new();

    let customer_id = field(form, "customerId").and_then(parse_uuid);
    if customer_id.is_none() {
        errors.add("customerId", "Please select a customer.");
    }

    let amount_in_cents = match field(form, "amount").and_then(|raw| raw.parse::<f64>().ok()) {
        Some(amount) if amount.is_finite() && amount > 0.0 => {
            let cents = (amount * 100.0).round();
            if cents < 1.0 {
                errors.add("amount", AMOUNT_MESSAGE);
                None
            } else if cents > f64::from(i32::MAX) {
                errors.add("amount", "Please enter a smaller amount.");
                None
            } else {
                Some(cents as i32)
            }
        }
        _ => {
            errors.add("amount", AMOUNT_MESSAGE);
            None
        }
    };

    let status = field(form, "status").and_then(|raw| raw.parse::<InvoiceStatus>().ok());
    if status.is_none() {
        errors.add("status", "Please select an invoice status.");
    }

    match (customer_id, amount_in_cents, status) {
        (Some(customer_id), Some(amount_in_cents), Some(status)) if errors.is_empty() => {
            Ok(InvoiceInput {
                customer_id,
                amount_in_cents,
                status,
            })
        }
        _ => Err(errors),
    }
}

async fn insert_invoice(db: &Database, input: &InvoiceInput, date: NaiveDate) -> Result<u64> {
    sql!(
        "INSERT INTO invoices (customer_id, amount, status, date) VALUES ({}, {}, {}, {})",
        input.customer_id,
        input.amount_in_cents,
        input.status.as_str(),
        date
    )?
    .execute(db.get_pool())
    .await
}

async fn update_invoice_row(db: &Database, id: Uuid, input: &InvoiceInput) -> Result<u64> {
    sql!(
        "UPDATE invoices SET customer_id = {}, amount = {}, status = {} WHERE id = {}",
        input.customer_id,
        input.amount_in_cents,
        input.status.as_str(),
        id
    )?
    .execute(db.get_pool())
    .await
}

pub async fn create_invoice(
    db: &Database,
    cache: &impl Revalidate,
    form: &FormData,
) -> ActionOutcome {
    let input = match validate_invoice(form) {
        Ok(input) => input,
        Err(errors) => {
            return ActionOutcome::State(FormState::invalid(
                errors,
                "Missing Fields. Failed to Create Invoice.",
            ));
        }
    };

    let date = Utc::now().date_naive();
    if let Err(e) = insert_invoice(db, &input, date).await {
        tracing::error!("Failed to create invoice: {}", e);
        return ActionOutcome::State(FormState::message(
            "Database Error: Failed to Create Invoice.",
        ));
    }

    tracing::info!(
        customer_id = %input.customer_id,
        cents = input.amount_in_cents,
        "invoice created"
    );
    revalidate_and_redirect(cache, INVOICES_PATH)
}

pub async fn update_invoice(
    db: &Database,
    cache: &impl Revalidate,
    id: Uuid,
    form: &FormData,
) -> ActionOutcome {
    let input = match validate_invoice(form) {
        Ok(input) => input,
        Err(errors) => {
            return ActionOutcome::State(FormState::invalid(
                errors,
                "Missing Fields. Failed to Update Invoice.",
            ));
        }
    };

    match update_invoice_row(db, id, &input).await {
        Ok(0) => tracing::warn!(%id, "update matched no invoice"),
        Ok(_) => tracing::info!(%id, "invoice updated"),
        Err(e) => {
            tracing::error!("Database Error: {}", e);
            return ActionOutcome::State(FormState::message(
                "Database Error: Failed to Update Invoice.",
            ));
        }
    }

    revalidate_and_redirect(cache, INVOICES_PATH)
}

pub async fn delete_invoice(db: &Database, cache: &impl Revalidate, id: Uuid) -> ActionOutcome {
    let deleted = async {
        sql!("DELETE FROM invoices WHERE id = {}", id)?
            .execute(db.get_pool())
            .await
    };

    match deleted.await {
        Ok(_) => {
            cache.revalidate_path(INVOICES_PATH);
            ActionOutcome::State(FormState::message("Deleted Invoice."))
        }
        Err(e) => {
            tracing::error!("Database Error: {}", e);
            ActionOutcome::State(FormState::message("Database Error: Failed to Delete Invoice."))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CUSTOMER: &str = "3958dc9e-712f-4377-85e9-fec4b6a6442a";

    fn form(customer: &str, amount: &str, status: &str) -> FormData {
        FormData::new()
            .with("customerId", customer)
            .with("amount", amount)
            .with("status", status)
    }

    #[test]
    fn valid_form_converts_dollars_to_cents() {
        let input = validate_invoice(&form(CUSTOMER, "157.95", "pending")).unwrap();

        assert_eq!(input.customer_id.to_string(), CUSTOMER);
        assert_eq!(input.amount_in_cents, 15795);
        assert_eq!(input.status, InvoiceStatus::Pending);
    }

    #[test]
    fn cents_are_rounded_not_truncated() {
        let input = validate_invoice(&form(CUSTOMER, "1.1", "paid")).unwrap();
        assert_eq!(input.amount_in_cents, 110);

        let input = validate_invoice(&form(CUSTOMER, "0.29", "paid")).unwrap();
        assert_eq!(input.amount_in_cents, 29);
    }

    #[test]
    fn amount_must_be_positive_number() {
        for amount in ["0", "-5", "", "abc", "NaN", "inf", "0.001"] {
            let errors = validate_invoice(&form(CUSTOMER, amount, "paid")).unwrap_err();
            assert_eq!(
                errors.get("amount"),
                Some(&[AMOUNT_MESSAGE.to_string()][..]),
                "amount {:?}",
                amount
            );
        }
    }

    #[test]
    fn oversized_amount_is_rejected() {
        let errors = validate_invoice(&form(CUSTOMER, "99999999999", "paid")).unwrap_err();
        assert!(errors.get("amount").is_some());
    }

    #[test]
    fn every_bad_field_is_reported() {
        let errors = validate_invoice(&FormData::new()).unwrap_err();

        assert_eq!(
            errors.get("customerId"),
            Some(&["Please select a customer.".to_string()][..])
        );
        assert!(errors.get("amount").is_some());
        assert_eq!(
            errors.get("status"),
            Some(&["Please select an invoice status.".to_string()][..])
        );
    }

    #[test]
    fn status_must_be_known() {
        let errors = validate_invoice(&form(CUSTOMER, "10", "overdue")).unwrap_err();
        assert!(errors.get("status").is_some());
        assert!(errors.get("amount").is_none());
    }

    #[test]
    fn customer_must_be_an_id() {
        let errors = validate_invoice(&form("acme", "10", "paid")).unwrap_err();
        assert!(errors.get("customerId").is_some());
    }
}
