use uuid::Uuid;

use super::{
    field, revalidate_and_redirect, ActionOutcome, FormData, FormState, Revalidate, CUSTOMERS_PATH,
};
use crate::db::Database;
use crate::error::Result;
use crate::sql;
use crate::validation::{is_valid_email, is_valid_image_url, parse_uuid, FieldErrors};

/// A validated customer form
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerInput {
    pub name: String,
    pub email: String,
    pub image_url: Option<String>,
}

/// Check `name`, `email` and the optional `image_url`.
///
/// The image field is also accepted under `imageUrl`.
pub fn validate_customer(form: &FormData) -> std::result::Result<CustomerInput, FieldErrors> {
    let mut errors = FieldErrors::new();

    let name = field(form, "name");
    if name.is_none() {
        errors.add("name", "Name is required");
    }

    let email = field(form, "email").filter(|email| is_valid_email(email));
    if email.is_none() {
        errors.add("email", "Invalid email address");
    }

    let image_url = field(form, "image_url").or_else(|| field(form, "imageUrl"));
    if let Some(url) = image_url {
        if !is_valid_image_url(url) {
            errors.add("image_url", "Invalid image URL");
        }
    }

    match (name, email) {
        (Some(name), Some(email)) if errors.is_empty() => Ok(CustomerInput {
            name: name.to_string(),
            email: email.to_string(),
            image_url: image_url.map(str::to_string),
        }),
        _ => Err(errors),
    }
}

/// Like [`validate_customer`], plus the customer's `id`.
pub fn validate_customer_update(
    form: &FormData,
) -> std::result::Result<(Uuid, CustomerInput), FieldErrors> {
    let id = field(form, "id").and_then(parse_uuid);

    match (id, validate_customer(form)) {
        (Some(id), Ok(input)) => Ok((id, input)),
        (id, result) => {
            let mut errors = result.err().unwrap_or_default();
            if id.is_none() {
                errors.add("id", "Invalid customer id");
            }
            Err(errors)
        }
    }
}

async fn insert_customer(db: &Database, input: &CustomerInput) -> Result<u64> {
    sql!(
        "INSERT INTO customers (name, email, image_url) VALUES ({}, {}, {})",
        &input.name,
        &input.email,
        input.image_url.as_deref()
    )?
    .execute(db.get_pool())
    .await
}

async fn update_customer_row(db: &Database, id: Uuid, input: &CustomerInput) -> Result<u64> {
    sql!(
        "UPDATE customers SET name = {}, email = {}, image_url = {} WHERE id = {}",
        &input.name,
        &input.email,
        input.image_url.as_deref(),
        id
    )?
    .execute(db.get_pool())
    .await
}

pub async fn create_customer(
    db: &Database,
    cache: &impl Revalidate,
    form: &FormData,
) -> ActionOutcome {
    let input = match validate_customer(form) {
        Ok(input) => input,
        Err(errors) => {
            return ActionOutcome::State(FormState::invalid(
                errors,
                "Missing Fields. Failed to Create Customer.",
            ));
        }
    };

    if let Err(e) = insert_customer(db, &input).await {
        tracing::error!("Failed to create customer: {}", e);
        return ActionOutcome::State(FormState::message(
            "Database Error: Failed to Create Customer.",
        ));
    }

    tracing::info!(email = %input.email, "customer created");
    revalidate_and_redirect(cache, CUSTOMERS_PATH)
}

pub async fn update_customer(
    db: &Database,
    cache: &impl Revalidate,
    form: &FormData,
) -> ActionOutcome {
    let (id, input) = match validate_customer_update(form) {
        Ok(valid) => valid,
        Err(errors) => {
            return ActionOutcome::State(FormState::invalid(
                errors,
                "Missing Fields. Failed to Update Customer.",
            ));
        }
    };

    match update_customer_row(db, id, &input).await {
        Ok(0) => tracing::warn!(%id, "update matched no customer"),
        Ok(_) => tracing::info!(%id, "customer updated"),
        Err(e) => {
            tracing::error!("Database Error: {}", e);
            return ActionOutcome::State(FormState::message(
                "Database Error: Failed to Update Customer.",
            ));
        }
    }

    revalidate_and_redirect(cache, CUSTOMERS_PATH)
}

/// Fails while the customer still has invoices.
pub async fn delete_customer(db: &Database, cache: &impl Revalidate, id: Uuid) -> ActionOutcome {
    let deleted = async {
        sql!("DELETE FROM customers WHERE id = {}", id)?
            .execute(db.get_pool())
            .await
    };

    match deleted.await {
        Ok(_) => {
            cache.revalidate_path(CUSTOMERS_PATH);
            ActionOutcome::State(FormState::message("Customer deleted."))
        }
        Err(e) => {
            tracing::error!("Database Error: {}", e);
            ActionOutcome::State(FormState::message("Database Error: Failed to Delete Customer."))
        }
    }
}
