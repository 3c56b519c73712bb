mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use invoice_dashboard::actions::{self, ActionOutcome, FormData, LogRevalidator};
use invoice_dashboard::utils::{
    format_currency, format_date_to_local, generate_pagination, generate_y_axis, PageItem,
};
use invoice_dashboard::{get_client, logging, Database};

use crate::cli::{Cli, Command, CustomerCommand, CustomerFields, InvoiceCommand, InvoiceFields};

const LOCALE: &str = "en-US";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);

    let db = get_client()
        .await
        .context("could not connect to the database (is DATABASE_URL set?)")?;

    match cli.command {
        Command::Migrate => {
            db.migrate().await?;
            println!("Schema is up to date");
        }
        Command::Dashboard => show_dashboard(db, cli.json).await?,
        Command::Invoices(command) => run_invoices(db, command, cli.json).await?,
        Command::Customers(command) => run_customers(db, command, cli.json).await?,
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn pagination_line(page: i64, total_pages: i64) -> String {
    let current = u32::try_from(page.max(1)).unwrap_or(u32::MAX);
    let total = u32::try_from(total_pages.max(0)).unwrap_or(u32::MAX);
    let pages: Vec<String> = generate_pagination(current, total)
        .iter()
        .map(|item| match item {
            PageItem::Page(n) if *n == current => format!("[{}]", n),
            item => item.to_string(),
        })
        .collect();
    format!("Pages: {}", pages.join(" "))
}

async fn show_dashboard(db: &Database, json: bool) -> Result<()> {
    let (revenue, cards, latest) = tokio::try_join!(
        db.fetch_revenue(),
        db.fetch_card_data(),
        db.fetch_latest_invoices(),
    )?;
    let (y_axis, top_label) = generate_y_axis(&revenue);

    if json {
        return print_json(&serde_json::json!({
            "cards": cards,
            "revenue": revenue,
            "y_axis": { "labels": y_axis, "top": top_label },
            "latest_invoices": latest,
        }));
    }

    println!("Collected   {}", cards.total_paid_invoices);
    println!("Pending     {}", cards.total_pending_invoices);
    println!("Invoices    {}", cards.number_of_invoices);
    println!("Customers   {}", cards.number_of_customers);
    println!();

    println!("Recent revenue (axis {})", y_axis.join(" "));
    for month in &revenue {
        println!("  {:<4} {}", month.month, format_currency(i64::from(month.revenue) * 100));
    }
    println!();

    println!("Latest invoices");
    for invoice in &latest {
        println!("  {:<24} {:<28} {:>12}", invoice.name, invoice.email, invoice.amount);
    }

    Ok(())
}

fn invoice_form(fields: InvoiceFields) -> FormData {
    FormData::new()
        .with("customerId", fields.customer_id)
        .with("amount", fields.amount)
        .with("status", fields.status)
}

fn customer_form(fields: CustomerFields) -> FormData {
    let form = FormData::new()
        .with("name", fields.name)
        .with("email", fields.email);
    match fields.image_url {
        Some(url) => form.with("image_url", url),
        None => form,
    }
}

fn report(outcome: &ActionOutcome, json: bool) -> Result<()> {
    if json {
        return print_json(outcome);
    }

    match outcome {
        ActionOutcome::Redirect { location } => println!("Saved. Continue at {}", location),
        ActionOutcome::State(state) => {
            if let Some(message) = &state.message {
                println!("{}", message);
            }
            for (field, messages) in state.errors.fields() {
                for message in messages {
                    println!("  {}: {}", field, message);
                }
            }
        }
    }
    Ok(())
}

async fn run_invoices(db: &Database, command: InvoiceCommand, json: bool) -> Result<()> {
    let cache = LogRevalidator;

    match command {
        InvoiceCommand::List(args) => {
            let (invoices, total_pages) = tokio::try_join!(
                db.fetch_filtered_invoices(&args.query, args.page),
                db.fetch_invoices_pages(&args.query),
            )?;

            if json {
                return print_json(&serde_json::json!({
                    "invoices": invoices,
                    "total_pages": total_pages,
                }));
            }

            for invoice in &invoices {
                println!(
                    "{}  {:<24} {:<28} {:>12}  {:<13} {}",
                    invoice.id,
                    invoice.name,
                    invoice.email,
                    format_currency(i64::from(invoice.amount)),
                    format_date_to_local(invoice.date, LOCALE),
                    invoice.status,
                );
            }
            println!("{}", pagination_line(args.page, total_pages));
        }
        InvoiceCommand::Show { id } => {
            let invoice = db
                .fetch_invoice_by_id(id)
                .await?
                .with_context(|| format!("invoice {} not found", id))?;

            if json {
                return print_json(&invoice);
            }
            println!("Invoice   {}", invoice.id);
            println!("Customer  {}", invoice.customer_id);
            println!("Amount    {:.2}", invoice.amount);
            println!("Status    {}", invoice.status);
        }
        InvoiceCommand::Create(fields) => {
            let outcome =
                actions::invoices::create_invoice(db, &cache, &invoice_form(fields)).await;
            report(&outcome, json)?;
        }
        InvoiceCommand::Update { id, fields } => {
            let outcome =
                actions::invoices::update_invoice(db, &cache, id, &invoice_form(fields)).await;
            report(&outcome, json)?;
        }
        InvoiceCommand::Delete { id } => {
            let outcome = actions::invoices::delete_invoice(db, &cache, id).await;
            report(&outcome, json)?;
        }
    }

    Ok(())
}

async fn run_customers(db: &Database, command: CustomerCommand, json: bool) -> Result<()> {
    let cache = LogRevalidator;

    match command {
        CustomerCommand::List(args) => {
            let (customers, total_pages) = tokio::try_join!(
                db.fetch_filtered_customers(&args.query, args.page),
                db.fetch_customers_pages(&args.query),
            )?;

            if json {
                return print_json(&serde_json::json!({
                    "customers": customers,
                    "total_pages": total_pages,
                }));
            }

            for customer in &customers {
                println!(
                    "{}  {:<24} {:<28} {:>4} invoices  pending {:>12}  paid {:>12}",
                    customer.id,
                    customer.name,
                    customer.email,
                    customer.total_invoices,
                    customer.total_pending,
                    customer.total_paid,
                );
            }
            println!("{}", pagination_line(args.page, total_pages));
        }
        CustomerCommand::Options => {
            let customers = db.fetch_customers().await?;
            if json {
                return print_json(&customers);
            }
            for customer in &customers {
                println!("{}  {}", customer.id, customer.name);
            }
        }
        CustomerCommand::Show { id } => {
            let customer = db
                .fetch_customer_by_id(id)
                .await?
                .with_context(|| format!("customer {} not found", id))?;

            if json {
                return print_json(&customer);
            }
            println!("Customer  {}", customer.id);
            println!("Name      {}", customer.name);
            println!("Email     {}", customer.email);
            println!("Image     {}", customer.image_url.as_deref().unwrap_or("-"));
        }
        CustomerCommand::Create(fields) => {
            let outcome =
                actions::customers::create_customer(db, &cache, &customer_form(fields)).await;
            report(&outcome, json)?;
        }
        CustomerCommand::Update { id, fields } => {
            let form = customer_form(fields).with("id", id);
            let outcome = actions::customers::update_customer(db, &cache, &form).await;
            report(&outcome, json)?;
        }
        CustomerCommand::Delete { id } => {
            let outcome = actions::customers::delete_customer(db, &cache, id).await;
            report(&outcome, json)?;
        }
    }

    Ok(())
}
