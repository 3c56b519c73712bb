use clap::{Args, Parser, Subcommand};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "invoice-dashboard", version, about = "Invoice and customer dashboard")]
pub struct Cli {
    /// Debug logging (RUST_LOG still takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the dashboard tables
    Migrate,
    /// Summary cards, revenue chart axis and latest invoices
    Dashboard,
    #[command(subcommand)]
    Invoices(InvoiceCommand),
    #[command(subcommand)]
    Customers(CustomerCommand),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Search text
    #[arg(short, long, default_value = "")]
    pub query: String,

    #[arg(short, long, default_value_t = 1)]
    pub page: i64,
}

#[derive(Args, Debug)]
pub struct InvoiceFields {
    #[arg(long)]
    pub customer_id: String,

    /// Amount in dollars
    #[arg(long)]
    pub amount: String,

    /// pending or paid
    #[arg(long)]
    pub status: String,
}

#[derive(Subcommand, Debug)]
pub enum InvoiceCommand {
    /// Search invoices, one page at a time
    List(ListArgs),
    Show {
        id: Uuid,
    },
    Create(InvoiceFields),
    Update {
        id: Uuid,
        #[command(flatten)]
        fields: InvoiceFields,
    },
    Delete {
        id: Uuid,
    },
}

#[derive(Args, Debug)]
pub struct CustomerFields {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub image_url: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum CustomerCommand {
    /// Search customers with their invoice totals
    List(ListArgs),
    /// Every customer's id and name
    Options,
    Show {
        id: Uuid,
    },
    Create(CustomerFields),
    Update {
        id: String,
        #[command(flatten)]
        fields: CustomerFields,
    },
    Delete {
        id: Uuid,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn list_defaults_to_first_page() {
        let cli = Cli::parse_from(["invoice-dashboard", "invoices", "list"]);
        match cli.command {
            Command::Invoices(InvoiceCommand::List(args)) => {
                assert_eq!(args.page, 1);
                assert_eq!(args.query, "");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn invoice_update_takes_id_and_fields() {
        let cli = Cli::parse_from([
            "invoice-dashboard",
            "--json",
            "invoices",
            "update",
            "3958dc9e-712f-4377-85e9-fec4b6a6442a",
            "--customer-id",
            "3958dc9e-742f-4377-85e9-fec4b6a6442a",
            "--amount",
            "12.50",
            "--status",
            "paid",
        ]);

        assert!(cli.json);
        match cli.command {
            Command::Invoices(InvoiceCommand::Update { fields, .. }) => {
                assert_eq!(fields.amount, "12.50");
                assert_eq!(fields.status, "paid");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
