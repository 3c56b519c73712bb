mod card;
mod customer;
mod invoice;
mod revenue;

pub use card::CardData;
pub use customer::{Customer, CustomerField, CustomersTable, CustomersTableRow};
pub use invoice::{
    InvoiceForm, InvoiceFormRow, InvoiceStatus, InvoicesTable, LatestInvoice, LatestInvoiceRaw,
};
pub use revenue::Revenue;
