pub mod iam;
pub mod invoices;
