pub mod enums;
pub mod iam;
pub mod invoices;
