pub mod authentication;
pub mod invoices;
pub mod registration;
