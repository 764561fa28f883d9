pub mod invoice_statuses;
