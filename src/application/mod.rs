pub mod authorization;
pub mod interfaces;
pub mod usecases;
pub mod validation;
