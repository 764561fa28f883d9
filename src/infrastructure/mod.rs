pub mod axum_http;
pub mod caching;
pub mod hashing;
pub mod identity;
pub mod postgres;
