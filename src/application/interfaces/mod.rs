pub mod identity;
pub mod page_cache;
pub mod password_hasher;
