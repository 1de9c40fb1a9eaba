pub mod cache;
pub mod presale;
