pub mod ledger;
pub mod presale_service;
