pub mod error;
pub mod filter;
pub mod notify;
pub mod record;
pub mod report;
pub mod storage;
pub mod store;
pub mod view;
