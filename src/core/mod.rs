pub mod backup;
pub mod entry;
pub mod store;
