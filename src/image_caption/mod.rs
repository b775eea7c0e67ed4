pub mod config;
pub mod data;
pub mod load;
pub mod caption;
