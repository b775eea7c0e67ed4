pub mod config;
pub mod data;
pub mod aggregate;
pub mod load;
pub mod answer;
