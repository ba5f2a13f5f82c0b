pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod repository;
pub mod seed;
pub mod services;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;
