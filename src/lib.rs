pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod movies;
pub mod payload;
pub mod state;
pub mod users;

#[cfg(test)]
mod memory;
