pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod validate;
pub mod views;
pub mod web;
#[cfg(test)]
mod test;

pub use error::{Error, Result};
