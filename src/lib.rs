pub mod cli;
pub mod config;
pub mod deck;
pub mod domain;
pub mod session;
pub mod srs;
