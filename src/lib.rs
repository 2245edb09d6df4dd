pub mod app;
pub mod cli;
pub mod config;
pub mod controller;
pub mod filter;
pub mod interactive;
pub mod logging;
pub mod model;
pub mod output;
pub mod paginate;
pub mod render;
pub mod source;

#[cfg(test)]
mod tests;
