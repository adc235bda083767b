pub mod cli;
pub mod config;
pub mod logging;

// Pipeline stages, in execution order.
pub mod extract;
pub mod fetch;
pub mod group;
pub mod name;
pub mod pipeline;
pub mod resolve;
