pub mod api;
pub mod completion;
pub mod config;
pub mod error;
pub mod extraction;
pub mod shutdown;
pub mod startup;
