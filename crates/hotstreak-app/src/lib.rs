// Library root: re-exports all modules so integration tests and the binary
// can access the application's public API.

pub mod config;
pub mod dataset;
pub mod input;
pub mod report;
pub mod session;
