// Library target shared by the binary, the integration tests and the
// criterion benchmark. The binary entry point is main.rs.
pub mod app;
pub mod config;
pub mod event;
pub mod generator;
pub mod logging;
pub mod session;
pub mod ui;
