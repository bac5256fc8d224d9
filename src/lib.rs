pub mod config;
pub mod finalize;
pub mod logging;
pub mod session;
pub mod shutdown;
pub mod ui;
