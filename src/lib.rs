// imgconv image conversion service library

pub mod config;
pub mod constants;
pub mod error;
pub mod imaging;
pub mod logging;
pub mod server;
