pub mod config;
pub mod logging;

pub mod address;
pub mod convert;
pub mod page;
pub mod protocol;
pub mod title;
