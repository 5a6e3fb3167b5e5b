pub mod config;
pub mod logging;

pub mod decode;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod inspect;
pub mod report;
pub mod tail_buffer;
