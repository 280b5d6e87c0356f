pub mod ports;
pub mod prompts;
pub mod services;
