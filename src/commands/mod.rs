pub mod calculate;
pub mod export;
pub mod init_config;
pub mod rules;
