pub mod backup;
pub mod client;
pub mod config;
pub mod daily;
pub mod db;
pub mod export;
pub mod helper;
pub mod init;
pub mod log;
pub mod performance;
pub mod record;
pub mod service;
pub mod settings;
pub mod slot;

use crate::config::Config;

/// First character of the configured separator, for table rules.
pub(crate) fn separator(cfg: &Config) -> char {
    cfg.separator_char.chars().next().unwrap_or('-')
}
