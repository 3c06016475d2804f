//! Core GPT_MAXX library (masking, composer, providers, config).

pub mod chat;
pub mod composer;
pub mod config;
pub mod history;
pub mod interrupt;
pub mod logging;
pub mod mask;
pub mod providers;
