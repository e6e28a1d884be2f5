//! Generate Flutter localization code from per-locale JSON resources.

pub mod config;
pub mod error;
pub mod i18n;
pub mod interaction;
pub mod retry;
pub mod storage;
pub mod translation;
pub mod workspace;
