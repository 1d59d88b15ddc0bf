//! tg-leave: review joined Telegram groups/channels, keep a subset, leave the rest.
//!
//! Hexagonal layout: pure domain, port traits, infrastructure adapters, use cases.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
