#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![cfg_attr(feature = "fail-on-warnings", deny(clippy::all))]

pub mod app;
pub mod cli;
pub mod debounce;
pub mod drive;
pub mod lightning;
pub mod pay_config;
pub mod primitives;
pub mod slashtag;
pub mod sync;
mod tracing;
pub mod wallet;
