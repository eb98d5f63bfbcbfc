#![allow(dead_code)]

pub mod mocks;
pub mod setup;

pub use mocks::MockConnectionManager;
pub use setup::ServerDirBuilder;
