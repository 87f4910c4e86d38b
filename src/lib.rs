// Library for tests to access modules

pub mod config;
pub mod error;
pub mod format;
pub mod models;
pub mod sampler;
pub mod sink;
pub mod status;
pub mod worker;
