pub mod binary_reader;
pub mod constants;
pub mod error;
pub mod normalizer;
pub mod platform;
pub mod registry;
