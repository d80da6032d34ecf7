pub mod announcements;
pub mod api;
pub mod config;
pub mod dataset;
pub mod market;
pub mod model;
pub mod normalizer;
pub mod resolver;
pub mod storage;
pub mod utils;
