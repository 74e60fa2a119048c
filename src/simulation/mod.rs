pub mod config;
pub mod engine;
pub mod kpi;
pub mod scenario;
pub mod timeline;
