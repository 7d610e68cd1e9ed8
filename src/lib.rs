pub mod aggregate;
pub mod config;
pub mod db;
pub mod pipeline;
pub mod publish;
pub mod report;
