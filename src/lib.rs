//! Maps structured log entries to the Datadog log collection JSON
//! schema and hands the resulting documents to pluggable sinks.
//!
//! See https://docs.datadoghq.com/logs/log_collection

pub mod value;
pub mod entry;
pub mod config;

pub mod exception;
pub mod message;
pub mod duration;
pub mod tags;
pub mod mapper;

pub mod sink;
pub mod writer;
pub mod memory;
pub mod noop_sink;

pub mod device;
pub mod layer;
pub mod init;
