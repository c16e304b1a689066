//! CSV Codec Library
//!
//! Translates between delimited text lines and named-field records for
//! line-oriented event pipelines. It includes modules for the codec engine,
//! record model, configuration, charset conversion, stream drivers, and CLI
//! argument parsing.

pub mod charset;
pub mod cli;
pub mod codec;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod record;
