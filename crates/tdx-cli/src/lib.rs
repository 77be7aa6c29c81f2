//! Library components of the tdxplot command line tool.

pub mod logging;
pub mod pipeline;
