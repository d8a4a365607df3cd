//! Console and JSON presentation of analysis results

pub mod formatter;
