//! Text analysis components: keyword extraction, section extraction,
//! job parsing, achievement matching, and ATS coverage analysis

pub mod ats;
pub mod job;
pub mod keywords;
pub mod matcher;
pub mod sections;
