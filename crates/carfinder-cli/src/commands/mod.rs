//! Command implementations

pub mod chat;
pub mod ls;
pub mod recommend;
pub mod search;
pub mod serve;
pub mod status;
