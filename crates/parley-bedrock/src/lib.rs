//! parley-bedrock
//!
//! Model invocation for the portfolio chat: prompt assembly, knowledge
//! base retrieval, reply length policy, and the Converse call itself.

pub mod error;
pub mod invoke;
pub mod length;
pub mod persona;
pub mod prompt;
pub mod retrieve;
