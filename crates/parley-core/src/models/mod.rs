pub mod chat;
pub mod feedback;
pub mod lex;
pub mod session;
