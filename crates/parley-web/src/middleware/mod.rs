pub mod canonical;
pub mod request_log;
pub mod session;
