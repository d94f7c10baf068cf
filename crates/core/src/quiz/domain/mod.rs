pub mod question;
pub mod quiz_result;
pub mod quiz_session;
