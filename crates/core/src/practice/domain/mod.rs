pub mod practice_session;
pub mod recognition_error;
pub mod recognized_speech;
pub mod sentence;
pub mod transcript_provider;
