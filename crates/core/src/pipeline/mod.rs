pub mod practice_logger;
pub mod practice_sentence_use_case;
