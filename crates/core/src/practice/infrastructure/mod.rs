pub mod line_transcript_provider;
