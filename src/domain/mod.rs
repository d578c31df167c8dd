pub mod tts;
pub mod voice;
