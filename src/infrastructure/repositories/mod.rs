pub mod tencent_tts_repository;
pub mod tts_repository;
pub mod voice_repository;

pub use tencent_tts_repository::TencentTtsRepository;
pub use tts_repository::TtsRepository;
pub use voice_repository::VoiceRepository;
