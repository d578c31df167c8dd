pub mod synthesis;
pub mod voice;

pub use synthesis::{SessionState, SynthesisController, SynthesisJob};
pub use voice::VoiceController;
