pub mod model;
pub mod service;

pub use model::{Gender, VoiceFilter, VoiceProfile};
pub use service::VoiceCatalog;
