pub mod concatenator;
pub mod player;
pub mod workspace;

pub use concatenator::{AudioConcatenator, FfmpegConcatenator, MediaError, OutputFormat};
pub use player::{AudioPlayer, SystemPlayer};
pub use workspace::SegmentWorkspace;
