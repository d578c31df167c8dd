use std::path::{Path, PathBuf};
use tempfile::TempDir;

const CONCAT_LIST_FILE: &str = "concat_list.txt";
const STAGED_OUTPUT_STEM: &str = "joined";

/// Temporary directory holding per-segment audio and the concat list for one request.
///
/// The directory is removed by `cleanup`, or on drop if an error path skips it.
pub struct SegmentWorkspace {
    dir: TempDir,
    segment_files: Vec<PathBuf>,
}

impl SegmentWorkspace {
    /// Create a workspace under `parent`, or under the system temp dir
    pub fn create(parent: Option<&Path>) -> std::io::Result<Self> {
        let dir = match parent {
            Some(parent) => {
                std::fs::create_dir_all(parent)?;
                // ffmpeg resolves list entries relative to the list file, so keep paths absolute
                let parent = parent.canonicalize()?;
                tempfile::Builder::new()
                    .prefix("tts-segments-")
                    .tempdir_in(parent)?
            }
            None => tempfile::Builder::new().prefix("tts-segments-").tempdir()?,
        };

        tracing::debug!(workspace = %dir.path().display(), "Segment workspace created");

        Ok(Self {
            dir,
            segment_files: Vec::new(),
        })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn segment_path(&self, index: usize) -> PathBuf {
        self.dir.path().join(format!("segment_{}.wav", index))
    }

    pub fn concat_list_path(&self) -> PathBuf {
        self.dir.path().join(CONCAT_LIST_FILE)
    }

    /// Where the joined audio is written before it replaces the real output.
    /// Keeps the output's extension, since the codec is picked from it.
    pub fn staged_output_path(&self, output: &Path) -> PathBuf {
        let staged = self.dir.path().join(STAGED_OUTPUT_STEM);
        match output.extension() {
            Some(ext) => staged.with_extension(ext),
            None => staged,
        }
    }

    /// Segment files written so far, in segment order
    pub fn segment_files(&self) -> &[PathBuf] {
        &self.segment_files
    }

    pub async fn write_segment(&mut self, index: usize, audio: &[u8]) -> std::io::Result<PathBuf> {
        let path = self.segment_path(index);
        tokio::fs::write(&path, audio).await?;
        self.segment_files.push(path.clone());
        Ok(path)
    }

    /// Remove every temporary file and the directory itself. Failures are logged only.
    pub fn cleanup(self) {
        let path = self.dir.path().to_path_buf();
        let file_count = self.segment_files.len();

        match self.dir.close() {
            Ok(()) => tracing::debug!(
                workspace = %path.display(),
                file_count,
                "Temporary segment files cleaned up"
            ),
            Err(e) => tracing::warn!(
                workspace = %path.display(),
                error = %e,
                "Failed to clean up temporary segment files"
            ),
        }
    }
}
