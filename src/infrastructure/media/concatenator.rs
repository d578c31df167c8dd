use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("no audio segments to concatenate")]
    NoInputs,
    #[error("audio file not found: {0}")]
    MissingFile(PathBuf),
    #[error("failed to prepare media files: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },
}

/// Output container/codec selection, driven by the output file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Mp3,
    Aac,
    Ogg,
    Flac,
    /// WAV and anything unrecognized: stream copy without re-encoding
    Copy,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match extension.as_deref() {
            Some("mp3") => OutputFormat::Mp3,
            Some("aac") | Some("m4a") => OutputFormat::Aac,
            Some("ogg") => OutputFormat::Ogg,
            Some("flac") => OutputFormat::Flac,
            _ => OutputFormat::Copy,
        }
    }

    /// ffmpeg codec flags for this format
    pub fn codec_args(&self) -> &'static [&'static str] {
        match self {
            OutputFormat::Mp3 => &["-c:a", "libmp3lame", "-q:a", "2"],
            OutputFormat::Aac => &["-c:a", "aac", "-b:a", "192k"],
            OutputFormat::Ogg => &["-c:a", "libvorbis", "-q:a", "4"],
            OutputFormat::Flac => &["-c:a", "flac"],
            OutputFormat::Copy => &["-c", "copy"],
        }
    }
}

/// Render the concat demuxer directive, one `file '<path>'` line per input, in order
pub fn build_concat_list(files: &[PathBuf]) -> String {
    files
        .iter()
        .map(|file| {
            let quoted = file.to_string_lossy().replace('\'', r"'\''");
            format!("file '{}'\n", quoted)
        })
        .collect()
}

/// Joins ordered audio files into a single output file
#[async_trait]
pub trait AudioConcatenator: Send + Sync {
    /// Write the directive to `list_path` and join `inputs` into `output`.
    ///
    /// `list_path` is owned by the caller, which is responsible for removing it.
    async fn concatenate(
        &self,
        inputs: &[PathBuf],
        list_path: &Path,
        output: &Path,
    ) -> Result<(), MediaError>;
}

/// Concatenation through the ffmpeg concat demuxer
pub struct FfmpegConcatenator {
    ffmpeg_path: PathBuf,
}

impl FfmpegConcatenator {
    pub fn new(ffmpeg_path: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
        }
    }

    fn build_args(list_path: &Path, output: &Path) -> Vec<String> {
        let mut args: Vec<String> = [
            "-hide_banner",
            "-y",
            "-f",
            "concat",
            "-safe",
            "0",
            "-i",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        args.push(list_path.to_string_lossy().into_owned());
        args.extend(
            OutputFormat::from_path(output)
                .codec_args()
                .iter()
                .map(|s| s.to_string()),
        );
        args.push(output.to_string_lossy().into_owned());
        args
    }
}

#[async_trait]
impl AudioConcatenator for FfmpegConcatenator {
    async fn concatenate(
        &self,
        inputs: &[PathBuf],
        list_path: &Path,
        output: &Path,
    ) -> Result<(), MediaError> {
        if inputs.is_empty() {
            return Err(MediaError::NoInputs);
        }

        tokio::fs::write(list_path, build_concat_list(inputs)).await?;

        let args = Self::build_args(list_path, output);
        let program = self.ffmpeg_path.to_string_lossy().into_owned();

        tracing::info!(
            program = %program,
            input_count = inputs.len(),
            output = %output.display(),
            format = ?OutputFormat::from_path(output),
            "Running ffmpeg concat"
        );

        let result = Command::new(&self.ffmpeg_path)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| MediaError::Spawn {
                program: program.clone(),
                source,
            })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr).trim().to_string();
            tracing::error!(
                program = %program,
                status = %result.status,
                stderr = %stderr,
                "ffmpeg concat failed"
            );
            return Err(MediaError::Failed {
                program,
                status: result.status.to_string(),
                stderr,
            });
        }

        tracing::info!(output = %output.display(), "Segments joined into final audio file");
        Ok(())
    }
}
