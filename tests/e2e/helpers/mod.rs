use mockito::{Server, ServerGuard};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tokio::process::Command;
use tts_composer::controllers::SynthesisController;
use tts_composer::domain::tts::TtsService;
use tts_composer::infrastructure::config::{Config, LogFormat};
use tts_composer::infrastructure::credentials::Credentials;
use tts_composer::infrastructure::media::{AudioPlayer, FfmpegConcatenator, MediaError};
use tts_composer::infrastructure::repositories::TencentTtsRepository;

pub mod fixtures;

/// Player that only records what it was asked to play
#[derive(Default)]
pub struct RecordingPlayer {
    pub played: Mutex<Vec<PathBuf>>,
}

impl AudioPlayer for RecordingPlayer {
    fn play(&self, path: &Path) -> Result<(), MediaError> {
        self.played.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }
}

pub struct TestContext {
    pub server: ServerGuard,
    pub root: TempDir,
    pub work_dir: PathBuf,
    pub out_dir: PathBuf,
    pub credentials_path: PathBuf,
    pub voice_table_path: PathBuf,
    pub ffmpeg_path: PathBuf,
    pub failing_ffmpeg_path: PathBuf,
    pub player: Arc<RecordingPlayer>,
}

impl TestContext {
    pub async fn new() -> Self {
        let server = Server::new_async().await;
        let root = tempfile::tempdir().unwrap();
        let work_dir = root.path().join("work");
        let out_dir = root.path().join("out");
        std::fs::create_dir_all(&work_dir).unwrap();
        std::fs::create_dir_all(&out_dir).unwrap();

        let credentials_path = fixtures::write_credentials(root.path());
        let voice_table_path = fixtures::write_voice_table(root.path());
        let ffmpeg_path = fixtures::write_fake_ffmpeg(root.path());
        let failing_ffmpeg_path = fixtures::write_failing_ffmpeg(root.path());

        Self {
            server,
            root,
            work_dir,
            out_dir,
            credentials_path,
            voice_table_path,
            ffmpeg_path,
            failing_ffmpeg_path,
            player: Arc::new(RecordingPlayer::default()),
        }
    }

    pub fn config(&self) -> Config {
        Config {
            credentials_path: self.credentials_path.clone(),
            voice_table_path: self.voice_table_path.clone(),
            tts_endpoint: self.server.url(),
            tts_region: "ap-guangzhou".to_string(),
            max_segment_chars: 20,
            ffmpeg_path: self.ffmpeg_path.clone(),
            player_command: None,
            work_dir: Some(self.work_dir.clone()),
            audio_dir: self.out_dir.join("Audios"),
            sample_dir: self.root.path().join("AudioResources"),
            log_format: LogFormat::Pretty,
        }
    }

    /// The CLI binary, running in the context root with every setting pointed at the fixtures
    pub fn cli(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_tts-composer"));
        cmd.current_dir(self.root.path())
            .env("TTS_CREDENTIALS_PATH", &self.credentials_path)
            .env("TTS_VOICE_TABLE_PATH", &self.voice_table_path)
            .env("TTS_ENDPOINT", self.server.url())
            .env("TTS_MAX_SEGMENT_CHARS", "20")
            .env("FFMPEG_PATH", &self.ffmpeg_path)
            .env("TTS_WORK_DIR", &self.work_dir)
            .env("TTS_AUDIO_DIR", self.out_dir.join("Audios"))
            .env("RUST_LOG", "tts_composer=debug")
            .env_remove("TTS_REGION")
            .env_remove("TTS_PLAYER")
            .env_remove("LOG_FORMAT");
        cmd
    }

    /// Real repository, service and controller wired against the mock server
    pub fn synthesis_controller(&self, config: &Config) -> SynthesisController {
        let credentials = Credentials::load_from_csv(&config.credentials_path).unwrap();
        let tts_repo = Arc::new(
            TencentTtsRepository::new(credentials, &config.tts_endpoint, &config.tts_region)
                .unwrap(),
        );
        let concatenator = Arc::new(FfmpegConcatenator::new(config.ffmpeg_path.clone()));
        let tts_service = Arc::new(TtsService::new(
            tts_repo,
            concatenator,
            config.max_segment_chars,
            config.work_dir.clone(),
        ));
        SynthesisController::new(tts_service, self.player.clone(), config.audio_dir.clone())
    }
}
