use crate::domain::tts::DEFAULT_MAX_SEGMENT_CHARS;
use crate::error::{AppError, AppResult};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub credentials_path: PathBuf,
    pub voice_table_path: PathBuf,
    // TTS API
    pub tts_endpoint: String,
    pub tts_region: String,
    pub max_segment_chars: usize,
    // Media
    pub ffmpeg_path: PathBuf,
    pub player_command: Option<String>,
    pub work_dir: Option<PathBuf>,
    pub audio_dir: PathBuf,
    pub sample_dir: PathBuf,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            credentials_path: PathBuf::from("Config/tencent_cloud_secret_key.csv"),
            voice_table_path: PathBuf::from("Config/tencent_cloud_voice_type.csv"),
            tts_endpoint: "https://tts.tencentcloudapi.com".to_string(),
            tts_region: "ap-guangzhou".to_string(),
            max_segment_chars: DEFAULT_MAX_SEGMENT_CHARS,
            ffmpeg_path: PathBuf::from("ffmpeg"),
            player_command: None,
            work_dir: None,
            audio_dir: PathBuf::from("Audios"),
            sample_dir: PathBuf::from("AudioResources"),
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let defaults = Config::default();

        let max_segment_chars = match env::var("TTS_MAX_SEGMENT_CHARS") {
            Ok(value) => value.parse::<usize>().ok().filter(|n| *n > 0).ok_or_else(|| {
                AppError::Config(format!(
                    "TTS_MAX_SEGMENT_CHARS must be a positive integer, got {:?}",
                    value
                ))
            })?,
            Err(_) => defaults.max_segment_chars,
        };

        let config = Config {
            credentials_path: env::var("TTS_CREDENTIALS_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.credentials_path),
            voice_table_path: env::var("TTS_VOICE_TABLE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.voice_table_path),
            tts_endpoint: env::var("TTS_ENDPOINT").unwrap_or(defaults.tts_endpoint),
            tts_region: env::var("TTS_REGION").unwrap_or(defaults.tts_region),
            max_segment_chars,
            ffmpeg_path: env::var("FFMPEG_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.ffmpeg_path),
            player_command: env::var("TTS_PLAYER").ok().filter(|s| !s.trim().is_empty()),
            work_dir: env::var("TTS_WORK_DIR").ok().map(PathBuf::from),
            audio_dir: env::var("TTS_AUDIO_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.audio_dir),
            sample_dir: env::var("TTS_SAMPLE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.sample_dir),
            log_format: env::var("LOG_FORMAT")
                .map(|s| match s.to_lowercase().as_str() {
                    "json" => LogFormat::Json,
                    _ => LogFormat::Pretty,
                })
                .unwrap_or(defaults.log_format),
        };

        Ok(config)
    }
}
