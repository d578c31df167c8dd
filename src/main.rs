use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tts_composer::controllers::{SessionState, SynthesisController, VoiceController};
use tts_composer::domain::tts::model::{DEFAULT_SPEED, DEFAULT_VOICE_ID, DEFAULT_VOLUME};
use tts_composer::domain::tts::{TtsService, VoiceSettings};
use tts_composer::domain::voice::{Gender, VoiceCatalog, VoiceFilter};
use tts_composer::error::{AppError, AppResult};
use tts_composer::infrastructure::config::{Config, LogFormat};
use tts_composer::infrastructure::credentials::Credentials;
use tts_composer::infrastructure::media::{AudioPlayer, FfmpegConcatenator, SystemPlayer};
use tts_composer::infrastructure::repositories::{TencentTtsRepository, VoiceRepository};

#[derive(Parser, Debug)]
#[command(name = "tts-composer")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Synthesize speech with Tencent Cloud TTS and join the segments with ffmpeg")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Synthesize a text file (batch mode)
    Synth {
        /// Text file to synthesize
        #[arg(short = 'f', long, value_name = "PATH")]
        file: PathBuf,

        /// Output audio file; the extension selects the codec. Defaults to the input path with .wav
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        #[command(flatten)]
        voice: VoiceArgs,

        /// Play the result when done
        #[arg(long)]
        play: bool,
    },

    /// Synthesize inline text into the audio directory
    Say {
        text: String,

        /// Output audio file. Defaults to <audio dir>/<voice>_<timestamp>.wav
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        #[command(flatten)]
        voice: VoiceArgs,

        /// Play the result when done
        #[arg(long)]
        play: bool,
    },

    /// List voices from the voice table
    Voices {
        #[arg(long)]
        scene: Option<String>,

        /// female or male
        #[arg(long)]
        gender: Option<Gender>,

        #[arg(long)]
        category: Option<String>,

        /// Case-insensitive match on name or scene
        #[arg(long)]
        search: Option<String>,

        /// Print the scene names usable with --scene instead of voices
        #[arg(long, conflicts_with = "categories")]
        scenes: bool,

        /// Print the categories usable with --category instead of voices
        #[arg(long)]
        categories: bool,
    },

    /// Play the sample audio of a voice
    Preview {
        voice: u32,
    },
}

#[derive(clap::Args, Debug)]
struct VoiceArgs {
    /// Voice id (VoiceType)
    #[arg(short = 'v', long = "voice", default_value_t = DEFAULT_VOICE_ID)]
    voice_id: u32,

    /// Speech speed, -2 to 6
    #[arg(long, default_value_t = DEFAULT_SPEED, allow_hyphen_values = true)]
    speed: f32,

    /// Volume, -10 to 10
    #[arg(long, default_value_t = DEFAULT_VOLUME, allow_hyphen_values = true)]
    volume: f32,
}

impl VoiceArgs {
    fn settings(&self) -> VoiceSettings {
        VoiceSettings {
            voice_id: self.voice_id,
            speed: self.speed,
            volume: self.volume,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(e.exit_code());
        }
    };

    init_logging(&config);

    match run(args, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("Error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(args: Args, config: Config) -> AppResult<()> {
    let player: Arc<dyn AudioPlayer> = Arc::new(SystemPlayer::new(config.player_command.clone()));

    match args.command {
        Command::Synth {
            file,
            output,
            voice,
            play,
        } => {
            let text = read_input(&file)?;
            let output = output.unwrap_or_else(|| file.with_extension("wav"));
            synthesize(&config, player, text, Some(output), voice.settings(), play).await
        }
        Command::Say {
            text,
            output,
            voice,
            play,
        } => synthesize(&config, player, text, output, voice.settings(), play).await,
        Command::Voices {
            scene,
            gender,
            category,
            search,
            scenes,
            categories,
        } => {
            let controller = voice_controller(&config, player);
            let lines = if scenes {
                controller.scenes()
            } else if categories {
                controller.categories()
            } else {
                controller.list(&VoiceFilter {
                    scene,
                    gender,
                    category,
                    search,
                })
            };
            for line in lines {
                println!("{}", line);
            }
            Ok(())
        }
        Command::Preview { voice } => {
            let controller = voice_controller(&config, player);
            let sample = controller.preview(voice)?;
            println!("Playing {}", sample.display());
            Ok(())
        }
    }
}

/// Read the input text file. Missing or blank files are input errors.
fn read_input(path: &Path) -> AppResult<String> {
    if !path.is_file() {
        return Err(AppError::NotFound(format!(
            "Input file {} does not exist",
            path.display()
        )));
    }

    let text = std::fs::read_to_string(path)?;
    let text = text.trim();
    if text.is_empty() {
        return Err(AppError::BadRequest(format!(
            "Input file {} is empty",
            path.display()
        )));
    }

    Ok(text.to_string())
}

async fn synthesize(
    config: &Config,
    player: Arc<dyn AudioPlayer>,
    text: String,
    output: Option<PathBuf>,
    settings: VoiceSettings,
    play: bool,
) -> AppResult<()> {
    settings.validate().map_err(AppError::BadRequest)?;

    let voices = voice_controller(config, player.clone());
    let synthesis = synthesis_controller(config, player)?;
    let output = output
        .unwrap_or_else(|| synthesis.default_output_path(settings.voice_id, chrono::Local::now()));

    let mut session = SessionState::new(settings);
    let voice_name = voices.select(&mut session, settings.voice_id);
    println!("Voice: {} ({})", voice_name, settings.voice_id);
    println!("Output: {}", output.display());

    let result = synthesis
        .run(&mut session, text, output, play, |event| println!("{}", event))
        .await?;

    if result.success {
        Ok(())
    } else {
        Err(AppError::ExternalService(
            result
                .failure_reason
                .unwrap_or_else(|| "synthesis failed".to_string()),
        ))
    }
}

fn voice_controller(config: &Config, player: Arc<dyn AudioPlayer>) -> VoiceController {
    let repository = VoiceRepository::new(config.voice_table_path.clone());
    let voices = repository.load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Voice table unavailable, continuing without voice names");
        Vec::new()
    });

    VoiceController::new(
        Arc::new(VoiceCatalog::new(voices)),
        player,
        config.sample_dir.clone(),
    )
}

fn synthesis_controller(
    config: &Config,
    player: Arc<dyn AudioPlayer>,
) -> AppResult<SynthesisController> {
    // Credentials first: nothing reaches the network without them
    let credentials = Credentials::load_from_csv(&config.credentials_path)?;

    tracing::info!(
        endpoint = %config.tts_endpoint,
        region = %config.tts_region,
        ffmpeg = %config.ffmpeg_path.display(),
        max_segment_chars = config.max_segment_chars,
        "Initializing synthesis pipeline"
    );

    let tts_repo = Arc::new(TencentTtsRepository::new(
        credentials,
        &config.tts_endpoint,
        &config.tts_region,
    )?);
    let concatenator = Arc::new(FfmpegConcatenator::new(config.ffmpeg_path.clone()));
    let tts_service = Arc::new(TtsService::new(
        tts_repo,
        concatenator,
        config.max_segment_chars,
        config.work_dir.clone(),
    ));

    Ok(SynthesisController::new(
        tts_service,
        player,
        config.audio_dir.clone(),
    ))
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "tts_composer=info".into());

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
