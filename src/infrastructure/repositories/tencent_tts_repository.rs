use super::tts_repository::TtsRepository;
use crate::domain::tts::{TextSegment, VoiceSettings};
use crate::error::{AppError, AppResult};
use crate::infrastructure::credentials::Credentials;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

const SERVICE: &str = "tts";
const ACTION: &str = "TextToVoice";
const API_VERSION: &str = "2019-08-23";
const ALGORITHM: &str = "TC3-HMAC-SHA256";
const CONTENT_TYPE: &str = "application/json; charset=utf-8";
const SIGNED_HEADERS: &str = "content-type;host;x-tc-action";

/// Segments are synthesized to WAV so they can be joined with a stream copy
const CODEC: &str = "wav";
const PRIMARY_LANGUAGE_CHINESE: i32 = 1;

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct TextToVoiceRequest<'a> {
    text: &'a str,
    session_id: String,
    voice_type: u32,
    volume: f32,
    speed: f32,
    codec: &'a str,
    primary_language: i32,
}

#[derive(Debug, Deserialize)]
struct ResponseEnvelope {
    #[serde(rename = "Response")]
    response: TextToVoiceResponse,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct TextToVoiceResponse {
    audio: Option<String>,
    request_id: Option<String>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ApiError {
    code: String,
    message: String,
}

/// Tencent Cloud TTS (`TextToVoice`) implementation of TTS repository
pub struct TencentTtsRepository {
    http_client: reqwest::Client,
    credentials: Credentials,
    endpoint: String,
    host: String,
    region: String,
}

impl TencentTtsRepository {
    pub fn new(credentials: Credentials, endpoint: &str, region: &str) -> AppResult<Self> {
        let url = reqwest::Url::parse(endpoint)
            .map_err(|e| AppError::Config(format!("Invalid TTS endpoint {:?}: {}", endpoint, e)))?;
        let host = match (url.host_str(), url.port()) {
            (Some(host), Some(port)) => format!("{}:{}", host, port),
            (Some(host), None) => host.to_string(),
            (None, _) => {
                return Err(AppError::Config(format!(
                    "TTS endpoint {:?} has no host",
                    endpoint
                )))
            }
        };

        Ok(Self {
            http_client: reqwest::Client::new(),
            credentials,
            endpoint: url.to_string(),
            host,
            region: region.to_string(),
        })
    }

    /// Call the TTS API for a single segment and decode the returned audio
    async fn call_text_to_voice(
        &self,
        segment: &TextSegment,
        voice: &VoiceSettings,
    ) -> Result<Vec<u8>, String> {
        let request = TextToVoiceRequest {
            text: &segment.text,
            session_id: format!("session-{}-{}", segment.index, Uuid::new_v4()),
            voice_type: voice.voice_id,
            volume: voice.volume,
            speed: voice.speed,
            codec: CODEC,
            primary_language: PRIMARY_LANGUAGE_CHINESE,
        };
        let payload = serde_json::to_string(&request)
            .map_err(|e| format!("Failed to encode TTS request: {}", e))?;

        let timestamp = Utc::now().timestamp();
        let authorization = sign_request(&self.credentials, &self.host, &payload, timestamp)?;

        tracing::debug!(
            session_id = %request.session_id,
            voice_type = voice.voice_id,
            region = %self.region,
            "Calling Tencent Cloud TextToVoice"
        );

        let response = self
            .http_client
            .post(&self.endpoint)
            .header("Authorization", authorization)
            .header("Content-Type", CONTENT_TYPE)
            .header("X-TC-Action", ACTION)
            .header("X-TC-Version", API_VERSION)
            .header("X-TC-Region", &self.region)
            .header("X-TC-Timestamp", timestamp.to_string())
            .body(payload)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, segment_index = segment.index, "TTS request failed");
                format!("TTS request failed: {}", e)
            })?;

        let status = response.status();
        let envelope: ResponseEnvelope = response.json().await.map_err(|e| {
            tracing::error!(error = %e, status = %status, "Unreadable TTS response");
            format!("Invalid TTS response (HTTP {}): {}", status, e)
        })?;
        let body = envelope.response;
        let request_id = body.request_id.unwrap_or_default();

        if let Some(error) = body.error {
            tracing::error!(
                code = %error.code,
                message = %error.message,
                request_id = %request_id,
                segment_index = segment.index,
                "Tencent Cloud TTS returned an error"
            );
            return Err(format!(
                "Tencent Cloud TTS error {}: {} (request {})",
                error.code, error.message, request_id
            ));
        }

        let audio = body
            .audio
            .filter(|a| !a.is_empty())
            .ok_or_else(|| format!("TTS response has no audio (request {})", request_id))?;

        let audio_bytes = BASE64
            .decode(audio.as_bytes())
            .map_err(|e| format!("Failed to decode TTS audio payload: {}", e))?;

        tracing::debug!(
            request_id = %request_id,
            audio_size = audio_bytes.len(),
            "TTS audio decoded"
        );

        Ok(audio_bytes)
    }
}

#[async_trait]
impl TtsRepository for TencentTtsRepository {
    async fn synthesize_segment(
        &self,
        segment: &TextSegment,
        voice: &VoiceSettings,
    ) -> Result<Vec<u8>, String> {
        let start_time = std::time::Instant::now();

        let audio_data = self.call_text_to_voice(segment, voice).await?;

        let duration = start_time.elapsed();
        tracing::info!(
            provider = "tencent",
            segment_index = segment.index,
            characters_count = segment.char_count(),
            latency_ms = duration.as_millis(),
            audio_size_bytes = audio_data.len(),
            "Segment synthesized"
        );

        Ok(audio_data)
    }
}

/// Build the TC3-HMAC-SHA256 `Authorization` header for a `TextToVoice` call
pub fn sign_request(
    credentials: &Credentials,
    host: &str,
    payload: &str,
    timestamp: i64,
) -> Result<String, String> {
    let date = DateTime::<Utc>::from_timestamp(timestamp, 0)
        .ok_or_else(|| format!("Invalid request timestamp {}", timestamp))?
        .format("%Y-%m-%d")
        .to_string();

    let canonical_headers = format!(
        "content-type:{}\nhost:{}\nx-tc-action:{}\n",
        CONTENT_TYPE,
        host,
        ACTION.to_lowercase()
    );
    let canonical_request = format!(
        "POST\n/\n\n{}\n{}\n{}",
        canonical_headers,
        SIGNED_HEADERS,
        sha256_hex(payload.as_bytes())
    );

    let credential_scope = format!("{}/{}/tc3_request", date, SERVICE);
    let string_to_sign = format!(
        "{}\n{}\n{}\n{}",
        ALGORITHM,
        timestamp,
        credential_scope,
        sha256_hex(canonical_request.as_bytes())
    );

    let secret_date = hmac_sha256(
        format!("TC3{}", credentials.secret_key).as_bytes(),
        date.as_bytes(),
    )?;
    let secret_service = hmac_sha256(&secret_date, SERVICE.as_bytes())?;
    let secret_signing = hmac_sha256(&secret_service, b"tc3_request")?;
    let signature = hex::encode(hmac_sha256(&secret_signing, string_to_sign.as_bytes())?);

    Ok(format!(
        "{} Credential={}/{}, SignedHeaders={}, Signature={}",
        ALGORITHM, credentials.secret_id, credential_scope, SIGNED_HEADERS, signature
    ))
}

fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

fn hmac_sha256(key: &[u8], message: &[u8]) -> Result<Vec<u8>, String> {
    let mut mac = Hmac::<Sha256>::new_from_slice(key)
        .map_err(|e| format!("Invalid signing key: {}", e))?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().to_vec())
}
