// End-to-end tests for the synthesis pipeline and the CLI
//
// The remote TTS API is replaced by a mockito server and ffmpeg by a small
// shell script that concatenates the listed files byte for byte, so the whole
// pipeline runs without network access or a media toolchain.
//
// Architecture:
// - Each test builds its own TestContext (mock server + temp directories)
// - Library-level tests wire repositories, service and controller by hand
// - CLI tests run the compiled binary with environment overrides
//
// The fake ffmpeg is a shell script, so these tests are unix-only.

#![cfg(unix)]

mod helpers;
mod test_cli;
mod test_voices;
