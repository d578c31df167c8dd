use crate::e2e::helpers::{fixtures, tts_mocks, TestContext};
use pretty_assertions::assert_eq;

fn stderr(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[tokio::test]
async fn it_should_exit_with_input_error_for_missing_file() {
    let ctx = TestContext::new().await;

    let output = ctx
        .cli()
        .args(["synth", "-f", "missing.txt"])
        .output()
        .await
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("does not exist"));
}

#[tokio::test]
async fn it_should_exit_with_input_error_for_empty_file() {
    let ctx = TestContext::new().await;
    std::fs::write(ctx.root.path().join("empty.txt"), "  \n\n").unwrap();

    let output = ctx
        .cli()
        .args(["synth", "-f", "empty.txt"])
        .output()
        .await
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("is empty"));
}

#[tokio::test]
async fn it_should_not_call_the_api_without_credentials() {
    let mut ctx = TestContext::new().await;
    let never_called = ctx
        .server
        .mock("POST", "/")
        .expect(0)
        .create_async()
        .await;
    std::fs::write(ctx.root.path().join("input.txt"), "你好").unwrap();

    let output = ctx
        .cli()
        .env("TTS_CREDENTIALS_PATH", ctx.root.path().join("nope.csv"))
        .args(["synth", "-f", "input.txt"])
        .output()
        .await
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    never_called.assert_async().await;
    assert!(!ctx.root.path().join("input.wav").exists());
}

#[tokio::test]
async fn it_should_synthesize_a_file_next_to_the_input() {
    let mut ctx = TestContext::new().await;
    let first = tts_mocks::mock_segment_ok(&mut ctx.server, "今天天气很好").await;
    let second =
        tts_mocks::mock_segment_ok(&mut ctx.server, "we should go for a long walk").await;
    std::fs::write(
        ctx.root.path().join("input.txt"),
        "今天天气很好\n\nwe should go for a long walk\n",
    )
    .unwrap();

    let output = ctx
        .cli()
        .args(["synth", "-f", "input.txt", "--voice", "101001"])
        .output()
        .await
        .unwrap();

    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    first.assert_async().await;
    second.assert_async().await;

    let mut expected = tts_mocks::segment_audio("今天天气很好");
    expected.extend(tts_mocks::segment_audio("we should go for a long walk"));
    assert_eq!(
        std::fs::read(ctx.root.path().join("input.wav")).unwrap(),
        expected
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Voice: 智瑜 (101001)"));
    assert!(fixtures::dir_is_empty(&ctx.work_dir));
}

#[tokio::test]
async fn it_should_succeed_when_the_player_cannot_start() {
    let mut ctx = TestContext::new().await;
    let _ok = tts_mocks::mock_segment_ok(&mut ctx.server, "hello there").await;

    let output = ctx
        .cli()
        .env("TTS_PLAYER", "/definitely/not/a/player")
        .args(["say", "hello there", "-o", "hello.wav", "--play"])
        .output()
        .await
        .unwrap();

    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    assert_eq!(
        std::fs::read(ctx.root.path().join("hello.wav")).unwrap(),
        tts_mocks::segment_audio("hello there")
    );
}

#[tokio::test]
async fn it_should_keep_an_existing_output_when_synthesis_fails() {
    let mut ctx = TestContext::new().await;
    let _failing =
        tts_mocks::mock_segment_error(&mut ctx.server, "hello again", "InternalError").await;
    let existing = ctx.root.path().join("hello.wav");
    std::fs::write(&existing, "earlier take").unwrap();

    let output = ctx
        .cli()
        .args(["say", "hello again", "-o", "hello.wav"])
        .output()
        .await
        .unwrap();

    assert_eq!(output.status.code(), Some(3));
    assert_eq!(std::fs::read_to_string(&existing).unwrap(), "earlier take");
}

#[tokio::test]
async fn it_should_exit_with_remote_error_when_a_segment_fails() {
    let mut ctx = TestContext::new().await;
    let _failing =
        tts_mocks::mock_segment_error(&mut ctx.server, "hello there", "AuthFailure").await;

    let output = ctx
        .cli()
        .args(["say", "hello there", "-o", "out/hello.wav"])
        .output()
        .await
        .unwrap();

    assert_eq!(output.status.code(), Some(3));
    assert!(stderr(&output).contains("AuthFailure"));
    assert!(!ctx.root.path().join("out/hello.wav").exists());
    assert!(fixtures::dir_is_empty(&ctx.work_dir));
}

#[tokio::test]
async fn it_should_reject_out_of_range_speed() {
    let ctx = TestContext::new().await;

    let output = ctx
        .cli()
        .args(["say", "hello", "--speed", "-5"])
        .output()
        .await
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Speed must be between"));
}
