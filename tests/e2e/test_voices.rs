use crate::e2e::helpers::TestContext;
use pretty_assertions::assert_eq;

async fn voices(ctx: &TestContext, args: &[&str]) -> (Option<i32>, Vec<String>) {
    let output = ctx
        .cli()
        .arg("voices")
        .args(args)
        .output()
        .await
        .unwrap();
    let lines = String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect();
    (output.status.code(), lines)
}

#[tokio::test]
async fn it_should_list_every_voice_grouped_by_scene() {
    let ctx = TestContext::new().await;

    let (code, lines) = voices(&ctx, &[]).await;

    assert_eq!(code, Some(0));
    assert_eq!(lines[0], "[情感]");
    assert!(lines[1].contains("101001"));
    assert_eq!(lines.last().unwrap(), "4 voice(s)");
}

#[tokio::test]
async fn it_should_filter_by_gender_and_scene() {
    let ctx = TestContext::new().await;

    let (_, male) = voices(&ctx, &["--gender", "male"]).await;
    assert!(male.iter().any(|l| l.contains("101004")));
    assert!(male.iter().any(|l| l.contains("101050")));
    assert!(!male.iter().any(|l| l.contains("101012")));
    assert_eq!(male.last().unwrap(), "2 voice(s)");

    let (_, general) = voices(&ctx, &["--scene", "通用", "--gender", "female"]).await;
    assert_eq!(general.len(), 3);
    assert!(general[1].contains("智娜"));
}

#[tokio::test]
async fn it_should_search_case_insensitively() {
    let ctx = TestContext::new().await;

    let (_, lines) = voices(&ctx, &["--search", "wejack"]).await;

    assert!(lines.iter().any(|l| l.contains("101050")));
    assert_eq!(lines.last().unwrap(), "1 voice(s)");
}

#[tokio::test]
async fn it_should_print_filter_values() {
    let ctx = TestContext::new().await;

    let (code, scenes) = voices(&ctx, &["--scenes"]).await;
    assert_eq!(code, Some(0));
    assert_eq!(scenes, vec!["情感", "英文", "通用"]);

    let (_, categories) = voices(&ctx, &["--categories"]).await;
    assert_eq!(categories, vec!["标准音色", "精品音色"]);

    let (_, filtered) = voices(&ctx, &["--category", categories[0].as_str()]).await;
    assert!(filtered.iter().any(|l| l.contains("101012")));
    assert_eq!(filtered.last().unwrap(), "1 voice(s)");
}

#[tokio::test]
async fn it_should_report_no_matches() {
    let ctx = TestContext::new().await;

    let (code, lines) = voices(&ctx, &["--search", "nobody"]).await;

    assert_eq!(code, Some(0));
    assert_eq!(lines, vec!["No matching voices"]);
}

#[tokio::test]
async fn it_should_fail_preview_without_sample() {
    let ctx = TestContext::new().await;

    let output = ctx.cli().args(["preview", "101001"]).output().await.unwrap();

    assert_eq!(output.status.code(), Some(1));
}
