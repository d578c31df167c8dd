use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

pub const VOICE_TABLE: &str = "\
音色ID,音色名称,推荐场景,音色类型,支持语言,支持采样率,支持情感
101001,智瑜,情感女声,精品音色,中文,8k/16k,中性
101004,智云,通用男声,精品音色,中文,8k/16k,中性
101012,智娜,通用女声,标准音色,中文,8k/16k,中性
101050,WeJack,英文男声,精品音色,英文,8k/16k,中性
";

pub fn write_credentials(dir: &Path) -> PathBuf {
    let path = dir.join("tencent_cloud_secret_key.csv");
    std::fs::write(&path, "SecretId,SecretKey\nAKIDe2etest,e2e-secret-key\n").unwrap();
    path
}

pub fn write_voice_table(dir: &Path) -> PathBuf {
    let path = dir.join("tencent_cloud_voice_type.csv");
    std::fs::write(&path, VOICE_TABLE).unwrap();
    path
}

fn write_script(path: &Path, body: &str) -> PathBuf {
    std::fs::write(path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path.to_path_buf()
}

/// Stand-in for ffmpeg: appends every file named in the concat list to the output
pub fn write_fake_ffmpeg(dir: &Path) -> PathBuf {
    write_script(
        &dir.join("fake-ffmpeg"),
        r#"prev=""
for arg in "$@"; do
  [ "$prev" = "-i" ] && list="$arg"
  prev="$arg"
  out="$arg"
done
: > "$out"
sed -n "s/^file '\(.*\)'$/\1/p" "$list" | while IFS= read -r f; do cat "$f" >> "$out"; done"#,
    )
}

/// Stand-in for ffmpeg that always fails with a diagnostic
pub fn write_failing_ffmpeg(dir: &Path) -> PathBuf {
    write_script(
        &dir.join("failing-ffmpeg"),
        "echo 'Unknown encoder libmp3lame' >&2\nexit 1",
    )
}

pub fn dir_is_empty(dir: &Path) -> bool {
    std::fs::read_dir(dir).unwrap().next().is_none()
}
