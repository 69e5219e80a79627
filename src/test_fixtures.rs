//! Test fixtures for embedding tests
//!
//! Provides stand-in ffmpeg executables (shell scripts) with scripted
//! behaviour, and real audio/cover files generated with a system ffmpeg
//! when one is installed.
//!
//! Every fake tool appends its argument list to `.ffmpeg-calls.log` in the
//! directory of the audio input, so tests can count invocations per album.

#![cfg(test)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::OnceLock;

use tempfile::TempDir;

/// Name of the invocation log written by the fake tools
pub const INVOCATION_LOG: &str = ".ffmpeg-calls.log";

static FAKE_TOOLS_DIR: OnceLock<TempDir> = OnceLock::new();

/// Scripted behaviour of a fake ffmpeg
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FakeFfmpeg {
    /// Writes audio bytes followed by cover bytes to the output, exits 0
    Succeed,
    /// Prints an error and exits 1 without writing output
    Fail,
    /// Writes a truncated output, then exits 1
    FailAfterPartialWrite,
    /// Creates an empty output and exits 0
    EmptyOutput,
    /// Exits 0 without creating the output
    NoOutput,
}

impl FakeFfmpeg {
    const ALL: [FakeFfmpeg; 5] = [
        FakeFfmpeg::Succeed,
        FakeFfmpeg::Fail,
        FakeFfmpeg::FailAfterPartialWrite,
        FakeFfmpeg::EmptyOutput,
        FakeFfmpeg::NoOutput,
    ];

    fn file_name(self) -> &'static str {
        match self {
            FakeFfmpeg::Succeed => "ffmpeg-succeed",
            FakeFfmpeg::Fail => "ffmpeg-fail",
            FakeFfmpeg::FailAfterPartialWrite => "ffmpeg-partial",
            FakeFfmpeg::EmptyOutput => "ffmpeg-empty",
            FakeFfmpeg::NoOutput => "ffmpeg-no-output",
        }
    }

    fn body(self) -> &'static str {
        match self {
            FakeFfmpeg::Succeed => "cat \"$2\" \"$4\" > \"$last\"\n",
            FakeFfmpeg::Fail => "echo 'Invalid data found when processing input' >&2\nexit 1\n",
            FakeFfmpeg::FailAfterPartialWrite => "printf 'partial' > \"$last\"\nexit 1\n",
            FakeFfmpeg::EmptyOutput => ": > \"$last\"\n",
            FakeFfmpeg::NoOutput => "exit 0\n",
        }
    }
}

/// Get the path of a fake ffmpeg script
///
/// All scripts are written once, up front. Writing a script while another
/// test thread forks can make exec fail with ETXTBSY.
pub fn fake_ffmpeg(kind: FakeFfmpeg) -> PathBuf {
    let dir = FAKE_TOOLS_DIR.get_or_init(|| {
        let dir = tempfile::Builder::new()
            .prefix("add-album-art-fake-tools-")
            .tempdir()
            .expect("Failed to create fake tools directory");

        for tool in FakeFfmpeg::ALL {
            let path = dir.path().join(tool.file_name());
            let script = format!(
                concat!(
                    "#!/bin/sh\n",
                    "for last; do :; done\n",
                    "printf '%s\\n' \"$*\" >> \"$(dirname \"$2\")/{}\"\n",
                    "{}",
                ),
                INVOCATION_LOG,
                tool.body()
            );
            fs::write(&path, script).expect("Failed to write fake ffmpeg");
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
                    .expect("Failed to make fake ffmpeg executable");
            }
        }

        dir
    });

    dir.path().join(kind.file_name())
}

/// Invocations recorded by fake tools for an album directory
pub fn read_invocations(album_dir: &Path) -> Vec<String> {
    fs::read_to_string(album_dir.join(INVOCATION_LOG))
        .map(|s| s.lines().map(str::to_string).collect())
        .unwrap_or_default()
}

/// ffmpeg from PATH, if installed
pub fn real_ffmpeg() -> Option<PathBuf> {
    which::which("ffmpeg").ok()
}

fn run_ffmpeg(ffmpeg: &Path, cmd_args: &[&str], output_path: &Path) {
    let output = Command::new(ffmpeg)
        .args(cmd_args)
        .arg("-y")
        .arg(output_path)
        .output()
        .expect("Failed to execute ffmpeg");

    if !output.status.success() {
        panic!(
            "ffmpeg failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }
}

/// Generate a one-second sine tone as `<name>.<format>` in `dir`
///
/// # Arguments
/// * `format` - "mp3" or "flac"
pub fn generate_audio_file(ffmpeg: &Path, dir: &Path, name: &str, format: &str) -> PathBuf {
    let output_path = dir.join(format!("{}.{}", name, format));
    let codec = match format {
        "mp3" => "libmp3lame",
        "flac" => "flac",
        _ => panic!("Unsupported format: {}", format),
    };

    run_ffmpeg(
        ffmpeg,
        &[
            "-f",
            "lavfi",
            "-i",
            "sine=frequency=440:duration=1",
            "-codec:a",
            codec,
        ],
        &output_path,
    );

    output_path
}

/// Generate a small solid-colour `cover.jpg` in `dir`
pub fn generate_cover(ffmpeg: &Path, dir: &Path) -> PathBuf {
    let output_path = dir.join("cover.jpg");
    run_ffmpeg(
        ffmpeg,
        &["-f", "lavfi", "-i", "color=c=red:s=64x64", "-frames:v", "1"],
        &output_path,
    );
    output_path
}

/// MD5 of the audio stream in `path`, copied out without decoding
///
/// Equal digests before and after an embed mean the audio packets were
/// stream-copied untouched.
pub fn audio_stream_md5(ffmpeg: &Path, path: &Path) -> String {
    let output = Command::new(ffmpeg)
        .args(["-v", "error", "-i"])
        .arg(path)
        .args(["-map", "0:a", "-c", "copy", "-f", "md5", "-"])
        .output()
        .expect("Failed to execute ffmpeg");

    if !output.status.success() {
        panic!(
            "ffmpeg failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }

    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn test_fake_tools_are_created() {
        for tool in FakeFfmpeg::ALL {
            let path = fake_ffmpeg(tool);
            assert!(path.exists(), "{:?} should exist", tool);
        }
    }

    #[test]
    fn test_read_invocations_without_log() {
        let temp_dir = TempDir::new().unwrap();
        assert!(read_invocations(temp_dir.path()).is_empty());
    }

    #[test]
    fn test_generate_audio_and_cover() {
        let Some(ffmpeg) = real_ffmpeg() else {
            return;
        };
        let temp_dir = TempDir::new().unwrap();

        let flac = generate_audio_file(&ffmpeg, temp_dir.path(), "gen_test", "flac");
        let cover = generate_cover(&ffmpeg, temp_dir.path());

        assert!(fs::metadata(&flac).unwrap().len() > 0);
        assert!(fs::metadata(&cover).unwrap().len() > 0);
    }
}
