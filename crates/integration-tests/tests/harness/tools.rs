//! Stand-in `ffmpeg` and `rhubarb` executables plus canned assets
//!
//! Scripts are written once per test binary, before any test spawns a
//! tool, so no child process inherits an open write handle to them.

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tempfile::TempDir;

/// Cue file written by the fake Rhubarb
pub const CUES: &str = r#"{"metadata":{"soundFile":"message.wav","duration":0.5},"mouthCues":[{"start":0.00,"end":0.50,"value":"X"}]}"#;

/// Cue file of every canned asset
pub const CANNED_CUES: &str = r#"{"metadata":{"soundFile":"canned.wav","duration":1.0},"mouthCues":[{"start":0.00,"end":1.00,"value":"B"}]}"#;

struct Tools {
    dir: TempDir,
}

fn tools() -> &'static Tools {
    static TOOLS: OnceLock<Tools> = OnceLock::new();

    TOOLS.get_or_init(|| {
        let dir = tempfile::tempdir().unwrap();

        // ffmpeg -y -i <input> <output>
        script(dir.path(), "ffmpeg", "cp \"$3\" \"$4\"\n");
        script(dir.path(), "ffmpeg-broken", "echo 'invalid data found' >&2\nexit 1\n");

        // rhubarb -f json -o <output> <audio> -r <recognizer>
        script(
            dir.path(),
            "rhubarb",
            &format!("cat > \"$4\" <<'JSON'\n{CUES}\nJSON\n"),
        );
        script(dir.path(), "rhubarb-broken", "echo 'cannot decode audio' >&2\nexit 1\n");
        script(dir.path(), "rhubarb-slow", "sleep 5\n");

        let assets = dir.path().join("audios");
        std::fs::create_dir(&assets).unwrap();
        for name in ["intro_0", "intro_1", "api_0", "api_1"] {
            std::fs::write(assets.join(format!("{name}.wav")), format!("RIFF{name}")).unwrap();
            std::fs::write(assets.join(format!("{name}.json")), CANNED_CUES).unwrap();
        }

        Tools { dir }
    })
}

fn script(dir: &Path, name: &str, body: &str) {
    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}")).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
}

pub fn ffmpeg() -> PathBuf {
    tools().dir.path().join("ffmpeg")
}

/// ffmpeg that exits non-zero
pub fn broken_ffmpeg() -> PathBuf {
    tools().dir.path().join("ffmpeg-broken")
}

pub fn rhubarb() -> PathBuf {
    tools().dir.path().join("rhubarb")
}

/// Rhubarb that exits non-zero
pub fn broken_rhubarb() -> PathBuf {
    tools().dir.path().join("rhubarb-broken")
}

/// Rhubarb that outlives any reasonable timeout
pub fn slow_rhubarb() -> PathBuf {
    tools().dir.path().join("rhubarb-slow")
}

/// Directory with the four canned responses
pub fn assets_dir() -> PathBuf {
    tools().dir.path().join("audios")
}
