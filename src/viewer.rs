use std::path::Path;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::config::ViewerConfig;
use crate::error::{Result, VisualizeError};

/// Open a rendered file with the configured viewer, or the platform opener.
/// Does not wait for the viewer to exit.
pub(crate) fn open(path: &Path, cfg: &ViewerConfig) -> Result<()> {
    let mut cmd = match cfg.command.as_deref() {
        Some(custom) => {
            let mut parts = custom.split_whitespace();
            let program = parts.next().unwrap_or(custom);
            let mut cmd = Command::new(program);
            cmd.args(parts);
            cmd
        }
        None => platform_opener(),
    };
    cmd.arg(path).stdout(Stdio::null()).stderr(Stdio::null());
    debug!("opening {} with {:?}", path.display(), cmd);

    cmd.spawn().map(|_| ()).map_err(|source| VisualizeError::Viewer {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(target_os = "macos")]
fn platform_opener() -> Command {
    Command::new("open")
}

#[cfg(target_os = "windows")]
fn platform_opener() -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", "start", ""]);
    cmd
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn platform_opener() -> Command {
    Command::new("xdg-open")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_viewer_reports_path() {
        let cfg = ViewerConfig {
            command: Some("neatviz-no-such-viewer --flag".to_string()),
        };
        let err = open(Path::new("net.svg"), &cfg).unwrap_err();
        match err {
            VisualizeError::Viewer { path, .. } => assert_eq!(path, Path::new("net.svg")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
