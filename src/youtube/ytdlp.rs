use std::{path::PathBuf, process::Command};

use log::debug;
use serde::Deserialize;

use crate::domain::video::VideoMetadata;

use super::{ExtractionError, MetadataExtractor};

/// Metadata extraction through a `yt-dlp` executable.
///
/// Only the JSON info dump is requested, nothing is downloaded.
#[derive(Debug, Clone)]
pub struct YtDlp {
    pub executable: PathBuf,
}

/// The fields of yt-dlp's info dump we care about
#[derive(Debug, Deserialize)]
struct InfoDump {
    title: Option<String>,
    uploader: Option<String>,
}

impl YtDlp {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    fn command(&self, url: &str) -> Command {
        let mut cmd = Command::new(&self.executable);
        cmd.arg("--dump-single-json")
            .arg("--skip-download")
            .arg("--no-playlist")
            .arg("--no-warnings")
            .arg("--quiet")
            .arg(url);
        cmd
    }

    pub(crate) fn parse_dump(url: &str, stdout: &[u8]) -> Result<VideoMetadata, ExtractionError> {
        let dump: InfoDump = serde_json::from_slice(stdout)?;

        let title = dump
            .title
            .filter(|t| !t.trim().is_empty())
            .ok_or(ExtractionError::MissingTitle)?;

        Ok(VideoMetadata {
            title,
            uploader_name: dump.uploader.unwrap_or_default(),
            source_url: url.to_string(),
        })
    }
}

impl MetadataExtractor for YtDlp {
    fn extract(&self, url: &str) -> Result<VideoMetadata, ExtractionError> {
        debug!("Running {} for {url}", self.executable.to_string_lossy());

        let output = self.command(url).output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(ExtractionError::Failed {
                status: output.status,
                stderr,
            });
        }

        Self::parse_dump(url, &output.stdout)
    }
}
