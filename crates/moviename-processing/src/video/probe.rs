//! Video probe - metadata extraction through ffprobe

use anyhow::{anyhow, Result};
use std::path::Path;
use tokio::process::Command;

use crate::error::SamplingError;
use crate::metadata::VideoMetadata;

const DANGEROUS_CHARS: [char; 11] = [';', '|', '&', '$', '`', '(', ')', '<', '>', '\n', '\r'];

/// Validate that a path doesn't contain shell metacharacters or dangerous sequences
pub(crate) fn validate_path(path: &str) -> Result<()> {
    if path.chars().any(|c| DANGEROUS_CHARS.contains(&c)) {
        return Err(anyhow!("Path contains dangerous characters: {}", path));
    }

    if path.contains("..") {
        return Err(anyhow!("Path contains directory traversal: {}", path));
    }

    Ok(())
}

/// Validate the path of an external binary (ffmpeg, ffprobe).
///
/// The path is passed as argv, never through a shell, so spaces and drive
/// colons (`C:\Program Files\...`) are fine.
pub(crate) fn validate_binary_path(path: &str) -> Result<()> {
    validate_path(path)?;

    if path.trim().is_empty()
        || !path.chars().all(|c| {
            c.is_alphanumeric() || matches!(c, '/' | '\\' | '-' | '_' | '.' | ' ' | ':')
        })
    {
        return Err(anyhow!("Invalid binary path: contains unsafe characters"));
    }

    Ok(())
}

#[derive(Debug, Clone)]
pub struct VideoProbe {
    ffprobe_path: String,
}

impl VideoProbe {
    pub fn new(ffprobe_path: String) -> Result<Self> {
        validate_binary_path(&ffprobe_path)
            .map_err(|e| anyhow!("Invalid ffprobe_path: {}", e))?;

        Ok(Self { ffprobe_path })
    }

    /// Read duration and native dimensions of the first video stream.
    #[tracing::instrument(skip(self), fields(
        process.executable.name = "ffprobe",
        process.executable.path = %self.ffprobe_path,
        ffmpeg.operation = "probe"
    ))]
    pub async fn probe(&self, video_path: &Path) -> Result<VideoMetadata, SamplingError> {
        let start = std::time::Instant::now();

        validate_path(&video_path.to_string_lossy())
            .map_err(|e| SamplingError::decode(format!("Invalid video path: {}", e)))?;

        let output = Command::new(&self.ffprobe_path)
            .args([
                "-v",
                "error",
                "-print_format",
                "json",
                "-show_format",
                "-show_streams",
                "-select_streams",
                "v:0",
            ])
            .arg(video_path)
            .output()
            .await
            .map_err(|e| SamplingError::decode(format!("Failed to execute ffprobe: {}", e)))?;

        if !output.status.success() {
            return Err(SamplingError::decode(format!(
                "ffprobe failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let metadata = parse_probe_output(&output.stdout)?;

        tracing::info!(
            duration_ms = start.elapsed().as_millis(),
            video_duration = metadata.duration,
            width = metadata.width,
            height = metadata.height,
            codec = %metadata.codec,
            "Video probe completed"
        );

        Ok(metadata)
    }
}

pub(crate) fn parse_probe_output(stdout: &[u8]) -> Result<VideoMetadata, SamplingError> {
    let probe_data: serde_json::Value = serde_json::from_slice(stdout)
        .map_err(|e| SamplingError::decode(format!("Failed to parse ffprobe output: {}", e)))?;

    let stream = probe_data["streams"]
        .get(0)
        .ok_or_else(|| SamplingError::decode("No video stream found"))?;

    let format = &probe_data["format"];

    // WebM often carries the duration only at container level.
    let duration = format["duration"]
        .as_str()
        .or_else(|| stream["duration"].as_str())
        .and_then(|d| d.parse::<f64>().ok())
        .filter(|d| d.is_finite() && *d >= 0.0)
        .ok_or_else(|| SamplingError::decode("Could not parse duration"))?;

    let width = stream["width"]
        .as_u64()
        .filter(|w| *w > 0)
        .ok_or_else(|| SamplingError::decode("Could not parse width"))? as u32;

    let height = stream["height"]
        .as_u64()
        .filter(|h| *h > 0)
        .ok_or_else(|| SamplingError::decode("Could not parse height"))? as u32;

    let codec = stream["codec_name"]
        .as_str()
        .unwrap_or("unknown")
        .to_string();

    let framerate = stream["r_frame_rate"].as_str().and_then(|r| {
        let (num, den) = r.split_once('/')?;
        let num: f32 = num.parse().ok()?;
        let den: f32 = den.parse().ok()?;
        if den != 0.0 {
            Some(num / den)
        } else {
            None
        }
    });

    Ok(VideoMetadata {
        duration,
        width,
        height,
        codec,
        framerate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MP4_PROBE: &str = r#"{
        "streams": [{
            "index": 0,
            "codec_name": "h264",
            "width": 1280,
            "height": 720,
            "r_frame_rate": "30000/1001"
        }],
        "format": { "duration": "8.000000", "bit_rate": "1200000" }
    }"#;

    #[test]
    fn test_parse_probe_output() {
        let metadata = parse_probe_output(MP4_PROBE.as_bytes()).unwrap();
        assert_eq!(metadata.duration, 8.0);
        assert_eq!((metadata.width, metadata.height), (1280, 720));
        assert_eq!(metadata.codec, "h264");
        assert!((metadata.framerate.unwrap() - 29.97).abs() < 0.01);
    }

    #[test]
    fn test_stream_duration_fallback() {
        let json = r#"{
            "streams": [{ "codec_name": "vp9", "width": 640, "height": 360, "duration": "3.5" }],
            "format": {}
        }"#;
        let metadata = parse_probe_output(json.as_bytes()).unwrap();
        assert_eq!(metadata.duration, 3.5);
        assert_eq!(metadata.framerate, None);
    }

    #[test]
    fn test_no_video_stream() {
        let json = r#"{ "streams": [], "format": { "duration": "1.0" } }"#;
        assert!(matches!(
            parse_probe_output(json.as_bytes()),
            Err(SamplingError::Decode(_))
        ));
    }

    #[test]
    fn test_missing_duration() {
        let json = r#"{ "streams": [{ "width": 10, "height": 10 }], "format": { "duration": "N/A" } }"#;
        assert!(matches!(
            parse_probe_output(json.as_bytes()),
            Err(SamplingError::Decode(_))
        ));
    }

    #[test]
    fn test_garbage_output() {
        assert!(parse_probe_output(b"not json").is_err());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("/tmp/moviename-abc.mp4").is_ok());
        assert!(validate_path("/tmp/a;rm -rf.mp4").is_err());
        assert!(validate_path("../etc/passwd").is_err());
    }

    #[test]
    fn test_binary_path_validation() {
        assert!(VideoProbe::new("ffprobe".to_string()).is_ok());
        assert!(VideoProbe::new("/usr/bin/ffprobe".to_string()).is_ok());
        assert!(VideoProbe::new("ffprobe $(id)".to_string()).is_err());
        assert!(VideoProbe::new(String::new()).is_err());
        assert!(VideoProbe::new("   ".to_string()).is_err());
    }

    #[test]
    fn test_binary_path_with_spaces_and_drive() {
        let windows = r"C:\Program Files\ffmpeg\bin\ffprobe.exe";
        assert!(VideoProbe::new(windows.to_string()).is_ok());
        assert!(VideoProbe::new("/opt/media tools/ffprobe".to_string()).is_ok());
        assert!(validate_binary_path("/opt/media tools/ffmpeg").is_ok());
    }

    #[tokio::test]
    async fn test_missing_binary_is_decode_error() {
        let probe = VideoProbe::new("/nonexistent/bin/ffprobe".to_string()).unwrap();
        let result = probe.probe(Path::new("/tmp/clip.mp4")).await;
        assert!(matches!(result, Err(SamplingError::Decode(_))));
    }
}
