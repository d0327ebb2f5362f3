// Domain models - Durations, containers, codecs and the transformation plan

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// An H:M:S timestamp, as the engine reports and consumes it.
///
/// Semantically equivalent to a single non-negative seconds count.
/// `hours` and `minutes` are whole; `seconds` may carry a fractional part
/// for display contexts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VideoDuration {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: f64,
}

impl VideoDuration {
    /// Create a duration from its clock components
    pub fn new(hours: u32, minutes: u32, seconds: f64) -> Self {
        Self {
            hours,
            minutes,
            seconds,
        }
    }

    /// The zero-length duration
    pub fn zero() -> Self {
        Self::new(0, 0, 0.0)
    }

    /// Split a seconds count into clock components
    pub fn from_seconds(total_seconds: f64) -> Self {
        let total = total_seconds.max(0.0);
        let hours = (total / 3600.0).floor() as u32;
        let minutes = ((total % 3600.0) / 60.0).floor() as u32;
        let seconds = total % 60.0;

        Self {
            hours,
            minutes,
            seconds,
        }
    }

    /// Collapse back into a seconds count
    pub fn to_seconds(&self) -> f64 {
        self.hours as f64 * 3600.0 + self.minutes as f64 * 60.0 + self.seconds
    }

    pub fn is_zero(&self) -> bool {
        self.to_seconds() == 0.0
    }

    /// Zero-padded "HH:MM:SS" with the fractional seconds truncated.
    /// This is the form the engine accepts for `-ss` and `-t` arguments.
    pub fn to_timestamp(&self) -> String {
        format!(
            "{:02}:{:02}:{:02}",
            self.hours, self.minutes, self.seconds as u32
        )
    }

    /// Compact human-readable form: sub-minute spans keep two decimals of
    /// sub-second precision ("5.00s"), longer spans drop it ("02:05",
    /// "01:02:05").
    pub fn to_short_string(&self) -> String {
        if self.hours == 0 && self.minutes == 0 {
            format!("{:.2}s", self.seconds)
        } else if self.hours == 0 {
            format!("{:02}:{:02}", self.minutes, self.seconds as u32)
        } else {
            format!(
                "{:02}:{:02}:{:02}",
                self.hours, self.minutes, self.seconds as u32
            )
        }
    }

    /// The duration at `percent` (0-100) of this one
    pub fn at_percent(&self, percent: f64) -> Self {
        Self::from_seconds(self.to_seconds() * (percent / 100.0))
    }

    /// Timestamp form of `at_percent`
    pub fn to_timestamp_at_percent(&self, percent: f64) -> String {
        self.at_percent(percent).to_timestamp()
    }

    /// Short form of `at_percent`
    pub fn to_short_string_at_percent(&self, percent: f64) -> String {
        self.at_percent(percent).to_short_string()
    }

    /// Difference of two durations; `None` when the result would be
    /// negative
    pub fn checked_sub(&self, other: &Self) -> Option<Self> {
        let difference = self.to_seconds() - other.to_seconds();
        if difference < 0.0 {
            None
        } else {
            Some(Self::from_seconds(difference))
        }
    }

    /// Difference of two durations, clamped to zero
    pub fn saturating_sub(&self, other: &Self) -> Self {
        Self::from_seconds((self.to_seconds() - other.to_seconds()).max(0.0))
    }

    /// Parse "HH:MM:SS(.frac)", "MM:SS(.frac)" or a plain seconds count
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let trimmed = input.trim();

        if let Ok(seconds) = trimmed.parse::<f64>() {
            if seconds < 0.0 {
                return Err(DomainError::InvalidTimestamp(input.to_string()));
            }
            return Ok(Self::from_seconds(seconds));
        }

        let parts: Vec<&str> = trimmed.split(':').collect();
        match parts.as_slice() {
            [minutes, seconds] => {
                let minutes = parse_clock_field(minutes, input)?;
                let seconds = parse_seconds_field(seconds, input)?;
                Ok(Self::from_seconds(minutes as f64 * 60.0 + seconds))
            }
            [hours, minutes, seconds] => {
                let hours = hours
                    .trim()
                    .parse::<u32>()
                    .map_err(|_| DomainError::InvalidTimestamp(input.to_string()))?;
                let minutes = parse_clock_field(minutes, input)?;
                let seconds = parse_seconds_field(seconds, input)?;
                Ok(Self::from_seconds(
                    hours as f64 * 3600.0 + minutes as f64 * 60.0 + seconds,
                ))
            }
            _ => Err(DomainError::InvalidTimestamp(input.to_string())),
        }
    }
}

/// Parse a minutes field, rejecting values of 60 and above
fn parse_clock_field(field: &str, original: &str) -> Result<u32, DomainError> {
    let value = field
        .trim()
        .parse::<u32>()
        .map_err(|_| DomainError::InvalidTimestamp(original.to_string()))?;
    if value >= 60 {
        return Err(DomainError::InvalidTimestamp(original.to_string()));
    }
    Ok(value)
}

/// Parse a seconds field, allowing a fractional part but rejecting >= 60
fn parse_seconds_field(field: &str, original: &str) -> Result<f64, DomainError> {
    let value = field
        .trim()
        .parse::<f64>()
        .map_err(|_| DomainError::InvalidTimestamp(original.to_string()))?;
    if !(0.0..60.0).contains(&value) {
        return Err(DomainError::InvalidTimestamp(original.to_string()));
    }
    Ok(value)
}

impl fmt::Display for VideoDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_timestamp())
    }
}

/// Container formats the engine build ships muxers for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Avi,
    Mov,
    Mp4,
    Webm,
    Wmv,
}

impl Format {
    pub const ALL: [Format; 5] = [
        Format::Avi,
        Format::Mov,
        Format::Mp4,
        Format::Webm,
        Format::Wmv,
    ];

    /// File extension, also used to name staged engine files
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Avi => "avi",
            Format::Mov => "mov",
            Format::Mp4 => "mp4",
            Format::Webm => "webm",
            Format::Wmv => "wmv",
        }
    }

    /// MIME type the host uses when handing bytes back to a viewer
    pub fn mime_type(&self) -> &'static str {
        match self {
            Format::Avi => "video/avi",
            Format::Mov => "video/mov",
            Format::Mp4 => "video/mp4",
            Format::Webm => "video/webm",
            Format::Wmv => "video/wmv",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Format::Avi => "AVI",
            Format::Mov => "QuickTime",
            Format::Mp4 => "MP4",
            Format::Webm => "WebM",
            Format::Wmv => "Windows Media",
        }
    }

    /// Codecs this container may be encoded with, preferred first
    pub fn codecs(&self) -> &'static [Codec] {
        match self {
            Format::Avi => &[Codec::H264, Codec::Mpeg4],
            Format::Mov => &[Codec::H264],
            Format::Mp4 => &[Codec::H264, Codec::Mpeg4],
            Format::Webm => &[Codec::Vp9, Codec::Vp8],
            Format::Wmv => &[Codec::Windows],
        }
    }

    /// Default codec for conversions targeting this container
    pub fn default_codec(&self) -> Codec {
        self.codecs()[0]
    }

    pub fn supports_codec(&self, codec: Codec) -> bool {
        self.codecs().contains(&codec)
    }

    /// Whether a standard browser viewer can play this container.
    /// wmv and avi lack native playback support; converting to them
    /// still succeeds but the result needs a download, not a preview.
    pub fn is_browser_playable(&self) -> bool {
        !matches!(self, Format::Avi | Format::Wmv)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl FromStr for Format {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "avi" => Ok(Format::Avi),
            "mov" => Ok(Format::Mov),
            "mp4" => Ok(Format::Mp4),
            "webm" => Ok(Format::Webm),
            "wmv" => Ok(Format::Wmv),
            other => Err(DomainError::UnknownFormat(other.to_string())),
        }
    }
}

/// Video codecs the engine build ships encoders for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Codec {
    H264,
    Vp8,
    Vp9,
    Windows,
    Mpeg4,
}

impl Codec {
    pub fn display_name(&self) -> &'static str {
        match self {
            Codec::H264 => "H.264",
            Codec::Vp8 => "VP8",
            Codec::Vp9 => "VP9",
            Codec::Windows => "Windows Media Video",
            Codec::Mpeg4 => "MPEG-4",
        }
    }

    /// Library identifier passed to the engine's `-c:v` argument
    pub fn engine_lib(&self) -> &'static str {
        match self {
            Codec::H264 => "libx264",
            Codec::Vp8 => "libvpx",
            Codec::Vp9 => "libvpx-vp9",
            Codec::Windows => "wmv2",
            Codec::Mpeg4 => "libx264",
        }
    }

    /// Valid constant-rate-factor range for this codec
    pub fn compression_range(&self) -> (u32, u32) {
        match self {
            Codec::H264 => (1, 51),
            Codec::Vp8 => (4, 63),
            Codec::Vp9 => (1, 63),
            Codec::Windows => (1, 51),
            Codec::Mpeg4 => (1, 31),
        }
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Codec {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "h264" => Ok(Codec::H264),
            "vp8" => Ok(Codec::Vp8),
            "vp9" => Ok(Codec::Vp9),
            "windows" => Ok(Codec::Windows),
            "mpeg4" => Ok(Codec::Mpeg4),
            other => Err(DomainError::UnknownCodec(other.to_string())),
        }
    }
}

/// One requested edit with its kind-specific parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Transformation {
    Convert { to: Format, codec: Codec },
    Grayscale,
    Mute,
    Trim { from: VideoDuration, to: VideoDuration },
}

impl Transformation {
    pub fn kind(&self) -> TransformationKind {
        match self {
            Transformation::Convert { .. } => TransformationKind::Convert,
            Transformation::Grayscale => TransformationKind::Grayscale,
            Transformation::Mute => TransformationKind::Mute,
            Transformation::Trim { .. } => TransformationKind::Trim,
        }
    }
}

/// Flat transformation discriminant, used for set-like plan removal and
/// phase ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformationKind {
    Trim,
    Mute,
    Grayscale,
    Convert,
}

impl fmt::Display for TransformationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransformationKind::Trim => "trim",
            TransformationKind::Mute => "mute",
            TransformationKind::Grayscale => "grayscale",
            TransformationKind::Convert => "convert",
        };
        write!(f, "{}", name)
    }
}

/// The user's edit plan: transformations in UI-add order.
///
/// Insertion order is not execution order; the pipeline resolves the
/// canonical phase sequence through `domain::rules::execution_order`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformationPlan {
    steps: Vec<Transformation>,
}

impl TransformationPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a transformation in UI-add order
    pub fn push(&mut self, transformation: Transformation) {
        self.steps.push(transformation);
    }

    /// Remove every entry of the given kind; a no-op when none exist
    pub fn remove_kind(&mut self, kind: TransformationKind) {
        self.steps.retain(|step| step.kind() != kind);
    }

    pub fn steps(&self) -> &[Transformation] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn clear(&mut self) {
        self.steps.clear();
    }
}

/// Probed description of the staged source file
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceMedia {
    pub format: Format,
    pub duration: VideoDuration,
}
