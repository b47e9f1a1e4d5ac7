//! Generation options

use crate::error::{EaselError, EaselResult};
use std::fmt;
use std::str::FromStr;

/// Output aspect ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AspectRatio {
    /// 1:1
    Square,
    /// 3:4
    Portrait,
    /// 4:3
    #[default]
    Landscape,
    /// 16:9
    Wide,
    /// 9:16
    Tall,
}

impl AspectRatio {
    pub const ALL: [AspectRatio; 5] = [
        Self::Square,
        Self::Portrait,
        Self::Landscape,
        Self::Wide,
        Self::Tall,
    ];

    /// Wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Square => "1:1",
            Self::Portrait => "3:4",
            Self::Landscape => "4:3",
            Self::Wide => "16:9",
            Self::Tall => "9:16",
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AspectRatio {
    type Err = EaselError;

    fn from_str(s: &str) -> EaselResult<Self> {
        Self::ALL
            .into_iter()
            .find(|ratio| ratio.as_str() == s.trim())
            .ok_or_else(|| {
                EaselError::invalid_input_field(
                    format!("Unsupported aspect ratio '{}' (expected 1:1, 3:4, 4:3, 16:9 or 9:16)", s),
                    "aspect_ratio",
                )
            })
    }
}

/// Output resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Resolution {
    #[default]
    OneK,
    TwoK,
    FourK,
}

impl Resolution {
    /// Wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneK => "1K",
            Self::TwoK => "2K",
            Self::FourK => "4K",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resolution {
    type Err = EaselError;

    fn from_str(s: &str) -> EaselResult<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "1K" => Ok(Self::OneK),
            "2K" => Ok(Self::TwoK),
            "4K" => Ok(Self::FourK),
            _ => Err(EaselError::invalid_input_field(
                format!("Unsupported resolution '{}' (expected 1K, 2K or 4K)", s),
                "resolution",
            )),
        }
    }
}

/// Image model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageModel {
    #[default]
    Gemini3ProImagePreview,
    Gemini25FlashImage,
}

impl ImageModel {
    /// Model identifier used in API paths
    pub fn id(&self) -> &'static str {
        match self {
            Self::Gemini3ProImagePreview => "gemini-3-pro-image-preview",
            Self::Gemini25FlashImage => "gemini-2.5-flash-image",
        }
    }

    /// Whether the model accepts an explicit output resolution
    pub fn supports_image_size(&self) -> bool {
        matches!(self, Self::Gemini3ProImagePreview)
    }
}

impl fmt::Display for ImageModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ImageModel {
    type Err = EaselError;

    fn from_str(s: &str) -> EaselResult<Self> {
        match s.trim() {
            "gemini-3-pro-image-preview" => Ok(Self::Gemini3ProImagePreview),
            "gemini-2.5-flash-image" => Ok(Self::Gemini25FlashImage),
            other => Err(EaselError::invalid_input_field(
                format!("Unknown image model '{}'", other),
                "model",
            )),
        }
    }
}

/// Options for one generation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GenerationOptions {
    pub aspect_ratio: AspectRatio,
    pub resolution: Resolution,
    pub model: ImageModel,
}

impl GenerationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_aspect_ratio(mut self, aspect_ratio: AspectRatio) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    pub fn with_resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn with_model(mut self, model: ImageModel) -> Self {
        self.model = model;
        self
    }
}
