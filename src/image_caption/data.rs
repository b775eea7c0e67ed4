use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Deserialize;

use crate::data::{Dataset, SampleId};
use crate::error::EvalError;

pub type CaptionDataset = Dataset<CaptionSample>;

/// Supported captioning annotation schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[derive(Deserialize)]
#[serde(try_from = "String")]
pub enum CaptionFamily {
    /// `captions_*.json`: an image list joined with an annotation list.
    Coco,
    /// `TextCaps_*.json`: one self-contained record per caption.
    TextCaps,
}

impl CaptionFamily {
    pub fn tag(&self) -> &'static str {
        match self {
            CaptionFamily::Coco => "coco",
            CaptionFamily::TextCaps => "textcaps",
        }
    }
}

impl fmt::Display for CaptionFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for CaptionFamily {
    type Err = EvalError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "coco" => Ok(CaptionFamily::Coco),
            "textcaps" => Ok(CaptionFamily::TextCaps),
            other => Err(EvalError::UnknownDataset(other.to_owned())),
        }
    }
}

impl TryFrom<String> for CaptionFamily {
    type Error = EvalError;

    fn try_from(tag: String) -> Result<Self, Self::Error> {
        tag.parse()
    }
}

/// One (image, reference caption) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionSample {
    pub image_id: SampleId,
    pub image_path: PathBuf,
    pub caption: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawCocoCaptions {
    pub images: Vec<RawCocoImage>,
    pub annotations: Vec<RawCocoCaption>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawCocoImage {
    pub id: SampleId,
    pub file_name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawCocoCaption {
    pub image_id: SampleId,
    pub caption: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawTextCaps {
    pub data: Vec<RawTextCapsRecord>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawTextCapsRecord {
    pub image_id: SampleId,
    pub image_path: String,
    pub caption_str: String,
}
