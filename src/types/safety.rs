//! Safety-related types for the Gemini API.

use serde::{Deserialize, Serialize};

/// Safety setting for content generation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SafetySetting {
    /// The harm category to configure.
    pub category: HarmCategory,
    /// The blocking threshold for this category.
    pub threshold: HarmBlockThreshold,
}

impl SafetySetting {
    /// Creates a setting for one category.
    pub fn new(category: HarmCategory, threshold: HarmBlockThreshold) -> Self {
        Self { category, threshold }
    }

    /// The five-category policy that turns off blocking entirely.
    pub fn block_none_for_all() -> Vec<SafetySetting> {
        HarmCategory::ALL
            .iter()
            .map(|category| SafetySetting::new(*category, HarmBlockThreshold::BlockNone))
            .collect()
    }
}

/// Categories of harmful content.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum HarmCategory {
    /// Dangerous content.
    #[serde(rename = "HARM_CATEGORY_DANGEROUS_CONTENT")]
    DangerousContent,
    /// Harassment content.
    #[serde(rename = "HARM_CATEGORY_HARASSMENT")]
    Harassment,
    /// Civic integrity content.
    #[serde(rename = "HARM_CATEGORY_CIVIC_INTEGRITY")]
    CivicIntegrity,
    /// Hate speech content.
    #[serde(rename = "HARM_CATEGORY_HATE_SPEECH")]
    HateSpeech,
    /// Sexually explicit content.
    #[serde(rename = "HARM_CATEGORY_SEXUALLY_EXPLICIT")]
    SexuallyExplicit,
}

impl HarmCategory {
    /// Every category, in the order used by [`SafetySetting::block_none_for_all`].
    pub const ALL: [HarmCategory; 5] = [
        HarmCategory::DangerousContent,
        HarmCategory::Harassment,
        HarmCategory::CivicIntegrity,
        HarmCategory::HateSpeech,
        HarmCategory::SexuallyExplicit,
    ];
}

/// Thresholds for blocking harmful content.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum HarmBlockThreshold {
    /// Block none.
    #[serde(rename = "BLOCK_NONE")]
    BlockNone,
    /// Block low and above.
    #[serde(rename = "BLOCK_LOW_AND_ABOVE")]
    BlockLowAndAbove,
    /// Block medium and above.
    #[serde(rename = "BLOCK_MEDIUM_AND_ABOVE")]
    BlockMediumAndAbove,
    /// Block only high.
    #[serde(rename = "BLOCK_ONLY_HIGH")]
    BlockOnlyHigh,
}
