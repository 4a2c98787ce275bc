//! Learning-pathway records bound to facets.
//!
//! The content collaborator hands the widget exactly one pathway per facet;
//! the records are immutable for the widget's lifetime. The color key picks
//! a rendering color and nothing else.

use serde::{Deserialize, Serialize};

/// Display color classification for a pathway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorKey {
    Blue,
    Teal,
    Orange,
    Purple,
    Green,
    Red,
}

impl ColorKey {
    /// CSS hex form, for the vector renderer.
    pub const fn hex(&self) -> &'static str {
        match self {
            ColorKey::Blue => "#3b82f6",
            ColorKey::Teal => "#14b8a6",
            ColorKey::Orange => "#f97316",
            ColorKey::Purple => "#8b5cf6",
            ColorKey::Green => "#10b981",
            ColorKey::Red => "#ef4444",
        }
    }

    /// Linear-ish RGB triple in `[0, 1]`, for the GPU renderer.
    pub fn rgb(&self) -> [f32; 3] {
        let bytes: [u8; 3] = match self {
            ColorKey::Blue => [0x3b, 0x82, 0xf6],
            ColorKey::Teal => [0x14, 0xb8, 0xa6],
            ColorKey::Orange => [0xf9, 0x73, 0x16],
            ColorKey::Purple => [0x8b, 0x5c, 0xf6],
            ColorKey::Green => [0x10, 0xb9, 0x81],
            ColorKey::Red => [0xef, 0x44, 0x44],
        };
        bytes.map(|b| b as f32 / 255.0)
    }
}

/// One learning modality: drives both a facet's identity and the overlay
/// content shown when it is selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pathway {
    /// Stable facet index in `[0, n)`.
    pub index: usize,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub color: ColorKey,
}

impl Pathway {
    fn new(index: usize, title: &str, subtitle: &str, description: &str, color: ColorKey) -> Self {
        Self {
            index,
            title: title.into(),
            subtitle: subtitle.into(),
            description: description.into(),
            color,
        }
    }
}

/// The six encoding pathways, for the demo binary and tests.
pub fn demo_pathways() -> Vec<Pathway> {
    vec![
        Pathway::new(
            0,
            "Semantic Encoding",
            "Compressed Clarity",
            "Transform complex concepts into memorable, meaningful understanding",
            ColorKey::Blue,
        ),
        Pathway::new(
            1,
            "Episodic Encoding",
            "Spaced Recall",
            "Strategic retrieval practice that moves knowledge into long-term memory",
            ColorKey::Teal,
        ),
        Pathway::new(
            2,
            "Metacognitive Encoding",
            "Confidence Awareness",
            "Build self-monitoring skills that prevent exam mistakes",
            ColorKey::Orange,
        ),
        Pathway::new(
            3,
            "Visual/Dual Coding",
            "See & Say Integration",
            "Combine visual and verbal learning for maximum retention",
            ColorKey::Purple,
        ),
        Pathway::new(
            4,
            "Generative Encoding",
            "Teach-Back Mastery",
            "Master concepts by explaining them in your own words",
            ColorKey::Green,
        ),
        Pathway::new(
            5,
            "Procedural Encoding",
            "Learn by Doing",
            "Build muscle memory through hands-on practice",
            ColorKey::Red,
        ),
    ]
}
