//! Image labelling and product categorisation
//!
//! A `LabelSource` turns image bytes into scored labels. The categoriser
//! maps those labels onto catalog categories, materials and a style.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Category scores below this are not reported
const CATEGORY_THRESHOLD: f64 = 0.1;
const MAX_CATEGORIES: usize = 3;
const DEFAULT_CATEGORY: &str = "Crafts";
const DEFAULT_STYLE: &str = "handcrafted";

const CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    ("Pottery", &["pottery", "ceramic", "clay", "vase", "bowl", "mug", "plate"]),
    ("Furniture", &["furniture", "table", "chair", "cabinet", "shelf", "desk", "bench"]),
    ("Jewelry", &["jewelry", "necklace", "bracelet", "ring", "earrings", "pendant"]),
    ("Textiles", &["textile", "fabric", "clothing", "blanket", "pillow", "rug", "tapestry"]),
    ("Woodwork", &["wood", "wooden", "carving", "sculpture", "lumber"]),
    ("Metalwork", &["metal", "iron", "bronze", "copper", "steel", "aluminum"]),
    ("Glasswork", &["glass", "crystal", "transparent", "clear"]),
    ("Art", &["art", "painting", "drawing", "canvas", "frame"]),
];

const MATERIAL_KEYWORDS: &[&str] = &[
    "wood", "wooden", "oak", "pine", "cedar", "bamboo",
    "clay", "ceramic", "porcelain", "earthenware",
    "metal", "iron", "steel", "copper", "bronze", "silver", "gold",
    "glass", "crystal",
    "fabric", "cotton", "wool", "silk", "linen",
    "leather", "plastic", "stone", "marble", "granite",
];

const STYLE_KEYWORDS: &[(&str, &[&str])] = &[
    ("traditional", &["traditional", "classic", "vintage", "antique"]),
    ("modern", &["modern", "contemporary", "minimalist", "sleek"]),
    ("rustic", &["rustic", "country", "farmhouse", "weathered"]),
    ("artistic", &["artistic", "creative", "unique", "decorative"]),
    ("industrial", &["industrial", "metal", "steel", "concrete"]),
];

/// A detected label with its confidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub description: String,
    pub score: f64,
}

impl Label {
    pub fn new(description: &str, score: f64) -> Self {
        Self {
            description: description.to_string(),
            score,
        }
    }
}

/// A dominant colour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub score: f64,
    pub pixel_fraction: f64,
}

/// Raw output of a label source
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Annotations {
    pub labels: Vec<Label>,
    pub colors: Vec<Color>,
}

#[derive(Debug, thiserror::Error)]
pub enum VisionError {
    #[error("image analysis failed: {0}")]
    Backend(String),
}

/// Source of image labels
#[async_trait]
pub trait LabelSource: Send + Sync {
    /// Source identifier for logs
    fn name(&self) -> &str;

    /// Label an image
    async fn annotate(&self, image: &[u8]) -> Result<Annotations, VisionError>;
}

/// Fixed annotations for development without a vision backend
pub struct MockLabelSource;

#[async_trait]
impl LabelSource for MockLabelSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn annotate(&self, _image: &[u8]) -> Result<Annotations, VisionError> {
        Ok(Annotations {
            labels: vec![
                Label::new("Pottery", 0.95),
                Label::new("Ceramic", 0.88),
                Label::new("Handcraft", 0.76),
            ],
            colors: vec![
                Color {
                    red: 139,
                    green: 69,
                    blue: 19,
                    score: 0.32,
                    pixel_fraction: 0.28,
                },
                Color {
                    red: 160,
                    green: 82,
                    blue: 45,
                    score: 0.24,
                    pixel_fraction: 0.19,
                },
            ],
        })
    }
}

/// Category scores for a set of labels
#[derive(Debug, Clone, PartialEq)]
pub struct Categorization {
    pub primary: String,
    pub categories: Vec<String>,
    pub confidence: f64,
}

/// Score every category by summing the scores of labels that mention one
/// of its keywords (once per matching keyword). The primary category is the
/// first one to reach the highest score.
pub fn categorize(labels: &[Label]) -> Categorization {
    let lowered: Vec<(String, f64)> = labels
        .iter()
        .map(|l| (l.description.to_lowercase(), l.score))
        .collect();

    let mut scores: Vec<(&str, f64)> = CATEGORY_KEYWORDS
        .iter()
        .map(|(category, keywords)| {
            let score = lowered
                .iter()
                .map(|(desc, score)| {
                    keywords.iter().filter(|k| desc.contains(*k)).count() as f64 * score
                })
                .sum::<f64>();
            (*category, score)
        })
        .collect();

    let mut primary = DEFAULT_CATEGORY;
    let mut confidence = 0.0;
    for (category, score) in &scores {
        if *score > confidence {
            confidence = *score;
            primary = *category;
        }
    }

    scores.retain(|(_, score)| *score > CATEGORY_THRESHOLD);
    scores.sort_by(|a, b| b.1.total_cmp(&a.1));

    Categorization {
        primary: primary.to_string(),
        categories: scores
            .into_iter()
            .take(MAX_CATEGORIES)
            .map(|(c, _)| c.to_string())
            .collect(),
        confidence,
    }
}

/// Materials mentioned by any label, in keyword order of first detection
pub fn extract_materials(labels: &[Label]) -> Vec<String> {
    let mut materials: Vec<String> = Vec::new();
    for label in labels {
        let desc = label.description.to_lowercase();
        for material in MATERIAL_KEYWORDS {
            if desc.contains(material) && !materials.iter().any(|m| m == material) {
                materials.push(material.to_string());
            }
        }
    }
    materials
}

/// First style with a keyword in any label
pub fn determine_style(labels: &[Label]) -> String {
    let lowered: Vec<String> = labels.iter().map(|l| l.description.to_lowercase()).collect();
    STYLE_KEYWORDS
        .iter()
        .find(|(_, keywords)| {
            lowered
                .iter()
                .any(|desc| keywords.iter().any(|k| desc.contains(k)))
        })
        .map_or(DEFAULT_STYLE, |(style, _)| *style)
        .to_string()
}

/// Full analysis returned to clients
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAnalysis {
    pub categories: Vec<String>,
    pub primary_category: String,
    pub confidence: f64,
    pub materials: Vec<String>,
    pub colors: Vec<Color>,
    pub style: String,
    pub labels: Vec<Label>,
    pub timestamp: DateTime<Utc>,
}

/// Label an image and derive its catalog attributes
pub async fn analyze(source: &dyn LabelSource, image: &[u8]) -> Result<ImageAnalysis, VisionError> {
    let Annotations { labels, mut colors } = source.annotate(image).await?;
    let categorization = categorize(&labels);
    colors.truncate(5);

    Ok(ImageAnalysis {
        categories: categorization.categories,
        primary_category: categorization.primary,
        confidence: categorization.confidence,
        materials: extract_materials(&labels),
        colors,
        style: determine_style(&labels),
        labels,
        timestamp: Utc::now(),
    })
}

/// Whether an upload looks like an allowed image: both the file extension
/// and the MIME subtype must be in `allowed`.
pub fn is_allowed_image(file_name: &str, content_type: &str, allowed: &[String]) -> bool {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());
    let subtype = content_type
        .to_lowercase()
        .strip_prefix("image/")
        .map(|s| s.to_string());

    match (extension, subtype) {
        (Some(ext), Some(sub)) => {
            allowed.iter().any(|a| *a == ext) && allowed.iter().any(|a| *a == sub)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowed() -> Vec<String> {
        ["jpeg", "jpg", "png", "gif", "webp"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_categorize_mock_labels() {
        let labels = vec![
            Label::new("Pottery", 0.95),
            Label::new("Ceramic", 0.88),
            Label::new("Handcraft", 0.76),
        ];
        let result = categorize(&labels);
        assert_eq!(result.primary, "Pottery");
        assert_eq!(result.categories, vec!["Pottery"]);
        assert!((result.confidence - 1.83).abs() < 1e-9);
    }

    #[test]
    fn test_categorize_without_matches() {
        let result = categorize(&[Label::new("Sky", 0.9)]);
        assert_eq!(result.primary, "Crafts");
        assert!(result.categories.is_empty());
        assert_eq!(result.confidence, 0.0);
    }

    #[test]
    fn test_categorize_keeps_top_three() {
        let labels = vec![
            Label::new("Wooden chair", 0.9),
            Label::new("Glass vase", 0.8),
            Label::new("Iron frame", 0.5),
        ];
        let result = categorize(&labels);
        assert_eq!(result.categories.len(), 3);
        assert_eq!(result.primary, result.categories[0]);
    }

    #[test]
    fn test_extract_materials() {
        let labels = vec![Label::new("Wooden bowl", 0.9), Label::new("Wood", 0.8)];
        assert_eq!(extract_materials(&labels), vec!["wood", "wooden"]);
    }

    #[test]
    fn test_determine_style() {
        assert_eq!(determine_style(&[Label::new("Vintage lamp", 0.7)]), "traditional");
        assert_eq!(determine_style(&[Label::new("Steel", 0.7)]), "industrial");
        assert_eq!(determine_style(&[Label::new("Bowl", 0.7)]), "handcrafted");
    }

    #[test]
    fn test_allowed_images() {
        assert!(is_allowed_image("vase.JPG", "image/jpeg", &allowed()));
        assert!(is_allowed_image("vase.webp", "image/webp", &allowed()));
        assert!(!is_allowed_image("vase.svg", "image/svg+xml", &allowed()));
        assert!(!is_allowed_image("notes.txt", "text/plain", &allowed()));
        assert!(!is_allowed_image("vase", "image/png", &allowed()));
    }

    #[tokio::test]
    async fn test_analyze_with_mock_source() {
        let analysis = analyze(&MockLabelSource, b"fake").await.unwrap();
        assert_eq!(analysis.primary_category, "Pottery");
        assert_eq!(analysis.materials, vec!["ceramic"]);
        assert_eq!(analysis.style, "handcrafted");
        assert_eq!(analysis.labels.len(), 3);
        assert_eq!(analysis.colors.len(), 2);
    }
}
