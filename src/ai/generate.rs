//! Listing copy generation

use crate::models::ValidationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const TITLE: &str = "Handcrafted Traditional Ceramic Bowl";
const DESCRIPTION: &str = "This beautiful ceramic bowl showcases traditional craftsmanship with its rich glazes and timeless design. Perfect for both functional use and decorative display, this piece reflects the artisan's dedication to preserving traditional pottery techniques.";
const TAGS: [&str; 6] = ["handcrafted", "ceramic", "traditional", "pottery", "bowl", "artisan"];
const CATEGORY: &str = "Pottery & Ceramics";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptionRequest {
    pub image_analysis: Option<Value>,
    pub product_type: Option<String>,
    #[serde(default)]
    pub materials: Vec<String>,
    pub style: Option<String>,
    pub user_prompt: Option<String>,
}

impl DescriptionRequest {
    /// The user's prompt, or one assembled from the product details
    pub fn prompt(&self) -> String {
        if let Some(prompt) = self.user_prompt.as_deref().filter(|p| !p.trim().is_empty()) {
            return prompt.to_string();
        }

        let product_type = self.product_type.as_deref().unwrap_or("item");
        let mut prompt = format!("Generate description for {}", product_type);
        if !self.materials.is_empty() {
            prompt.push_str(" made of ");
            prompt.push_str(&self.materials.join(", "));
        }
        if let Some(style) = &self.style {
            prompt.push_str(&format!(" in a {} style", style));
        }
        prompt
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedDescription {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub category: String,
    pub generated_at: DateTime<Utc>,
    pub prompt: String,
}

/// Produce listing copy. Needs image analysis output or a user prompt.
pub fn generate(request: &DescriptionRequest) -> Result<GeneratedDescription, ValidationError> {
    let has_analysis = matches!(&request.image_analysis, Some(v) if !v.is_null());
    let has_prompt = request
        .user_prompt
        .as_deref()
        .is_some_and(|p| !p.trim().is_empty());
    if !has_analysis && !has_prompt {
        return Err(ValidationError::Missing(
            "Either image analysis data or user prompt is required",
        ));
    }

    Ok(GeneratedDescription {
        title: TITLE.to_string(),
        description: DESCRIPTION.to_string(),
        tags: TAGS.iter().map(|t| t.to_string()).collect(),
        category: CATEGORY.to_string(),
        generated_at: Utc::now(),
        prompt: request.prompt(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_requires_input() {
        assert!(generate(&DescriptionRequest::default()).is_err());

        let request = DescriptionRequest {
            image_analysis: Some(Value::Null),
            ..Default::default()
        };
        assert!(generate(&request).is_err());
    }

    #[test]
    fn test_user_prompt_is_echoed() {
        let request = DescriptionRequest {
            user_prompt: Some("A blue mug".to_string()),
            ..Default::default()
        };
        let generated = generate(&request).unwrap();
        assert_eq!(generated.prompt, "A blue mug");
        assert_eq!(generated.category, "Pottery & Ceramics");
    }

    #[test]
    fn test_prompt_from_details() {
        let request: DescriptionRequest = serde_json::from_value(json!({
            "imageAnalysis": {"primaryCategory": "Pottery"},
            "productType": "vase",
            "materials": ["clay", "glaze"],
            "style": "rustic"
        }))
        .unwrap();
        assert_eq!(
            generate(&request).unwrap().prompt,
            "Generate description for vase made of clay, glaze in a rustic style"
        );
    }
}
