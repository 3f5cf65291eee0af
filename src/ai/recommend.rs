//! Personalised recommendations

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Shopper signals. Accepted for API compatibility; the current ranking
/// does not read them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    pub user_id: Option<String>,
    #[serde(default)]
    pub browsing_history: Vec<Value>,
    #[serde(default)]
    pub purchase_history: Vec<Value>,
    pub preferences: Option<Value>,
    pub current_product: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub product_id: String,
    pub score: f64,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendations {
    pub recommendations: Vec<Recommendation>,
    /// Mean score of the recommendations
    pub total_score: f64,
    pub generated_at: DateTime<Utc>,
}

fn mean_score(recommendations: &[Recommendation]) -> f64 {
    if recommendations.is_empty() {
        return 0.0;
    }
    recommendations.iter().map(|r| r.score).sum::<f64>() / recommendations.len() as f64
}

pub fn recommend(_request: &RecommendationRequest) -> Recommendations {
    let recommendations = vec![
        Recommendation {
            product_id: "1".to_string(),
            score: 0.89,
            reason: "Similar style to your recent purchases".to_string(),
        },
        Recommendation {
            product_id: "2".to_string(),
            score: 0.76,
            reason: "Popular among users with similar interests".to_string(),
        },
    ];

    Recommendations {
        total_score: mean_score(&recommendations),
        recommendations,
        generated_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommend() {
        let result = recommend(&RecommendationRequest::default());
        assert_eq!(result.recommendations.len(), 2);
        assert!((result.total_score - 0.825).abs() < 1e-9);
    }

    #[test]
    fn test_mean_of_nothing() {
        assert_eq!(mean_score(&[]), 0.0);
    }
}
