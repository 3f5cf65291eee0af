//! Artisan profiles

use super::{check_len, lenient, present, ValidationError};
use crate::catalog::{FieldValue, Record, RecordKind};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

const MAX_NAME: usize = 100;
const MAX_DESCRIPTION: usize = 1000;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\w+([.-]?\w+)*@\w+([.-]?\w+)*(\.\w{2,3})+$").expect("valid email regex")
});

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[\d\s\-()]+$").expect("valid phone regex"));

/// Aggregate review score
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RatingRepr")]
pub struct Rating {
    pub average: f64,
    pub count: u32,
}

/// Ratings arrive either as a bare score or as `{average, count}`
#[derive(Deserialize)]
#[serde(untagged)]
enum RatingRepr {
    Score(f64),
    Full {
        average: f64,
        #[serde(default)]
        count: u32,
    },
}

impl From<RatingRepr> for Rating {
    fn from(repr: RatingRepr) -> Self {
        match repr {
            RatingRepr::Score(average) => Self { average, count: 0 },
            RatingRepr::Full { average, count } => Self { average, count },
        }
    }
}

/// A maker profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artisan {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub specialty: String,
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default)]
    pub profile_image: Option<String>,
    #[serde(default)]
    pub rating: Rating,
    #[serde(default)]
    pub total_products: u32,
    #[serde(default)]
    pub verified: bool,
    #[serde(deserialize_with = "lenient::timestamp")]
    pub joined_date: DateTime<Utc>,
    #[serde(default)]
    pub skills: Vec<String>,
}

impl Record for Artisan {
    const KIND: RecordKind = RecordKind::Artisan;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn headline(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn tags(&self) -> &[String] {
        &self.skills
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => Some(FieldValue::Text(&self.id)),
            "name" => Some(FieldValue::Text(&self.name)),
            "specialty" => Some(FieldValue::Text(&self.specialty)),
            "location" => Some(FieldValue::Text(&self.location)),
            "description" => Some(FieldValue::Text(&self.description)),
            "skills" | "tags" => Some(FieldValue::Tags(&self.skills)),
            "rating" => Some(FieldValue::Number(self.rating.average)),
            "totalProducts" => Some(FieldValue::Number(self.total_products as f64)),
            "joinedDate" => Some(FieldValue::Timestamp(self.joined_date)),
            "verified" => Some(FieldValue::Flag(self.verified)),
            _ => None,
        }
    }
}

fn validate_contact(
    email: Option<&str>,
    phone: Option<&str>,
    website: Option<&str>,
) -> Result<(), ValidationError> {
    if let Some(email) = email {
        if !EMAIL_RE.is_match(email) {
            return Err(ValidationError::Invalid(
                "Please enter a valid email".to_string(),
            ));
        }
    }
    if let Some(phone) = phone {
        if !PHONE_RE.is_match(phone) {
            return Err(ValidationError::Invalid(
                "Please enter a valid phone number".to_string(),
            ));
        }
    }
    if let Some(website) = website {
        let ok = Url::parse(website)
            .map(|u| matches!(u.scheme(), "http" | "https"))
            .unwrap_or(false);
        if !ok {
            return Err(ValidationError::Invalid(
                "Please enter a valid website URL".to_string(),
            ));
        }
    }
    Ok(())
}

/// Payload for creating an artisan profile
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewArtisan {
    pub name: Option<String>,
    pub specialty: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

impl NewArtisan {
    /// Validate and build a profile. New artisans start unverified with no
    /// ratings.
    pub fn into_artisan(self, now: DateTime<Utc>) -> Result<Artisan, ValidationError> {
        let (Some(name), Some(specialty), Some(location)) = (
            present(self.name),
            present(self.specialty),
            present(self.location),
        ) else {
            return Err(ValidationError::Missing(
                "Name, specialty, and location are required",
            ));
        };

        let description = present(self.description).unwrap_or_default();
        let email = present(self.email).map(|e| e.to_lowercase());
        let phone = present(self.phone);
        let website = present(self.website);

        check_len("Name", &name, MAX_NAME)?;
        check_len("Description", &description, MAX_DESCRIPTION)?;
        validate_contact(email.as_deref(), phone.as_deref(), website.as_deref())?;

        Ok(Artisan {
            id: String::new(),
            name,
            specialty,
            location,
            description,
            email,
            phone,
            website,
            profile_image: None,
            rating: Rating::default(),
            total_products: 0,
            verified: false,
            joined_date: now,
            skills: self.skills,
        })
    }
}

/// Partial update for an artisan profile
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtisanUpdate {
    pub name: Option<String>,
    pub specialty: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub profile_image: Option<String>,
    pub skills: Option<Vec<String>>,
}

impl ArtisanUpdate {
    /// Merge into `artisan`. Nothing is written if validation fails.
    pub fn apply(self, artisan: &mut Artisan) -> Result<(), ValidationError> {
        let name = present(self.name);
        let description = present(self.description);
        let email = present(self.email).map(|e| e.to_lowercase());
        let phone = present(self.phone);
        let website = present(self.website);

        if let Some(name) = &name {
            check_len("Name", name, MAX_NAME)?;
        }
        if let Some(description) = &description {
            check_len("Description", description, MAX_DESCRIPTION)?;
        }
        validate_contact(email.as_deref(), phone.as_deref(), website.as_deref())?;

        if let Some(name) = name {
            artisan.name = name;
        }
        if let Some(specialty) = present(self.specialty) {
            artisan.specialty = specialty;
        }
        if let Some(location) = present(self.location) {
            artisan.location = location;
        }
        if let Some(description) = description {
            artisan.description = description;
        }
        if email.is_some() {
            artisan.email = email;
        }
        if phone.is_some() {
            artisan.phone = phone;
        }
        if website.is_some() {
            artisan.website = website;
        }
        if let Some(image) = present(self.profile_image) {
            artisan.profile_image = Some(image);
        }
        if let Some(skills) = self.skills {
            artisan.skills = skills;
        }
        Ok(())
    }
}
