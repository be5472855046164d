use serde::{Deserialize, Serialize};

/// Directory entry returned by the lawyer listing.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct LawyerCard {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub court: Option<String>,
    #[serde(default)]
    pub experience_years: Option<u32>,
    #[serde(default)]
    pub specializations: Vec<String>,
    #[serde(default)]
    pub avg_rating: f64,
    #[serde(default)]
    pub total_reviews: u32,
    #[serde(default)]
    pub is_verified: bool,
}

/// Full lawyer profile.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Lawyer {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub province: Option<String>,
    #[serde(default)]
    pub bar_council: Option<String>,
    #[serde(default)]
    pub court: Option<String>,
    #[serde(default)]
    pub experience_years: Option<u32>,
    #[serde(default)]
    pub specializations: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avg_rating: f64,
    #[serde(default)]
    pub total_reviews: u32,
    #[serde(default)]
    pub is_verified: bool,
}

/// Review submitted for a lawyer.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NewReview {
    pub rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Acknowledgement for a stored review.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct ReviewAccepted {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub avg_rating: f64,
}

/// Distinct values used to populate the directory filters.
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct LawyerFacets {
    pub cities: Vec<String>,
    pub specializations: Vec<String>,
}
