use std::fmt;

use serde::{Deserialize, Serialize};

use crate::assessment::{AssessmentForm, RoofType};
use crate::store::Document;

/// Identity-provider user id; every record is scoped by one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Signed-in identity as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub uid: UserId,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
    pub email: Option<String>,
}

/// Household attributes captured during onboarding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnboardingDetails {
    pub num_dwellers: u32,
    pub roof_area_sqm: f64,
    pub open_space_sqm: f64,
    pub roof_type: RoofType,
}

impl Default for OnboardingDetails {
    fn default() -> Self {
        Self {
            num_dwellers: 3,
            roof_area_sqm: 60.0,
            open_space_sqm: 20.0,
            roof_type: RoofType::Concrete,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub uid: UserId,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
    pub name: String,
    pub onboarding_completed: bool,
    pub num_dwellers: u32,
    pub roof_area_sqm: f64,
    pub open_space_sqm: f64,
    pub roof_type: RoofType,
}

impl UserProfile {
    pub fn for_user(user: &AuthUser) -> Self {
        Self {
            uid: user.uid.clone(),
            display_name: user.display_name.clone(),
            photo_url: user.photo_url.clone(),
            name: user.display_name.clone().unwrap_or_default(),
            ..Self::default()
        }
    }

    pub fn complete_onboarding(&mut self, name: &str, details: OnboardingDetails) {
        let name = name.trim();
        if !name.is_empty() {
            self.name = name.to_string();
        }
        self.num_dwellers = details.num_dwellers;
        self.roof_area_sqm = details.roof_area_sqm.max(0.0);
        self.open_space_sqm = details.open_space_sqm.max(0.0);
        self.roof_type = details.roof_type;
        self.onboarding_completed = true;
    }

    /// Stored onboarding values, falling back to defaults for unset fields.
    pub fn onboarding_details(&self) -> OnboardingDetails {
        let defaults = OnboardingDetails::default();
        OnboardingDetails {
            num_dwellers: if self.num_dwellers > 0 {
                self.num_dwellers
            } else {
                defaults.num_dwellers
            },
            roof_area_sqm: if self.roof_area_sqm > 0.0 {
                self.roof_area_sqm
            } else {
                defaults.roof_area_sqm
            },
            open_space_sqm: if self.open_space_sqm > 0.0 {
                self.open_space_sqm
            } else {
                defaults.open_space_sqm
            },
            roof_type: self.roof_type.clone(),
        }
    }

    pub fn preferred_name(&self) -> &str {
        if self.name.trim().is_empty() {
            self.display_name.as_deref().unwrap_or_default()
        } else {
            &self.name
        }
    }

    /// Prefills the assessment form from onboarding answers.
    pub fn assessment_form(&self, location: &str) -> AssessmentForm {
        AssessmentForm {
            name: self.preferred_name().to_string(),
            location: location.to_string(),
            dwellers: self.num_dwellers.to_string(),
            roof_area: self.roof_area_sqm.to_string(),
            open_space: self.open_space_sqm.to_string(),
            roof_type: self.roof_type.label().to_string(),
        }
    }
}

impl Document for UserProfile {
    const COLLECTION: &'static str = "profiles";

    fn document_id(&self) -> &str {
        self.uid.as_str()
    }
}
