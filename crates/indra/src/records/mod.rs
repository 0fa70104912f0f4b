//! Persisted record shapes, each owned by exactly one user.

pub mod profile;
pub mod property;
pub mod report;

pub use profile::{AuthUser, OnboardingDetails, UserId, UserProfile};
pub use property::{Coordinates, Property, PropertyId, PropertyPlacement, PropertyType};
pub use report::{Report, ReportId};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::{
        AssessmentInput, FeasibilityEstimator, FixedJitter, InputIssue, RoofType,
    };

    fn sample_input() -> AssessmentInput {
        AssessmentInput {
            location: "Malviya Nagar, Jaipur".to_string(),
            name: "Sharma Residence".to_string(),
            dwellers: 5,
            roof_area: 80.0,
            open_space: 12.0,
            roof_type: RoofType::Tiled,
        }
    }

    fn sample_report() -> Report {
        let input = sample_input();
        let estimate = FeasibilityEstimator::default().estimate(&input, &mut FixedJitter(4));
        Report::from_estimate(ReportId("r-1".to_string()), &input, &estimate, 1_700_000_000_000)
    }

    #[test]
    fn report_echoes_input_and_estimate() {
        let report = sample_report();
        assert_eq!(report.name, "Sharma Residence");
        assert_eq!(report.annual_harvesting_potential_liters, 43_520);
        assert_eq!(report.recommended_solution, "Storage Tank");
        assert_eq!(report.feasibility_score, 94.0);
        assert_eq!(report.estimated_cost_inr, 15_000);
    }

    #[test]
    fn report_uses_camel_case_keys() {
        let value = serde_json::to_value(sample_report()).expect("serializes");
        assert!(value.get("annualHarvestingPotentialLiters").is_some());
        assert!(value.get("estimatedCostInr").is_some());
        assert_eq!(value["id"], "r-1");
    }

    #[test]
    fn revise_issues_new_id_and_keeps_blank_fields() {
        let report = sample_report();
        let mut edited = sample_input();
        edited.name.clear();
        edited.open_space = 30.0;
        let estimate = FeasibilityEstimator::default().estimate(&edited, &mut FixedJitter(0));

        let revised = report.revise(&edited, &estimate, 1_700_000_500_000);

        assert_ne!(revised.id, report.id);
        assert_eq!(revised.name, report.name);
        assert_eq!(revised.recommended_solution, "Recharge Pit");
    }

    #[test]
    fn promotion_defaults_address_to_report_location() {
        let report = sample_report();
        let placement = PropertyPlacement {
            address: None,
            coordinates: Coordinates::new(26.85, 75.8).expect("valid coordinates"),
            property_type: PropertyType::Residential,
        };

        let property = Property::from_report(&report, placement);

        assert_eq!(property.address, "Malviya Nagar, Jaipur");
        assert_eq!(property.last_assessment_date, report.timestamp);
        assert_eq!(property.feasibility_score, report.feasibility_score);
        assert_eq!(property.latitude, 26.85);
        assert!(!property.id.as_str().is_empty());
    }

    #[test]
    fn coordinates_reject_out_of_range_values() {
        assert_eq!(
            Coordinates::new(91.0, 0.0),
            Err(InputIssue::LatitudeOutOfRange(91.0))
        );
        assert_eq!(
            Coordinates::new(0.0, -181.0),
            Err(InputIssue::LongitudeOutOfRange(-181.0))
        );
    }

    #[test]
    fn onboarding_defaults_fill_unset_fields() {
        let user = AuthUser {
            uid: UserId("u-1".to_string()),
            display_name: Some("Asha".to_string()),
            photo_url: None,
            email: Some("asha@example.com".to_string()),
        };
        let profile = UserProfile::for_user(&user);

        let details = profile.onboarding_details();
        assert_eq!(details, OnboardingDetails::default());
        assert_eq!(profile.preferred_name(), "Asha");
        assert!(!profile.onboarding_completed);
    }

    #[test]
    fn profile_prefills_assessment_form() {
        let mut profile = UserProfile::default();
        profile.complete_onboarding(
            "Asha Verma",
            OnboardingDetails {
                num_dwellers: 4,
                roof_area_sqm: 75.5,
                open_space_sqm: 18.0,
                roof_type: RoofType::Tiled,
            },
        );

        let input = profile.assessment_form("Delhi").coerce();
        assert_eq!(input.name, "Asha Verma");
        assert_eq!(input.dwellers, 4);
        assert_eq!(input.roof_area, 75.5);
        assert_eq!(input.roof_type, RoofType::Tiled);
        assert!(profile.onboarding_completed);
    }
}
