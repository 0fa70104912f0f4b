use crate::infra::{format_timestamp, report_factory, InMemoryWorkspace};
use clap::Args;
use indra::assessment::RoofType;
use indra::chat::ChatSession;
use indra::clock::SystemClock;
use indra::config::EstimatorSettings;
use indra::error::AppError;
use indra::knowledge::KnowledgeBase;
use indra::navigation::AppDestination;
use indra::records::{
    Coordinates, OnboardingDetails, Property, PropertyPlacement, PropertyType, Report,
};
use indra::store::IdentityProvider;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Name used for the demo account
    #[arg(long, default_value = "Asha Verma")]
    pub(crate) name: String,
    /// Location label for the assessed property
    #[arg(long, default_value = "New Delhi")]
    pub(crate) location: String,
    /// Fix the score variability (defaults to a fixed seed)
    #[arg(long, default_value_t = 42)]
    pub(crate) seed: u64,
    /// Skip the assistant portion of the demo
    #[arg(long)]
    pub(crate) skip_chat: bool,
}

impl Default for DemoArgs {
    fn default() -> Self {
        Self {
            name: "Asha Verma".to_string(),
            location: "New Delhi".to_string(),
            seed: 42,
            skip_chat: false,
        }
    }
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        name,
        location,
        seed,
        skip_chat,
    } = args;

    let workspace = InMemoryWorkspace::new(report_factory(&EstimatorSettings::default(), Some(seed)));

    println!("Jal Sanchay Mitra demo");
    let menu: Vec<&str> = AppDestination::bottom_bar()
        .iter()
        .map(|destination| destination.title())
        .collect();
    println!("Navigation: {}", menu.join(" | "));

    let user = match workspace
        .identity
        .sign_up("demo@jalsanchay.in", "monsoon", Some(name.as_str()))
        .await
    {
        Ok(user) => user,
        Err(err) => {
            println!("  Sign up rejected: {err}");
            return Ok(());
        }
    };
    println!("- Signed up {} ({})", name, user.uid);

    let (prefill_name, details) = workspace.profiles.onboarding_prefill().await;
    println!(
        "- Onboarding prefill: {} | {} dwellers | roof {} m² ({}) | open space {} m²",
        prefill_name,
        details.num_dwellers,
        details.roof_area_sqm,
        details.roof_type,
        details.open_space_sqm
    );

    let details = OnboardingDetails {
        num_dwellers: 4,
        roof_area_sqm: 80.0,
        open_space_sqm: 24.0,
        roof_type: RoofType::Tiled,
    };
    let profile = workspace
        .profiles
        .complete_onboarding(&prefill_name, details)
        .await?;
    println!(
        "- Onboarding complete for {} (needs onboarding: {})",
        profile.preferred_name(),
        workspace.profiles.needs_onboarding().await
    );

    let input = profile.assessment_form(&location).coerce();
    let generated = workspace.assessments.generate(&input).await;
    println!("\n{}", generated.notice());
    print_report(&generated.report);
    println!("  Score components:");
    for component in &generated.estimate.components {
        println!(
            "    - {:?}: {} ({})",
            component.factor, component.points, component.notes
        );
    }

    let placement = PropertyPlacement {
        address: None,
        coordinates: Coordinates::new(28.6139, 77.2090)
            .map_err(|issue| AppError::InvalidInput(vec![issue]))?,
        property_type: PropertyType::Residential,
    };
    let property = workspace
        .properties
        .promote(&generated.report, placement)
        .await?;
    println!(
        "\n- Tracking property {} at {} ({})",
        property.name,
        property.address,
        property.property_type.label()
    );

    let mut expanded = input.clone();
    expanded.open_space = 10.0;
    expanded.roof_area = 120.0;
    let revision = workspace.assessments.generate(&expanded).await;
    let property = workspace
        .properties
        .reassess(&property.id, &revision.report)
        .await?;
    println!(
        "- Reassessed after expansion: score {:.0}, {} L/yr, {}",
        property.feasibility_score,
        property.annual_harvesting_potential_liters,
        property.recommended_solution
    );

    let history = workspace.assessments.reports().list().await;
    println!("\nHistory ({} reports)", history.len());
    for report in &history {
        println!(
            "  - {} | {} | score {:.0} | {}",
            format_timestamp(report.timestamp),
            report.name,
            report.feasibility_score,
            report.recommended_solution
        );
    }
    println!(
        "My Properties: {} tracked ({} stored documents)",
        workspace.properties.list().await.len(),
        workspace.store.count::<Property>(&user.uid)
    );

    if !skip_chat {
        println!("\nAssistant");
        let mut session = ChatSession::new(Arc::new(KnowledgeBase::default()), Arc::new(SystemClock));
        for question in ["What is a recharge pit?", "How do I fix a leaking tap?"] {
            if let Some(reply) = session.send(question).await {
                println!("  Q: {question}\n  A: {}", reply.text);
            }
        }
    }

    if let Err(err) = workspace.identity.sign_out().await {
        println!("  Sign out failed: {err}");
    }
    println!(
        "\nSigned out; visible reports: {}",
        workspace.assessments.reports().list().await.len()
    );
    Ok(())
}

fn print_report(report: &Report) {
    println!("  Report {}", report.id);
    println!(
        "  - {} ({}) | {} dwellers | roof {} m² | open space {} m²",
        report.name, report.location, report.dwellers, report.roof_area, report.open_space
    );
    println!(
        "  - Score {:.0}/100 | {} L/yr | {} | ₹{}",
        report.feasibility_score,
        report.annual_harvesting_potential_liters,
        report.recommended_solution,
        report.estimated_cost_inr
    );
}
