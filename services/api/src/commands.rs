use crate::infra::{format_timestamp, report_factory};
use clap::Args;
use indra::analysis::SiteAnalyzer;
use indra::assessment::{AssessmentInput, RoofType};
use indra::backend::EstimateView;
use indra::chat::ChatSession;
use indra::clock::SystemClock;
use indra::config::AppConfig;
use indra::error::AppError;
use indra::knowledge::KnowledgeBase;
use indra::remote::{
    AssessmentApi, AssessmentRequest, AssessmentResponse, ChatbotRepository, HttpAssessmentApi,
    NetworkChatbotRepository,
};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct EstimateArgs {
    /// Property name shown on the report
    #[arg(long, default_value = "My House")]
    pub(crate) name: String,
    /// Free-form location label
    #[arg(long, default_value = "")]
    pub(crate) location: String,
    /// Number of people living at the property
    #[arg(long, default_value_t = 3)]
    pub(crate) dwellers: u32,
    /// Rooftop catchment area in square metres
    #[arg(long, default_value_t = 60.0)]
    pub(crate) roof_area: f64,
    /// Open ground available for recharge structures in square metres
    #[arg(long, default_value_t = 20.0)]
    pub(crate) open_space: f64,
    /// Roof material (Concrete, Tiled, ...)
    #[arg(long, default_value = "Concrete")]
    pub(crate) roof_type: String,
    /// Fix the score variability for reproducible output
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Print the report and score breakdown as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

impl EstimateArgs {
    fn input(&self) -> AssessmentInput {
        AssessmentInput {
            location: self.location.trim().to_string(),
            name: self.name.trim().to_string(),
            dwellers: self.dwellers,
            roof_area: self.roof_area,
            open_space: self.open_space,
            roof_type: RoofType::parse(&self.roof_type),
        }
    }
}

pub(crate) fn run_estimate(args: EstimateArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let factory = report_factory(&config.estimator, args.seed);
    let input = args.input();

    if let Err(issues) = input.validate() {
        for issue in &issues {
            println!("warning: {issue}");
        }
    }

    let (report, estimate) = factory.issue(&input);

    if args.json {
        match serde_json::to_string_pretty(&EstimateView { report, estimate }) {
            Ok(json) => println!("{json}"),
            Err(err) => println!("estimate unavailable as JSON: {err}"),
        }
        return Ok(());
    }

    println!("Feasibility estimate for {}", report.name);
    println!(
        "- Annual harvesting potential: {} L (runoff coefficient {:.2})",
        report.annual_harvesting_potential_liters, estimate.runoff_coefficient
    );
    println!("- Feasibility score: {:.0}/100", report.feasibility_score);
    for component in &estimate.components {
        println!(
            "    - {:?}: {} ({})",
            component.factor, component.points, component.notes
        );
    }
    println!("- Recommended solution: {}", report.recommended_solution);
    println!("- Estimated cost: ₹{}", report.estimated_cost_inr);
    println!("- Generated: {}", format_timestamp(report.timestamp));
    Ok(())
}

#[derive(Args, Debug)]
pub(crate) struct AnalyzeArgs {
    /// Name of the person or property
    #[arg(long, default_value = "My House")]
    pub(crate) name: String,
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) latitude: f64,
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) longitude: f64,
    #[arg(long, default_value_t = 3)]
    pub(crate) dwellers: u32,
    #[arg(long, default_value_t = 60.0)]
    pub(crate) roof_area: f64,
    #[arg(long, default_value_t = 20.0)]
    pub(crate) open_space: f64,
    #[arg(long, default_value = "concrete")]
    pub(crate) roof_type: String,
    /// Send the request to the configured assessment backend
    #[arg(long)]
    pub(crate) remote: bool,
    /// Assessment backend base URL (implies --remote)
    #[arg(long)]
    pub(crate) base_url: Option<String>,
}

impl AnalyzeArgs {
    fn request(&self) -> AssessmentRequest {
        AssessmentRequest {
            name: self.name.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
            num_dwellers: self.dwellers,
            roof_area_sqm: self.roof_area,
            open_space_sqm: self.open_space,
            roof_type: self.roof_type.clone(),
        }
    }
}

pub(crate) async fn run_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let request = args.request();

    let response = if args.remote || args.base_url.is_some() {
        let config = AppConfig::load()?;
        let base_url = args
            .base_url
            .clone()
            .unwrap_or_else(|| config.remote.assessment_url.clone());
        let api = HttpAssessmentApi::with_settings(&base_url, config.remote.http_settings())?;
        api.assess(&request).await?
    } else {
        SiteAnalyzer::new().analyze(&request)?
    };

    render_analysis(&request, &response);
    Ok(())
}

fn render_analysis(request: &AssessmentRequest, response: &AssessmentResponse) {
    let location = &response.location_info;
    let rwh = &response.rwh_analysis;
    let ar = &response.ar_analysis;
    let cba = &response.cost_benefit_analysis;

    println!("Site analysis for {}", request.name);
    println!(
        "- Rainfall {} mm/yr | aquifer {} | soil {} ({} permeability)",
        location.avg_annual_rainfall_mm,
        location.principal_aquifer,
        location.soil_type,
        location.soil_permeability
    );
    println!(
        "- Predicted groundwater depth: {} m bgl",
        location.predicted_groundwater_depth_mbgl
    );
    println!("- Feasibility score: {:.2}", response.feasibility_score);
    println!("  {}", response.feasibility_insights);
    println!(
        "- Rooftop runoff {:.0} L/yr | recommended tank {} L",
        rwh.potential_annual_runoff_liters, rwh.recommended_tank_size_liters
    );
    match (&ar.recommended_structure_type, ar.is_feasible) {
        (Some(structure), true) => {
            let dimensions: Vec<String> = ar
                .structure_dimensions
                .iter()
                .map(|(key, value)| format!("{key} {value}"))
                .collect();
            println!(
                "- Artificial recharge: {} ({})",
                structure,
                dimensions.join(", ")
            );
        }
        _ => println!("- Artificial recharge not advised: {}", ar.notes),
    }
    println!(
        "- Investment ₹{:.0} | O&M ₹{:.0}/yr | savings ₹{:.2}/yr",
        cba.estimated_initial_investment,
        cba.annual_operating_maintenance_cost,
        cba.annual_monetary_savings
    );
    match cba.payback_period_years {
        Some(years) => println!("- Payback period: {years:.1} years"),
        None => println!("- Payback period: never (no savings)"),
    }
}

#[derive(Args, Debug)]
pub(crate) struct AskArgs {
    /// Question for the assistant
    #[arg(required = true, num_args = 1..)]
    pub(crate) words: Vec<String>,
    /// Ask the configured chatbot backend instead of the built-in knowledge base
    #[arg(long)]
    pub(crate) remote: bool,
}

impl AskArgs {
    pub(crate) fn question(&self) -> String {
        self.words.join(" ")
    }
}

pub(crate) async fn run_ask(args: AskArgs) -> Result<(), AppError> {
    let chatbot: Arc<dyn ChatbotRepository> = if args.remote {
        let config = AppConfig::load()?;
        Arc::new(NetworkChatbotRepository::from_config(&config.remote)?)
    } else {
        Arc::new(KnowledgeBase::default())
    };

    let mut session = ChatSession::new(chatbot, Arc::new(SystemClock));
    match session.send(&args.question()).await {
        Some(reply) => println!("{}", reply.text),
        None => println!("Nothing to ask."),
    }
    Ok(())
}
