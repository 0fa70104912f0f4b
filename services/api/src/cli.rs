use crate::commands::{run_analyze, run_ask, run_estimate, AnalyzeArgs, AskArgs, EstimateArgs};
use crate::demo::{run_demo, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use indra::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Jal Sanchay Mitra",
    about = "Assess rooftop rainwater harvesting feasibility and run the assessment backend",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Estimate harvest volume, score, solution and cost for a property
    Estimate(EstimateArgs),
    /// Run the detailed site analysis locally or against the hosted backend
    Analyze(AnalyzeArgs),
    /// Ask the water conservation assistant a question
    Ask(AskArgs),
    /// Walk through sign-up, onboarding, assessment and property tracking in memory
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Estimate(args) => run_estimate(args),
        Command::Analyze(args) => run_analyze(args).await,
        Command::Ask(args) => run_ask(args).await,
        Command::Demo(args) => run_demo(args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["indra-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn estimate_flags_parse() {
        let cli = Cli::try_parse_from([
            "indra-api",
            "estimate",
            "--name",
            "Green Villa",
            "--roof-area",
            "50",
            "--open-space",
            "20",
            "--seed",
            "7",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Estimate(args)) => {
                assert_eq!(args.name, "Green Villa");
                assert_eq!(args.roof_area, 50.0);
                assert_eq!(args.dwellers, 3);
                assert_eq!(args.seed, Some(7));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn ask_joins_words() {
        let cli = Cli::try_parse_from(["indra-api", "ask", "what", "is", "runoff?"])
            .expect("parses");
        match cli.command {
            Some(Command::Ask(args)) => assert_eq!(args.question(), "what is runoff?"),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
