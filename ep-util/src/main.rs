mod common;
mod run_combine;
mod run_invert;
mod run_prior;
mod run_site;

use crate::common::*;
use run_combine::*;
use run_invert::*;
use run_prior::*;
use run_site::*;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Normal parameters for distributed Expectation Propagation",
    long_about = "Switch multivariate normal parameters between the moment form (S, m)\n\
		  and the natural form (Q, r) = (inv(S), inv(S) m), and keep the\n\
		  global approximation of distributed EP: prior, sites, posterior.\n\
		  Matrices are delimited text files, optionally gzipped.",
    term_width = 80
)]
struct Cli {
    #[command(subcommand)]
    commands: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Invert moment parameters into natural parameters or vice versa
    Invert(InvertArgs),

    /// Write the prior of the shared parameters of a model
    Prior(PriorArgs),

    #[command(
        about = "Build a site approximation from sampler draws",
        long_about = "Build a site approximation from sampler draws:\n\
		      (1) Estimate the moments of the shared parameters\n\
		      (2) Convert them into natural parameters\n\
		      (3) Subtract the cavity distribution.\n"
    )]
    Site(SiteArgs),

    /// Combine the prior and site approximations into the posterior
    Combine(CombineArgs),
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match &cli.commands {
        Commands::Invert(args) => {
            run_invert(args)?;
        }
        Commands::Prior(args) => {
            run_prior(args)?;
        }
        Commands::Site(args) => {
            run_site(args)?;
        }
        Commands::Combine(args) => {
            run_combine(args)?;
        }
    }

    info!("Done");
    Ok(())
}
