use anyhow::{Context, Result};
use clap::Parser;

use cfn_templates::{management_role_template, OutputArgs};

/// Prints a CloudFormation template containing IAM resources to create AWS cost alerting resources
#[derive(Parser)]
#[command(name = "aws-budget-alerting-management-role")]
struct Cli {
    #[command(flatten)]
    output: OutputArgs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let template = management_role_template().context("Failed to build management role template")?;
    println!("{}", cli.output.render(&template)?);
    Ok(())
}
