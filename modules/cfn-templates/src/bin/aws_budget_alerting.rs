use anyhow::{Context, Result};
use clap::Parser;

use cfn_templates::{alerting_template, OutputArgs};

/// Prints a CloudFormation template with the resources alerting AWS budget overspend to Slack
#[derive(Parser)]
#[command(name = "aws-budget-alerting")]
struct Cli {
    #[command(flatten)]
    output: OutputArgs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let template = alerting_template().context("Failed to build alerting template")?;
    println!("{}", cli.output.render(&template)?);
    Ok(())
}
