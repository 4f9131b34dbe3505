use anyhow::{Context, Result};
use clap::Parser;

use cfn_templates::{lambda_bucket_template, OutputArgs};

/// Prints a CloudFormation template creating an S3 bucket for Lambda packages
#[derive(Parser)]
#[command(name = "lambda-bucket")]
struct Cli {
    #[command(flatten)]
    output: OutputArgs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let template = lambda_bucket_template().context("Failed to build lambda bucket template")?;
    println!("{}", cli.output.render(&template)?);
    Ok(())
}
