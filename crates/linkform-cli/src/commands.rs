use anyhow::Result;

use linkform_cli::config::load_config;
use linkform_cli::pipeline::{TransformInput, plan_layouts, transform_file};
use linkform_cli::types::{LayoutPlan, TransformResult};

use crate::cli::{LayoutArgs, TransformArgs};

pub fn run_transform(args: &TransformArgs) -> Result<TransformResult> {
    let config = load_config(&args.config)?;
    transform_file(TransformInput {
        input: &args.input,
        config: &config,
        output: args.output.as_deref(),
        dry_run: args.dry_run,
    })
}

pub fn run_layout(args: &LayoutArgs) -> Result<Vec<LayoutPlan>> {
    let config = load_config(&args.config)?;
    Ok(plan_layouts(&config))
}
