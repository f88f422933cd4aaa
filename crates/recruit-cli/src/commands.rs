use anyhow::Result;
use recruit_cli::config::PipelineConfig;
use recruit_cli::pipeline::{RunResult, run_export, run_pipeline, run_report};
use recruit_cli::summary::{print_summary, print_summary_json};
use recruit_report::render_chart;

use crate::cli::{ExportArgs, ReportArgs, RunArgs};

pub fn run(config: &PipelineConfig, args: &RunArgs) -> Result<RunResult> {
    let mut config = config.clone();
    if let Some(input) = &args.input {
        config.paths.input = input.clone();
    }
    if let Some(database) = &args.database {
        config.paths.database = database.clone();
    }
    if let Some(separator) = args.separator {
        config.extract.separator = separator;
    }
    if let Some(policy) = args.integrity {
        config.integrity.policy = policy.into();
    }
    if let Some(dir) = &args.export_dir {
        config.paths.export_dir = dir.clone();
    }
    config.validate()?;

    let result = run_pipeline(&config, args.export)?;
    if args.json {
        print_summary_json(&result)?;
    } else {
        print_summary(&result);
    }
    Ok(result)
}

/// `styled` keeps chart colors on the terminal.
pub fn report(config: &PipelineConfig, args: &ReportArgs, styled: bool) -> Result<()> {
    let mut config = config.clone();
    if let Some(database) = &args.database {
        config.paths.database = database.clone();
    }
    if let Some(dir) = &args.output_dir {
        config.paths.report_dir = dir.clone();
    }
    if !args.countries.is_empty() {
        config.report.tracked_countries = args.countries.clone();
    }
    let save = args.save || args.output_dir.is_some();

    let kpis = run_report(&config, save)?;
    for kpi in &kpis {
        println!("{}\n", render_chart(kpi, styled));
    }
    if save {
        println!("Reports: {}", config.paths.report_dir.display());
    }
    Ok(())
}

pub fn export(config: &PipelineConfig, args: &ExportArgs) -> Result<()> {
    let mut config = config.clone();
    if let Some(database) = &args.database {
        config.paths.database = database.clone();
    }
    if let Some(dir) = &args.output_dir {
        config.paths.export_dir = dir.clone();
    }

    for file in run_export(&config)? {
        println!("{} ({} rows)", file.path.display(), file.rows);
    }
    Ok(())
}

pub fn schema(config: &PipelineConfig) -> Result<()> {
    let ddl = config.load_options().ddl_script()?;
    let source = config
        .paths
        .ddl
        .as_deref()
        .map_or_else(|| "embedded".to_string(), |path| path.display().to_string());
    println!("-- DDL source: {source}");
    print!("{ddl}");
    if !ddl.ends_with('\n') {
        println!();
    }
    Ok(())
}
