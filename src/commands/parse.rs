use anyhow::{Context, Result};

use rozklad::config::Config;
use rozklad::pipeline::{ConversionPipeline, RunStats};

pub fn parse(config: &Config) -> Result<RunStats> {
    println!("Parsing schedules from: {}", config.input.documents_dir.display());
    println!("================================");

    let pipeline = ConversionPipeline::new(config.pipeline());
    let stats = pipeline.run_directory().with_context(|| {
        format!(
            "Failed to convert documents in {}",
            config.input.documents_dir.display()
        )
    })?;

    println!("  Documents:       {}", stats.documents);
    println!("  Group schedules: {}", stats.groups);
    println!("  Lessons:         {}", stats.lessons);
    if stats.skipped_rows > 0 {
        println!("  Skipped rows:    {}", stats.skipped_rows);
    }
    if config.output.group_into_folders {
        println!(
            "  Folders:         {} ({} per folder)",
            stats.folders, config.output.schedules_per_folder
        );
    }
    println!("  Output:          {}", config.output.groups_dir.display());

    Ok(stats)
}
