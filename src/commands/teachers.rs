use anyhow::{Context, Result};

use rozklad::config::Config;
use rozklad::pipeline::export_teacher_schedules;

pub fn teachers(config: &Config) -> Result<usize> {
    let input = &config.output.groups_dir;
    let output = &config.output.teachers_dir;

    println!("Building teacher schedules from: {}", input.display());
    println!("================================");

    if !input.exists() {
        anyhow::bail!("Group schedule directory does not exist: {}", input.display());
    }

    let count = export_teacher_schedules(input, output)
        .with_context(|| format!("Failed to export teacher schedules to {}", output.display()))?;

    println!("  Teacher schedules: {count}");
    println!("  Output:            {}", output.display());

    Ok(count)
}
