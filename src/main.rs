use anyhow::{Context, anyhow};
use clap::Parser;
use colortab::args::{CheckCommand, CliArguments, Command, ConvertCommand, PresetCommand, PreviewCommand};
use colortab::config::Config;
use colortab::reader::{parse_file, scan};
use colortab::render::{DrawOp, raster, render_with};
use colortab::utils::{status::print_table_summary, style};
use colortab::models::ColorTable;
use colortab::writer::{serialize, write_file};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::Path;

fn main() -> anyhow::Result<()> {
    let args = CliArguments::parse();
    colortab::logging::setup_tracing(args.verbosity);
    let config = Config::default();

    match args.command {
        Command::Check(command) => check(&command, &config),
        Command::Convert(command) => convert(&command),
        Command::Preview(command) => preview(&command, &config),
        Command::Preset(command) => preset(&command),
    }
}

fn write_output(table: &ColorTable, output: Option<&Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            write_file(table, path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("✅ Wrote {}", path.display());
        }
        None => print!("{}", serialize(table)),
    }
    Ok(())
}

fn check(command: &CheckCommand, config: &Config) -> anyhow::Result<()> {
    // 1) Gather all colour table files under the given paths
    let files = scan::find_table_files(&command.paths, &config.extensions);
    if files.is_empty() {
        println!(
            "⚠️ No colour tables found. Expected files ending in {}.",
            config.extensions.join(", ")
        );
        return Ok(());
    }

    // 2) Set up the progress bar
    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg}\n[{bar:40.cyan/blue}] {pos}/{len} {percent}%")?
            .progress_chars("█▇▆▅▄▃▂▁  "),
    );

    // 3) Parse each file
    let mut entries = Vec::with_capacity(files.len());
    let mut total_bytes = 0u64;
    for path in &files {
        let name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("<unknown>");
        pb.set_message(format!("Reading {:<30}", name));
        let entry = scan::load_entry(path);
        total_bytes += entry.size_bytes;
        entries.push(entry);
        pb.inc(1);
    }
    pb.finish_with_message("✅ All files loaded!");

    println!("📦 Total bytes: {:.2} KiB", total_bytes as f64 / 1024.0);
    println!("📦 Total tables: {}", entries.len());
    print_table_summary(&entries);

    let failed = entries.iter().filter(|e| e.result.is_err()).count();
    if failed > 0 {
        anyhow::bail!("{} of {} colour tables failed to load", failed, entries.len());
    }
    Ok(())
}

fn convert(command: &ConvertCommand) -> anyhow::Result<()> {
    let report = parse_file(&command.input)
        .with_context(|| format!("Failed to load color table {}", command.input.display()))?;
    write_output(&report.table, command.output.as_deref())
}

fn preview(command: &PreviewCommand, config: &Config) -> anyhow::Result<()> {
    let report = parse_file(&command.input)
        .with_context(|| format!("Failed to load color table {}", command.input.display()))?;
    let width = command.width.unwrap_or(config.preview_width);
    let ops = render_with(&report.table, width, &config.layout);
    if ops.is_empty() {
        tracing::warn!("Fewer than two bands, nothing to preview");
    }

    if command.json {
        println!("{}", serde_json::to_string_pretty(&ops)?);
        return Ok(());
    }

    let output = command
        .output
        .as_deref()
        .ok_or_else(|| anyhow!("--output is required unless --json is given"))?;
    let img = raster::rasterize(&ops, width, &config.layout);
    let png = raster::encode_png(&img).context("Failed to encode preview")?;
    fs::write(output, png).with_context(|| format!("Failed to write {}", output.display()))?;

    let labels: Vec<&str> = ops
        .iter()
        .filter_map(|op| match op {
            DrawOp::Tick { label, .. } => Some(label.trim_end()),
            _ => None,
        })
        .collect();
    println!("✅ Wrote {} ({}x{})", output.display(), width, config.layout.height);
    if !labels.is_empty() {
        println!("🏷️ Ticks: {}", labels.join(" | "));
    }
    Ok(())
}

fn preset(command: &PresetCommand) -> anyhow::Result<()> {
    if !style::is_builtin_palette(&command.name) {
        anyhow::bail!(
            "Unknown palette '{}'. Available: {}",
            command.name,
            style::BUILTIN_PALETTES.join(", ")
        );
    }
    let mut table = style::table_from_preset(
        &command.name,
        command.min,
        command.max,
        command.bands,
        command.gradient,
    )
    .ok_or_else(|| {
        anyhow!(
            "Cannot build '{}' over {}..{}: the range must be finite",
            command.name,
            command.min,
            command.max
        )
    })?;

    if let Some(product) = &command.product {
        table.product = product.clone();
    }
    table.units = command.units.clone();
    table.step = command.step.clone();

    write_output(&table, command.output.as_deref())
}
