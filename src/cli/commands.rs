use crate::error::{ExtractError, ExtractResult};
use crate::excel::{write_partitions, WorkbookImporter};
use crate::layout::Layout;
use crate::types::{Extraction, SheetCount, WrittenTable};
use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Built-in layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Variant {
    /// J, N and S value columns; one file per row span
    #[default]
    Dual,
    /// J and N value columns; one combined file
    Single,
}

impl Variant {
    pub fn layout(self) -> Layout {
        match self {
            Variant::Dual => Layout::dual(),
            Variant::Single => Layout::single(),
        }
    }
}

/// Options of the extract command
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    pub input: PathBuf,
    pub variant: Variant,
    /// Layout file replacing the built-in variant
    pub layout_file: Option<PathBuf>,
    /// Defaults to the input's folder
    pub output_dir: Option<PathBuf>,
    pub dry_run: bool,
    pub json: bool,
    pub open_folder: bool,
    pub verbose: bool,
}

impl ExtractOptions {
    pub fn new<P: AsRef<Path>>(input: P) -> Self {
        Self {
            input: input.as_ref().to_path_buf(),
            variant: Variant::default(),
            layout_file: None,
            output_dir: None,
            dry_run: false,
            json: false,
            open_folder: false,
            verbose: false,
        }
    }
}

/// What one extract run reports back
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionReport {
    pub source: PathBuf,
    pub sheets: Vec<SheetCount>,
    pub outputs: Vec<WrittenTable>,
    pub dry_run: bool,
}

/// Pick the layout: an explicit file wins over the built-in variant
pub fn load_layout(variant: Variant, layout_file: Option<&Path>) -> ExtractResult<Layout> {
    match layout_file {
        Some(path) => Layout::from_yaml_file(path),
        None => Ok(variant.layout()),
    }
}

/// Folder the output files go to: `--output-dir`, else the input's folder
pub fn output_folder(input: &Path, output_dir: Option<&Path>) -> ExtractResult<PathBuf> {
    let dir = match output_dir {
        Some(dir) => dir.to_path_buf(),
        None => std::path::absolute(input)?
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default(),
    };
    Ok(std::path::absolute(dir)?)
}

/// Run the pipeline and write one file per partition
pub fn run_extract(options: &ExtractOptions) -> ExtractResult<ExtractionReport> {
    let layout = load_layout(options.variant, options.layout_file.as_deref())?.resolve()?;
    let importer = WorkbookImporter::new(&options.input, layout);
    let extraction = importer.import()?;

    let dir = output_folder(&options.input, options.output_dir.as_deref())?;
    let outputs = if options.dry_run {
        planned_outputs(&extraction, &dir)
    } else {
        if !dir.exists() {
            std::fs::create_dir_all(&dir).map_err(|e| ExtractError::OutputWrite {
                path: dir.clone(),
                detail: e.to_string(),
            })?;
        }
        write_partitions(&extraction, &dir)?
    };

    Ok(ExtractionReport {
        source: options.input.clone(),
        sheets: extraction.sheets,
        outputs,
        dry_run: options.dry_run,
    })
}

fn planned_outputs(extraction: &Extraction, dir: &Path) -> Vec<WrittenTable> {
    extraction
        .tables
        .iter()
        .map(|t| WrittenTable {
            partition: t.partition.clone(),
            path: dir.join(&t.file_name),
            records: t.table.len(),
        })
        .collect()
}

/// Execute the extract command
pub fn extract(options: ExtractOptions) -> ExtractResult<()> {
    if !options.json {
        println!("{}", "🔥 Merit Progression - Extract".bold().green());
        println!("   Input:  {}", options.input.display());
        match &options.layout_file {
            Some(path) => println!("   Layout: {}", path.display()),
            None => println!("   Layout: {:?} (built-in)", options.variant),
        }
        println!();
        if options.dry_run {
            println!(
                "{}",
                "📋 DRY RUN MODE - No files will be written\n".yellow()
            );
        }
    }

    let report = run_extract(&options)?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, options.verbose);
    }

    if options.open_folder && !options.dry_run {
        if let Some(dir) = report.outputs.first().and_then(|o| o.path.parent()) {
            open_folder(dir);
        }
    }

    Ok(())
}

fn print_report(report: &ExtractionReport, verbose: bool) {
    let name_width = report
        .sheets
        .iter()
        .map(|s| s.sheet.chars().count())
        .max()
        .unwrap_or(0)
        .max("Sheet".len());

    println!(
        "   {:<width$}  {}",
        "Sheet".bold(),
        "Records".bold(),
        width = name_width
    );
    for sheet in &report.sheets {
        let count = if sheet.records == 0 {
            sheet.records.to_string().dimmed()
        } else {
            sheet.records.to_string().bright_blue()
        };
        println!("   {:<width$}  {}", sheet.sheet, count, width = name_width);
    }
    println!();

    if report.dry_run {
        println!("{}", "✅ Dry run complete (nothing written)".bold().green());
    } else {
        println!("{}", "✅ Extraction Complete!".bold().green());
    }
    for output in &report.outputs {
        println!(
            "   {} ({} records): {}",
            output.partition.cyan(),
            output.records,
            output.path.display()
        );
    }
    if verbose {
        let total: usize = report.outputs.iter().map(|o| o.records).sum();
        println!("\n   {} sheets, {} records", report.sheets.len(), total);
    }
    println!();
}

/// Open a folder with the platform handler; failures are only logged
pub fn open_folder(dir: &Path) {
    match open::that(dir) {
        Ok(()) => info!(dir = %dir.display(), "opened output folder"),
        Err(e) => warn!(dir = %dir.display(), error = %e, "could not open output folder"),
    }
}

/// Execute the layout command: print a layout as YAML
pub fn layout(variant: Variant) -> ExtractResult<()> {
    print!("{}", variant.layout().to_yaml()?);
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
