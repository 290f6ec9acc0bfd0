//! Full-collection export: every index goes through the resolver, so one bad
//! record never stops the report.

use crate::analysis::{AccessibilityReport, AnalysisOptions};
use crate::info::MaterialInfo;
use crate::resolve::Resolver;
use crate::table_format;
use fragmat_error::{FragError, Result};
use fragmat_parser::MaterialSource;
use log::info;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub const NO_MESHES_DATA: &str = "No Meshes data found in the model.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ReportFormat {
    /// Plain text blocks, one per material
    #[default]
    Text,
    /// Grid with one row per material
    Table,
    /// Machine-readable JSON document
    Json,
}

#[derive(Debug, Clone, Serialize)]
pub struct MaterialReport {
    #[serde(skip)]
    pub has_materials: bool,
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    pub materials: Vec<MaterialInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AccessibilityReport>,
}

impl MaterialReport {
    /// Resolve every material, optionally running the structure analysis too
    pub fn collect<M: MaterialSource + ?Sized>(model: &M, analysis: Option<&AnalysisOptions>) -> Self {
        let materials = Resolver::new(model).resolve_all();
        let valid = materials.iter().filter(|m| m.is_valid).count();
        let report = Self {
            has_materials: model.has_materials(),
            total: materials.len(),
            valid,
            invalid: materials.len() - valid,
            materials,
            analysis: analysis.map(|options| AccessibilityReport::analyze_with_options(model, options)),
        };
        info!(
            "collected {} materials ({} valid, {} invalid)",
            report.total, report.valid, report.invalid
        );
        report
    }

    pub fn write<W: Write>(&self, format: ReportFormat, out: &mut W) -> Result<()> {
        match format {
            ReportFormat::Text => self.write_text(out),
            ReportFormat::Table => self.write_table(out),
            ReportFormat::Json => self.write_json(out),
        }
    }

    pub fn write_text<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "Material Information Export")?;
        writeln!(out, "==========================")?;
        writeln!(out)?;
        if !self.has_materials {
            writeln!(out, "{NO_MESHES_DATA}")?;
            return Ok(());
        }

        writeln!(out, "Total Materials: {}", self.total)?;
        writeln!(out)?;
        writeln!(out, "MATERIALS LIST")?;
        writeln!(out, "==============")?;
        for material in &self.materials {
            writeln!(out, "{material}")?;
        }
        writeln!(out, "Valid: {}, Invalid: {}", self.valid, self.invalid)?;
        self.write_analysis(out)
    }

    pub fn write_table<W: Write>(&self, out: &mut W) -> Result<()> {
        if !self.has_materials {
            writeln!(out, "{NO_MESHES_DATA}")?;
            return Ok(());
        }
        writeln!(out, "{}", table_format::format_materials_table(&self.materials))?;
        writeln!(out, "{}", table_format::format_summary(self))?;
        self.write_analysis(out)
    }

    pub fn write_json<W: Write>(&self, out: &mut W) -> Result<()> {
        serde_json::to_writer_pretty(&mut *out, self)
            .map_err(|e| FragError::cli_output_format(format!("Failed to serialize report: {e}")))?;
        writeln!(out)?;
        Ok(())
    }

    fn write_analysis<W: Write>(&self, out: &mut W) -> Result<()> {
        if let Some(analysis) = &self.analysis {
            writeln!(out)?;
            writeln!(out, "{analysis}")?;
        }
        Ok(())
    }
}

/// Write a report to `path`, replacing any existing file
pub fn write_report_file<P: AsRef<Path>>(
    path: P,
    report: &MaterialReport,
    format: ReportFormat,
) -> Result<()> {
    let path = path.as_ref();
    let attach = |e: FragError| e.with_file_path(path);

    let file = File::create(path).map_err(|e| attach(e.into()))?;
    let mut out = BufWriter::new(file);
    report.write(format, &mut out).map_err(attach)?;
    out.flush().map_err(|e| attach(e.into()))?;
    info!("wrote {} report to {}", report.total, path.display());
    Ok(())
}
