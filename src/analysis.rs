use fragmat_parser::MaterialSource;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const NO_MESHES: &str = "No Meshes found in model";

/// Caps that keep the analysis bounded regardless of collection size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisOptions {
    /// Number of leading records probed
    pub sample_limit: usize,
    /// Smallest candidate stride
    pub min_stride: usize,
    /// Largest candidate stride
    pub max_stride: usize,
    /// Up to this many runs are listed in full
    pub max_runs_listed: usize,
    /// Runs shown when the pattern is too fragmented to list
    pub runs_preview: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            sample_limit: 100,
            min_stride: 2,
            max_stride: 10,
            max_runs_listed: 5,
            runs_preview: 3,
        }
    }
}

impl AnalysisOptions {
    pub fn validate(self) -> Self {
        let min_stride = self.min_stride.max(2);
        Self {
            sample_limit: self.sample_limit.max(1),
            min_stride,
            max_stride: self.max_stride.max(min_stride),
            runs_preview: self.runs_preview.min(self.max_runs_listed),
            ..self
        }
    }
}

/// Best stride candidate: indices `i % stride == 0` that were accessible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrideCandidate {
    pub stride: usize,
    pub matches: usize,
}

/// Maximal run of indices with the same accessibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    pub start: usize,
    pub length: usize,
    pub accessible: bool,
}

impl Run {
    /// Last index covered by the run; an empty run ends at its start
    pub fn end(&self) -> usize {
        self.start.saturating_add(self.length).saturating_sub(1).max(self.start)
    }
}

impl fmt::Display for Run {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Indices {}-{}: {}",
            self.start,
            self.end(),
            if self.accessible {
                "Accessible"
            } else {
                "Inaccessible"
            }
        )
    }
}

/// Accessibility summary of the leading records of a material collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessibilityReport {
    pub has_materials: bool,
    pub total: usize,
    pub sampled: usize,
    pub accessible: usize,
    pub inaccessible: usize,
    pub stride: Option<StrideCandidate>,
    pub runs: Vec<Run>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    #[serde(skip)]
    options: AnalysisOptions,
}

impl AccessibilityReport {
    pub fn analyze<M: MaterialSource + ?Sized>(model: &M) -> Self {
        Self::analyze_with_options(model, &AnalysisOptions::default())
    }

    pub fn analyze_with_options<M: MaterialSource + ?Sized>(
        model: &M,
        options: &AnalysisOptions,
    ) -> Self {
        let options = options.validate();
        let mut report = AccessibilityReport {
            has_materials: model.has_materials(),
            total: 0,
            sampled: 0,
            accessible: 0,
            inaccessible: 0,
            stride: None,
            runs: Vec::new(),
            schema: None,
            options,
        };
        if !report.has_materials {
            debug!("no material collection to analyze");
            return report;
        }

        report.total = model.material_count();
        let sample = sample_accessibility(model, options.sample_limit);
        report.sampled = sample.len();
        report.accessible = sample.iter().filter(|&&ok| ok).count();
        report.inaccessible = report.sampled - report.accessible;

        if report.inaccessible > 0 {
            report.stride = detect_stride(&sample, options.min_stride, options.max_stride);
            report.runs = segment_runs(&sample);
        }
        report.schema = model.schema_description();

        debug!(
            "sampled {} of {} materials: {} accessible, {} runs",
            report.sampled,
            report.total,
            report.accessible,
            report.runs.len()
        );
        report
    }

    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }
}

/// Analyze a material collection and render the report as text
pub fn analyze<M: MaterialSource + ?Sized>(model: &M) -> String {
    AccessibilityReport::analyze(model).to_string()
}

/// Standard decode of each leading index; faults and empty slots count as inaccessible
fn sample_accessibility<M: MaterialSource + ?Sized>(model: &M, limit: usize) -> Vec<bool> {
    (0..model.material_count().min(limit))
        .map(|i| match model.material_at(i) {
            Ok(record) => record.is_some(),
            Err(e) => {
                trace!("sample {i} inaccessible: {e}");
                false
            }
        })
        .collect()
}

/// Stride with the most accessible multiples; ties keep the smallest stride
fn detect_stride(sample: &[bool], min_stride: usize, max_stride: usize) -> Option<StrideCandidate> {
    let mut best: Option<StrideCandidate> = None;
    for stride in min_stride..=max_stride {
        let matches = sample
            .iter()
            .enumerate()
            .filter(|&(i, &ok)| ok && i % stride == 0)
            .count();
        if matches > 0 && best.is_none_or(|b| matches > b.matches) {
            best = Some(StrideCandidate { stride, matches });
        }
    }
    best
}

fn segment_runs(sample: &[bool]) -> Vec<Run> {
    let mut runs: Vec<Run> = Vec::new();
    for (i, &accessible) in sample.iter().enumerate() {
        match runs.last_mut() {
            Some(run) if run.accessible == accessible => run.length += 1,
            _ => runs.push(Run {
                start: i,
                length: 1,
                accessible,
            }),
        }
    }
    runs
}

impl fmt::Display for AccessibilityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.has_materials {
            return f.write_str(NO_MESHES);
        }

        writeln!(f, "Material Structure Analysis")?;
        writeln!(f, "==========================")?;
        writeln!(f, "Total Materials: {}", self.total)?;
        writeln!(f, "Sampled Materials: {}", self.sampled)?;
        writeln!(
            f,
            "Accessible: {}, Inaccessible: {}",
            self.accessible, self.inaccessible
        )?;

        if self.inaccessible > 0 {
            writeln!(f)?;
            writeln!(f, "Accessibility Pattern:")?;
            if let Some(best) = self.stride {
                writeln!(
                    f,
                    "  Possible stride pattern detected: Every {}th material accessible ({} matches)",
                    best.stride, best.matches
                )?;
            }

            if self.runs.len() <= self.options.max_runs_listed {
                writeln!(f, "  Contiguous accessibility blocks:")?;
                for run in &self.runs {
                    writeln!(f, "    {run}")?;
                }
            } else {
                writeln!(
                    f,
                    "  Complex accessibility pattern with {} blocks",
                    self.runs.len()
                )?;
                writeln!(f, "  First few blocks:")?;
                for run in self.runs.iter().take(self.options.runs_preview) {
                    writeln!(f, "    {run}")?;
                }
            }
        }

        if let Some(schema) = &self.schema {
            writeln!(f)?;
            f.write_str(schema)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fragmat_error::{FragError, Result};
    use fragmat_parser::{MaterialRecord, RenderedFaces, Stroke};

    /// `true` slots decode, `false` slots fault
    struct Pattern(Option<Vec<bool>>);

    impl MaterialSource for Pattern {
        fn has_materials(&self) -> bool {
            self.0.is_some()
        }

        fn material_count(&self) -> usize {
            self.0.as_ref().map_or(0, Vec::len)
        }

        fn material_at(&self, index: usize) -> Result<Option<MaterialRecord>> {
            match self.0.as_ref().and_then(|p| p.get(index)) {
                Some(true) => Ok(Some(MaterialRecord {
                    r: 1,
                    g: 2,
                    b: 3,
                    a: 4,
                    rendered_faces: RenderedFaces::One,
                    stroke: Stroke::Default,
                })),
                _ => Err(FragError::decode_invalid_vtable("corrupt")),
            }
        }
    }

    #[test]
    fn no_collection_is_fixed_message() {
        let report = AccessibilityReport::analyze(&Pattern(None));
        assert!(!report.has_materials);
        assert_eq!(report.to_string(), NO_MESHES);
    }

    #[test]
    fn empty_collection_has_no_pattern_section() {
        let text = analyze(&Pattern(Some(Vec::new())));
        assert!(text.contains("Total Materials: 0"));
        assert!(text.contains("Accessible: 0, Inaccessible: 0"));
        assert!(!text.contains("Accessibility Pattern"));
    }

    #[test]
    fn alternating_parity_example() {
        let pattern: Vec<bool> = (0..12).map(|i| i % 2 == 0).collect();
        let report = AccessibilityReport::analyze(&Pattern(Some(pattern)));
        assert_eq!(report.accessible, 6);
        assert_eq!(report.inaccessible, 6);
        assert_eq!(
            report.stride,
            Some(StrideCandidate {
                stride: 2,
                matches: 6
            })
        );
        assert_eq!(report.runs.len(), 12);
        assert_eq!(
            &report.runs[..3],
            &[
                Run { start: 0, length: 1, accessible: true },
                Run { start: 1, length: 1, accessible: false },
                Run { start: 2, length: 1, accessible: true },
            ]
        );

        let text = report.to_string();
        assert!(text.contains("Every 2th material accessible (6 matches)"));
        assert!(text.contains("Complex accessibility pattern with 12 blocks"));
        assert!(text.contains("    Indices 0-0: Accessible\n    Indices 1-1: Inaccessible\n    Indices 2-2: Accessible\n"));
        assert!(!text.contains("Indices 3-3"));
    }

    #[test]
    fn block_corruption_lists_all_runs() {
        let pattern: Vec<bool> = (0..30).map(|i| !(10..20).contains(&i)).collect();
        let report = AccessibilityReport::analyze(&Pattern(Some(pattern)));
        assert_eq!(report.runs.len(), 3);
        let text = report.to_string();
        assert!(text.contains("  Contiguous accessibility blocks:"));
        assert!(text.contains("    Indices 0-9: Accessible"));
        assert!(text.contains("    Indices 10-19: Inaccessible"));
        assert!(text.contains("    Indices 20-29: Accessible"));
    }

    #[test]
    fn stride_ties_keep_smallest() {
        // accessible only at 0: every stride matches once
        let mut sample = vec![false; 20];
        sample[0] = true;
        assert_eq!(
            detect_stride(&sample, 2, 10),
            Some(StrideCandidate {
                stride: 2,
                matches: 1
            })
        );
        assert_eq!(detect_stride(&[false, true, false], 2, 10), None);
    }

    #[test]
    fn all_accessible_skips_pattern_detection() {
        let report = AccessibilityReport::analyze(&Pattern(Some(vec![true; 8])));
        assert_eq!(report.inaccessible, 0);
        assert!(report.stride.is_none());
        assert!(report.runs.is_empty());
    }

    #[test]
    fn sample_is_capped() {
        let report = AccessibilityReport::analyze(&Pattern(Some(vec![false; 250])));
        assert_eq!(report.total, 250);
        assert_eq!(report.sampled, 100);
        assert_eq!(report.runs, vec![Run { start: 0, length: 100, accessible: false }]);
        assert!(report.stride.is_none());

        let options = AnalysisOptions {
            sample_limit: 10,
            ..AnalysisOptions::default()
        };
        let report = AccessibilityReport::analyze_with_options(&Pattern(Some(vec![false; 250])), &options);
        assert_eq!(report.sampled, 10);
    }

    #[test]
    fn empty_run_does_not_underflow() {
        let run: Run = serde_json::from_str(r#"{"start":0,"length":0,"accessible":false}"#).unwrap();
        assert_eq!(run.end(), 0);
        assert_eq!(run.to_string(), "Indices 0-0: Inaccessible");
        let run = Run { start: 5, length: 0, accessible: true };
        assert_eq!(run.end(), 5);
    }

    #[test]
    fn options_validate_clamps() {
        let options = AnalysisOptions {
            sample_limit: 0,
            min_stride: 0,
            max_stride: 1,
            max_runs_listed: 2,
            runs_preview: 9,
        }
        .validate();
        assert_eq!(options.sample_limit, 1);
        assert_eq!(options.min_stride, 2);
        assert_eq!(options.max_stride, 2);
        assert_eq!(options.runs_preview, 2);
    }
}
