use crate::analysis::AnalysisOptions;
use crate::report::ReportFormat;
use fragmat_error::{FragError, Result};
use fragmat_parser::{LoadOptions, SchemaLayout};

#[derive(Debug, Clone)]
pub struct Config {
    pub format: ReportFormat,
    pub analyze: bool,
    pub quiet: bool,
    pub load: LoadOptions,
    pub analysis: AnalysisOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format: ReportFormat::Text,
            analyze: false,
            quiet: false,
            load: LoadOptions::default(),
            analysis: AnalysisOptions::default(),
        }
    }
}

impl Config {
    /// Layout with optional field-id overrides applied
    pub fn layout_from(meshes_field: Option<u16>, materials_field: Option<u16>) -> Result<SchemaLayout> {
        let defaults = SchemaLayout::default();
        let layout = SchemaLayout {
            model_meshes_field: meshes_field.unwrap_or(defaults.model_meshes_field),
            meshes_materials_field: materials_field.unwrap_or(defaults.meshes_materials_field),
        };
        for (name, id) in [
            ("meshes field", layout.model_meshes_field),
            ("materials field", layout.meshes_materials_field),
        ] {
            if id > SchemaLayout::MAX_FIELD_ID {
                return Err(FragError::config_invalid_value(format!(
                    "{name} id {id} cannot be addressed by a vtable (max {})",
                    SchemaLayout::MAX_FIELD_ID
                )));
            }
        }
        Ok(layout)
    }

    /// Override the analysis sample size; zero would probe nothing
    pub fn with_sample_limit(mut self, sample: usize) -> Result<Self> {
        if sample == 0 {
            return Err(FragError::cli_invalid_arguments("--sample must be at least 1")
                .with_command("analyze"));
        }
        self.analysis.sample_limit = sample;
        Ok(self)
    }

    pub fn validate(self) -> Self {
        let analysis = self.analysis.validate();
        Self { analysis, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_overrides() {
        let layout = Config::layout_from(Some(2), None).unwrap();
        assert_eq!(layout.model_meshes_field, 2);
        assert_eq!(layout.meshes_materials_field, SchemaLayout::default().meshes_materials_field);
    }

    #[test]
    fn unaddressable_field_id_is_rejected() {
        let err = Config::layout_from(None, Some(u16::MAX)).unwrap_err();
        assert_eq!(err.category(), "Config");
        assert!(err.to_string().contains("materials field id 65535"));
        assert!(Config::layout_from(Some(SchemaLayout::MAX_FIELD_ID), None).is_ok());
    }

    #[test]
    fn zero_sample_is_rejected() {
        let err = Config::default().with_sample_limit(0).unwrap_err();
        assert_eq!(err.category(), "Cli");
        assert!(err.user_message().contains("analyze"));

        let config = Config::default().with_sample_limit(12).unwrap();
        assert_eq!(config.analysis.sample_limit, 12);
    }

    #[test]
    fn validate_clamps_analysis() {
        let config = Config {
            analysis: AnalysisOptions {
                max_stride: 0,
                ..AnalysisOptions::default()
            },
            ..Config::default()
        }
        .validate();
        assert_eq!(config.analysis.max_stride, config.analysis.min_stride);
    }
}
