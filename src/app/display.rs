use crate::domain::model::DiagnosisResult;
use crate::utils::text::strip_markdown;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

static UNDERSCORE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_+").unwrap());

/// Display-ready strings for one diagnosis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultView {
    pub disease: String,
    pub confidence: Option<String>,
    pub advice: String,
    pub log_id: Option<String>,
}

/// `Tomato___Late_blight` becomes `Tomato Late blight`.
pub fn format_disease_name(class_name: &str) -> String {
    UNDERSCORE_RUNS
        .replace_all(class_name, " ")
        .trim()
        .to_string()
}

pub fn format_confidence(confidence: f64) -> String {
    format!("{:.1}%", confidence * 100.0)
}

impl From<&DiagnosisResult> for ResultView {
    fn from(result: &DiagnosisResult) -> Self {
        Self {
            disease: format_disease_name(&result.disease_name),
            confidence: result.confidence.map(format_confidence),
            advice: strip_markdown(&result.treatment_advice),
            log_id: result.log_id.clone(),
        }
    }
}

impl fmt::Display for ResultView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Diagnosis Result")?;
        writeln!(f, "Disease: {}", self.disease)?;
        if let Some(confidence) = &self.confidence {
            writeln!(f, "Confidence: {}", confidence)?;
        }
        writeln!(f, "Treatment Advice:")?;
        writeln!(f, "{}", self.advice)?;
        if let Some(log_id) = &self.log_id {
            writeln!(f, "Reference: {}", log_id)?;
        }
        Ok(())
    }
}
