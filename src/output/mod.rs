//! Helpers for rendering generation outcomes for the terminal and as JSON

use crate::error::Error;
use crate::pipeline::GenerationReport;
use serde_json::{Value, json};

/// Combined structured and human-readable representation of an outcome
#[derive(Debug, Clone)]
pub struct RenderedOutcome {
    /// Structured JSON representation suitable for scripts
    pub json: Value,
    /// Human-readable lines for terminal presentation
    pub human: Vec<String>,
}

/// Render a successful generation.
pub fn render_report(report: &GenerationReport) -> RenderedOutcome {
    let mut human = Vec::new();

    if let Some(warning) = &report.logo_warning {
        human.push(format!("⚠ Could not add logo: {warning}"));
    }
    human.push(format!("✓ QR generated at: {}", report.path.display()));
    human.push(format!(
        "  Size: {}x{} px (version {})",
        report.width, report.height, report.version
    ));
    if report.logo_applied {
        human.push("  Logo: applied".to_string());
    }
    match report.verified {
        Some(true) => human.push("  Verified: decodes back to the input".to_string()),
        Some(false) => human.push("  Verified: FAILED, the saved code did not decode back".to_string()),
        None => {}
    }

    let json = serde_json::to_value(report).unwrap_or_else(|e| json!({ "error": e.to_string() }));

    RenderedOutcome { json, human }
}

/// Render a failed generation.
pub fn render_failure(error: &Error) -> RenderedOutcome {
    let message = error.to_string();
    RenderedOutcome {
        json: json!({ "error": message }),
        human: vec![format!("✗ An error occurred: {message}")],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn report() -> GenerationReport {
        GenerationReport {
            path: PathBuf::from("/tmp/out/qr_20240309_070542.png"),
            width: 385,
            height: 385,
            version: 8,
            logo_applied: false,
            logo_warning: None,
            verified: None,
        }
    }

    #[test]
    fn success_lines_and_json() {
        let rendered = render_report(&report());
        assert_eq!(
            rendered.human[0],
            "✓ QR generated at: /tmp/out/qr_20240309_070542.png"
        );
        assert_eq!(rendered.json["width"], 385);
        assert_eq!(rendered.json["version"], 8);
        assert!(rendered.json["logo_warning"].is_null());
    }

    #[test]
    fn logo_warning_comes_first() {
        let mut report = report();
        report.logo_warning = Some("could not read logo.png".to_string());
        report.verified = Some(true);

        let rendered = render_report(&report);
        assert!(rendered.human[0].starts_with("⚠ Could not add logo"));
        assert!(rendered.human.iter().any(|l| l.contains("Verified")));
        assert_eq!(rendered.json["verified"], true);
    }

    #[test]
    fn failure_is_wrapped() {
        let rendered = render_failure(&Error::EmptyPayload);
        assert_eq!(
            rendered.json["error"],
            "No text was provided for the QR code"
        );
        assert_eq!(rendered.human.len(), 1);
    }
}
