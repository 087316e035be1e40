use std::io::Write;

use crate::verdict::{Indicator, RiskAssessment, RiskTier};

const SCHEMA_VERSION: u32 = 1;

/// Suggested file name for a downloaded report.
pub const REPORT_FILENAME: &str = "qr_phishing_report.txt";

const REPORT_TITLE: &str = "QR Code Phishing Detector Report";
const REPORT_NO_INDICATORS: &str = "No obvious phishing indicators detected.";
const REPORT_DISCLAIMER: &str = "Note: This tool is heuristic and does not guarantee link safety.";

/// JSON output wrapper with schema version.
#[derive(serde::Serialize)]
pub struct JsonOutput<'a> {
    pub schema_version: u32,
    pub url: &'a str,
    pub score: u32,
    pub tier: RiskTier,
    pub indicators: &'a [Indicator],
}

/// Write an assessment as JSON to the given writer.
pub fn write_json(assessment: &RiskAssessment, mut w: impl Write) -> std::io::Result<()> {
    let output = JsonOutput {
        schema_version: SCHEMA_VERSION,
        url: &assessment.url,
        score: assessment.score,
        tier: assessment.tier,
        indicators: &assessment.indicators,
    };
    serde_json::to_writer(&mut w, &output)?;
    writeln!(w)?;
    Ok(())
}

/// Plain-text report. Byte-for-byte stable for a given assessment.
pub fn report_text(assessment: &RiskAssessment) -> String {
    let mut text = String::new();
    text.push_str(REPORT_TITLE);
    text.push_str("\n\n");
    text.push_str(&format!("Analysed URL: {}\n", assessment.url));
    text.push_str(&format!("Risk Level: {}\n", assessment.tier));
    text.push_str(&format!("Score: {}\n\n", assessment.score));

    if assessment.indicators.is_empty() {
        text.push_str(REPORT_NO_INDICATORS);
        text.push('\n');
    } else {
        text.push_str("Indicators:\n");
        for indicator in &assessment.indicators {
            text.push_str(&format!("- {indicator}\n"));
        }
    }

    text.push('\n');
    text.push_str(REPORT_DISCLAIMER);
    text.push('\n');
    text
}

/// Write the plain-text report to the given writer.
pub fn write_report(assessment: &RiskAssessment, mut w: impl Write) -> std::io::Result<()> {
    w.write_all(report_text(assessment).as_bytes())?;
    w.flush()
}
