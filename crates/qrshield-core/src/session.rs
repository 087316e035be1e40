//! Host-owned scan state: the last assessment and the actions that use it.

use crate::engine;
use crate::output;
use crate::policy::Policy;
use crate::verdict::RiskAssessment;

pub const NO_URL_MESSAGE: &str = "No URL detected. Risk analysis is only applied to links.";
pub const UNREADABLE_MESSAGE: &str = "Unable to read QR code. Please try another image.";

/// RGBA pixel data handed to a decoder.
#[derive(Debug, Clone, Copy)]
pub struct ImageData<'a> {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA, 4 bytes per pixel.
    pub rgba: &'a [u8],
}

/// External QR decoding capability.
pub trait QrDecoder {
    /// Decoded payload, or `None` when no QR code could be read.
    fn decode(&self, image: &ImageData<'_>) -> Option<String>;
}

/// Result of one scan.
#[derive(Debug, PartialEq, Eq)]
pub enum ScanOutcome<'a> {
    Assessed(&'a RiskAssessment),
    /// Decoded text that is not a URL (contact card, Wi-Fi config, plain text).
    NoUrl(String),
    /// The decoder found nothing; no scoring was attempted.
    Unreadable,
}

impl ScanOutcome<'_> {
    /// User-facing message for outcomes that carry no assessment.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            ScanOutcome::Assessed(_) => None,
            ScanOutcome::NoUrl(_) => Some(NO_URL_MESSAGE),
            ScanOutcome::Unreadable => Some(UNREADABLE_MESSAGE),
        }
    }
}

/// Scan session holding at most one assessment at a time.
#[derive(Debug, Default)]
pub struct ScanSession {
    policy: Policy,
    last: Option<RiskAssessment>,
}

impl ScanSession {
    pub fn new(policy: Policy) -> Self {
        Self { policy, last: None }
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Score a decoded payload, replacing any previous assessment.
    pub fn scan_text(&mut self, payload: &str) -> ScanOutcome<'_> {
        let decoded = payload.trim();
        match engine::assess_text_with(decoded, &self.policy) {
            Some(assessment) => ScanOutcome::Assessed(self.last.insert(assessment)),
            None => {
                self.last = None;
                ScanOutcome::NoUrl(decoded.to_string())
            }
        }
    }

    /// Decode an image and score its payload.
    pub fn scan_image(
        &mut self,
        decoder: &dyn QrDecoder,
        image: &ImageData<'_>,
    ) -> ScanOutcome<'_> {
        match decoder.decode(image) {
            Some(payload) => self.scan_text(&payload),
            None => {
                tracing::debug!(
                    width = image.width,
                    height = image.height,
                    "no QR code found in image"
                );
                self.last = None;
                ScanOutcome::Unreadable
            }
        }
    }

    pub fn last(&self) -> Option<&RiskAssessment> {
        self.last.as_ref()
    }

    pub fn clear(&mut self) {
        self.last = None;
    }

    /// Whether copy/export actions have anything to act on.
    pub fn can_export(&self) -> bool {
        self.last.is_some()
    }

    /// URL to place on the clipboard.
    pub fn copy_text(&self) -> Option<&str> {
        self.last.as_ref().map(|a| a.url.as_str())
    }

    /// Plain-text report for the last assessment.
    pub fn export_report(&self) -> Option<String> {
        self.last.as_ref().map(output::report_text)
    }
}
