use crate::data;
use crate::parse::ParsedUrl;
use crate::policy::Policy;

pub fn check_executable_download(url: &ParsedUrl, _policy: &Policy) -> Option<String> {
    let path = url.path().to_lowercase();
    data::executable_extension(&path)?;
    Some("Suspicious executable or archive file extension in URL path.".to_string())
}

/// Only fires when the executable rule cannot, so a path scores one or the other.
pub fn check_document_download(url: &ParsedUrl, _policy: &Policy) -> Option<String> {
    let path = url.path().to_lowercase();
    if data::executable_extension(&path).is_some() {
        return None;
    }
    data::document_extension(&path)?;
    Some("Document download detected (common in phishing campaigns).".to_string())
}
