//! HTML fragment for displaying an assessment.
//!
//! Markup is assembled through a small writer that escapes element text with
//! [`escape_html`] and attribute values with [`escape_attr`]; nothing from the
//! assessment is written into the buffer unescaped.

use crate::verdict::{RiskAssessment, RiskTier};

pub const NO_INDICATORS_HTML: &str =
    "No obvious phishing indicators detected. This does not guarantee the link is safe.";

pub const CAUTION_HTML: &str = "Treat unexpected links with caution, especially if received via email, SMS, or QR codes in public places.";

/// Escape text placed between tags.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape a value placed inside a double-quoted attribute.
pub fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Badge CSS class and icon for a tier.
pub fn badge(tier: RiskTier) -> (&'static str, &'static str) {
    match tier {
        RiskTier::Low => ("risk-low", "\u{1F7E2}"),
        RiskTier::Medium => ("risk-medium", "\u{1F7E1}"),
        RiskTier::High => ("risk-high", "\u{1F534}"),
    }
}

/// Minimal structured HTML writer.
#[derive(Default)]
struct Markup {
    buf: String,
}

impl Markup {
    fn open(&mut self, tag: &str, attrs: &[(&str, &str)]) -> &mut Self {
        self.buf.push('<');
        self.buf.push_str(tag);
        for (name, value) in attrs {
            self.buf.push(' ');
            self.buf.push_str(name);
            self.buf.push_str("=\"");
            self.buf.push_str(&escape_attr(value));
            self.buf.push('"');
        }
        self.buf.push('>');
        self
    }

    fn close(&mut self, tag: &str) -> &mut Self {
        self.buf.push_str("</");
        self.buf.push_str(tag);
        self.buf.push('>');
        self
    }

    fn text(&mut self, s: &str) -> &mut Self {
        self.buf.push_str(&escape_html(s));
        self
    }

    fn element(&mut self, tag: &str, attrs: &[(&str, &str)], text: &str) -> &mut Self {
        self.open(tag, attrs).text(text).close(tag)
    }

    fn br(&mut self) -> &mut Self {
        self.buf.push_str("<br>");
        self
    }

    fn finish(self) -> String {
        self.buf
    }
}

/// Render an assessment as an HTML fragment.
///
/// The URL is only a link for LOW tier, and the link never gets an opener reference.
pub fn render_html(assessment: &RiskAssessment) -> String {
    let (badge_class, icon) = badge(assessment.tier);
    let class = format!("risk-badge {badge_class}");
    let label = format!("{} RISK", assessment.tier);

    let mut m = Markup::default();
    m.open("div", &[("class", class.as_str())])
        .element("span", &[], icon)
        .element("span", &[], &label)
        .close("div")
        .br();

    m.element("strong", &[], "Analysed URL:").text(" ");
    if assessment.tier == RiskTier::Low {
        m.element(
            "a",
            &[
                ("href", assessment.url.as_str()),
                ("target", "_blank"),
                ("rel", "noopener noreferrer"),
                ("class", "safe-link"),
            ],
            &assessment.url,
        );
    } else {
        m.text(&assessment.url);
    }
    m.br();

    m.element("strong", &[], "Score:")
        .text(&format!(" {}", assessment.score))
        .br();

    if assessment.indicators.is_empty() {
        m.text(NO_INDICATORS_HTML);
        return m.finish();
    }

    m.element("strong", &[], "Indicators:").open("ul", &[]);
    for indicator in &assessment.indicators {
        m.element("li", &[], &indicator.message);
    }
    m.close("ul").text(CAUTION_HTML);

    m.finish()
}
