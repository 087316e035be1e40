pub mod data;
pub mod engine;
pub mod logging;
pub mod normalize;
pub mod output;
pub mod parse;
pub mod policy;
pub mod render;
pub mod rules;
pub mod session;
pub mod verdict;

pub use engine::{assess, assess_batch, assess_text, assess_text_with, assess_with};
pub use normalize::{classify, normalize, NormalizeError};
pub use parse::ParsedUrl;
pub use policy::{Policy, PolicyError};
pub use verdict::{Indicator, RiskAssessment, RiskTier, RuleId};
