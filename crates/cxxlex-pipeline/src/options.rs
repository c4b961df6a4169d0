//! Pipeline configuration.

use cxxlex_lexer::TokenizerConfig;
use serde::{Deserialize, Serialize};

use crate::error::PipelineResult;

/// Options for [`crate::tokenize_source`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineOptions {
    /// Options passed to the tokenizer.
    pub tokenizer: TokenizerConfig,
    /// Remove block and inline comments from the assembled list.
    pub strip_comments: bool,
}

impl PipelineOptions {
    /// Parse options from a JSON document. Missing fields take defaults.
    pub fn from_json(json: &str) -> PipelineResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Options with comment stripping switched on.
    pub fn stripping_comments() -> Self {
        Self {
            strip_comments: true,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = PipelineOptions::default();
        assert!(!opts.strip_comments);
        assert!(!opts.tokenizer.emit_line_terminator);
        assert!(opts.tokenizer.report_unterminated);
    }

    #[test]
    fn test_from_json_partial() {
        let opts = PipelineOptions::from_json(r#"{"strip_comments": true}"#).unwrap();
        assert!(opts.strip_comments);
        assert!(opts.tokenizer.report_unterminated);

        let opts =
            PipelineOptions::from_json(r#"{"tokenizer": {"report_unterminated": false}}"#).unwrap();
        assert!(!opts.strip_comments);
        assert!(!opts.tokenizer.report_unterminated);
    }

    #[test]
    fn test_from_json_invalid() {
        let err = PipelineOptions::from_json("{ nope").unwrap_err();
        assert!(err.to_string().starts_with("invalid pipeline options"));
    }
}
