//! cxxlex pipeline: tokenizes whole source files.
//!
//! ```text
//! Source → logical lines → Tokenizer → master TokenList → (comment stripping) → listing / JSON
//! ```

pub mod comments;
pub mod error;
pub mod listing;
pub mod options;
pub mod pipeline;

pub use comments::{remove_block_comments, remove_inline_comments, strip_comments, CommentCounts};
pub use error::PipelineError;
pub use listing::format_listing;
pub use options::PipelineOptions;
pub use pipeline::{tokenize_source, tokenize_str, TokenizeOutput};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a stderr subscriber filtered by `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset or unparsable, or when another
/// global subscriber is already installed. Only the first call has any
/// effect. Example: `RUST_LOG=cxxlex_lexer=trace,cxxlex_pipeline=debug`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let Ok(filter) = EnvFilter::try_from_default_env() else {
            return;
        };
        let layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true);
        let _ = tracing_subscriber::registry().with(filter).with(layer).try_init();
    });
}
