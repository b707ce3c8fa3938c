//! Auto Matcher Common Library
//!
//! 注文行とノメンクラチュアの照合コア（I/O なし、同期処理）

pub mod cancel;
pub mod error;
pub mod grouper;
pub mod index;
pub mod normalizer;
pub mod scoring;
pub mod selector;
pub mod session;
pub mod types;

pub use cancel::CancellationToken;
pub use error::{Error, Result};
pub use grouper::{group_key, group_queries, group_queries_by};
pub use index::{Bm25Params, RelevanceIndex};
pub use normalizer::{tokenize, Abbreviation, AbbreviationTable, TextNormalizer};
pub use scoring::{apply_prefix_bonus, normalize_scores};
pub use selector::select_matches;
pub use session::{MatchOptions, MatchSession};
pub use types::{
    is_yes, CatalogEntry, MatchOutcome, MatchResult, RequestRow, RequestTable, RunStatus,
    StatusFlag, StatusFlags,
};
