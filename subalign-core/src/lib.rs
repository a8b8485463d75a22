//! subalign-core: constant-offset alignment of timestamped token streams.
//!
//! Given a reference stream (e.g. a transcript) and a target stream (e.g. a
//! subtitle track already expressed in the reference's vocabulary), this
//! crate estimates the single offset in seconds that re-synchronizes the
//! target with the reference.
//!
//! # Architecture
//!
//! The search is built from four layers:
//!
//! - [`similarity`]: set-overlap measures between two buckets of token ids
//! - [`encoder::TokenEncoder`]: maps raw words to canonical integer ids,
//!   dropping stopwords through a [`traits::Lexicon`]
//! - [`bucket::BucketSequence`]: discretizes a stream into fixed-width time
//!   buckets and searches integer bucket offsets in zigzag order
//! - [`search`]: runs the bucket search over decreasing widths, carrying a
//!   running offset from coarse to fine
//!
//! # Quick Start
//!
//! ```
//! use subalign_core::lang::Language;
//! use subalign_core::search::{SearchConfig, align};
//! use subalign_core::types::{Token, TokenStream};
//!
//! let reference = TokenStream::from(vec![
//!     Token::new("the", 0.0, 1.0),
//!     Token::new("cat", 1.0, 2.0),
//!     Token::new("sat", 2.0, 3.0),
//! ]);
//! let target = reference.shifted(10.0);
//!
//! let alignment = align(&reference, &target, Language::En, &SearchConfig::default())?;
//! assert!((alignment.offset + 10.0).abs() < 0.01);
//! # Ok::<(), subalign_core::error::Error>(())
//! ```

pub mod bucket;
pub mod encoder;
pub mod error;
pub mod lang;
pub mod search;
pub mod similarity;
pub mod traits;
pub mod types;
