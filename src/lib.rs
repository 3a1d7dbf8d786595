//! # errkind
//!
//! Structured, classified error chains for service backends.
//!
//! ## Design Philosophy
//!
//! - **Kind**: Know what class of failure occurred (e.g. `NotExist`,
//!   `Permission`), machine-readably and stable across versions
//! - **Op**: Know which operation produced or forwarded the failure
//! - **Cause chain**: Keep the underlying error attached while each layer
//!   adds its own context
//! - **Inspection over inheritance**: Any layer can ask "what kind of
//!   failure is this, fundamentally?" without knowing concrete error types
//!
//! ## Usage
//!
//! ```rust
//! use errkind::{Kind, ResultExt};
//!
//! fn load_config() -> errkind::Result<String> {
//!     std::fs::read_to_string("relay.toml")
//!         .with_kind(Kind::IO, "config not readable")
//!         .with_op("config.Load")
//! }
//!
//! # fn handle() {
//! if let Err(err) = load_config() {
//!     match errkind::kind_of(&err) {
//!         Kind::NotExist => { /* 404 */ }
//!         Kind::Permission => { /* 403 */ }
//!         _ => { /* 500 */ }
//!     }
//! }
//! # }
//! ```
//!
//! ## Principles
//!
//! - Classify once, at the boundary where a raw external error enters the
//!   system; outer layers only add operation context and rely on pull-up
//! - Decorators never mutate an existing error; every decoration is a new
//!   node owning the old one as its cause
//! - The JSON wire shape `{kind, message, cause}` is intentionally lossy:
//!   only the top-level kind survives structurally, deeper context survives
//!   as flattened text

mod error;
mod inspect;
mod kind;
mod macros;
mod monad;
mod op;
mod wire;
mod wrap;

pub use error::{is_match, separator, set_separator, Builder, Error};
pub use inspect::{cause, is, kind_of, unwrap};
pub use kind::Kind;
pub use monad::{maybe, Monad};
pub use op::Op;
pub use wrap::{with_kind, with_message, with_op, wrap, ResultExt};

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
