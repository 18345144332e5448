//! Token preservation for text transforms
//!
//! This crate contains:
//! - The `Vault`, which swaps protected substrings for `__ID<n>__`
//!   placeholders and puts them back after a transform has run
//! - The `Matcher` seam deciding what gets protected
//! - `protect` helpers composing extract → transform → restore
//!
//! ```
//! use preserve_core::Vault;
//!
//! let mut vault = Vault::from_pattern(r"<%=\s*[^>]+%>").unwrap();
//! let extracted = vault.extract("<div><%= name %></div>");
//! assert_eq!(extracted, "<div>__ID0__</div>");
//! assert_eq!(vault.restore(&extracted), "<div><%= name %></div>");
//! ```

pub mod error;
pub mod matcher;
pub mod placeholder;
pub mod protect;
pub mod vault;

pub use error::{Error, Result};
pub use matcher::Matcher;
pub use placeholder::{PLACEHOLDER, placeholder};
pub use protect::{protect, protect_async, try_protect};
pub use vault::{CaptureMap, Miss, MissPolicy, Restoration, Vault};
