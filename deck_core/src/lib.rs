//! # Deck Core
//!
//! The deck store for Flashdeck. A deck owns facts (notes), the cards
//! generated from them, the groups cards are studied in, and the derived
//! indexes used to query them.
//!
//! ## Core Components
//!
//! - **facts**: Facts, cards and tag canonicalization
//! - **checksum**: The field checksum index behind duplicate detection
//! - **selector**: Tag queries selecting facts by required/excluded tags
//! - **groups**: Group registry with never-reused ids
//! - **deck**: The `Deck` store tying it together, with commit/rollback
//!
//! ## Design Philosophy
//!
//! - **Schema-checked**: Facts only accept fields their model declares
//! - **Derived indexes**: Checksums are rebuilt from field writes, never edited directly
//! - **Explicit side effects**: Operations report cascades (like fact removal) in their results

pub mod checksum;
pub mod deck;
pub mod errors;
pub mod facts;
pub mod groups;
pub mod selector;

pub use checksum::*;
pub use deck::*;
pub use errors::*;
pub use facts::*;
pub use groups::*;
pub use selector::*;
