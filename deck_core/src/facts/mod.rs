//! Facts module - the records a deck stores and the cards derived from them.
//!
//! - **Facts**: Field values for one note, plus its tags
//! - **Cards**: One question/answer pair per active template of the fact's model
//! - **Tags**: Whitespace-separated labels, canonicalized on write

mod card;
mod fact;
mod tag;

pub use card::*;
pub use fact::*;
pub use tag::*;
