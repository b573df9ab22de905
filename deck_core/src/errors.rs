//! Error types for deck operations.
//!
//! Validation problems on a fact (duplicate or missing values) are not
//! errors; see [`crate::deck::FieldProblem`].

use card_models::{ModelError, ModelId};
use thiserror::Error;

use crate::facts::{CardId, FactId};
use crate::groups::GroupId;

#[derive(Debug, Error)]
pub enum DeckError {
    /// A field name not declared by the fact's model.
    #[error("unknown field `{0}`")]
    UnknownField(String),

    #[error("fact {0} not found")]
    UnknownFact(FactId),

    #[error("card {0} not found")]
    UnknownCard(CardId),

    #[error("model {0} not found")]
    UnknownModel(ModelId),

    #[error("group {0} not found")]
    UnknownGroup(GroupId),

    #[error("the default group cannot be deleted")]
    DefaultGroup,

    #[error("fact {0} has already been added")]
    AlreadyAdded(FactId),

    /// The field layout no longer matches the stored model.
    #[error("field layout does not match model {0}")]
    ModelMismatch(ModelId),

    #[error(transparent)]
    Model(#[from] ModelError),
}

pub type DeckResult<T> = std::result::Result<T, DeckError>;
