use crate::MAX_ERROR_ID_LEN;
use std::fmt::{self, Debug};
use thiserror::Error as ThisError;

///
/// ProxyError
///
/// Failure surfaced by the guaranteed access contract.
/// Carries enough identity (entity path plus rendered key) to point at the
/// exact proxy instance that came back empty.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ProxyError {
    #[error("guaranteed proxy {entity}({id}) resolved to nothing")]
    GuaranteeViolation { entity: &'static str, id: String },

    #[error(
        "guaranteed collection proxy of {entity} owned by {owner_entity}({owner}) resolved to nothing"
    )]
    CollectionGuaranteeViolation {
        entity: &'static str,
        owner_entity: &'static str,
        owner: String,
    },
}

impl ProxyError {
    /// Construct a scalar guarantee violation for one proxy identity.
    pub(crate) fn guarantee_violation(entity: &'static str, id: &impl Debug) -> Self {
        Self::GuaranteeViolation {
            entity,
            id: render_key(id),
        }
    }

    /// Construct a collection guarantee violation for one owner identity.
    pub(crate) fn collection_guarantee_violation(
        entity: &'static str,
        owner_entity: &'static str,
        owner: &impl Debug,
    ) -> Self {
        Self::CollectionGuaranteeViolation {
            entity,
            owner_entity,
            owner: render_key(owner),
        }
    }

    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::GuaranteeViolation { .. } | Self::CollectionGuaranteeViolation { .. } => {
                ErrorClass::GuaranteeViolation
            }
        }
    }

    /// Path of the entity type the failing proxy points at.
    #[must_use]
    pub const fn entity(&self) -> &'static str {
        match self {
            Self::GuaranteeViolation { entity, .. }
            | Self::CollectionGuaranteeViolation { entity, .. } => entity,
        }
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}: {self}", self.class())
    }
}

///
/// DaoError
///
/// Failure reported by a lookup provider.
/// The proxy core folds every variant into absence; the variants only exist
/// so providers and sinks can tell transient outages apart from other faults.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum DaoError {
    #[error("lookup provider unavailable: {message}")]
    Unavailable { message: String },

    #[error("lookup failed: {message}")]
    Other { message: String },
}

impl DaoError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Unavailable { .. } => ErrorClass::Unavailable,
            Self::Other { .. } => ErrorClass::Internal,
        }
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}: {self}", self.class())
    }
}

///
/// ErrorClass
/// Error taxonomy for runtime classification.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    GuaranteeViolation,
    Unavailable,
    Internal,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::GuaranteeViolation => "guarantee_violation",
            Self::Unavailable => "unavailable",
            Self::Internal => "internal",
        };
        write!(f, "{label}")
    }
}

// Render a key for error messages, capped at MAX_ERROR_ID_LEN characters.
fn render_key(key: &impl Debug) -> String {
    let rendered = format!("{key:?}");
    if rendered.chars().count() <= MAX_ERROR_ID_LEN {
        return rendered;
    }

    let mut truncated: String = rendered.chars().take(MAX_ERROR_ID_LEN).collect();
    truncated.push('…');
    truncated
}

///
/// TESTS
///
