// Copyright 2025 the Kiln Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property errors.

use alloc::string::String;
use core::fmt;

use kiln_task::TaskId;

use crate::display::DisplayName;

/// Errors raised by [`Property`](crate::Property) operations.
///
/// Every variant carries the display name of the property it was raised for.
/// None of them is retried or swallowed by the property; the embedding build
/// decides whether to abort or report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PropertyError {
    /// A mutation was attempted after the value was finalized.
    Finalized {
        /// The property that was mutated.
        property: DisplayName,
    },
    /// A mutation was attempted after changes were disallowed, but before the
    /// value was finalized.
    ChangesDisallowed {
        /// The property that was mutated.
        property: DisplayName,
    },
    /// A second, different producer task was attached.
    AmbiguousProducer {
        /// The property the producer was attached to.
        property: DisplayName,
        /// The producer that was already attached.
        existing: TaskId,
        /// The producer that was rejected.
        rejected: TaskId,
    },
    /// The host vetoed a read.
    UnsafeRead {
        /// The property that was read.
        property: DisplayName,
        /// Why the host considers the read unsafe.
        reason: String,
    },
    /// The value was required but the property has none.
    MissingValue {
        /// The property that was read.
        property: DisplayName,
    },
}

impl PropertyError {
    /// Returns the display name of the property this error was raised for.
    #[must_use]
    pub fn property(&self) -> &DisplayName {
        match self {
            Self::Finalized { property }
            | Self::ChangesDisallowed { property }
            | Self::AmbiguousProducer { property, .. }
            | Self::UnsafeRead { property, .. }
            | Self::MissingValue { property } => property,
        }
    }
}

impl fmt::Display for PropertyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finalized { property } => write!(
                f,
                "The value for {property} is final and cannot be changed any further."
            ),
            Self::ChangesDisallowed { property } => {
                write!(f, "The value for {property} cannot be changed any further.")
            }
            Self::AmbiguousProducer { property, .. } => write!(
                f,
                "{} already has a producer task associated with it.",
                property.capitalized()
            ),
            Self::UnsafeRead { property, reason } => {
                write!(f, "Cannot query the value of {property} because {reason}.")
            }
            Self::MissingValue { property } => write!(
                f,
                "Cannot query the value of {property} because it has no value available."
            ),
        }
    }
}

impl core::error::Error for PropertyError {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn messages_name_the_property() {
        let property = DisplayName::new("property 'out'");

        let finalized = PropertyError::Finalized {
            property: property.clone(),
        };
        assert_eq!(
            finalized.to_string(),
            "The value for property 'out' is final and cannot be changed any further."
        );

        let disallowed = PropertyError::ChangesDisallowed {
            property: property.clone(),
        };
        assert_eq!(
            disallowed.to_string(),
            "The value for property 'out' cannot be changed any further."
        );

        let unsafe_read = PropertyError::UnsafeRead {
            property: property.clone(),
            reason: "task ':a' has not completed yet".to_string(),
        };
        assert_eq!(
            unsafe_read.to_string(),
            "Cannot query the value of property 'out' because task ':a' has not completed yet."
        );

        let missing = PropertyError::MissingValue { property };
        assert_eq!(
            missing.to_string(),
            "Cannot query the value of property 'out' because it has no value available."
        );
    }

    #[test]
    fn ambiguous_producer_starts_capitalized() {
        let err = PropertyError::AmbiguousProducer {
            property: DisplayName::THIS_PROPERTY,
            existing: TaskId::new(1),
            rejected: TaskId::new(2),
        };
        assert_eq!(
            err.to_string(),
            "This property already has a producer task associated with it."
        );
        assert_eq!(err.property(), &DisplayName::THIS_PROPERTY);
    }
}
