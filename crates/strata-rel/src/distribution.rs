//! Row distribution across storage buckets.

use serde::{Deserialize, Serialize};

use strata_core::error::{Error, Result};

use crate::transform::Transform;

/// How rows are assigned to buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistributionStrategy {
    /// No distribution.
    #[default]
    None,
    /// Rows are spread evenly across buckets.
    Even,
    /// Rows are hashed into buckets by the distribution keys.
    Hash,
}

/// A table's row-distribution layout, or the sentinel "none".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Distribution {
    /// The bucketing strategy.
    pub strategy: DistributionStrategy,
    /// Number of buckets.
    pub number: u32,
    /// The distribution keys, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transforms: Vec<Transform>,
}

impl Distribution {
    /// The "no distribution" sentinel.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Returns true when this is the "no distribution" sentinel.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self.strategy, DistributionStrategy::None)
    }

    /// Creates a new builder for constructing distributions.
    #[must_use]
    pub fn builder() -> DistributionBuilder {
        DistributionBuilder::default()
    }
}

/// Builder for [`Distribution`] instances.
#[derive(Debug, Default)]
pub struct DistributionBuilder {
    strategy: DistributionStrategy,
    number: u32,
    transforms: Vec<Transform>,
}

impl DistributionBuilder {
    /// Sets the bucketing strategy.
    #[must_use]
    pub fn strategy(mut self, strategy: DistributionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the number of buckets.
    #[must_use]
    pub fn number(mut self, number: u32) -> Self {
        self.number = number;
        self
    }

    /// Sets the distribution keys.
    #[must_use]
    pub fn transforms(mut self, transforms: Vec<Transform>) -> Self {
        self.transforms = transforms;
        self
    }

    /// Builds the distribution.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalArgument`] when a non-none strategy has no
    /// keys or no buckets, or the none strategy carries keys.
    pub fn try_build(self) -> Result<Distribution> {
        match self.strategy {
            DistributionStrategy::None => {
                if !self.transforms.is_empty() {
                    return Err(Error::illegal_argument(
                        "a none distribution cannot carry distribution keys",
                    ));
                }
            }
            DistributionStrategy::Even | DistributionStrategy::Hash => {
                if self.transforms.is_empty() {
                    return Err(Error::illegal_argument(
                        "distribution requires at least one key",
                    ));
                }
                if self.number == 0 {
                    return Err(Error::illegal_argument(
                        "distribution requires at least one bucket",
                    ));
                }
            }
        }
        Ok(Distribution {
            strategy: self.strategy,
            number: self.number,
            transforms: self.transforms,
        })
    }
}
