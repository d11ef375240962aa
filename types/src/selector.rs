//! Exit requests: which allocations the caller wants paid out now.
//!
//! A request holds one [`ExitSelector`] per asset. The serialised shape is
//! the historical one (a list of index lists where an empty list means
//! "all"), but in memory the two cases are distinct variants.

use serde::{Deserialize, Serialize};

use crate::error::TypesError;

/// Which allocations of a single asset to pay out.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub enum ExitSelector {
    /// Pay every allocation, in order.
    #[default]
    All,
    /// Pay only these indices. Never empty, strictly increasing.
    Specific(Vec<usize>),
}

impl ExitSelector {
    /// Build a selector from an index list; an empty list selects everything.
    pub fn from_indices(indices: Vec<usize>) -> Result<Self, TypesError> {
        if indices.is_empty() {
            return Ok(Self::All);
        }
        for (position, pair) in indices.windows(2).enumerate() {
            if pair[1] <= pair[0] {
                return Err(TypesError::NotStrictlyIncreasing {
                    position: position + 1,
                    previous: pair[0],
                    index: pair[1],
                });
            }
        }
        Ok(Self::Specific(indices))
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// Number of payout slots a distribution over `len` allocations reports.
    pub fn payout_slots(&self, len: usize) -> usize {
        match self {
            Self::All => len,
            Self::Specific(indices) => indices.len(),
        }
    }

    pub fn cursor(&self) -> SelectionCursor<'_> {
        SelectionCursor {
            selector: self,
            position: 0,
        }
    }
}

impl TryFrom<Vec<usize>> for ExitSelector {
    type Error = TypesError;

    fn try_from(indices: Vec<usize>) -> Result<Self, Self::Error> {
        Self::from_indices(indices)
    }
}

impl From<ExitSelector> for Vec<usize> {
    fn from(selector: ExitSelector) -> Self {
        match selector {
            ExitSelector::All => Vec::new(),
            ExitSelector::Specific(indices) => indices,
        }
    }
}

/// Walks a selector alongside an allocation scan.
///
/// `position` counts how many selections have been made; for
/// [`ExitSelector::Specific`] it is also the index into the request list.
#[derive(Clone, Debug)]
pub struct SelectionCursor<'a> {
    selector: &'a ExitSelector,
    position: usize,
}

impl SelectionCursor<'_> {
    /// Whether `index` is the next index the selector wants paid.
    pub fn selects(&self, index: usize) -> bool {
        match self.selector {
            ExitSelector::All => true,
            ExitSelector::Specific(indices) => indices.get(self.position) == Some(&index),
        }
    }

    /// Record a selection and move on to the next requested index.
    pub fn advance(&mut self) {
        self.position += 1;
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Whether every requested index has been consumed.
    pub fn is_exhausted(&self) -> bool {
        match self.selector {
            ExitSelector::All => false,
            ExitSelector::Specific(indices) => self.position >= indices.len(),
        }
    }
}

/// Per-asset exit selectors.
///
/// An empty request selects everything for every asset; otherwise there is
/// exactly one selector per asset.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExitRequest(Vec<ExitSelector>);

static SELECT_ALL: ExitSelector = ExitSelector::All;

impl ExitRequest {
    /// Pay out everything for every asset.
    pub fn all() -> Self {
        Self(Vec::new())
    }

    pub fn new(selectors: Vec<ExitSelector>) -> Self {
        Self(selectors)
    }

    /// Build a request from raw per-asset index lists.
    pub fn from_indices(indices: Vec<Vec<usize>>) -> Result<Self, TypesError> {
        indices
            .into_iter()
            .map(ExitSelector::from_indices)
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    /// True when no per-asset selectors were given.
    pub fn is_all_assets(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Selector for `asset_index`; [`ExitSelector::All`] when the request is
    /// empty or shorter than the asset list.
    pub fn selector(&self, asset_index: usize) -> &ExitSelector {
        self.0.get(asset_index).unwrap_or(&SELECT_ALL)
    }
}

impl From<Vec<ExitSelector>> for ExitRequest {
    fn from(selectors: Vec<ExitSelector>) -> Self {
        Self(selectors)
    }
}
