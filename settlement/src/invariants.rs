//! Predicates every settlement result must satisfy.
//!
//! Pure boolean checks over inputs and outputs, for tests, property tests
//! and callers that want to assert a result before acting on it.

use exit_format_types::{Amount, SingleAssetExit};

/// Per asset, what left the holdings is exactly what the exit pays.
///
/// Returns `false` if the three inputs disagree on the number of assets or
/// if any asset's holdings grew.
pub fn conservation_holds(
    holdings_before: &[Amount],
    holdings_after: &[Amount],
    exit: &[SingleAssetExit],
) -> bool {
    if holdings_before.len() != holdings_after.len() || holdings_before.len() != exit.len() {
        return false;
    }
    holdings_before
        .iter()
        .zip(holdings_after)
        .zip(exit)
        .all(|((before, after), single_asset)| {
            before
                .checked_sub(*after)
                .is_some_and(|released| released == single_asset.total())
        })
}

/// No allocation amount grew and the tables kept their shape.
pub fn amounts_never_increase(before: &[SingleAssetExit], after: &[SingleAssetExit]) -> bool {
    before.len() == after.len()
        && before.iter().zip(after).all(|(b, a)| {
            b.asset == a.asset
                && b.allocations.len() == a.allocations.len()
                && b.allocations
                    .iter()
                    .zip(&a.allocations)
                    .all(|(x, y)| x.destination == y.destination && y.amount <= x.amount)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use exit_format_types::{Address, Allocation, Bytes, Destination};

    fn single(amounts: &[u64]) -> SingleAssetExit {
        SingleAssetExit::new(
            Address::ZERO,
            Bytes::new(),
            amounts
                .iter()
                .map(|a| Allocation::simple(Destination::new([7; 32]), Amount::from(*a)))
                .collect(),
        )
    }

    #[test]
    fn conservation_counts_every_exit_entry() {
        let before = [Amount::from(10u64)];
        assert!(conservation_holds(&before, &[Amount::from(4u64)], &[single(&[5, 1])]));
        assert!(!conservation_holds(&before, &[Amount::from(5u64)], &[single(&[5, 1])]));
    }

    #[test]
    fn conservation_rejects_growing_holdings() {
        assert!(!conservation_holds(
            &[Amount::from(1u64)],
            &[Amount::from(2u64)],
            &[single(&[])]
        ));
    }

    #[test]
    fn conservation_rejects_shape_mismatch() {
        assert!(!conservation_holds(&[Amount::ZERO], &[], &[]));
    }

    #[test]
    fn amounts_may_only_shrink() {
        assert!(amounts_never_increase(&[single(&[5, 5])], &[single(&[0, 5])]));
        assert!(!amounts_never_increase(&[single(&[5, 5])], &[single(&[6, 5])]));
        assert!(!amounts_never_increase(&[single(&[5, 5])], &[single(&[5])]));
    }
}
