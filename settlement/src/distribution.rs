//! The allocation distributor.
//!
//! Given a pool of funds for one asset, walk the allocation table in
//! priority order. Each entry can afford `min(amount, surplus)`, and that
//! much leaves the surplus whether or not the entry was selected for payout,
//! so an unselected higher-priority entry still shields its funds from
//! selected entries further down.

use exit_format_types::{Allocation, AllocationType, Amount, ExitSelector};

use crate::SettlementError;

/// Result of running the distributor over one asset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Distribution {
    /// Same length and order as the input table, with paid amounts removed.
    pub new_allocations: Vec<Allocation>,
    /// Whether every entry of `new_allocations` is now zero.
    pub allocates_only_zeros: bool,
    /// One slot per requested index (or per allocation when selecting all),
    /// in request order. A requested index that was never reached pays zero.
    pub payouts: Vec<Amount>,
    pub total_payout: Amount,
}

/// Distribute `pool` over `allocations`, paying the entries `selector` picks.
///
/// Fails with [`SettlementError::CannotTransferGuarantee`] if a selected
/// entry is a guarantee.
pub fn compute_new_allocations(
    pool: Amount,
    allocations: &[Allocation],
    selector: &ExitSelector,
) -> Result<Distribution, SettlementError> {
    let mut payouts = vec![Amount::ZERO; selector.payout_slots(allocations.len())];
    let mut total_payout = Amount::ZERO;
    let mut new_allocations = Vec::with_capacity(allocations.len());
    let mut allocates_only_zeros = true;
    let mut surplus = pool;
    let mut cursor = selector.cursor();

    for (index, allocation) in allocations.iter().enumerate() {
        let affords = allocation.amount.min(surplus);
        let mut updated = allocation.clone();

        if cursor.selects(index) {
            if allocation.allocation_type == AllocationType::Guarantee {
                return Err(SettlementError::CannotTransferGuarantee { index });
            }
            updated.amount = allocation.amount.saturating_sub(affords);
            payouts[cursor.position()] = affords;
            total_payout = total_payout + affords;
            cursor.advance();
            tracing::trace!(index, paid = %affords, "allocation paid");
        }

        if !updated.amount.is_zero() {
            allocates_only_zeros = false;
        }
        surplus = surplus.saturating_sub(affords);
        new_allocations.push(updated);
    }

    Ok(Distribution {
        new_allocations,
        allocates_only_zeros,
        payouts,
        total_payout,
    })
}

/// Turn distributor payouts into the allocations of an exit.
///
/// One entry per selected allocation, carrying the original destination,
/// type and metadata. Requested indices beyond the table produce nothing.
pub fn payouts_to_exit_allocations(
    allocations: &[Allocation],
    payouts: &[Amount],
    selector: &ExitSelector,
) -> Vec<Allocation> {
    let mut exit_allocations = Vec::with_capacity(payouts.len());
    let mut cursor = selector.cursor();
    for (index, allocation) in allocations.iter().enumerate() {
        if cursor.is_exhausted() {
            break;
        }
        if !cursor.selects(index) {
            continue;
        }
        let paid = payouts.get(cursor.position()).copied().unwrap_or(Amount::ZERO);
        exit_allocations.push(allocation.with_amount(paid));
        cursor.advance();
    }
    exit_allocations
}

#[cfg(test)]
mod tests {
    use super::*;
    use exit_format_types::{Bytes, Destination};

    fn amt(v: u64) -> Amount {
        Amount::from(v)
    }

    fn table(amounts: &[u64]) -> Vec<Allocation> {
        amounts
            .iter()
            .enumerate()
            .map(|(i, a)| Allocation::simple(Destination::new([i as u8 + 1; 32]), amt(*a)))
            .collect()
    }

    fn amounts(allocations: &[Allocation]) -> Vec<Amount> {
        allocations.iter().map(|a| a.amount).collect()
    }

    fn specific(indices: &[usize]) -> ExitSelector {
        ExitSelector::from_indices(indices.to_vec()).unwrap()
    }

    #[test]
    fn earlier_entries_are_paid_first() {
        let allocations = table(&[5, 5]);
        let result = compute_new_allocations(amt(6), &allocations, &ExitSelector::All).unwrap();

        assert_eq!(result.payouts, vec![amt(5), amt(1)]);
        assert_eq!(result.total_payout, amt(6));
        assert_eq!(amounts(&result.new_allocations), vec![amt(0), amt(4)]);
        assert!(!result.allocates_only_zeros);
    }

    #[test]
    fn unselected_entry_still_reserves_its_share() {
        let allocations = table(&[5, 5]);
        let result = compute_new_allocations(amt(6), &allocations, &specific(&[1])).unwrap();

        assert_eq!(result.payouts, vec![amt(1)]);
        assert_eq!(result.total_payout, amt(1));
        assert_eq!(amounts(&result.new_allocations), vec![amt(5), amt(4)]);
    }

    #[test]
    fn surplus_pays_everyone_and_zeroes_the_table() {
        let allocations = table(&[5, 5, 10]);
        let result = compute_new_allocations(amt(1000), &allocations, &ExitSelector::All).unwrap();

        assert_eq!(result.total_payout, amt(20));
        assert!(result.allocates_only_zeros);
    }

    #[test]
    fn empty_pool_pays_nothing() {
        let allocations = table(&[5, 5]);
        let result = compute_new_allocations(Amount::ZERO, &allocations, &ExitSelector::All).unwrap();

        assert_eq!(result.payouts, vec![Amount::ZERO, Amount::ZERO]);
        assert_eq!(result.new_allocations, allocations);
    }

    #[test]
    fn unreached_request_index_pays_zero() {
        let allocations = table(&[5]);
        let selector = specific(&[0, 4]);
        let result = compute_new_allocations(amt(10), &allocations, &selector).unwrap();

        assert_eq!(result.payouts, vec![amt(5), Amount::ZERO]);
        let exit = payouts_to_exit_allocations(&allocations, &result.payouts, &selector);
        assert_eq!(exit.len(), 1);
        assert_eq!(exit[0].amount, amt(5));
    }

    #[test]
    fn selecting_a_guarantee_fails() {
        let mut allocations = table(&[5, 5]);
        allocations[1] = Allocation::guarantee(allocations[1].destination, amt(5), Bytes::new());

        assert_eq!(
            compute_new_allocations(amt(6), &allocations, &ExitSelector::All),
            Err(SettlementError::CannotTransferGuarantee { index: 1 })
        );
        // An unselected guarantee still takes its place in the queue.
        let result = compute_new_allocations(amt(6), &allocations, &specific(&[0])).unwrap();
        assert_eq!(result.payouts, vec![amt(5)]);
    }

    #[test]
    fn exit_allocations_follow_selection_order() {
        let allocations = table(&[2, 3, 4]);
        let selector = specific(&[0, 2]);
        let result = compute_new_allocations(amt(100), &allocations, &selector).unwrap();
        let exit = payouts_to_exit_allocations(&allocations, &result.payouts, &selector);

        assert_eq!(exit.len(), 2);
        assert_eq!(exit[0].destination, allocations[0].destination);
        assert_eq!(exit[0].amount, amt(2));
        assert_eq!(exit[1].destination, allocations[2].destination);
        assert_eq!(exit[1].amount, amt(4));
    }
}
