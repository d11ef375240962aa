#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use exit_format_settlement::invariants::{amounts_never_increase, conservation_holds};
use exit_format_settlement::transfer;
use exit_format_types::{
    Address, Allocation, Amount, Bytes, Destination, ExitRequest, ExitSelector, SingleAssetExit,
};

#[derive(Debug, Arbitrary)]
struct Input {
    holdings: u64,
    allocations: Vec<(u8, u64)>,
    requested: Vec<u8>,
}

// Transfers over arbitrary tables and requests either fail cleanly or
// conserve value.
fuzz_target!(|input: Input| {
    let allocations = input
        .allocations
        .iter()
        .take(64)
        .map(|(d, a)| Allocation::simple(Destination::new([*d; 32]), Amount::from(*a)))
        .collect();
    let outcome = vec![SingleAssetExit::new(Address::ZERO, Bytes::new(), allocations)];
    let holdings = vec![Amount::from(input.holdings)];

    let mut indices: Vec<usize> = input.requested.iter().map(|i| *i as usize).collect();
    indices.sort_unstable();
    indices.dedup();
    let Ok(selector) = ExitSelector::from_indices(indices) else {
        return;
    };

    if let Ok(result) = transfer(&outcome, &holdings, &ExitRequest::new(vec![selector])) {
        assert!(conservation_holds(&holdings, &result.updated_holdings, &result.exit));
        assert!(amounts_never_increase(&outcome, &result.updated_outcome));
    }
});
