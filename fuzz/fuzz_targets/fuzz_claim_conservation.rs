#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use exit_format_codec::encode_guarantee_data;
use exit_format_settlement::invariants::{amounts_never_increase, conservation_holds};
use exit_format_settlement::{claim_with_indexing, ClaimIndexing};
use exit_format_types::{
    Address, Allocation, Amount, Bytes, Destination, ExitRequest, ExitSelector, SingleAssetExit,
};

#[derive(Debug, Arbitrary)]
struct Input {
    holdings: u64,
    earlier_guarantees: Vec<u64>,
    guarantee_amount: u64,
    destinations: Vec<u8>,
    target: Vec<(u8, u64)>,
    requested: Vec<u8>,
    by_destination: bool,
}

fn dest(n: u8) -> Destination {
    // A handful of distinct destinations so matches are common.
    Destination::new([n % 8; 32])
}

fuzz_target!(|input: Input| {
    let destinations: Vec<Destination> = input.destinations.iter().take(32).map(|d| dest(*d)).collect();
    let mut guarantor: Vec<Allocation> = input
        .earlier_guarantees
        .iter()
        .take(8)
        .map(|a| Allocation::guarantee(dest(0xff), Amount::from(*a), encode_guarantee_data(&[])))
        .collect();
    let target_index = guarantor.len();
    guarantor.push(Allocation::guarantee(
        dest(0xfe),
        Amount::from(input.guarantee_amount),
        encode_guarantee_data(&destinations),
    ));

    let guarantees = vec![SingleAssetExit::new(Address::ZERO, Bytes::new(), guarantor)];
    let target = vec![SingleAssetExit::new(
        Address::ZERO,
        Bytes::new(),
        input
            .target
            .iter()
            .take(32)
            .map(|(d, a)| Allocation::simple(dest(*d), Amount::from(*a)))
            .collect(),
    )];
    let holdings = vec![Amount::from(input.holdings)];

    let mut indices: Vec<usize> = input.requested.iter().map(|i| *i as usize % 40).collect();
    indices.sort_unstable();
    indices.dedup();
    let Ok(selector) = ExitSelector::from_indices(indices) else {
        return;
    };
    let indexing = if input.by_destination {
        ClaimIndexing::GuaranteeDestination
    } else {
        ClaimIndexing::TargetAllocation
    };

    let result = claim_with_indexing(
        &guarantees,
        &holdings,
        target_index,
        &target,
        &ExitRequest::new(vec![selector]),
        indexing,
    )
    .expect("well-formed claim must succeed");

    assert!(conservation_holds(&holdings, &result.updated_holdings, &result.exit));
    assert!(amounts_never_increase(&target, &result.updated_target_outcome));
    assert!(amounts_never_increase(&guarantees, &result.updated_guarantee_outcome));
});
