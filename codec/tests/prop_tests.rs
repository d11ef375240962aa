use proptest::prelude::*;

use exit_format_codec::{
    decode_exit, decode_guarantee_data, encode_exit, encode_guarantee_data,
};
use exit_format_types::{
    Address, Allocation, AllocationType, Amount, Bytes, Destination, SingleAssetExit,
};

fn allocation_strategy() -> impl Strategy<Value = Allocation> {
    (
        prop::array::uniform32(0u8..),
        prop::array::uniform32(0u8..),
        0u8..3,
        prop::collection::vec(any::<u8>(), 0..80),
    )
        .prop_map(|(destination, amount, kind, metadata)| Allocation {
            destination: Destination::new(destination),
            amount: Amount::from_be_bytes(amount),
            allocation_type: AllocationType::try_from(kind).unwrap(),
            metadata: Bytes::from(metadata),
        })
}

fn single_asset_exit_strategy() -> impl Strategy<Value = SingleAssetExit> {
    (
        prop::array::uniform20(0u8..),
        prop::collection::vec(any::<u8>(), 0..40),
        prop::collection::vec(allocation_strategy(), 0..5),
    )
        .prop_map(|(asset, metadata, allocations)| {
            SingleAssetExit::new(Address::from(asset), Bytes::from(metadata), allocations)
        })
}

proptest! {
    /// decode(encode(exit)) == exit, and re-encoding is byte-identical.
    #[test]
    fn exit_roundtrip(exit in prop::collection::vec(single_asset_exit_strategy(), 0..4)) {
        let encoded = encode_exit(&exit);
        prop_assert_eq!(encoded.len() % 32, 0);
        let decoded = decode_exit(&encoded).unwrap();
        prop_assert_eq!(&decoded, &exit);
        prop_assert_eq!(encode_exit(&decoded), encoded);
    }

    /// Guarantee destination lists keep their order through the codec.
    #[test]
    fn guarantee_data_roundtrip(words in prop::collection::vec(prop::array::uniform32(0u8..), 0..10)) {
        let destinations: Vec<Destination> = words.into_iter().map(Destination::new).collect();
        let encoded = encode_guarantee_data(&destinations);
        prop_assert_eq!(decode_guarantee_data(&encoded).unwrap(), destinations);
    }

    /// Decoding arbitrary bytes returns an error or a value; it never panics.
    #[test]
    fn decode_arbitrary_bytes(data in prop::collection::vec(any::<u8>(), 0..512)) {
        let _ = decode_exit(&data);
        let _ = decode_guarantee_data(&data);
    }
}
