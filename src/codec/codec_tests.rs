use super::decoder::decode_counted;
use super::*;
use crate::config::CoderConfig;
use crate::error::HuffmanError;
use crate::kernels::code_table::code_to_string;
use crate::types::{Alphabet, Symbol};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const A: Symbol = 0;
const B: Symbol = 1;
const C: Symbol = 2;

fn roundtrip(symbols: &[Symbol], config: &CoderConfig) -> Vec<Symbol> {
    let container = encode(symbols, config).unwrap();
    let bytes = container.to_bytes().unwrap();
    let restored = Container::from_bytes(&bytes).unwrap();
    decode(&restored).unwrap()
}

//==================================================================================
// Concrete scenarios
//==================================================================================

#[test]
fn test_weighted_three_symbol_scenario() {
    let input = vec![A, A, A, B, B, C];
    let container = encode(&input, &CoderConfig::with_alphabet(Alphabet::Custom(3))).unwrap();

    let table = &container.code_table;
    assert_eq!(code_to_string(table.get(A).unwrap()), "0");
    assert_eq!(code_to_string(table.get(C).unwrap()), "10");
    assert_eq!(code_to_string(table.get(B).unwrap()), "11");

    let (la, lb, lc) = (
        table.code_length(A).unwrap(),
        table.code_length(B).unwrap(),
        table.code_length(C).unwrap(),
    );
    assert!(la <= lb && lb <= lc);
    assert_eq!(container.payload_bits, (3 * la + 2 * lb + lc) as u64);
    // 0 0 0 11 11 10 -> 0001_1111 0(000_0000)
    assert_eq!(container.payload, vec![0b0001_1111, 0b0000_0000]);

    assert_eq!(decode(&container).unwrap(), input);
}

#[test]
fn test_single_symbol_scenario() {
    let x: Symbol = 200;
    let container = encode(&[x], &CoderConfig::bytes()).unwrap();
    assert_eq!(container.code_table.len(), 1);
    assert_eq!(container.code_table.code_length(x), Some(1));
    assert_eq!(container.payload_bits, 1);
    assert_eq!(decode(&container).unwrap(), vec![x]);
}

#[test]
fn test_single_distinct_symbol_costs_one_bit_each() {
    let input = vec![9u32; 1000];
    let container = encode(&input, &CoderConfig::bytes()).unwrap();
    assert_eq!(container.payload_bits, 1000);
    assert_eq!(container.payload.len(), 125);
    assert_eq!(container.code_table.len(), 1);
    assert_eq!(roundtrip(&input, &CoderConfig::bytes()), input);
}

#[test]
fn test_empty_input_scenario() {
    let container = encode(&[], &CoderConfig::bytes()).unwrap();
    assert_eq!(container.symbol_count, 0);
    assert!(container.code_table.is_empty());
    assert!(container.payload.is_empty());
    assert_eq!(container.payload_bits, 0);
    assert!(decode(&container).unwrap().is_empty());
    assert!(roundtrip(&[], &CoderConfig::bytes()).is_empty());
}

#[test]
fn test_truncated_stream_scenario() {
    let mut container =
        encode(&[A, B, C], &CoderConfig::with_alphabet(Alphabet::Custom(3))).unwrap();
    container.symbol_count = 5;

    let err = decode(&container).unwrap_err();
    assert!(matches!(
        err,
        HuffmanError::TruncatedStream {
            decoded: 3,
            expected: 5
        }
    ));
}

#[test]
fn test_out_of_alphabet_symbol_scenarios() {
    // Encode side.
    let err = encode(&[1, 2, 300], &CoderConfig::bytes()).unwrap_err();
    assert!(matches!(
        err,
        HuffmanError::UnknownSymbol {
            symbol: 300,
            alphabet_size: 256
        }
    ));

    // Decode side: a serialized record whose symbol exceeds the alphabet.
    let container = encode(&[7, 7, 8], &CoderConfig::bytes()).unwrap();
    let mut bytes = container.to_bytes().unwrap();
    let first_symbol_at = format::FIXED_HEADER_SIZE;
    bytes[first_symbol_at..first_symbol_at + 4].copy_from_slice(&999u32.to_le_bytes());
    assert!(matches!(
        Container::from_bytes(&bytes),
        Err(HuffmanError::CorruptTree(_))
    ));
}

//==================================================================================
// Properties
//==================================================================================

#[test]
fn test_padding_bits_are_never_decoded() {
    // Two symbols of one bit each leave six zero padding bits, which would
    // decode as six more `A`s if the count were ignored.
    let input = vec![A, B];
    let container = encode(&input, &CoderConfig::with_alphabet(Alphabet::Custom(2))).unwrap();
    assert_eq!(container.payload_bits, 2);
    assert_eq!(container.payload.len(), 1);
    assert_eq!(decode(&container).unwrap(), input);
}

#[test]
fn test_payload_bits_equal_sum_of_code_lengths() {
    let text = b"the quick brown fox jumps over the lazy dog";
    let input: Vec<Symbol> = text.iter().map(|&b| u32::from(b)).collect();
    let container = encode(&input, &CoderConfig::bytes()).unwrap();

    let expected: u64 = input
        .iter()
        .map(|&s| container.code_table.code_length(s).unwrap() as u64)
        .sum();
    assert_eq!(container.payload_bits, expected);
    assert_eq!(container.payload.len() as u64, expected.div_ceil(8));
}

#[test]
fn test_decoder_consumes_exactly_the_encoded_bits() {
    let text = b"she sells sea shells by the sea shore";
    let input: Vec<Symbol> = text.iter().map(|&b| u32::from(b)).collect();
    let container = encode(&input, &CoderConfig::bytes()).unwrap();

    let (decoded, consumed) = decode_counted(&container).unwrap();
    assert_eq!(decoded, input);
    assert_eq!(consumed, container.payload_bits);
}

#[test]
fn test_extra_meaningful_bits_are_left_unread() {
    // [A,A,A,B,B,C] uses 9 bits; the 10th bit still fits in the second byte.
    let input = vec![A, A, A, B, B, C];
    let mut container =
        encode(&input, &CoderConfig::with_alphabet(Alphabet::Custom(3))).unwrap();
    assert_eq!(container.payload_bits, 9);
    container.payload_bits = 10;

    let (decoded, consumed) = decode_counted(&container).unwrap();
    assert_eq!(decoded, input);
    assert_eq!(consumed, 9);

    // The same holds after a trip through the byte form.
    let restored = Container::from_bytes(&container.to_bytes().unwrap()).unwrap();
    assert_eq!(decode(&restored).unwrap(), input);
}

#[test]
fn test_determinism_independent_of_input_order() {
    let first = vec![4, 1, 1, 2, 2, 3, 3, 4, 5, 5];
    let mut second = first.clone();
    second.reverse();
    let config = CoderConfig::with_alphabet(Alphabet::Custom(8));

    let a = encode(&first, &config).unwrap();
    let b = encode(&second, &config).unwrap();
    assert_eq!(a.code_table, b.code_table);

    let (mut ta, mut tb) = (Vec::new(), Vec::new());
    a.code_table.write_records(&mut ta);
    b.code_table.write_records(&mut tb);
    assert_eq!(ta, tb);
}

#[test]
fn test_decoding_needs_no_encoder_state() {
    let input: Vec<Symbol> = b"abracadabra".iter().map(|&b| u32::from(b)).collect();
    let bytes = encode(&input, &CoderConfig::bytes())
        .unwrap()
        .to_bytes()
        .unwrap();
    // Only the bytes cross this boundary.
    let decoded = decode(&Container::from_bytes(&bytes).unwrap()).unwrap();
    assert_eq!(decoded, input);
}

#[test]
fn test_randomized_roundtrips_over_several_alphabets() {
    let mut rng = StdRng::seed_from_u64(0x5EED);
    for (alphabet, spread) in [
        (Alphabet::Bytes, 256u32),
        (Alphabet::Bytes, 3),
        (Alphabet::Custom(1000), 1000),
        (Alphabet::Rgb24, 1 << 24),
    ] {
        for len in [1usize, 2, 17, 512, 4096] {
            let input: Vec<Symbol> = (0..len).map(|_| rng.random_range(0..spread)).collect();
            let config = CoderConfig::with_alphabet(alphabet);
            assert_eq!(roundtrip(&input, &config), input, "{} len {}", alphabet, len);
        }
    }
}

#[test]
fn test_skewed_distribution_compresses() {
    let mut rng = StdRng::seed_from_u64(42);
    let input: Vec<Symbol> = (0..10_000)
        .map(|_| {
            let roll: u32 = rng.random_range(0..100);
            match roll {
                0..=79 => 0,
                80..=94 => 1,
                _ => rng.random_range(2..256),
            }
        })
        .collect();
    let container = encode(&input, &CoderConfig::bytes()).unwrap();
    assert!(container.payload_bits < 8 * input.len() as u64 / 2);
    assert_eq!(decode(&container).unwrap(), input);
}

#[test]
fn test_sharded_frequency_counting_gives_identical_container() {
    let input: Vec<Symbol> = (0..5000u32).map(|i| (i * i) % 61).collect();
    let sequential = encode(&input, &CoderConfig::bytes()).unwrap();
    let sharded_config = CoderConfig {
        frequency_shards: 4,
        ..CoderConfig::bytes()
    };
    let sharded = encode(&input, &sharded_config).unwrap();
    assert_eq!(sequential, sharded);
}

//==================================================================================
// Corrupted containers
//==================================================================================

#[test]
fn test_missing_child_is_corrupt_tree() {
    let mut container = encode(&[A, A, A], &CoderConfig::bytes()).unwrap();
    // The only code is `0`; a `1` bit has nowhere to go.
    container.payload = vec![0b0100_0000];
    assert!(matches!(
        decode(&container),
        Err(HuffmanError::CorruptTree(_))
    ));
}

#[test]
fn test_nonempty_count_without_table_is_corrupt_tree() {
    let mut container = Container::empty(256);
    container.symbol_count = 4;
    assert!(matches!(
        decode(&container),
        Err(HuffmanError::CorruptTree(_))
    ));
}

#[test]
fn test_table_alphabet_disagreeing_with_container_is_format_error() {
    let mut container = encode(&[A, B, C], &CoderConfig::bytes()).unwrap();
    container.code_table = encode(&[A, B, C], &CoderConfig::with_alphabet(Alphabet::Custom(3)))
        .unwrap()
        .code_table;
    assert_eq!(container.alphabet_size, 256);
    assert_eq!(container.code_table.alphabet_size(), 3);
    assert!(matches!(
        decode(&container),
        Err(HuffmanError::ContainerFormat(_))
    ));
}

#[test]
fn test_forged_huge_count_fails_without_huge_allocation() {
    let mut container = encode(&[A, B, A, B], &CoderConfig::bytes()).unwrap();
    container.symbol_count = u64::MAX;
    assert!(matches!(
        decode(&container),
        Err(HuffmanError::TruncatedStream { decoded: 4, .. })
    ));
}

#[test]
fn test_invalid_config_is_rejected_before_counting() {
    let config = CoderConfig {
        frequency_shards: 0,
        ..CoderConfig::bytes()
    };
    assert!(matches!(
        encode(&[1, 2, 3], &config),
        Err(HuffmanError::InvalidConfig(_))
    ));
}
