use bmwire::prelude::*;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

const GENESIS_STR: &str = "14a0810ac680a3eb3f82edc878cea25ec41d6b790744e5daeef";

const BLOCK_BYTES: [u8; DIGEST_SIZE] = [
    0x79, 0xa6, 0x1a, 0xdb, 0xc6, 0xe5, 0xa2, 0xe1, 0x39, 0xd2, 0x71, 0x3a, 0x54, 0x6e, 0xc7, 0xc8,
    0x75, 0x63, 0x2e, 0x75, 0xf1, 0xdf, 0x9c, 0x3f, 0xa6, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

#[test]
fn digest_lifecycle() {
    init_tracing();

    let from_str = Digest::from_hex_str(GENESIS_STR).expect("valid digest string");
    let mut digest = Digest::from_slice(&BLOCK_BYTES).expect("valid digest bytes");

    assert_eq!(digest.as_bytes().len(), Digest::size());
    assert_eq!(digest.as_bytes(), &BLOCK_BYTES);
    assert!(!digest.is_equal(Some(&from_str)));

    digest
        .set_bytes(&from_str.to_bytes())
        .expect("replacement is a full digest");
    assert!(digest.is_equal(Some(&from_str)));

    assert!(digest.set_bytes(&[0x00]).is_err());
    assert!(digest.is_equal(Some(&from_str)));

    let oversized = [0u8; DIGEST_SIZE + 1];
    assert!(matches!(
        Digest::from_slice(&oversized),
        Err(DigestError::SizeMismatch {
            actual: 33,
            expected: DIGEST_SIZE
        })
    ));
}

#[test]
fn short_strings_keep_their_canonical_form() {
    init_tracing();

    let digest: Digest = GENESIS_STR.parse().expect("valid digest string");
    let canonical = digest.to_string();

    assert_eq!(canonical.len(), MAX_DIGEST_STRING_SIZE);
    assert!(canonical.ends_with(GENESIS_STR));
    assert!(canonical[..MAX_DIGEST_STRING_SIZE - GENESIS_STR.len()]
        .chars()
        .all(|c| c == '0'));

    assert_eq!(canonical.parse::<Digest>().expect("canonical form parses"), digest);
}

fn parse_pair(first: &str, second: &str) -> WireResult<(Digest, Digest)> {
    let first = Digest::from_hex_str(first)?;
    let second = second.parse::<Digest>()?;
    Ok((first, second))
}

#[test]
fn digest_errors_convert_to_wire_errors() {
    init_tracing();

    let (genesis, zero) = parse_pair(GENESIS_STR, "").expect("both strings are valid");
    assert_eq!(genesis.to_string().parse::<Digest>(), Ok(genesis));
    assert_eq!(zero, Digest::ZERO);

    let err = parse_pair("abcdefg", GENESIS_STR).unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid character 'g' at position 6 in digest string"
    );

    let too_long = "0".repeat(MAX_DIGEST_STRING_SIZE + 1);
    let err = parse_pair(GENESIS_STR, &too_long).unwrap_err();
    assert_eq!(
        err.to_string(),
        "digest string is 65 characters long, at most 64 are allowed"
    );
}

#[test]
fn digests_are_shareable_values() {
    fn assert_send_sync<T: Send + Sync + Copy + 'static>() {}
    assert_send_sync::<Digest>();

    let digest = Digest::from(BLOCK_BYTES);
    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(move || digest.to_string()))
        .collect();

    for handle in handles {
        assert_eq!(
            handle.join().expect("formatting thread finished"),
            "00000000000001a63f9cdff1752e6375c8c76e543a71d239e1a2e5c6db1aa679"
        );
    }
}
