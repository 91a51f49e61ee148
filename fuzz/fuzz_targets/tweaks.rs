#![no_main]

use libfuzzer_sys::fuzz_target;
use secp256k1_tweak::{Capabilities, Context, Error};
use std::sync::LazyLock;

static CONTEXT: LazyLock<Context> =
    LazyLock::new(|| Context::new(Capabilities::SIGN | Capabilities::VERIFY).unwrap());

fuzz_target!(|data: &[u8]| {
    // First byte picks the key length, the rest is split into key and tweak.
    let Some((&key_len, rest)) = data.split_first() else {
        return;
    };
    let key_len = usize::from(key_len).min(rest.len());
    let (key, tweak) = rest.split_at(key_len);

    let mut added = key.to_vec();
    let add = CONTEXT.tweak_add_private_key(&mut added, tweak);

    let mut multiplied = key.to_vec();
    let mul = CONTEXT.tweak_mul_private_key(&mut multiplied, tweak);

    for (res, buf) in [(add, &added), (mul, &multiplied)] {
        match res {
            Ok(()) => assert!(CONTEXT.validate_private_key(buf)),
            Err(Error::PrivateKeySize) => {
                assert_ne!(key.len(), 32);
                assert_eq!(buf.as_slice(), key);
            }
            Err(Error::TweakSize) => {
                assert_eq!(key.len(), 32);
                assert_ne!(tweak.len(), 32);
                assert_eq!(buf.as_slice(), key);
            }
            Err(Error::InvalidPrivateKey) => {
                assert!(!CONTEXT.validate_private_key(key));
                assert_eq!(buf.as_slice(), &[0; 32]);
            }
            Err(Error::TweakResultInvalid) => assert_eq!(buf.as_slice(), &[0; 32]),
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    if let Ok(()) = add {
        let mut pk = CONTEXT.create_public_key(key).unwrap();
        CONTEXT.tweak_add_public_key(&mut pk, tweak).unwrap();
        assert_eq!(CONTEXT.create_public_key(&added).unwrap(), pk);
    }
});
