//! Private and public key tweak test vectors

use hex_literal::hex;

/// Private key tweak test vector.
///
/// Public keys are given as affine `(x, y)` coordinates.
#[derive(Debug)]
pub struct TweakTestVector {
    /// Private key
    pub key: [u8; 32],

    /// Tweak
    pub tweak: [u8; 32],

    /// `key + tweak mod n`
    pub added: [u8; 32],

    /// `key * tweak mod n`
    pub multiplied: [u8; 32],

    /// `key * G`
    pub public: ([u8; 32], [u8; 32]),

    /// `key * G + tweak * G`
    pub public_added: ([u8; 32], [u8; 32]),

    /// `tweak * (key * G)`
    pub public_multiplied: ([u8; 32], [u8; 32]),
}

/// Tweak test vectors
pub const TWEAK_TEST_VECTORS: &[TweakTestVector] = &[
    TweakTestVector {
        key: hex!("e9a06e539d6bf5cf1ca5c41b59121fa3df07a338322405a312c67b6349a707e9"),
        tweak: hex!("3e62c29e83bd6fa2a1c1e1d8f4bd3a90e6a26d3f7e9f2b1d2a0fa13a9bfa9cf1"),
        added: hex!("280330f221296571be67a5f44dcf5a360afb3391017a90847d03be11156b6399"),
        multiplied: hex!("d905377d91d05ff89b3a27f7f70935ab2e74605a29ea7f16367dca1e1534d00d"),
        public: (
            hex!("ccf11bcd4544550568d30921c1cc644646108971b155ce18082a42c116144997"),
            hex!("4d2bb0ea650ffb1e01c2244dd38820c35ea25144b52bf726517014ab32be6a43"),
        ),
        public_added: (
            hex!("129c3ea961bbf9c8c41deb2b6607e964e0193ad7275523e9a0eb457266b3899c"),
            hex!("5b389239522b8cd81a6c584c996060a7b4bc0aec5ef72d128b82be727b81a4e3"),
        ),
        public_multiplied: (
            hex!("4ae9c681ef87776fc47014192a6fb4c5348d12c41c6598eba9d93cc65f38d013"),
            hex!("e0c10767c2d856df1e412713805788e111ce87a05b7d06515d399cb72ec8118a"),
        ),
    },
    TweakTestVector {
        key: hex!("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364140"),
        tweak: hex!("0000000000000000000000000000000000000000000000000000000000000002"),
        added: hex!("0000000000000000000000000000000000000000000000000000000000000001"),
        multiplied: hex!("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd036413f"),
        public: (
            hex!("79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"),
            hex!("b7c52588d95c3b9aa25b0403f1eef75702e84bb7597aabe663b82f6f04ef2777"),
        ),
        public_added: (
            hex!("79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"),
            hex!("483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8"),
        ),
        public_multiplied: (
            hex!("c6047f9441ed7d6d3045406e95c07cd85c778e4b8cef3ca7abac09b95c709ee5"),
            hex!("e51e970159c23cc65c3a7be6b99315110809cd9acd992f1edc9bce55af301705"),
        ),
    },
    TweakTestVector {
        key: hex!("0000000000000000000000000000000000000000000000000000000000000001"),
        tweak: hex!("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd036413f"),
        added: hex!("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364140"),
        multiplied: hex!("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd036413f"),
        public: (
            hex!("79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"),
            hex!("483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8"),
        ),
        public_added: (
            hex!("79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"),
            hex!("b7c52588d95c3b9aa25b0403f1eef75702e84bb7597aabe663b82f6f04ef2777"),
        ),
        public_multiplied: (
            hex!("c6047f9441ed7d6d3045406e95c07cd85c778e4b8cef3ca7abac09b95c709ee5"),
            hex!("e51e970159c23cc65c3a7be6b99315110809cd9acd992f1edc9bce55af301705"),
        ),
    },
    TweakTestVector {
        key: hex!("c90fdaa22168c234c4c6628b80dc1cd129024e088a67cc74020bbea63b14e5c9"),
        tweak: hex!("0000000000000000000000000000000000000000000000000000000000000001"),
        added: hex!("c90fdaa22168c234c4c6628b80dc1cd129024e088a67cc74020bbea63b14e5ca"),
        multiplied: hex!("c90fdaa22168c234c4c6628b80dc1cd129024e088a67cc74020bbea63b14e5c9"),
        public: (
            hex!("dd308afec5777e13121fa72b9cc1b7cc0139715309b086c960e18fd969774eb8"),
            hex!("f594bb5f72b37faae396a4259ea64ed5e6fdeb2a51c6467582b275925fab1394"),
        ),
        public_added: (
            hex!("6726c0e1c9feee7c410e41224ed4366e80254c75c9fa3f10a7775fa60060e579"),
            hex!("631a8d9ac22a4a583ae91f460b138a71192c4e1a11cc8cba0dea22717f6f0574"),
        ),
        public_multiplied: (
            hex!("dd308afec5777e13121fa72b9cc1b7cc0139715309b086c960e18fd969774eb8"),
            hex!("f594bb5f72b37faae396a4259ea64ed5e6fdeb2a51c6467582b275925fab1394"),
        ),
    },
];

/// 32-byte private key used by the size and range checks.
pub const PRIVATE_KEY: [u8; 32] =
    hex!("e9a06e539d6bf5cf1ca5c41b59121fa3df07a338322405a312c67b6349a707e9");

/// [`PRIVATE_KEY`] with a trailing zero byte.
pub const PRIVATE_KEY_33: [u8; 33] =
    hex!("e9a06e539d6bf5cf1ca5c41b59121fa3df07a338322405a312c67b6349a707e900");

/// Group order `n`.
pub const ORDER: [u8; 32] =
    hex!("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141");

/// `n + 5`: a tweak which is not a canonical scalar.
pub const OVERFLOW_TWEAK: [u8; 32] =
    hex!("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364146");

/// `PRIVATE_KEY + OVERFLOW_TWEAK mod n`
pub const OVERFLOW_TWEAK_ADDED: [u8; 32] =
    hex!("e9a06e539d6bf5cf1ca5c41b59121fa3df07a338322405a312c67b6349a707ee");

/// `PRIVATE_KEY * OVERFLOW_TWEAK mod n`
pub const OVERFLOW_TWEAK_MULTIPLIED: [u8; 32] =
    hex!("902227a2131bcd0b8f3cd488bd5a9e38706abc7e3d919b405e96eebd2f6a2289");

/// `n - PRIVATE_KEY`
pub const PRIVATE_KEY_NEGATED: [u8; 32] =
    hex!("165f91ac62940a30e35a3be4a6ede05adba739ae7d249a98ad0be329868f3958");
