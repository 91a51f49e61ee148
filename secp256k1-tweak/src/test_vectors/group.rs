//! Group operation test vectors

use hex_literal::hex;

/// Affine coordinates of `k * G` for `k` in `1..=10`
pub const ADD_TEST_VECTORS: &[([u8; 32], [u8; 32])] = &[
    (
        hex!("79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"),
        hex!("483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8"),
    ),
    (
        hex!("c6047f9441ed7d6d3045406e95c07cd85c778e4b8cef3ca7abac09b95c709ee5"),
        hex!("1ae168fea63dc339a3c58419466ceaeef7f632653266d0e1236431a950cfe52a"),
    ),
    (
        hex!("f9308a019258c31049344f85f89d5229b531c845836f99b08601f113bce036f9"),
        hex!("388f7b0f632de8140fe337e62a37f3566500a99934c2231b6cb9fd7584b8e672"),
    ),
    (
        hex!("e493dbf1c10d80f3581e4904930b1404cc6c13900ee0758474fa94abe8c4cd13"),
        hex!("51ed993ea0d455b75642e2098ea51448d967ae33bfbdfe40cfe97bdc47739922"),
    ),
    (
        hex!("2f8bde4d1a07209355b4a7250a5c5128e88b84bddc619ab7cba8d569b240efe4"),
        hex!("d8ac222636e5e3d6d4dba9dda6c9c426f788271bab0d6840dca87d3aa6ac62d6"),
    ),
    (
        hex!("fff97bd5755eeea420453a14355235d382f6472f8568a18b2f057a1460297556"),
        hex!("ae12777aacfbb620f3be96017f45c560de80f0f6518fe4a03c870c36b075f297"),
    ),
    (
        hex!("5cbdf0646e5db4eaa398f365f2ea7a0e3d419b7e0330e39ce92bddedcac4f9bc"),
        hex!("6aebca40ba255960a3178d6d861a54dba813d0b813fde7b5a5082628087264da"),
    ),
    (
        hex!("2f01e5e15cca351daff3843fb70f3c2f0a1bdd05e5af888a67784ef3e10a2a01"),
        hex!("5c4da8a741539949293d082a132d13b4c2e213d6ba5b7617b5da2cb76cbde904"),
    ),
    (
        hex!("acd484e2f0c7f65309ad178a9f559abde09796974c57e714c35f110dfc27ccbe"),
        hex!("cc338921b0a7d9fd64380971763b61e9add888a4375f8e0f05cc262ac64f9c37"),
    ),
    (
        hex!("a0434d9e47f3c86235477c7b1ae6ae5d3442d49b1943c2b752a68e2a47e247c7"),
        hex!("893aba425419bc27a3b6c7e693a24c696f794c2ed877a1593cbee53b037368d7"),
    ),
];

/// Scalar multiplication test vectors: `(k, x(k * G), y(k * G))`
pub const MUL_TEST_VECTORS: &[([u8; 32], [u8; 32], [u8; 32])] = &[
    (
        hex!("aa5e28d6a97a2479a65527f7290311a3624d4cc0fa1578598ee3c2613bf99522"),
        hex!("34f9460f0e4f08393d192b3c5133a6ba099aa0ad9fd54ebccfacdfa239ff49c6"),
        hex!("0b71ea9bd730fd8923f6d25a7a91e7dd7728a960686cb5a901bb419e0f2ca232"),
    ),
    (
        hex!("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364140"),
        hex!("79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"),
        hex!("b7c52588d95c3b9aa25b0403f1eef75702e84bb7597aabe663b82f6f04ef2777"),
    ),
    (
        hex!("0000000000000000000000000000000100000000000000000000000000000001"),
        hex!("8b300e513eff872cdaa6d12df54a3e332f27ce937be77e3e63c5e885114cbf09"),
        hex!("1cec30677f43c0cc446f0d466b8238ea08f6a7aa9aaf716926c6ff28b3b10a39"),
    ),
    (
        hex!("e9a06e539d6bf5cf1ca5c41b59121fa3df07a338322405a312c67b6349a707e9"),
        hex!("ccf11bcd4544550568d30921c1cc644646108971b155ce18082a42c116144997"),
        hex!("4d2bb0ea650ffb1e01c2244dd38820c35ea25144b52bf726517014ab32be6a43"),
    ),
];
