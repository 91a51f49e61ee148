#![no_main]

use libfuzzer_sys::fuzz_target;
use secp256k1_tweak::{
    FieldBytes, FieldElement, ProjectivePoint, Scalar, U256, elliptic_curve::ops::Reduce,
};

fn scalars(data: &[u8]) -> Option<(Scalar, Scalar, Scalar)> {
    let bytes: &[u8; 96] = data.get(..96)?.try_into().ok()?;
    let mut chunks = bytes
        .chunks_exact(32)
        .map(|chunk| <Scalar as Reduce<U256>>::reduce_bytes(FieldBytes::from_slice(chunk)));
    Some((chunks.next()?, chunks.next()?, chunks.next()?))
}

fuzz_target!(|data: &[u8]| {
    let Some((s1, s2, s3)) = scalars(data) else {
        return;
    };

    // Associativity
    assert_eq!(s1 + (s2 + s3), (s1 + s2) + s3);
    assert_eq!(s1 * (s2 * s3), (s1 * s2) * s3);

    // Commutativity
    assert_eq!(s1 + s2, s2 + s1);
    assert_eq!(s1 * s2, s2 * s1);

    // Identity
    assert_eq!(s1 + Scalar::ZERO, s1);
    assert_eq!(s1 * Scalar::ONE, s1);
    assert_eq!(s1 - s1, Scalar::ZERO);

    // Distributivity
    assert_eq!(s1 * (s2 + s3), s1 * s2 + s1 * s3);

    // Inverse
    assert_eq!(s1 + (-s1), Scalar::ZERO);
    if !bool::from(s1.is_zero()) {
        assert_eq!(s1 * s1.invert().unwrap(), Scalar::ONE);
    }

    // Round trip through the canonical encoding
    assert_eq!(Scalar::from_bytes(&s1.to_bytes()).unwrap(), s1);

    // Field elements from the same bytes, when canonical
    if let Some(fe) = Option::<FieldElement>::from(FieldElement::from_bytes(&s2.to_bytes())) {
        assert_eq!(fe * fe, fe.square());
        if let Some(root) = Option::<FieldElement>::from(fe.square().sqrt()) {
            assert!(root == fe || root == -fe);
        }
    }

    // Group homomorphism
    let g = ProjectivePoint::GENERATOR;
    assert_eq!(g * &(s1 + s2), g * &s1 + &(g * &s2));
});
