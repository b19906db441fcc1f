use diadrop::DiaCipher;
use proptest::prelude::*;

proptest! {
    #![proptest_config(proptest::test_runner::Config {
        failure_persistence: Some(Box::new(proptest::test_runner::FileFailurePersistence::WithSource("proptest-regressions"))),
        cases: 24,
        .. proptest::test_runner::Config::default()
    })]
    #[test]
    fn prop_encrypt_then_decrypt_recovers_text(text in "\\PC{0,256}") {
        let c = DiaCipher::new();
        let blob = c.encrypt(&text).unwrap();
        prop_assert_eq!(c.decrypt(&blob).unwrap(), text);
    }

    #[test]
    fn prop_any_flipped_byte_is_detected(text in "[ -~]{0,64}", pos in any::<prop::sample::Index>(), bit in 0u8..8) {
        let c = DiaCipher::new();
        let mut blob = c.encrypt(&text).unwrap();
        let i = pos.index(blob.len());
        blob[i] ^= 1 << bit;
        prop_assert!(c.decrypt(&blob).is_err());
    }

    #[test]
    fn prop_other_key_cannot_decrypt(text in "[ -~]{1,64}", key in any::<[u8; 32]>()) {
        let blob = DiaCipher::new().encrypt(&text).unwrap();
        let other = DiaCipher::from_key(key);
        prop_assert!(other.decrypt(&blob).is_err());
    }
}
