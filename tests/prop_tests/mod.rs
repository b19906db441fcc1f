#[path = "codec/prop_codec.rs"]
mod codec_props;
#[path = "crypto/prop_crypto.rs"]
mod crypto_props;
