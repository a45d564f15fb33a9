//! Compact encrypted envelope construction.
//!
//! A validated payment request is sealed into a compact token of five
//! `.`-joined base64url segments: `header.wrappedKey.iv.ciphertext.tag`.
//! The scheme is hybrid Encrypt-then-MAC: a fresh 64-byte content
//! encryption key is wrapped with the gateway's RSA key (OAEP), its halves
//! drive AES-256-CBC and HMAC-SHA512, and the tag is the HMAC output
//! truncated to half length. The framing bytes (AAD length as 8-byte
//! big-endian bit count, tag truncation) are protocol, not implementation
//! detail; the verifying party rejects any deviation.

use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockEncryptMut, KeyIvInit};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use rand::rngs::OsRng;
use rand::RngCore;
use rsa::Oaep;
use serde::Serialize;
use sha1::Sha1;
use sha2::Sha512;
use zeroize::Zeroizing;

use crate::domain::{PaymentError, PaymentRequest};

use super::metadata::DeviceInformation;
use super::public_key::GatewayPublicKey;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;

/// Key-wrap algorithm named in the protected header.
const ALG_RSA_OAEP: &str = "RSA-OAEP";

/// Content-encryption algorithm named in the protected header.
const ENC_A256CBC_HS512: &str = "A256CBC-HS512";

/// Content-encryption key size: 32 bytes MAC key + 32 bytes cipher key.
const CEK_LEN: usize = 64;

/// AES block size; also the IV length.
const IV_LEN: usize = 16;

/// The HMAC-SHA512 output is truncated to this many bytes.
const TAG_LEN: usize = 32;

/// Random bytes behind the payload nonce (hex-encoded in the payload).
const NONCE_LEN: usize = 16;

/// What the caller hands to its transport collaborator.
#[derive(Debug, Clone)]
pub struct EncryptedRequest {
    /// The 5-segment compact token.
    pub encrypted_payload: String,

    /// Base64url client metadata blob sent alongside the token.
    pub client_meta_info: String,
}

#[derive(Serialize)]
struct ProtectedHeader<'a> {
    alg: &'static str,
    enc: &'static str,
    kid: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PaymentValue {
    key: String,
    value: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PayloadWire<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    client_session_id: Option<&'a str>,
    nonce: String,
    payment_product_id: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    account_on_file_id: Option<&'a str>,
    tokenize: bool,
    payment_values: Vec<PaymentValue>,
    collected_device_information: &'a DeviceInformation,
}

fn random_bytes<const N: usize>() -> [u8; N] {
    let mut buf = [0u8; N];
    OsRng.fill_bytes(&mut buf);
    buf
}

/// Serializes the plaintext payload the envelope protects.
///
/// Refuses before producing any plaintext when no payment product is
/// attached or when the aggregate fails validation; the error carries the
/// full validation result.
fn build_payload(
    request: &PaymentRequest,
    client_session_id: Option<&str>,
    device_information: &DeviceInformation,
) -> Result<Zeroizing<Vec<u8>>, PaymentError> {
    let product = request
        .payment_product()
        .ok_or_else(|| PaymentError::encryption("payment request has no payment product id"))?;

    let errors = request.validate()?;
    if !errors.is_empty() {
        return Err(PaymentError::invalid_request(errors));
    }

    let payment_values = request
        .unmasked_values()?
        .into_iter()
        .map(|(key, value)| PaymentValue { key, value })
        .collect();

    let payload = PayloadWire {
        client_session_id,
        nonce: hex::encode(random_bytes::<NONCE_LEN>()),
        payment_product_id: product.id(),
        account_on_file_id: request.account_on_file().map(|aof| aof.id.as_str()),
        tokenize: request.tokenize(),
        payment_values,
        collected_device_information: device_information,
    };

    let bytes = serde_json::to_vec(&payload)
        .map_err(|err| PaymentError::encryption(format!("payload serialization failed: {err}")))?;
    Ok(Zeroizing::new(bytes))
}

/// Seals plaintext bytes into the 5-segment compact token.
pub fn seal(plaintext: &[u8], public_key: &GatewayPublicKey) -> Result<String, PaymentError> {
    let header = ProtectedHeader {
        alg: ALG_RSA_OAEP,
        enc: ENC_A256CBC_HS512,
        kid: public_key.key_id(),
    };
    let header_json = serde_json::to_vec(&header)
        .map_err(|err| PaymentError::encryption(format!("header serialization failed: {err}")))?;
    let encoded_header = URL_SAFE_NO_PAD.encode(header_json);

    // One fresh content-encryption key per token; MAC half first.
    let cek = Zeroizing::new(random_bytes::<CEK_LEN>());
    let (mac_key, enc_key) = cek.split_at(32);

    let wrapped_key = public_key
        .rsa_key()
        .encrypt(&mut OsRng, Oaep::new::<Sha1>(), cek.as_ref())
        .map_err(|err| PaymentError::encryption(format!("key wrap failed: {err}")))?;

    let iv = random_bytes::<IV_LEN>();

    let ciphertext = Aes256CbcEnc::new_from_slices(enc_key, &iv)
        .map_err(|err| PaymentError::encryption(format!("cipher setup failed: {err}")))?
        .encrypt_padded_vec_mut::<Pkcs7>(plaintext);

    // Additional authenticated data length: bit length of the encoded
    // header as an 8-byte big-endian integer.
    let al = ((encoded_header.len() as u64) * 8).to_be_bytes();

    let mut mac = Hmac::<Sha512>::new_from_slice(mac_key)
        .map_err(|err| PaymentError::encryption(format!("mac setup failed: {err}")))?;
    mac.update(encoded_header.as_bytes());
    mac.update(&iv);
    mac.update(&ciphertext);
    mac.update(&al);
    let tag = mac.finalize().into_bytes();

    Ok([
        encoded_header,
        URL_SAFE_NO_PAD.encode(wrapped_key),
        URL_SAFE_NO_PAD.encode(iv),
        URL_SAFE_NO_PAD.encode(&ciphertext),
        URL_SAFE_NO_PAD.encode(&tag[..TAG_LEN]),
    ]
    .join("."))
}

/// Seals a validated payment request into a compact token.
///
/// The request must carry a payment product and pass validation; otherwise
/// encryption is refused and the error carries the validation entries.
pub fn encrypt_request(
    request: &PaymentRequest,
    client_session_id: Option<&str>,
    device_information: &DeviceInformation,
    public_key: &GatewayPublicKey,
) -> Result<String, PaymentError> {
    let payload = build_payload(request, client_session_id, device_information)?;
    seal(&payload, public_key)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use rsa::pkcs8::EncodePublicKey;
    use rsa::RsaPrivateKey;
    use serde_json::json;

    use crate::domain::PaymentProduct;

    use super::*;

    fn test_public_key() -> GatewayPublicKey {
        let private = RsaPrivateKey::new(&mut rand::thread_rng(), 2048).expect("keygen");
        let der = private
            .to_public_key()
            .to_public_key_der()
            .expect("DER encoding");
        let b64 = STANDARD.encode(der.as_bytes());
        GatewayPublicKey::from_base64_der("test-kid", &b64).expect("key parses")
    }

    fn card_request() -> PaymentRequest {
        let product: PaymentProduct = serde_json::from_value(json!({
            "id": 1,
            "fields": [
                {
                    "id": "cardNumber",
                    "type": "numericstring",
                    "dataRestrictions": {
                        "isRequired": true,
                        "validators": {"luhn": {}}
                    },
                    "displayHints": {"mask": "{{9999}} {{9999}} {{9999}} {{9999}}"}
                }
            ]
        }))
        .expect("product JSON deserializes");

        let mut request = PaymentRequest::new();
        request.set_payment_product(Arc::new(product));
        request.set_value("cardNumber", "4567 3500 0042 7977").unwrap();
        request
    }

    #[test]
    fn token_has_five_nonempty_segments() {
        let token = encrypt_request(
            &card_request(),
            Some("session-1"),
            &DeviceInformation::default(),
            &test_public_key(),
        )
        .expect("encryption succeeds");

        let segments: Vec<&str> = token.split('.').collect();
        assert_eq!(segments.len(), 5);
        assert!(segments.iter().all(|s| !s.is_empty()));
    }

    #[test]
    fn header_segment_names_the_scheme_and_key() {
        let key = test_public_key();
        let token = encrypt_request(
            &card_request(),
            None,
            &DeviceInformation::default(),
            &key,
        )
        .expect("encryption succeeds");

        let header = token.split('.').next().unwrap();
        let decoded = URL_SAFE_NO_PAD.decode(header).expect("header is base64url");
        let json: serde_json::Value = serde_json::from_slice(&decoded).expect("header is JSON");
        assert_eq!(json["alg"], "RSA-OAEP");
        assert_eq!(json["enc"], "A256CBC-HS512");
        assert_eq!(json["kid"], "test-kid");
    }

    #[test]
    fn every_token_is_unique() {
        let key = test_public_key();
        let request = card_request();
        let device = DeviceInformation::default();
        let a = encrypt_request(&request, None, &device, &key).unwrap();
        let b = encrypt_request(&request, None, &device, &key).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn segment_sizes_match_the_construction() {
        let key = test_public_key();
        let token = encrypt_request(
            &card_request(),
            None,
            &DeviceInformation::default(),
            &key,
        )
        .unwrap();
        let segments: Vec<&str> = token.split('.').collect();

        // 2048-bit key wrap, 16-byte IV, 32-byte truncated tag.
        assert_eq!(URL_SAFE_NO_PAD.decode(segments[1]).unwrap().len(), 256);
        assert_eq!(URL_SAFE_NO_PAD.decode(segments[2]).unwrap().len(), IV_LEN);
        let ciphertext = URL_SAFE_NO_PAD.decode(segments[3]).unwrap();
        assert!(!ciphertext.is_empty());
        assert_eq!(ciphertext.len() % 16, 0);
        assert_eq!(URL_SAFE_NO_PAD.decode(segments[4]).unwrap().len(), TAG_LEN);
    }

    #[test]
    fn refuses_requests_without_a_product() {
        let request = PaymentRequest::new();
        let err = encrypt_request(
            &request,
            None,
            &DeviceInformation::default(),
            &test_public_key(),
        )
        .unwrap_err();
        assert!(matches!(err, PaymentError::Encryption { .. }));
    }

    #[test]
    fn refuses_invalid_requests_with_the_full_validation_result() {
        let mut request = card_request();
        request.set_value("cardNumber", "4567 3500 0042 7978").unwrap();
        let expected = request.validate().unwrap();
        assert!(!expected.is_empty());

        let err = encrypt_request(
            &request,
            None,
            &DeviceInformation::default(),
            &test_public_key(),
        )
        .unwrap_err();
        match err {
            PaymentError::Encryption { errors, .. } => assert_eq!(errors, expected),
            other => panic!("expected Encryption, got {other:?}"),
        }
    }
}
