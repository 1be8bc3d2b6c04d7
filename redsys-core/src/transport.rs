//! Wire types: the signed request posted to the hosted payment page and the
//! result envelope Redsys posts back.

use serde::{Deserialize, Serialize};

use crate::{
    encrypter,
    errors::{Error, Result},
    signature::Signature,
    types::{
        Base64EncodedParameters, HmacSha256V1, MerchantParameters, MerchantSecret, Record,
        fields,
    },
};

/// The hidden fields of the hosted payment form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedRequest {
    #[serde(rename = "Ds_SignatureVersion")]
    pub signature_version: HmacSha256V1,
    #[serde(rename = "Ds_MerchantParameters")]
    pub merchant_parameters: Base64EncodedParameters,
    /// Standard base64 alphabet.
    #[serde(rename = "Ds_Signature")]
    pub signature: String,
}

impl SignedRequest {
    /// Canonicalize and sign a complete set of outbound parameters.
    ///
    /// Fails with [`Error::MissingParameters`] unless every field of
    /// [`fields::REQUIRED_REQUEST_FIELDS`] is present.
    pub fn sign(params: &MerchantParameters, secret: &MerchantSecret) -> Result<Self> {
        let missing = params.missing(&fields::REQUIRED_REQUEST_FIELDS);
        if !missing.is_empty() {
            return Err(Error::MissingParameters(missing));
        }

        let merchant_parameters = encrypter::encode(params)?;
        let signature = Signature::for_request(params, secret)?;

        Ok(SignedRequest {
            signature_version: HmacSha256V1,
            merchant_parameters,
            signature: signature.as_normalized().to_string(),
        })
    }

    /// Form fields in submission order.
    pub fn fields(&self) -> [(&'static str, &str); 3] {
        [
            (fields::SIGNATURE_VERSION, self.signature_version.as_str()),
            (fields::MERCHANT_PARAMETERS, self.merchant_parameters.as_str()),
            (fields::SIGNATURE, self.signature.as_str()),
        ]
    }
}

/// A result notification as posted by Redsys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultEnvelope {
    #[serde(rename = "Ds_MerchantParameters")]
    pub merchant_parameters: Base64EncodedParameters,
    /// Usually in the URL-safe base64 alphabet.
    #[serde(rename = "Ds_Signature")]
    pub signature: String,
    #[serde(rename = "Ds_SignatureVersion")]
    pub signature_version: String,
}

impl ResultEnvelope {
    /// Pick the envelope out of the posted form fields.
    ///
    /// Every missing field is reported, in the order
    /// `Ds_MerchantParameters`, `Ds_Signature`, `Ds_SignatureVersion`.
    pub fn from_fields(posted: &Record<String>) -> Result<Self> {
        let missing: Vec<String> = fields::RESULT_ENVELOPE_FIELDS
            .iter()
            .filter(|name| !posted.contains_key(**name))
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(Error::MissingParameters(missing));
        }

        let field = |name: &str| posted.get(name).cloned().unwrap_or_default();

        Ok(ResultEnvelope {
            merchant_parameters: Base64EncodedParameters(field(fields::MERCHANT_PARAMETERS)),
            signature: field(fields::SIGNATURE),
            signature_version: field(fields::SIGNATURE_VERSION),
        })
    }

    /// Decode `Ds_MerchantParameters`.
    pub fn decode(&self) -> Result<MerchantParameters> {
        encrypter::decode(self.merchant_parameters.as_str())
    }

    pub fn has_known_version(&self) -> bool {
        self.signature_version == HmacSha256V1::NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "sq7HjrUOBfKmC576ILgskD5srU870gJ7";

    fn complete_request() -> MerchantParameters {
        MerchantParameters::new()
            .with(fields::MERCHANT_TRANSACTION_TYPE, 0)
            .with(fields::MERCHANT_MERCHANT_URL, "https://shop.example/redsys/result")
            .with(fields::MERCHANT_URL_OK, "https://shop.example/ok?order=42")
            .with(fields::MERCHANT_URL_KO, "https://shop.example/ko?order=42")
            .with(fields::MERCHANT_AMOUNT, "1000")
            .with(fields::MERCHANT_ORDER, "0042T0000000")
            .with(fields::MERCHANT_MERCHANT_CODE, "999008881")
            .with(fields::MERCHANT_CURRENCY, "978")
            .with(fields::MERCHANT_TERMINAL, "1")
    }

    #[test]
    fn test_sign_complete_request() {
        let secret = MerchantSecret::new(SECRET);
        let signed = SignedRequest::sign(&complete_request(), &secret).unwrap();

        assert_eq!(signed.signature_version, HmacSha256V1);
        assert_eq!(
            encrypter::decode(signed.merchant_parameters.as_str()).unwrap(),
            complete_request()
        );
        let expected = Signature::for_request(&complete_request(), &secret).unwrap();
        assert_eq!(signed.signature, expected.as_normalized());

        let names: Vec<&str> = signed.fields().iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            ["Ds_SignatureVersion", "Ds_MerchantParameters", "Ds_Signature"]
        );
    }

    #[test]
    fn test_sign_refuses_incomplete_request() {
        let secret = MerchantSecret::new(SECRET);
        let mut params = MerchantParameters::new();
        for (key, value) in complete_request().iter() {
            if key != fields::MERCHANT_TERMINAL {
                params.insert(key.clone(), value.clone());
            }
        }

        match SignedRequest::sign(&params, &secret) {
            Err(Error::MissingParameters(missing)) => {
                assert_eq!(missing, ["Ds_Merchant_Terminal"])
            }
            other => panic!("expected MissingParameters, got {other:?}"),
        }
    }

    #[test]
    fn test_envelope_reports_every_missing_field() {
        let mut posted = Record::new();
        posted.insert("Ds_Signature".to_string(), "abc".to_string());

        let err = ResultEnvelope::from_fields(&posted).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Parameters not received: Ds_MerchantParameters, Ds_SignatureVersion"
        );
    }

    #[test]
    fn test_envelope_serializes_with_wire_names() {
        let envelope = ResultEnvelope {
            merchant_parameters: Base64EncodedParameters::from("e30="),
            signature: "sig".to_string(),
            signature_version: HmacSha256V1::NAME.to_string(),
        };
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["Ds_MerchantParameters"], "e30=");
        assert!(envelope.has_known_version());
        assert!(envelope.decode().unwrap().is_empty());
    }
}
