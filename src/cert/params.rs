use bon::Builder;
use const_oid::ObjectIdentifier;
use der::{Tag, Tagged};
use der::asn1::{Any, Ia5StringRef, PrintableStringRef, SetOfVec, Utf8StringRef};
use time::Duration;
use time::OffsetDateTime;
use x509_cert::attr::AttributeTypeAndValue;
use x509_cert::name::{RdnSequence, RelativeDistinguishedName};

use super::extensions::ToAndFromX509Extension;
use crate::error::{BundleError, Result};

/// Parameters for self-issuing an end-entity X.509 certificate.
///
/// # Fields
/// * `subject` - The distinguished name of the certificate subject (and issuer).
/// * `validity` - The validity window, one year from now by default.
/// * `serial_number` - Big-endian serial; a random 16-byte serial is drawn when absent.
#[derive(Clone, Debug, Builder)]
pub struct CertificateParams {
    pub subject: DistinguishedName,
    #[builder(default = Validity::for_days(365))]
    pub validity: Validity,
    pub serial_number: Option<Vec<u8>>,
}

/// Distinguished name of a certificate subject or issuer.
///
/// # Fields
/// * `common_name` - The common name (CN).
/// * `country` - The country (C).
/// * `state` - The state or province (ST).
/// * `locality` - The locality or city (L).
/// * `organization` - The organization (O).
/// * `organization_unit` - The organizational unit (OU).
#[derive(Clone, Debug, Builder, Default, PartialEq, Eq)]
pub struct DistinguishedName {
    pub common_name: String,
    pub country: Option<String>,
    pub state: Option<String>,
    pub locality: Option<String>,
    pub organization: Option<String>,
    pub organization_unit: Option<String>,
}

impl DistinguishedName {
    /// A name carrying only a common name.
    pub fn common_name(common_name: impl Into<String>) -> Self {
        Self {
            common_name: common_name.into(),
            ..Self::default()
        }
    }

    /// Converts the distinguished name to its X.509 form, one RDN per present attribute.
    ///
    /// Values are carried as UTF8String, except the country which is a PrintableString.
    pub fn as_x509_name(&self) -> Result<x509_cert::name::DistinguishedName> {
        use const_oid::db::rfc4519::{C, CN, L, O, OU, ST};

        let mut rdns = Vec::new();
        if let Some(country) = &self.country {
            let value = PrintableStringRef::new(country)
                .map_err(|e| BundleError::InvalidInput(e.to_string()))?;
            rdns.push(single_attribute(C, Any::encode_from(&value)?)?);
        }
        for (oid, value) in [
            (ST, &self.state),
            (L, &self.locality),
            (O, &self.organization),
            (OU, &self.organization_unit),
        ] {
            if let Some(value) = value {
                rdns.push(single_attribute(oid, utf8_value(value)?)?);
            }
        }
        rdns.push(single_attribute(CN, utf8_value(&self.common_name)?)?);

        Ok(RdnSequence(rdns))
    }

    /// Creates a `DistinguishedName` from its X.509 form.
    ///
    /// Attributes this type does not model are skipped, as are values that are not
    /// UTF8String, PrintableString or IA5String.
    pub fn from_x509_name(x509dn: &x509_cert::name::DistinguishedName) -> Self {
        use const_oid::db::rfc4519::{C, CN, L, O, OU, ST};

        let mut name = DistinguishedName::default();
        for rdn in x509dn.0.iter() {
            for attr in rdn.0.iter() {
                let Some(value) = attribute_string(&attr.value) else {
                    continue;
                };
                match attr.oid {
                    CN => name.common_name = value,
                    C => name.country = Some(value),
                    ST => name.state = Some(value),
                    L => name.locality = Some(value),
                    O => name.organization = Some(value),
                    OU => name.organization_unit = Some(value),
                    _ => {}
                }
            }
        }
        name
    }
}

fn utf8_value(value: &str) -> Result<Any> {
    let value = Utf8StringRef::new(value).map_err(|e| BundleError::InvalidInput(e.to_string()))?;
    Ok(Any::encode_from(&value)?)
}

fn single_attribute(oid: ObjectIdentifier, value: Any) -> Result<RelativeDistinguishedName> {
    let set = SetOfVec::try_from(vec![AttributeTypeAndValue { oid, value }])?;
    Ok(RelativeDistinguishedName(set))
}

fn attribute_string(value: &Any) -> Option<String> {
    match value.tag() {
        Tag::Utf8String => value.decode_as::<Utf8StringRef<'_>>().ok().map(|s| s.to_string()),
        Tag::PrintableString => value
            .decode_as::<PrintableStringRef<'_>>()
            .ok()
            .map(|s| s.to_string()),
        Tag::Ia5String => value.decode_as::<Ia5StringRef<'_>>().ok().map(|s| s.to_string()),
        _ => None,
    }
}

/// Certificate validity period.
///
/// This struct represents the `notBefore` and `notAfter` fields in a certificate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Validity {
    pub not_before: OffsetDateTime,
    pub not_after: OffsetDateTime,
}

impl Validity {
    /// Creates a validity period starting now for the given number of days.
    pub fn for_days(days: i64) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            not_before: now,
            not_after: now + Duration::days(days),
        }
    }

    /// Converts to the X.509 form, using UTCTime for both bounds.
    pub fn to_x509(&self) -> Result<x509_cert::time::Validity> {
        if self.not_after <= self.not_before {
            return Err(BundleError::InvalidInput(
                "validity must end after it starts".to_string(),
            ));
        }
        Ok(x509_cert::time::Validity {
            not_before: utc_time(self.not_before)?,
            not_after: utc_time(self.not_after)?,
        })
    }
}

fn utc_time(at: OffsetDateTime) -> Result<x509_cert::time::Time> {
    let utc = der::asn1::UtcTime::from_system_time(at.into())
        .map_err(|e| BundleError::InvalidInput(e.to_string()))?;
    Ok(x509_cert::time::Time::UtcTime(utc))
}

/// Represents an X.509 extension.
///
/// # Fields
/// * `oid` - The object identifier of the extension.
/// * `critical` - Indicates if the extension is critical.
/// * `value` - The DER-encoded value of the extension.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtensionParam {
    pub oid: ObjectIdentifier,
    pub critical: bool,
    /// DER-encoded extension value
    pub value: Vec<u8>,
}

impl ExtensionParam {
    /// Creates an `ExtensionParam` from a specific extension.
    pub fn from_extension<E: ToAndFromX509Extension>(extension: E, critical: bool) -> Result<Self> {
        Ok(Self {
            oid: E::OID,
            critical,
            value: extension.to_x509_extension_value()?,
        })
    }

    /// Decodes an `ExtensionParam` into a specific extension.
    pub fn to_extension<E: ToAndFromX509Extension>(&self) -> Result<E> {
        if self.oid != E::OID {
            return Err(BundleError::InvalidInput(format!(
                "extension {} is not {}",
                self.oid,
                E::OID
            )));
        }
        E::from_x509_extension_value(&self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distinguished_name_survives_x509_conversion() {
        let dn = DistinguishedName::builder()
            .common_name("alice, the \"first\"".to_string())
            .organization("Example Corp".to_string())
            .country("US".to_string())
            .build();
        let x509 = dn.as_x509_name().unwrap();
        assert_eq!(x509.0.len(), 3);
        assert_eq!(DistinguishedName::from_x509_name(&x509), dn);
    }

    #[test]
    fn common_name_is_the_last_rdn() {
        let x509 = DistinguishedName::common_name("alice").as_x509_name().unwrap();
        assert_eq!(x509.to_string(), "CN=alice");
    }

    #[test]
    fn inverted_validity_is_rejected() {
        let now = OffsetDateTime::now_utc();
        let validity = Validity {
            not_before: now,
            not_after: now - Duration::days(1),
        };
        assert!(matches!(
            validity.to_x509(),
            Err(BundleError::InvalidInput(_))
        ));
    }

    #[test]
    fn params_default_to_a_one_year_validity() {
        let params = CertificateParams::builder()
            .subject(DistinguishedName::common_name("alice"))
            .build();
        assert!(params.serial_number.is_none());
        assert_eq!(
            (params.validity.not_after - params.validity.not_before).whole_days(),
            365
        );
    }
}
