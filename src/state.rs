use std::fmt;

/// Where a certificate stands in its lifecycle.
///
/// Deciding which label applies (revocation, expiry) is left to whoever observes the
/// certificate; this type is only the vocabulary. A fresh value is [`CertificateState::Valid`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CertificateState {
    #[default]
    Valid,
    Revoked,
    Expired,
}

impl CertificateState {
    /// Every state, in declaration order.
    pub const ALL: [CertificateState; 3] = [
        CertificateState::Valid,
        CertificateState::Revoked,
        CertificateState::Expired,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CertificateState::Valid => "Valid",
            CertificateState::Revoked => "Revoked",
            CertificateState::Expired => "Expired",
        }
    }

    pub fn is_valid(self) -> bool {
        self == CertificateState::Valid
    }
}

impl fmt::Display for CertificateState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
