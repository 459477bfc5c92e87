//! Algorithm type for the keypairs generated during a ceremony

/// Cryptographic algorithm for the generated keypairs
///
/// This type provides a type-safe way to specify the algorithm and carries
/// the identifiers the external tools expect for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// ECDSA over NIST P-256
    EcP256,
    /// ECDSA over NIST P-384
    EcP384,
    /// RSA 2048-bit
    Rsa2048,
}

impl Algorithm {
    /// Key-type identifier passed to `pkcs11-tool --keypairgen --key-type`
    pub fn key_type(self) -> &'static str {
        match self {
            Algorithm::EcP256 => "EC:prime256v1",
            Algorithm::EcP384 => "EC:secp384r1",
            Algorithm::Rsa2048 => "rsa:2048",
        }
    }

    /// `openssl` subcommand that converts this key family to PEM
    pub fn pem_subcommand(self) -> &'static str {
        match self {
            Algorithm::EcP256 | Algorithm::EcP384 => "ec",
            Algorithm::Rsa2048 => "rsa",
        }
    }
}
