/// Output of an AES-256-GCM encryption: ciphertext plus the IV and
/// authentication tag needed to decrypt it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedData {
    pub ciphertext: Vec<u8>,
    pub iv: Vec<u8>,
    pub auth_tag: Vec<u8>,
}
