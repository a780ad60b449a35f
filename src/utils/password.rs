//! 共享密钥哈希工具模块
//!
//! 使用 Argon2id 算法对配置中的共享密钥进行哈希和验证。
//! 配置文件里既可以写明文（启动时哈希一次），也可以直接写 Argon2 PHC 字符串。

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::errors::{LinkError, Result};

/// 对密码进行 Argon2id 哈希
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| LinkError::password_hash(e.to_string()))
}

/// 验证密码是否匹配哈希
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| LinkError::password_hash(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// 检测字符串是否是 Argon2 哈希格式
pub fn is_argon2_hash(s: &str) -> bool {
    s.starts_with("$argon2")
}

/// 日志中显示的密码：只保留首字符
pub fn mask_secret(secret: &str) -> String {
    match secret.chars().next() {
        Some(first) => format!("{}*********", first),
        None => String::new(),
    }
}

/// Verifies request secrets against the configured one.
///
/// Holds only the Argon2 PHC string; the plaintext is dropped after
/// construction.
#[derive(Clone)]
pub struct SecretVerifier {
    hash: String,
}

impl SecretVerifier {
    /// Build from the configured password, hashing it unless it already is
    /// an Argon2 PHC string.
    pub fn from_configured(password: &str) -> Result<Self> {
        if password.is_empty() {
            return Err(LinkError::config("no password specified"));
        }

        let hash = if is_argon2_hash(password) {
            PasswordHash::new(password).map_err(|e| {
                LinkError::config(format!("password looks like an Argon2 hash but is invalid: {}", e))
            })?;
            password.to_string()
        } else {
            hash_password(password)?
        };

        Ok(Self { hash })
    }

    pub fn verify(&self, candidate: &str) -> bool {
        verify_password(candidate, &self.hash).unwrap_or(false)
    }
}

impl std::fmt::Debug for SecretVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretVerifier").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let password = "test_password_123";
        let hash = hash_password(password).expect("hash should succeed");

        assert!(is_argon2_hash(&hash));
        assert!(verify_password(password, &hash).expect("verify should succeed"));
        assert!(!verify_password("wrong_password", &hash).expect("verify should succeed"));
    }

    #[test]
    fn test_is_argon2_hash() {
        assert!(is_argon2_hash("$argon2id$v=19$m=19456,t=2,p=1$xxx"));
        assert!(is_argon2_hash("$argon2i$v=19$m=19456,t=2,p=1$xxx"));
        assert!(!is_argon2_hash("plaintext_password"));
        assert!(!is_argon2_hash("$bcrypt$xxx"));
    }

    #[test]
    fn test_verifier_from_plaintext() {
        let verifier = SecretVerifier::from_configured("hunter2").unwrap();
        assert!(verifier.verify("hunter2"));
        assert!(!verifier.verify("hunter3"));
        assert!(!verifier.verify(""));
    }

    #[test]
    fn test_verifier_from_existing_hash() {
        let hash = hash_password("s3cret").unwrap();
        let verifier = SecretVerifier::from_configured(&hash).unwrap();
        assert!(verifier.verify("s3cret"));
        // 哈希字符串本身不能当作密码使用
        assert!(!verifier.verify(&hash));
    }

    #[test]
    fn test_verifier_rejects_empty_and_broken_hash() {
        assert!(matches!(
            SecretVerifier::from_configured(""),
            Err(LinkError::Config(_))
        ));
        assert!(matches!(
            SecretVerifier::from_configured("$argon2id$v=19$m=19456,t=2,p=1$not a salt!$"),
            Err(LinkError::Config(_))
        ));
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("hunter2"), "h*********");
        assert_eq!(mask_secret(""), "");
    }
}
