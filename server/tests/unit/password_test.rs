// パスワードハッシュ化と検証のユニットテスト

#[cfg(test)]
mod password_tests {
    use account_api::auth::password::{hash_password, verify_password};

    #[test]
    fn test_hash_password_creates_valid_hash() {
        // Given: 平文パスワード
        let password = "HandsomeDashingWizard";

        // When: パスワードをハッシュ化
        let hash = hash_password(password).expect("Failed to hash password");

        // Then: bcryptハッシュ形式で、平文を含まない
        assert!(hash.starts_with("$2b$12$"));
        assert!(!hash.contains(password));
    }

    #[test]
    fn test_hash_password_produces_different_hashes() {
        let hash1 = hash_password("same_password").expect("Failed to hash password");
        let hash2 = hash_password("same_password").expect("Failed to hash password");

        // ソルトのため、異なるハッシュが生成される
        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_verify_password() {
        let hash = hash_password("correct_password").expect("Failed to hash password");

        assert!(verify_password("correct_password", &hash).unwrap());
        assert!(!verify_password("wrong_password", &hash).unwrap());
    }

    #[test]
    fn test_verify_password_with_invalid_hash() {
        // 不正なハッシュ形式はエラー
        assert!(verify_password("password", "not-a-bcrypt-hash").is_err());
    }
}
