use super::AuthError;

/// Hash off the async executor; bcrypt is deliberately slow.
pub async fn hash_password(password: String, cost: u32) -> Result<String, AuthError> {
    let hashed = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;
    Ok(hashed)
}

pub async fn verify_password(password: String, hash: String) -> Result<bool, AuthError> {
    let ok = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await??;
    Ok(ok)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_then_verify() {
        let hash = hash_password("correct-horse".into(), 4).await.unwrap();
        assert_ne!(hash, "correct-horse");
        assert!(verify_password("correct-horse".into(), hash.clone()).await.unwrap());
        assert!(!verify_password("battery-staple".into(), hash).await.unwrap());
    }

    #[tokio::test]
    async fn garbage_hash_is_an_error() {
        assert!(verify_password("x".into(), "not-a-bcrypt-hash".into()).await.is_err());
    }
}
