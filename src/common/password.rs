// src/common/password.rs

use bcrypt::{hash, verify};
use tokio::sync::OnceCell;

use crate::common::error::AppError;

// bcrypt é CPU-bound: sempre fora do executor assíncrono.

pub async fn hash_password(password: &str) -> Result<String, AppError> {
    let password = password.to_owned();
    let hashed = tokio::task::spawn_blocking(move || hash(&password, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;
    Ok(hashed)
}

/// Comparação em tempo constante feita pelo próprio bcrypt.
pub async fn verify_password(password: &str, password_hash: &str) -> Result<bool, AppError> {
    let password = password.to_owned();
    let password_hash = password_hash.to_owned();
    let valid = tokio::task::spawn_blocking(move || verify(&password, &password_hash))
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;
    Ok(valid)
}

// Hash de uma senha que ninguém conhece, gerado uma vez por processo
static DUMMY_HASH: OnceCell<String> = OnceCell::const_new();

async fn dummy_hash() -> Result<&'static str, AppError> {
    let hashed = DUMMY_HASH
        .get_or_try_init(|| hash_password("conta-inexistente-sem-senha"))
        .await?;
    Ok(hashed.as_str())
}

/// Gasta o mesmo bcrypt de um login real quando o e-mail não existe,
/// para o tempo de resposta não denunciar quais contas existem.
pub async fn burn_verification(password: &str) -> Result<(), AppError> {
    let hashed = dummy_hash().await?;
    verify_password(password, hashed).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_then_verify() {
        let hashed = hash_password("segredo123").await.unwrap();
        assert!(verify_password("segredo123", &hashed).await.unwrap());
        assert!(!verify_password("outra", &hashed).await.unwrap());
    }

    #[tokio::test]
    async fn dummy_hash_is_real_bcrypt_and_built_once() {
        let first = dummy_hash().await.unwrap();
        let second = dummy_hash().await.unwrap();
        assert!(std::ptr::eq(first, second));
        assert!(first.starts_with("$2"));
        assert!(!verify_password("senha123", first).await.unwrap());
        burn_verification("qualquer").await.unwrap();
    }
}
