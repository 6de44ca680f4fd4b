//! Archive of the provider's translation list, refreshed alongside the in-memory catalog.

use crate::bible::catalog::Translation;
use sqlx::PgPool;
use tracing::instrument;

/// Upsert every translation in one transaction. Codes no longer offered are kept; the
/// in-memory catalog is what decides validity.
#[instrument(level = "debug", skip_all, fields(count = translations.len()))]
pub async fn save_translations(pool: &PgPool, translations: &[Translation]) -> sqlx::Result<()> {
    let mut tx = pool.begin().await?;
    for t in translations {
        sqlx::query("INSERT INTO translations (code, name, language) VALUES ($1, $2, $3) ON CONFLICT (code) DO UPDATE SET name = EXCLUDED.name, language = EXCLUDED.language, updated_at = now()")
            .bind(&t.code)
            .bind(&t.name)
            .bind(&t.language)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await
}
