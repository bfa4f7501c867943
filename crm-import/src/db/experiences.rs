//! Experience table operations

use crate::models::ExperienceRecord;
use crate::store::StoreResult;
use sqlx::PgPool;

pub async fn insert_experience(pool: &PgPool, experience: &ExperienceRecord) -> StoreResult<()> {
    sqlx::query(
        r#"
        INSERT INTO experiences (
            contact_id, company_id, title, title_normalized, department,
            date_from, date_to, duration, description, location, is_current,
            order_in_profile, job_category, company_name,
            source_created_at, source_updated_at
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
        "#,
    )
    .bind(experience.contact_id)
    .bind(experience.company_id)
    .bind(&experience.title)
    .bind(&experience.title_normalized)
    .bind(&experience.department)
    .bind(experience.date_from)
    .bind(experience.date_to)
    .bind(&experience.duration)
    .bind(&experience.description)
    .bind(&experience.location)
    .bind(experience.is_current)
    .bind(experience.order_in_profile)
    .bind(&experience.job_category)
    .bind(&experience.company_name)
    .bind(experience.source_created_at)
    .bind(experience.source_updated_at)
    .execute(pool)
    .await?;

    Ok(())
}
