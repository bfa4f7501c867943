//! Contact table operations

use crate::models::{CompanySnapshot, ContactRecord, RowId};
use crate::store::StoreResult;
use sqlx::{PgPool, Row};

/// Surrogate key of the contact with this `lead_id`
pub async fn find_contact_id(pool: &PgPool, lead_id: &str) -> StoreResult<Option<RowId>> {
    let row = sqlx::query("SELECT id FROM contacts WHERE lead_id = $1")
        .bind(lead_id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|row| row.get::<i64, _>("id")))
}

pub async fn insert_contact(pool: &PgPool, contact: &ContactRecord) -> StoreResult<RowId> {
    let row = sqlx::query(
        r#"
        INSERT INTO contacts (
            lead_id, full_name, headline, summary, location, country,
            connections_count, connections_count_bucket, lead_quality_score,
            linkedin_url, linkedin_short, years_of_experience, department,
            current_title_normalized, canonical_shorthand_name, profile_picture_url,
            experience_count, email, telephone, current_company_name,
            current_company_industry, current_company_subindustry,
            source_created_at, source_updated_at
        ) VALUES (
            $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12,
            $13, $14, $15, $16, $17, $18, $19, $20, $21, $22, $23, $24
        )
        RETURNING id
        "#,
    )
    .bind(&contact.lead_id)
    .bind(&contact.full_name)
    .bind(&contact.headline)
    .bind(&contact.summary)
    .bind(&contact.location)
    .bind(&contact.country)
    .bind(contact.connections_count)
    .bind(&contact.connections_count_bucket)
    .bind(contact.lead_quality_score)
    .bind(&contact.linkedin_url)
    .bind(&contact.linkedin_short)
    .bind(contact.years_of_experience)
    .bind(&contact.department)
    .bind(&contact.current_title_normalized)
    .bind(&contact.canonical_shorthand_name)
    .bind(&contact.profile_picture_url)
    .bind(contact.experience_count)
    .bind(&contact.email)
    .bind(&contact.telephone)
    .bind(&contact.current_company_name)
    .bind(&contact.current_company_industry)
    .bind(&contact.current_company_subindustry)
    .bind(contact.source_created_at)
    .bind(contact.source_updated_at)
    .fetch_one(pool)
    .await?;

    Ok(row.get::<i64, _>("id"))
}

/// Overwrite every mutable column; `lead_id` and `created_at` are kept
pub async fn update_contact(pool: &PgPool, id: RowId, contact: &ContactRecord) -> StoreResult<()> {
    let result = sqlx::query(
        r#"
        UPDATE contacts SET
            full_name = $2,
            headline = $3,
            summary = $4,
            location = $5,
            country = $6,
            connections_count = $7,
            connections_count_bucket = $8,
            lead_quality_score = $9,
            linkedin_url = $10,
            linkedin_short = $11,
            years_of_experience = $12,
            department = $13,
            current_title_normalized = $14,
            canonical_shorthand_name = $15,
            profile_picture_url = $16,
            experience_count = $17,
            email = $18,
            telephone = $19,
            current_company_name = $20,
            current_company_industry = $21,
            current_company_subindustry = $22,
            source_created_at = $23,
            source_updated_at = $24,
            updated_at = NOW()
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(&contact.full_name)
    .bind(&contact.headline)
    .bind(&contact.summary)
    .bind(&contact.location)
    .bind(&contact.country)
    .bind(contact.connections_count)
    .bind(&contact.connections_count_bucket)
    .bind(contact.lead_quality_score)
    .bind(&contact.linkedin_url)
    .bind(&contact.linkedin_short)
    .bind(contact.years_of_experience)
    .bind(&contact.department)
    .bind(&contact.current_title_normalized)
    .bind(&contact.canonical_shorthand_name)
    .bind(&contact.profile_picture_url)
    .bind(contact.experience_count)
    .bind(&contact.email)
    .bind(&contact.telephone)
    .bind(&contact.current_company_name)
    .bind(&contact.current_company_industry)
    .bind(&contact.current_company_subindustry)
    .bind(contact.source_created_at)
    .bind(contact.source_updated_at)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(crate::store::StoreError::NotFound(format!("contact {}", id)));
    }
    Ok(())
}

/// Distinct non-empty current-company snapshots, ordered by name
pub async fn company_snapshots(pool: &PgPool) -> StoreResult<Vec<CompanySnapshot>> {
    let rows = sqlx::query(
        r#"
        SELECT DISTINCT current_company_name, current_company_industry, current_company_subindustry
        FROM contacts
        WHERE current_company_name <> ''
        ORDER BY current_company_name, current_company_industry, current_company_subindustry
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| CompanySnapshot {
            company_name: row.get("current_company_name"),
            industry: row.get("current_company_industry"),
            subindustry: row.get("current_company_subindustry"),
        })
        .collect())
}
