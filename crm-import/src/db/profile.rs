//! Profile detail tables: languages, skills, interests, education

use crate::models::{EducationRecord, InterestRecord, LanguageRecord, SkillRecord};
use crate::store::StoreResult;
use sqlx::PgPool;

pub async fn insert_language(pool: &PgPool, language: &LanguageRecord) -> StoreResult<()> {
    sqlx::query(
        r#"
        INSERT INTO contact_languages (
            contact_id, language, proficiency, order_in_profile,
            source_created_at, source_updated_at
        ) VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(language.contact_id)
    .bind(&language.language)
    .bind(&language.proficiency)
    .bind(language.order_in_profile)
    .bind(language.source_created_at)
    .bind(language.source_updated_at)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn insert_skill(pool: &PgPool, skill: &SkillRecord) -> StoreResult<()> {
    sqlx::query(
        r#"
        INSERT INTO contact_skills (
            contact_id, skill_name, order_in_profile, source_created_at, source_updated_at
        ) VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(skill.contact_id)
    .bind(&skill.skill_name)
    .bind(skill.order_in_profile)
    .bind(skill.source_created_at)
    .bind(skill.source_updated_at)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn insert_interest(pool: &PgPool, interest: &InterestRecord) -> StoreResult<()> {
    sqlx::query(
        r#"
        INSERT INTO contact_interests (
            contact_id, interest_name, order_in_profile, source_created_at, source_updated_at
        ) VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(interest.contact_id)
    .bind(&interest.interest_name)
    .bind(interest.order_in_profile)
    .bind(interest.source_created_at)
    .bind(interest.source_updated_at)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn insert_education(pool: &PgPool, education: &EducationRecord) -> StoreResult<()> {
    sqlx::query(
        r#"
        INSERT INTO contact_education (
            contact_id, institution, degree, field_of_study, start_date, end_date,
            order_in_profile, source_created_at, source_updated_at
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        "#,
    )
    .bind(education.contact_id)
    .bind(&education.institution)
    .bind(&education.degree)
    .bind(&education.field_of_study)
    .bind(education.start_date)
    .bind(education.end_date)
    .bind(education.order_in_profile)
    .bind(education.source_created_at)
    .bind(education.source_updated_at)
    .execute(pool)
    .await?;

    Ok(())
}
