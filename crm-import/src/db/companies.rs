//! Company table operations

use crate::models::{CompanyRecord, RowId};
use crate::store::StoreResult;
use sqlx::{PgPool, Row};

const INSERT_COLUMNS: &str = r#"
    company_id, company_name, company_description, company_industry,
    company_subindustry, company_size, company_website_url, headquarters_city,
    headquarters_country, employee_count, revenue_bucket, company_type,
    logo_url, linkedin_url, source_created_at, source_updated_at
"#;

const INSERT_VALUES: &str = "$1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16";

fn bind_company<'q>(
    query: sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments>,
    company: &'q CompanyRecord,
) -> sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments> {
    query
        .bind(&company.company_id)
        .bind(&company.company_name)
        .bind(&company.description)
        .bind(&company.industry)
        .bind(&company.subindustry)
        .bind(&company.size)
        .bind(&company.website_url)
        .bind(&company.headquarters_city)
        .bind(&company.headquarters_country)
        .bind(company.employee_count)
        .bind(&company.revenue_bucket)
        .bind(&company.company_type)
        .bind(&company.logo_url)
        .bind(&company.linkedin_url)
        .bind(company.source_created_at)
        .bind(company.source_updated_at)
}

/// Insert a company; a taken `company_id` or `company_name` surfaces as
/// [`StoreError::Conflict`](crate::store::StoreError::Conflict)
pub async fn insert_company(pool: &PgPool, company: &CompanyRecord) -> StoreResult<RowId> {
    let sql = format!(
        "INSERT INTO companies ({}) VALUES ({}) RETURNING id",
        INSERT_COLUMNS, INSERT_VALUES
    );
    let row = bind_company(sqlx::query(&sql), company)
        .fetch_one(pool)
        .await?;

    Ok(row.get::<i64, _>("id"))
}

/// Insert unless the name is taken; true when a row was written
pub async fn insert_company_if_absent(pool: &PgPool, company: &CompanyRecord) -> StoreResult<bool> {
    let sql = format!(
        "INSERT INTO companies ({}) VALUES ({}) ON CONFLICT (company_name) DO NOTHING",
        INSERT_COLUMNS, INSERT_VALUES
    );
    let result = bind_company(sqlx::query(&sql), company)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
