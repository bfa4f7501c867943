//! Declarative PostgreSQL schema for the import tables
//!
//! Initialization runs in two phases per table:
//! 1. `CREATE TABLE IF NOT EXISTS` with the full definition
//! 2. `ALTER TABLE ... ADD COLUMN IF NOT EXISTS` for every non-key column,
//!    so databases created by older tooling pick up newer columns
//!
//! Existing columns are never altered or dropped.

use crm_common::Result;
use sqlx::PgPool;
use tracing::{debug, info};

/// Column definition with SQL constraints
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDefinition {
    pub name: &'static str,
    /// SQL type (e.g. "TEXT", "BIGINT", "TIMESTAMPTZ")
    pub sql_type: &'static str,
    pub not_null: bool,
    pub primary_key: bool,
    pub unique: bool,
    pub default_value: Option<&'static str>,
    /// `table(column)` target of a foreign key
    pub references: Option<&'static str>,
    pub on_delete_cascade: bool,
}

impl ColumnDefinition {
    pub const fn new(name: &'static str, sql_type: &'static str) -> Self {
        Self {
            name,
            sql_type,
            not_null: false,
            primary_key: false,
            unique: false,
            default_value: None,
            references: None,
            on_delete_cascade: false,
        }
    }

    pub const fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    pub const fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    pub const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub const fn default(mut self, value: &'static str) -> Self {
        self.default_value = Some(value);
        self
    }

    pub const fn references(mut self, target: &'static str) -> Self {
        self.references = Some(target);
        self
    }

    pub const fn cascade(mut self) -> Self {
        self.on_delete_cascade = true;
        self
    }

    /// Column clause as used in CREATE TABLE / ADD COLUMN
    pub fn to_sql(&self) -> String {
        let mut sql = format!("{} {}", self.name, self.sql_type);
        if self.primary_key {
            sql.push_str(" PRIMARY KEY");
        }
        if self.not_null {
            sql.push_str(" NOT NULL");
        }
        if self.unique {
            sql.push_str(" UNIQUE");
        }
        if let Some(default) = self.default_value {
            sql.push_str(" DEFAULT ");
            sql.push_str(default);
        }
        if let Some(target) = self.references {
            sql.push_str(" REFERENCES ");
            sql.push_str(target);
            if self.on_delete_cascade {
                sql.push_str(" ON DELETE CASCADE");
            }
        }
        sql
    }
}

/// One table: columns plus secondary indexes on single columns
#[derive(Debug, Clone)]
pub struct TableSchema {
    pub name: &'static str,
    pub columns: Vec<ColumnDefinition>,
    pub indexed_columns: Vec<&'static str>,
}

impl TableSchema {
    pub fn create_table_sql(&self) -> String {
        let columns: Vec<String> = self.columns.iter().map(|c| format!("    {}", c.to_sql())).collect();
        format!(
            "CREATE TABLE IF NOT EXISTS {} (\n{}\n)",
            self.name,
            columns.join(",\n")
        )
    }

    pub fn add_column_statements(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| !c.primary_key)
            .map(|c| format!("ALTER TABLE {} ADD COLUMN IF NOT EXISTS {}", self.name, c.to_sql()))
            .collect()
    }

    pub fn index_statements(&self) -> Vec<String> {
        self.indexed_columns
            .iter()
            .map(|column| {
                format!(
                    "CREATE INDEX IF NOT EXISTS idx_{table}_{column} ON {table} ({column})",
                    table = self.name,
                    column = column
                )
            })
            .collect()
    }
}

fn text(name: &'static str) -> ColumnDefinition {
    ColumnDefinition::new(name, "TEXT").not_null().default("''")
}

fn count(name: &'static str) -> ColumnDefinition {
    ColumnDefinition::new(name, "BIGINT").not_null().default("0")
}

fn audit_columns() -> [ColumnDefinition; 4] {
    [
        ColumnDefinition::new("source_created_at", "TIMESTAMPTZ"),
        ColumnDefinition::new("source_updated_at", "TIMESTAMPTZ"),
        ColumnDefinition::new("created_at", "TIMESTAMPTZ").not_null().default("NOW()"),
        ColumnDefinition::new("updated_at", "TIMESTAMPTZ").not_null().default("NOW()"),
    ]
}

fn id_column() -> ColumnDefinition {
    ColumnDefinition::new("id", "BIGSERIAL").primary_key()
}

fn contact_fk() -> ColumnDefinition {
    ColumnDefinition::new("contact_id", "BIGINT")
        .not_null()
        .references("contacts(id)")
        .cascade()
}

fn order_column() -> ColumnDefinition {
    ColumnDefinition::new("order_in_profile", "INTEGER").not_null().default("0")
}

pub fn contacts_table() -> TableSchema {
    let mut columns = vec![
        id_column(),
        ColumnDefinition::new("lead_id", "TEXT").not_null().unique(),
        text("full_name"),
        text("headline"),
        text("summary"),
        text("location"),
        text("country"),
        count("connections_count"),
        text("connections_count_bucket"),
        ColumnDefinition::new("lead_quality_score", "DOUBLE PRECISION")
            .not_null()
            .default("0"),
        text("linkedin_url"),
        text("linkedin_short"),
        count("years_of_experience"),
        text("department"),
        text("current_title_normalized"),
        text("canonical_shorthand_name"),
        text("profile_picture_url"),
        count("experience_count"),
        text("email"),
        text("telephone"),
        text("current_company_name"),
        text("current_company_industry"),
        text("current_company_subindustry"),
    ];
    columns.extend(audit_columns());

    TableSchema {
        name: "contacts",
        columns,
        indexed_columns: vec!["current_company_name"],
    }
}

pub fn companies_table() -> TableSchema {
    let mut columns = vec![
        id_column(),
        ColumnDefinition::new("company_id", "TEXT").unique(),
        ColumnDefinition::new("company_name", "TEXT").not_null().unique(),
        text("company_description"),
        text("company_industry"),
        text("company_subindustry"),
        text("company_size"),
        text("company_website_url"),
        text("headquarters_city"),
        text("headquarters_country"),
        count("employee_count"),
        text("revenue_bucket"),
        text("company_type"),
        text("logo_url"),
        text("linkedin_url"),
    ];
    columns.extend(audit_columns());

    TableSchema {
        name: "companies",
        columns,
        indexed_columns: vec![],
    }
}

pub fn experiences_table() -> TableSchema {
    let mut columns = vec![
        id_column(),
        contact_fk(),
        ColumnDefinition::new("company_id", "BIGINT")
            .not_null()
            .references("companies(id)"),
        text("title"),
        text("title_normalized"),
        text("department"),
        ColumnDefinition::new("date_from", "DATE"),
        ColumnDefinition::new("date_to", "DATE"),
        text("duration"),
        text("description"),
        text("location"),
        ColumnDefinition::new("is_current", "BOOLEAN").not_null().default("FALSE"),
        order_column(),
        text("job_category"),
        text("company_name"),
    ];
    columns.extend(audit_columns());

    TableSchema {
        name: "experiences",
        columns,
        indexed_columns: vec!["contact_id", "company_id"],
    }
}

fn child_table(name: &'static str, fields: Vec<ColumnDefinition>) -> TableSchema {
    let mut columns = vec![id_column(), contact_fk()];
    columns.extend(fields);
    columns.push(order_column());
    columns.extend(audit_columns());

    TableSchema {
        name,
        columns,
        indexed_columns: vec!["contact_id"],
    }
}

pub fn languages_table() -> TableSchema {
    child_table("contact_languages", vec![text("language"), text("proficiency")])
}

pub fn skills_table() -> TableSchema {
    child_table("contact_skills", vec![text("skill_name")])
}

pub fn interests_table() -> TableSchema {
    child_table("contact_interests", vec![text("interest_name")])
}

pub fn education_table() -> TableSchema {
    child_table(
        "contact_education",
        vec![
            text("institution"),
            text("degree"),
            text("field_of_study"),
            ColumnDefinition::new("start_date", "DATE"),
            ColumnDefinition::new("end_date", "DATE"),
        ],
    )
}

/// All tables in dependency order (referenced tables first)
pub fn all_tables() -> Vec<TableSchema> {
    vec![
        contacts_table(),
        companies_table(),
        experiences_table(),
        languages_table(),
        skills_table(),
        interests_table(),
        education_table(),
    ]
}

/// Create missing tables, columns and indexes (idempotent)
pub async fn initialize_schema(pool: &PgPool) -> Result<()> {
    for table in all_tables() {
        sqlx::query(&table.create_table_sql()).execute(pool).await?;

        for statement in table.add_column_statements() {
            sqlx::query(&statement).execute(pool).await?;
        }
        for statement in table.index_statements() {
            sqlx::query(&statement).execute(pool).await?;
        }

        debug!(table = table.name, "Table ready");
    }

    info!("Database schema initialized ({} tables)", all_tables().len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_sql() {
        let column = ColumnDefinition::new("contact_id", "BIGINT")
            .not_null()
            .references("contacts(id)")
            .cascade();
        assert_eq!(
            column.to_sql(),
            "contact_id BIGINT NOT NULL REFERENCES contacts(id) ON DELETE CASCADE"
        );

        assert_eq!(text("title").to_sql(), "title TEXT NOT NULL DEFAULT ''");
    }

    #[test]
    fn test_natural_keys_are_unique() {
        let contacts = contacts_table().create_table_sql();
        assert!(contacts.contains("lead_id TEXT NOT NULL UNIQUE"));

        let companies = companies_table().create_table_sql();
        assert!(companies.contains("company_id TEXT UNIQUE"));
        assert!(companies.contains("company_name TEXT NOT NULL UNIQUE"));
    }

    #[test]
    fn test_primary_key_is_not_re_added() {
        let statements = contacts_table().add_column_statements();
        assert!(statements.iter().all(|s| !s.contains("BIGSERIAL")));
        assert!(statements
            .iter()
            .any(|s| s == "ALTER TABLE contacts ADD COLUMN IF NOT EXISTS email TEXT NOT NULL DEFAULT ''"));
    }

    #[test]
    fn test_child_tables_reference_contacts() {
        for table in [languages_table(), skills_table(), interests_table(), education_table()] {
            let sql = table.create_table_sql();
            assert!(sql.contains("REFERENCES contacts(id) ON DELETE CASCADE"), "{}", table.name);
            assert!(sql.contains("order_in_profile INTEGER NOT NULL DEFAULT 0"));
        }
    }

    #[test]
    fn test_tables_are_ordered_by_dependency() {
        let names: Vec<&str> = all_tables().iter().map(|t| t.name).collect();
        assert_eq!(
            names,
            vec![
                "contacts",
                "companies",
                "experiences",
                "contact_languages",
                "contact_skills",
                "contact_interests",
                "contact_education"
            ]
        );
    }
}
