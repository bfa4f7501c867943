//! Entity extraction: raw export record → normalized rows
//!
//! Pure mapping, no store access. Child rows need the contact's surrogate
//! key, so they are extracted after the contact has been persisted.

use crate::dedup::ResolvedCompanies;
use crate::models::{
    CompanyKey, CompanyRecord, ContactRecord, EducationRecord, ExperienceRecord, InterestRecord,
    LanguageRecord, RawContact, RawExperience, RawNamed, RowId, SkillRecord,
};
use crate::normalize::{is_current_position, normalize_date, parse_timestamp, years_of_experience};

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

/// Explicit order when positive, otherwise the 1-based position
fn profile_order(explicit: Option<i64>, index: usize) -> i32 {
    explicit
        .filter(|order| *order != 0)
        .and_then(|order| i32::try_from(order).ok())
        .unwrap_or_else(|| position(index))
}

fn position(index: usize) -> i32 {
    i32::try_from(index + 1).unwrap_or(i32::MAX)
}

/// Contact attributes, or `None` when the record has no usable `lead_id`
pub fn extract_contact(raw: &RawContact) -> Option<ContactRecord> {
    let lead_id = raw.lead_id.as_deref().map(str::trim).filter(|id| !id.is_empty())?;

    let current_title_normalized = raw
        .experiences
        .first()
        .and_then(|exp| {
            exp.title_normalized
                .as_deref()
                .filter(|t| !t.is_empty())
                .or(exp.title.as_deref())
        })
        .unwrap_or_default()
        .to_string();

    Some(ContactRecord {
        lead_id: lead_id.to_string(),
        full_name: text(&raw.full_name),
        headline: text(&raw.headline),
        summary: text(&raw.summary),
        location: text(&raw.location),
        country: text(&raw.country),
        connections_count: raw.connections_count.unwrap_or(0),
        connections_count_bucket: text(&raw.connections_count_bucket),
        lead_quality_score: raw.lead_quality_score.unwrap_or(0.0),
        linkedin_url: text(&raw.lead_linkedin_url),
        linkedin_short: text(&raw.linkedin_short),
        years_of_experience: years_of_experience(raw.years_of_exp_bucket.as_deref()),
        department: text(&raw.department),
        current_title_normalized,
        canonical_shorthand_name: text(&raw.canonical_shorthand_name),
        profile_picture_url: text(&raw.lead_logo_url),
        experience_count: raw.experience_count.unwrap_or(0),
        email: text(&raw.email),
        telephone: text(&raw.telephone),
        current_company_name: text(&raw.current_exp_company_name),
        current_company_industry: text(&raw.current_exp_company_industry),
        current_company_subindustry: text(&raw.current_exp_company_subindustry),
        source_created_at: parse_timestamp(raw.created_at.as_deref()),
        source_updated_at: parse_timestamp(raw.updated_at.as_deref()),
    })
}

/// Company snapshot embedded in an experience; requires a company name
pub fn extract_company(exp: &RawExperience) -> Option<CompanyRecord> {
    let company_name = exp.company_name.as_deref().filter(|name| !name.trim().is_empty())?;

    Some(CompanyRecord {
        company_id: exp
            .company_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string),
        company_name: company_name.to_string(),
        description: text(&exp.company_description),
        industry: text(&exp.company_industry),
        subindustry: text(&exp.company_subindustry),
        size: text(&exp.company_size),
        website_url: text(&exp.company_website_url),
        headquarters_city: text(&exp.company_headquarters_city),
        headquarters_country: text(&exp.company_headquarters_country),
        employee_count: exp.company_employee_count.unwrap_or(0),
        revenue_bucket: text(&exp.revenue_bucket),
        company_type: text(&exp.company_type),
        logo_url: text(&exp.company_logo_url),
        linkedin_url: text(&exp.company_linkedin_url),
        source_created_at: parse_timestamp(exp.created_at.as_deref()),
        source_updated_at: parse_timestamp(exp.updated_at.as_deref()),
    })
}

/// Identity key of the company an experience points at
pub fn experience_company_key(exp: &RawExperience) -> Option<CompanyKey> {
    CompanyKey::from_parts(exp.company_id.as_deref(), exp.company_name.as_deref())
}

/// Companies referenced by a contact's work history, in profile order
///
/// The record is `None` when the experience carries an id but no name: such
/// a company can be matched but never created.
pub fn referenced_companies(raw: &RawContact) -> Vec<(CompanyKey, Option<CompanyRecord>)> {
    raw.experiences
        .iter()
        .filter_map(|exp| experience_company_key(exp).map(|key| (key, extract_company(exp))))
        .collect()
}

/// Experiences whose company resolved
///
/// Entries without a resolved company are excluded; the second element is
/// how many were dropped that way.
pub fn extract_experiences(
    raw: &RawContact,
    contact_id: RowId,
    companies: &ResolvedCompanies,
) -> (Vec<ExperienceRecord>, usize) {
    let mut kept = Vec::with_capacity(raw.experiences.len());
    let mut dropped = 0;

    for (index, exp) in raw.experiences.iter().enumerate() {
        let company_id = experience_company_key(exp).and_then(|key| companies.get(&key).copied());
        let Some(company_id) = company_id else {
            dropped += 1;
            continue;
        };

        kept.push(ExperienceRecord {
            contact_id,
            company_id,
            title: text(&exp.title),
            title_normalized: text(&exp.title_normalized),
            department: text(&exp.department),
            date_from: normalize_date(exp.date_from.as_deref()),
            date_to: normalize_date(exp.date_to.as_deref()),
            duration: text(&exp.duration),
            description: text(&exp.description),
            location: text(&exp.location),
            is_current: is_current_position(exp.date_to.as_deref()),
            order_in_profile: profile_order(exp.order_in_profile, index),
            job_category: text(&exp.job_category),
            company_name: text(&exp.company_name),
            source_created_at: parse_timestamp(exp.created_at.as_deref()),
            source_updated_at: parse_timestamp(exp.updated_at.as_deref()),
        });
    }

    (kept, dropped)
}

pub fn extract_languages(raw: &RawContact, contact_id: RowId) -> Vec<LanguageRecord> {
    raw.languages
        .iter()
        .enumerate()
        .map(|(index, lang)| LanguageRecord {
            contact_id,
            language: text(&lang.language),
            proficiency: text(&lang.proficiency),
            order_in_profile: profile_order(lang.order_in_profile, index),
            source_created_at: parse_timestamp(lang.created_at.as_deref()),
            source_updated_at: parse_timestamp(lang.updated_at.as_deref()),
        })
        .collect()
}

/// Named entries with their 1-based position; nameless entries are skipped
/// but still occupy their slot
fn named_entries<'a>(
    entries: &'a [RawNamed],
) -> impl Iterator<Item = (i32, &'a str, &'a RawNamed)> + 'a {
    entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| entry.name().map(|name| (position(index), name, entry)))
}

pub fn extract_skills(raw: &RawContact, contact_id: RowId) -> Vec<SkillRecord> {
    named_entries(&raw.skills)
        .map(|(order, name, entry)| SkillRecord {
            contact_id,
            skill_name: name.to_string(),
            order_in_profile: order,
            source_created_at: parse_timestamp(entry.created_at()),
            source_updated_at: parse_timestamp(entry.updated_at()),
        })
        .collect()
}

pub fn extract_interests(raw: &RawContact, contact_id: RowId) -> Vec<InterestRecord> {
    named_entries(&raw.interests)
        .map(|(order, name, entry)| InterestRecord {
            contact_id,
            interest_name: name.to_string(),
            order_in_profile: order,
            source_created_at: parse_timestamp(entry.created_at()),
            source_updated_at: parse_timestamp(entry.updated_at()),
        })
        .collect()
}

pub fn extract_education(raw: &RawContact, contact_id: RowId) -> Vec<EducationRecord> {
    raw.education
        .iter()
        .enumerate()
        .map(|(index, edu)| EducationRecord {
            contact_id,
            institution: text(&edu.institution),
            degree: text(&edu.degree),
            field_of_study: text(&edu.field_of_study),
            start_date: normalize_date(edu.start_date.as_deref()),
            end_date: normalize_date(edu.end_date.as_deref()),
            order_in_profile: position(index),
            source_created_at: parse_timestamp(edu.created_at.as_deref()),
            source_updated_at: parse_timestamp(edu.updated_at.as_deref()),
        })
        .collect()
}
