//! Run counters and the end-of-run summary
//!
//! Counters are only touched by the single control flow of a run, so they
//! are plain fields without locking.

use colored::Colorize;
use std::fmt;
use uuid::Uuid;

/// Error messages kept for the summary; the count stays exact beyond it
pub const MAX_REPORTED_ERRORS: usize = 50;

/// Child row categories persisted per contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChildCategory {
    Experience,
    Language,
    Skill,
    Interest,
    Education,
}

impl ChildCategory {
    pub fn label(&self) -> &'static str {
        match self {
            ChildCategory::Experience => "experience",
            ChildCategory::Language => "language",
            ChildCategory::Skill => "skill",
            ChildCategory::Interest => "interest",
            ChildCategory::Education => "education",
        }
    }
}

impl fmt::Display for ChildCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Inserted / failed pair for one child category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryStats {
    pub inserted: usize,
    pub failed: usize,
}

impl CategoryStats {
    pub fn display_string(&self) -> String {
        format!("{} inserted, {} failed", self.inserted, self.failed)
    }
}

/// Counters for one import run
#[derive(Debug, Clone)]
pub struct ImportStats {
    pub run_id: Uuid,
    pub records_read: usize,

    pub contacts_created: usize,
    pub contacts_updated: usize,
    /// No usable lead_id, or the contact row could not be written
    pub contacts_skipped: usize,

    pub companies_created: usize,
    /// Store already held the company; left unmapped for this run
    pub companies_conflicted: usize,
    pub companies_failed: usize,

    /// Experiences excluded because their company did not resolve
    pub experiences_dropped: usize,

    pub experiences: CategoryStats,
    pub languages: CategoryStats,
    pub skills: CategoryStats,
    pub interests: CategoryStats,
    pub education: CategoryStats,

    pub total_errors: usize,
    pub errors: Vec<String>,
}

impl ImportStats {
    pub fn new(run_id: Uuid) -> Self {
        Self {
            run_id,
            records_read: 0,
            contacts_created: 0,
            contacts_updated: 0,
            contacts_skipped: 0,
            companies_created: 0,
            companies_conflicted: 0,
            companies_failed: 0,
            experiences_dropped: 0,
            experiences: CategoryStats::default(),
            languages: CategoryStats::default(),
            skills: CategoryStats::default(),
            interests: CategoryStats::default(),
            education: CategoryStats::default(),
            total_errors: 0,
            errors: Vec::new(),
        }
    }

    pub fn category(&self, category: ChildCategory) -> &CategoryStats {
        match category {
            ChildCategory::Experience => &self.experiences,
            ChildCategory::Language => &self.languages,
            ChildCategory::Skill => &self.skills,
            ChildCategory::Interest => &self.interests,
            ChildCategory::Education => &self.education,
        }
    }

    pub fn category_mut(&mut self, category: ChildCategory) -> &mut CategoryStats {
        match category {
            ChildCategory::Experience => &mut self.experiences,
            ChildCategory::Language => &mut self.languages,
            ChildCategory::Skill => &mut self.skills,
            ChildCategory::Interest => &mut self.interests,
            ChildCategory::Education => &mut self.education,
        }
    }

    pub fn record_error(&mut self, message: impl Into<String>) {
        self.total_errors += 1;
        if self.errors.len() < MAX_REPORTED_ERRORS {
            self.errors.push(message.into());
        }
    }

    pub fn record_child_failure(&mut self, category: ChildCategory, message: impl Into<String>) {
        self.category_mut(category).failed += 1;
        self.record_error(message);
    }

    /// Contacts whose row was written (created or updated)
    pub fn contacts_persisted(&self) -> usize {
        self.contacts_created + self.contacts_updated
    }

    pub fn display_string(&self) -> String {
        format!(
            "{} records: {} contacts created, {} updated, {} skipped; {} companies created; {} errors",
            self.records_read,
            self.contacts_created,
            self.contacts_updated,
            self.contacts_skipped,
            self.companies_created,
            self.total_errors
        )
    }

    /// Summary as plain lines (label, value)
    pub fn summary_rows(&self) -> Vec<(&'static str, String)> {
        let mut rows = vec![
            ("Records read", self.records_read.to_string()),
            ("Contacts created", self.contacts_created.to_string()),
            ("Contacts updated", self.contacts_updated.to_string()),
            ("Contacts skipped", self.contacts_skipped.to_string()),
            ("Companies created", self.companies_created.to_string()),
            ("Companies already present", self.companies_conflicted.to_string()),
            ("Companies failed", self.companies_failed.to_string()),
            ("Experiences dropped", self.experiences_dropped.to_string()),
        ];
        for category in [
            ChildCategory::Experience,
            ChildCategory::Language,
            ChildCategory::Skill,
            ChildCategory::Interest,
            ChildCategory::Education,
        ] {
            rows.push((category_heading(category), self.category(category).display_string()));
        }
        rows.push(("Errors", self.total_errors.to_string()));
        rows
    }

    /// Print the colored summary block to stdout
    pub fn print_summary(&self) {
        println!();
        println!("{}", format!("Import summary (run {})", self.run_id).bold());
        println!("{}", "=".repeat(48));

        print_count("Records read", self.records_read, Tone::Neutral);
        print_count("Contacts created", self.contacts_created, Tone::Success);
        print_count("Contacts updated", self.contacts_updated, Tone::Success);
        print_count("Contacts skipped", self.contacts_skipped, Tone::Skipped);
        print_count("Companies created", self.companies_created, Tone::Success);
        print_count("Companies already present", self.companies_conflicted, Tone::Skipped);
        print_count("Companies failed", self.companies_failed, Tone::Failure);
        print_count("Experiences dropped", self.experiences_dropped, Tone::Skipped);

        for category in [
            ChildCategory::Experience,
            ChildCategory::Language,
            ChildCategory::Skill,
            ChildCategory::Interest,
            ChildCategory::Education,
        ] {
            let counts = self.category(category);
            let failed = if counts.failed > 0 {
                format!("{} failed", counts.failed).red().to_string()
            } else {
                format!("{} failed", counts.failed)
            };
            println!(
                "  {:<28} {} inserted, {}",
                category_heading(category),
                counts.inserted.to_string().green(),
                failed
            );
        }

        print_count("Errors", self.total_errors, Tone::Failure);

        if !self.errors.is_empty() {
            println!();
            println!("{}", "Errors:".red().bold());
            for message in &self.errors {
                println!("  - {}", message);
            }
            if self.total_errors > self.errors.len() {
                println!(
                    "  ... and {} more",
                    self.total_errors - self.errors.len()
                );
            }
        }
    }
}

fn category_heading(category: ChildCategory) -> &'static str {
    match category {
        ChildCategory::Experience => "Experiences",
        ChildCategory::Language => "Languages",
        ChildCategory::Skill => "Skills",
        ChildCategory::Interest => "Interests",
        ChildCategory::Education => "Education",
    }
}

#[derive(Clone, Copy)]
enum Tone {
    Neutral,
    Success,
    Skipped,
    Failure,
}

fn print_count(label: &str, value: usize, tone: Tone) {
    let rendered = match tone {
        Tone::Success => value.to_string().green(),
        Tone::Skipped if value > 0 => value.to_string().yellow(),
        Tone::Failure if value > 0 => value.to_string().red(),
        _ => value.to_string().normal(),
    };
    println!("  {:<28} {}", label, rendered);
}

/// Counters for the company backfill run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackfillStats {
    pub scanned: usize,
    pub inserted: usize,
    pub already_present: usize,
    pub failed: usize,
}

impl BackfillStats {
    pub fn display_string(&self) -> String {
        format!(
            "{} companies scanned, {} inserted, {} already present, {} failed",
            self.scanned, self.inserted, self.already_present, self.failed
        )
    }

    pub fn print_summary(&self) {
        println!();
        println!("{}", "Company backfill summary".bold());
        println!("{}", "=".repeat(48));
        print_count("Snapshots scanned", self.scanned, Tone::Neutral);
        print_count("Companies inserted", self.inserted, Tone::Success);
        print_count("Already present", self.already_present, Tone::Skipped);
        print_count("Failed", self.failed, Tone::Failure);
    }
}
