use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Raw answers for one set of language test results, borrowed from a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageAnswers<'a> {
    pub test: &'a str,
    pub speaking: &'a str,
    pub listening: &'a str,
    pub reading: &'a str,
    pub writing: &'a str,
}

/// Field names a questionnaire accepts. Anything else is rejected on deserialization.
pub trait ProfileFields {
    const FIELDS: &'static [&'static str];

    fn accepts(field: &str) -> bool {
        Self::FIELDS.contains(&field)
    }
}

/// Answers collected by the Comprehensive Ranking System questionnaire.
///
/// Every field is a raw string exactly as the form submitted it; blank means unanswered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CrsProfile {
    pub marital_status: String,
    pub spouse_citizen_or_pr: String,
    pub spouse_accompanying: String,
    pub age: String,
    pub education: String,
    pub canadian_credential: String,
    pub first_language_test: String,
    pub first_language_speaking: String,
    pub first_language_listening: String,
    pub first_language_reading: String,
    pub first_language_writing: String,
    pub second_language_test: String,
    pub second_language_speaking: String,
    pub second_language_listening: String,
    pub second_language_reading: String,
    pub second_language_writing: String,
    pub canadian_work_experience: String,
    pub foreign_work_experience: String,
    pub certificate_of_qualification: String,
    pub job_offer: String,
    pub provincial_nomination: String,
    pub sibling_in_canada: String,
    pub spouse_education: String,
    pub spouse_canadian_work_experience: String,
    pub spouse_language_test: String,
    pub spouse_language_speaking: String,
    pub spouse_language_listening: String,
    pub spouse_language_reading: String,
    pub spouse_language_writing: String,
}

impl ProfileFields for CrsProfile {
    const FIELDS: &'static [&'static str] = &[
        "marital_status",
        "spouse_citizen_or_pr",
        "spouse_accompanying",
        "age",
        "education",
        "canadian_credential",
        "first_language_test",
        "first_language_speaking",
        "first_language_listening",
        "first_language_reading",
        "first_language_writing",
        "second_language_test",
        "second_language_speaking",
        "second_language_listening",
        "second_language_reading",
        "second_language_writing",
        "canadian_work_experience",
        "foreign_work_experience",
        "certificate_of_qualification",
        "job_offer",
        "provincial_nomination",
        "sibling_in_canada",
        "spouse_education",
        "spouse_canadian_work_experience",
        "spouse_language_test",
        "spouse_language_speaking",
        "spouse_language_listening",
        "spouse_language_reading",
        "spouse_language_writing",
    ];
}

impl CrsProfile {
    pub fn first_language(&self) -> LanguageAnswers<'_> {
        LanguageAnswers {
            test: &self.first_language_test,
            speaking: &self.first_language_speaking,
            listening: &self.first_language_listening,
            reading: &self.first_language_reading,
            writing: &self.first_language_writing,
        }
    }

    pub fn second_language(&self) -> LanguageAnswers<'_> {
        LanguageAnswers {
            test: &self.second_language_test,
            speaking: &self.second_language_speaking,
            listening: &self.second_language_listening,
            reading: &self.second_language_reading,
            writing: &self.second_language_writing,
        }
    }

    pub fn spouse_language(&self) -> LanguageAnswers<'_> {
        LanguageAnswers {
            test: &self.spouse_language_test,
            speaking: &self.spouse_language_speaking,
            listening: &self.spouse_language_listening,
            reading: &self.spouse_language_reading,
            writing: &self.spouse_language_writing,
        }
    }
}

/// Answers collected by the Federal Skilled Worker six-factor questionnaire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FswpProfile {
    pub age: String,
    pub education: String,
    pub first_language_test: String,
    pub first_language_speaking: String,
    pub first_language_listening: String,
    pub first_language_reading: String,
    pub first_language_writing: String,
    pub second_language_test: String,
    pub second_language_speaking: String,
    pub second_language_listening: String,
    pub second_language_reading: String,
    pub second_language_writing: String,
    pub work_experience: String,
    pub arranged_employment: String,
    pub marital_status: String,
    pub spouse_citizen_or_pr: String,
    pub spouse_accompanying: String,
    pub spouse_language_test: String,
    pub spouse_language_speaking: String,
    pub spouse_language_listening: String,
    pub spouse_language_reading: String,
    pub spouse_language_writing: String,
    pub canadian_study: String,
    pub spouse_canadian_study: String,
    pub canadian_work: String,
    pub spouse_canadian_work: String,
    pub relative_in_canada: String,
}

impl ProfileFields for FswpProfile {
    const FIELDS: &'static [&'static str] = &[
        "age",
        "education",
        "first_language_test",
        "first_language_speaking",
        "first_language_listening",
        "first_language_reading",
        "first_language_writing",
        "second_language_test",
        "second_language_speaking",
        "second_language_listening",
        "second_language_reading",
        "second_language_writing",
        "work_experience",
        "arranged_employment",
        "marital_status",
        "spouse_citizen_or_pr",
        "spouse_accompanying",
        "spouse_language_test",
        "spouse_language_speaking",
        "spouse_language_listening",
        "spouse_language_reading",
        "spouse_language_writing",
        "canadian_study",
        "spouse_canadian_study",
        "canadian_work",
        "spouse_canadian_work",
        "relative_in_canada",
    ];
}

impl FswpProfile {
    pub fn first_language(&self) -> LanguageAnswers<'_> {
        LanguageAnswers {
            test: &self.first_language_test,
            speaking: &self.first_language_speaking,
            listening: &self.first_language_listening,
            reading: &self.first_language_reading,
            writing: &self.first_language_writing,
        }
    }

    pub fn second_language(&self) -> LanguageAnswers<'_> {
        LanguageAnswers {
            test: &self.second_language_test,
            speaking: &self.second_language_speaking,
            listening: &self.second_language_listening,
            reading: &self.second_language_reading,
            writing: &self.second_language_writing,
        }
    }

    pub fn spouse_language(&self) -> LanguageAnswers<'_> {
        LanguageAnswers {
            test: &self.spouse_language_test,
            speaking: &self.spouse_language_speaking,
            listening: &self.spouse_language_listening,
            reading: &self.spouse_language_reading,
            writing: &self.spouse_language_writing,
        }
    }
}

/// Completed years of age on `as_of`, or `None` when the birth date is in the future.
pub fn age_on(date_of_birth: NaiveDate, as_of: NaiveDate) -> Option<u32> {
    if date_of_birth > as_of {
        return None;
    }

    let mut years = as_of.year() - date_of_birth.year();
    if (as_of.month(), as_of.day()) < (date_of_birth.month(), date_of_birth.day()) {
        years -= 1;
    }
    u32::try_from(years).ok()
}
