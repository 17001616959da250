//! Turns raw questionnaire answers into typed, dependency-resolved profiles.
//!
//! Blank answers are unanswered and score zero. Answers that a previous question made
//! irrelevant (second-language scores with no second test, spouse answers for a single
//! applicant) are dropped without being parsed, so stale form state never leaks into a score.
//! Anything else outside the option tables is rejected.

use super::options::{
    parse_option, Answer, CanadianCredential, CanadianExperience, EducationLevel,
    ForeignExperience, JobOffer, LanguageFamily, LanguageTest, MaritalStatus, OptionSet,
    SkilledExperience, NO_TEST_SENTINELS,
};
use super::profile::{CrsProfile, FswpProfile, LanguageAnswers};
use super::tables::{table_for, Clb, Household, Skill};
use tracing::debug;

/// Validation failures raised while normalizing a profile.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    #[error("{field}: '{value}' is not a recognized option (expected one of: {expected})")]
    UnrecognizedOption {
        field: &'static str,
        value: String,
        expected: String,
    },
    #[error("{field}: '{value}' is not a valid {test} score")]
    InvalidTestScore {
        field: &'static str,
        test: &'static str,
        value: String,
    },
    #[error("{field}: '{value}' is not a valid age in years")]
    InvalidAge { field: &'static str, value: String },
}

impl ProfileError {
    /// Profile field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            ProfileError::UnrecognizedOption { field, .. }
            | ProfileError::InvalidTestScore { field, .. }
            | ProfileError::InvalidAge { field, .. } => field,
        }
    }
}

const MAX_AGE: u8 = 120;

struct LanguageFields {
    test: &'static str,
    speaking: &'static str,
    listening: &'static str,
    reading: &'static str,
    writing: &'static str,
}

impl LanguageFields {
    fn skill(&self, skill: Skill) -> &'static str {
        match skill {
            Skill::Speaking => self.speaking,
            Skill::Listening => self.listening,
            Skill::Reading => self.reading,
            Skill::Writing => self.writing,
        }
    }
}

const FIRST_LANGUAGE: LanguageFields = LanguageFields {
    test: "first_language_test",
    speaking: "first_language_speaking",
    listening: "first_language_listening",
    reading: "first_language_reading",
    writing: "first_language_writing",
};

const SECOND_LANGUAGE: LanguageFields = LanguageFields {
    test: "second_language_test",
    speaking: "second_language_speaking",
    listening: "second_language_listening",
    reading: "second_language_reading",
    writing: "second_language_writing",
};

const SPOUSE_LANGUAGE: LanguageFields = LanguageFields {
    test: "spouse_language_test",
    speaking: "spouse_language_speaking",
    listening: "spouse_language_listening",
    reading: "spouse_language_reading",
    writing: "spouse_language_writing",
};

/// Per-skill CLB levels; `None` is an unanswered skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SkillLevels {
    pub speaking: Option<Clb>,
    pub listening: Option<Clb>,
    pub reading: Option<Clb>,
    pub writing: Option<Clb>,
}

impl SkillLevels {
    pub fn get(&self, skill: Skill) -> Option<Clb> {
        match skill {
            Skill::Speaking => self.speaking,
            Skill::Listening => self.listening,
            Skill::Reading => self.reading,
            Skill::Writing => self.writing,
        }
    }

    fn set(&mut self, skill: Skill, level: Option<Clb>) {
        match skill {
            Skill::Speaking => self.speaking = level,
            Skill::Listening => self.listening = level,
            Skill::Reading => self.reading = level,
            Skill::Writing => self.writing = level,
        }
    }

    /// Lowest level across the four skills, counting unanswered skills as below CLB 4.
    pub fn minimum(&self) -> Clb {
        Skill::ALL
            .iter()
            .map(|skill| self.get(*skill).unwrap_or(Clb::BELOW_FOUR))
            .min()
            .unwrap_or(Clb::BELOW_FOUR)
    }

    pub fn all_at_least(&self, floor: Clb) -> bool {
        self.minimum() >= floor
    }
}

/// Results of one language test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageResult {
    pub test: LanguageTest,
    pub levels: SkillLevels,
}

impl LanguageResult {
    pub fn family(&self) -> LanguageFamily {
        self.test.family()
    }
}

/// Spouse answers that survive the accompanying-spouse checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CrsSpouse {
    pub education: Option<EducationLevel>,
    pub canadian_work: Option<CanadianExperience>,
    pub language: Option<LanguageResult>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedCrsProfile {
    pub household: Household,
    pub age: Option<u8>,
    pub education: Option<EducationLevel>,
    pub canadian_credential: Option<CanadianCredential>,
    pub first_language: Option<LanguageResult>,
    pub second_language: Option<LanguageResult>,
    pub canadian_work: Option<CanadianExperience>,
    pub foreign_work: Option<ForeignExperience>,
    pub certificate_of_qualification: bool,
    pub job_offer: Option<JobOffer>,
    pub provincial_nomination: bool,
    pub sibling_in_canada: bool,
    pub spouse: Option<CrsSpouse>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FswpSpouse {
    pub language: Option<LanguageResult>,
    pub canadian_study: bool,
    pub canadian_work: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedFswpProfile {
    pub age: Option<u8>,
    pub education: Option<EducationLevel>,
    pub first_language: Option<LanguageResult>,
    pub second_language: Option<LanguageResult>,
    pub experience: Option<SkilledExperience>,
    pub arranged_employment: bool,
    pub canadian_study: bool,
    pub canadian_work: bool,
    pub relative_in_canada: bool,
    pub spouse: Option<FswpSpouse>,
}

/// Resolve conditional answers and parse every contributing field of a CRS profile.
pub fn normalize_crs(profile: &CrsProfile) -> Result<NormalizedCrsProfile, ProfileError> {
    let accompanying = accompanying_spouse(
        &profile.marital_status,
        &profile.spouse_citizen_or_pr,
        &profile.spouse_accompanying,
    )?;

    let (first_language, second_language) =
        official_languages(profile.first_language(), profile.second_language())?;

    let spouse = if accompanying {
        Some(CrsSpouse {
            education: parse_option("spouse_education", &profile.spouse_education)?,
            canadian_work: parse_option(
                "spouse_canadian_work_experience",
                &profile.spouse_canadian_work_experience,
            )?,
            language: language_result(&SPOUSE_LANGUAGE, profile.spouse_language())?,
        })
    } else {
        None
    };

    Ok(NormalizedCrsProfile {
        household: if spouse.is_some() {
            Household::WithSpouse
        } else {
            Household::WithoutSpouse
        },
        age: parse_age("age", &profile.age)?,
        education: parse_option("education", &profile.education)?,
        canadian_credential: parse_option("canadian_credential", &profile.canadian_credential)?,
        first_language,
        second_language,
        canadian_work: parse_option(
            "canadian_work_experience",
            &profile.canadian_work_experience,
        )?,
        foreign_work: parse_option("foreign_work_experience", &profile.foreign_work_experience)?,
        certificate_of_qualification: is_yes(
            "certificate_of_qualification",
            &profile.certificate_of_qualification,
        )?,
        job_offer: parse_option("job_offer", &profile.job_offer)?,
        provincial_nomination: is_yes("provincial_nomination", &profile.provincial_nomination)?,
        sibling_in_canada: is_yes("sibling_in_canada", &profile.sibling_in_canada)?,
        spouse,
    })
}

/// Resolve conditional answers and parse every contributing field of an FSWP profile.
pub fn normalize_fswp(profile: &FswpProfile) -> Result<NormalizedFswpProfile, ProfileError> {
    let accompanying = accompanying_spouse(
        &profile.marital_status,
        &profile.spouse_citizen_or_pr,
        &profile.spouse_accompanying,
    )?;

    let (first_language, second_language) =
        official_languages(profile.first_language(), profile.second_language())?;

    let spouse = if accompanying {
        Some(FswpSpouse {
            language: language_result(&SPOUSE_LANGUAGE, profile.spouse_language())?,
            canadian_study: is_yes("spouse_canadian_study", &profile.spouse_canadian_study)?,
            canadian_work: is_yes("spouse_canadian_work", &profile.spouse_canadian_work)?,
        })
    } else {
        None
    };

    Ok(NormalizedFswpProfile {
        age: parse_age("age", &profile.age)?,
        education: parse_option("education", &profile.education)?,
        first_language,
        second_language,
        experience: parse_option("work_experience", &profile.work_experience)?,
        arranged_employment: is_yes("arranged_employment", &profile.arranged_employment)?,
        canadian_study: is_yes("canadian_study", &profile.canadian_study)?,
        canadian_work: is_yes("canadian_work", &profile.canadian_work)?,
        relative_in_canada: is_yes("relative_in_canada", &profile.relative_in_canada)?,
        spouse,
    })
}

/// A spouse only counts when married or common-law, not a citizen/PR, and accompanying.
fn accompanying_spouse(
    marital_status: &str,
    citizen_or_pr: &str,
    accompanying: &str,
) -> Result<bool, ProfileError> {
    let status = parse_option::<MaritalStatus>("marital_status", marital_status)?;
    if !status.is_some_and(MaritalStatus::has_partner) {
        return Ok(false);
    }

    if is_yes("spouse_citizen_or_pr", citizen_or_pr)? {
        return Ok(false);
    }

    is_yes("spouse_accompanying", accompanying)
}

/// Parse both official languages. The second only counts alongside a first test of the
/// other language family; a same-family second test is treated as a leftover answer.
fn official_languages(
    first: LanguageAnswers<'_>,
    second: LanguageAnswers<'_>,
) -> Result<(Option<LanguageResult>, Option<LanguageResult>), ProfileError> {
    let first = language_result(&FIRST_LANGUAGE, first)?;
    let Some(first) = first else {
        return Ok((None, None));
    };

    let Some(second_test) = language_test(&SECOND_LANGUAGE, second.test)? else {
        return Ok((Some(first), None));
    };
    if second_test.family() == first.family() {
        debug!(
            first = first.test.id(),
            second = second_test.id(),
            "ignoring second language test from the first test's family"
        );
        return Ok((Some(first), None));
    }

    let second = language_scores(&SECOND_LANGUAGE, second_test, second)?;
    Ok((Some(first), Some(second)))
}

fn language_result(
    fields: &LanguageFields,
    answers: LanguageAnswers<'_>,
) -> Result<Option<LanguageResult>, ProfileError> {
    match language_test(fields, answers.test)? {
        Some(test) => language_scores(fields, test, answers).map(Some),
        None => Ok(None),
    }
}

/// The chosen test, or `None` when blank or a "no test" sentinel.
fn language_test(
    fields: &LanguageFields,
    raw: &str,
) -> Result<Option<LanguageTest>, ProfileError> {
    let test_answer = raw.trim();
    if NO_TEST_SENTINELS
        .iter()
        .any(|sentinel| sentinel.eq_ignore_ascii_case(test_answer))
    {
        return Ok(None);
    }

    parse_option::<LanguageTest>(fields.test, test_answer)
}

fn language_scores(
    fields: &LanguageFields,
    test: LanguageTest,
    answers: LanguageAnswers<'_>,
) -> Result<LanguageResult, ProfileError> {
    let table = table_for(test);
    let mut levels = SkillLevels::default();
    for skill in Skill::ALL {
        let raw = match skill {
            Skill::Speaking => answers.speaking,
            Skill::Listening => answers.listening,
            Skill::Reading => answers.reading,
            Skill::Writing => answers.writing,
        }
        .trim();
        if raw.is_empty() {
            continue;
        }

        let level = table
            .clb_for(skill, raw)
            .ok_or_else(|| ProfileError::InvalidTestScore {
                field: fields.skill(skill),
                test: test.label(),
                value: raw.to_string(),
            })?;
        levels.set(skill, Some(level));
    }

    Ok(LanguageResult { test, levels })
}

fn parse_age(field: &'static str, raw: &str) -> Result<Option<u8>, ProfileError> {
    let value = raw.trim();
    if value.is_empty() {
        return Ok(None);
    }

    value
        .parse::<u8>()
        .ok()
        .filter(|age| *age <= MAX_AGE)
        .map(Some)
        .ok_or_else(|| ProfileError::InvalidAge {
            field,
            value: value.to_string(),
        })
}

fn is_yes(field: &'static str, raw: &str) -> Result<bool, ProfileError> {
    Ok(parse_option::<Answer>(field, raw)?.is_some_and(Answer::is_yes))
}
