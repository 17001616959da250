//! Closed option sets accepted by the profile normalizer.
//!
//! Every select-style answer in an applicant profile resolves to one of these enums. The
//! identifiers double as the values UIs must submit, so `catalog()` exposes them verbatim.

use serde::Serialize;

use super::normalizer::ProfileError;

/// Shared behaviour for enumerated profile answers.
pub trait OptionSet: Copy + Sized + 'static {
    /// Human readable name of the option set, used in catalog output.
    const KIND: &'static str;
    const ALL: &'static [Self];

    fn id(self) -> &'static str;
    fn label(self) -> &'static str;

    fn from_id(raw: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|option| option.id().eq_ignore_ascii_case(raw))
    }
}

/// Parse an answer, treating blank input as unanswered.
pub(crate) fn parse_option<T: OptionSet>(
    field: &'static str,
    raw: &str,
) -> Result<Option<T>, ProfileError> {
    let value = raw.trim();
    if value.is_empty() {
        return Ok(None);
    }

    T::from_id(value)
        .map(Some)
        .ok_or_else(|| ProfileError::UnrecognizedOption {
            field,
            value: value.to_string(),
            expected: T::ALL
                .iter()
                .map(|option| option.id())
                .collect::<Vec<_>>()
                .join(", "),
        })
}

/// Identifiers meaning "no test taken" for optional language tests.
pub(crate) const NO_TEST_SENTINELS: &[&str] = &["none", "not-applicable", "n/a"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageTest {
    Celpip,
    Ielts,
    Pte,
    Tef,
    Tcf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageFamily {
    English,
    French,
}

impl LanguageTest {
    pub const fn family(self) -> LanguageFamily {
        match self {
            LanguageTest::Celpip | LanguageTest::Ielts | LanguageTest::Pte => {
                LanguageFamily::English
            }
            LanguageTest::Tef | LanguageTest::Tcf => LanguageFamily::French,
        }
    }
}

impl OptionSet for LanguageTest {
    const KIND: &'static str = "language_test";
    const ALL: &'static [Self] = &[
        LanguageTest::Celpip,
        LanguageTest::Ielts,
        LanguageTest::Pte,
        LanguageTest::Tef,
        LanguageTest::Tcf,
    ];

    fn id(self) -> &'static str {
        match self {
            LanguageTest::Celpip => "celpip",
            LanguageTest::Ielts => "ielts",
            LanguageTest::Pte => "pte",
            LanguageTest::Tef => "tef",
            LanguageTest::Tcf => "tcf",
        }
    }

    fn label(self) -> &'static str {
        match self {
            LanguageTest::Celpip => "CELPIP-G",
            LanguageTest::Ielts => "IELTS General Training",
            LanguageTest::Pte => "PTE Core",
            LanguageTest::Tef => "TEF Canada",
            LanguageTest::Tcf => "TCF Canada",
        }
    }
}

/// Highest completed (or assessed-equivalent) credential, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EducationLevel {
    LessThanSecondary,
    Secondary,
    OneYear,
    TwoYear,
    Bachelors,
    TwoOrMore,
    Masters,
    Doctoral,
}

impl EducationLevel {
    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl OptionSet for EducationLevel {
    const KIND: &'static str = "education_level";
    const ALL: &'static [Self] = &[
        EducationLevel::LessThanSecondary,
        EducationLevel::Secondary,
        EducationLevel::OneYear,
        EducationLevel::TwoYear,
        EducationLevel::Bachelors,
        EducationLevel::TwoOrMore,
        EducationLevel::Masters,
        EducationLevel::Doctoral,
    ];

    fn id(self) -> &'static str {
        match self {
            EducationLevel::LessThanSecondary => "less-than-secondary",
            EducationLevel::Secondary => "secondary",
            EducationLevel::OneYear => "one-year",
            EducationLevel::TwoYear => "two-year",
            EducationLevel::Bachelors => "bachelors",
            EducationLevel::TwoOrMore => "two-or-more",
            EducationLevel::Masters => "masters",
            EducationLevel::Doctoral => "doctoral",
        }
    }

    fn label(self) -> &'static str {
        match self {
            EducationLevel::LessThanSecondary => "Less than secondary school (high school)",
            EducationLevel::Secondary => "Secondary diploma (high school graduation)",
            EducationLevel::OneYear => "One-year program at a university, college or trade school",
            EducationLevel::TwoYear => "Two-year program at a university, college or trade school",
            EducationLevel::Bachelors => "Bachelor's degree or a program of three or more years",
            EducationLevel::TwoOrMore => {
                "Two or more certificates, diplomas or degrees, one of three or more years"
            }
            EducationLevel::Masters => "Master's degree or professional degree",
            EducationLevel::Doctoral => "Doctoral level university degree (PhD)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaritalStatus {
    Single,
    Married,
    CommonLaw,
    Divorced,
    Separated,
    Widowed,
    Annulled,
}

impl MaritalStatus {
    pub const fn has_partner(self) -> bool {
        matches!(self, MaritalStatus::Married | MaritalStatus::CommonLaw)
    }
}

impl OptionSet for MaritalStatus {
    const KIND: &'static str = "marital_status";
    const ALL: &'static [Self] = &[
        MaritalStatus::Single,
        MaritalStatus::Married,
        MaritalStatus::CommonLaw,
        MaritalStatus::Divorced,
        MaritalStatus::Separated,
        MaritalStatus::Widowed,
        MaritalStatus::Annulled,
    ];

    fn id(self) -> &'static str {
        match self {
            MaritalStatus::Single => "single",
            MaritalStatus::Married => "married",
            MaritalStatus::CommonLaw => "common-law",
            MaritalStatus::Divorced => "divorced",
            MaritalStatus::Separated => "separated",
            MaritalStatus::Widowed => "widowed",
            MaritalStatus::Annulled => "annulled",
        }
    }

    fn label(self) -> &'static str {
        match self {
            MaritalStatus::Single => "Never married / single",
            MaritalStatus::Married => "Married",
            MaritalStatus::CommonLaw => "Common-law",
            MaritalStatus::Divorced => "Divorced",
            MaritalStatus::Separated => "Legally separated",
            MaritalStatus::Widowed => "Widowed",
            MaritalStatus::Annulled => "Annulled marriage",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Answer {
    Yes,
    No,
}

impl Answer {
    pub const fn is_yes(self) -> bool {
        matches!(self, Answer::Yes)
    }
}

impl OptionSet for Answer {
    const KIND: &'static str = "answer";
    const ALL: &'static [Self] = &[Answer::Yes, Answer::No];

    fn id(self) -> &'static str {
        match self {
            Answer::Yes => "yes",
            Answer::No => "no",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Answer::Yes => "Yes",
            Answer::No => "No",
        }
    }
}

/// Skilled work experience in Canada within the last ten years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CanadianExperience {
    None,
    OneYear,
    TwoYears,
    ThreeYears,
    FourYears,
    FiveOrMore,
}

impl CanadianExperience {
    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl OptionSet for CanadianExperience {
    const KIND: &'static str = "canadian_experience";
    const ALL: &'static [Self] = &[
        CanadianExperience::None,
        CanadianExperience::OneYear,
        CanadianExperience::TwoYears,
        CanadianExperience::ThreeYears,
        CanadianExperience::FourYears,
        CanadianExperience::FiveOrMore,
    ];

    fn id(self) -> &'static str {
        match self {
            CanadianExperience::None => "none",
            CanadianExperience::OneYear => "1",
            CanadianExperience::TwoYears => "2",
            CanadianExperience::ThreeYears => "3",
            CanadianExperience::FourYears => "4",
            CanadianExperience::FiveOrMore => "5+",
        }
    }

    fn label(self) -> &'static str {
        match self {
            CanadianExperience::None => "None or less than a year",
            CanadianExperience::OneYear => "1 year",
            CanadianExperience::TwoYears => "2 years",
            CanadianExperience::ThreeYears => "3 years",
            CanadianExperience::FourYears => "4 years",
            CanadianExperience::FiveOrMore => "5 years or more",
        }
    }
}

/// Foreign skilled work experience, as banded by the CRS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ForeignExperience {
    None,
    OneYear,
    TwoYears,
    ThreeOrMore,
}

impl OptionSet for ForeignExperience {
    const KIND: &'static str = "foreign_experience";
    const ALL: &'static [Self] = &[
        ForeignExperience::None,
        ForeignExperience::OneYear,
        ForeignExperience::TwoYears,
        ForeignExperience::ThreeOrMore,
    ];

    fn id(self) -> &'static str {
        match self {
            ForeignExperience::None => "none",
            ForeignExperience::OneYear => "1",
            ForeignExperience::TwoYears => "2",
            ForeignExperience::ThreeOrMore => "3+",
        }
    }

    fn label(self) -> &'static str {
        match self {
            ForeignExperience::None => "None or less than a year",
            ForeignExperience::OneYear => "1 year",
            ForeignExperience::TwoYears => "2 years",
            ForeignExperience::ThreeOrMore => "3 years or more",
        }
    }
}

/// Skilled work experience bands used by the FSWP selection grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SkilledExperience {
    None,
    OneYear,
    TwoToThree,
    FourToFive,
    SixOrMore,
}

impl SkilledExperience {
    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl OptionSet for SkilledExperience {
    const KIND: &'static str = "skilled_experience";
    const ALL: &'static [Self] = &[
        SkilledExperience::None,
        SkilledExperience::OneYear,
        SkilledExperience::TwoToThree,
        SkilledExperience::FourToFive,
        SkilledExperience::SixOrMore,
    ];

    fn id(self) -> &'static str {
        match self {
            SkilledExperience::None => "none",
            SkilledExperience::OneYear => "1",
            SkilledExperience::TwoToThree => "2-3",
            SkilledExperience::FourToFive => "4-5",
            SkilledExperience::SixOrMore => "6+",
        }
    }

    fn label(self) -> &'static str {
        match self {
            SkilledExperience::None => "Less than a year",
            SkilledExperience::OneYear => "1 year",
            SkilledExperience::TwoToThree => "2-3 years",
            SkilledExperience::FourToFive => "4-5 years",
            SkilledExperience::SixOrMore => "6 years or more",
        }
    }
}

/// Credential earned in Canada, counted by the CRS additional points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CanadianCredential {
    SecondaryOrLess,
    OneOrTwoYear,
    ThreeYearOrLonger,
}

impl OptionSet for CanadianCredential {
    const KIND: &'static str = "canadian_credential";
    const ALL: &'static [Self] = &[
        CanadianCredential::SecondaryOrLess,
        CanadianCredential::OneOrTwoYear,
        CanadianCredential::ThreeYearOrLonger,
    ];

    fn id(self) -> &'static str {
        match self {
            CanadianCredential::SecondaryOrLess => "secondary-or-less",
            CanadianCredential::OneOrTwoYear => "one-or-two-year",
            CanadianCredential::ThreeYearOrLonger => "three-year-or-longer",
        }
    }

    fn label(self) -> &'static str {
        match self {
            CanadianCredential::SecondaryOrLess => "Secondary (high school) or less",
            CanadianCredential::OneOrTwoYear => "One- or two-year diploma or certificate",
            CanadianCredential::ThreeYearOrLonger => {
                "Degree, diploma or certificate of three years or longer, or a graduate degree"
            }
        }
    }
}

/// Qualifying job offer, classified by occupation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum JobOffer {
    None,
    SeniorManagement,
    Skilled,
}

impl OptionSet for JobOffer {
    const KIND: &'static str = "job_offer";
    const ALL: &'static [Self] = &[JobOffer::None, JobOffer::SeniorManagement, JobOffer::Skilled];

    fn id(self) -> &'static str {
        match self {
            JobOffer::None => "none",
            JobOffer::SeniorManagement => "teer-0-major-group-00",
            JobOffer::Skilled => "teer-0-1-2-3",
        }
    }

    fn label(self) -> &'static str {
        match self {
            JobOffer::None => "No qualifying job offer",
            JobOffer::SeniorManagement => "NOC TEER 0, major group 00",
            JobOffer::Skilled => "NOC TEER 0, 1, 2 or 3 (any other)",
        }
    }
}

/// One option as exposed to UIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionView {
    pub id: &'static str,
    pub label: &'static str,
}

/// All options for a single option set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionCatalogEntry {
    pub kind: &'static str,
    pub options: Vec<OptionView>,
}

fn entry<T: OptionSet>() -> OptionCatalogEntry {
    OptionCatalogEntry {
        kind: T::KIND,
        options: T::ALL
            .iter()
            .map(|option| OptionView {
                id: option.id(),
                label: option.label(),
            })
            .collect(),
    }
}

/// Every option set the engine understands, in a stable order.
pub fn catalog() -> Vec<OptionCatalogEntry> {
    vec![
        entry::<LanguageTest>(),
        entry::<EducationLevel>(),
        entry::<MaritalStatus>(),
        entry::<Answer>(),
        entry::<CanadianExperience>(),
        entry::<ForeignExperience>(),
        entry::<SkilledExperience>(),
        entry::<CanadianCredential>(),
        entry::<JobOffer>(),
    ]
}
