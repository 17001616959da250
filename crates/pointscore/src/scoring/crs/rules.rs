use super::super::breakdown::{
    AdditionalBreakdown, CoreBreakdown, LanguageScore, PairingGroup, SpouseBreakdown,
    TransferabilityBreakdown,
};
use super::super::normalizer::{LanguageResult, NormalizedCrsProfile};
use super::super::options::{
    CanadianCredential, CanadianExperience, EducationLevel, ForeignExperience, JobOffer,
    LanguageFamily,
};
use super::super::tables::{Clb, CrsSchedule, PairingGrid};

/// How strong the credential side of a pairing is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Credential {
    Missing,
    Single,
    Advanced,
}

/// How strong the partner side (language or Canadian work) of a pairing is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tier {
    Missing,
    Mid,
    High,
}

pub(crate) fn core_factors(profile: &NormalizedCrsProfile, schedule: &CrsSchedule) -> CoreBreakdown {
    let household = profile.household;
    let mut core = CoreBreakdown {
        age: profile
            .age
            .map(|age| schedule.age_points(age, household))
            .unwrap_or(0),
        education: profile
            .education
            .map(|level| schedule.education[level.index()].for_household(household))
            .unwrap_or(0),
        language: LanguageScore::from_result(profile.first_language.as_ref(), None, |clb| {
            schedule.first_language[clb.index()].for_household(household)
        }),
        second_language: LanguageScore::from_result(
            profile.second_language.as_ref(),
            Some(schedule.second_language_cap.for_household(household)),
            |clb| schedule.second_language[clb.index()],
        ),
        canadian_work_experience: profile
            .canadian_work
            .map(|years| schedule.canadian_work[years.index()].for_household(household))
            .unwrap_or(0),
        total: 0,
    };
    core.total = core.expected_total();
    core
}

pub(crate) fn spouse_factors(
    profile: &NormalizedCrsProfile,
    schedule: &CrsSchedule,
) -> SpouseBreakdown {
    let Some(spouse) = profile.spouse.as_ref() else {
        return SpouseBreakdown::default();
    };

    let mut factors = SpouseBreakdown {
        education: spouse
            .education
            .map(|level| schedule.spouse_education[level.index()])
            .unwrap_or(0),
        language: LanguageScore::from_result(spouse.language.as_ref(), None, |clb| {
            schedule.spouse_language[clb.index()]
        }),
        canadian_work_experience: spouse
            .canadian_work
            .map(|years| schedule.spouse_canadian_work[years.index()])
            .unwrap_or(0),
        total: 0,
    };
    factors.total = factors.expected_total();
    factors
}

pub(crate) fn skill_transferability(
    profile: &NormalizedCrsProfile,
    schedule: &CrsSchedule,
) -> TransferabilityBreakdown {
    let grid = &schedule.pairing;
    let language = language_tier(profile.first_language.as_ref(), schedule);
    let canadian_work = canadian_work_tier(profile.canadian_work);
    let education = education_credential(profile.education);
    let foreign_work = foreign_work_credential(profile.foreign_work);

    let mut transferability = TransferabilityBreakdown {
        education: PairingGroup::new(
            pairing_points(grid, education, language),
            pairing_points(grid, education, canadian_work),
            schedule.pairing_group_cap,
        ),
        foreign_work_experience: PairingGroup::new(
            pairing_points(grid, foreign_work, language),
            pairing_points(grid, foreign_work, canadian_work),
            schedule.pairing_group_cap,
        ),
        certificate_of_qualification: certificate_points(profile, schedule),
        cap: schedule.transferability_cap,
        ..TransferabilityBreakdown::default()
    };
    transferability.apply_caps();
    transferability
}

pub(crate) fn additional_points(
    profile: &NormalizedCrsProfile,
    schedule: &CrsSchedule,
) -> AdditionalBreakdown {
    let mut additional = AdditionalBreakdown {
        provincial_nomination: if profile.provincial_nomination {
            schedule.provincial_nomination
        } else {
            0
        },
        arranged_employment: match profile.job_offer {
            Some(JobOffer::SeniorManagement) => schedule.job_offer_senior,
            Some(JobOffer::Skilled) => schedule.job_offer_skilled,
            Some(JobOffer::None) | None => 0,
        },
        canadian_education: match profile.canadian_credential {
            Some(CanadianCredential::OneOrTwoYear) => schedule.canadian_credential_short,
            Some(CanadianCredential::ThreeYearOrLonger) => schedule.canadian_credential_long,
            Some(CanadianCredential::SecondaryOrLess) | None => 0,
        },
        french_language: french_points(profile, schedule),
        sibling_in_canada: if profile.sibling_in_canada {
            schedule.sibling_in_canada
        } else {
            0
        },
        cap: schedule.additional_cap,
        ..AdditionalBreakdown::default()
    };
    additional.apply_caps();
    additional
}

fn pairing_points(grid: &PairingGrid, credential: Credential, partner: Tier) -> u16 {
    match (credential, partner) {
        (Credential::Missing, _) | (_, Tier::Missing) => 0,
        (Credential::Single, Tier::Mid) => grid.single_mid,
        (Credential::Single, Tier::High) => grid.single_high,
        (Credential::Advanced, Tier::Mid) => grid.advanced_mid,
        (Credential::Advanced, Tier::High) => grid.advanced_high,
    }
}

fn language_tier(result: Option<&LanguageResult>, schedule: &CrsSchedule) -> Tier {
    let Some(result) = result else {
        return Tier::Missing;
    };

    let minimum = result.levels.minimum();
    if minimum >= schedule.pairing_language_high {
        Tier::High
    } else if minimum >= schedule.pairing_language_mid {
        Tier::Mid
    } else {
        Tier::Missing
    }
}

fn canadian_work_tier(years: Option<CanadianExperience>) -> Tier {
    match years {
        None | Some(CanadianExperience::None) => Tier::Missing,
        Some(CanadianExperience::OneYear) => Tier::Mid,
        Some(_) => Tier::High,
    }
}

fn education_credential(level: Option<EducationLevel>) -> Credential {
    match level {
        None | Some(EducationLevel::LessThanSecondary) | Some(EducationLevel::Secondary) => {
            Credential::Missing
        }
        Some(EducationLevel::OneYear)
        | Some(EducationLevel::TwoYear)
        | Some(EducationLevel::Bachelors) => Credential::Single,
        Some(EducationLevel::TwoOrMore)
        | Some(EducationLevel::Masters)
        | Some(EducationLevel::Doctoral) => Credential::Advanced,
    }
}

fn foreign_work_credential(years: Option<ForeignExperience>) -> Credential {
    match years {
        None | Some(ForeignExperience::None) => Credential::Missing,
        Some(ForeignExperience::OneYear) | Some(ForeignExperience::TwoYears) => Credential::Single,
        Some(ForeignExperience::ThreeOrMore) => Credential::Advanced,
    }
}

fn certificate_points(profile: &NormalizedCrsProfile, schedule: &CrsSchedule) -> u16 {
    if !profile.certificate_of_qualification {
        return 0;
    }

    let minimum = profile
        .first_language
        .map(|result| result.levels.minimum())
        .unwrap_or(Clb::BELOW_FOUR);
    let points = if minimum >= schedule.pairing_language_mid {
        schedule.certificate_full
    } else if minimum >= schedule.certificate_partial_minimum {
        schedule.certificate_partial
    } else {
        0
    };
    points.min(schedule.certificate_cap)
}

/// French at the minimum in all four skills earns the larger bonus only when an English
/// result also reaches its own minimum in all four.
fn french_points(profile: &NormalizedCrsProfile, schedule: &CrsSchedule) -> u16 {
    let results = [profile.first_language, profile.second_language];
    let in_family = |family: LanguageFamily| {
        results
            .iter()
            .flatten()
            .find(|result| result.family() == family)
    };

    let Some(french) = in_family(LanguageFamily::French) else {
        return 0;
    };
    if !french.levels.all_at_least(schedule.french_minimum) {
        return 0;
    }

    let strong_english = in_family(LanguageFamily::English)
        .is_some_and(|english| english.levels.all_at_least(schedule.english_minimum));
    if strong_english {
        schedule.french_with_english
    } else {
        schedule.french_only
    }
}
