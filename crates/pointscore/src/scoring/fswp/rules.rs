use super::super::breakdown::{
    AdaptabilityBreakdown, FswpEligibility, FswpLanguageBreakdown, LanguageScore,
    ThresholdLanguageScore,
};
use super::super::normalizer::NormalizedFswpProfile;
use super::super::tables::FswpSchedule;

pub(crate) fn language(
    profile: &NormalizedFswpProfile,
    schedule: &FswpSchedule,
) -> FswpLanguageBreakdown {
    let mut language = FswpLanguageBreakdown {
        first_language: LanguageScore::from_result(profile.first_language.as_ref(), None, |clb| {
            schedule.first_language[clb.index()]
        }),
        second_language: ThresholdLanguageScore::from_result(
            profile.second_language.as_ref(),
            schedule.second_language_threshold,
            schedule.second_language,
        ),
        total: 0,
    };
    language.total = language.expected_total();
    language
}

pub(crate) fn education(profile: &NormalizedFswpProfile, schedule: &FswpSchedule) -> u16 {
    profile
        .education
        .map(|level| schedule.education[level.index()])
        .unwrap_or(0)
}

pub(crate) fn experience(profile: &NormalizedFswpProfile, schedule: &FswpSchedule) -> u16 {
    profile
        .experience
        .map(|years| schedule.experience[years.index()])
        .unwrap_or(0)
}

pub(crate) fn age(profile: &NormalizedFswpProfile, schedule: &FswpSchedule) -> u16 {
    profile
        .age
        .map(|age| schedule.age_points(age))
        .unwrap_or(0)
}

pub(crate) fn arranged_employment(profile: &NormalizedFswpProfile, schedule: &FswpSchedule) -> u16 {
    if profile.arranged_employment {
        schedule.arranged_employment
    } else {
        0
    }
}

/// Every adaptability item is reported at face value; only the section total is capped.
pub(crate) fn adaptability(
    profile: &NormalizedFswpProfile,
    schedule: &FswpSchedule,
) -> AdaptabilityBreakdown {
    let points = &schedule.adaptability;
    let award = |earned: bool, value: u16| if earned { value } else { 0 };
    let spouse = profile.spouse.unwrap_or_default();
    let spouse_language = spouse
        .language
        .is_some_and(|result| result.levels.all_at_least(schedule.spouse_language_threshold));

    let mut adaptability = AdaptabilityBreakdown {
        spouse_language: award(spouse_language, points.spouse_language),
        canadian_study: award(profile.canadian_study, points.own_canadian_study),
        spouse_canadian_study: award(spouse.canadian_study, points.spouse_canadian_study),
        canadian_work: award(profile.canadian_work, points.own_canadian_work),
        spouse_canadian_work: award(spouse.canadian_work, points.spouse_canadian_work),
        arranged_employment: award(profile.arranged_employment, points.arranged_employment),
        relative_in_canada: award(profile.relative_in_canada, points.relative_in_canada),
        cap: schedule.adaptability_cap,
        ..AdaptabilityBreakdown::default()
    };
    adaptability.apply_caps();
    adaptability
}

/// Pass-mark status is settled once the grand total is known.
pub(crate) fn eligibility(profile: &NormalizedFswpProfile, schedule: &FswpSchedule) -> FswpEligibility {
    FswpEligibility {
        pass_mark: schedule.pass_mark,
        meets_pass_mark: false,
        meets_language_minimum: profile
            .first_language
            .is_some_and(|result| result.levels.all_at_least(schedule.language_minimum)),
    }
}
