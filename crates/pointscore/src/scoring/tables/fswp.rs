//! Federal Skilled Worker selection grid.

use super::language::Clb;

/// Inclusive age band.
#[derive(Debug, Clone, Copy)]
pub struct AgeStep {
    pub from: u8,
    pub to: u8,
    pub points: u16,
}

const fn ages(from: u8, to: u8, points: u16) -> AgeStep {
    AgeStep { from, to, points }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdaptabilityPoints {
    pub spouse_language: u16,
    pub own_canadian_study: u16,
    pub spouse_canadian_study: u16,
    pub own_canadian_work: u16,
    pub spouse_canadian_work: u16,
    pub arranged_employment: u16,
    pub relative_in_canada: u16,
}

#[derive(Debug)]
pub struct FswpSchedule {
    /// Per skill, indexed by CLB level.
    pub first_language: [u16; 13],
    pub second_language_threshold: Clb,
    pub second_language: u16,
    pub education: [u16; 8],
    /// Indexed by `SkilledExperience::index`.
    pub experience: [u16; 5],
    pub age: &'static [AgeStep],
    pub arranged_employment: u16,
    pub adaptability: AdaptabilityPoints,
    pub spouse_language_threshold: Clb,
    pub adaptability_cap: u16,
    pub language_minimum: Clb,
    pub pass_mark: u16,
}

impl FswpSchedule {
    pub fn age_points(&self, age: u8) -> u16 {
        self.age
            .iter()
            .find(|step| step.from <= age && age <= step.to)
            .map(|step| step.points)
            .unwrap_or(0)
    }
}

const FSWP_AGE: &[AgeStep] = &[
    ages(18, 35, 12),
    ages(36, 36, 11),
    ages(37, 37, 10),
    ages(38, 38, 9),
    ages(39, 39, 8),
    ages(40, 40, 7),
    ages(41, 41, 6),
    ages(42, 42, 5),
    ages(43, 43, 4),
    ages(44, 44, 3),
    ages(45, 45, 2),
    ages(46, 46, 1),
];

pub static FSWP_SCHEDULE: FswpSchedule = FswpSchedule {
    first_language: [0, 0, 0, 0, 0, 0, 0, 4, 5, 6, 6, 6, 6],
    second_language_threshold: Clb(5),
    second_language: 4,
    education: [0, 5, 15, 19, 21, 22, 23, 25],
    experience: [0, 9, 11, 13, 15],
    age: FSWP_AGE,
    arranged_employment: 10,
    adaptability: AdaptabilityPoints {
        spouse_language: 5,
        own_canadian_study: 5,
        spouse_canadian_study: 5,
        own_canadian_work: 10,
        spouse_canadian_work: 5,
        arranged_employment: 5,
        relative_in_canada: 5,
    },
    spouse_language_threshold: Clb(4),
    adaptability_cap: 10,
    language_minimum: Clb(7),
    pass_mark: 67,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_steps_down_one_point_per_year() {
        assert_eq!(FSWP_SCHEDULE.age_points(17), 0);
        assert_eq!(FSWP_SCHEDULE.age_points(18), 12);
        assert_eq!(FSWP_SCHEDULE.age_points(35), 12);
        for age in 36..=46u8 {
            let expected = 12 - u16::from(age - 35);
            assert_eq!(FSWP_SCHEDULE.age_points(age), expected, "age {age}");
        }
        assert_eq!(FSWP_SCHEDULE.age_points(47), 0);
    }

    #[test]
    fn category_maxima_sum_to_one_hundred() {
        let language = FSWP_SCHEDULE.first_language[12] * 4 + FSWP_SCHEDULE.second_language;
        let education = FSWP_SCHEDULE.education[7];
        let experience = FSWP_SCHEDULE.experience[4];
        let age = FSWP_SCHEDULE.age_points(25);
        let total = language
            + education
            + experience
            + age
            + FSWP_SCHEDULE.arranged_employment
            + FSWP_SCHEDULE.adaptability_cap;
        assert_eq!(total, 100);
    }
}
