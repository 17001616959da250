//! Comprehensive Ranking System point schedule.

use serde::Serialize;

use super::language::Clb;

/// Which column of the core schedule applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Household {
    WithSpouse,
    WithoutSpouse,
}

/// A schedule cell that differs by household.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Points {
    pub with_spouse: u16,
    pub without_spouse: u16,
}

const fn pts(with_spouse: u16, without_spouse: u16) -> Points {
    Points {
        with_spouse,
        without_spouse,
    }
}

impl Points {
    pub const fn for_household(self, household: Household) -> u16 {
        match household {
            Household::WithSpouse => self.with_spouse,
            Household::WithoutSpouse => self.without_spouse,
        }
    }
}

/// Inclusive age band.
#[derive(Debug, Clone, Copy)]
pub struct AgeBand {
    pub from: u8,
    pub to: u8,
    pub points: Points,
}

const fn ages(from: u8, to: u8, points: Points) -> AgeBand {
    AgeBand { from, to, points }
}

/// Points for one skill-transferability pairing, by how strong each side is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairingGrid {
    /// Single credential (or 1-2 years foreign work) with the lower partner tier.
    pub single_mid: u16,
    pub single_high: u16,
    pub advanced_mid: u16,
    pub advanced_high: u16,
}

#[derive(Debug)]
pub struct CrsSchedule {
    pub age: &'static [AgeBand],
    /// Indexed by `EducationLevel::index`.
    pub education: [Points; 8],
    /// Per skill, indexed by CLB level.
    pub first_language: [Points; 13],
    pub second_language: [u16; 13],
    pub second_language_cap: Points,
    /// Indexed by `CanadianExperience::index`.
    pub canadian_work: [Points; 6],
    pub spouse_education: [u16; 8],
    pub spouse_language: [u16; 13],
    pub spouse_canadian_work: [u16; 6],
    /// Lowest first-language skill needed for the mid and high pairing tiers.
    pub pairing_language_mid: Clb,
    pub pairing_language_high: Clb,
    pub pairing: PairingGrid,
    pub pairing_group_cap: u16,
    pub certificate_partial_minimum: Clb,
    pub certificate_partial: u16,
    pub certificate_full: u16,
    pub certificate_cap: u16,
    pub transferability_cap: u16,
    pub provincial_nomination: u16,
    pub job_offer_senior: u16,
    pub job_offer_skilled: u16,
    pub canadian_credential_short: u16,
    pub canadian_credential_long: u16,
    pub sibling_in_canada: u16,
    pub french_minimum: Clb,
    pub english_minimum: Clb,
    pub french_with_english: u16,
    pub french_only: u16,
    pub additional_cap: u16,
}

impl CrsSchedule {
    pub fn age_points(&self, age: u8, household: Household) -> u16 {
        self.age
            .iter()
            .find(|band| band.from <= age && age <= band.to)
            .map(|band| band.points.for_household(household))
            .unwrap_or(0)
    }
}

const CRS_AGE: &[AgeBand] = &[
    ages(18, 18, pts(90, 99)),
    ages(19, 19, pts(95, 105)),
    ages(20, 29, pts(100, 110)),
    ages(30, 30, pts(95, 105)),
    ages(31, 31, pts(90, 99)),
    ages(32, 32, pts(85, 94)),
    ages(33, 33, pts(80, 88)),
    ages(34, 34, pts(75, 83)),
    ages(35, 35, pts(70, 77)),
    ages(36, 36, pts(65, 72)),
    ages(37, 37, pts(60, 66)),
    ages(38, 38, pts(55, 61)),
    ages(39, 39, pts(50, 55)),
    ages(40, 40, pts(45, 50)),
    ages(41, 41, pts(35, 39)),
    ages(42, 42, pts(25, 28)),
    ages(43, 43, pts(15, 17)),
    ages(44, 44, pts(5, 6)),
];

pub static CRS_SCHEDULE: CrsSchedule = CrsSchedule {
    age: CRS_AGE,
    education: [
        pts(0, 0),
        pts(28, 30),
        pts(84, 90),
        pts(91, 98),
        pts(112, 120),
        pts(119, 128),
        pts(126, 135),
        pts(140, 150),
    ],
    first_language: [
        pts(0, 0),
        pts(0, 0),
        pts(0, 0),
        pts(0, 0),
        pts(6, 6),
        pts(6, 6),
        pts(8, 9),
        pts(16, 17),
        pts(22, 23),
        pts(29, 31),
        pts(32, 34),
        pts(32, 34),
        pts(32, 34),
    ],
    second_language: [0, 0, 0, 0, 0, 1, 1, 3, 3, 6, 6, 6, 6],
    second_language_cap: pts(22, 24),
    canadian_work: [
        pts(0, 0),
        pts(35, 40),
        pts(46, 53),
        pts(56, 64),
        pts(63, 72),
        pts(70, 80),
    ],
    spouse_education: [0, 2, 6, 7, 8, 9, 10, 10],
    spouse_language: [0, 0, 0, 0, 0, 1, 1, 3, 3, 5, 5, 5, 5],
    spouse_canadian_work: [0, 5, 7, 8, 9, 10],
    pairing_language_mid: Clb(7),
    pairing_language_high: Clb(9),
    pairing: PairingGrid {
        single_mid: 13,
        single_high: 25,
        advanced_mid: 25,
        advanced_high: 50,
    },
    pairing_group_cap: 50,
    certificate_partial_minimum: Clb(5),
    certificate_partial: 25,
    certificate_full: 50,
    certificate_cap: 50,
    transferability_cap: 100,
    provincial_nomination: 600,
    job_offer_senior: 200,
    job_offer_skilled: 50,
    canadian_credential_short: 15,
    canadian_credential_long: 30,
    sibling_in_canada: 15,
    french_minimum: Clb(7),
    english_minimum: Clb(5),
    french_with_english: 50,
    french_only: 25,
    additional_cap: 600,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_is_flat_across_the_twenties() {
        for age in 20..=29 {
            assert_eq!(CRS_SCHEDULE.age_points(age, Household::WithoutSpouse), 110);
            assert_eq!(CRS_SCHEDULE.age_points(age, Household::WithSpouse), 100);
        }
    }

    #[test]
    fn age_never_increases_after_the_peak() {
        let mut previous = CRS_SCHEDULE.age_points(29, Household::WithoutSpouse);
        for age in 30..=60 {
            let current = CRS_SCHEDULE.age_points(age, Household::WithoutSpouse);
            assert!(current <= previous, "age {age} went up");
            previous = current;
        }
        assert_eq!(CRS_SCHEDULE.age_points(45, Household::WithoutSpouse), 0);
        assert_eq!(CRS_SCHEDULE.age_points(17, Household::WithoutSpouse), 0);
    }

    #[test]
    fn first_language_schedule_is_non_decreasing() {
        for window in CRS_SCHEDULE.first_language.windows(2) {
            assert!(window[0].with_spouse <= window[1].with_spouse);
            assert!(window[0].without_spouse <= window[1].without_spouse);
        }
    }
}
