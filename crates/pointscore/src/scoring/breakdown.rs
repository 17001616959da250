//! Serializable score breakdowns.
//!
//! Every group reports its leaves plus the sum it was built from. Capped groups carry
//! `raw` (sum of leaves), `cap`, and `total` (`raw` limited to `cap`). `apply_caps` re-derives
//! every total from the leaves and is idempotent; `verify` checks that the reported numbers
//! agree with each other.
//!
//! Not every number in the serialized form is a score. `cap`, `threshold` and `passMark` are
//! policy values copied from the schedule so a reader can see why a total stopped where it
//! did; they are listed in [`POLICY_KEYS`] and never take part in a sum. Values under
//! [`LEVEL_KEY`] are benchmark levels, not points.

use serde::Serialize;

use super::normalizer::LanguageResult;
use super::options::LanguageTest;
use super::tables::{Clb, Household, Skill};

/// Serialized keys holding schedule limits rather than points.
pub const POLICY_KEYS: &[&str] = &["cap", "threshold", "passMark"];

/// Serialized key under which language benchmark levels are reported.
pub const LEVEL_KEY: &str = "clb";

/// A reported group whose parts do not add up.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("breakdown group '{group}' reports {reported} but its parts give {expected}")]
pub struct BreakdownMismatch {
    pub group: &'static str,
    pub reported: u16,
    pub expected: u16,
}

fn check(group: &'static str, reported: u16, expected: u16) -> Result<(), BreakdownMismatch> {
    if reported == expected {
        Ok(())
    } else {
        Err(BreakdownMismatch {
            group,
            reported,
            expected,
        })
    }
}

pub(crate) fn capped(raw: u16, cap: Option<u16>) -> u16 {
    match cap {
        Some(cap) => raw.min(cap),
        None => raw,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SkillScore {
    /// Benchmark level reached, absent when the skill was not answered.
    pub clb: Option<Clb>,
    pub points: u16,
}

/// Per-skill language points for one test.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageScore {
    pub test: Option<LanguageTest>,
    pub speaking: SkillScore,
    pub listening: SkillScore,
    pub reading: SkillScore,
    pub writing: SkillScore,
    pub raw: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cap: Option<u16>,
    pub total: u16,
}

impl LanguageScore {
    /// Score each answered skill of `result` with `points_for`.
    pub(crate) fn from_result(
        result: Option<&LanguageResult>,
        cap: Option<u16>,
        points_for: impl Fn(Clb) -> u16,
    ) -> Self {
        let mut score = LanguageScore {
            cap,
            ..LanguageScore::default()
        };
        let Some(result) = result else {
            return score;
        };

        score.test = Some(result.test);
        for skill in Skill::ALL {
            let clb = result.levels.get(skill);
            let entry = SkillScore {
                clb,
                points: clb.map(&points_for).unwrap_or(0),
            };
            match skill {
                Skill::Speaking => score.speaking = entry,
                Skill::Listening => score.listening = entry,
                Skill::Reading => score.reading = entry,
                Skill::Writing => score.writing = entry,
            }
        }
        score.apply_caps();
        score
    }

    pub fn leaf_sum(&self) -> u16 {
        self.speaking.points + self.listening.points + self.reading.points + self.writing.points
    }

    pub fn apply_caps(&mut self) {
        self.raw = self.leaf_sum();
        self.total = capped(self.raw, self.cap);
    }

    fn verify(&self, group: &'static str) -> Result<(), BreakdownMismatch> {
        check(group, self.raw, self.leaf_sum())?;
        check(group, self.total, capped(self.raw, self.cap))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoreBreakdown {
    pub age: u16,
    pub education: u16,
    pub language: LanguageScore,
    pub second_language: LanguageScore,
    pub canadian_work_experience: u16,
    pub total: u16,
}

impl CoreBreakdown {
    pub(crate) fn expected_total(&self) -> u16 {
        self.age
            + self.education
            + self.language.total
            + self.second_language.total
            + self.canadian_work_experience
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpouseBreakdown {
    pub education: u16,
    pub language: LanguageScore,
    pub canadian_work_experience: u16,
    pub total: u16,
}

impl SpouseBreakdown {
    pub(crate) fn expected_total(&self) -> u16 {
        self.education + self.language.total + self.canadian_work_experience
    }
}

/// Two skill-transferability pairings sharing one factor, capped together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PairingGroup {
    pub with_language: u16,
    pub with_canadian_work_experience: u16,
    pub raw: u16,
    pub cap: u16,
    pub total: u16,
}

impl PairingGroup {
    pub(crate) fn new(with_language: u16, with_canadian_work_experience: u16, cap: u16) -> Self {
        let mut group = PairingGroup {
            with_language,
            with_canadian_work_experience,
            cap,
            ..PairingGroup::default()
        };
        group.apply_caps();
        group
    }

    pub fn apply_caps(&mut self) {
        self.raw = self.with_language + self.with_canadian_work_experience;
        self.total = capped(self.raw, Some(self.cap));
    }

    fn verify(&self, group: &'static str) -> Result<(), BreakdownMismatch> {
        check(
            group,
            self.raw,
            self.with_language + self.with_canadian_work_experience,
        )?;
        check(group, self.total, capped(self.raw, Some(self.cap)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferabilityBreakdown {
    pub education: PairingGroup,
    pub foreign_work_experience: PairingGroup,
    pub certificate_of_qualification: u16,
    pub raw: u16,
    pub cap: u16,
    pub total: u16,
}

impl TransferabilityBreakdown {
    /// Groups are capped first, then the section.
    pub fn apply_caps(&mut self) {
        self.education.apply_caps();
        self.foreign_work_experience.apply_caps();
        self.raw = self.parts();
        self.total = capped(self.raw, Some(self.cap));
    }

    fn parts(&self) -> u16 {
        self.education.total + self.foreign_work_experience.total + self.certificate_of_qualification
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalBreakdown {
    pub provincial_nomination: u16,
    pub arranged_employment: u16,
    pub canadian_education: u16,
    pub french_language: u16,
    pub sibling_in_canada: u16,
    pub raw: u16,
    pub cap: u16,
    pub total: u16,
}

impl AdditionalBreakdown {
    pub fn apply_caps(&mut self) {
        self.raw = self.parts();
        self.total = capped(self.raw, Some(self.cap));
    }

    fn parts(&self) -> u16 {
        self.provincial_nomination
            + self.arranged_employment
            + self.canadian_education
            + self.french_language
            + self.sibling_in_canada
    }
}

/// Comprehensive Ranking System score, section by section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrsBreakdown {
    pub household: Household,
    pub core: CoreBreakdown,
    pub spouse: SpouseBreakdown,
    pub transferability: TransferabilityBreakdown,
    pub additional: AdditionalBreakdown,
    pub total: u16,
}

impl CrsBreakdown {
    /// Re-derive every subtotal and the grand total from the leaves.
    pub fn apply_caps(&mut self) {
        self.core.language.apply_caps();
        self.core.second_language.apply_caps();
        self.core.total = self.core.expected_total();

        self.spouse.language.apply_caps();
        self.spouse.total = self.spouse.expected_total();

        self.transferability.apply_caps();
        self.additional.apply_caps();

        self.total = self.expected_total();
    }

    pub(crate) fn expected_total(&self) -> u16 {
        self.core.total + self.spouse.total + self.transferability.total + self.additional.total
    }

    pub fn verify(&self) -> Result<(), BreakdownMismatch> {
        self.core.language.verify("core.language")?;
        self.core.second_language.verify("core.secondLanguage")?;
        check("core", self.core.total, self.core.expected_total())?;

        self.spouse.language.verify("spouse.language")?;
        check("spouse", self.spouse.total, self.spouse.expected_total())?;

        self.transferability
            .education
            .verify("transferability.education")?;
        self.transferability
            .foreign_work_experience
            .verify("transferability.foreignWorkExperience")?;
        check(
            "transferability",
            self.transferability.raw,
            self.transferability.parts(),
        )?;
        check(
            "transferability",
            self.transferability.total,
            capped(self.transferability.raw, Some(self.transferability.cap)),
        )?;

        check("additional", self.additional.raw, self.additional.parts())?;
        check(
            "additional",
            self.additional.total,
            capped(self.additional.raw, Some(self.additional.cap)),
        )?;

        check("total", self.total, self.expected_total())
    }
}

/// Benchmark level per skill, absent when the skill was not answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SkillClb {
    pub speaking: Option<Clb>,
    pub listening: Option<Clb>,
    pub reading: Option<Clb>,
    pub writing: Option<Clb>,
}

/// Second-language credit that is all-or-nothing rather than per skill.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdLanguageScore {
    pub test: Option<LanguageTest>,
    pub clb: SkillClb,
    pub threshold: Clb,
    pub points: u16,
}

impl ThresholdLanguageScore {
    pub(crate) fn from_result(result: Option<&LanguageResult>, threshold: Clb, award: u16) -> Self {
        let levels = result.map(|result| result.levels).unwrap_or_default();
        let met = result.is_some() && levels.all_at_least(threshold);
        ThresholdLanguageScore {
            test: result.map(|result| result.test),
            clb: SkillClb {
                speaking: levels.speaking,
                listening: levels.listening,
                reading: levels.reading,
                writing: levels.writing,
            },
            threshold,
            points: if met { award } else { 0 },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FswpLanguageBreakdown {
    pub first_language: LanguageScore,
    pub second_language: ThresholdLanguageScore,
    pub total: u16,
}

impl FswpLanguageBreakdown {
    pub(crate) fn expected_total(&self) -> u16 {
        self.first_language.total + self.second_language.points
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdaptabilityBreakdown {
    pub spouse_language: u16,
    pub canadian_study: u16,
    pub spouse_canadian_study: u16,
    pub canadian_work: u16,
    pub spouse_canadian_work: u16,
    pub arranged_employment: u16,
    pub relative_in_canada: u16,
    pub raw: u16,
    pub cap: u16,
    pub total: u16,
}

impl AdaptabilityBreakdown {
    pub fn apply_caps(&mut self) {
        self.raw = self.parts();
        self.total = capped(self.raw, Some(self.cap));
    }

    fn parts(&self) -> u16 {
        self.spouse_language
            + self.canadian_study
            + self.spouse_canadian_study
            + self.canadian_work
            + self.spouse_canadian_work
            + self.arranged_employment
            + self.relative_in_canada
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FswpEligibility {
    pub pass_mark: u16,
    pub meets_pass_mark: bool,
    pub meets_language_minimum: bool,
}

/// Federal Skilled Worker six-factor score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FswpBreakdown {
    pub language: FswpLanguageBreakdown,
    pub education: u16,
    pub experience: u16,
    pub age: u16,
    pub arranged_employment: u16,
    pub adaptability: AdaptabilityBreakdown,
    pub eligibility: FswpEligibility,
    pub total: u16,
}

impl FswpBreakdown {
    pub fn apply_caps(&mut self) {
        self.language.first_language.apply_caps();
        self.language.total = self.language.expected_total();
        self.adaptability.apply_caps();
        self.total = self.expected_total();
        self.eligibility.meets_pass_mark = self.total >= self.eligibility.pass_mark;
    }

    pub(crate) fn expected_total(&self) -> u16 {
        self.language.total
            + self.education
            + self.experience
            + self.age
            + self.arranged_employment
            + self.adaptability.total
    }

    pub fn verify(&self) -> Result<(), BreakdownMismatch> {
        self.language
            .first_language
            .verify("language.firstLanguage")?;
        check(
            "language",
            self.language.total,
            self.language.expected_total(),
        )?;
        check("adaptability", self.adaptability.raw, self.adaptability.parts())?;
        check(
            "adaptability",
            self.adaptability.total,
            capped(self.adaptability.raw, Some(self.adaptability.cap)),
        )?;
        check("total", self.total, self.expected_total())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capped_is_idempotent() {
        let once = capped(140, Some(100));
        assert_eq!(once, 100);
        assert_eq!(capped(once, Some(100)), once);
        assert_eq!(capped(40, None), 40);
    }

    #[test]
    fn pairing_group_caps_the_sum() {
        let group = PairingGroup::new(50, 50, 50);
        assert_eq!(group.raw, 100);
        assert_eq!(group.total, 50);
        assert!(group.verify("group").is_ok());
    }

    #[test]
    fn verify_reports_the_inconsistent_group() {
        let mut additional = AdditionalBreakdown {
            sibling_in_canada: 15,
            cap: 600,
            ..AdditionalBreakdown::default()
        };
        additional.apply_caps();
        let mut breakdown = CrsBreakdown {
            household: Household::WithoutSpouse,
            core: CoreBreakdown::default(),
            spouse: SpouseBreakdown::default(),
            transferability: TransferabilityBreakdown {
                cap: 100,
                ..TransferabilityBreakdown::default()
            },
            additional,
            total: 15,
        };
        assert!(breakdown.verify().is_ok());

        breakdown.additional.sibling_in_canada = 30;
        let mismatch = breakdown.verify().expect_err("leaf changed under the total");
        assert_eq!(mismatch.group, "additional");
        assert_eq!(mismatch.reported, 15);
        assert_eq!(mismatch.expected, 30);
    }
}
