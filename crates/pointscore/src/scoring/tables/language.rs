//! Test score to Canadian Language Benchmark equivalency tables.

use serde::Serialize;

use crate::scoring::options::LanguageTest;

/// The four abilities every accepted test reports separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Skill {
    Speaking,
    Listening,
    Reading,
    Writing,
}

impl Skill {
    pub const ALL: [Skill; 4] = [
        Skill::Speaking,
        Skill::Listening,
        Skill::Reading,
        Skill::Writing,
    ];

    pub const fn id(self) -> &'static str {
        match self {
            Skill::Speaking => "speaking",
            Skill::Listening => "listening",
            Skill::Reading => "reading",
            Skill::Writing => "writing",
        }
    }
}

/// Canadian Language Benchmark level (NCLC for French tests). Levels below 4 carry no points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Clb(pub u8);

impl Clb {
    pub const BELOW_FOUR: Clb = Clb(0);
    pub const MAX: Clb = Clb(12);

    pub const fn level(self) -> u8 {
        self.0
    }

    /// Index into per-level point schedules.
    pub(crate) const fn index(self) -> usize {
        if self.0 > Self::MAX.0 {
            Self::MAX.0 as usize
        } else {
            self.0 as usize
        }
    }
}

/// How raw scores are written for a test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scale {
    /// Plain integers.
    Whole,
    /// Half-band decimals such as `6.5`, held in tenths.
    HalfBands,
    /// Integer levels plus `M` for below level 3.
    Levels,
}

#[derive(Debug, Clone, Copy)]
struct ScoreBand {
    min: u16,
    max: u16,
    clb: u8,
}

const fn band(min: u16, max: u16, clb: u8) -> ScoreBand {
    ScoreBand { min, max, clb }
}

#[derive(Debug, Clone, Copy)]
struct SkillTable {
    lowest: u16,
    highest: u16,
    bands: &'static [ScoreBand],
}

const fn skill(lowest: u16, highest: u16, bands: &'static [ScoreBand]) -> SkillTable {
    SkillTable {
        lowest,
        highest,
        bands,
    }
}

/// Equivalency chart for a single test.
#[derive(Debug)]
pub struct TestTable {
    test: LanguageTest,
    scale: Scale,
    speaking: SkillTable,
    listening: SkillTable,
    reading: SkillTable,
    writing: SkillTable,
}

impl TestTable {
    pub fn test(&self) -> LanguageTest {
        self.test
    }

    fn skill(&self, skill: Skill) -> &SkillTable {
        match skill {
            Skill::Speaking => &self.speaking,
            Skill::Listening => &self.listening,
            Skill::Reading => &self.reading,
            Skill::Writing => &self.writing,
        }
    }

    /// Map a raw score to its CLB level. `None` means the score is outside the test's range.
    pub fn clb_for(&self, skill: Skill, raw: &str) -> Option<Clb> {
        let table = self.skill(skill);
        let score = parse_score(self.scale, raw.trim())?;
        if score < table.lowest || score > table.highest {
            return None;
        }
        if self.scale == Scale::HalfBands && score % 5 != 0 {
            return None;
        }

        let clb = table
            .bands
            .iter()
            .find(|band| band.min <= score && score <= band.max)
            .map(|band| Clb(band.clb))
            .unwrap_or(Clb::BELOW_FOUR);
        Some(clb)
    }
}

fn parse_score(scale: Scale, raw: &str) -> Option<u16> {
    match scale {
        Scale::Whole => raw.parse::<u16>().ok(),
        Scale::Levels => {
            if raw.eq_ignore_ascii_case("m") {
                Some(0)
            } else {
                raw.parse::<u16>().ok().filter(|level| *level > 0)
            }
        }
        Scale::HalfBands => {
            let (whole, fraction) = match raw.split_once('.') {
                Some((whole, fraction)) => (whole, fraction),
                None => (raw, "0"),
            };
            if fraction.len() != 1 {
                return None;
            }
            let whole = whole.parse::<u16>().ok()?;
            let tenths = fraction.parse::<u16>().ok()?;
            whole.checked_mul(10)?.checked_add(tenths)
        }
    }
}

const CELPIP_LEVELS: &[ScoreBand] = &[
    band(12, 12, 12),
    band(11, 11, 11),
    band(10, 10, 10),
    band(9, 9, 9),
    band(8, 8, 8),
    band(7, 7, 7),
    band(6, 6, 6),
    band(5, 5, 5),
    band(4, 4, 4),
    band(3, 3, 3),
    band(2, 2, 2),
    band(1, 1, 1),
];

static CELPIP: TestTable = TestTable {
    test: LanguageTest::Celpip,
    scale: Scale::Levels,
    speaking: skill(0, 12, CELPIP_LEVELS),
    listening: skill(0, 12, CELPIP_LEVELS),
    reading: skill(0, 12, CELPIP_LEVELS),
    writing: skill(0, 12, CELPIP_LEVELS),
};

// IELTS scores are held in tenths: 7.5 is 75.
const IELTS_PRODUCTIVE: &[ScoreBand] = &[
    band(75, 90, 10),
    band(70, 70, 9),
    band(65, 65, 8),
    band(60, 60, 7),
    band(55, 55, 6),
    band(50, 50, 5),
    band(40, 45, 4),
];

const IELTS_LISTENING: &[ScoreBand] = &[
    band(85, 90, 10),
    band(80, 80, 9),
    band(75, 75, 8),
    band(60, 70, 7),
    band(55, 55, 6),
    band(50, 50, 5),
    band(45, 45, 4),
];

const IELTS_READING: &[ScoreBand] = &[
    band(80, 90, 10),
    band(70, 75, 9),
    band(65, 65, 8),
    band(60, 60, 7),
    band(50, 55, 6),
    band(40, 45, 5),
    band(35, 35, 4),
];

static IELTS: TestTable = TestTable {
    test: LanguageTest::Ielts,
    scale: Scale::HalfBands,
    speaking: skill(0, 90, IELTS_PRODUCTIVE),
    listening: skill(0, 90, IELTS_LISTENING),
    reading: skill(0, 90, IELTS_READING),
    writing: skill(0, 90, IELTS_PRODUCTIVE),
};

const PTE_SPEAKING: &[ScoreBand] = &[
    band(89, 90, 10),
    band(84, 88, 9),
    band(76, 83, 8),
    band(68, 75, 7),
    band(59, 67, 6),
    band(51, 58, 5),
    band(42, 50, 4),
];

const PTE_LISTENING: &[ScoreBand] = &[
    band(89, 90, 10),
    band(82, 88, 9),
    band(71, 81, 8),
    band(60, 70, 7),
    band(50, 59, 6),
    band(39, 49, 5),
    band(28, 38, 4),
];

const PTE_READING: &[ScoreBand] = &[
    band(88, 90, 10),
    band(78, 87, 9),
    band(69, 77, 8),
    band(60, 68, 7),
    band(51, 59, 6),
    band(42, 50, 5),
    band(33, 41, 4),
];

const PTE_WRITING: &[ScoreBand] = &[
    band(90, 90, 10),
    band(88, 89, 9),
    band(79, 87, 8),
    band(69, 78, 7),
    band(60, 68, 6),
    band(51, 59, 5),
    band(41, 50, 4),
];

static PTE: TestTable = TestTable {
    test: LanguageTest::Pte,
    scale: Scale::Whole,
    speaking: skill(10, 90, PTE_SPEAKING),
    listening: skill(10, 90, PTE_LISTENING),
    reading: skill(10, 90, PTE_READING),
    writing: skill(10, 90, PTE_WRITING),
};

const TEF_PRODUCTIVE: &[ScoreBand] = &[
    band(393, 450, 10),
    band(371, 392, 9),
    band(349, 370, 8),
    band(310, 348, 7),
    band(271, 309, 6),
    band(226, 270, 5),
    band(181, 225, 4),
];

const TEF_LISTENING: &[ScoreBand] = &[
    band(316, 360, 10),
    band(298, 315, 9),
    band(280, 297, 8),
    band(249, 279, 7),
    band(217, 248, 6),
    band(181, 216, 5),
    band(145, 180, 4),
];

const TEF_READING: &[ScoreBand] = &[
    band(263, 300, 10),
    band(248, 262, 9),
    band(233, 247, 8),
    band(207, 232, 7),
    band(181, 206, 6),
    band(151, 180, 5),
    band(121, 150, 4),
];

static TEF: TestTable = TestTable {
    test: LanguageTest::Tef,
    scale: Scale::Whole,
    speaking: skill(0, 450, TEF_PRODUCTIVE),
    listening: skill(0, 360, TEF_LISTENING),
    reading: skill(0, 300, TEF_READING),
    writing: skill(0, 450, TEF_PRODUCTIVE),
};

const TCF_PRODUCTIVE: &[ScoreBand] = &[
    band(16, 20, 10),
    band(14, 15, 9),
    band(12, 13, 8),
    band(10, 11, 7),
    band(7, 9, 6),
    band(6, 6, 5),
    band(4, 5, 4),
];

const TCF_LISTENING: &[ScoreBand] = &[
    band(549, 699, 10),
    band(523, 548, 9),
    band(503, 522, 8),
    band(458, 502, 7),
    band(398, 457, 6),
    band(369, 397, 5),
    band(331, 368, 4),
];

const TCF_READING: &[ScoreBand] = &[
    band(549, 699, 10),
    band(524, 548, 9),
    band(499, 523, 8),
    band(453, 498, 7),
    band(406, 452, 6),
    band(375, 405, 5),
    band(342, 374, 4),
];

static TCF: TestTable = TestTable {
    test: LanguageTest::Tcf,
    scale: Scale::Whole,
    speaking: skill(0, 20, TCF_PRODUCTIVE),
    listening: skill(100, 699, TCF_LISTENING),
    reading: skill(100, 699, TCF_READING),
    writing: skill(0, 20, TCF_PRODUCTIVE),
};

/// Equivalency chart for `test`.
pub fn table_for(test: LanguageTest) -> &'static TestTable {
    match test {
        LanguageTest::Celpip => &CELPIP,
        LanguageTest::Ielts => &IELTS,
        LanguageTest::Pte => &PTE,
        LanguageTest::Tef => &TEF,
        LanguageTest::Tcf => &TCF,
    }
}
