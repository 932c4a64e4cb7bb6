use core::fmt;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum CardKind {
    Bright = 0,
    Animal = 1,
    Ribbon = 2,
    Junk = 3,
}

impl CardKind {
    pub const ORDERED: [CardKind; 4] = [
        CardKind::Bright,
        CardKind::Animal,
        CardKind::Ribbon,
        CardKind::Junk,
    ];

    /// Display rank used when sorting hands: bright first, junk last.
    pub const fn rank(self) -> u8 {
        self as u8
    }

    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for CardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            CardKind::Bright => "bright",
            CardKind::Animal => "animal",
            CardKind::Ribbon => "ribbon",
            CardKind::Junk => "junk",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RibbonKind {
    RedPoetry,
    Plain,
    BluePoetry,
    Rain,
}

impl RibbonKind {
    /// Ribbon subtypes that score as a set of three.
    pub const SETS: [RibbonKind; 3] = [
        RibbonKind::RedPoetry,
        RibbonKind::Plain,
        RibbonKind::BluePoetry,
    ];

    pub const fn forms_set(self) -> bool {
        !matches!(self, RibbonKind::Rain)
    }
}

impl fmt::Display for RibbonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            RibbonKind::RedPoetry => "red poetry",
            RibbonKind::Plain => "plain",
            RibbonKind::BluePoetry => "blue poetry",
            RibbonKind::Rain => "rain",
        };
        f.write_str(text)
    }
}
