use crate::model::kind::{CardKind, RibbonKind};
use crate::model::month::Month;
use core::fmt;
use serde::Serialize;

pub const DECK_SIZE: usize = 48;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Card {
    pub id: u8,
    pub month: Month,
    pub kind: CardKind,
    pub ribbon: Option<RibbonKind>,
    /// Weight toward the junk count; zero for every non-junk card.
    pub junk_weight: u8,
}

impl Card {
    const fn bright(id: u8, month: Month) -> Self {
        Self {
            id,
            month,
            kind: CardKind::Bright,
            ribbon: None,
            junk_weight: 0,
        }
    }

    const fn animal(id: u8, month: Month) -> Self {
        Self {
            id,
            month,
            kind: CardKind::Animal,
            ribbon: None,
            junk_weight: 0,
        }
    }

    const fn ribbon(id: u8, month: Month, ribbon: RibbonKind) -> Self {
        Self {
            id,
            month,
            kind: CardKind::Ribbon,
            ribbon: Some(ribbon),
            junk_weight: 0,
        }
    }

    const fn junk(id: u8, month: Month, junk_weight: u8) -> Self {
        Self {
            id,
            month,
            kind: CardKind::Junk,
            ribbon: None,
            junk_weight,
        }
    }

    /// Every card of the deck in canonical id order.
    pub const fn catalog() -> &'static [Card; DECK_SIZE] {
        &CATALOG
    }

    pub fn from_id(id: u8) -> Option<Card> {
        CATALOG.get(id as usize).copied()
    }

    pub const fn is_bright(self) -> bool {
        matches!(self.kind, CardKind::Bright)
    }

    pub const fn is_double_junk(self) -> bool {
        self.junk_weight >= 2
    }

    pub const fn is_godori_animal(self) -> bool {
        matches!(self.kind, CardKind::Animal)
            && matches!(self.month, Month::Plum | Month::Wisteria | Month::Pampas)
    }

    pub const fn same_month(self, other: Card) -> bool {
        self.month as u8 == other.month as u8
    }

    /// Hand order: month, then kind rank, then id.
    pub const fn sort_key(self) -> (u8, u8, u8) {
        (self.month.number(), self.kind.rank(), self.id)
    }

    pub fn name(self) -> &'static str {
        NAMES[self.id as usize]
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}({})", self.month.number(), self.id, self.name())
    }
}

const CATALOG: [Card; DECK_SIZE] = [
    Card::bright(0, Month::Pine),
    Card::ribbon(1, Month::Pine, RibbonKind::RedPoetry),
    Card::junk(2, Month::Pine, 1),
    Card::junk(3, Month::Pine, 1),
    Card::animal(4, Month::Plum),
    Card::ribbon(5, Month::Plum, RibbonKind::RedPoetry),
    Card::junk(6, Month::Plum, 1),
    Card::junk(7, Month::Plum, 1),
    Card::bright(8, Month::Cherry),
    Card::ribbon(9, Month::Cherry, RibbonKind::RedPoetry),
    Card::junk(10, Month::Cherry, 1),
    Card::junk(11, Month::Cherry, 1),
    Card::animal(12, Month::Wisteria),
    Card::ribbon(13, Month::Wisteria, RibbonKind::Plain),
    Card::junk(14, Month::Wisteria, 1),
    Card::junk(15, Month::Wisteria, 1),
    Card::animal(16, Month::Iris),
    Card::ribbon(17, Month::Iris, RibbonKind::Plain),
    Card::junk(18, Month::Iris, 1),
    Card::junk(19, Month::Iris, 1),
    Card::animal(20, Month::Peony),
    Card::ribbon(21, Month::Peony, RibbonKind::BluePoetry),
    Card::junk(22, Month::Peony, 1),
    Card::junk(23, Month::Peony, 1),
    Card::animal(24, Month::BushClover),
    Card::ribbon(25, Month::BushClover, RibbonKind::Plain),
    Card::junk(26, Month::BushClover, 1),
    Card::junk(27, Month::BushClover, 1),
    Card::bright(28, Month::Pampas),
    Card::animal(29, Month::Pampas),
    Card::junk(30, Month::Pampas, 1),
    Card::junk(31, Month::Pampas, 1),
    Card::animal(32, Month::Chrysanthemum),
    Card::ribbon(33, Month::Chrysanthemum, RibbonKind::BluePoetry),
    Card::junk(34, Month::Chrysanthemum, 1),
    Card::junk(35, Month::Chrysanthemum, 1),
    Card::animal(36, Month::Maple),
    Card::ribbon(37, Month::Maple, RibbonKind::BluePoetry),
    Card::junk(38, Month::Maple, 1),
    Card::junk(39, Month::Maple, 1),
    Card::bright(40, Month::Paulownia),
    Card::junk(41, Month::Paulownia, 1),
    Card::junk(42, Month::Paulownia, 1),
    Card::junk(43, Month::Paulownia, 2),
    Card::bright(44, Month::Rain),
    Card::animal(45, Month::Rain),
    Card::ribbon(46, Month::Rain, RibbonKind::Rain),
    Card::junk(47, Month::Rain, 2),
];

const NAMES: [&str; DECK_SIZE] = [
    "Crane",
    "Red Poetry Ribbon",
    "Junk",
    "Junk",
    "Bush Warbler",
    "Red Poetry Ribbon",
    "Junk",
    "Junk",
    "Curtain",
    "Red Poetry Ribbon",
    "Junk",
    "Junk",
    "Cuckoo",
    "Plain Ribbon",
    "Junk",
    "Junk",
    "Bridge",
    "Plain Ribbon",
    "Junk",
    "Junk",
    "Butterflies",
    "Blue Poetry Ribbon",
    "Junk",
    "Junk",
    "Boar",
    "Plain Ribbon",
    "Junk",
    "Junk",
    "Moon",
    "Geese",
    "Junk",
    "Junk",
    "Sake Cup",
    "Blue Poetry Ribbon",
    "Junk",
    "Junk",
    "Deer",
    "Blue Poetry Ribbon",
    "Junk",
    "Junk",
    "Phoenix",
    "Junk",
    "Junk",
    "Double Junk",
    "Rain Man",
    "Swallow",
    "Rain Ribbon",
    "Double Junk",
];
