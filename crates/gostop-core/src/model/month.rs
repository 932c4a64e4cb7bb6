use core::fmt;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[repr(u8)]
pub enum Month {
    Pine = 1,
    Plum = 2,
    Cherry = 3,
    Wisteria = 4,
    Iris = 5,
    Peony = 6,
    BushClover = 7,
    Pampas = 8,
    Chrysanthemum = 9,
    Maple = 10,
    Paulownia = 11,
    Rain = 12,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::Pine,
        Month::Plum,
        Month::Cherry,
        Month::Wisteria,
        Month::Iris,
        Month::Peony,
        Month::BushClover,
        Month::Pampas,
        Month::Chrysanthemum,
        Month::Maple,
        Month::Paulownia,
        Month::Rain,
    ];

    /// Months whose animal cards together form godori.
    pub const GODORI: [Month; 3] = [Month::Plum, Month::Wisteria, Month::Pampas];

    pub const fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Month::Pine),
            2 => Some(Month::Plum),
            3 => Some(Month::Cherry),
            4 => Some(Month::Wisteria),
            5 => Some(Month::Iris),
            6 => Some(Month::Peony),
            7 => Some(Month::BushClover),
            8 => Some(Month::Pampas),
            9 => Some(Month::Chrysanthemum),
            10 => Some(Month::Maple),
            11 => Some(Month::Paulownia),
            12 => Some(Month::Rain),
            _ => None,
        }
    }

    pub const fn number(self) -> u8 {
        self as u8
    }

    /// Zero-based position, handy for per-month tables.
    pub const fn index(self) -> usize {
        self as usize - 1
    }

    pub const fn is_rain(self) -> bool {
        matches!(self, Month::Rain)
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Month::Pine => "Pine",
            Month::Plum => "Plum",
            Month::Cherry => "Cherry",
            Month::Wisteria => "Wisteria",
            Month::Iris => "Iris",
            Month::Peony => "Peony",
            Month::BushClover => "Bush Clover",
            Month::Pampas => "Pampas",
            Month::Chrysanthemum => "Chrysanthemum",
            Month::Maple => "Maple",
            Month::Paulownia => "Paulownia",
            Month::Rain => "Rain",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::Month;

    #[test]
    fn from_number_maps_valid_values() {
        assert_eq!(Month::from_number(8), Some(Month::Pampas));
        assert_eq!(Month::from_number(0), None);
        assert_eq!(Month::from_number(13), None);
    }

    #[test]
    fn index_is_zero_based() {
        for (i, month) in Month::ALL.iter().enumerate() {
            assert_eq!(month.index(), i);
            assert_eq!(month.number() as usize, i + 1);
        }
    }

    #[test]
    fn display_uses_flower_names() {
        assert_eq!(Month::BushClover.to_string(), "Bush Clover");
        assert_eq!(Month::Rain.to_string(), "Rain");
    }
}
