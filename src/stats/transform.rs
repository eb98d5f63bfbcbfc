use std::str::FromStr;

use strum_macros::{Display, EnumString};

/// Unit scaling codes accepted in a mapping's `Transform` field.
///
/// Time codes assume the raw value counts game ticks (20 per second).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum UnitScale {
    #[strum(to_string = "ss")]
    Seconds,
    #[strum(to_string = "mm")]
    Minutes,
    #[strum(to_string = "hh")]
    Hours,
    #[strum(to_string = "dd")]
    Days,
    #[strum(to_string = "k")]
    Thousands,
    #[strum(to_string = "w")]
    TenThousands,
    #[strum(to_string = "m")]
    Millions,
}

impl UnitScale {
    pub fn divisor(self) -> i64 {
        match self {
            UnitScale::Seconds => 20,
            UnitScale::Minutes => 1_200,
            UnitScale::Hours => 72_000,
            UnitScale::Days => 1_728_000,
            UnitScale::Thousands => 1_000,
            UnitScale::TenThousands => 10_000,
            UnitScale::Millions => 1_000_000,
        }
    }

    pub fn apply(self, value: i64) -> i64 {
        value / self.divisor()
    }
}

/// Scales `value` by the unit named in `code`. Unknown, empty or absent codes
/// leave the value untouched. Division truncates toward zero.
pub fn transform(value: i64, code: Option<&str>) -> i64 {
    match code.map(UnitScale::from_str) {
        Some(Ok(scale)) => scale.apply(value),
        _ => value,
    }
}
