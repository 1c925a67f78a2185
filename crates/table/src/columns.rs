//! Column mapper — which hazard column a timing type lands in per mode.

use serde::{Deserialize, Serialize};
use ucatable_core::{Mode, TimingType};

/// Title of the column group for timing types where providing the action is hazardous.
pub const PROVIDED_GROUP: &str = "Hazardous if provided";
/// Title of the column group for timing types where omitting the action is hazardous.
pub const NOT_PROVIDED_GROUP: &str = "Hazardous if not provided";

/// 1-based hazard column for `timing` under `mode`, or `None` if the mode
/// does not display that timing type.
pub fn column_for(mode: Mode, timing: TimingType) -> Option<usize> {
    use TimingType::*;
    match (mode, timing) {
        (Mode::ProvidedOnly | Mode::Both, Anytime) => Some(1),
        (Mode::ProvidedOnly | Mode::Both, TooEarly | TooLate) => Some(2),
        (Mode::ProvidedOnly | Mode::Both, StoppedTooSoon | AppliedTooLong) => Some(3),
        (Mode::NotProvidedOnly, NotProvided | Never) => Some(1),
        (Mode::Both, NotProvided | Never) => Some(4),
        (Mode::ProvidedOnly, NotProvided | Never) => None,
        (
            Mode::NotProvidedOnly,
            Anytime | TooEarly | TooLate | StoppedTooSoon | AppliedTooLong,
        ) => None,
        (_, Provided | WrongTime) => None,
    }
}

/// A titled group of hazard sub-headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnGroup {
    pub title: String,
    pub columns: Vec<String>,
}

fn provided_group() -> ColumnGroup {
    ColumnGroup {
        title: PROVIDED_GROUP.into(),
        columns: vec![
            "Anytime".into(),
            "Too Early / Too Late".into(),
            "Stopped Too Soon / Applied Too Long".into(),
        ],
    }
}

fn not_provided_group() -> ColumnGroup {
    ColumnGroup {
        title: NOT_PROVIDED_GROUP.into(),
        columns: vec!["Never".into()],
    }
}

/// Hazard sub-headers shown under `mode`, left to right.
pub fn hazard_groups(mode: Mode) -> Vec<ColumnGroup> {
    match mode {
        Mode::ProvidedOnly => vec![provided_group()],
        Mode::NotProvidedOnly => vec![not_provided_group()],
        Mode::Both => vec![provided_group(), not_provided_group()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODES: [Mode; 3] = [Mode::ProvidedOnly, Mode::NotProvidedOnly, Mode::Both];

    #[test]
    fn provided_only_columns() {
        let m = Mode::ProvidedOnly;
        assert_eq!(column_for(m, TimingType::Anytime), Some(1));
        assert_eq!(column_for(m, TimingType::TooEarly), Some(2));
        assert_eq!(column_for(m, TimingType::TooLate), Some(2));
        assert_eq!(column_for(m, TimingType::StoppedTooSoon), Some(3));
        assert_eq!(column_for(m, TimingType::AppliedTooLong), Some(3));
        assert_eq!(column_for(m, TimingType::NotProvided), None);
        assert_eq!(column_for(m, TimingType::Never), None);
    }

    #[test]
    fn not_provided_only_columns() {
        let m = Mode::NotProvidedOnly;
        assert_eq!(column_for(m, TimingType::NotProvided), Some(1));
        assert_eq!(column_for(m, TimingType::Never), Some(1));
        assert_eq!(column_for(m, TimingType::Anytime), None);
        assert_eq!(column_for(m, TimingType::TooLate), None);
    }

    #[test]
    fn both_columns() {
        let m = Mode::Both;
        assert_eq!(column_for(m, TimingType::Anytime), Some(1));
        assert_eq!(column_for(m, TimingType::TooLate), Some(2));
        assert_eq!(column_for(m, TimingType::AppliedTooLong), Some(3));
        assert_eq!(column_for(m, TimingType::NotProvided), Some(4));
        assert_eq!(column_for(m, TimingType::Never), Some(4));
    }

    #[test]
    fn provided_and_wrong_time_have_no_column() {
        for mode in MODES {
            assert_eq!(column_for(mode, TimingType::Provided), None);
            assert_eq!(column_for(mode, TimingType::WrongTime), None);
        }
    }

    #[test]
    fn columns_stay_within_mode_width() {
        for mode in MODES {
            for timing in TimingType::ALL {
                if let Some(c) = column_for(mode, timing) {
                    assert!((1..=mode.column_count()).contains(&c));
                }
            }
        }
    }

    #[test]
    fn header_widths_match_column_counts() {
        for mode in MODES {
            let width: usize = hazard_groups(mode).iter().map(|g| g.columns.len()).sum();
            assert_eq!(width, mode.column_count());
        }
    }
}
