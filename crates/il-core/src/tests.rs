//! Unit tests for il-core primitives.

#[cfg(test)]
mod ids {
    use std::collections::HashMap;

    use crate::{CoreError, SectionId, TrainId, TrainIdx};

    #[test]
    fn index_roundtrip() {
        let id = TrainIdx(42);
        assert_eq!(id.index(), 42);
        assert_eq!(TrainIdx::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(SectionId::INVALID.0, u32::MAX);
        assert_eq!(TrainIdx::INVALID.0, u32::MAX);
        assert_eq!(SectionId::default(), SectionId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(SectionId(7).to_string(), "S7");
        assert_eq!(TrainIdx(3).to_string(), "#3");
        assert_eq!(TrainId::from("P1").to_string(), "P1");
    }

    #[test]
    fn train_id_map_lookup_by_str() {
        let mut m = HashMap::new();
        m.insert(TrainId::from("F1"), 1);
        assert_eq!(m.get("F1"), Some(&1));
        assert_eq!(m.get("F2"), None);
    }

    #[test]
    fn section_from_number() {
        assert_eq!(SectionId::from_number(9), Ok(SectionId(9)));
        assert_eq!(SectionId::from_number(-1), Err(CoreError::SectionOutOfRange(-1)));
        assert!(SectionId::from_number(u32::MAX as i64).is_err());
        assert_eq!(SectionId(11).as_i64(), 11);
    }
}

#[cfg(test)]
mod line {
    use crate::{Direction, Line};

    #[test]
    fn labels() {
        assert_eq!(Line::Freight.to_string(), "freight");
        assert_eq!(Direction::Northbound.to_string(), "northbound");
    }

    #[test]
    fn direction_indices_follow_all() {
        for (i, d) in Direction::ALL.iter().enumerate() {
            assert_eq!(d.index(), i);
        }
    }
}

#[cfg(test)]
mod time {
    use crate::Tick;

    #[test]
    fn tick_advances_and_displays() {
        assert_eq!(Tick::ZERO.next(), Tick(1));
        assert_eq!(Tick(10).next(), Tick(11));
        assert_eq!(Tick(4).to_string(), "T4");
    }
}
