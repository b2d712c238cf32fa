//! Unit tests for il-topology.
//!
//! Most tests use the reference junction; builder tests hand-craft small
//! plans so each validation rule is exercised in isolation.

#[cfg(test)]
mod helpers {
    use il_core::SectionId;

    use crate::{Layout, Topology};

    pub fn junction() -> Topology {
        Layout::junction().build().expect("reference layout is valid")
    }

    pub fn s(n: u32) -> SectionId {
        SectionId(n)
    }
}

// ── Builder & validation ──────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use il_core::{Direction, Line};

    use super::helpers::s;
    use crate::{TopologyBuilder, TopologyError};

    #[test]
    fn empty_build() {
        let topo = TopologyBuilder::new().build().unwrap();
        assert!(topo.is_empty());
        assert_eq!(topo.track_count(), 0);
        assert!(topo.neighbors(s(1), Line::Passenger).is_empty());
    }

    #[test]
    fn link_adds_both_directions() {
        let mut b = TopologyBuilder::new();
        b.add_section(s(1), Line::Freight)
            .add_section(s(2), Line::Freight)
            .add_link(s(1), s(2));
        let topo = b.build().unwrap();
        assert_eq!(topo.track_count(), 2);
        assert!(topo.is_adjacent(s(1), s(2), Line::Freight));
        assert!(topo.is_adjacent(s(2), s(1), Line::Freight));
    }

    #[test]
    fn repeated_track_collapses() {
        let mut b = TopologyBuilder::new();
        b.add_section(s(1), Line::Passenger)
            .add_section(s(2), Line::Passenger)
            .add_track(s(1), s(2))
            .add_track(s(1), s(2));
        let topo = b.build().unwrap();
        assert_eq!(topo.neighbors(s(1), Line::Passenger), &[s(2)]);
    }

    #[test]
    fn duplicate_section_rejected() {
        let mut b = TopologyBuilder::new();
        b.add_section(s(1), Line::Passenger).add_section(s(1), Line::Freight);
        assert_eq!(b.build().unwrap_err(), TopologyError::DuplicateSection(s(1)));
    }

    #[test]
    fn invalid_sentinel_rejected() {
        let mut b = TopologyBuilder::new();
        b.add_section(il_core::SectionId::INVALID, Line::Passenger);
        assert_eq!(b.build().unwrap_err(), TopologyError::InvalidSection);
    }

    #[test]
    fn track_to_unknown_section_rejected() {
        let mut b = TopologyBuilder::new();
        b.add_section(s(1), Line::Passenger).add_track(s(1), s(2));
        assert_eq!(b.build().unwrap_err(), TopologyError::UnknownSection(s(2)));
    }

    #[test]
    fn cross_line_track_rejected() {
        let mut b = TopologyBuilder::new();
        b.add_section(s(6), Line::Passenger)
            .add_section(s(7), Line::Freight)
            .add_track(s(6), s(7));
        assert_eq!(
            b.build().unwrap_err(),
            TopologyError::CrossLineTrack { from: s(6), to: s(7) }
        );
    }

    #[test]
    fn self_loop_track_rejected() {
        let mut b = TopologyBuilder::new();
        b.add_section(s(4), Line::Passenger)
            .add_track(s(4), s(4));
        assert_eq!(b.build().unwrap_err(), TopologyError::SelfLoop(s(4)));
    }

    #[test]
    fn unknown_entry_rejected() {
        let mut b = TopologyBuilder::new();
        b.add_section(s(1), Line::Passenger)
            .add_entry(Direction::Northbound, s(9));
        assert_eq!(b.build().unwrap_err(), TopologyError::UnknownSection(s(9)));
    }

    #[test]
    fn guarded_hop_must_be_freight_track() {
        let mut b = TopologyBuilder::new();
        b.add_section(s(5), Line::Passenger)
            .add_section(s(6), Line::Passenger)
            .add_link(s(5), s(6))
            .add_crossing("X", [s(5)], [(s(5), s(6))]);
        assert!(matches!(
            b.build().unwrap_err(),
            TopologyError::GuardedHopNotFreight { .. }
        ));

        let mut b = TopologyBuilder::new();
        b.add_section(s(7), Line::Freight)
            .add_section(s(11), Line::Freight)
            .add_crossing("X", [], [(s(7), s(11))]); // no such track
        assert!(b.build().is_err());
    }
}

// ── Queries on the reference junction ─────────────────────────────────────────

#[cfg(test)]
mod queries {
    use il_core::{Direction, Line};

    use super::helpers::{junction, s};

    #[test]
    fn dimensions() {
        let topo = junction();
        assert_eq!(topo.section_count(), 11);
        assert_eq!(topo.track_count(), 15);
        assert_eq!(topo.crossings().len(), 1);
    }

    #[test]
    fn lines() {
        let topo = junction();
        for n in [1, 2, 4, 5, 6, 8, 9, 10] {
            assert_eq!(topo.line(s(n)), Some(Line::Passenger), "section {n}");
        }
        for n in [3, 7, 11] {
            assert_eq!(topo.line(s(n)), Some(Line::Freight), "section {n}");
        }
        assert_eq!(topo.line(s(99)), None);
    }

    #[test]
    fn neighbors_keep_declaration_order() {
        let topo = junction();
        assert_eq!(topo.neighbors(s(5), Line::Passenger), &[s(6), s(4), s(2)]);
        assert_eq!(topo.neighbors(s(6), Line::Passenger), &[s(9), s(8), s(5)]);
        assert_eq!(topo.neighbors(s(7), Line::Freight), &[s(11), s(3)]);
    }

    #[test]
    fn neighbors_restricted_to_own_line() {
        let topo = junction();
        assert!(topo.neighbors(s(7), Line::Passenger).is_empty());
        assert!(topo.neighbors(s(6), Line::Freight).is_empty());
        assert!(topo.neighbors(s(42), Line::Freight).is_empty());
    }

    #[test]
    fn entry_and_exit_classification() {
        let topo = junction();
        assert!(topo.is_entry(Direction::Southbound, s(1)));
        assert!(!topo.is_entry(Direction::Northbound, s(1)));
        assert!(topo.is_entry(Direction::Northbound, s(11)));
        assert!(topo.is_exit(Direction::Southbound, s(9)));
        assert!(topo.is_exit(Direction::Northbound, s(3)));
        assert!(!topo.is_exit(Direction::Southbound, s(5)));
        assert!(!topo.is_entry(Direction::Southbound, s(404)));
    }

    #[test]
    fn entry_directions_listed() {
        let topo = junction();
        let dirs = |n| topo.entry_directions(s(n)).collect::<Vec<_>>();
        assert_eq!(dirs(1), [Direction::Southbound]);
        assert_eq!(dirs(3), [Direction::Southbound]);
        assert_eq!(dirs(9), [Direction::Northbound]);
        assert!(dirs(5).is_empty());
    }

    #[test]
    fn crossing_zone_and_guards() {
        let topo = junction();
        for n in [5, 6, 9] {
            assert!(topo.in_crossing_zone(s(n)));
        }
        for n in [1, 4, 7, 11] {
            assert!(!topo.in_crossing_zone(s(n)));
        }
        assert_eq!(topo.crossings_guarding(s(7), s(11)).count(), 1);
        assert_eq!(topo.crossings_guarding(s(11), s(7)).count(), 1);
        assert_eq!(topo.crossings_guarding(s(3), s(7)).count(), 0);
    }
}

// ── Routing ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod routing {
    use il_core::Line;

    use super::helpers::{junction, s};
    use crate::{BfsRouter, Router, TopologyBuilder, TopologyError};

    #[test]
    fn shortest_route_from_1_to_9() {
        let topo = junction();
        let r = BfsRouter.route(&topo, s(1), s(9), Line::Passenger).unwrap();
        assert_eq!(r.sections, vec![s(1), s(5), s(6), s(9)]);
        assert_eq!(r.hops(), 3);
        assert_eq!(r.first_hop(), Some(s(5)));
    }

    #[test]
    fn northbound_route_9_to_2() {
        let topo = junction();
        let r = BfsRouter.route(&topo, s(9), s(2), Line::Passenger).unwrap();
        assert_eq!(r.sections, vec![s(9), s(6), s(5), s(2)]);
    }

    #[test]
    fn freight_route() {
        let topo = junction();
        assert_eq!(BfsRouter.next_hop(&topo, s(3), s(11), Line::Freight), Some(s(7)));
        assert_eq!(BfsRouter.next_hop(&topo, s(7), s(11), Line::Freight), Some(s(11)));
    }

    #[test]
    fn at_goal_is_trivial() {
        let topo = junction();
        let r = BfsRouter.route(&topo, s(6), s(6), Line::Passenger).unwrap();
        assert!(r.is_trivial());
        assert_eq!(BfsRouter.next_hop(&topo, s(6), s(6), Line::Passenger), None);
    }

    #[test]
    fn other_line_goal_unreachable() {
        let topo = junction();
        assert_eq!(
            BfsRouter.route(&topo, s(1), s(11), Line::Passenger).unwrap_err(),
            TopologyError::NoRoute { from: s(1), to: s(11) }
        );
        assert_eq!(BfsRouter.next_hop(&topo, s(3), s(9), Line::Freight), None);
    }

    #[test]
    fn unknown_section_error() {
        let topo = junction();
        assert_eq!(
            BfsRouter.route(&topo, s(50), s(9), Line::Passenger).unwrap_err(),
            TopologyError::UnknownSection(s(50))
        );
    }

    #[test]
    fn directed_tracks_are_respected() {
        // 10 only leads into 6; nothing leads back to 10.
        let topo = junction();
        assert!(BfsRouter.route(&topo, s(6), s(10), Line::Passenger).is_err());
    }

    #[test]
    fn tie_break_follows_adjacency_order() {
        // Diamond a → {b, c} → d: both paths have two hops.
        let build = |first: u32, second: u32| {
            let mut b = TopologyBuilder::new();
            for n in 1..=4 {
                b.add_section(s(n), Line::Passenger);
            }
            b.add_track(s(1), s(first))
                .add_track(s(1), s(second))
                .add_track(s(2), s(4))
                .add_track(s(3), s(4));
            b.build().unwrap()
        };
        let topo = build(2, 3);
        assert_eq!(BfsRouter.next_hop(&topo, s(1), s(4), Line::Passenger), Some(s(2)));
        let topo = build(3, 2);
        assert_eq!(BfsRouter.next_hop(&topo, s(1), s(4), Line::Passenger), Some(s(3)));
    }
}
