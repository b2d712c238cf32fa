//! Batch conflict resolution.
//!
//! Every decision is taken against the occupancy snapshot at tick start;
//! nothing is written until the whole batch is decided.
//!
//! ```text
//! 1. Exits      a train already on its exit section leaves.
//! 2. Proposals  router next hop, then the line / adjacency / crossing
//!               guards.  Failing any of them holds the train.
//! 3. Swaps      A wants B's section and B wants A's: accept both.
//! 4. Fixpoint   a destination is available when it is unclaimed and
//!               either empty or being vacated by a departing train.
//!               Each round awards every available destination to one
//!               proposer (passenger before freight, then request order);
//!               winners depart, which can free further destinations for
//!               the next round.  Stops when a round awards nothing.
//! ```
//!
//! A proposal still pending after step 4 is either facing a train that stays
//! put (`Blocked`) or wants a section someone else already won
//! (`LostContention`).

use std::collections::BTreeMap;

use il_core::{Line, SectionId, TrainId, TrainIdx};
use il_registry::Registry;
use il_topology::{Crossing, Router, Topology};
use tracing::trace;

use crate::{HoldReason, Map, Set};

/// What the resolver decided for one requested train.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Outcome {
    /// Leaves from the exit section it already occupies.
    Exit,
    /// Advances to `to`; `exits` if `to` is its exit section.
    Move { to: SectionId, exits: bool },
    Hold { wanted: Option<SectionId>, reason: HoldReason },
}

/// Per-train outcomes, in request order.
#[derive(Debug, Default)]
pub(crate) struct Plan {
    pub outcomes: Vec<(TrainIdx, Outcome)>,
}

impl Plan {
    /// Split into the `(exits, moves)` batches [`Registry::commit`] takes.
    pub fn commit_batches(&self) -> (Vec<TrainIdx>, Vec<(TrainIdx, SectionId)>) {
        let mut exits = Vec::new();
        let mut moves = Vec::new();
        for (train, outcome) in &self.outcomes {
            match *outcome {
                Outcome::Exit | Outcome::Move { exits: true, .. } => exits.push(*train),
                Outcome::Move { to, exits: false }                => moves.push((*train, to)),
                Outcome::Hold { .. }                              => {}
            }
        }
        (exits, moves)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Pending,
    Accepted,
    Lost(TrainIdx),
}

struct Proposal {
    train: TrainIdx,
    from:  SectionId,
    to:    SectionId,
    line:  Line,
    /// Position in the request, used as the secondary tie-break.
    order: usize,
}

/// Decide the outcome of one tick for `requested` (distinct, active trains
/// in request order).  Pure: reads `registry`, never writes it.
pub(crate) fn resolve<R: Router>(
    topology:  &Topology,
    router:    &R,
    registry:  &Registry,
    requested: &[TrainIdx],
) -> Plan {
    let trains = &registry.trains;
    let occupancy = &registry.occupancy;

    let mut outcomes: Vec<Option<Outcome>> = vec![None; requested.len()];
    let mut proposals: Vec<Proposal> = Vec::with_capacity(requested.len());
    let mut departing: Set<TrainIdx> = Set::default();

    // ── Exits and proposals ───────────────────────────────────────────────
    for (order, &train) in requested.iter().enumerate() {
        let i = train.index();
        let (here, goal, line) = (trains.section[i], trains.exit[i], trains.line[i]);
        if here == goal {
            departing.insert(train);
            outcomes[order] = Some(Outcome::Exit);
            continue;
        }
        match propose(topology, router, registry, here, goal, line) {
            Ok(to) => {
                trace!(train = %trains.ids[i], from = %here, %to, "proposal");
                proposals.push(Proposal { train, from: here, to, line, order });
            }
            Err((wanted, reason)) => {
                outcomes[order] = Some(Outcome::Hold { wanted, reason });
            }
        }
    }

    let mut state = vec![State::Pending; proposals.len()];
    // Destination → train awarded it.
    let mut claimed: Map<SectionId, TrainIdx> = Map::default();

    // ── Swaps ─────────────────────────────────────────────────────────────
    let by_train: Map<TrainIdx, usize> = proposals
        .iter()
        .enumerate()
        .map(|(k, p)| (p.train, k))
        .collect();
    for k in 0..proposals.len() {
        if state[k] != State::Pending {
            continue;
        }
        let partner = occupancy
            .occupant(proposals[k].to)
            .and_then(|o| by_train.get(&o).copied())
            .filter(|&j| proposals[j].to == proposals[k].from && state[j] == State::Pending);
        if let Some(j) = partner {
            for x in [k, j] {
                state[x] = State::Accepted;
                departing.insert(proposals[x].train);
                claimed.insert(proposals[x].to, proposals[x].train);
            }
        }
    }

    // ── Fixpoint over available destinations ──────────────────────────────
    loop {
        let mut contenders: BTreeMap<SectionId, Vec<usize>> = BTreeMap::new();
        for (k, p) in proposals.iter().enumerate() {
            let available = !claimed.contains_key(&p.to)
                && occupancy
                    .occupant(p.to)
                    .is_none_or(|o| departing.contains(&o));
            if state[k] == State::Pending && available {
                contenders.entry(p.to).or_default().push(k);
            }
        }
        if contenders.is_empty() {
            break;
        }
        for (to, ks) in contenders {
            let Some(&winner) = ks
                .iter()
                .min_by_key(|&&k| (proposals[k].line != Line::Passenger, proposals[k].order))
            else {
                continue;
            };
            let winner_train = proposals[winner].train;
            state[winner] = State::Accepted;
            departing.insert(winner_train);
            claimed.insert(to, winner_train);
            for k in ks.into_iter().filter(|&k| k != winner) {
                state[k] = State::Lost(winner_train);
            }
        }
    }

    // ── Outcomes ──────────────────────────────────────────────────────────
    let name = |t: TrainIdx| -> TrainId { trains.ids[t.index()].clone() };
    for (k, p) in proposals.iter().enumerate() {
        let outcome = match state[k] {
            State::Accepted => Outcome::Move {
                to:    p.to,
                exits: p.to == trains.exit[p.train.index()],
            },
            State::Lost(winner) => Outcome::Hold {
                wanted: Some(p.to),
                reason: HoldReason::LostContention { winner: name(winner) },
            },
            State::Pending => {
                // Free, unclaimed destinations are always awarded, so a
                // pending proposal faces either a winner or a stayer.
                let reason = match claimed.get(&p.to) {
                    Some(&winner) => HoldReason::LostContention { winner: name(winner) },
                    None => HoldReason::Blocked {
                        by: occupancy.occupant(p.to).map(name).unwrap_or_default(),
                    },
                };
                Outcome::Hold { wanted: Some(p.to), reason }
            }
        };
        outcomes[p.order] = Some(outcome);
    }

    Plan {
        outcomes: requested
            .iter()
            .zip(outcomes)
            .filter_map(|(&t, o)| o.map(|o| (t, o)))
            .collect(),
    }
}

/// The router's next hop for a train at `here`, or the reason it must hold.
fn propose<R: Router>(
    topology: &Topology,
    router:   &R,
    registry: &Registry,
    here:     SectionId,
    goal:     SectionId,
    line:     Line,
) -> Result<SectionId, (Option<SectionId>, HoldReason)> {
    let to = router
        .next_hop(topology, here, goal, line)
        .ok_or((None, HoldReason::NoRoute))?;
    if topology.line(to) != Some(line) {
        return Err((Some(to), HoldReason::OffLine));
    }
    if !topology.is_adjacent(here, to, line) {
        return Err((Some(to), HoldReason::NotAdjacent));
    }
    if line == Line::Freight {
        if let Some(c) = topology
            .crossings_guarding(here, to)
            .find(|c| passenger_in_zone(registry, c))
        {
            return Err((Some(to), HoldReason::Yield { crossing: c.name.clone() }));
        }
    }
    Ok(to)
}

fn passenger_in_zone(registry: &Registry, crossing: &Crossing) -> bool {
    crossing.zone.iter().any(|&s| {
        registry
            .occupancy
            .occupant(s)
            .is_some_and(|t| registry.trains.line[t.index()] == Line::Passenger)
    })
}
