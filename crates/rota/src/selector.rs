use crate::candidate::CandidateName;
use crate::color::{HexColor, Palette};
use crate::partition::Partition;
use crate::policy::{PolicyError, SpinDelta, SpinPolicy};
use rand::Rng;
use std::time::Duration;
use strum::Display as StrumDisplay;
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinError {
    #[error("Add names first!")]
    NoCandidates,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, StrumDisplay)]
pub enum SelectionState {
    #[default]
    Idle,
    Spinning,
}

/// Candidate picked by a completed spin.
#[derive(Debug, Clone, PartialEq)]
pub struct Winner {
    pub index: usize,
    pub label: CandidateName,
    pub color: HexColor,
}

/// Handle for one accepted spin. `from` and `target` are the rotation before and
/// after the spin, which is all a renderer needs to animate it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinTicket {
    pub id: u64,
    pub from: f64,
    pub target: f64,
    pub duration: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpinOutcome {
    Started(SpinTicket),
    /// A spin was already in flight; nothing changed.
    AlreadySpinning,
}

#[derive(Debug)]
struct InFlight {
    ticket: SpinTicket,
    // candidates and pointer as they were when the spin started
    frozen: Partition,
    pointer_angle: f64,
}

/// Wheel selection state machine.
///
/// `Idle -> Spinning` happens synchronously in [`Selector::request_spin`];
/// `Spinning -> Idle` happens only through [`Selector::complete_spin`], which the
/// caller schedules for `ticket.duration` later.
#[derive(Debug)]
pub struct Selector {
    candidates: Vec<CandidateName>,
    palette: Palette,
    partition: Partition,
    policy: SpinPolicy,
    accumulated: f64,
    in_flight: Option<InFlight>,
    winner: Option<Winner>,
    next_ticket: u64,
}

impl Default for Selector {
    fn default() -> Self {
        Self::from_parts(SpinPolicy::default(), Palette::default())
    }
}

impl Selector {
    pub fn new(policy: SpinPolicy, palette: Palette) -> Result<Self, PolicyError> {
        policy.validate()?;
        Ok(Self::from_parts(policy, palette))
    }

    fn from_parts(policy: SpinPolicy, palette: Palette) -> Self {
        Self {
            candidates: Vec::new(),
            partition: Partition::default(),
            palette,
            policy,
            accumulated: 0.0,
            in_flight: None,
            winner: None,
            next_ticket: 1,
        }
    }

    /// Replaces the whole candidate list and rebuilds the partition.
    ///
    /// A spin already in flight still resolves against the list it started with.
    /// The last winner's index is kept as-is and may now name someone else.
    pub fn set_candidates<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<CandidateName>,
    {
        self.candidates = names.into_iter().map(Into::into).collect();
        self.rebuild();
        log::debug!("Wheel now has {} candidates", self.candidates.len());
    }

    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
        self.rebuild();
    }

    /// Applies from the next spin on.
    pub fn set_policy(&mut self, policy: SpinPolicy) -> Result<(), PolicyError> {
        policy.validate()?;
        self.policy = policy;
        Ok(())
    }

    fn rebuild(&mut self) {
        self.partition = Partition::build(&self.candidates, &self.palette);
    }

    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    pub fn policy(&self) -> &SpinPolicy {
        &self.policy
    }

    pub fn state(&self) -> SelectionState {
        if self.in_flight.is_some() {
            SelectionState::Spinning
        } else {
            SelectionState::Idle
        }
    }

    pub fn is_spinning(&self) -> bool {
        self.state() == SelectionState::Spinning
    }

    /// Rotation the wheel should be shown at, including an in-flight spin.
    pub fn rotation_degrees(&self) -> f64 {
        self.in_flight
            .as_ref()
            .map_or(self.accumulated, |f| f.ticket.target)
    }

    /// Sum of all completed spins.
    pub fn accumulated_rotation(&self) -> f64 {
        self.accumulated
    }

    pub fn winner(&self) -> Option<&Winner> {
        self.winner.as_ref()
    }

    pub fn winner_index(&self) -> Option<usize> {
        self.winner.as_ref().map(|w| w.index)
    }

    pub fn winner_label(&self) -> Option<&CandidateName> {
        self.winner.as_ref().map(|w| &w.label)
    }

    pub fn request_spin<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<SpinOutcome, SpinError> {
        if self.is_spinning() {
            log::debug!("Spin ignored, wheel is already spinning");
            return Ok(SpinOutcome::AlreadySpinning);
        }
        if self.partition.is_empty() {
            log::warn!("Spin rejected, no candidates on the wheel");
            return Err(SpinError::NoCandidates);
        }

        let delta = self.policy.draw(rng);
        Ok(SpinOutcome::Started(self.begin_spin(delta)))
    }

    fn begin_spin(&mut self, delta: SpinDelta) -> SpinTicket {
        let ticket = SpinTicket {
            id: self.next_ticket,
            from: self.accumulated,
            target: self.accumulated + delta.degrees(),
            duration: self.policy.duration,
        };
        self.next_ticket += 1;
        self.in_flight = Some(InFlight {
            ticket,
            frozen: self.partition.clone(),
            pointer_angle: self.policy.pointer_angle,
        });

        log::info!(
            "Spin #{} started: {:.1} degrees over {:?}",
            ticket.id,
            delta.degrees(),
            ticket.duration
        );
        ticket
    }

    /// Resolves the winner of the spin identified by `ticket_id` and returns to
    /// idle. Unknown or already completed tickets return `None` and change nothing.
    pub fn complete_spin(&mut self, ticket_id: u64) -> Option<Winner> {
        if self.in_flight.as_ref()?.ticket.id != ticket_id {
            log::debug!("Ignoring completion for stale spin #{ticket_id}");
            return None;
        }
        let InFlight {
            ticket,
            frozen,
            pointer_angle,
        } = self.in_flight.take()?;

        let index = frozen.slice_under_pointer(pointer_angle, ticket.target)?;
        let slice = frozen.slice(index)?;
        let winner = Winner {
            index,
            label: slice.label.clone(),
            color: slice.color,
        };

        self.accumulated = ticket.target;
        self.winner = Some(winner.clone());
        log::info!("Spin #{} landed on #{index} '{}'", ticket.id, winner.label);
        Some(winner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partition::FULL_TURN;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn selector(names: &[&str]) -> Selector {
        let mut selector = Selector::new(SpinPolicy::default(), Palette::default()).unwrap();
        selector.set_candidates(names.iter().copied());
        selector
    }

    fn started(outcome: Result<SpinOutcome, SpinError>) -> SpinTicket {
        match outcome {
            Ok(SpinOutcome::Started(ticket)) => ticket,
            other => panic!("expected a started spin, got {other:?}"),
        }
    }

    #[test]
    fn test_starts_idle() {
        let selector = selector(&["Alice"]);
        assert_eq!(selector.state(), SelectionState::Idle);
        assert_eq!(selector.rotation_degrees(), 0.0);
        assert!(selector.winner().is_none());
    }

    #[test]
    fn test_zero_candidate_guard() {
        let mut selector = selector(&[]);
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(
            selector.request_spin(&mut rng),
            Err(SpinError::NoCandidates)
        );
        assert_eq!(selector.state(), SelectionState::Idle);
        assert_eq!(selector.rotation_degrees(), 0.0);
        assert_eq!(SpinError::NoCandidates.to_string(), "Add names first!");
    }

    #[test]
    fn test_request_commits_spinning_and_target_immediately() {
        let mut selector = selector(&["Alice", "Bob"]);
        let mut rng = StdRng::seed_from_u64(2);

        let ticket = started(selector.request_spin(&mut rng));
        assert_eq!(selector.state(), SelectionState::Spinning);
        assert_eq!(ticket.from, 0.0);
        assert_eq!(selector.rotation_degrees(), ticket.target);
        assert_eq!(selector.accumulated_rotation(), 0.0);
        assert!(selector.winner().is_none());
    }

    #[test]
    fn test_second_request_while_spinning_is_ignored() {
        let mut selector = selector(&["Alice", "Bob", "Charlie"]);
        let mut rng = StdRng::seed_from_u64(3);

        let ticket = started(selector.request_spin(&mut rng));
        assert_eq!(
            selector.request_spin(&mut rng),
            Ok(SpinOutcome::AlreadySpinning)
        );
        assert_eq!(selector.rotation_degrees(), ticket.target);

        assert!(selector.complete_spin(ticket.id).is_some());
        assert!(selector.complete_spin(ticket.id).is_none());
        assert_eq!(selector.state(), SelectionState::Idle);
    }

    #[test]
    fn test_stale_ticket_is_ignored() {
        let mut selector = selector(&["Alice", "Bob"]);
        let mut rng = StdRng::seed_from_u64(4);

        let ticket = started(selector.request_spin(&mut rng));
        assert!(selector.complete_spin(ticket.id + 1).is_none());
        assert!(selector.is_spinning());
        assert!(selector.complete_spin(ticket.id).is_some());
    }

    #[test]
    fn test_winner_matches_concrete_rotation() {
        let mut selector = selector(&["Alice", "Bob", "Charlie", "David"]);

        // 3 full turns + 90 degrees rests at 90
        let ticket = selector.begin_spin(SpinDelta::new(3, 0.25));
        assert_eq!(ticket.target, 3.0 * FULL_TURN + 90.0);

        let winner = selector.complete_spin(ticket.id).unwrap();
        assert_eq!(winner.index, 2);
        assert_eq!(winner.label.as_str(), "Charlie");
        assert_eq!(selector.winner_index(), Some(2));
        assert_eq!(selector.winner_label().map(|l| l.as_str()), Some("Charlie"));
    }

    #[test]
    fn test_rotation_accumulates_across_spins() {
        let mut selector = selector(&["Alice", "Bob", "Charlie"]);
        let mut rng = StdRng::seed_from_u64(5);
        let mut expected = 0.0;

        for _ in 0..25 {
            let before = selector.accumulated_rotation();
            let ticket = started(selector.request_spin(&mut rng));
            assert_eq!(ticket.from, before);
            expected += ticket.target - ticket.from;

            selector.complete_spin(ticket.id).unwrap();
            assert!(selector.accumulated_rotation() > before);
            assert!((selector.accumulated_rotation() - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn test_candidates_frozen_during_spin() {
        let mut selector = selector(&["Alice", "Bob", "Charlie", "David"]);
        let ticket = selector.begin_spin(SpinDelta::new(3, 0.25));

        selector.set_candidates(["Zed"]);
        assert_eq!(selector.partition().len(), 1);

        let winner = selector.complete_spin(ticket.id).unwrap();
        assert_eq!(winner.index, 2);
        assert_eq!(winner.label.as_str(), "Charlie");
    }

    #[test]
    fn test_policy_change_mid_spin_keeps_pointer() {
        let mut selector = selector(&["Alice", "Bob", "Charlie", "David"]);
        let ticket = selector.begin_spin(SpinDelta::new(3, 0.25));

        let moved = SpinPolicy {
            pointer_angle: 90.0,
            ..SpinPolicy::default()
        };
        selector.set_policy(moved).unwrap();

        let winner = selector.complete_spin(ticket.id).unwrap();
        assert_eq!(winner.index, 2);
        assert_eq!(winner.label.as_str(), "Charlie");

        // the new pointer applies from the next spin
        let ticket = selector.begin_spin(SpinDelta::new(3, 0.0));
        assert_eq!(selector.complete_spin(ticket.id).unwrap().index, 0);
    }

    #[test]
    fn test_winner_index_survives_candidate_change() {
        let mut selector = selector(&["Alice", "Bob", "Charlie", "David"]);
        let ticket = selector.begin_spin(SpinDelta::new(4, 0.25));
        selector.complete_spin(ticket.id).unwrap();

        selector.set_candidates(["Eve", "Frank", "Gus"]);
        assert_eq!(selector.winner_index(), Some(2));
        assert_eq!(selector.winner_label().map(|l| l.as_str()), Some("Charlie"));
    }

    #[test]
    fn test_winner_distribution_is_uniform() {
        const SPINS: usize = 40_000;
        let names = ["A", "B", "C", "D", "E"];
        let mut selector = selector(&names);
        let mut rng = StdRng::seed_from_u64(0xC0FFEE);
        let mut counts = [0usize; 5];

        for _ in 0..SPINS {
            let ticket = started(selector.request_spin(&mut rng));
            let winner = selector.complete_spin(ticket.id).unwrap();
            counts[winner.index] += 1;
        }

        let expected = SPINS / names.len();
        for (i, count) in counts.iter().enumerate() {
            let deviation = count.abs_diff(expected);
            assert!(
                deviation < expected / 20,
                "index {i} won {count} times, expected about {expected}"
            );
        }
    }

    #[test]
    fn test_invalid_policy_is_rejected() {
        let policy = SpinPolicy {
            min_turns: 5,
            max_turns: 3,
            ..SpinPolicy::default()
        };
        assert!(Selector::new(policy, Palette::default()).is_err());

        let mut selector = selector(&["Alice"]);
        assert!(selector.set_policy(policy).is_err());
        assert_eq!(selector.policy(), &SpinPolicy::default());
    }
}
