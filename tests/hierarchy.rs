//! Superstate behavior observed through the public API.

use statekeeper::builder::Transition;
use statekeeper::effects::StateMachine;
use statekeeper::{state_enum, ConfigurationError};
use std::sync::{Arc, Mutex};

state_enum! {
    enum Player {
        Stopped,
        Active,
        Playing,
        Paused,
        Buffering,
    }
}

state_enum! {
    enum Control {
        Play,
        Pause,
        Stop,
        Stall,
        Ping,
    }
}

#[derive(Default)]
struct Deck {
    player: Option<Player>,
    log: Vec<&'static str>,
}

impl Deck {
    fn at(player: Player) -> Self {
        Self {
            player: Some(player),
            log: Vec::new(),
        }
    }
}

fn log(tag: &'static str) -> impl Fn(&mut Deck) -> statekeeper::effects::ActionResult + Send + Sync {
    move |deck: &mut Deck| {
        deck.log.push(tag);
        Ok(())
    }
}

fn player() -> StateMachine<Deck, Player, Control> {
    let mut machine = StateMachine::new(
        |deck: &Deck| deck.player.unwrap_or(Player::Stopped),
        |deck: &mut Deck, player| deck.player = Some(player),
    );

    machine
        .configure_state(Player::Stopped)
        .permit(Control::Play, Transition::to(Player::Playing))
        .on_entry(log("enter stopped"))
        .on_exit(log("exit stopped"));
    machine
        .configure_state(Player::Active)
        .permit(Control::Stop, Transition::to(Player::Stopped))
        .permit(Control::Ping, Transition::to(Player::Active))
        .on_entry(log("enter active"))
        .on_exit(log("exit active"))
        .on_reentry(log("reenter active"));
    machine
        .configure_state(Player::Playing)
        .substate_of(Player::Active)
        .unwrap()
        .permit(Control::Pause, Transition::to(Player::Paused))
        .permit(Control::Stall, Transition::to(Player::Buffering))
        .on_entry(log("enter playing"))
        .on_exit(log("exit playing"));
    machine
        .configure_state(Player::Paused)
        .substate_of(Player::Active)
        .unwrap()
        .permit(Control::Play, Transition::to(Player::Playing))
        .on_entry(log("enter paused"))
        .on_exit(log("exit paused"));
    machine
        .configure_state(Player::Buffering)
        .substate_of(Player::Playing)
        .unwrap()
        .on_entry(log("enter buffering"))
        .on_exit(log("exit buffering"));

    machine
}

#[test]
fn substates_report_membership_in_every_ancestor() {
    let machine = player();
    let deck = Deck::at(Player::Buffering);

    assert!(machine.is_in_state(&deck, &Player::Buffering));
    assert!(machine.is_in_state(&deck, &Player::Playing));
    assert!(machine.is_in_state(&deck, &Player::Active));
    assert!(!machine.is_in_state(&deck, &Player::Paused));
    assert!(!machine.is_in_state(&deck, &Player::Stopped));
}

#[test]
fn grandchild_inherits_from_grandparent() {
    let machine = player();
    let mut deck = Deck::at(Player::Buffering);

    let result = machine.fire_trigger(&mut deck, Control::Stop).unwrap();

    assert!(result.was_transitioned);
    assert_eq!(result.last_transition_name.as_deref(), Some("Active2Stopped"));
    assert_eq!(deck.player, Some(Player::Stopped));
    assert_eq!(deck.log, vec!["exit buffering", "enter stopped"]);
}

#[test]
fn sibling_move_runs_both_substates_callbacks() {
    let machine = player();
    let mut deck = Deck::at(Player::Playing);

    machine.fire_trigger(&mut deck, Control::Pause).unwrap();

    assert_eq!(deck.log, vec!["exit playing", "enter paused"]);
}

#[test]
fn moving_deeper_skips_exit() {
    let machine = player();
    let mut deck = Deck::at(Player::Playing);

    machine.fire_trigger(&mut deck, Control::Stall).unwrap();

    assert_eq!(deck.player, Some(Player::Buffering));
    assert_eq!(deck.log, vec!["enter buffering"]);
}

#[test]
fn inherited_self_transition_reenters_superstate_target() {
    let machine = player();
    let mut deck = Deck::at(Player::Paused);

    let result = machine.fire_trigger(&mut deck, Control::Ping).unwrap();

    assert_eq!(result.current_state, Player::Active);
    assert_eq!(deck.log, vec!["exit paused"]);

    deck.log.clear();
    machine.fire_trigger(&mut deck, Control::Ping).unwrap();
    assert_eq!(deck.log, vec!["reenter active"]);
}

#[test]
fn entering_substate_from_outside_skips_superstate_entry() {
    let machine = player();
    let mut deck = Deck::at(Player::Stopped);

    machine.fire_trigger(&mut deck, Control::Play).unwrap();

    assert_eq!(deck.log, vec!["exit stopped", "enter playing"]);
}

#[test]
fn unhandled_trigger_in_lineage_is_not_configured() {
    let mut machine = player();
    let misses = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&misses);
    machine.on_trigger_not_configured(move |result| {
        seen.lock().unwrap().push((result.trigger, result.current_state));
    });

    let mut deck = Deck::at(Player::Buffering);
    let result = machine.fire_trigger(&mut deck, Control::Play).unwrap();

    assert!(!result.transition_defined);
    assert_eq!(deck.player, Some(Player::Buffering));
    assert_eq!(*misses.lock().unwrap(), vec![(Control::Play, Player::Buffering)]);
}

#[test]
fn cycles_are_rejected_at_registration() {
    let mut machine = player();

    let error = machine
        .configure_state(Player::Active)
        .substate_of(Player::Buffering)
        .err();

    assert_eq!(
        error,
        Some(ConfigurationError::SuperstateCycle {
            state: "Active".to_string(),
            superstate: "Buffering".to_string(),
        })
    );
    assert_eq!(machine.superstate_of(&Player::Active), None);
    assert_eq!(machine.superstate_of(&Player::Buffering), Some(&Player::Playing));
}

#[test]
fn self_parenting_is_rejected() {
    let mut machine = player();

    let result = machine
        .configure_state(Player::Stopped)
        .substate_of(Player::Stopped);

    assert!(matches!(result, Err(ConfigurationError::SuperstateCycle { .. })));
}
