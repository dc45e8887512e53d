//! Full-game tests against the bundled card data.
//!
//! These drive the state machine the way the web front end does and check
//! the invariants that must hold at every step.

use proptest::prelude::*;

use hadrians_wall::cards::{is_permutation, Resource};
use hadrians_wall::core::{Action, CardChoice, Difficulty, Direction, GameRng, GameState, LaneTally, Phase};
use hadrians_wall::rules::{GameError, GameStateMachine};

fn machine() -> GameStateMachine {
    GameStateMachine::standard().expect("bundled card data should load")
}

/// advance -> pick -> attack
fn play_round(machine: &GameStateMachine, state: &GameState, choice: CardChoice) -> GameState {
    let state = machine.advance_round(state).unwrap();
    let state = machine.pick_player_card(&state, choice).unwrap();
    machine.resolve_attack(&state).unwrap()
}

fn difficulty() -> impl Strategy<Value = Difficulty> {
    prop_oneof![
        Just(Difficulty::Easy),
        Just(Difficulty::Medium),
        Just(Difficulty::Hard),
    ]
}

fn choice() -> impl Strategy<Value = CardChoice> {
    prop_oneof![Just(CardChoice::First), Just(CardChoice::Second)]
}

/// Scenario: a new easy game opens round 1 from the first pict card.
#[test]
fn test_first_round_scenario() {
    let machine = machine();
    let state = machine.start_game(Difficulty::Easy, &mut GameRng::new(42));
    assert_eq!(state.round, 0);
    assert_eq!(state.phase, Phase::Start);

    let state = machine.advance_round(&state).unwrap();
    assert_eq!(state.round, 1);
    assert_eq!(state.phase, Phase::PlayerCards);

    let first_pict = machine.library().pict_card(state.pict_card_order[0]).unwrap();
    for resource in Resource::ROUND {
        let carried = match resource {
            Resource::Stone => 1,
            _ => 0,
        };
        let yielded = first_pict.resources.get(&resource).copied().unwrap_or(0);
        assert_eq!(state.round_resources.get(resource), yielded + carried, "{resource}");
    }
}

/// Scenario: easy round 1 with no market cards draws one attacker.
#[test]
fn test_first_attack_scenario() {
    let machine = machine();
    let state = machine.start_game(Difficulty::Easy, &mut GameRng::new(42));
    let state = machine.advance_round(&state).unwrap();
    let state = machine.pick_player_card(&state, CardChoice::First).unwrap();
    assert_eq!(state.round_market_pict_cards, 0);

    let before = state.pict_card_location;
    let state = machine.resolve_attack(&state).unwrap();

    assert_eq!(state.pict_card_location, before + 1);
    assert_eq!(state.round_pict_attack.total(), 1);

    let attacker = machine.library().pict_card(state.pict_card_order[before]).unwrap();
    assert_eq!(state.round_pict_attack.get(attacker.attack), 1);
}

/// A whole game runs six rounds, then refuses a seventh.
#[test]
fn test_full_game_then_game_over() {
    let machine = machine();
    for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
        let mut state = machine.start_game(difficulty, &mut GameRng::new(7));

        for round in 1..=6 {
            state = play_round(&machine, &state, CardChoice::Second);
            assert_eq!(state.round, round);
            assert!(state.pict_card_location <= state.pict_card_order.len());
            assert!(state.player_card_location <= state.player_card_order.len());
        }

        assert!(machine.is_final_round(&state));
        assert_eq!(state.player_cards_selected.len(), 6);

        let err = machine.advance_round(&state).unwrap_err();
        assert_eq!(err, GameError::ScoringTableExhausted { round: 7 });
        assert!(err.is_game_over());
    }
}

/// Buying pict cards at the market can run the deck dry before round 6.
#[test]
fn test_market_can_exhaust_pict_deck() {
    let machine = machine();
    let mut state = machine.start_game(Difficulty::Hard, &mut GameRng::new(3));
    state = machine.advance_round(&state).unwrap();
    state = machine.pick_player_card(&state, CardChoice::First).unwrap();

    for _ in 0..machine.library().pict_deck_len() {
        state = machine.use_enemy_market(&state);
    }

    let err = machine.resolve_attack(&state).unwrap_err();
    assert!(matches!(err, GameError::DeckExhausted(_)));
    assert!(err.is_game_over());
}

#[test]
fn test_enemy_deck_is_never_drawn() {
    let machine = machine();
    let mut state = machine.start_game(Difficulty::Medium, &mut GameRng::new(5));
    let enemy_order = state.enemy_card_order.clone();

    for _ in 0..3 {
        state = play_round(&machine, &state, CardChoice::First);
    }

    assert_eq!(state.enemy_card_location, 0);
    assert_eq!(state.enemy_card_order, enemy_order);
}

#[test]
fn test_actions_from_routes() {
    let machine = machine();
    let mut rng = GameRng::new(99);
    let mut state = machine.start_game(Difficulty::Easy, &mut rng);

    for route in [
        "ongoing/builder/increment",
        "nextround",
        "pickplayercard/1",
        "enemymarket",
        "gladiator",
        "pictattack",
        "marketnumber",
        "debug",
    ] {
        let action = Action::parse_route(route).unwrap();
        state = machine.apply(&state, &action, &mut rng).unwrap();
    }

    assert_eq!(state.round, 1);
    assert_eq!(state.phase, Phase::NextRound);
    assert_eq!(state.ongoing_resources.get(Resource::Builder), 1);
    assert!(state.round_gladiator.is_some());
    assert!(state.round_market_number.is_some());
    assert!(state.debug_flag);
    // 1 round opener + 1 gladiator + 2 attackers + 1 market number
    assert_eq!(state.pict_card_location, 5);
    assert_eq!(state.round_pict_attack.total(), 2);
}

#[test]
fn test_round_resource_route_stops_at_zero() {
    let machine = machine();
    let mut rng = GameRng::new(12);
    let mut state = machine.start_game(Difficulty::Medium, &mut rng);
    state = machine.apply(&state, &Action::AdvanceRound, &mut rng).unwrap();

    let down = Action::parse_route("round/servant/decrement").unwrap();
    let start = state.round_resources.get(Resource::Servant);
    for _ in 0..=start {
        state = machine.apply(&state, &down, &mut rng).unwrap();
    }
    assert_eq!(state.round_resources.get(Resource::Servant), 0);

    let up = Action::parse_route("round/servant/increment").unwrap();
    state = machine.apply(&state, &up, &mut rng).unwrap();
    assert_eq!(state.round_resources.get(Resource::Servant), 1);
}

proptest! {
    #[test]
    fn prop_orders_are_permutations(seed in any::<u64>(), difficulty in difficulty()) {
        let machine = machine();
        let state = machine.start_game(difficulty, &mut GameRng::new(seed));
        let players = machine.library().player_deck_len();
        let picts = machine.library().pict_deck_len();

        prop_assert!(is_permutation(&state.player_card_order, players));
        prop_assert!(is_permutation(&state.enemy_card_order, players));
        prop_assert!(is_permutation(&state.pict_card_order, picts));
    }

    #[test]
    fn prop_pick_advances_by_two(seed in any::<u64>(), rounds in 1usize..=6, picks in proptest::collection::vec(choice(), 6)) {
        let machine = machine();
        let mut state = machine.start_game(Difficulty::Easy, &mut GameRng::new(seed));

        for &pick in picks.iter().take(rounds) {
            state = machine.advance_round(&state).unwrap();
            let before = state.player_card_location;
            state = machine.pick_player_card(&state, pick).unwrap();
            prop_assert_eq!(state.player_card_location, before + 2);
            state = machine.resolve_attack(&state).unwrap();
        }
        prop_assert_eq!(state.player_cards_selected.len(), rounds);
    }

    #[test]
    fn prop_advance_resets_attack(seed in any::<u64>(), difficulty in difficulty(), market in 0u32..4) {
        let machine = machine();
        let mut state = machine.start_game(difficulty, &mut GameRng::new(seed));
        state = machine.advance_round(&state).unwrap();
        for _ in 0..market {
            state = machine.use_enemy_market(&state);
        }
        state = machine.pick_player_card(&state, CardChoice::First).unwrap();
        state = machine.resolve_attack(&state).unwrap();

        let next = machine.advance_round(&state).unwrap();
        prop_assert_eq!(next.round_pict_attack, LaneTally::default());
        prop_assert_eq!(next.round_market_pict_cards, 0);
    }

    #[test]
    fn prop_attack_draws_match_table(
        seed in any::<u64>(),
        difficulty in difficulty(),
        target in 1u32..=6,
        market in 0u32..4,
    ) {
        let machine = machine();
        let mut state = machine.start_game(difficulty, &mut GameRng::new(seed));
        for _ in 1..target {
            state = play_round(&machine, &state, CardChoice::First);
        }

        state = machine.advance_round(&state).unwrap();
        state = machine.pick_player_card(&state, CardChoice::First).unwrap();
        for _ in 0..market {
            state = machine.use_enemy_market(&state);
        }
        let before = state.pict_card_location;
        state = machine.resolve_attack(&state).unwrap();

        let expected = machine.config().scoring.row(target).unwrap().pict_draws(difficulty) + market;
        prop_assert_eq!((state.pict_card_location - before) as u32, expected);
        prop_assert_eq!(state.round_pict_attack.total(), expected);
    }

    #[test]
    fn prop_ongoing_round_trip(seed in any::<u64>(), steps in 0usize..5) {
        let machine = machine();
        let start = machine.start_game(Difficulty::Easy, &mut GameRng::new(seed));

        let mut state = start.clone();
        for _ in 0..steps {
            state = machine.adjust_ongoing_resource(&state, "stone", Direction::Increment);
        }
        for _ in 0..steps {
            state = machine.adjust_ongoing_resource(&state, "stone", Direction::Decrement);
        }
        prop_assert_eq!(state.ongoing_resources.get(Resource::Stone), start.ongoing_resources.get(Resource::Stone));
    }
}
