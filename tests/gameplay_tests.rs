//! Full play-throughs of the built-in levels.
//!
//! Each test walks a level to a terminal state (or a deliberate failure)
//! through the environment contract, checking rewards, rule rewrites, and
//! snapshot independence along the way.

use rulegrid::core::{Action, Property};
use rulegrid::envs::create_environment;
use rulegrid::grid::ObjectQuery;

fn walk(env: &mut rulegrid::Environment, actions: &[Action]) -> f64 {
    let mut total = 0.0;
    for &action in actions {
        total += env.step(action).reward;
    }
    total
}

#[test]
fn test_simple_ten_rights_win() {
    let mut env = create_environment("simple").unwrap();
    for i in 0..10 {
        let transition = env.step(Action::Right);
        if i < 9 {
            assert!(!transition.done, "won early at step {i}");
            assert_eq!(transition.reward, 0.0);
        } else {
            assert!(transition.done);
            assert!(transition.info.won);
            assert_eq!(transition.reward, 1.0);
        }
    }
    assert!(env.grid().won());
    assert!(!env.grid().lost());
}

#[test]
fn test_push_puzzle_solution() {
    let mut env = create_environment("push_puzzle").unwrap();
    let reward = walk(&mut env, &[Action::Right; 7]);
    assert!(env.grid().won());
    assert_eq!(reward, 1.0);

    // The rock was shoved past the flag cell.
    let rocks = env
        .grid()
        .find_objects(ObjectQuery::new().name("rock").is_text(false));
    assert_eq!(rocks[0].x, 10);
}

#[test]
fn test_wall_maze_solution() {
    let mut env = create_environment("wall_maze").unwrap();
    let mut actions = vec![Action::Up, Action::Up];
    actions.extend([Action::Right; 8]);
    actions.extend([Action::Down, Action::Down]);
    let reward = walk(&mut env, &actions);
    assert!(env.grid().won());
    assert_eq!(reward, 1.0);
}

#[test]
fn test_two_room_solution() {
    let mut env = create_environment("two_room").unwrap();
    let mut actions = vec![Action::Down];
    actions.extend([Action::Right; 7]);
    actions.push(Action::Up);
    walk(&mut env, &actions);
    assert!(env.grid().won());
}

#[test]
fn test_make_win_assembles_the_rule() {
    let mut env = create_environment("make_win").unwrap();

    let mut actions = vec![Action::Down; 5];
    actions.extend([Action::Left; 2]);
    actions.extend([Action::Up; 2]);
    walk(&mut env, &actions);

    // FLAG IS WIN now active.
    let obs = env.observe();
    assert!(obs.rules.contains(&"FLAG IS WIN".to_string()));

    let mut finish = vec![Action::Right; 5];
    finish.push(Action::Up);
    let reward = walk(&mut env, &finish);
    assert!(env.grid().won());
    assert_eq!(reward, 1.0);
}

#[test]
fn test_make_win_distr_ignores_distractors() {
    let mut env = create_environment("make_win_distr").unwrap();

    let mut actions = vec![Action::Down; 5];
    actions.extend([Action::Left; 2]);
    actions.extend([Action::Up; 2]);
    walk(&mut env, &actions);

    let obs = env.observe();
    assert!(obs.rules.contains(&"FLAG IS WIN".to_string()));
    // The distractor words formed nothing.
    assert!(!obs.rules.iter().any(|r| r.starts_with("ROCK")));

    let mut finish = vec![Action::Right; 5];
    finish.push(Action::Up);
    let reward = walk(&mut env, &finish);
    assert!(env.grid().won());
    assert_eq!(reward, 1.0);
}

#[test]
fn test_two_room_break_stop_solution() {
    let mut env = create_environment("two_room_break_stop").unwrap();

    // The wall has no doorway; walking at it head-on goes nowhere.
    walk(&mut env, &[Action::Right; 3]);
    let baba = env
        .grid()
        .find_objects(ObjectQuery::new().name("baba").is_text(false));
    assert_eq!(baba[0].x, 5);

    // Shove "stop" out of the statement, then walk straight through.
    walk(&mut env, &[Action::Left, Action::Left, Action::Down, Action::Down]);
    let obs = env.observe();
    assert!(!obs.rules.contains(&"WALL IS STOP".to_string()));

    let mut actions = vec![Action::Up];
    actions.extend([Action::Right; 7]);
    actions.push(Action::Up);
    let reward = walk(&mut env, &actions);
    assert!(env.grid().won());
    assert_eq!(reward, 1.0);
}

#[test]
fn test_you_win_makes_the_player_the_goal() {
    let mut env = create_environment("you_win").unwrap();

    let mut actions = vec![Action::Down; 5];
    actions.extend([Action::Left; 2]);
    actions.push(Action::Up);
    let reward = walk(&mut env, &actions);
    assert_eq!(reward, 0.0);
    assert!(!env.grid().won());

    // The second push completes BABA IS WIN; baba overlaps itself.
    let transition = env.step(Action::Up);
    assert!(transition.done);
    assert_eq!(transition.reward, 1.0);
    assert!(transition.observation.rules.contains(&"BABA IS WIN".to_string()));
}

#[test]
fn test_goto_win_color_corridor() {
    let mut env = create_environment("goto_win_color").unwrap();
    let flags = env
        .grid()
        .find_objects(ObjectQuery::new().name("flag").is_text(false));
    assert_eq!(flags[0].color.as_deref(), Some("gold"));

    let reward = walk(&mut env, &[Action::Right; 10]);
    assert!(env.grid().won());
    assert_eq!(reward, 1.0);
}

#[test]
fn test_make_you_recruits_the_rock() {
    let mut env = create_environment("make_you").unwrap();

    let mut actions = vec![Action::Down; 5];
    actions.extend([Action::Left; 2]);
    actions.extend([Action::Up; 2]);
    walk(&mut env, &actions);
    let obs = env.observe();
    assert!(obs.rules.contains(&"ROCK IS YOU".to_string()));

    // Both pieces now move together; only the rock can reach the flag.
    let mut finish = vec![Action::Right; 2];
    finish.extend([Action::Down; 2]);
    let reward = walk(&mut env, &finish);
    assert!(env.grid().won());
    assert_eq!(reward, 1.0);
    let rocks = env
        .grid()
        .find_objects(ObjectQuery::new().name("rock").is_text(false));
    assert_eq!((rocks[0].x, rocks[0].y), (11, 7));
}

#[test]
fn test_transform_puzzle_turns_the_wall_into_flags() {
    let mut env = create_environment("transform_puzzle").unwrap();

    let mut actions = vec![Action::Right];
    actions.extend([Action::Down; 4]);
    actions.extend([Action::Left; 2]);
    walk(&mut env, &actions);
    let obs = env.observe();
    assert!(obs.rules.contains(&"WALL IS FLAG".to_string()));

    // One more tick applies the transformation; the barrier is now WIN.
    env.step(Action::Right);
    assert!(env
        .grid()
        .find_objects(ObjectQuery::new().name("wall").is_text(false))
        .is_empty());

    let reward = walk(&mut env, &[Action::Right; 2]);
    assert!(env.grid().won());
    assert_eq!(reward, 1.0);
}

#[test]
fn test_transformation_turns_rocks_into_flags() {
    let mut env = create_environment("transformation").unwrap();

    let mut actions = vec![Action::Left; 2];
    actions.extend([Action::Up; 2]);
    walk(&mut env, &actions);

    // One extra tick lets the freshly spelled rule transform the rocks.
    env.step(Action::Wait);
    assert!(env
        .grid()
        .find_objects(ObjectQuery::new().name("rock").is_text(false))
        .is_empty());
    let flags = env
        .grid()
        .find_objects(ObjectQuery::new().name("flag").is_text(false));
    assert_eq!(flags.len(), 2);

    let mut finish = vec![Action::Right; 4];
    finish.push(Action::Down);
    walk(&mut env, &finish);
    assert!(env.grid().won());
}

#[test]
fn test_multi_rule_sink_clears_the_moat() {
    let mut env = create_environment("multi_rule").unwrap();
    walk(&mut env, &[Action::Right; 4]);

    // The pushed rock sank together with the water cell.
    assert!(env
        .grid()
        .find_objects(ObjectQuery::new().name("rock").is_text(false))
        .is_empty());
    let water = env
        .grid()
        .find_objects(ObjectQuery::new().name("water").is_text(false));
    assert_eq!(water.len(), 2);

    walk(&mut env, &[Action::Right; 4]);
    assert!(env.grid().won());
}

#[test]
fn test_multi_rule_walking_into_water_loses() {
    let mut env = create_environment("multi_rule").unwrap();
    let mut actions = vec![Action::Up];
    actions.extend([Action::Right; 5]);
    let reward = walk(&mut env, &actions);

    assert!(env.grid().lost());
    assert!(!env.grid().won());
    assert_eq!(reward, 0.0);
    assert!(env
        .grid()
        .find_objects(ObjectQuery::new().name("baba").is_text(false))
        .is_empty());
}

#[test]
fn test_rule_chain_recruits_transformed_you() {
    let mut env = create_environment("rule_chain").unwrap();
    env.step(Action::Right);

    // The rock became a second baba, which is YOU from here on.
    let babas = env
        .grid()
        .find_objects(ObjectQuery::new().name("baba").is_text(false));
    assert_eq!(babas.len(), 2);
    env.grid_mut().update_rules();
    assert_eq!(
        env.grid().rule_manager().you_objects(env.grid()).len(),
        2
    );

    let mut actions = vec![Action::Right; 2];
    actions.extend([Action::Down; 2]);
    walk(&mut env, &actions);
    assert!(env.grid().won());
}

#[test]
fn test_snapshot_is_unaffected_by_play() {
    let mut env = create_environment("simple").unwrap();
    env.step(Action::Right);
    env.step(Action::Right);

    let snapshot = env.grid().copy();
    assert_eq!(snapshot.steps(), env.grid().steps());

    walk(&mut env, &[Action::Right; 8]);
    assert!(env.grid().won());
    assert_eq!(snapshot.steps(), 2);
    assert!(!snapshot.won());

    // And the other way: stepping the snapshot leaves the source alone.
    let mut replay = snapshot.copy();
    replay.step(Action::Left);
    assert_eq!(snapshot.steps(), 2);
    assert_eq!(replay.steps(), 3);
}
