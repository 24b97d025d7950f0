//! End-to-end walks of the classic puzzle and its edge cases.

use bridge_graph::{
    explore, render_trace, ActorConfig, Location, MovePolicy, Outcome, Puzzle, PuzzleConfig,
    Walker,
};

fn classic(time_limit: u32) -> Puzzle {
    let config = PuzzleConfig {
        actors: vec![
            ActorConfig::new("Me", 1),
            ActorConfig::new("Assistant", 2),
            ActorConfig::new("Janitor", 5),
            ActorConfig::new("Professor", 10),
        ],
        time_limit,
        ..PuzzleConfig::default()
    };
    Puzzle::from_config(&config).unwrap()
}

#[test]
fn test_seventeen_minutes_is_enough() {
    let puzzle = classic(17);
    let report = explore(&puzzle);

    assert!(report.solvable());
    assert!(report.stats.victories >= 1);
    assert_eq!(report.stats.dead_ends, 0);

    // Restricted walks alternate pairs forward and singles back, so every
    // victory takes exactly five moves with four actors.
    for t in Walker::new(&puzzle).filter(|t| t.outcome == Outcome::Victory) {
        assert_eq!(t.depth, 4);
        assert_eq!(t.to.actors_at(Location::End), puzzle.roster.all());
        assert_eq!(t.to.elapsed_time(), 17);
    }
}

#[test]
fn test_five_minutes_is_not_enough() {
    let puzzle = classic(5);
    let report = explore(&puzzle);

    assert!(!report.solvable());
    assert!(report.stats.exceeded > 0);
    assert!(report.stats.transitions > 0);

    let mut out = Vec::new();
    render_trace(&mut out, &puzzle, Walker::new(&puzzle)).unwrap();
    let trace = String::from_utf8(out).unwrap();
    assert!(trace.ends_with(&format!(
        "no solution found ({} transitions)\n",
        report.stats.transitions
    )));
}

#[test]
fn test_lone_actor_depends_on_policy() {
    let config = PuzzleConfig {
        actors: vec![ActorConfig::new("Me", 1)],
        time_limit: 1,
        ..PuzzleConfig::default()
    };
    let restricted = Puzzle::from_config(&config).unwrap();
    let report = explore(&restricted);
    assert_eq!(report.stats.transitions, 0);
    assert_eq!(report.stats.dead_ends, 1);
    assert!(!report.solvable());

    let permissive = restricted.with_policy(MovePolicy::Permissive);
    let report = explore(&permissive);
    assert_eq!(report.stats.transitions, 1);
    assert_eq!(report.stats.victories, 1);
    assert_eq!(report.first_victory_time, Some(1));
}

#[test]
fn test_permissive_walk_contains_restricted_walk() {
    let restricted = classic(8);
    let permissive = restricted.clone().with_policy(MovePolicy::Permissive);

    let wide = explore(&permissive);
    let narrow = explore(&restricted);
    assert!(wide.stats.transitions > narrow.stats.transitions);
    assert!(wide.stats.max_depth >= narrow.stats.max_depth);
}
