//! Properties of the MDP engine that the rest of the system leans on.

mod common;

use common::{Frame, ScriptedEnvironment, approach_and_crash, pass_then_crash, pterodactyl};
use trex::{
    Action, Agent, AgentConfig, DiscretizationGrid, MdpModel, PTERODACTYL_FLIGHT_LEVELS,
    SolverConfig,
    mdp::solve,
    pipeline::{TrainingConfig, TrainingPipeline},
};

fn small_grid() -> DiscretizationGrid {
    DiscretizationGrid::new(
        vec![0.0, 1.0],
        vec![0.0, 100.0],
        PTERODACTYL_FLIGHT_LEVELS.to_vec(),
    )
    .unwrap()
}

#[test]
fn test_eighteen_state_scenario() {
    let grid = small_grid();
    assert_eq!(grid.num_states(), 18);

    let mut model = MdpModel::new(grid.num_states());
    model.record(5, Action::Jump, 7, 10.0).unwrap();
    model.reestimate();

    let row = model.transition_probs(5, Action::Jump).unwrap();
    assert_eq!(row[7], 1.0);
    assert!(
        row.iter()
            .enumerate()
            .filter(|(idx, _)| *idx != 7)
            .all(|(_, &p)| p == 0.0)
    );
    assert_eq!(model.reward()[7], 10.0);
}

#[test]
fn test_probability_rows_stay_normalized_through_training() {
    let config = AgentConfig::default()
        .with_time_axis(4, 1.0)
        .with_height_axis(3, 100.0)
        .with_seed(17);
    let mut agent = Agent::new(&config).unwrap();
    let flyby_crash = vec![
        Frame {
            observation: Some(pterodactyl(120.0, 75.0)),
            crashed: false,
        },
        Frame {
            observation: Some(pterodactyl(60.0, 75.0)),
            crashed: false,
        },
        Frame {
            observation: Some(pterodactyl(5.0, 75.0)),
            crashed: true,
        },
    ];
    let mut env = ScriptedEnvironment::new(vec![
        approach_and_crash(6),
        pass_then_crash(5),
        flyby_crash,
        approach_and_crash(8),
    ]);

    TrainingPipeline::new(TrainingConfig { episodes: 9 })
        .run(&mut agent, &mut env)
        .unwrap();

    let model = agent.model();
    for state in 0..model.num_states() {
        for action in [Action::Run, Action::Jump] {
            let sum: f64 = model.transition_probs(state, action).unwrap().iter().sum();
            assert!(
                (sum - 1.0).abs() < 1e-9,
                "row ({state}, {action}) sums to {sum}"
            );
        }
    }
}

#[test]
fn test_value_function_satisfies_bellman_residual() {
    let mut model = MdpModel::new(18);
    // A handful of transitions, including a punishing crash.
    model.record(5, Action::Run, 0, -1000.0).unwrap();
    model.record(5, Action::Jump, 1, 0.0).unwrap();
    model.record(1, Action::Run, 5, 0.0).unwrap();
    model.record(7, Action::Jump, 1, 10.0).unwrap();
    model.reestimate();

    let config = SolverConfig {
        discount: 0.95,
        tolerance: 1e-8,
        max_sweeps: None,
    };
    let report = solve(&mut model, &config).unwrap();
    assert!(report.converged);

    let residual = (0..model.num_states())
        .map(|state| {
            let best = [Action::Run, Action::Jump]
                .iter()
                .map(|&a| model.action_value(state, a).unwrap())
                .fold(f64::NEG_INFINITY, f64::max);
            (model.value()[state] - (model.reward()[state] + config.discount * best)).abs()
        })
        .fold(0.0, f64::max);
    assert!(residual < config.tolerance, "residual {residual}");

    // Solving again with no new evidence barely moves the vector.
    let before = model.value().to_vec();
    solve(&mut model, &config).unwrap();
    let drift = model
        .value()
        .iter()
        .zip(&before)
        .map(|(a, b)| (a - b).abs())
        .fold(0.0, f64::max);
    assert!(drift < config.tolerance);
}

#[test]
fn test_jump_dominates_when_running_crashes_more_often() {
    let mut model = MdpModel::new(18);
    // Under run, state 6 crashes four times out of five; under jump, once.
    for _ in 0..4 {
        model.record(6, Action::Run, 0, -1000.0).unwrap();
    }
    model.record(6, Action::Run, 1, 0.0).unwrap();
    model.record(6, Action::Jump, 0, -1000.0).unwrap();
    for _ in 0..4 {
        model.record(6, Action::Jump, 1, 0.0).unwrap();
    }
    model.reestimate();
    solve(
        &mut model,
        &SolverConfig {
            discount: 0.95,
            tolerance: 1e-9,
            max_sweeps: None,
        },
    )
    .unwrap();

    let run_score = model.action_value(6, Action::Run).unwrap();
    let jump_score = model.action_value(6, Action::Jump).unwrap();
    assert!(jump_score > run_score);
}
