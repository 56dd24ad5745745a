//! Property tests for the annealer over the reference network.

use proptest::prelude::*;
use u_flowanneal::network::{reference_network, FlowNetwork};
use u_flowanneal::sa::{AnnealConfig, AnnealState, Annealer};

fn annealer(seed: u64, temperature: f64, rate: f64) -> Annealer {
    let config = AnnealConfig::default()
        .with_initial_temperature(temperature)
        .with_cooling_rate(rate)
        .with_seed(seed);
    Annealer::new(&reference_network(), config).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn cooling_is_geometric_and_terminates(
        seed in any::<u64>(),
        temperature in 1.0f64..100.0,
        rate in 0.05f64..0.99,
    ) {
        let mut a = annealer(seed, temperature, rate);
        let expected_steps = a.config().expected_steps();
        let mut previous = temperature;
        let mut steps = 0;

        while a.state() == AnnealState::Running {
            let outcome = a.step();
            prop_assert!((outcome.temperature - previous * (1.0 - rate)).abs() <= 1e-9 * previous);
            prop_assert!(outcome.temperature <= previous);
            previous = outcome.temperature;
            steps += 1;
        }
        prop_assert_eq!(steps, expected_steps);
        prop_assert!(previous < 0.01);
    }

    #[test]
    fn visited_paths_stay_edge_disjoint(
        seed in any::<u64>(),
        rate in 0.05f64..0.5,
    ) {
        let mut a = annealer(seed, 20.0, rate);
        let cap = a.best_network().total_sink_capacity();
        while a.state() == AnnealState::Running {
            let outcome = a.step();
            prop_assert!(a.visited_paths().is_edge_disjoint(a.paths()));
            prop_assert!(outcome.trial_inflow <= cap);
            prop_assert!(outcome.best_inflow <= cap);
            prop_assert!(!outcome.best_network.exceeds_capacity());
            prop_assert_eq!(outcome.best_network.sink_inflow(), outcome.best_inflow);
        }
    }

    #[test]
    fn terminal_state_is_idempotent(seed in any::<u64>()) {
        let mut a = annealer(seed, 12.0, 0.2);
        a.run_to_completion();
        let first = a.step();
        prop_assert_eq!(first.trial_inflow, 0);
        prop_assert_eq!(first.temperature, 0.0);
        for _ in 0..3 {
            prop_assert_eq!(&a.step(), &first);
        }
    }

    #[test]
    fn reset_restores_construction_values(seed in any::<u64>(), steps in 0usize..40) {
        let mut a = annealer(seed, 12.0, 0.2);
        let fresh = a.clone();
        for _ in 0..steps {
            a.step();
        }
        a.reset();
        prop_assert_eq!(a.temperature(), fresh.temperature());
        prop_assert_eq!(a.best_inflow(), fresh.best_inflow());
        prop_assert_eq!(a.visited_paths(), fresh.visited_paths());
        prop_assert_eq!(a.best_network(), fresh.best_network());
    }

    #[test]
    fn identical_seeds_give_identical_trajectories(seed in any::<u64>()) {
        let mut a = annealer(seed, 12.0, 0.2);
        let mut b = annealer(seed, 12.0, 0.2);
        loop {
            let oa = a.step();
            let ob = b.step();
            prop_assert_eq!(oa.trial_inflow, ob.trial_inflow);
            prop_assert_eq!(oa.best_inflow, ob.best_inflow);
            prop_assert_eq!(oa.temperature, ob.temperature);
            if a.state() == AnnealState::Terminal {
                prop_assert_eq!(b.state(), AnnealState::Terminal);
                break;
            }
        }
    }
}

#[test]
fn reference_scenario_seed_5() {
    let net = reference_network();
    let config = AnnealConfig::default()
        .with_initial_temperature(12.0)
        .with_cooling_rate(0.2)
        .with_seed(5);
    let mut a = Annealer::new(&net, config).unwrap();
    let result = a.run_to_completion();

    let expected = ((0.01f64 / 12.0).ln() / 0.8f64.ln()).ceil() as usize;
    assert_eq!(result.iterations, expected);
    assert!(result.best_inflow <= 3 + 8 + 9);
    assert_eq!(result.best_network.sink_inflow(), result.best_inflow);
}

#[test]
fn annealer_finds_positive_inflow_on_chain() {
    // A single path: every non-worsening trial is accepted, so the best
    // inflow can never fall back to zero once a flow is assigned.
    let net = FlowNetwork::from_edges(3, &[(0, 1, 4), (1, 2, 6)]).unwrap();
    let mut a = Annealer::new(&net, AnnealConfig::default().with_seed(0)).unwrap();
    let result = a.run_to_completion();
    assert!(result.best_inflow >= 1);
    assert!(result.best_inflow <= 4);
}

#[cfg(feature = "serde")]
#[test]
fn network_definition_loads_from_json() {
    let net = reference_network();
    let json = serde_json::to_string(&net).unwrap();
    let loaded: FlowNetwork = serde_json::from_str(&json).unwrap();
    assert_eq!(loaded, net);

    let config: AnnealConfig = serde_json::from_str(
        r#"{"initial_temperature":12.0,"cooling_rate":0.2,"min_temperature":0.01,"max_path_edges":9,"seed":5}"#,
    )
    .unwrap();
    assert_eq!(config, AnnealConfig::default().with_seed(5));
}

#[cfg(feature = "serde")]
#[test]
fn invalid_network_definition_is_rejected_on_load() {
    let zero_capacity = r#"{"vertex_count":2,"edges":[{"tail":0,"head":1,"capacity":0,"flow":0}]}"#;
    let no_vertices = r#"{"vertex_count":0,"edges":[]}"#;
    for json in [zero_capacity, no_vertices] {
        let err = serde_json::from_str::<FlowNetwork>(json).unwrap_err();
        assert!(err.to_string().contains("invalid parameter"), "{err}");
    }
}
