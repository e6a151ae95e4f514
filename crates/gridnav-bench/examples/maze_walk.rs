//! Lockstep multi-agent walk over the reference map.
//!
//! Demonstrates: build map → place agents → navigate each tick → apply
//! moves → report. Set `RUST_LOG=gridnav_nav=debug` to watch traces and
//! escalations.

use gridnav_bench::{init_agent_routes, reference_profile};
use gridnav_nav::{NavConfig, Navigator, Planner, StopPolicy};
use gridnav_space::SensingView;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== gridnav maze walk ===\n");

    for (label, policy, planner) in [
        ("bug / line+distance", StopPolicy::LineAndDistance, Planner::Bug),
        ("bug / closest point", StopPolicy::ClosestPoint, Planner::Bug),
        ("greedy first", StopPolicy::LineAndDistance, Planner::GreedyFirst),
    ] {
        let mut map = reference_profile(42).unwrap();
        let routes = init_agent_routes(&map, 8, 42);
        let mut agents = Vec::with_capacity(routes.len());
        for &(agent, start, target) in &routes {
            map.place(agent, start).unwrap();
            let config = NavConfig {
                stop_policy: policy,
                planner,
                ..NavConfig::default()
            };
            let nav = Navigator::seeded(config, u64::from(agent.0)).unwrap();
            agents.push((agent, target, nav, None::<u32>));
        }

        for tick in 1..=500u32 {
            for (agent, target, nav, arrived) in agents.iter_mut() {
                let here = map.position_of(*agent).unwrap();
                let view = SensingView::for_agent(&map, *agent, 20).unwrap();
                if let Some(dir) = nav.navigate(&view, here, *target) {
                    map.apply_move(*agent, dir).unwrap();
                }
                if arrived.is_none() && map.position_of(*agent) == Some(*target) {
                    *arrived = Some(tick);
                }
            }
            if agents.iter().all(|a| a.3.is_some()) {
                break;
            }
        }

        let done = agents.iter().filter(|a| a.3.is_some()).count();
        let slowest = agents.iter().filter_map(|a| a.3).max().unwrap_or(0);
        println!(
            "  {label:<22} arrived {done}/{}  slowest {slowest:>3} ticks",
            agents.len()
        );
    }
}
