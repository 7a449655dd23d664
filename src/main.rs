//! Bot Arena entry point
//!
//! Headless demo: populates a seeded arena and feeds it random encounters
//! until one bot is left or the tick budget runs out.
//!
//! Usage: `bot-arena [config.json] [seed] [ticks]`

use rand::SeedableRng;
use rand::seq::IndexedRandom;
use rand_pcg::Pcg32;

use bot_arena::EngineConfig;
use bot_arena::sim::{
    Arena, CollisionPair, EntityId, LogDeathObserver, PopulationConfig, populate, tick,
};

/// Encounters generated per tick
const ENCOUNTERS_PER_TICK: usize = 4;
const DEFAULT_TICKS: u64 = 500;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) if path != "-" => EngineConfig::load(&path)?,
        _ => EngineConfig::default(),
    };
    let seed = args.next().map(|s| s.parse::<u64>()).transpose()?.unwrap_or(42);
    let ticks = args.next().map(|s| s.parse::<u64>()).transpose()?.unwrap_or(DEFAULT_TICKS);

    log::info!("Bot Arena starting (seed {seed}, up to {ticks} ticks)");
    let mut arena = Arena::new(seed, config);
    populate(&mut arena.world, &PopulationConfig::default(), seed)?;

    let mut rng = Pcg32::seed_from_u64(seed ^ 0x5eed);
    let mut observer = LogDeathObserver;
    while arena.time_ticks < ticks && arena.world.bots().count() > 1 {
        let pairs = random_encounters(&arena, &mut rng);
        let report = tick(&mut arena, &pairs, &mut observer)?;
        if report.mover_deaths > 0 {
            log::info!(
                "Tick {}: {} bots left",
                arena.time_ticks,
                arena.world.bots().count()
            );
        }
    }

    match arena.leader() {
        Some(leader) => log::info!(
            "Finished after {} ticks; leader {:?} at size {} with score {}",
            arena.time_ticks,
            leader.id,
            leader.size,
            leader.score()
        ),
        None => log::info!("Finished after {} ticks; no bots left", arena.time_ticks),
    }
    Ok(())
}

/// Stand-in for a detection phase: random bots bump into random entities
fn random_encounters(arena: &Arena, rng: &mut Pcg32) -> Vec<CollisionPair> {
    let movers: Vec<EntityId> = arena.world.bots().map(|bot| bot.id).collect();
    let targets: Vec<EntityId> = arena.world.ids().collect();
    (0..ENCOUNTERS_PER_TICK)
        .filter_map(|_| {
            let mover = *movers.choose(rng)?;
            let target = *targets.choose(rng)?;
            (mover != target).then(|| CollisionPair::new(target, mover))
        })
        .collect()
}
