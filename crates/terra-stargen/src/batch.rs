//! Parallel generation of independent stellar systems.
//!
//! Systems share nothing, so each runs on its own generator on a small
//! worker pool. The `index`th system is seeded with `seed + index` and
//! results come back in index order, so a batch is reproducible whatever
//! the thread count.

use crossbeam_channel::bounded;

use crate::error::StargenError;
use crate::generator::Generator;
use crate::params::StargenParameters;
use crate::planet::StellarSystem;

/// Generate `params.systems` systems on up to one thread per CPU.
pub fn generate_batch(params: &StargenParameters) -> Result<Vec<StellarSystem>, StargenError> {
    let threads = num_cpus::get().max(1);
    generate_batch_with(params, params.systems, threads)
}

/// Generate `count` systems on at most `threads` worker threads.
pub fn generate_batch_with(
    params: &StargenParameters,
    count: usize,
    threads: usize,
) -> Result<Vec<StellarSystem>, StargenError> {
    if count == 0 {
        return Ok(Vec::new());
    }
    let threads = threads.clamp(1, count);

    let (task_sender, task_receiver) = bounded::<(usize, StargenParameters)>(count);
    let (result_sender, result_receiver) = bounded::<(usize, StellarSystem)>(count);

    let mut workers = Vec::with_capacity(threads);
    for worker in 0..threads {
        let receiver = task_receiver.clone();
        let sender = result_sender.clone();
        let handle = std::thread::Builder::new()
            .name(format!("stargen-worker-{worker}"))
            .spawn(move || {
                while let Ok((index, params)) = receiver.recv() {
                    let system = Generator::new(params).generate_system();
                    if sender.send((index, system)).is_err() {
                        break;
                    }
                }
            })
            .map_err(StargenError::WorkerSpawn)?;
        workers.push(handle);
    }
    drop(task_receiver);
    drop(result_sender);

    for index in 0..count {
        if task_sender.send((index, params.for_system(index))).is_err() {
            break;
        }
    }
    drop(task_sender);

    tracing::info!("Generating {count} systems on {threads} threads");

    let mut systems: Vec<Option<StellarSystem>> = (0..count).map(|_| None).collect();
    for (index, system) in result_receiver.iter() {
        systems[index] = Some(system);
    }

    for handle in workers {
        if handle.join().is_err() {
            tracing::error!("A stargen worker panicked");
        }
    }

    systems
        .into_iter()
        .enumerate()
        .map(|(index, system)| system.ok_or(StargenError::WorkerLost { index }))
        .collect()
}
