//! Worker runtime, region generation, and chunk caching.
#![forbid(unsafe_code)]

mod chunk_cache;
mod region;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender, unbounded};
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use thiserror::Error;
use tilegen_chunk::{Chunk, ChunkError, generate_chunk_at};
use tilegen_world::{ChunkCoord, Generator};

pub use chunk_cache::{ChunkCache, ChunkCacheStats};
pub use region::{ChunkRect, generate_region};

#[derive(Clone, Debug)]
pub enum JobPayload {
    /// Run the generator for the coordinate.
    Generate,
    /// Rebuild from raw bytes handed over by storage or an editor.
    Restore { bytes: Arc<[u8]>, modified: bool },
}

#[derive(Clone, Debug)]
pub struct ChunkJob {
    pub coord: ChunkCoord,
    pub job_id: u64,
    pub payload: JobPayload,
}

impl ChunkJob {
    pub fn generate(coord: ChunkCoord, job_id: u64) -> Self {
        Self {
            coord,
            job_id,
            payload: JobPayload::Generate,
        }
    }

    pub fn restore(coord: ChunkCoord, job_id: u64, bytes: Arc<[u8]>, modified: bool) -> Self {
        Self {
            coord,
            job_id,
            payload: JobPayload::Restore { bytes, modified },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JobKind {
    Generate,
    Restore,
}

#[derive(Debug)]
pub struct JobOut {
    pub coord: ChunkCoord,
    pub job_id: u64,
    pub kind: JobKind,
    pub result: Result<Arc<Chunk>, ChunkError>,
    pub t_total_us: u32,
}

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("building worker pool: {0}")]
    Pool(#[from] ThreadPoolBuildError),
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum Lane {
    Restore,
    Bg,
}

fn process_job(
    job: ChunkJob,
    generator: &Generator,
    cache: Option<&ChunkCache>,
    tx: &Sender<JobOut>,
) {
    let t0 = Instant::now();
    let ChunkJob {
        coord,
        job_id,
        payload,
    } = job;

    let (kind, result) = match payload {
        JobPayload::Generate => {
            let chunk = match cache {
                Some(cache) => cache.get_or_generate(generator, coord),
                None => Arc::new(generate_chunk_at(generator, coord)),
            };
            (JobKind::Generate, Ok(chunk))
        }
        JobPayload::Restore { bytes, modified } => {
            let restored = Chunk::from_raw_bytes(coord.cx, coord.cy, &bytes, modified).map(Arc::new);
            match (&restored, cache) {
                (Ok(chunk), Some(cache)) => cache.insert(Arc::clone(chunk)),
                (Err(e), _) => log::warn!("restore of chunk {coord:?} (job {job_id:#x}) failed: {e}"),
                _ => {}
            }
            (JobKind::Restore, restored)
        }
    };

    let t_total_us = t0.elapsed().as_micros().min(u128::from(u32::MAX)) as u32;
    if tx
        .send(JobOut {
            coord,
            job_id,
            kind,
            result,
            t_total_us,
        })
        .is_err()
    {
        log::warn!("dropping result for chunk {coord:?}: runtime shut down");
    }
}

/// Fixed worker pool fed through channels.
///
/// Restore jobs get a dedicated worker so stored chunks are not stuck behind a
/// long generation backlog. Results are collected with [`Runtime::drain_results`]
/// or [`Runtime::recv_result_timeout`].
pub struct Runtime {
    // Senders first: dropping them ends the worker loops before the pools go.
    job_tx_restore: Sender<ChunkJob>,
    job_tx_bg: Sender<ChunkJob>,
    res_rx: Receiver<JobOut>,
    _restore_pool: Arc<ThreadPool>,
    _bg_pool: Arc<ThreadPool>,
    q_restore: Arc<AtomicUsize>,
    q_bg: Arc<AtomicUsize>,
    inflight: Arc<AtomicUsize>,
    cache: Option<Arc<ChunkCache>>,
    pub w_restore: usize,
    pub w_bg: usize,
}

impl Runtime {
    /// `workers == 0` picks one worker per available core.
    pub fn new(
        generator: Arc<Generator>,
        workers: usize,
        cache: Option<Arc<ChunkCache>>,
    ) -> Result<Self, RuntimeError> {
        let (job_tx_restore, job_rx_restore) = unbounded::<ChunkJob>();
        let (job_tx_bg, job_rx_bg) = unbounded::<ChunkJob>();
        let (res_tx, res_rx) = unbounded::<JobOut>();

        let worker_count = if workers == 0 {
            thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4)
        } else {
            workers
        };
        let w_restore = 1usize;
        let w_bg = worker_count.saturating_sub(w_restore).max(1);

        let q_restore = Arc::new(AtomicUsize::new(0));
        let q_bg = Arc::new(AtomicUsize::new(0));
        let inflight = Arc::new(AtomicUsize::new(0));

        let spawn_lane = |lane: Lane, count: usize, rx: Receiver<ChunkJob>, queued: Arc<AtomicUsize>| {
            let name = match lane {
                Lane::Restore => "tilegen-restore",
                Lane::Bg => "tilegen-bg",
            };
            let pool = Arc::new(
                ThreadPoolBuilder::new()
                    .num_threads(count)
                    .thread_name(move |i| format!("{name}-{i}"))
                    .build()?,
            );
            for _ in 0..count {
                let rx = rx.clone();
                let tx = res_tx.clone();
                let generator = Arc::clone(&generator);
                let cache = cache.clone();
                let queued = Arc::clone(&queued);
                let inflight = Arc::clone(&inflight);
                pool.spawn(move || {
                    while let Ok(job) = rx.recv() {
                        queued.fetch_sub(1, Ordering::Relaxed);
                        inflight.fetch_add(1, Ordering::Relaxed);
                        process_job(job, generator.as_ref(), cache.as_deref(), &tx);
                        inflight.fetch_sub(1, Ordering::Relaxed);
                    }
                });
            }
            Ok::<_, RuntimeError>(pool)
        };

        let restore_pool = spawn_lane(Lane::Restore, w_restore, job_rx_restore, Arc::clone(&q_restore))?;
        let bg_pool = spawn_lane(Lane::Bg, w_bg, job_rx_bg, Arc::clone(&q_bg))?;
        log::debug!(
            "runtime started: seed={} restore_workers={w_restore} bg_workers={w_bg} cache={}",
            generator.seed(),
            cache.as_ref().map(|c| c.capacity()).unwrap_or(0)
        );

        Ok(Self {
            job_tx_restore,
            job_tx_bg,
            res_rx,
            _restore_pool: restore_pool,
            _bg_pool: bg_pool,
            q_restore,
            q_bg,
            inflight,
            cache,
            w_restore,
            w_bg,
        })
    }

    pub fn submit(&self, job: ChunkJob) {
        let (tx, queued) = match job.payload {
            JobPayload::Generate => (&self.job_tx_bg, &self.q_bg),
            JobPayload::Restore { .. } => (&self.job_tx_restore, &self.q_restore),
        };
        queued.fetch_add(1, Ordering::Relaxed);
        if tx.send(job).is_err() {
            queued.fetch_sub(1, Ordering::Relaxed);
        }
    }

    pub fn drain_results(&self) -> Vec<JobOut> {
        self.res_rx.try_iter().collect()
    }

    pub fn recv_result_timeout(&self, timeout: Duration) -> Option<JobOut> {
        self.res_rx.recv_timeout(timeout).ok()
    }

    /// `(queued_restore, queued_bg, inflight)`
    pub fn queue_debug_counts(&self) -> (usize, usize, usize) {
        (
            self.q_restore.load(Ordering::Relaxed),
            self.q_bg.load(Ordering::Relaxed),
            self.inflight.load(Ordering::Relaxed),
        )
    }
}
