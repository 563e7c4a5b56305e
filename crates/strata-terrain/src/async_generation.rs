//! Background map and mesh generation on a worker pool.
//!
//! Requests go through a bounded channel to worker threads; finished maps
//! and meshes come back on a second channel and are collected by the owner
//! with [`AsyncMapGenerator::drain_results`].

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crossbeam_channel::{Receiver, Sender, bounded};
use dashmap::DashMap;
use glam::Vec2;

use crate::cancel::CancelToken;
use crate::error::TerrainError;
use crate::field::ScalarField;
use crate::map::{MapData, MapGenerator};
use crate::mesh::TerrainMesh;

/// Identifies a submitted request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

/// Generate the map centred at `center`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapRequest {
    pub center: Vec2,
}

/// Mesh an already generated height field.
#[derive(Clone, Debug)]
pub struct MeshRequest {
    pub height: Arc<ScalarField>,
    pub lod: u32,
}

#[derive(Debug)]
pub enum MapOutput {
    Map(Box<MapData>),
    Mesh(TerrainMesh),
    Failed(TerrainError),
}

/// A finished request.
#[derive(Debug)]
pub struct MapResult {
    pub id: RequestId,
    pub output: MapOutput,
    /// Generation time in microseconds.
    pub generation_time_us: u64,
}

enum Job {
    Map(MapRequest),
    Mesh(MeshRequest),
}

struct QueuedJob {
    id: RequestId,
    job: Job,
    cancel: CancelToken,
}

/// Worker pool that runs [`MapGenerator`] requests off the calling thread.
pub struct AsyncMapGenerator {
    task_sender: Sender<QueuedJob>,
    result_receiver: Receiver<MapResult>,
    active: Arc<DashMap<RequestId, CancelToken>>,
    in_flight: Arc<AtomicU64>,
    next_id: AtomicU64,
    workers: usize,
}

impl AsyncMapGenerator {
    /// Spawn `thread_count` workers sharing `generator`.
    ///
    /// At most `max_queued` requests wait in the queue; further submissions
    /// are handed back to the caller.
    pub fn new(
        generator: Arc<MapGenerator>,
        thread_count: usize,
        max_queued: usize,
        result_capacity: usize,
    ) -> Self {
        let (task_sender, task_receiver) = bounded::<QueuedJob>(max_queued.max(1));
        let (result_sender, result_receiver) = bounded::<MapResult>(result_capacity.max(1));
        let in_flight = Arc::new(AtomicU64::new(0));
        let mut workers = 0;

        for index in 0..thread_count.max(1) {
            let receiver = task_receiver.clone();
            let sender = result_sender.clone();
            let in_flight = Arc::clone(&in_flight);
            let generator = Arc::clone(&generator);

            let spawned = std::thread::Builder::new()
                .name(format!("map-gen-worker-{index}"))
                .spawn(move || {
                    while let Ok(queued) = receiver.recv() {
                        if queued.cancel.is_cancelled() {
                            in_flight.fetch_sub(1, Ordering::Relaxed);
                            continue;
                        }

                        let start = std::time::Instant::now();
                        let output = run_job(&generator, queued.job, &queued.cancel);
                        let elapsed = start.elapsed().as_micros() as u64;

                        if !queued.cancel.is_cancelled() {
                            let _ = sender.send(MapResult {
                                id: queued.id,
                                output,
                                generation_time_us: elapsed,
                            });
                        }
                        in_flight.fetch_sub(1, Ordering::Relaxed);
                    }
                });
            match spawned {
                Ok(_) => workers += 1,
                Err(err) => tracing::error!("Failed to spawn map generation worker: {err}"),
            }
        }

        Self {
            task_sender,
            result_receiver,
            active: Arc::new(DashMap::new()),
            in_flight,
            next_id: AtomicU64::new(0),
            workers,
        }
    }

    /// Pool sized to the machine, leaving headroom for the calling thread.
    pub fn with_defaults(generator: Arc<MapGenerator>) -> Self {
        let cpus = num_cpus::get().max(2);
        Self::new(generator, (cpus - 1).max(1), 32, 64)
    }

    /// Queue a map request. Returns the request when the queue is full.
    pub fn submit(&self, request: MapRequest) -> Result<RequestId, MapRequest> {
        self.enqueue(Job::Map(request)).ok_or(request)
    }

    /// Queue a mesh request. Returns the request when the queue is full.
    pub fn submit_mesh(&self, request: MeshRequest) -> Result<RequestId, MeshRequest> {
        self.enqueue(Job::Mesh(request.clone())).ok_or(request)
    }

    fn enqueue(&self, job: Job) -> Option<RequestId> {
        let id = RequestId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let cancel = CancelToken::new();
        self.active.insert(id, cancel.clone());
        self.in_flight.fetch_add(1, Ordering::Relaxed);

        match self.task_sender.try_send(QueuedJob { id, job, cancel }) {
            Ok(()) => Some(id),
            Err(_) => {
                self.in_flight.fetch_sub(1, Ordering::Relaxed);
                self.active.remove(&id);
                None
            }
        }
    }

    /// Cancel a queued or running request. No-op once it has completed.
    pub fn cancel(&self, id: RequestId) {
        if let Some((_, cancel)) = self.active.remove(&id) {
            cancel.cancel();
        }
    }

    /// Collect every finished result without blocking.
    pub fn drain_results(&self) -> Vec<MapResult> {
        let mut results = Vec::new();
        while let Ok(result) = self.result_receiver.try_recv() {
            self.active.remove(&result.id);
            results.push(result);
        }
        results
    }

    pub fn in_flight_count(&self) -> u64 {
        self.in_flight.load(Ordering::Relaxed)
    }

    pub fn is_pending(&self, id: RequestId) -> bool {
        self.active.contains_key(&id)
    }

    pub fn worker_count(&self) -> usize {
        self.workers
    }
}

fn run_job(generator: &MapGenerator, job: Job, cancel: &CancelToken) -> MapOutput {
    match job {
        Job::Map(request) => match generator.generate_with_cancel(request.center, cancel) {
            Ok(data) => MapOutput::Map(Box::new(data)),
            Err(err) => MapOutput::Failed(err),
        },
        Job::Mesh(request) => {
            let settings = generator.settings();
            MapOutput::Mesh(TerrainMesh::from_height_field(
                &request.height,
                settings.mesh_height_multiplier,
                &settings.mesh_height_curve,
                request.lod,
            ))
        }
    }
}
