//! Runs a fixture table: encode every descriptor, then persist each result.
//!
//! Architecture:
//! - Worker pool (optional): encode and verify descriptors in parallel
//! - Calling thread: collect results in table order, inspect, hand to the sink
//!
//! A failure is recorded against its own descriptor and never stops the run.

use std::collections::{BTreeMap, HashSet};

use crossbeam::channel::{unbounded, Receiver, Sender};
use tracing::{debug, info, warn};

use super::descriptor::FixtureDescriptor;
use super::sink::FixtureSink;
use super::verify::verify_roundtrip;
use crate::bits::EncodedStream;
use crate::encode;
use crate::error::{Error, Result};

/// Configuration for a fixture run
#[derive(Clone, Debug)]
pub struct DriverConfig {
    /// Number of threads for encoding (0 = auto, 1 = calling thread only)
    pub num_threads: usize,
    /// Inflate every stream with an independent decoder before persisting
    pub verify: bool,
}

impl DriverConfig {
    fn effective_threads(&self) -> usize {
        match self.num_threads {
            0 => num_cpus::get().clamp(1, 32),
            n => n.clamp(1, 32),
        }
    }
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self { num_threads: 1, verify: false }
    }
}

/// What a produced fixture looks like
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixtureSummary {
    pub input_len: usize,
    pub output_len: usize,
    /// Valid bits in the final byte (0 if byte-aligned)
    pub bit_length: u8,
}

/// Result of one descriptor
#[derive(Debug)]
pub struct FixtureOutcome {
    pub name: String,
    pub result: Result<FixtureSummary>,
}

impl FixtureOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Outcomes of a run, in table order
#[derive(Debug, Default)]
pub struct RunReport {
    pub outcomes: Vec<FixtureOutcome>,
}

impl RunReport {
    pub fn succeeded(&self) -> impl Iterator<Item = &FixtureOutcome> {
        self.outcomes.iter().filter(|o| o.is_success())
    }

    pub fn failed(&self) -> impl Iterator<Item = &FixtureOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    /// Whether every descriptor was produced
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(|o| o.is_success())
    }

    pub fn outcome(&self, name: &str) -> Option<&FixtureOutcome> {
        self.outcomes.iter().find(|o| o.name == name)
    }
}

/// Callback invoked with every stream just before it is persisted
pub type Inspector = Box<dyn FnMut(&FixtureDescriptor, &EncodedStream)>;

/// A job for encoding a single descriptor
struct EncodingJob<'a> {
    /// Position in the table, for ordering output
    index: usize,
    descriptor: &'a FixtureDescriptor,
}

/// Result of encoding a single descriptor
struct EncodedFixture {
    index: usize,
    stream: Result<EncodedStream>,
}

/// Maps each descriptor to an encoder and its result to the sink
pub struct FixtureDriver {
    config: DriverConfig,
    inspector: Option<Inspector>,
}

impl FixtureDriver {
    pub fn new(config: DriverConfig) -> Self {
        Self { config, inspector: None }
    }

    /// Observe every encoded stream before it reaches the sink
    pub fn with_inspector<F>(mut self, inspector: F) -> Self
    where
        F: FnMut(&FixtureDescriptor, &EncodedStream) + 'static,
    {
        self.inspector = Some(Box::new(inspector));
        self
    }

    /// Encode and persist every descriptor; exactly one store attempt each
    /// for descriptors that encoded successfully
    pub fn run<S: FixtureSink + ?Sized>(
        &mut self,
        fixtures: &[FixtureDescriptor],
        sink: &mut S,
    ) -> RunReport {
        let mut seen = HashSet::new();
        let mut jobs = Vec::with_capacity(fixtures.len());
        let mut results: Vec<Option<Result<EncodedStream>>> =
            fixtures.iter().map(|_| None).collect();

        for (index, descriptor) in fixtures.iter().enumerate() {
            if seen.insert(descriptor.name()) {
                jobs.push(EncodingJob { index, descriptor });
            } else {
                results[index] = Some(Err(Error::DuplicateFixture(descriptor.name().to_string())));
            }
        }

        for encoded in self.encode_jobs(jobs) {
            results[encoded.index] = Some(encoded.stream);
        }

        let mut report = RunReport { outcomes: Vec::with_capacity(fixtures.len()) };
        for (descriptor, stream) in fixtures.iter().zip(results) {
            let stream = stream
                .unwrap_or_else(|| Err(Error::Internal("descriptor was never encoded".to_string())));
            let result = stream.and_then(|stream| self.persist(descriptor, &stream, sink));

            match &result {
                Ok(summary) => info!(
                    fixture = descriptor.name(),
                    bytes = summary.output_len,
                    "fixture written"
                ),
                Err(e) => warn!(fixture = descriptor.name(), error = %e, "fixture failed"),
            }

            report.outcomes.push(FixtureOutcome { name: descriptor.name().to_string(), result });
        }

        report
    }

    fn persist<S: FixtureSink + ?Sized>(
        &mut self,
        descriptor: &FixtureDescriptor,
        stream: &EncodedStream,
        sink: &mut S,
    ) -> Result<FixtureSummary> {
        if let Some(inspector) = self.inspector.as_mut() {
            inspector(descriptor, stream);
        }

        sink.store(descriptor.name(), stream.as_bytes())?;

        Ok(FixtureSummary {
            input_len: descriptor.input().len(),
            output_len: stream.len(),
            bit_length: stream.bit_length(),
        })
    }

    fn encode_jobs(&self, jobs: Vec<EncodingJob<'_>>) -> Vec<EncodedFixture> {
        let num_threads = self.config.effective_threads().min(jobs.len());
        let verify = self.config.verify;

        if num_threads <= 1 {
            return jobs.into_iter().map(|job| encode_job(job, verify)).collect();
        }

        debug!(threads = num_threads, jobs = jobs.len(), "encoding in parallel");

        let (job_tx, job_rx): (Sender<EncodingJob<'_>>, Receiver<EncodingJob<'_>>) = unbounded();
        let (result_tx, result_rx): (Sender<EncodedFixture>, Receiver<EncodedFixture>) =
            unbounded();

        let expected: Vec<usize> = jobs.iter().map(|job| job.index).collect();
        for job in jobs {
            // Receiver is alive until the scope below ends
            let _ = job_tx.send(job);
        }
        drop(job_tx);

        // Use crossbeam's scoped threads to avoid 'static lifetime requirements
        let scoped = crossbeam::scope(|scope| {
            for _ in 0..num_threads {
                let job_rx = job_rx.clone();
                let result_tx = result_tx.clone();

                scope.spawn(move |_| {
                    for job in job_rx.iter() {
                        if result_tx.send(encode_job(job, verify)).is_err() {
                            break;
                        }
                    }
                });
            }
        });
        drop(result_tx);

        // Reorder by table position; a panicked worker leaves a gap
        let mut done: BTreeMap<usize, EncodedFixture> =
            result_rx.iter().map(|encoded| (encoded.index, encoded)).collect();
        if scoped.is_err() {
            warn!("an encoder thread panicked");
        }

        expected
            .into_iter()
            .map(|index| {
                done.remove(&index).unwrap_or_else(|| EncodedFixture {
                    index,
                    stream: Err(Error::Internal("encoder thread panicked".to_string())),
                })
            })
            .collect()
    }
}

fn encode_job(job: EncodingJob<'_>, verify: bool) -> EncodedFixture {
    let descriptor = job.descriptor;
    let stream = encode(descriptor.input(), descriptor.strategy(), descriptor.effective_level())
        .and_then(|stream| {
            if verify {
                verify_roundtrip(descriptor.name(), &stream, descriptor.input())?;
            }
            Ok(stream)
        });
    EncodedFixture { index: job.index, stream }
}
