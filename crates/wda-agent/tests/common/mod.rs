//! Fake collaborators shared by the integration tests

#![allow(dead_code)]

use std::collections::{HashSet, VecDeque};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use wda_agent::AgentHandle;
use wda_core::config::AgentConfig;
use wda_core::traits::{BuildPipeline, BundleRegistry, LaunchContext, RevisionOracle, StatusProbe};
use wda_core::{BuildMetadata, LifecycleError, StatusReport, TransportError};

pub const BUILD_TIME: &str = "Jun 24 2018 17:08:21";

/// What the fake probe answers with
#[derive(Clone)]
pub enum ProbeAnswer {
    Report(StatusReport),
    NotRunning,
    Fails,
}

/// Status probe answering from a script; the last answer repeats
pub struct FakeProbe {
    answers: Mutex<VecDeque<ProbeAnswer>>,
    calls: AtomicUsize,
}

impl FakeProbe {
    pub fn answering(answers: Vec<ProbeAnswer>) -> Arc<Self> {
        Arc::new(Self {
            answers: Mutex::new(answers.into()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn reporting(build: BuildMetadata) -> Arc<Self> {
        Self::answering(vec![ProbeAnswer::Report(StatusReport::new(build))])
    }

    pub fn not_running() -> Arc<Self> {
        Self::answering(vec![ProbeAnswer::NotRunning])
    }

    pub fn failing() -> Arc<Self> {
        Self::answering(vec![ProbeAnswer::Fails])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StatusProbe for FakeProbe {
    async fn status(&self) -> Result<Option<StatusReport>, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let answer = {
            let mut answers = self.answers.lock().unwrap();
            if answers.len() > 1 {
                answers.pop_front().unwrap()
            } else {
                answers.front().cloned().unwrap_or(ProbeAnswer::NotRunning)
            }
        };
        match answer {
            ProbeAnswer::Report(report) => Ok(Some(report)),
            ProbeAnswer::NotRunning => Ok(None),
            ProbeAnswer::Fails => Err(TransportError::Request {
                url: "http://localhost:8100/status".to_string(),
                reason: "connection reset by peer".to_string(),
            }),
        }
    }
}

/// Revision oracle returning a fixed answer
pub struct FakeOracle {
    revision: Option<String>,
    calls: AtomicUsize,
}

impl FakeOracle {
    pub fn with(revision: Option<&str>) -> Arc<Self> {
        Arc::new(Self {
            revision: revision.map(str::to_string),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RevisionOracle for FakeOracle {
    async fn local_revision(&self, _bootstrap_path: &Path) -> Option<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.revision.clone()
    }
}

/// Device registry recording every call
#[derive(Default)]
pub struct FakeRegistry {
    installed: Vec<String>,
    failing: HashSet<String>,
    list_fails: bool,
    list_calls: AtomicUsize,
    removed: Mutex<Vec<String>>,
}

impl FakeRegistry {
    pub fn with(installed: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            installed: installed.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        })
    }

    pub fn with_failing(installed: &[&str], failing: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            installed: installed.iter().map(|s| s.to_string()).collect(),
            failing: failing.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        })
    }

    /// Registry whose listing call fails, as with a disconnected device
    pub fn unreachable() -> Arc<Self> {
        Arc::new(Self {
            list_fails: true,
            ..Default::default()
        })
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn removal_calls(&self) -> Vec<String> {
        self.removed.lock().unwrap().clone()
    }
}

#[async_trait]
impl BundleRegistry for FakeRegistry {
    async fn installed_bundle_ids(&self, _bundle_name: &str) -> Result<Vec<String>, TransportError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.list_fails {
            return Err(TransportError::Device("device is not connected".to_string()));
        }
        Ok(self.installed.clone())
    }

    async fn remove_app(&self, bundle_id: &str) -> Result<(), TransportError> {
        self.removed.lock().unwrap().push(bundle_id.to_string());
        if self.failing.contains(bundle_id) {
            return Err(TransportError::Device(format!("failed to remove {}", bundle_id)));
        }
        Ok(())
    }
}

/// Build pipeline recording launch contexts
#[derive(Default)]
pub struct FakePipeline {
    pub started: Mutex<Vec<LaunchContext>>,
    pub stops: AtomicUsize,
}

impl FakePipeline {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn start_count(&self) -> usize {
        self.started.lock().unwrap().len()
    }
}

#[async_trait]
impl BuildPipeline for FakePipeline {
    async fn start(&self, ctx: &LaunchContext) -> Result<(), LifecycleError> {
        self.started.lock().unwrap().push(ctx.clone());
        Ok(())
    }

    async fn stop(&self) -> Result<(), LifecycleError> {
        self.stops.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Handle wired to the given fakes
pub fn handle(
    config: AgentConfig,
    probe: Arc<FakeProbe>,
    oracle: Arc<FakeOracle>,
    registry: Arc<FakeRegistry>,
) -> AgentHandle {
    AgentHandle::new(config, registry)
        .expect("valid config")
        .with_status_probe(probe)
        .with_revision_oracle(oracle)
}
