use crate::enrichment::identity::cache::{IdentityCache, Resolution};
use crate::enrichment::identity::lookup::{
    HostLookup, LookupKind, ResolutionFailure, SystemLookup, parse_key, supernet,
};
use crate::record::Record;
use serde::Serialize;
use std::collections::HashSet;
use std::ops::AddAssign;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{AcquireError, OwnedSemaphorePermit, Semaphore};
use tokio::task::JoinSet;
use tracing::{debug, error};

pub const DEFAULT_CONCURRENCY: usize = 50;
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveOptions {
    pub do_host: bool,
    pub do_net: bool,
    /// Upper bound on lookups in flight at once.
    pub concurrency: usize,
    /// Applied to each reverse lookup on its own.
    pub lookup_timeout: Duration,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            do_host: true,
            do_net: true,
            concurrency: DEFAULT_CONCURRENCY,
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
        }
    }
}

/// Counters for one lookup kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LookupSummary {
    /// Lookups issued, one per distinct key.
    pub lookups: u64,
    pub resolved: u64,
    /// Keys that got the `N/A` placeholder.
    pub unresolved: u64,
    /// Keys whose task was lost to a pool failure; their records keep no value.
    pub failed_tasks: u64,
}

impl AddAssign for LookupSummary {
    fn add_assign(&mut self, other: Self) {
        self.lookups += other.lookups;
        self.resolved += other.resolved;
        self.unresolved += other.unresolved;
        self.failed_tasks += other.failed_tasks;
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResolveSummary {
    pub distinct_keys: u64,
    pub host: LookupSummary,
    pub net: LookupSummary,
}

impl AddAssign for ResolveSummary {
    fn add_assign(&mut self, other: Self) {
        self.distinct_keys += other.distinct_keys;
        self.host += other.host;
        self.net += other.net;
    }
}

type LookupOutcome = (Arc<str>, Result<String, ResolutionFailure>);

/// Resolves client keys to hostnames and supernets, once per distinct key.
///
/// The lookup bound is shared by every pass made through one resolver, and a
/// permit is held until the platform resolver returns, not until the timeout.
pub struct IdentityResolver {
    lookup: Arc<dyn HostLookup>,
    options: ResolveOptions,
    permits: Arc<Semaphore>,
}

impl IdentityResolver {
    pub fn new(lookup: Arc<dyn HostLookup>, options: ResolveOptions) -> Self {
        let permits = Arc::new(Semaphore::new(options.concurrency.max(1)));
        Self {
            lookup,
            options,
            permits,
        }
    }

    pub fn system(options: ResolveOptions) -> Self {
        Self::new(Arc::new(SystemLookup), options)
    }

    pub fn options(&self) -> &ResolveOptions {
        &self.options
    }

    /// Fill `resolved_host` / `resolved_net` on a batch of records.
    ///
    /// Each enabled kind is a separate pass: every distinct key gets one task
    /// on the pool, and the collected map is broadcast back once the pass has
    /// drained. Failed lookups become `N/A`; nothing here is fatal.
    pub async fn resolve(&self, records: &mut [Record]) -> ResolveSummary {
        let keys = distinct_keys(records);
        let mut summary = ResolveSummary {
            distinct_keys: keys.len() as u64,
            ..ResolveSummary::default()
        };

        if keys.is_empty() {
            return summary;
        }

        if self.options.do_host {
            let (cache, pass) = self.resolve_pass(&keys, LookupKind::Host).await;
            cache.broadcast(records);
            summary.host = pass;
        }

        if self.options.do_net {
            let (cache, pass) = self.resolve_pass(&keys, LookupKind::Net).await;
            cache.broadcast(records);
            summary.net = pass;
        }

        summary
    }

    async fn resolve_pass(
        &self,
        keys: &[Arc<str>],
        kind: LookupKind,
    ) -> (IdentityCache, LookupSummary) {
        let mut tasks: JoinSet<Result<LookupOutcome, AcquireError>> = JoinSet::new();

        for key in keys {
            let key = Arc::clone(key);
            let permits = Arc::clone(&self.permits);
            let lookup = Arc::clone(&self.lookup);
            let timeout = self.options.lookup_timeout;

            tasks.spawn(async move {
                let permit = permits.acquire_owned().await?;
                let outcome = match kind {
                    LookupKind::Net => supernet(&key).map(|net| net.to_string()),
                    LookupKind::Host => reverse(lookup, &key, timeout, permit).await,
                };
                Ok((key, outcome))
            });
        }

        let mut cache = IdentityCache::new(kind, keys.len());
        let mut pool_failed = false;

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Ok((key, Ok(value)))) => cache.insert(key, Resolution::Resolved(value)),
                Ok(Ok((key, Err(failure)))) => {
                    debug!(kind = %kind, key = %key, error = %failure, "identity lookup failed");
                    cache.insert(key, Resolution::Unresolved);
                }
                Ok(Err(err)) => fail_pass(&mut tasks, &mut pool_failed, kind, &err),
                Err(err) if pool_failed && err.is_cancelled() => {}
                Err(err) => fail_pass(&mut tasks, &mut pool_failed, kind, &err),
            }
        }

        let resolved = cache.resolved() as u64;
        let summary = LookupSummary {
            lookups: keys.len() as u64,
            resolved,
            unresolved: cache.len() as u64 - resolved,
            failed_tasks: (keys.len() - cache.len()) as u64,
        };

        debug!(
            kind = %kind,
            keys = summary.lookups,
            resolved = summary.resolved,
            unresolved = summary.unresolved,
            "identity pass complete"
        );

        (cache, summary)
    }
}

/// Stop the rest of a pass after the pool itself broke. Finished results are
/// still collected; only keys that had not completed lose their value.
fn fail_pass<T: 'static>(
    tasks: &mut JoinSet<T>,
    failed: &mut bool,
    kind: LookupKind,
    err: &dyn std::fmt::Display,
) {
    if *failed {
        return;
    }
    error!(kind = %kind, error = %err, "identity worker pool failed, abandoning remaining lookups");
    tasks.abort_all();
    *failed = true;
}

async fn reverse(
    lookup: Arc<dyn HostLookup>,
    key: &str,
    timeout: Duration,
    permit: OwnedSemaphorePermit,
) -> Result<String, ResolutionFailure> {
    let addr = parse_key(key)?;
    // A timed-out lookup keeps its blocking thread, and its permit, until the
    // OS resolver returns.
    let blocking = tokio::task::spawn_blocking(move || {
        let _permit = permit;
        lookup.reverse(addr)
    });

    match tokio::time::timeout(timeout, blocking).await {
        Ok(Ok(result)) => result,
        Ok(Err(join_err)) => Err(ResolutionFailure::Lookup {
            addr,
            source: std::io::Error::other(join_err),
        }),
        Err(_) => Err(ResolutionFailure::Timeout { addr, timeout }),
    }
}

/// Distinct client keys in order of first appearance.
pub fn distinct_keys(records: &[Record]) -> Vec<Arc<str>> {
    let mut seen = HashSet::new();
    records
        .iter()
        .map(Record::client_key)
        .filter(|key| seen.insert(*key))
        .map(Arc::from)
        .collect()
}
