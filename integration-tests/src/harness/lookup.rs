use logsift_core::enrichment::HostLookup;
use logsift_core::enrichment::identity::ResolutionFailure;
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Mutex;

/// Reverse lookups answered from a fixed table, with a call log.
pub struct ScriptedLookup {
    names: HashMap<IpAddr, String>,
    calls: Mutex<Vec<IpAddr>>,
}

impl ScriptedLookup {
    pub fn new(names: &[(&str, &str)]) -> Self {
        Self {
            names: names
                .iter()
                .map(|(addr, name)| (addr.parse().expect("valid fixture address"), name.to_string()))
                .collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<IpAddr> {
        self.calls.lock().unwrap().clone()
    }
}

impl HostLookup for ScriptedLookup {
    fn reverse(&self, addr: IpAddr) -> Result<String, ResolutionFailure> {
        self.calls.lock().unwrap().push(addr);
        self.names
            .get(&addr)
            .cloned()
            .ok_or(ResolutionFailure::NoName { addr })
    }
}
