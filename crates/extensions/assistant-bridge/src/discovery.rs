//! Auto-discovery of a reachable assistant endpoint.

use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use selectorlab_config::Config;

use crate::probe::ConnectivityProbe;

/// Hosts tried after the configured endpoint, in order: the usual host
/// bridge address under the Linux-on-Windows compatibility layer, the
/// container host alias, then loopback.
pub const DEFAULT_CANDIDATE_HOSTS: &[&str] = &[
    "172.31.64.1",
    "host.docker.internal",
    "localhost",
    "127.0.0.1",
];

const RESOLV_CONF: &str = "/etc/resolv.conf";

/// First `nameserver` address in a resolv.conf-style file.
pub fn read_nameserver(path: &Path) -> Option<String> {
    let content = fs::read_to_string(path)
        .map_err(|e| debug!(path = %path.display(), error = %e, "Cannot read resolver configuration"))
        .ok()?;
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.starts_with('#'))
        .find_map(|line| {
            let mut parts = line.split_whitespace();
            match (parts.next(), parts.next()) {
                (Some("nameserver"), Some(addr)) => Some(addr.to_string()),
                _ => None,
            }
        })
}

/// Candidate endpoints in probe order, duplicates removed.
pub fn candidate_endpoints(configured: &str, port: u16, host_bridge: Option<&str>) -> Vec<String> {
    let mut candidates = vec![configured.trim_end_matches('/').to_string()];
    let hosts = host_bridge
        .into_iter()
        .chain(DEFAULT_CANDIDATE_HOSTS.iter().copied());
    for host in hosts {
        let endpoint = format!("http://{}:{}/v1", host, port);
        if !candidates.contains(&endpoint) {
            candidates.push(endpoint);
        }
    }
    candidates
}

/// Probe each candidate once; the first reachable one wins.
pub async fn discover_among(probe: &ConnectivityProbe, candidates: &[String]) -> Option<String> {
    let probe = probe.single_attempt();
    for candidate in candidates {
        debug!(endpoint = %candidate, "Trying assistant endpoint");
        if probe.probe(candidate).await.reachable {
            info!(endpoint = %candidate, "Discovered assistant endpoint");
            return Some(candidate.clone());
        }
    }
    warn!(tried = candidates.len(), "No assistant endpoint reachable");
    None
}

/// Candidates for a configuration: the configured address, the
/// compatibility layer's host bridge (when running under it) and the
/// well-known hosts.
pub fn configured_candidates(config: &Config) -> Vec<String> {
    let host_bridge = if config.network.in_compat_layer() {
        read_nameserver(Path::new(RESOLV_CONF))
    } else {
        None
    };
    candidate_endpoints(
        &config.assistant.endpoint_url,
        config.assistant.discovery_port,
        host_bridge.as_deref(),
    )
}

pub async fn discover(config: &Config) -> Option<String> {
    discover_among(&ConnectivityProbe::from_config(config), &configured_candidates(config)).await
}
