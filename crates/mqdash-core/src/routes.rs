//! Route table: declarative path-to-view bindings.
//!
//! A fixed, ordered list of entries built once at startup. Adding a view
//! means adding one entry here; the guard and the request pipeline never
//! change for it.

use std::collections::BTreeMap;
use std::fmt;

use anyhow::{Context, Result};

/// Views the dashboard can present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewId {
    Login,
    Dashboard,
    DeviceList,
    DeviceNew,
    DeviceDetail,
    DeviceEdit,
    RealTimeData,
    MqttConfig,
    TopicConfig,
    SubscribeOptions,
}

impl ViewId {
    /// Human-readable title for rendering.
    pub fn title(self) -> &'static str {
        match self {
            ViewId::Login => "Login",
            ViewId::Dashboard => "Dashboard",
            ViewId::DeviceList => "Devices",
            ViewId::DeviceNew => "New Device",
            ViewId::DeviceDetail => "Device Detail",
            ViewId::DeviceEdit => "Edit Device",
            ViewId::RealTimeData => "Real-Time Data",
            ViewId::MqttConfig => "MQTT Broker Configs",
            ViewId::TopicConfig => "Topic Configs",
            ViewId::SubscribeOptions => "Subscribe Options",
        }
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Parameter values extracted from a matched path.
pub type RouteParams = BTreeMap<String, String>;

/// One declarative binding of a path pattern to a view.
///
/// `:name` segments declare parameters extracted on match.
#[derive(Debug, Clone)]
pub struct RouteEntry {
    pub pattern: &'static str,
    pub view: ViewId,
    pub requires_auth: bool,
}

/// A successful lookup: the matched entry plus extracted params.
#[derive(Debug, Clone)]
pub struct RouteMatch {
    pub view: ViewId,
    pub requires_auth: bool,
    pub params: RouteParams,
}

/// Ordered route table; first declared match wins.
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl Default for RouteTable {
    /// The dashboard's route set. Static patterns are declared before the
    /// dynamic ones that could shadow them (`/devices/new` vs `/devices/:id`).
    fn default() -> Self {
        Self::with_entries(vec![
            entry("/login", ViewId::Login, false),
            entry("/", ViewId::Dashboard, true),
            entry("/dashboard", ViewId::Dashboard, true),
            entry("/devices", ViewId::DeviceList, true),
            entry("/devices/new", ViewId::DeviceNew, true),
            entry("/devices/:id", ViewId::DeviceDetail, true),
            entry("/devices/:id/edit", ViewId::DeviceEdit, true),
            entry("/realtime-data", ViewId::RealTimeData, true),
            entry("/mqtt-config", ViewId::MqttConfig, true),
            entry("/topic-config", ViewId::TopicConfig, true),
            entry("/subscribe-options", ViewId::SubscribeOptions, true),
        ])
    }
}

fn entry(pattern: &'static str, view: ViewId, requires_auth: bool) -> RouteEntry {
    RouteEntry {
        pattern,
        view,
        requires_auth,
    }
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from explicit entries (order is match precedence).
    pub fn with_entries(entries: Vec<RouteEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    /// Finds the first entry matching a concrete path, extracting params.
    ///
    /// Returns `None` when no entry matches (routing-not-found; the caller
    /// decides the fallback).
    pub fn resolve(&self, path: &str) -> Option<RouteMatch> {
        let segments = split_path(path);
        self.entries.iter().find_map(|e| {
            match_pattern(e.pattern, &segments).map(|params| RouteMatch {
                view: e.view,
                requires_auth: e.requires_auth,
                params,
            })
        })
    }

    /// Builds a concrete path for a view, substituting declared params.
    ///
    /// Uses the first entry bound to the view. Every `:name` the pattern
    /// declares must be supplied.
    ///
    /// # Errors
    /// Returns an error if the view has no entry or a declared param is
    /// missing from `params`.
    pub fn path_for(&self, view: ViewId, params: &RouteParams) -> Result<String> {
        let entry = self
            .entries
            .iter()
            .find(|e| e.view == view)
            .with_context(|| format!("No route declared for view {view}"))?;

        let mut out = String::new();
        for segment in entry.pattern.split('/').filter(|s| !s.is_empty()) {
            out.push('/');
            if let Some(name) = segment.strip_prefix(':') {
                let value = params
                    .get(name)
                    .with_context(|| format!("Missing param '{name}' for {}", entry.pattern))?;
                out.push_str(value);
            } else {
                out.push_str(segment);
            }
        }
        if out.is_empty() {
            out.push('/');
        }
        Ok(out)
    }
}

fn split_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Matches one pattern against pre-split path segments.
fn match_pattern(pattern: &str, segments: &[&str]) -> Option<RouteParams> {
    let pattern_segments = split_path(pattern);
    if pattern_segments.len() != segments.len() {
        return None;
    }

    let mut params = RouteParams::new();
    for (pat, seg) in pattern_segments.iter().zip(segments) {
        if let Some(name) = pat.strip_prefix(':') {
            params.insert(name.to_string(), (*seg).to_string());
        } else if pat != seg {
            return None;
        }
    }
    Some(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test: every declared pattern resolves to its own view.
    #[test]
    fn test_all_declared_routes_resolve() {
        let table = RouteTable::new();
        for entry in table.entries() {
            // Substitute a dummy value for params so the pattern is concrete.
            let concrete = entry.pattern.replace(":id", "7");
            let matched = table.resolve(&concrete).unwrap();
            assert_eq!(matched.view, entry.view, "pattern {}", entry.pattern);
        }
    }

    /// Test: params are extracted from dynamic segments.
    #[test]
    fn test_param_extraction() {
        let table = RouteTable::new();

        let matched = table.resolve("/devices/42").unwrap();
        assert_eq!(matched.view, ViewId::DeviceDetail);
        assert_eq!(matched.params.get("id").map(String::as_str), Some("42"));

        let matched = table.resolve("/devices/42/edit").unwrap();
        assert_eq!(matched.view, ViewId::DeviceEdit);
        assert_eq!(matched.params.get("id").map(String::as_str), Some("42"));
    }

    /// Test: static entries shadow dynamic ones declared after them.
    #[test]
    fn test_static_wins_over_dynamic() {
        let table = RouteTable::new();
        let matched = table.resolve("/devices/new").unwrap();
        assert_eq!(matched.view, ViewId::DeviceNew);
        assert!(matched.params.is_empty());
    }

    /// Test: unknown paths are routing-not-found.
    #[test]
    fn test_unknown_path_is_not_found() {
        let table = RouteTable::new();
        assert!(table.resolve("/unknown").is_none());
        assert!(table.resolve("/devices/42/sensors/1").is_none());
    }

    /// Test: trailing slashes do not change the match.
    #[test]
    fn test_trailing_slash_normalized() {
        let table = RouteTable::new();
        assert_eq!(table.resolve("/devices/").unwrap().view, ViewId::DeviceList);
        assert_eq!(table.resolve("/").unwrap().view, ViewId::Dashboard);
    }

    /// Test: path_for substitutes declared params.
    #[test]
    fn test_path_for_round_trip() {
        let table = RouteTable::new();

        let mut params = RouteParams::new();
        params.insert("id".to_string(), "42".to_string());
        let path = table.path_for(ViewId::DeviceDetail, &params).unwrap();
        assert_eq!(path, "/devices/42");

        let matched = table.resolve(&path).unwrap();
        assert_eq!(matched.view, ViewId::DeviceDetail);
    }

    /// Test: path_for fails when a declared param is missing.
    #[test]
    fn test_path_for_missing_param() {
        let table = RouteTable::new();
        let err = table
            .path_for(ViewId::DeviceDetail, &RouteParams::new())
            .unwrap_err();
        assert!(err.to_string().contains("id"));
    }

    /// Test: the login entry is the only public one in the default table.
    #[test]
    fn test_only_login_is_public() {
        let table = RouteTable::new();
        for entry in table.entries() {
            assert_eq!(
                !entry.requires_auth,
                entry.view == ViewId::Login,
                "pattern {}",
                entry.pattern
            );
        }
    }
}
