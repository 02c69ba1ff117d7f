//! Memoized on/off switches for native entry points that are known to be
//! unreliable across `wgpu-native` builds.
//!
//! Precedence, highest first: the disable variable (checked on every query,
//! so it overrides even an explicit enable), the memoized value (set
//! explicitly or computed once), which is computed from the enable variable,
//! then a marker file recording that the currently resolved library path was
//! validated, then disabled.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::dynload::LibraryLocator;
use crate::env::{self, Environment};
use crate::error::Result;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "mbt-serde", derive(serde::Serialize))]
pub enum Feature {
    /// `wgpuDeviceCreate{Compute,Render}PipelineAsync`.
    PipelineAsync,
    /// `wgpuShaderModuleGetCompilationInfo`.
    CompilationInfo,
    /// Best-effort debug labels, markers, and groups.
    DebugLabels,
}

impl Feature {
    pub const ALL: [Feature; FEATURE_COUNT] = [
        Feature::PipelineAsync,
        Feature::CompilationInfo,
        Feature::DebugLabels,
    ];

    fn index(self) -> usize {
        self as usize
    }

    pub fn enable_var(self) -> &'static str {
        match self {
            Feature::PipelineAsync => env::ENABLE_PIPELINE_ASYNC_VAR,
            Feature::CompilationInfo => env::ENABLE_COMPILATION_INFO_VAR,
            Feature::DebugLabels => env::DEBUG_LABELS_VAR,
        }
    }

    pub fn disable_var(self) -> Option<&'static str> {
        match self {
            Feature::PipelineAsync => Some(env::DISABLE_PIPELINE_ASYNC_VAR),
            Feature::CompilationInfo => Some(env::DISABLE_COMPILATION_INFO_VAR),
            Feature::DebugLabels => None,
        }
    }

    /// Marker filename under the data directory, if the feature can be
    /// validated by marker.
    pub fn marker_name(self) -> Option<&'static str> {
        match self {
            Feature::PipelineAsync => Some("pipeline_async.ok"),
            Feature::CompilationInfo => Some("compilation_info.ok"),
            Feature::DebugLabels => None,
        }
    }
}

/// Host-side feature codes: 0, 1, 2 in declaration order.
impl TryFrom<u32> for Feature {
    type Error = u32;

    fn try_from(code: u32) -> std::result::Result<Self, u32> {
        Feature::ALL.get(code as usize).copied().ok_or(code)
    }
}

const FEATURE_COUNT: usize = 3;
const MARKER_PREFIX: &str = "lib_path=";

pub struct FeatureGate {
    locator: LibraryLocator,
    states: Mutex<[Option<bool>; FEATURE_COUNT]>,
}

impl FeatureGate {
    pub fn new(locator: LibraryLocator) -> Self {
        Self {
            locator,
            states: Mutex::new([None; FEATURE_COUNT]),
        }
    }

    fn env(&self) -> &Arc<dyn Environment> {
        self.locator.env()
    }

    pub fn is_enabled(&self, feature: Feature) -> bool {
        if let Some(var) = feature.disable_var() {
            if self.env().flag(var) {
                return false;
            }
        }
        let mut states = self.states.lock();
        *states[feature.index()].get_or_insert_with(|| self.compute(feature))
    }

    /// Forces the memoized state. A truthy disable variable still wins.
    pub fn set_enabled(&self, feature: Feature, enabled: bool) {
        self.states.lock()[feature.index()] = Some(enabled);
    }

    /// Drops the memoized state so the next query recomputes it.
    pub fn reset(&self, feature: Feature) {
        self.states.lock()[feature.index()] = None;
    }

    fn compute(&self, feature: Feature) -> bool {
        if self.env().flag(feature.enable_var()) {
            log::debug!("{feature:?} enabled by {}", feature.enable_var());
            return true;
        }
        let validated = self.marker_matches(feature);
        if validated {
            log::debug!("{feature:?} enabled by marker file");
        }
        validated
    }

    /// `$XDG_DATA_HOME/wgpu_mbt`, else `<home>/.local/share/wgpu_mbt`.
    pub fn marker_dir(&self) -> Option<PathBuf> {
        if let Some(data) = self.env().non_empty(env::XDG_DATA_HOME_VAR) {
            return Some(PathBuf::from(data).join("wgpu_mbt"));
        }
        let home = self.env().non_empty(env::HOME_VAR)?;
        Some(
            PathBuf::from(home)
                .join(".local")
                .join("share")
                .join("wgpu_mbt"),
        )
    }

    pub fn marker_path(&self, feature: Feature) -> Option<PathBuf> {
        Some(self.marker_dir()?.join(feature.marker_name()?))
    }

    fn marker_matches(&self, feature: Feature) -> bool {
        let Some(path) = self.marker_path(feature) else {
            return false;
        };
        let Some(lib_path) = self.locator.resolve_path() else {
            return false;
        };
        match fs::read_to_string(&path) {
            Ok(contents) => parse_marker(&contents) == Some(lib_path.as_str()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => false,
            Err(err) => {
                log::warn!("cannot read marker {}: {err}", path.display());
                false
            }
        }
    }

    /// Records that the currently resolved library path supports `feature`.
    /// Returns the marker path, or `None` when the feature has no marker or no
    /// library path / data directory can be resolved.
    pub fn record_marker(&self, feature: Feature) -> Result<Option<PathBuf>> {
        let (Some(path), Some(lib_path)) =
            (self.marker_path(feature), self.locator.resolve_path())
        else {
            return Ok(None);
        };
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&path, format!("{MARKER_PREFIX}{lib_path}\n"))?;
        Ok(Some(path))
    }
}

fn parse_marker(contents: &str) -> Option<&str> {
    let line = contents.lines().next()?.trim_end();
    line.strip_prefix(MARKER_PREFIX)
}
