//! Runtime binding layer between a host runtime and `wgpu-native`.
//!
//! The native library is located and opened on first use (see [`dynload`]),
//! entry points are resolved lazily into [`WgpuProcs`], and callback-based
//! native operations are exposed as blocking calls (see [`sync`]). The C ABI
//! for the host lives in [`capi`].

pub mod capabilities;
pub mod capi;
pub mod context;
pub mod dynload;
pub mod env;
pub mod error;
pub mod ffi;
pub mod gate;
pub mod labels;
pub mod procs;
pub mod registry;
pub mod surface;
pub mod sync;

pub use capabilities::{CapabilitySource, SurfaceCapabilities};
pub use context::NativeContext;
pub use dynload::{LibraryLoader, LibraryLocator, LibraryReport, Requirement, SymbolResolver};
pub use env::{Environment, MapEnv, ProcessEnv};
pub use error::{BindingError, Result};
pub use gate::{Feature, FeatureGate};
pub use labels::{DebugScope, LabelTarget};
pub use procs::{Proc, WgpuProcs};
pub use registry::DeviceLostRegistry;
pub use sync::{AsyncError, CompilationMessage, CompilationReport, PollBudget};
