use std::ffi::c_void;
use std::ptr;

use raw_window_handle::{HasRawWindowHandle, RawWindowHandle};

use crate::context::NativeContext;
use crate::ffi::*;

fn chain(s_type: WGPUSType) -> WGPUChainedStruct {
    WGPUChainedStruct {
        next: ptr::null(),
        sType: s_type,
    }
}

impl NativeContext {
    /// Creates a surface for a native window. Returns `None` for a null
    /// instance, for handle kinds without a direct surface source (AppKit
    /// and UiKit need a `CAMetalLayer`, see
    /// [`NativeContext::create_surface_from_metal_layer`]), or when the
    /// native call yields null.
    pub fn create_surface(
        &self,
        instance: WGPUInstance,
        window: &impl HasRawWindowHandle,
    ) -> Option<WGPUSurface> {
        match window.raw_window_handle() {
            RawWindowHandle::Xlib(handle) => {
                let source = WGPUSurfaceSourceXlibWindow {
                    chain: chain(stype::SurfaceSourceXlibWindow),
                    display: handle.display,
                    window: handle.window as u64,
                };
                self.create_surface_from_chain(instance, &source.chain)
            }
            RawWindowHandle::Xcb(handle) => {
                let source = WGPUSurfaceSourceXCBWindow {
                    chain: chain(stype::SurfaceSourceXCBWindow),
                    connection: handle.connection,
                    window: handle.window,
                };
                self.create_surface_from_chain(instance, &source.chain)
            }
            RawWindowHandle::Wayland(handle) => {
                let source = WGPUSurfaceSourceWaylandSurface {
                    chain: chain(stype::SurfaceSourceWaylandSurface),
                    display: handle.display,
                    surface: handle.surface,
                };
                self.create_surface_from_chain(instance, &source.chain)
            }
            RawWindowHandle::Win32(handle) => {
                let source = WGPUSurfaceSourceWindowsHWND {
                    chain: chain(stype::SurfaceSourceWindowsHWND),
                    hinstance: handle.hinstance,
                    hwnd: handle.hwnd,
                };
                self.create_surface_from_chain(instance, &source.chain)
            }
            other => {
                log::warn!("no surface source for window handle {other:?}");
                None
            }
        }
    }

    pub fn create_surface_from_metal_layer(
        &self,
        instance: WGPUInstance,
        layer: *mut c_void,
    ) -> Option<WGPUSurface> {
        if layer.is_null() {
            return None;
        }
        let source = WGPUSurfaceSourceMetalLayer {
            chain: chain(stype::SurfaceSourceMetalLayer),
            layer,
        };
        self.create_surface_from_chain(instance, &source.chain)
    }

    /// Configures `surface` with the first format, present mode, and alpha
    /// mode the adapter reports, returning the chosen format. `None` for null
    /// handles, a zero extent, or an adapter that reports an empty list.
    pub fn configure_surface_default(
        &self,
        surface: WGPUSurface,
        adapter: WGPUAdapter,
        device: WGPUDevice,
        width: u32,
        height: u32,
        usage: u64,
    ) -> Option<WGPUTextureFormat> {
        if device.is_null() || width == 0 || height == 0 {
            return None;
        }
        let caps = self.surface_capabilities(surface, adapter)?;
        let (Some(&format), Some(&present_mode), Some(&alpha_mode)) = (
            caps.formats.first(),
            caps.present_modes.first(),
            caps.alpha_modes.first(),
        ) else {
            log::warn!("surface reports no usable configuration: {caps:?}");
            return None;
        };
        let config = WGPUSurfaceConfiguration {
            nextInChain: ptr::null(),
            device,
            format,
            usage,
            width,
            height,
            viewFormatCount: 0,
            viewFormats: ptr::null(),
            alphaMode: alpha_mode,
            presentMode: present_mode,
        };
        let configure = self.procs().surface_configure.required(self.resolver());
        unsafe { configure(surface, &config) };
        Some(format)
    }

    /// Native present status; `Error` for a null surface.
    pub fn present_surface(&self, surface: WGPUSurface) -> u32 {
        if surface.is_null() {
            return status::Error;
        }
        let present = self.procs().surface_present.required(self.resolver());
        unsafe { present(surface) }
    }

    pub fn unconfigure_surface(&self, surface: WGPUSurface) {
        if surface.is_null() {
            return;
        }
        let unconfigure = self.procs().surface_unconfigure.required(self.resolver());
        unsafe { unconfigure(surface) }
    }

    /// `chain` must be the first field of a live surface-source struct.
    fn create_surface_from_chain(
        &self,
        instance: WGPUInstance,
        chain: *const WGPUChainedStruct,
    ) -> Option<WGPUSurface> {
        if instance.is_null() {
            return None;
        }
        let create = self.procs().instance_create_surface.required(self.resolver());
        let descriptor = WGPUSurfaceDescriptor {
            nextInChain: chain,
            label: WGPUStringView::null(),
        };
        let surface = unsafe { create(instance, &descriptor) };
        (!surface.is_null()).then_some(surface)
    }
}
