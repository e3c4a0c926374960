use std::ffi::c_void;
use std::ptr;

use khronos_egl as egl;

use crate::error::InitError;
use crate::gles::GlowBackend;

/// The EGL context the host made current before calling into us.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentContext {
    pub id: usize,
    pub client_version: i32,
}

pub struct Egl {
    egl: egl::Instance<egl::Static>,
}

impl Egl {
    pub fn new() -> Self {
        Egl {
            egl: egl::Instance::new(egl::Static),
        }
    }

    pub fn current(&self) -> Result<CurrentContext, InitError> {
        let context = self
            .egl
            .get_current_context()
            .ok_or_else(|| InitError::Context("no EGL context is current".to_string()))?;
        let display = self
            .egl
            .get_current_display()
            .ok_or_else(|| InitError::Context("no EGL display is current".to_string()))?;

        let mut client_version = 0;
        self.egl
            .query_context(display, context, egl::CONTEXT_CLIENT_VERSION, &mut client_version)
            .map_err(|e| InitError::Context(format!("eglQueryContext failed: {}", e)))?;

        Ok(CurrentContext {
            id: context.as_ptr() as usize,
            client_version,
        })
    }

    /// # Safety
    ///
    /// The context returned by [`Egl::current`] must stay current on this
    /// thread while the backend is used.
    pub unsafe fn load_gl(&self) -> GlowBackend {
        GlowBackend::from_loader_function(|name| match self.egl.get_proc_address(name) {
            Some(f) => f as *const c_void,
            None => {
                debug!("resolve of {} failed", name);
                ptr::null()
            }
        })
    }
}
