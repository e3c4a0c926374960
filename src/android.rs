//! JNI entry points called by the sample activities and surface renderers.
//!
//! Each `GLSurfaceView` drives its renderer from its own GL thread, so the
//! native renderers live in thread-local [`SurfaceSlots`] on that thread,
//! keyed by the current EGL context.
//!
//! Kotlin side is expected to declare, per renderer class:
//! `external fun init(): Boolean`, `external fun resize(width: Int, height: Int)`,
//! `external fun step()` and `external fun destroy()` (the last one queued on
//! the GL thread from `onPause`).

use std::cell::RefCell;
use std::os::raw::c_void;
use std::panic::{self, AssertUnwindSafe};

use android_logger::Config;
use jni::objects::{JObject, JValue};
use jni::sys::{jboolean, jint, jstring, JNI_FALSE, JNI_TRUE, JNI_VERSION_1_6};
use jni::{JNIEnv, JavaVM};

use crate::config::RendererConfig;
use crate::egl::Egl;
use crate::gles::GlowBackend;
use crate::hello::{self, ClickCounter};
use crate::registry::SceneKind;
use crate::renderer::Renderer;
use crate::surface::SurfaceSlots;

thread_local! {
    static RENDERERS: RefCell<SurfaceSlots<GlowBackend>> = RefCell::new(SurfaceSlots::new());
}

static CLICKS: ClickCounter = ClickCounter::new();

fn install_logger(config: &RendererConfig) {
    if let Some(level) = config.logger_level() {
        android_logger::init_once(
            Config::default()
                .with_min_level(level)
                .with_tag(config.log_tag),
        );
    }
}

/// Runs `f`, turning a panic into `fallback` so it never unwinds into the VM.
fn guard<T>(op: &str, fallback: T, f: impl FnOnce() -> T) -> T {
    panic::catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|_| {
        error!("panic during {}", op);
        fallback
    })
}

fn init(kind: SceneKind) -> bool {
    let config = RendererConfig::default();
    install_logger(&config);

    guard("init", false, move || {
        let egl = Egl::new();
        let current = match egl.current() {
            Ok(current) => current,
            Err(e) => {
                error!("Cannot initialize {}: {}", kind.command(), e);
                return false;
            }
        };
        if current.client_version < config.min_client_version {
            error!(
                "Cannot initialize {}: EGL client version {} < {}",
                kind.command(),
                current.client_version,
                config.min_client_version
            );
            return false;
        }

        RENDERERS.with(|slots| {
            slots.borrow_mut().init_on(kind, current.id, || {
                let gl = unsafe { egl.load_gl() };
                Renderer::new(gl, kind.build(), config)
            })
        })
    })
}

fn with_renderer(kind: SceneKind, op: &str, f: impl FnOnce(&mut Renderer<GlowBackend>)) {
    guard(op, (), move || {
        RENDERERS.with(|slots| match slots.borrow_mut().get_mut(kind) {
            Some(renderer) => f(renderer),
            None => warn!("{} on {} before init", op, kind.command()),
        })
    })
}

macro_rules! renderer_exports {
    ($kind:expr, $init:ident, $resize:ident, $step:ident, $destroy:ident) => {
        #[allow(non_snake_case)]
        #[no_mangle]
        pub extern "system" fn $init(_env: JNIEnv, _this: JObject) -> jboolean {
            if init($kind) {
                JNI_TRUE
            } else {
                JNI_FALSE
            }
        }

        #[allow(non_snake_case)]
        #[no_mangle]
        pub extern "system" fn $resize(_env: JNIEnv, _this: JObject, width: jint, height: jint) {
            with_renderer($kind, "resize", |r| r.resize(width, height));
        }

        #[allow(non_snake_case)]
        #[no_mangle]
        pub extern "system" fn $step(_env: JNIEnv, _this: JObject) {
            with_renderer($kind, "step", |r| r.step());
        }

        #[allow(non_snake_case)]
        #[no_mangle]
        pub extern "system" fn $destroy(_env: JNIEnv, _this: JObject) {
            with_renderer($kind, "destroy", |r| r.destroy());
        }
    };
}

renderer_exports!(
    SceneKind::Triangle,
    Java_com_vegeta_glndk_TriangleRenderer_init,
    Java_com_vegeta_glndk_TriangleRenderer_resize,
    Java_com_vegeta_glndk_TriangleRenderer_step,
    Java_com_vegeta_glndk_TriangleRenderer_destroy
);

renderer_exports!(
    SceneKind::Cube,
    Java_com_vegeta_glndk_CubeRenderer_init,
    Java_com_vegeta_glndk_CubeRenderer_resize,
    Java_com_vegeta_glndk_CubeRenderer_step,
    Java_com_vegeta_glndk_CubeRenderer_destroy
);

#[allow(non_snake_case)]
#[no_mangle]
pub extern "system" fn JNI_OnLoad(_vm: JavaVM, _reserved: *mut c_void) -> jint {
    install_logger(&RendererConfig::default());
    info!("glndk loaded");
    JNI_VERSION_1_6
}

#[allow(non_snake_case)]
#[no_mangle]
pub extern "system" fn Java_com_vegeta_glndk_MainActivity_stringFromJNI(
    env: JNIEnv,
    _this: JObject,
) -> jstring {
    match env.new_string(hello::greeting()) {
        Ok(s) => s.into_raw(),
        Err(e) => {
            error!("stringFromJNI failed: {}", e);
            std::ptr::null_mut()
        }
    }
}

#[allow(non_snake_case)]
#[no_mangle]
pub extern "system" fn Java_com_vegeta_glndk_HelloJavaActivity_callback(
    mut env: JNIEnv,
    this: JObject,
) {
    let count = CLICKS.next();
    if let Err(e) = env.call_method(&this, "setText", "(I)V", &[JValue::Int(count)]) {
        error!("setText({}) failed: {}", count, e);
    }
}
