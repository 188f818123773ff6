//! Acquires the rendering backend (WebGPU, or WebGL2 where WebGPU is not
//! exposed) for one mount. The result is handed to the session initializer
//! directly; nothing is stored globally.

use instant::Instant;
use lines_core::PowerPreference;
use web_sys as web;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("surface creation failed: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no compatible GPU adapter")]
    NoAdapter,
    #[error("device request failed: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
}

pub struct Backend {
    pub surface: wgpu::Surface<'static>,
    pub adapter: wgpu::Adapter,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
}

fn power_preference(p: PowerPreference) -> wgpu::PowerPreference {
    match p {
        PowerPreference::HighPerformance => wgpu::PowerPreference::HighPerformance,
        PowerPreference::LowPower => wgpu::PowerPreference::LowPower,
    }
}

/// Instance whose backends the page can actually serve.
///
/// Browsers may expose `navigator.gpu` without a usable adapter; detection
/// drops WebGPU then, so the surface is created through WebGL2 instead. The
/// choice has to be made before the surface exists: a canvas that already
/// holds a WebGPU context cannot hand out a WebGL2 one.
pub async fn instance_for_page() -> wgpu::Instance {
    wgpu::util::new_instance_with_webgpu_detection(&wgpu::InstanceDescriptor::default()).await
}

/// Load the backend for `canvas`. The canvas may still be detached from the
/// page; it is only attached once initialization succeeds.
pub async fn load(
    canvas: &web::HtmlCanvasElement,
    power: PowerPreference,
) -> Result<Backend, LoadError> {
    let started = Instant::now();
    let instance = instance_for_page().await;
    let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: power_preference(power),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        })
        .await
        .ok_or(LoadError::NoAdapter)?;
    let info = adapter.get_info();
    log::info!("[loader] adapter {:?} ({:?})", info.name, info.backend);

    let (device, queue) = adapter
        .request_device(
            &wgpu::DeviceDescriptor {
                label: Some("lines_device"),
                required_features: wgpu::Features::empty(),
                // WebGL2 limits so the fallback path accepts the request too
                required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                    .using_resolution(adapter.limits()),
                memory_hints: wgpu::MemoryHints::Performance,
            },
            None,
        )
        .await?;

    log::info!(
        "[loader] backend ready in {} ms",
        started.elapsed().as_millis()
    );
    Ok(Backend {
        surface,
        adapter,
        device,
        queue,
    })
}
