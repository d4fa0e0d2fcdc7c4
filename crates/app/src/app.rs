use paths::PathContext;
use std::marker::PhantomData;
use tracing_subscriber::{
    EnvFilter, Layer, filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Application infrastructure context: paths, version and the log writer.
pub struct AppContext {
    pub path_context: PathContext,
    pub version: &'static str,
    /// Keeps the non-blocking log writer alive; dropping it flushes the file.
    _log_guard: tracing_appender::non_blocking::WorkerGuard,
}

impl AppContext {
    pub fn app_id(&self) -> &str {
        self.path_context.app_id()
    }

    pub fn version(&self) -> &'static str {
        self.version
    }

    pub fn path_context(&self) -> &PathContext {
        &self.path_context
    }
}

/// Identity of an application. Constants only.
pub trait Application: Sized + 'static {
    const APP_ID: &'static str;
    const ORGANIZATION: &'static str = "clinic_ops";
}

pub struct AppBuilder<A: Application> {
    path_context: PathContext,
    version: &'static str,
    _marker: PhantomData<A>,
}

impl<A: Application> AppBuilder<A> {
    pub fn new(version: &'static str) -> Self {
        Self {
            path_context: PathContext::new(A::ORGANIZATION, A::APP_ID),
            version,
            _marker: PhantomData,
        }
    }

    /// Create directories, install the global subscriber and hand back the
    /// context. Logs go to the file only; stdout belongs to the terminal UI.
    /// The level comes from `RUST_LOG`, defaulting to `info` in
    /// debug builds and `warn` in release builds.
    pub fn build(self) -> Result<AppContext, BoxError> {
        self.path_context.ensure_directories()?;

        let log_file_path = self.path_context.log_file_now();
        let log_dir = log_file_path
            .parent()
            .ok_or("log file path has no parent directory")?;
        let log_filename = log_file_path
            .file_name()
            .ok_or("log file path has no file name")?;

        let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        #[cfg(debug_assertions)]
        let default_level = LevelFilter::INFO;
        #[cfg(not(debug_assertions))]
        let default_level = LevelFilter::WARN;

        let filter = EnvFilter::builder()
            .with_default_directive(default_level.into())
            .from_env_lossy();

        let file_layer = fmt::Layer::default()
            .with_ansi(false)
            .with_writer(non_blocking)
            .with_filter(filter);

        tracing_subscriber::registry()
            .with(file_layer)
            .with(tracing_error::ErrorLayer::default())
            .try_init()?;

        tracing::info!(
            app_id = A::APP_ID,
            version = self.version,
            log_file = %log_file_path.display(),
            "logging initialised"
        );

        Ok(AppContext {
            path_context: self.path_context,
            version: self.version,
            _log_guard: guard,
        })
    }
}
