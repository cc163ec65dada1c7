/// Process-wide setup shared by every scenebound application.
pub struct Scenebound {
    app_name: String,
}

static SCENEBOUND_STATIC: std::sync::OnceLock<SceneboundStatic> = std::sync::OnceLock::new();

struct SceneboundStatic {}

impl SceneboundStatic {
    fn init(app_name: &str) -> &'static Self {
        SCENEBOUND_STATIC.get_or_init(|| {
            let logger = env_logger::builder()
                .filter_level(log::LevelFilter::Info)
                .filter_module("gltf", log::LevelFilter::Warn)
                .parse_default_env()
                .try_init();
            if logger.is_ok() {
                log::debug!("Logging initialized for {}.", app_name);
            }

            Self {}
        })
    }
}

impl Scenebound {
    pub fn new(app_name: &str) -> Self {
        SceneboundStatic::init(app_name);

        Self {
            app_name: app_name.to_owned(),
        }
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }
}
