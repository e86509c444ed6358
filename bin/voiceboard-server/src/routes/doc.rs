use utoipa::OpenApi;

use super::{health, tasks, voice};

#[derive(OpenApi)]
#[openapi(info(
    title = "voiceboard-server",
    description = "Voice-enabled task tracker API",
    version = "0.1.0",
))]
pub struct ApiDoc;

pub fn get_docs() -> utoipa::openapi::OpenApi {
    let mut root = ApiDoc::openapi();
    root.merge(health::HealthApi::openapi());
    root.merge(tasks::TasksApi::openapi());
    root.merge(voice::VoiceApi::openapi());
    root
}
