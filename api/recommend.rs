use std::sync::Arc;

use ai_stylist_api::{
    clients::openai::{CompletionBackend, OpenAiClient},
    handler::handler,
    logging::init_tracing,
    Config,
};
use vercel_runtime::{run, Error, Request};

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing("info");

    let config = Config::from_env();
    if config.openai_api_key.is_none() {
        tracing::warn!("OPENAI_API_KEY is not set; POST requests will fail");
    }
    tracing::info!(?config, "Starting recommend function");

    let backend: Arc<dyn CompletionBackend> = Arc::new(OpenAiClient::new(&config)?);

    run(move |req: Request| {
        let backend = Arc::clone(&backend);
        async move { handler(req, backend.as_ref()).await }
    })
    .await
}
