//! Item loop - the main entry point for scrappey-flow.
//!
//! The engine runs one node invocation:
//! - Routing the selected operation to its handler
//! - Validating node parameters against the field catalog
//! - Sending one API call per input item, in order
//! - Reshaping responses and failures into output items

mod output;

use std::sync::Arc;

use tokio::runtime::Runtime;
use tracing::{debug, info, warn};

use crate::{
    Config, Credentials, Result, ScrappeyError, catalog,
    dispatcher::Dispatcher,
    operations::{self, Operation},
    runtime::Context,
};

pub use output::{OutputItem, PairedItem};

/// Parameter selecting the operation, read from the first item.
const OPERATION_PARAMETER: &str = "scrappeyOperations";

/// The node engine.
///
/// # Example
///
/// ```rust,ignore
/// let engine = EngineBuilder::new().config(Config::load_from_str(toml)?).build()?;
///
/// let ctx = Context::new(items)
///     .with_parameters(parameters)
///     .with_credentials(Credentials::new("api-key"));
/// let outputs = engine.execute(&ctx)?;
/// ```
pub struct Engine {
    /// Default credentials and client settings.
    config: Config,
    /// HTTP client bound to the API base url.
    dispatcher: Dispatcher,
    /// Tokio runtime used by the blocking entry point.
    runtime: Arc<Runtime>,
}

impl Engine {
    pub(crate) fn new(
        config: Config,
        runtime: Arc<Runtime>,
    ) -> Result<Self> {
        let dispatcher = Dispatcher::new(&config.client)?;
        Ok(Self {
            config,
            dispatcher,
            runtime,
        })
    }

    /// Runs the node on the engine's runtime and blocks until every item is done.
    ///
    /// Must not be called from inside an async context; use [`Engine::execute_async`] there.
    pub fn execute(
        &self,
        ctx: &Context,
    ) -> Result<Vec<OutputItem>> {
        self.runtime.block_on(self.execute_async(ctx))
    }

    /// Runs the node, processing items one after another.
    ///
    /// A failing item either becomes an error envelope (continue-on-fail) or
    /// aborts the batch with [`ScrappeyError::Item`].
    pub async fn execute_async(
        &self,
        ctx: &Context,
    ) -> Result<Vec<OutputItem>> {
        let operation = self.operation(ctx)?;
        catalog::validate(ctx.parameters())?;
        for (item_index, parameters) in ctx.item_parameters() {
            catalog::validate(parameters).map_err(|err| ScrappeyError::Config(format!("item {}: {}", item_index, err)))?;
        }
        let credentials = self.credentials(ctx)?;

        debug!("running {} over {} items", operation.operation_type().as_ref(), ctx.items().len());
        let mut outputs = Vec::with_capacity(ctx.items().len());
        for (item_index, item) in ctx.items().iter().enumerate() {
            let reader = ctx.reader(item_index);
            match operation.run(&self.dispatcher, &reader, &credentials).await {
                Ok(response) => {
                    let items = OutputItem::reshape(response, item_index);
                    info!("item {} processed into {} output items", item_index, items.len());
                    outputs.extend(items);
                }
                Err(err) if ctx.is_continue_on_fail() => {
                    warn!("item {} failed, continuing: {}", item_index, err);
                    outputs.push(OutputItem::failed(item, item_index, err));
                }
                Err(err) => {
                    return Err(ScrappeyError::Item {
                        item_index,
                        message: err.to_string(),
                    });
                }
            }
        }

        Ok(outputs)
    }

    fn operation(
        &self,
        ctx: &Context,
    ) -> Result<Arc<dyn Operation>> {
        let name = ctx.reader(0).string(OPERATION_PARAMETER)?;
        operations::route(&name)
    }

    /// Context credentials first, then the configured defaults.
    fn credentials(
        &self,
        ctx: &Context,
    ) -> Result<Credentials> {
        ctx.credentials()
            .or(self.config.credentials.as_ref())
            .filter(|credentials| !credentials.api_key.trim().is_empty())
            .cloned()
            .ok_or_else(|| ScrappeyError::Config("Scrappey credentials with an api key are required".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};
    use tokio::runtime::Builder;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_partial_json, method, query_param},
    };

    use super::*;
    use crate::{EngineBuilder, common::Vars, config::ClientConfig};

    fn engine(server: &MockServer) -> Engine {
        let config = Config {
            client: ClientConfig {
                base_url: server.uri(),
                timeout_ms: 5_000,
            },
            credentials: None,
        };
        EngineBuilder::new().config(config).build().unwrap()
    }

    fn items(n: usize) -> Vec<Vars> {
        (0..n).map(|id| Vars::new().with("id", id)).collect()
    }

    #[tokio::test]
    async fn test_continue_on_fail() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"url": "https://bad.example.com"})))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({"code": "CODE-0002"})))
            .with_priority(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": "success"})))
            .mount(&server)
            .await;

        let ctx = Context::new(items(3))
            .with_parameters(Vars::new().with("scrappeyOperations", "requestBuilder").with("url", "https://good.example.com"))
            .with_item_parameters(1, Vars::new().with("url", "https://bad.example.com"))
            .with_credentials(Credentials::new("k"))
            .continue_on_fail(true);

        let outputs = engine(&server).execute_async(&ctx).await.unwrap();
        assert_eq!(outputs.len(), 3);
        assert_eq!(outputs[0].json, json!({"data": "success"}));
        assert_eq!(outputs[2].json, json!({"data": "success"}));
        assert!(outputs[1].is_error());
        assert_eq!(outputs[1].json, json!({"error": "Cloudflare blocked", "originalInput": {"id": 1}}));
        assert_eq!(outputs.iter().map(|output| output.paired_item.item).collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn test_failure_aborts_batch() {
        let server = MockServer::start().await;
        Mock::given(method("POST")).respond_with(ResponseTemplate::new(200).set_body_json(json!({"active": true}))).mount(&server).await;

        let ctx = Context::new(items(2))
            .with_parameters(Vars::new().with("scrappeyOperations", "sessionActive").with("sessionToCheck", "s-1"))
            .with_item_parameters(1, Vars::new().with("sessionToCheck", ""))
            .with_credentials(Credentials::new("k"));

        let err = engine(&server).execute_async(&ctx).await.unwrap_err();
        assert!(matches!(err, ScrappeyError::Item { item_index: 1, .. }));
        assert!(err.to_string().starts_with("Failed to process item 1"));
    }

    #[tokio::test]
    async fn test_unknown_operation_is_not_continued() {
        let server = MockServer::start().await;
        let ctx = Context::new(items(1))
            .with_parameters(Vars::new().with("scrappeyOperations", "crawl"))
            .with_credentials(Credentials::new("k"))
            .continue_on_fail(true);

        let err = engine(&server).execute_async(&ctx).await.unwrap_err();
        assert_eq!(err, ScrappeyError::Config("Operation \"crawl\" is not supported".to_string()));
    }

    #[tokio::test]
    async fn test_invalid_parameters_rejected() {
        let server = MockServer::start().await;
        let ctx = Context::new(items(1))
            .with_parameters(Vars::new().with("url", "https://a.com").with("attempts", 12))
            .with_credentials(Credentials::new("k"));
        assert!(matches!(engine(&server).execute_async(&ctx).await, Err(ScrappeyError::Config(_))));
    }

    #[tokio::test]
    async fn test_credentials_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(query_param("key", "from-config"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"json": {"a": 1}}, {"json": {"b": 2}}])))
            .mount(&server)
            .await;

        let config = Config::load_from_str(&format!("[client]\nbase_url = \"{}\"\n\n[credentials]\napi_key = \"from-config\"\n", server.uri())).unwrap();
        let configured = EngineBuilder::new().config(config).build().unwrap();
        let ctx = Context::new(items(1)).with_parameters(Vars::new().with("scrappeyOperations", "sessionList"));

        let outputs = configured.execute_async(&ctx).await.unwrap();
        assert_eq!(outputs.iter().map(|output| output.json.clone()).collect::<Vec<Value>>(), vec![json!({"a": 1}), json!({"b": 2})]);

        let missing = engine(&server).execute_async(&ctx).await;
        assert!(matches!(missing, Err(ScrappeyError::Config(_))));
    }

    #[test]
    fn test_execute_blocking() {
        let runtime = Arc::new(Builder::new_current_thread().enable_all().build().unwrap());
        let server = runtime.block_on(MockServer::start());
        runtime.block_on(
            Mock::given(method("POST"))
                .and(body_partial_json(json!({"cmd": "sessions.create", "session": "mine"})))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({"session": "mine"})))
                .mount(&server),
        );

        let config = Config {
            client: ClientConfig {
                base_url: server.uri(),
                timeout_ms: 5_000,
            },
            credentials: Some(Credentials::new("k")),
        };
        let blocking = EngineBuilder::new().config(config).runtime(runtime.clone()).build().unwrap();
        let ctx = Context::new(items(1)).with_parameters(Vars::new().with("scrappeyOperations", "sessionCreate").with("sessionId", "mine"));

        let outputs = blocking.execute(&ctx).unwrap();
        assert_eq!(outputs, vec![OutputItem::new(json!({"session": "mine"}), 0)]);
    }
}
