//! `search_actions`: find verified website actions by keyword.

use serde_json::{json, Value};

use ab_client::{ActionbookClient, SEARCH_OPERATION};
use ab_domain::credential::Credential;
use ab_domain::tool::ToolDefinition;

use crate::registry::PluginTool;
use crate::types::{ToolContext, ToolResult};
use crate::validate;

pub struct SearchActionsTool {
    client: ActionbookClient,
    credential: Option<Credential>,
}

impl SearchActionsTool {
    pub fn new(client: ActionbookClient, credential: Option<Credential>) -> Self {
        Self { client, credential }
    }
}

#[async_trait::async_trait]
impl PluginTool for SearchActionsTool {
    fn definition(&self) -> ToolDefinition {
        let cfg = self.client.config();
        ToolDefinition {
            name: SEARCH_OPERATION.into(),
            description: "Search Actionbook for verified selectors and action details on \
                          websites. Returns plain text listing matching elements with their \
                          Area IDs; pass an Area ID to get_action_by_area_id for full details."
                .into(),
            parameters: json!({
                "type": "object",
                "required": ["query"],
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Keyword or task context, e.g. 'login form' or 'search button'"
                    },
                    "domain": {
                        "type": "string",
                        "description": "Only return actions for this website domain, e.g. 'github.com'"
                    },
                    "limit": {
                        "type": "integer",
                        "minimum": 1,
                        "maximum": cfg.max_limit,
                        "default": cfg.default_limit,
                        "description": "Maximum number of results"
                    }
                }
            }),
        }
    }

    async fn call(&self, ctx: ToolContext, args: Value) -> ToolResult {
        let req = validate::search_args(&args, self.client.config())?;
        tracing::debug!(request_id = %ctx.request_id, "search_actions validated");
        self.client.search(&req, self.credential.as_ref()).await
    }
}
