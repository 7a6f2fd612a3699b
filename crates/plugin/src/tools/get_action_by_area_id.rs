//! `get_action_by_area_id`: full details for one `site:path:area`.

use serde_json::{json, Value};

use ab_client::{ActionbookClient, LOOKUP_OPERATION};
use ab_domain::credential::Credential;
use ab_domain::tool::ToolDefinition;

use crate::registry::PluginTool;
use crate::types::{ToolContext, ToolResult};
use crate::validate;

pub struct GetActionByAreaIdTool {
    client: ActionbookClient,
    credential: Option<Credential>,
}

impl GetActionByAreaIdTool {
    pub fn new(client: ActionbookClient, credential: Option<Credential>) -> Self {
        Self { client, credential }
    }
}

#[async_trait::async_trait]
impl PluginTool for GetActionByAreaIdTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: LOOKUP_OPERATION.into(),
            description: "Get complete action details (selectors, element type, allowed \
                          methods) for an Area ID returned by search_actions."
                .into(),
            parameters: json!({
                "type": "object",
                "required": ["area_id"],
                "properties": {
                    "area_id": {
                        "type": "string",
                        "description": "Area ID in the form 'site:path:area', e.g. 'github.com:login:email-input'"
                    }
                }
            }),
        }
    }

    async fn call(&self, ctx: ToolContext, args: Value) -> ToolResult {
        let req = validate::lookup_args(&args)?;
        tracing::debug!(request_id = %ctx.request_id, area_id = %req.area_id, "lookup validated");
        self.client.lookup(&req, self.credential.as_ref()).await
    }
}
