//! The two Actionbook tools.

mod get_action_by_area_id;
mod search_actions;

pub use get_action_by_area_id::GetActionByAreaIdTool;
pub use search_actions::SearchActionsTool;
