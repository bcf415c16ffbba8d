//! MCP Server implementation
//!
//! This module implements the Model Context Protocol server that exposes
//! mouse and keyboard automation tools to AI assistants.

use rmcp::{
    handler::server::{tool::ToolRouter, wrapper::Parameters},
    model::*,
    schemars, serde,
    service::RequestContext,
    tool, tool_handler, tool_router, ErrorData as McpError, RoleServer, ServerHandler,
};
use serde_json::json;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::automation::Automation;
use crate::backend::InputBackend;
use crate::error::AutomationError;
use crate::validate;

/// Parameters for tools that target a screen coordinate
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct CoordinateParams {
    /// X coordinate (pixels from the left edge, must be non-negative)
    pub x: i64,
    /// Y coordinate (pixels from the top edge, must be non-negative)
    pub y: i64,
}

/// Parameters for mouse_smooth_move tool
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct SmoothMoveParams {
    /// X coordinate
    pub x: i64,
    /// Y coordinate
    pub y: i64,
    /// Duration in seconds
    #[serde(default = "default_duration")]
    pub duration: f64,
}

fn default_duration() -> f64 {
    1.0
}

/// Parameters for keyboard_type tool
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct TypeParams {
    /// Text to type
    pub text: String,
}

/// Parameters for keyboard_type_with_delay tool
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct TypeWithDelayParams {
    /// Text to type
    pub text: String,
    /// Delay between keystrokes in milliseconds
    #[serde(default = "default_delay")]
    pub delay_ms: i64,
}

fn default_delay() -> i64 {
    100
}

/// Desktop automation MCP Server
///
/// Provides mouse and keyboard tools for AI assistants.
#[derive(Clone)]
pub struct DesktopAutomationServer {
    /// Mouse and keyboard primitives over the input backend
    automation: Automation,
    /// MCP tool router
    tool_router: ToolRouter<DesktopAutomationServer>,
}

fn text_result(text: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text)])
}

fn tool_error(summary: &str, err: &AutomationError) -> CallToolResult {
    tracing::warn!("{summary}: {err}");
    CallToolResult::error(vec![Content::text(
        json!({
            "error": summary,
            "details": err.to_string()
        })
        .to_string(),
    )])
}

#[tool_router]
impl DesktopAutomationServer {
    /// Create a new server over the given input backend
    pub fn new(backend: Arc<dyn InputBackend>) -> Self {
        Self {
            automation: Automation::new(backend),
            tool_router: Self::tool_router(),
        }
    }

    #[tool(description = "Move mouse cursor to specified coordinates")]
    async fn mouse_move(
        &self,
        Parameters(params): Parameters<CoordinateParams>,
    ) -> Result<CallToolResult, McpError> {
        let target = match validate::coordinate(params.x, params.y) {
            Ok(target) => target,
            Err(e) => return Ok(tool_error("Invalid coordinates", &e)),
        };

        match self.automation.mouse.move_to(target).await {
            Ok(()) => {
                tracing::info!(%target, "mouse_move");
                Ok(text_result(format!("Mouse moved to {target}")))
            }
            Err(e) => Ok(tool_error("Failed to move mouse", &e)),
        }
    }

    #[tool(description = "Move mouse cursor smoothly to specified coordinates")]
    async fn mouse_smooth_move(
        &self,
        context: RequestContext<RoleServer>,
        Parameters(params): Parameters<SmoothMoveParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(self.smooth_move(params, &context.ct).await)
    }

    #[tool(description = "Click at specified coordinates")]
    async fn mouse_click(
        &self,
        Parameters(params): Parameters<CoordinateParams>,
    ) -> Result<CallToolResult, McpError> {
        let target = match validate::coordinate(params.x, params.y) {
            Ok(target) => target,
            Err(e) => return Ok(tool_error("Invalid coordinates", &e)),
        };

        match self.automation.mouse.click(target).await {
            Ok(()) => {
                tracing::info!(%target, "mouse_click");
                Ok(text_result(format!("Clicked at {target}")))
            }
            Err(e) => Ok(tool_error("Failed to click mouse", &e)),
        }
    }

    #[tool(description = "Get current mouse cursor position as a JSON object {x, y}")]
    async fn mouse_get_position(&self) -> Result<CallToolResult, McpError> {
        match self.automation.mouse.position().await {
            Ok(position) => {
                let body = serde_json::to_string(&position).map_err(|e| {
                    McpError::internal_error(format!("failed to encode position: {e}"), None)
                })?;
                Ok(text_result(body))
            }
            Err(e) => Ok(tool_error("Failed to get mouse position", &e)),
        }
    }

    #[tool(description = "Type the specified text")]
    async fn keyboard_type(
        &self,
        Parameters(params): Parameters<TypeParams>,
    ) -> Result<CallToolResult, McpError> {
        match self.automation.keyboard.type_text(&params.text).await {
            Ok(()) => {
                tracing::info!(chars = params.text.chars().count(), "keyboard_type");
                Ok(text_result(format!("Typed: {}", params.text)))
            }
            Err(e) => Ok(tool_error("Failed to type text", &e)),
        }
    }

    #[tool(description = "Type text with a delay between keystrokes. Blocks for roughly delay_ms between consecutive characters.")]
    async fn keyboard_type_with_delay(
        &self,
        context: RequestContext<RoleServer>,
        Parameters(params): Parameters<TypeWithDelayParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(self.type_with_delay(params, &context.ct).await)
    }
}

impl DesktopAutomationServer {
    async fn smooth_move(&self, params: SmoothMoveParams, cancel: &CancellationToken) -> CallToolResult {
        let target = match validate::coordinate(params.x, params.y) {
            Ok(target) => target,
            Err(e) => return tool_error("Invalid coordinates", &e),
        };
        let duration = match validate::duration(params.duration) {
            Ok(duration) => duration,
            Err(e) => return tool_error("Invalid duration", &e),
        };

        match self.automation.mouse.smooth_move(target, duration, cancel).await {
            Ok(()) => {
                tracing::info!(%target, ?duration, "mouse_smooth_move");
                text_result(format!(
                    "Mouse smoothly moved to {target} over {:.1}s",
                    params.duration
                ))
            }
            Err(e) => tool_error("Failed to smooth move mouse", &e),
        }
    }

    async fn type_with_delay(&self, params: TypeWithDelayParams, cancel: &CancellationToken) -> CallToolResult {
        match self
            .automation
            .keyboard
            .type_text_with_delay(&params.text, params.delay_ms, cancel)
            .await
        {
            Ok(()) => {
                tracing::info!(
                    chars = params.text.chars().count(),
                    delay_ms = params.delay_ms,
                    "keyboard_type_with_delay"
                );
                text_result(format!(
                    "Typed with {}ms delay: {}",
                    params.delay_ms, params.text
                ))
            }
            Err(e) => tool_error("Failed to type text with delay", &e),
        }
    }
}

#[tool_handler]
impl ServerHandler for DesktopAutomationServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Desktop automation tools for the mouse and keyboard. Coordinates are absolute \
                 screen pixels with the origin at the top-left corner and must be non-negative. \
                 Use mouse_get_position to read the cursor, mouse_move / mouse_smooth_move / \
                 mouse_click to act on it, and keyboard_type / keyboard_type_with_delay to send \
                 text to the focused window.".to_string()
            ),
        }
    }

    async fn initialize(
        &self,
        _request: InitializeRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<InitializeResult, McpError> {
        Ok(self.get_info())
    }
}
