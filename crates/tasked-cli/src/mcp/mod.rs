//! MCP server for tasked
//!
//! Exposes the planner to MCP clients as a single `manage_plan` tool whose
//! `action` field selects the operation. The server speaks over stdio.

use std::{future::Future, sync::Arc};

use anyhow::Result;
use log::{debug, error, info};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ServerHandler,
};
use tasked_core::Planner;
use tokio::{
    signal::unix::{signal, SignalKind},
    sync::Mutex,
};

pub mod errors;
pub mod handlers;

pub use handlers::{ManagePlan, McpResult};

/// MCP server for tasked
#[derive(Clone)]
pub struct TaskedMcpServer {
    planner: Arc<Mutex<Planner>>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl TaskedMcpServer {
    pub fn new(planner: Planner) -> Self {
        Self {
            planner: Arc::new(Mutex::new(planner)),
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        name = "manage_plan",
        description = "Manage plans and their steps with various operations. Steps can include references to relevant files, URLs, or documentation. Actions: add_steps (step_id, description, optional acceptance_criteria and references; creates the plan if missing), inspect, list_plans, remove_plans (plan_names), compact_plans, remove_steps (step_ids), reorder_steps (step_order), set_status (step_id, status: completed|incomplete), get_next_step, is_completed."
    )]
    async fn manage_plan(&self, Parameters(params): Parameters<ManagePlan>) -> McpResult {
        let handlers = handlers::McpHandlers::new(self.planner.clone());
        handlers.manage_plan(params).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for TaskedMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "tasked".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(r#"tasked keeps named plans made of ordered steps.

## Core Concepts
- **Plans**: identified by name, holding an ordered list of steps
- **Steps**: identified by an ID unique within the plan, with a description, a status (TODO/DONE), acceptance criteria and references

## Workflow
1. Add steps with `manage_plan` action `add_steps`; the plan is created on first use
2. Use `get_next_step` to find the first step that is not done
3. Mark progress with `set_status` (completed or incomplete)
4. Check `is_completed`, then `compact_plans` to drop finished plans

Every call needs `plan_name` except `list_plans`, `remove_plans` and `compact_plans`."#.to_string()),
        }
    }
}

/// Run the MCP server with stdio transport until the client disconnects or
/// the process receives SIGINT or SIGTERM.
pub async fn run_stdio_server(server: TaskedMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting tasked MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}
