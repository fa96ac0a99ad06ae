//! Command-line workflow, independent of argument parsing.

pub mod orchestration;

pub use orchestration::{
    run_deploy_workflow, run_deploy_workflow_at, DeployWorkflowArgs, WorkflowResult,
};
