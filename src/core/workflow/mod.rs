//! # Workflow Module
//!
//! Runs the full job on one directory.
//!
//! ## Stages
//! 1. **Split** - Cut every image into `_left_splits` and `_right_splits`
//! 2. **Detect (left)** - Mark duplicates among the left halves
//! 3. **Detect (right)** - Mark duplicates among the right halves
//!
//! Stages run one after another. A stage's per-file failures never stop
//! the next stage, and nothing is rolled back.

mod executor;

pub use executor::{Workflow, WorkflowBuilder, WorkflowConfig, WorkflowResult};
