//! Logging and debugging facilities for Nux.
//!
//! This module provides:
//! - Target names for the `tracing` instrumentation
//! - Debug visualization for object trees
//!
//! # Tracing Integration
//!
//! Nux uses the `tracing` crate for instrumentation. To see logs, install a
//! subscriber in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("nux::gesture=debug,nux::focus=debug")
//!     .init();
//! ```

use std::fmt::Write as _;

use crate::object::{ObjectId, ObjectRegistry, ObjectResult};

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Object model target.
    pub const OBJECT: &str = "nux_core::object";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "nux_core::signal";
    /// Poll source target.
    pub const SOURCE: &str = "nux_core::source";
    /// Mouse and keyboard routing.
    pub const INPUT: &str = "nux::input";
    /// Mouse focus, keyboard focus and grabs.
    pub const FOCUS: &str = "nux::focus";
    /// Drag and drop routing.
    pub const DND: &str = "nux::dnd";
    /// Gesture arbitration.
    pub const GESTURE: &str = "nux::gesture";
}

/// Style options for object tree visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
}

/// Configuration for object tree debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// The style of tree visualization.
    pub style: TreeStyle,
    /// Whether to show object IDs.
    pub show_ids: bool,
    /// Maximum depth to traverse (None for unlimited).
    pub max_depth: Option<usize>,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_ids: true,
            max_depth: None,
        }
    }
}

impl TreeFormatOptions {
    /// Create options for minimal output.
    pub fn minimal() -> Self {
        Self {
            show_ids: false,
            ..Default::default()
        }
    }
}

/// Debug utility for visualizing the tree held by an [`ObjectRegistry`].
///
/// `describe` supplies the per-object annotation printed after the name,
/// e.g. an area's kind and geometry.
#[derive(Debug, Clone, Default)]
pub struct RegistryTreeDebug {
    options: TreeFormatOptions,
}

impl RegistryTreeDebug {
    /// Create a new debug visualizer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a debug visualizer with custom options.
    pub fn with_options(options: TreeFormatOptions) -> Self {
        Self { options }
    }

    /// Format every root object and its subtree.
    pub fn format_all<T>(
        &self,
        registry: &ObjectRegistry<T>,
        describe: impl Fn(&T) -> String,
    ) -> ObjectResult<String> {
        let mut output = String::new();
        let _ = writeln!(output, "Object Tree ({} total objects):", registry.object_count());

        let roots: Vec<ObjectId> = registry.root_objects().collect();
        if roots.is_empty() {
            output.push_str("  (empty)\n");
        }
        for root in roots {
            self.format_subtree_into(registry, &describe, root, 0, true, &mut output)?;
        }
        Ok(output)
    }

    /// Format a subtree starting from a specific object.
    pub fn format_subtree<T>(
        &self,
        registry: &ObjectRegistry<T>,
        root: ObjectId,
        describe: impl Fn(&T) -> String,
    ) -> ObjectResult<String> {
        let mut output = String::new();
        self.format_subtree_into(registry, &describe, root, 0, true, &mut output)?;
        Ok(output)
    }

    fn format_subtree_into<T>(
        &self,
        registry: &ObjectRegistry<T>,
        describe: &dyn Fn(&T) -> String,
        id: ObjectId,
        depth: usize,
        is_last: bool,
        output: &mut String,
    ) -> ObjectResult<()> {
        if let Some(max) = self.options.max_depth
            && depth > max
        {
            return Ok(());
        }

        let name = registry.object_name(id)?;
        let children = registry.children(id)?;

        output.push_str(&self.build_prefix(depth, is_last));
        output.push_str(if name.is_empty() { "(unnamed)" } else { name });
        if self.options.show_ids {
            let _ = write!(output, " [{:?}]", id);
        }
        if let Some(value) = registry.get(id) {
            let description = describe(value);
            if !description.is_empty() {
                let _ = write!(output, " ({description})");
            }
        }
        output.push('\n');

        let child_count = children.len();
        for (i, &child_id) in children.iter().enumerate() {
            self.format_subtree_into(
                registry,
                describe,
                child_id,
                depth + 1,
                i == child_count - 1,
                output,
            )?;
        }
        Ok(())
    }

    fn build_prefix(&self, depth: usize, is_last: bool) -> String {
        if depth == 0 {
            return String::new();
        }

        let (branch, tee, corner) = match self.options.style {
            TreeStyle::Ascii => ("|", "+--", "`--"),
            TreeStyle::Unicode => ("\u{2502}", "\u{251c}\u{2500}\u{2500}", "\u{2514}\u{2500}\u{2500}"),
        };

        let mut prefix = String::new();
        for _ in 0..(depth - 1) {
            prefix.push_str(branch);
            prefix.push_str("  ");
        }
        prefix.push_str(if is_last { corner } else { tee });
        prefix.push(' ');
        prefix
    }
}
