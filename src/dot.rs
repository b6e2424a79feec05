//! Graphviz DOT serialization of a dependency graph.
//!
//! Output shape:
//!
//! ```text
//! digraph "app" {
//!     "app";
//!     "lib-a" [style=dashed];
//!     "app" -> "lib-a";
//! }
//! ```
//!
//! One statement per node (so isolated nodes still appear), one per edge,
//! nodes in first-discovered order and edges in insertion order, so the
//! same graph always serializes to the same bytes. Unexpanded leaves are drawn
//! dashed. Identifiers are always double-quoted with `\` and `"` escaped; a
//! label containing control characters has no valid DOT representation and
//! fails the run.

use std::fmt::Write as _;

use crate::core::DepvizError;
use crate::resolver::DependencyGraph;

/// Escape a label for use inside a double-quoted DOT identifier.
fn escape_id(name: &str) -> Result<String, DepvizError> {
    if name.chars().any(char::is_control) {
        return Err(DepvizError::SerializationError {
            name: name.escape_debug().to_string(),
            reason: "label contains control characters".to_string(),
        });
    }
    Ok(name.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Serialize `graph` as DOT text.
///
/// # Errors
///
/// Returns [`DepvizError::SerializationError`] if any label cannot be
/// escaped.
pub fn to_dot(graph: &DependencyGraph) -> Result<String, DepvizError> {
    let mut output = String::with_capacity(64 + 32 * graph.node_count());

    let _ = writeln!(output, "digraph \"{}\" {{", escape_id(graph.root().as_str())?);

    for node in graph.nodes() {
        let id = escape_id(node.as_str())?;
        if graph.is_unresolved(node) {
            let _ = writeln!(output, "    \"{id}\" [style=dashed];");
        } else {
            let _ = writeln!(output, "    \"{id}\";");
        }
    }

    for (from, to) in graph.edges() {
        let _ = writeln!(
            output,
            "    \"{}\" -> \"{}\";",
            escape_id(from.as_str())?,
            escape_id(to.as_str())?
        );
    }

    output.push_str("}\n");
    Ok(output)
}
