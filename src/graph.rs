//! Explicit action graph for the pipeline.
//!
//! The declared pipeline is a small DAG: subdirectory builds chained in
//! declared order, an install node depending on every build node, and an
//! optional tag-index node after install. Making the edges explicit keeps
//! the "install depends on build" relationship verifiable instead of
//! positional.

use std::path::PathBuf;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Topo;
use serde::Serialize;

use crate::core::environment::Environment;

/// One node in the action graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum Action {
    /// Build the nested descriptor at a subdirectory.
    BuildSubdir { subdir: PathBuf },

    /// Copy the install manifest into the prefix.
    Install,

    /// Regenerate the cross-reference index.
    TagIndex,
}

/// The pipeline's dependency graph.
#[derive(Debug)]
pub struct ActionGraph {
    graph: DiGraph<Action, ()>,
}

impl ActionGraph {
    /// Build the graph for an environment.
    ///
    /// The tag-index node is only present when the taggable file set is
    /// non-empty; an empty set registers no action.
    pub fn from_environment(env: &Environment, has_taggable_files: bool) -> Self {
        let mut graph = DiGraph::new();

        let mut build_nodes: Vec<NodeIndex> = Vec::new();
        for subdir in env.subdirs() {
            let node = graph.add_node(Action::BuildSubdir {
                subdir: subdir.clone(),
            });
            if let Some(&prev) = build_nodes.last() {
                graph.add_edge(prev, node, ());
            }
            build_nodes.push(node);
        }

        let install = graph.add_node(Action::Install);
        for &build in &build_nodes {
            graph.add_edge(build, install, ());
        }

        if has_taggable_files {
            let tags = graph.add_node(Action::TagIndex);
            graph.add_edge(install, tags, ());
        }

        ActionGraph { graph }
    }

    /// Actions in a valid execution order.
    pub fn execution_order(&self) -> Vec<&Action> {
        let mut order = Vec::new();
        let mut topo = Topo::new(&self.graph);
        while let Some(node) = topo.next(&self.graph) {
            order.push(&self.graph[node]);
        }
        order
    }

    /// Number of actions in the graph.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Serialize the execution order for `slipway plan --json`.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "actions": self.execution_order(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::environment::EnvironmentBuilder;

    fn env_with_subdirs(subdirs: &[&str]) -> Environment {
        let mut builder = EnvironmentBuilder::new("utils", "1.0", "/tmp/pkg").unwrap();
        for s in subdirs {
            builder.declare_subdir(*s);
        }
        builder.finalize("")
    }

    #[test]
    fn test_builds_precede_install() {
        let env = env_with_subdirs(&["lib", "python/utils", "doc"]);
        let graph = ActionGraph::from_environment(&env, false);

        let order = graph.execution_order();
        assert_eq!(order.len(), 4);

        let install_pos = order
            .iter()
            .position(|a| matches!(a, Action::Install))
            .unwrap();
        for (i, action) in order.iter().enumerate() {
            if matches!(action, Action::BuildSubdir { .. }) {
                assert!(i < install_pos);
            }
        }
    }

    #[test]
    fn test_subdir_order_preserved() {
        let env = env_with_subdirs(&["lib", "python/utils", "doc"]);
        let graph = ActionGraph::from_environment(&env, false);

        let subdirs: Vec<_> = graph
            .execution_order()
            .into_iter()
            .filter_map(|a| match a {
                Action::BuildSubdir { subdir } => Some(subdir.clone()),
                _ => None,
            })
            .collect();

        assert_eq!(
            subdirs,
            vec![
                PathBuf::from("lib"),
                PathBuf::from("python/utils"),
                PathBuf::from("doc")
            ]
        );
    }

    #[test]
    fn test_tag_index_only_when_taggable() {
        let env = env_with_subdirs(&["lib"]);

        let without = ActionGraph::from_environment(&env, false);
        assert!(!without
            .execution_order()
            .iter()
            .any(|a| matches!(a, Action::TagIndex)));

        let with = ActionGraph::from_environment(&env, true);
        assert!(with
            .execution_order()
            .iter()
            .any(|a| matches!(a, Action::TagIndex)));
    }

    #[test]
    fn test_tag_index_runs_after_install() {
        let env = env_with_subdirs(&["lib", "doc"]);
        let graph = ActionGraph::from_environment(&env, true);

        let order = graph.execution_order();
        let install_pos = order
            .iter()
            .position(|a| matches!(a, Action::Install))
            .unwrap();
        let tags_pos = order
            .iter()
            .position(|a| matches!(a, Action::TagIndex))
            .unwrap();

        assert!(install_pos < tags_pos);
        assert_eq!(tags_pos, order.len() - 1);
    }

    #[test]
    fn test_json_shape() {
        let env = env_with_subdirs(&["lib"]);
        let graph = ActionGraph::from_environment(&env, true);

        let json = graph.to_json();
        let actions = json["actions"].as_array().unwrap();
        assert_eq!(actions.len(), 3);
        assert_eq!(actions[0]["action"], "build-subdir");
        assert_eq!(actions[0]["subdir"], "lib");
    }
}
