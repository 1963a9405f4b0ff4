//! Flattens component trees into the editor's node map and repairs node
//! types the renderer would refuse to resolve.

use schema::models::document::ComponentNode;
use schema::models::graph::{CANVAS_TYPE, GraphNode, NodeType, PageGraph, ROOT_ID, ResolvedType};
use schema::models::vocabulary::ComponentType;
use serde_json::Value;
use tracing::warn;

/// Sequential node ids in document order: a node's id is always smaller than
/// the ids of its descendants.
struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    fn new() -> Self {
        Self { next: 1 }
    }

    fn allocate(&mut self) -> String {
        let id = format!("n{}", self.next);
        self.next += 1;
        id
    }
}

/// Flatten transformed component trees into a node map rooted at [`ROOT_ID`].
///
/// An empty input still yields a renderable page: a single section telling
/// the user the model returned nothing.
pub fn build_graph(components: &[ComponentNode]) -> PageGraph {
    let mut graph = PageGraph::new();
    graph.insert(ROOT_ID.to_string(), GraphNode::root());
    let mut alloc = IdAllocator::new();

    let mut root_kids = Vec::new();
    if components.is_empty() {
        warn!("no components to build, inserting empty-content fallback");
        root_kids.push(insert_node(&mut graph, &mut alloc, &empty_fallback(), ROOT_ID));
    } else {
        for component in components {
            root_kids.push(insert_node(&mut graph, &mut alloc, component, ROOT_ID));
        }
    }

    if let Some(root) = graph.get_mut(ROOT_ID) {
        root.nodes = root_kids;
    }
    graph
}

fn insert_node(
    graph: &mut PageGraph,
    alloc: &mut IdAllocator,
    component: &ComponentNode,
    parent: &str,
) -> String {
    let node_id = alloc.allocate();
    let kids = component
        .children
        .iter()
        .map(|child| insert_node(graph, alloc, child, &node_id))
        .collect();

    graph.insert(
        node_id.clone(),
        GraphNode {
            node_type: NodeType {
                resolved_name: ResolvedType::parse(&component.component_type),
            },
            is_canvas: true,
            props: component.props.clone(),
            display_name: component.component_type.clone(),
            custom: Default::default(),
            hidden: false,
            nodes: kids,
            linked_nodes: Default::default(),
            parent: Some(parent.to_string()),
        },
    );
    node_id
}

fn empty_fallback() -> ComponentNode {
    ComponentNode::new("Section").prop("paddingY", "xl").child(
        ComponentNode::new("Typography")
            .prop("variant", "h2")
            .prop("text", "AI returned empty content")
            .prop("align", "center"),
    )
}

/// Rewrite every node whose type the renderer cannot resolve into an
/// `UnknownComponent`, keeping the original name in `props.originalType`.
/// `Canvas` is an editor-internal type and passes through. Returns the number
/// of nodes repaired; running twice is a no-op.
pub fn validate_graph(graph: &mut PageGraph) -> usize {
    let mut repaired = 0;
    for (id, node) in graph.iter_mut() {
        let original = match &node.node_type.resolved_name {
            ResolvedType::Known(_) => continue,
            ResolvedType::Unknown(name) if name == CANVAS_TYPE => continue,
            ResolvedType::Unknown(name) => name.clone(),
        };
        warn!(
            node_id = %id,
            original_type = %original,
            "unknown component type, replacing with UnknownComponent"
        );
        node.node_type = NodeType::known(ComponentType::UnknownComponent);
        node.props
            .insert("originalType".to_string(), Value::String(original));
        node.display_name = ComponentType::UnknownComponent.to_string();
        repaired += 1;
    }
    repaired
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn sample_tree() -> ComponentNode {
        ComponentNode::new("Section")
            .prop("paddingY", "lg")
            .child(
                ComponentNode::new("Grid")
                    .child(ComponentNode::new("CraftCard"))
                    .child(ComponentNode::new("CraftCard")),
            )
            .child(ComponentNode::new("Typography").prop("text", "hi"))
    }

    #[test]
    fn test_build_graph_assigns_document_order_ids() {
        let graph = build_graph(&[sample_tree()]);
        // ROOT plus five nodes.
        assert_eq!(graph.len(), 6);
        assert_eq!(graph[ROOT_ID].nodes, vec!["n1".to_string()]);
        assert_eq!(graph["n1"].nodes, vec!["n2".to_string(), "n5".to_string()]);
        assert_eq!(graph["n2"].nodes, vec!["n3".to_string(), "n4".to_string()]);
        assert!(graph["n5"].nodes.is_empty());
    }

    #[test]
    fn test_build_graph_links_parents() {
        let graph = build_graph(&[sample_tree()]);
        assert_eq!(graph[ROOT_ID].parent, None);
        assert_eq!(graph["n1"].parent.as_deref(), Some(ROOT_ID));
        assert_eq!(graph["n2"].parent.as_deref(), Some("n1"));
        assert_eq!(graph["n3"].parent.as_deref(), Some("n2"));

        // Every child id listed by a node points back at it.
        for (id, node) in &graph {
            for kid in &node.nodes {
                assert_eq!(graph[kid].parent.as_deref(), Some(id.as_str()));
            }
        }
    }

    #[test]
    fn test_build_graph_copies_props_and_display_name() {
        let graph = build_graph(&[sample_tree()]);
        let section = &graph["n1"];
        assert_eq!(section.props["paddingY"], json!("lg"));
        assert_eq!(section.display_name, "Section");
        assert!(section.is_canvas);
        assert!(!section.hidden);
        assert_eq!(
            section.node_type.resolved_name,
            ResolvedType::Known(ComponentType::Section)
        );
    }

    #[test]
    fn test_empty_input_builds_fallback_page() {
        let graph = build_graph(&[]);
        assert_eq!(graph[ROOT_ID].nodes, vec!["n1".to_string()]);
        assert_eq!(graph["n1"].display_name, "Section");
        assert_eq!(graph["n2"].props["text"], json!("AI returned empty content"));
        assert_eq!(graph["n2"].props["align"], json!("center"));
    }

    #[test]
    fn test_unknown_nodes_are_flattened_not_lost() {
        let tree = ComponentNode::new("UnknownComponent")
            .prop("originalType", "WEIRD_UNKNOWN_TYPE")
            .prop("content", json!({}));
        let mut graph = build_graph(&[tree]);
        // Already UnknownComponent, so validation has nothing to repair.
        assert_eq!(validate_graph(&mut graph), 0);
        assert_eq!(
            graph["n1"].props["originalType"],
            json!("WEIRD_UNKNOWN_TYPE")
        );
    }

    #[test]
    fn test_validate_rewrites_unresolvable_types() {
        let mut graph = build_graph(&[ComponentNode::new("WeirdWidget").prop("x", 1)]);
        assert_eq!(
            graph["n1"].node_type.resolved_name,
            ResolvedType::Unknown("WeirdWidget".to_string())
        );

        assert_eq!(validate_graph(&mut graph), 1);
        let node = &graph["n1"];
        assert_eq!(
            node.node_type.resolved_name,
            ResolvedType::Known(ComponentType::UnknownComponent)
        );
        assert_eq!(node.props["originalType"], json!("WeirdWidget"));
        assert_eq!(node.display_name, "UnknownComponent");
        // Other props survive.
        assert_eq!(node.props["x"], json!(1));
    }

    #[test]
    fn test_validate_is_idempotent() {
        let mut graph = build_graph(&[ComponentNode::new("WeirdWidget")]);
        validate_graph(&mut graph);
        let first = serde_json::to_value(&graph).unwrap();
        assert_eq!(validate_graph(&mut graph), 0);
        assert_eq!(serde_json::to_value(&graph).unwrap(), first);
    }

    #[test]
    fn test_validate_tolerates_canvas() {
        let mut graph = build_graph(&[ComponentNode::new("Canvas")]);
        assert_eq!(validate_graph(&mut graph), 0);
        assert_eq!(
            graph["n1"].node_type.resolved_name,
            ResolvedType::Unknown("Canvas".to_string())
        );
    }

    #[test]
    fn test_serialized_node_shape() {
        let graph = build_graph(&[ComponentNode::new("NavBar").prop("brandName", "Aurora")]);
        let value = serde_json::to_value(&graph).unwrap();
        assert_eq!(value["ROOT"]["type"]["resolvedName"], json!("Section"));
        assert_eq!(value["n1"]["type"]["resolvedName"], json!("NavBar"));
        assert_eq!(value["n1"]["isCanvas"], json!(true));
        assert_eq!(value["n1"]["props"]["brandName"], json!("Aurora"));
        assert_eq!(value["n1"]["displayName"], json!("NavBar"));
        assert_eq!(value["n1"]["parent"], json!("ROOT"));
        assert_eq!(value["n1"]["linkedNodes"], json!({}));
    }
}
