//! Segment trie used for route matching
//!
//! Each HTTP method owns one tree of [`RouteNode`]s. An edge corresponds to one
//! path segment:
//! - Literal segments (e.g. `users`) live in a map keyed by the segment text
//! - A level may additionally carry one parameter child (e.g. `{id}`), which
//!   matches any segment and binds it under the parameter name; at the
//!   first level the empty segment is left to the root route
//! - A node terminates a route when it holds a handler
//!
//! Lookup is O(k) where k is the number of path segments, independent of the
//! number of registered routes. There is no backtracking: once a literal
//! miss sends the walk into the parameter child, the walk is committed.
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut root = RouteNode::new();
//! root.insert(&segment("/users/{id}"), "get_user")?;
//!
//! let mut params = ParamVec::new();
//! assert_eq!(root.search(&segment("/users/42"), &mut params), Some(&"get_user"));
//! assert_eq!(params[0].1, "42");
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::core::ParamVec;
use super::segment::Segment;

/// Why a pattern could not be inserted into a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum InsertError {
    /// The pattern's final node already holds a handler.
    Duplicate,
    /// A different parameter name already occupies this level.
    Conflict { existing: String, requested: String },
}

/// What a route-terminating node holds.
pub(crate) struct Leaf<H> {
    /// Normalized pattern (`/a/{b}`) the handler was registered under
    pub(crate) pattern: Arc<str>,
    pub(crate) handler: H,
}

/// The single parameter edge a level may carry.
struct ParamChild<H> {
    /// Parameter name without braces; shared with every binding it produces
    name: Arc<str>,
    node: RouteNode<H>,
}

/// Node in the segment trie.
pub(crate) struct RouteNode<H> {
    /// Set only on nodes that terminate a registered route
    leaf: Option<Leaf<H>>,
    /// Literal children keyed by segment text
    children: HashMap<String, RouteNode<H>>,
    /// At most one parameter child per level
    param_child: Option<Box<ParamChild<H>>>,
}

impl<H> Default for RouteNode<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> fmt::Debug for RouteNode<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteNode")
            .field("pattern", &self.leaf.as_ref().map(|l| l.pattern.as_ref()))
            .field("children", &self.children.keys().collect::<Vec<_>>())
            .field(
                "param_child",
                &self.param_child.as_ref().map(|p| p.name.as_ref()),
            )
            .finish()
    }
}

impl<H> RouteNode<H> {
    pub(crate) fn new() -> Self {
        Self {
            leaf: None,
            children: HashMap::new(),
            param_child: None,
        }
    }

    /// Insert a handler at the end of `segments`.
    ///
    /// The pattern is validated with a read-only walk first, so on error the
    /// tree is left exactly as it was.
    pub(crate) fn insert(&mut self, segments: &[&str], handler: H) -> Result<(), InsertError> {
        self.check_insert(segments)?;

        let mut node = self;
        for raw in segments {
            node = match Segment::parse(raw) {
                Segment::Param(name) => {
                    let param = node.param_child.get_or_insert_with(|| {
                        Box::new(ParamChild {
                            name: Arc::from(name),
                            node: RouteNode::new(),
                        })
                    });
                    &mut param.node
                }
                Segment::Literal(lit) => node
                    .children
                    .entry(lit.to_owned())
                    .or_insert_with(RouteNode::new),
            };
        }
        node.leaf = Some(Leaf {
            pattern: Arc::from(format!("/{}", segments.join("/"))),
            handler,
        });
        Ok(())
    }

    /// Walk the existing tree along `segments` and report whether inserting
    /// there would conflict. Stops early once the walk leaves the tree: the
    /// remaining nodes would all be fresh.
    fn check_insert(&self, segments: &[&str]) -> Result<(), InsertError> {
        let mut node = self;
        for raw in segments {
            let next = match Segment::parse(raw) {
                Segment::Param(name) => match &node.param_child {
                    Some(param) if param.name.as_ref() != name => {
                        return Err(InsertError::Conflict {
                            existing: param.name.to_string(),
                            requested: name.to_owned(),
                        });
                    }
                    Some(param) => Some(&param.node),
                    None => None,
                },
                Segment::Literal(lit) => node.children.get(lit),
            };
            match next {
                Some(child) => node = child,
                None => return Ok(()),
            }
        }
        if node.leaf.is_some() {
            return Err(InsertError::Duplicate);
        }
        Ok(())
    }

    /// Find the leaf for `segments`, pushing parameter bindings into
    /// `params` along the way.
    ///
    /// Literal children win over the parameter child. A top-level parameter
    /// never binds the empty segment, which addresses the root route; deeper
    /// parameters bind any segment, empty included. Reaching a node without a
    /// handler is a miss.
    pub(crate) fn search<'a>(
        &'a self,
        segments: &[&str],
        params: &mut ParamVec,
    ) -> Option<&'a Leaf<H>> {
        let mut node = self;
        for (depth, &seg) in segments.iter().enumerate() {
            if let Some(child) = node.children.get(seg) {
                node = child;
                continue;
            }
            match &node.param_child {
                Some(param) if depth > 0 || !seg.is_empty() => {
                    params.push((Arc::clone(&param.name), seg.to_owned()));
                    node = &param.node;
                }
                _ => return None,
            }
        }
        node.leaf.as_ref()
    }

    /// Append every route pattern below this node to `out`.
    ///
    /// `prefix` holds the segments leading to this node. Literal children are
    /// visited in sorted order so listings are stable.
    pub(crate) fn collect_patterns(&self, prefix: &mut Vec<String>, out: &mut Vec<String>) {
        if self.leaf.is_some() {
            out.push(format!("/{}", prefix.join("/")));
        }
        let mut keys: Vec<&String> = self.children.keys().collect();
        keys.sort();
        for key in keys {
            if let Some(child) = self.children.get(key) {
                prefix.push(key.clone());
                child.collect_patterns(prefix, out);
                prefix.pop();
            }
        }
        if let Some(param) = &self.param_child {
            prefix.push(format!("{{{}}}", param.name));
            param.node.collect_patterns(prefix, out);
            prefix.pop();
        }
    }

    /// Number of handler-bearing nodes in this subtree.
    pub(crate) fn route_count(&self) -> usize {
        let own = usize::from(self.leaf.is_some());
        let literal: usize = self.children.values().map(RouteNode::route_count).sum();
        let param = self
            .param_child
            .as_ref()
            .map_or(0, |p| p.node.route_count());
        own + literal + param
    }
}
