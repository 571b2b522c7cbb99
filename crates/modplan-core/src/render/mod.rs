//! Construction plan renderer
//!
//! Walks a plan depth-first and produces markup. For each node the generic
//! `RenderModule` hooks run on an empty string with the node data, then the hooks
//! scoped to the node's name run on that result. Non-empty hook output is the node's
//! complete markup, children included. Otherwise the built-in template is used: the
//! opening tag with name and primary value, every child rendered in area order, then
//! the closing tag.

pub mod template;

use serde_json::Value;
use tracing::trace;

use crate::{
    error::{PlanError, Result},
    hooks::Hooks,
    types::{value_kind, ResolvedNode},
};

/// Renders construction plans to markup
pub struct Renderer<'a> {
    hooks: &'a Hooks,
}

impl<'a> Renderer<'a> {
    pub fn new(hooks: &'a Hooks) -> Self {
        Self { hooks }
    }

    /// Render a construction plan
    ///
    /// # Errors
    ///
    /// Fails with [`PlanError::Render`] if any node has an empty name
    pub fn render(&self, plan: &ResolvedNode) -> Result<String> {
        self.render_node(plan)
    }

    /// Render an untyped construction plan
    ///
    /// # Errors
    ///
    /// Fails with [`PlanError::Render`] if the value is not a mapping, has no
    /// name, or does not have the shape of a construction plan
    pub fn render_value(&self, plan: Value) -> Result<String> {
        match &plan {
            Value::Object(fields) if fields.is_empty() => {
                return Err(PlanError::Render("construction plan is empty".to_string()))
            }
            Value::Object(fields) if !fields.contains_key("name") => {
                return Err(PlanError::Render(
                    "construction plan has no module name".to_string(),
                ))
            }
            Value::Object(_) => {}
            other => {
                return Err(PlanError::Render(format!(
                    "construction plan must be a mapping, {} given",
                    value_kind(other)
                )))
            }
        }

        let plan: ResolvedNode = serde_json::from_value(plan)
            .map_err(|e| PlanError::Render(format!("malformed construction plan: {}", e)))?;
        self.render(&plan)
    }

    fn render_node(&self, node: &ResolvedNode) -> Result<String> {
        if node.name.is_empty() {
            return Err(PlanError::Render("module name is empty".to_string()));
        }

        let markup = self
            .hooks
            .apply_render_module(&node.name, String::new(), &node.data)?;
        if !markup.is_empty() {
            trace!(module = %node.name, "Markup supplied by render hook");
            return Ok(markup);
        }

        let mut html = template::open(&node.name, &node.data);
        for child in node.children() {
            html.push_str(&self.render_node(child)?);
        }
        html.push_str(template::CLOSE);
        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use serde_json::json;

    use super::*;

    fn nested_plan() -> Value {
        json!({
            "name": "ModuleWithArea",
            "data": { "test": "result" },
            "areas": {
                "area51": [{ "name": "SingleModule", "data": { "test": "result" } }]
            }
        })
    }

    #[test]
    fn test_empty_plan_fails() {
        let hooks = Hooks::new();
        let result = Renderer::new(&hooks).render_value(json!({}));
        assert!(matches!(result, Err(PlanError::Render(_))));
    }

    #[test]
    fn test_non_mapping_plan_fails() {
        let hooks = Hooks::new();
        for plan in [json!(null), json!([]), json!("SingleModule")] {
            let result = Renderer::new(&hooks).render_value(plan);
            assert!(matches!(result, Err(PlanError::Render(_))));
        }
    }

    #[test]
    fn test_plan_without_name_fails() {
        let hooks = Hooks::new();
        let result = Renderer::new(&hooks).render_value(json!({ "data": { "a": 1 } }));
        assert!(matches!(result, Err(PlanError::Render(_))));
    }

    #[test]
    fn test_empty_child_name_fails_whole_render() {
        let hooks = Hooks::new();
        let result = Renderer::new(&hooks).render_value(json!({
            "name": "Parent",
            "areas": { "a": [{ "name": "" }] }
        }));
        assert!(matches!(result, Err(PlanError::Render(_))));
    }

    #[test]
    fn test_single_module() {
        let hooks = Hooks::new();
        let html = Renderer::new(&hooks)
            .render_value(json!({ "name": "SingleModule", "data": { "test": "result" } }))
            .unwrap();

        assert_eq!(html, "<div>SingleModule result</div>\n");
    }

    #[test]
    fn test_nested_modules() {
        let hooks = Hooks::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        hooks
            .add_render_module(move |markup, _| {
                counter.fetch_add(1, Ordering::SeqCst);
                markup
            })
            .unwrap();

        let html = Renderer::new(&hooks).render_value(nested_plan()).unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(
            html,
            "<div>ModuleWithArea result<div>SingleModule result</div>\n</div>\n"
        );
    }

    #[test]
    fn test_custom_html_hook() {
        let hooks = Hooks::new();
        hooks
            .add_render_module(|markup, data| {
                assert_eq!(markup, "");
                assert!(data.is_empty());
                "<div>SingleModule After Filter Hook</div>\n".to_string()
            })
            .unwrap();

        let html = Renderer::new(&hooks)
            .render(&ResolvedNode::leaf("SingleModule", Default::default()))
            .unwrap();

        assert_eq!(html, "<div>SingleModule After Filter Hook</div>\n");
    }

    #[test]
    fn test_custom_html_hook_with_empty_sequence_data() {
        let hooks = Hooks::new();
        hooks
            .add_render_module(|markup, data| {
                assert_eq!(markup, "");
                assert!(data.is_empty());
                "<div>SingleModule After Filter Hook</div>\n".to_string()
            })
            .unwrap();

        let html = Renderer::new(&hooks)
            .render_value(json!({ "name": "SingleModule", "data": [], "areas": [] }))
            .unwrap();

        assert_eq!(html, "<div>SingleModule After Filter Hook</div>\n");
    }

    #[test]
    fn test_custom_html_hook_for_single_module() {
        let hooks = Hooks::new();
        hooks
            .add_render_module_for("SingleModule", |markup, data| {
                assert_eq!(markup, "");
                assert_eq!(data["test"], json!("result"));
                "<div>SingleModule After Filter Hook</div>\n".to_string()
            })
            .unwrap();

        let html = Renderer::new(&hooks).render_value(nested_plan()).unwrap();

        assert_eq!(
            html,
            "<div>ModuleWithArea result<div>SingleModule After Filter Hook</div>\n</div>\n"
        );
    }

    #[test]
    fn test_scoped_hook_sees_generic_output() {
        let hooks = Hooks::new();
        hooks
            .add_render_module(|_, _| "<generic/>".to_string())
            .unwrap();
        hooks
            .add_render_module_for("SingleModule", |markup, _| format!("<wrap>{markup}</wrap>"))
            .unwrap();

        let html = Renderer::new(&hooks)
            .render_value(json!({ "name": "SingleModule" }))
            .unwrap();
        assert_eq!(html, "<wrap><generic/></wrap>");
    }

    #[test]
    fn test_overridden_parent_skips_children() {
        let hooks = Hooks::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        hooks
            .add_render_module_for("SingleModule", move |markup, _| {
                counter.fetch_add(1, Ordering::SeqCst);
                markup
            })
            .unwrap();
        hooks
            .add_render_module_for("ModuleWithArea", |_, _| "<custom/>".to_string())
            .unwrap();

        let html = Renderer::new(&hooks).render_value(nested_plan()).unwrap();

        assert_eq!(html, "<custom/>");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_children_render_in_area_order() {
        let hooks = Hooks::new();
        let html = Renderer::new(&hooks)
            .render_value(json!({
                "name": "Page",
                "data": {},
                "areas": {
                    "header": [{ "name": "Logo" }],
                    "main": [{ "name": "A" }, { "name": "B" }]
                }
            }))
            .unwrap();

        assert_eq!(
            html,
            "<div>Page <div>Logo </div>\n<div>A </div>\n<div>B </div>\n</div>\n"
        );
    }
}
