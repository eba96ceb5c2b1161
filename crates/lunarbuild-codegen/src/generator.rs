//! Dual-artifact generation
//!
//! Renders one [`NameTable`] into a C dispatch function and a JS module
//! mapping each name to the same id. The JS object also carries a
//! `length` entry so the frontend can bound-check ids.

use minijinja::{AutoEscape, Environment, context};
use serde::Serialize;

use lunarbuild_core::config::{FrontendTargetConfig, GeneratorConfig, NativeTargetConfig};

use crate::error::{Error, Result};
use crate::table::NameTable;

/// Name of the synthetic size entry in the JS table
pub const LENGTH_KEY: &str = "length";

/// Names that would shadow the size entry or the object prototype
const RESERVED_NAMES: [&str; 2] = [LENGTH_KEY, "__proto__"];

/// Parameter name of the destination handle in the C entry point
const DEST: &str = "dest";

const NATIVE_TEMPLATE: &str = r#"/* Generated by lunarbuild from {{ source }}. Do not edit. */
{% if include %}
#include "{{ include }}"
{% endif %}

void {{ function }}({{ param }}, int selector) {
    switch (selector) {
    {% for case in cases %}
    case {{ case.id }}:
        {{ case.body }}
        break;
    {% endfor %}
    default:
        break;
    }
}
"#;

const FRONTEND_TEMPLATE: &str = r#"// Generated by lunarbuild from {{ source }}. Do not edit.
export const {{ export }} = Object.freeze({
{% for entry in entries %}
    {{ entry.name }}: {{ entry.id }},
{% endfor %}
    length: {{ length }},
});

export default {{ export }};
"#;

/// The two generated fragments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPair {
    /// C source unit with the dispatch function
    pub native: String,
    /// ES module with the name → id table
    pub frontend: String,
}

#[derive(Serialize)]
struct Case {
    id: usize,
    body: String,
}

#[derive(Serialize)]
struct Entry<'a> {
    id: usize,
    name: &'a str,
}

/// Renders artifact pairs for one generator configuration
pub struct Generator {
    env: Environment<'static>,
    source: String,
    include: Option<String>,
    function: String,
    param: String,
    export: String,
}

impl Generator {
    /// Create a generator from a manifest entry
    pub fn from_config(config: &GeneratorConfig) -> Result<Self> {
        Self::new(
            &config.source.display().to_string(),
            &config.native,
            &config.frontend,
        )
    }

    /// Create a generator; `source` is only used in the generated headers
    pub fn new(
        source: &str,
        native: &NativeTargetConfig,
        frontend: &FrontendTargetConfig,
    ) -> Result<Self> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.add_template("native.c", NATIVE_TEMPLATE)?;
        env.add_template("frontend.js", FRONTEND_TEMPLATE)?;
        env.add_template_owned("case", native.case_template.clone())?;

        let handle = native.handle.trim();
        let param = if handle.ends_with('*') {
            format!("{handle}{DEST}")
        } else {
            format!("{handle} {DEST}")
        };

        Ok(Self {
            env,
            source: source.to_string(),
            include: native.include.clone(),
            function: native.function.clone(),
            param,
            export: frontend.export.clone(),
        })
    }

    /// Render both fragments from the same table
    pub fn generate(&self, table: &NameTable) -> Result<ArtifactPair> {
        if let Some(name) = RESERVED_NAMES
            .into_iter()
            .find(|name| table.id_of(name).is_some())
        {
            return Err(Error::ReservedName {
                name: name.to_string(),
            });
        }

        let native = self.render_native(table)?;
        let frontend = self.render_frontend(table)?;
        Ok(ArtifactPair { native, frontend })
    }

    fn render_native(&self, table: &NameTable) -> Result<String> {
        let case = self.env.get_template("case")?;
        let cases = table
            .iter()
            .map(|(id, name)| {
                let body = case.render(context! { name, id, dest => DEST })?;
                Ok(Case {
                    id,
                    body: body.trim().to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let rendered = self.env.get_template("native.c")?.render(context! {
            source => self.source,
            include => self.include,
            function => self.function,
            param => self.param,
            cases,
        })?;
        Ok(rendered)
    }

    fn render_frontend(&self, table: &NameTable) -> Result<String> {
        let entries: Vec<_> = table.iter().map(|(id, name)| Entry { id, name }).collect();
        let rendered = self.env.get_template("frontend.js")?.render(context! {
            source => self.source,
            export => self.export,
            length => table.len(),
            entries,
        })?;
        Ok(rendered)
    }
}
