use indoc::indoc;
use serde::Serialize;
use tera::{Context, Tera};

/// Instruction prepended to every outbound request, parameterized by the
/// domain/topic pair of the call.
const PREAMBLE_TEMPLATE: &str = indoc! {"
    You are an expert in the {{ domain }} domain, focusing on the topic of {{ topic }}.
    Brainstorm with the user: propose concrete ideas, alternatives, and trade-offs grounded in the conversation so far.
    If the request is ambiguous or missing details you need, respond with a clarification request instead of guessing."};

/// Render an inline template against any serializable context.
pub fn render_prompt<T: Serialize>(template: &str, context_data: &T) -> Result<String, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_template("inline_template", template)?;
    let context = Context::from_serialize(context_data)?;
    tera.render("inline_template", &context)
}

#[derive(Serialize)]
struct PreambleContext<'a> {
    domain: &'a str,
    topic: &'a str,
}

/// The brainstorming preamble for a domain/topic pair. The rendered text
/// embeds both values verbatim.
pub fn brainstorm_preamble(domain: &str, topic: &str) -> Result<String, tera::Error> {
    render_prompt(PREAMBLE_TEMPLATE, &PreambleContext { domain, topic })
}
