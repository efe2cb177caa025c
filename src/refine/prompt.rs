//! Prompts for narrative refinement.

/// Instructions appended after the question and analysis.
const REFINE_INSTRUCTIONS: &str = "Please:
- Stick strictly to the ANALYSIS provided
- Do not make up your own answers
- If you don't know the answer, say \"I don't know\"
- Provide the answer in MARKDOWN format with proper headings
- Include key insights and takeaways
- Make it easy to read and understand";

/// Builds the user message asking for a narrative answer to `query`
/// grounded in `analysis`.
#[must_use]
pub fn build_refine_prompt(query: &str, analysis: &str) -> String {
    format!(
        "Based on the ANALYSIS provided below, please provide a clear, detailed, and \
         well-structured response for the QUESTION asked.\n\n\
         QUESTION: {query}\n\
         ANALYSIS: {analysis}\n\n\
         {REFINE_INSTRUCTIONS}\n"
    )
}
