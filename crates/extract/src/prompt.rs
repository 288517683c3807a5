pub fn build_summary_prompt(chunk_text: &str) -> String {
    format!(
        r#"For the following text:
1. Generate a short and clear Title (max 10 words).
2. Summarize the main idea in one sentence (max 30 words).

Text:
{}

Format the output strictly like this:

Title: [your generated title]
Summary: [your generated summary]"#,
        chunk_text
    )
}

pub fn build_triple_prompt(text: &str) -> String {
    format!(
        r#"You are a precise graph relationship extractor.
Extract a single relationship from the text and format it as a JSON object with this exact structure:

{{
  "node": "Person/Entity",
  "target_node": "Related Entity",
  "relationship": "Type of Relationship"
}}

Identify the MOST salient relationship mentioned in the text. Be precise.
Output ONLY the JSON object, no markdown, no explanations.

Now, here's the text:
{}"#,
        text
    )
}
