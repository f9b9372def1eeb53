// Prompt constants for CV enhancement.

/// System prompt for enhancement. Appended with `JSON_ONLY_SYSTEM` at call time.
pub const ENHANCE_SYSTEM: &str = "You are a professional CV/Resume writer and enhancement assistant.";

/// Enhancement prompt. Replace `{cv_json}` before sending.
pub const ENHANCE_PROMPT_TEMPLATE: &str = r#"Your task:
- Rewrite and enhance the CV content to sound professional, impactful, and achievement-oriented.
- Use strong action verbs and focus on quantifiable results where possible.
- Maintain the exact same JSON structure and keys as provided.
- Only modify the text values. Do not remove any fields, and do not add new fields.

Return the enhanced CV as JSON only, without any explanations or formatting like markdown.

Example improvements:
- "Worked on projects" → "Led cross-functional projects, improving team efficiency by 30%"
- "Made a website" → "Developed and deployed a responsive web application serving 5,000 users"

Here is the CV JSON to enhance:
{cv_json}"#;
