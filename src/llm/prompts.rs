//! Prompt templates for insight generation

use std::collections::HashMap;

/// Template with `{{name}}` placeholders
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
    variables: Vec<String>,
}

impl PromptTemplate {
    /// Create a new prompt template
    pub fn new(template: impl Into<String>) -> Self {
        let template = template.into();
        let variables = extract_variables(&template);
        Self {
            template,
            variables,
        }
    }

    /// Fill in the template; unknown placeholders are left untouched
    #[must_use]
    pub fn render(&self, values: &HashMap<&str, String>) -> String {
        let mut result = self.template.clone();
        for var in &self.variables {
            if let Some(value) = values.get(var.as_str()) {
                result = result.replace(&format!("{{{{{var}}}}}"), value);
            }
        }
        result
    }

    /// Get required variables
    #[must_use]
    pub fn variables(&self) -> &[String] {
        &self.variables
    }
}

/// Extract variable names from template
fn extract_variables(template: &str) -> Vec<String> {
    let mut variables = Vec::new();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '{' && chars.peek() == Some(&'{') {
            chars.next(); // skip second '{'
            let mut var_name = String::new();
            while let Some(&ch) = chars.peek() {
                chars.next();
                if ch == '}' {
                    if chars.peek() == Some(&'}') {
                        chars.next();
                    }
                    break;
                }
                var_name.push(ch);
            }
            if !var_name.is_empty() && !variables.contains(&var_name) {
                variables.push(var_name);
            }
        }
    }

    variables
}

pub struct InsightPrompts;

impl InsightPrompts {
    /// System message constraining the reply to the insight JSON shape
    pub const SYSTEM: &'static str = "You are a social media analytics expert. \
        You answer with strict JSON only, no prose and no markdown.";

    /// Insight request for one scored profile
    #[must_use]
    pub fn profile_insights() -> PromptTemplate {
        PromptTemplate::new(
            r#"Analyze this TikTok creator and produce 3 or 4 insights.

Profile:
- Username: @{{username}}
- Display name: {{nickname}}
- Verified: {{verified}}
- Followers: {{followers}}
- Following: {{following}}
- Total likes: {{likes}}
- Videos: {{videos}}
- Bio: {{bio}}

Behavioral scores (0-100):
- Visual: {{visual}}
- Audio: {{audio}}
- Energy: {{energy}}
- Interaction: {{interaction}}
- Linguistic: {{linguistic}}
- Contextual: {{contextual}}
- Environmental: {{environmental}}
- Governance: {{governance}}

Respond with JSON of the form:
{"insights": [{"type": "strength" | "opportunity" | "alert", "title": "short title", "description": "one or two sentences"}]}"#,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_variables() {
        let template = PromptTemplate::new("Hello {{name}}, you are {{age}} years old.");
        assert_eq!(template.variables(), &["name", "age"]);
    }

    #[test]
    fn test_template_render() {
        let template = PromptTemplate::new("Hello {{name}}!");
        let mut values = HashMap::new();
        values.insert("name", "Alice".to_string());
        assert_eq!(template.render(&values), "Hello Alice!");
    }

    #[test]
    fn test_single_braces_are_literal() {
        let template = PromptTemplate::new(r#"{"a": {{value}}}"#);
        assert_eq!(template.variables(), &["value"]);
        let mut values = HashMap::new();
        values.insert("value", "1".to_string());
        assert_eq!(template.render(&values), r#"{"a": 1}"#);
    }

    #[test]
    fn test_insight_prompt_variables() {
        let vars = InsightPrompts::profile_insights().variables().to_vec();
        for expected in ["username", "followers", "likes", "videos", "governance"] {
            assert!(vars.iter().any(|v| v == expected), "missing {expected}");
        }
    }
}
