//! Build the model prompt from the process snapshot
//!
//! The rendered summary is the only view of the process table the model
//! ever gets; the policy text tells it to pick names from that list only.

/// Process context for LLM prompts
pub struct ProcessContext {
    /// Rendered, memory-ranked process summary
    pub summary: String,
}

impl ProcessContext {
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
        }
    }

    /// Policy prompt embedding the process summary
    pub fn system_prompt(&self) -> String {
        format!(
            "{}\n\n{}\n\n{}",
            PROMPT_PREAMBLE,
            self.summary.trim_end(),
            PROMPT_RULES
        )
    }
}

const PROMPT_PREAMBLE: &str =
    "You are a desktop task assistant with access to the following running processes:";

const PROMPT_RULES: &str = r#"When users ask about specific processes or want to close/kill applications, ONLY include processes from the above list in your response. Return a JSON object using this format:

{
  "kill": ["ProcessName1", "ProcessName2"]
}

If the user specifically asks for a process by name, ONLY include that process if it's in the list. Don't suggest killing processes the user is actively using (like browsers) unless specifically requested. For questions completely unrelated to processes, provide a helpful response as normal."#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_summary() {
        let context = ProcessContext::new("Notepad (1 instances, 10 MB)\n");
        let prompt = context.system_prompt();
        assert!(prompt.contains("Notepad (1 instances, 10 MB)\n\nWhen users ask"));
        assert!(prompt.starts_with(PROMPT_PREAMBLE));
    }

    #[test]
    fn test_prompt_describes_kill_format() {
        let prompt = ProcessContext::new("").system_prompt();
        assert!(prompt.contains(r#""kill": ["ProcessName1", "ProcessName2"]"#));
        assert!(prompt.contains("ONLY include processes from the above list"));
    }
}
