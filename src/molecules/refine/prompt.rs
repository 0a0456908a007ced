use super::generator::RefinementRequest;

const SYSTEM_FRAMING: &str = r#"You are an editor revising an article drafted from interview material.

Apply the user's refinement instruction to the CURRENT ARTICLE and return the complete revised article.

Rules:
- Preserve the overall structure (headings, section order, lists) unless the instruction asks to change it.
- Keep facts, quotes and names from the current article intact.
- If a VOICE PROFILE is supplied, keep the writing consistent with it.
- Output only the revised article in Markdown. No preamble, no commentary, no code fences around the whole document."#;

pub fn build_refinement_request(
    current_content: &str,
    voice_profile: Option<String>,
    instruction: &str,
) -> RefinementRequest {
    RefinementRequest {
        system: SYSTEM_FRAMING.to_string(),
        current_content: current_content.to_string(),
        voice_profile,
        instruction: instruction.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::molecules::refine::Role;

    #[test]
    fn test_messages_without_voice() {
        let request = build_refinement_request("Hello", None, "  Make it formal ");
        let messages = request.to_messages();

        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].role, Role::System);
        assert!(messages[1].content.contains("Hello"));
        assert_eq!(messages[2].content, "REFINEMENT INSTRUCTION:\nMake it formal");
    }

    #[test]
    fn test_messages_with_voice_keep_order() {
        let request = build_refinement_request("Body", Some("Dry wit".into()), "Shorter");
        let messages = request.to_messages();

        assert_eq!(messages.len(), 4);
        assert!(messages[2].content.contains("Dry wit"));
        assert!(messages[3].content.ends_with("Shorter"));
    }
}
