//! Prompt templates for the generation endpoints.
//!
//! Builders are pure so the same inputs always produce the same prompt.

use crate::models::Finding;

/// Prompt asking the model for one trending innovation topic.
pub const RANDOM_TOPIC_PROMPT: &str = "Suggest a single, specific, and trending innovation topic or market gap that is broad enough for research but specific enough for a product idea. Examples: \"Biometric security for smart homes\", \"Eco-friendly packaging for e-commerce\", \"AI-driven vertical farming\". Give me ONLY the title of the topic, nothing else.";

/// Render findings as the one-line bullets the idea prompt embeds.
fn findings_block(findings: &[Finding]) -> String {
    findings
        .iter()
        .map(|finding| {
            format!(
                "- {}: {} (Source: {})",
                finding.title, finding.snippet, finding.source
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Instruction prompt for idea generation.
///
/// Names the exact JSON array schema the parser expects and forbids markdown
/// fencing in the reply (the parser still strips fences when the model adds
/// them anyway).
pub fn generate_ideas_prompt(findings: &[Finding], context: &str) -> String {
    format!(
        r#"You are an expert Innovation Consultant. Your task is to generate unique, high-value product or service ideas based on the following research findings about "{}".

RESEARCH FINDINGS:
{}

INSTRUCTIONS:
1. Analyze the findings to identify gaps, trends, or opportunities.
2. Generate 3 distinct, innovative ideas that leverage these findings.
3. For each idea, provide a catchy title, a detailed description of how it works and the value proposition, feasibility (Low/Medium/High), and impact (Low/Medium/High).
4. Reference which finding inspired the idea in the "analysis" field if applicable.

OUTPUT FORMAT (Strict JSON Array):
[
  {{
    "title": "Idea Name",
    "description": "...",
    "feasibility": "High",
    "impact": "Medium",
    "analysis": "Brief comment on the opportunity"
  }}
]
Return ONLY the JSON array. Do not use Markdown code blocks."#,
        context,
        findings_block(findings)
    )
}

/// Instruction prompt for drafting a patent application from an idea.
pub fn draft_patent_prompt(title: &str, subtitle: &str, description: &str, analysis: &str) -> String {
    format!(
        r#"You are an expert Patent Attorney. Draft a comprehensive patent application for the following invention:

TITLE: {}
SUBTITLE: {}
DESCRIPTION: {}
ANALYSIS: {}

The patent draft should include:
1. FIELD OF THE INVENTION: A brief description of the technical area.
2. BACKGROUND: The problem this invention solves.
3. SUMMARY: Detailed technical solution.
4. DETAILED DESCRIPTION: How it works in practice, components, and logic.
5. CLAIMS: At least 3 specific technical claims.

FORMAT: Use a professional, formal, and technical tone. Return ONLY the draft text."#,
        title, subtitle, description, analysis
    )
}
