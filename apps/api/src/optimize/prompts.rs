// Profile optimization prompt templates.
// The response shape in OPTIMIZE_PROMPT_TEMPLATE is what validation.rs checks.

/// The six audit categories, in the order the model is asked to report them.
pub const AUDIT_CATEGORIES: [&str; 6] = [
    "Headline",
    "Opening Hook",
    "Achievement Focus",
    "Keywords & Searchability",
    "Experience Depth",
    "Confidence",
];

/// System prompt: persona plus the criteria behind each audit category.
pub const OPTIMIZE_SYSTEM: &str = "\
You are an expert LinkedIn profile optimizer and personal branding consultant. \
You help mid-career professionals transform their profiles from forgettable to compelling.

Your expertise includes:
- Writing achievement-focused content that showcases impact
- Crafting headlines that stand out in search results
- Creating narratives that tell a career story
- Optimizing for recruiters AND networking connections
- Understanding what makes profiles rank higher in LinkedIn search

Evaluate every profile on exactly these six categories:
1. Headline: is it specific, does it state a value proposition, does it avoid a bare job title?
2. Opening Hook: do the first two lines of the About section earn the \"see more\" click?
3. Achievement Focus: are roles framed as outcomes with metrics, or as lists of duties?
4. Keywords & Searchability: does the profile contain the terms recruiters search for in the target field?
5. Experience Depth: do the most recent roles show scope, ownership, and progression?
6. Confidence: does the voice sound assured, or hedged, passive, and apologetic?

Your rewrites should:
- Lead with impact and results
- Use specific metrics where possible (estimate reasonably if not provided)
- Tell a story, not list duties
- Include relevant keywords naturally
- Show personality while remaining professional
- Be optimized for the target role if specified";

/// User prompt template. Replace `{content}` and `{target_role_context}` before sending.
pub const OPTIMIZE_PROMPT_TEMPLATE: &str = r#"Analyze and optimize this LinkedIn profile content:

---
{content}
---
{target_role_context}

Respond with a JSON object (no markdown, just valid JSON) with this exact structure:

{
  "score": <number 0-100>,
  "original": {
    "headline": "<extracted original headline or best guess>",
    "about": "<extracted original about section or best guess, first 500 chars>"
  },
  "audit": [
{audit_entries}
  ],
  "optimized": {
    "headline": "<new compelling headline, max 120 chars>",
    "about": "<new about section, ~1500-2000 chars, with personality and impact>",
    "experience": "<rewritten experience bullets for most recent 2-3 roles, achievement-focused with metrics>",
    "resumeSummary": "<3-4 line resume summary that matches the new LinkedIn narrative>"
  }
}

Guidelines for optimization:
- Headline: Make it specific, include value proposition, avoid generic titles
- About: Start with a hook, tell a story, include achievements, end with CTA
- Experience: STAR format - Situation context, Task, Action, Result with metrics
- Add estimated metrics if none provided (e.g., "team of ~10", "increased by ~20%")
- Keep voice professional but personable - not robotic

Return ONLY valid JSON, no explanation or markdown."#;

/// The fully rendered request for one optimization call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPayload {
    pub system: &'static str,
    pub user: String,
}

/// Renders the prompt pair for `content`. Pure and deterministic.
pub fn build_prompt(content: &str, target_role: Option<&str>) -> PromptPayload {
    let target_role_context = match target_role {
        Some(role) => format!(
            "\nThe user is targeting this role: \"{role}\". Tailor your optimizations to \
             appeal to hiring managers and recruiters for this type of position.\n"
        ),
        None => String::new(),
    };

    let audit_entries = AUDIT_CATEGORIES
        .iter()
        .map(|category| {
            format!(
                "    {{\n      \"category\": \"{category}\",\n      \"status\": \"pass|warn|fail\",\n      \"feedback\": \"<specific feedback>\"\n    }}"
            )
        })
        .collect::<Vec<_>>()
        .join(",\n");

    // Content goes in last so braces inside it are never mistaken for placeholders.
    let user = OPTIMIZE_PROMPT_TEMPLATE
        .replace("{target_role_context}", &target_role_context)
        .replace("{audit_entries}", &audit_entries)
        .replace("{content}", content);

    PromptPayload {
        system: OPTIMIZE_SYSTEM,
        user,
    }
}
