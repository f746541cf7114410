// Shared prompt constants used by every oracle flow.
// Flow-specific templates live in classify/prompts.rs.

/// System prompt that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Fragment appended to classification prompts so the label is copied verbatim.
pub const EXACT_LABEL_INSTRUCTION: &str = "\
    The label MUST be copied exactly, character for character, from the allowed list. \
    Never invent a new label, never add emoji, punctuation, or qualifiers.";
