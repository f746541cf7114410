// Oracle prompt templates. `{text}` and `{labels}` are substituted at call time.

pub const SENTIMENT_PROMPT_TEMPLATE: &str = r#"Analyze the overall sentiment of the following journal entry. Classify the sentiment into one of these categories: {labels}.

JOURNAL ENTRY:
{text}

Consider the tone, keywords, and overall emotional expression. If the sentiment clearly leans one way, choose the matching positive or negative category. If it is balanced or contains conflicting emotions, choose "Mixed". If it is objective or lacks strong emotional cues, choose "Neutral".

OUTPUT SCHEMA (return exactly this structure):
{
  "sentiment": "<one label from the list>",
  "explanation": "<one short sentence>" | null
}"#;

pub const EMOTION_PROMPT_TEMPLATE: &str = r#"Analyze the following text and determine the primary emotion expressed.

TEXT:
{text}

Select the most fitting emotion from this list: {labels}. If no specific emotion is clear, select "Unsure".

OUTPUT SCHEMA (return exactly this structure):
{
  "emotion": "<one label from the list>"
}"#;

pub const REPHRASE_SYSTEM: &str = "\
You rephrase potentially toxic or harmful content into a more constructive and empathetic version \
for a peer-support community. Keep the author's question and intent. \
You MUST respond with valid JSON only, without markdown fences or explanations.";

pub const REPHRASE_PROMPT_TEMPLATE: &str = r#"Rephrase the following text so it is constructive and empathetic.

ORIGINAL TEXT:
{text}

OUTPUT SCHEMA (return exactly this structure):
{
  "rephrased_text": "<the rephrased text>"
}"#;
