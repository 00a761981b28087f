/// Maximum number of characters of document text sent to the model.
pub const MAX_CONTEXT_CHARS: usize = 10_000;

/// The leading slice of `text` that fits in a prompt.
pub fn excerpt(text: &str) -> &str {
    match text.char_indices().nth(MAX_CONTEXT_CHARS) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

pub fn summary_prompt(text: &str) -> String {
    format!(
        "You are an academic assistant. Given the following document text, produce:\n\
         1. A short summary (2-3 sentences).\n\
         2. A bullet-point summary (5-7 key points).\n\n\
         Return your answer in this exact JSON format:\n\
         {{\"short\": \"...\", \"bullets\": [\"point1\", \"point2\", ...]}}\n\n\
         Document text:\n{}",
        excerpt(text)
    )
}

pub fn quiz_prompt(text: &str, num_questions: u32) -> String {
    format!(
        "You are an academic quiz generator. Based on the following document text, \
         generate {num_questions} multiple choice questions.\n\n\
         Return your answer as a JSON array. Each element must have:\n\
         - \"question\": the question string\n\
         - \"options\": {{\"A\": \"...\", \"B\": \"...\", \"C\": \"...\", \"D\": \"...\"}}\n\
         - \"correct_answer\": the letter of the correct option (e.g. \"A\")\n\n\
         Document text:\n{}",
        excerpt(text)
    )
}

pub fn chat_system_instruction(text: &str) -> String {
    format!(
        "You are a helpful study assistant. Use ONLY the following document context to answer \
         the user's question. If the answer cannot be found in the context, say so clearly.\n\n\
         IMPORTANT: Do NOT use markdown formatting (like **, _, or #). Provide your answers in \
         readable, detailed plain text paragraphs.\n\n\
         Document context:\n{}",
        excerpt(text)
    )
}
