//! Prompt templates.
//!
//! The quiz and flashcard prompts spell out the exact layout
//! [`crate::parser`] expects; changing one side of that contract means
//! changing the other.

/// Summarize one batch of text.
pub fn summary(text: &str) -> String {
    format!(
        "Analyze the provided text and extract the key information concisely. \
         If the text is structured into sections, identify and summarize each \
         section separately. If the text is unstructured, generate a \
         well-organized summary covering the main points. Keep the summaries \
         clear, concise, and informative.\n\n\
         **Text:**\n{text}\n\n\
         **Summary:**"
    )
}

/// Combine per-chunk summaries into one (the reduce step for long
/// documents).
pub fn combine_summaries(summaries: &[String]) -> String {
    format!(
        "The following are partial summaries of consecutive sections of one \
         document. Combine them into a single coherent summary, merging \
         overlapping points and keeping the section structure where it \
         helps.\n\n{}",
        summaries.join("\n\n")
    )
}

/// Request quiz questions in the layout `parse_quiz_text` understands.
pub fn quiz(text: &str) -> String {
    format!(
        "Generate a mix of MULTIPLE-CHOICE and TRUE/FALSE quiz questions based \
         on the following text:\n{text}\n\n\
         The number of questions should be proportional to the length of the text.\n\n\
         Each question MUST be formatted like this:\n\
         Question: The question text\n\
         Type: multiple_choice or true_false\n\
         Options: (For multiple-choice) A) Option A, B) Option B, C) Option C, D) Option D\n\
         Options: (For true/false) A) True, B) False\n\
         Correct Answer: A or B or C or D (for multiple-choice), A or B (for true/false)\n\
         Explanation: Explanation of the answer\n\n\
         Separate each question with a blank line.\n\n\
         Return ONLY the questions in the specified format. Do not include any other text."
    )
}

/// Request flashcards in the layout `parse_flashcard_text` understands.
pub fn flashcards(text: &str) -> String {
    format!(
        "Generate concise and useful flashcards from the following text:\n{text}\n\n\
         Each flashcard should have:\n\
         - Front (Question): A key concept in question form.\n\
         - Back (Answer): The answer or explanation.\n\n\
         Format each flashcard like this:\n\
         Front: [Question]\n\
         Back: [Answer]\n\n\
         Return ONLY the flashcards in this format, without extra text."
    )
}

/// Answer a question from retrieved context only.
pub fn question_answer(context: &[String], question: &str) -> String {
    format!(
        "Use the following pieces of context from the user's documents to \
         answer the question. If the context does not contain the answer, say \
         that you don't know rather than guessing.\n\n\
         Context:\n{}\n\nQuestion: {question}\n\nAnswer:",
        context.join("\n\n---\n\n")
    )
}
