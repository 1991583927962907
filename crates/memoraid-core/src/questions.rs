//! Recall-question prompt templating and model-output parsing.
//!
//! Builds the generation prompt for a memory and parses the JSON array the
//! model is asked to produce. Models wrap JSON in prose or markdown fences
//! more often than not, so extraction slices from the first `[` to the last
//! `]` before handing the payload to serde.

use thiserror::Error;

use crate::model::{Contributor, GeneratedQuestion, Memory};

/// Number of questions requested per memory.
pub const QUESTIONS_PER_MEMORY: usize = 5;

/// Errors from parsing a model response into questions.
#[derive(Debug, Error)]
pub enum ParseQuestionsError {
    /// The response contained no JSON array at all.
    #[error("no JSON array found in model response")]
    NoJsonArray,

    /// The extracted payload was not valid JSON of the expected shape.
    #[error("malformed question JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),

    /// The array parsed but contained no usable questions.
    #[error("model returned an empty question list")]
    EmptyQuestionList,
}

/// Build the generation prompt for one memory.
///
/// Asks for recall questions grounded in the description, each with a
/// reference answer, a 1-5 difficulty, and 5-20 points, as a JSON array.
/// The date line is included only when the event date is known.
pub fn build_question_prompt(memory: &Memory, contributor: &Contributor) -> String {
    let mut prompt = format!(
        "Generate {QUESTIONS_PER_MEMORY} questions about this memory that would help someone \
         with amnesia recall details:\n\n\
         Description: {}\n\
         Relationship: This memory is from a {} named {}\n",
        memory.description, contributor.relationship_type, contributor.name
    );
    if let Some(date) = memory.event_date {
        prompt.push_str(&format!("Date: This happened on {date}\n"));
    }
    prompt.push_str(
        "\nFor each question:\n\
         1. Make it specific to the description provided\n\
         2. Include a correct answer based on the description\n\
         3. Assign a difficulty level (1-5)\n\
         4. Assign points (5-20 based on difficulty)\n\n\
         Format the response as a JSON array with this structure for each question:\n\
         {\n\
         \x20 \"question\": \"Question text here?\",\n\
         \x20 \"correct_answer\": \"Correct answer here\",\n\
         \x20 \"difficulty\": 3,\n\
         \x20 \"points\": 15\n\
         }\n",
    );
    prompt
}

/// Extract the JSON array from a model response.
///
/// Slices from the first `[` to the last `]`, which tolerates leading prose,
/// trailing commentary, and markdown fences around the array.
pub fn extract_json_array(response: &str) -> Option<&str> {
    let start = response.find('[')?;
    let end = response.rfind(']')?;
    if end < start {
        return None;
    }
    Some(&response[start..=end])
}

/// Parse a model response into generated questions.
pub fn parse_generated_questions(
    response: &str,
) -> Result<Vec<GeneratedQuestion>, ParseQuestionsError> {
    let payload = extract_json_array(response).ok_or(ParseQuestionsError::NoJsonArray)?;
    let questions: Vec<GeneratedQuestion> = serde_json::from_str(payload)?;
    if questions.is_empty() {
        return Err(ParseQuestionsError::EmptyQuestionList);
    }
    Ok(questions)
}
