//! Counselor prompt construction

use std::collections::HashMap;

use crate::catalog::AssessmentType;

/// Placeholder used for questions the student left blank
const NOT_ANSWERED: &str = "Not answered";

/// Build the counselor prompt from an assessment's questions and answers
///
/// Every question appears in order with its answer, or the literal
/// "Not answered" when no (non-empty) answer exists for that index.
/// Q/A pairs are separated by blank lines.
pub fn build_prompt(
    assessment: AssessmentType,
    questions: &[String],
    answers: &HashMap<usize, String>,
) -> String {
    let formatted_answers = questions
        .iter()
        .enumerate()
        .map(|(i, question)| {
            let answer = answers
                .get(&i)
                .map(String::as_str)
                .filter(|a| !a.is_empty())
                .unwrap_or(NOT_ANSWERED);
            format!("Question: {}\nAnswer: {}", question, answer)
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "You are an expert career counselor AI. Your task is to provide career \
         recommendations for a student based on their answers to an assessment.\n\
         Analyze the following results and provide 3-5 suitable career recommendations.\n\
         \n\
         Assessment Type: {}\n\
         \n\
         Assessment Questions and Answers:\n\
         {}\n\
         \n\
         Based on these answers, suggest specific careers and provide a brief, \
         encouraging reason for each recommendation, explaining why it aligns with \
         the student's responses.\n\
         Return the response in the specified JSON format.",
        assessment.title(),
        formatted_answers
    )
}
