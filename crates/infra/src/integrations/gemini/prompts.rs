//! Prompt text and response schemas sent to Gemini

use healthprod_domain::{Activity, TaskDraft};
use serde_json::{json, Value};

pub(crate) const MEAL_PROMPT: &str = "Analyze this meal. Estimate the total calories and provide \
                                       a brief nutritional breakdown (protein, carbs, fats). \
                                       Present it clearly.";

pub(crate) fn insights(activities: &[Activity]) -> String {
    let lines: Vec<String> = activities
        .iter()
        .map(|a| {
            format!(
                "- {}: {} to {} ({:.1} hours)",
                a.category,
                a.start_time.format("%Y-%m-%d %H:%M"),
                a.end_time.format("%Y-%m-%d %H:%M"),
                a.duration_hours()
            )
        })
        .collect();

    format!(
        "As a lifestyle habit coach, analyze the following daily activities and provide \
         personalized, actionable insights and recommendations.\n\
         Focus on patterns in sleep, meals, study, work, and exercise. The tone should be \
         encouraging and helpful.\n\
         Format the output as clean markdown.\n\n\
         Here are the activities from the last few days:\n{}",
        lines.join("\n")
    )
}

pub(crate) fn daily_report(activities: &[Activity]) -> String {
    let lines: Vec<String> = activities
        .iter()
        .map(|a| {
            format!(
                "- {}: from {} to {} ({:.1} hours). Notes: {}",
                a.category,
                a.start_time.format("%H:%M"),
                a.end_time.format("%H:%M"),
                a.duration_hours(),
                a.notes.as_deref().filter(|n| !n.trim().is_empty()).unwrap_or("N/A")
            )
        })
        .collect();

    format!(
        "Analyze the following activities from a single day and generate a comprehensive \
         end-of-day report in JSON format.\n\n\
         Activities:\n{}\n\n\
         The report should include:\n\
         1. **productivityScore**: A score from 0 to 100 representing overall productivity. \
         High scores for focused work/study, balanced with breaks and exercise. Low scores for \
         too much distraction or imbalance.\n\
         2. **summary**: A short, encouraging paragraph (2-3 sentences) summarizing the day's \
         accomplishments and patterns.\n\
         3. **recommendations**: A brief point about one area for potential improvement (e.g., \
         sleep schedule, break frequency).\n\
         4. **nextDayTodoList**: An array of 3 suggested, actionable to-do items for the next \
         day based on today's activities.",
        lines.join("\n")
    )
}

pub(crate) fn prioritize(tasks: &[TaskDraft]) -> String {
    let listing = serde_json::to_string_pretty(tasks).unwrap_or_else(|_| "[]".to_string());
    format!(
        "As an expert productivity assistant, analyze the following list of tasks. For each \
         task, assign a priority level: 'Urgent', 'High', 'Medium', or 'Low'.\n\
         Base your decision on keywords related to deadlines, importance, and effort.\n\
         Return the response as a JSON array, where each object has the original 'description' \
         and 'deadline', plus the new 'priority' you assigned.\n\n\
         Tasks to prioritize:\n{listing}"
    )
}

pub(crate) const KNOWLEDGE_CARD_PROMPT: &str =
    "Generate a single, bite-sized piece of content for a user's daily knowledge feed in a \
     productivity app.\n\
     The content should be interesting and actionable.\n\
     Choose one of the following categories: 'Productivity Hack', 'Fun Fact' (related to tech or \
     science), 'Quote' (inspirational), or 'Challenge' (a small, one-day task).\n\
     Return the result as a single JSON object.";

pub(crate) fn daily_report_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "productivityScore": { "type": "NUMBER" },
            "summary": { "type": "STRING" },
            "recommendations": { "type": "STRING" },
            "nextDayTodoList": { "type": "ARRAY", "items": { "type": "STRING" } }
        },
        "required": ["productivityScore", "summary", "recommendations", "nextDayTodoList"]
    })
}

pub(crate) fn prioritize_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "description": { "type": "STRING" },
                "deadline": { "type": "STRING" },
                "priority": { "type": "STRING", "enum": ["Urgent", "High", "Medium", "Low"] }
            },
            "required": ["description", "priority"]
        }
    })
}

pub(crate) fn knowledge_card_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "content": { "type": "STRING" },
            "category": {
                "type": "STRING",
                "enum": ["Productivity Hack", "Fun Fact", "Quote", "Challenge"]
            }
        },
        "required": ["title", "content", "category"]
    })
}
